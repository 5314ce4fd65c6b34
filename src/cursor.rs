//! Opaque resume point for order listings.
//!
//! A cursor carries the `(created_at, id)` key of the last row a client has
//! seen, rendered as `RFC3339 nanos | uuid` and then base64url encoded
//! without padding. Clients must treat it as a bearer token.

use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use chrono::{DateTime, SecondsFormat, Utc};
use uuid::Uuid;

const SEPARATOR: char = '|';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    pub created_at: DateTime<Utc>,
    pub id: Uuid,
}

impl Cursor {
    pub fn new(created_at: DateTime<Utc>, id: Uuid) -> Self {
        Self { created_at, id }
    }

    pub fn encode(&self) -> String {
        let raw = format!(
            "{}{}{}",
            self.created_at.to_rfc3339_opts(SecondsFormat::Nanos, true),
            SEPARATOR,
            self.id
        );
        URL_SAFE_NO_PAD.encode(raw)
    }

    /// Returns `None` for anything that is not a cursor produced by
    /// [`Cursor::encode`]; callers fall back to the first page.
    pub fn decode(token: &str) -> Option<Self> {
        let bytes = URL_SAFE_NO_PAD.decode(token.trim()).ok()?;
        let raw = String::from_utf8(bytes).ok()?;
        let (ts, id) = raw.split_once(SEPARATOR)?;
        let created_at = DateTime::parse_from_rfc3339(ts).ok()?.with_timezone(&Utc);
        let id = Uuid::parse_str(id).ok()?;
        Some(Self { created_at, id })
    }
}
