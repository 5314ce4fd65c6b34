use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Default, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct OrderListQuery {
    /// Exact status match.
    pub status: Option<String>,
    /// Opaque value from a previous page's `next_cursor`.
    pub cursor: Option<String>,
    /// Page size, 1..=100. Defaults to 20.
    pub limit: Option<i64>,
}
