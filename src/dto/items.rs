use serde::{Deserialize, Deserializer};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::AppError;

/// Partial update of a menu item. Absent fields are left untouched;
/// `description: null` clears the description.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct PatchItemRequest {
    pub name: Option<String>,
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<String>)]
    pub description: Option<Option<String>>,
    pub price: Option<i64>,
    pub category_id: Option<Uuid>,
    pub is_active: Option<bool>,
}

impl PatchItemRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        if let Some(name) = &self.name {
            if name.trim().is_empty() {
                return Err(AppError::bad_request("name must not be empty"));
            }
        }
        if let Some(price) = self.price {
            if price < 0 {
                return Err(AppError::bad_request("price must not be negative"));
            }
        }
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.price.is_none()
            && self.category_id.is_none()
            && self.is_active.is_none()
    }
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct SetItemAvailabilityRequest {
    pub is_active: bool,
}

// Wraps any value that is present in the payload, null included, so a
// missing field stays `None` while `null` becomes `Some(None)`.
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distinguishes_absent_from_null_description() {
        let absent: PatchItemRequest = serde_json::from_str(r#"{"price": 100}"#).unwrap();
        assert_eq!(absent.description, None);

        let null: PatchItemRequest = serde_json::from_str(r#"{"description": null}"#).unwrap();
        assert_eq!(null.description, Some(None));

        let set: PatchItemRequest =
            serde_json::from_str(r#"{"description": "double shot"}"#).unwrap();
        assert_eq!(set.description, Some(Some("double shot".to_string())));
    }

    #[test]
    fn rejects_blank_name_and_negative_price() {
        let blank = PatchItemRequest {
            name: Some("  ".into()),
            ..Default::default()
        };
        assert!(blank.validate().is_err());

        let negative = PatchItemRequest {
            price: Some(-1),
            ..Default::default()
        };
        assert!(negative.validate().is_err());

        let ok = PatchItemRequest {
            price: Some(0),
            ..Default::default()
        };
        assert!(ok.validate().is_ok());
    }

    #[test]
    fn wrong_field_types_fail_to_deserialize() {
        let result = serde_json::from_str::<PatchItemRequest>(r#"{"price": "cheap"}"#);
        assert!(result.is_err());
    }
}
