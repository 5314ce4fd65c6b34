use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::models::{Category, Item};

/// Guest-facing menu snapshot. Also the value stored in the menu cache, so
/// it must survive a serde round trip unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MenuResponse {
    pub tenant: String,
    pub categories: Vec<Category>,
    pub items: Vec<Item>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct MenuQuery {
    pub tenant_code: Option<String>,
}
