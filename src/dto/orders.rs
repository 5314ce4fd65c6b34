use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::{Order, OrderStatus};

/// Guest order submission. No authentication: the guest identifies the
/// restaurant by code and the table by the token printed on its QR code.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateOrderRequest {
    #[serde(default)]
    pub tenant: String,
    #[serde(default)]
    pub table_token: String,
    #[serde(default)]
    pub guest_session_id: String,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub items: Vec<CreateOrderItem>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateOrderItem {
    pub item_id: Uuid,
    pub qty: i32,
    /// Selected modifiers, stored as given.
    #[serde(default)]
    #[schema(value_type = Option<Object>)]
    pub options: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateOrderResponse {
    pub order_id: Uuid,
    pub status: OrderStatus,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct OrdersPage {
    pub data: Vec<Order>,
    pub next_cursor: Option<String>,
    /// Page size actually applied after normalisation.
    #[serde(skip)]
    pub limit: u64,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UpdateOrderStatusRequest {
    #[serde(default)]
    pub status: String,
}
