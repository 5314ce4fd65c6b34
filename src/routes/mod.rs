use axum::Router;

use crate::state::AppState;

pub mod admin;
pub mod doc;
pub mod health;
pub mod menu;
pub mod orders;
pub mod params;
pub mod tables;

// Build the API router without binding state; it will be provided at the top level.
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .nest("/v1/menu", menu::router())
        .nest("/v1/table", tables::router())
        .nest("/v1/orders", orders::router())
        .nest("/admin", admin::router())
}
