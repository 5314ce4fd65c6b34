use uuid::Uuid;

use crate::{
    dto::orders::{OrdersPage, UpdateOrderStatusRequest},
    error::{AppError, AppResult},
    middleware::auth::{AdminUser, ensure_admin},
    models::{Order, OrderStatus},
    response::{ApiResponse, Meta},
    routes::params::OrderListQuery,
    services::order_service,
    state::AppState,
};

pub async fn list_orders(
    state: &AppState,
    user: &AdminUser,
    query: OrderListQuery,
) -> AppResult<ApiResponse<OrdersPage>> {
    ensure_admin(user)?;
    let status = parse_status_filter(query.status.as_deref())?;

    let page = order_service::list_admin(
        &state.orm,
        user.tenant_id,
        status,
        query.cursor.as_deref(),
        query.limit,
    )
    .await?;

    let meta = Meta::cursor_page(page.limit, page.data.len() as u64, page.next_cursor.clone());
    Ok(ApiResponse::success("Orders", page, Some(meta)))
}

pub async fn get_order(
    state: &AppState,
    user: &AdminUser,
    id: Uuid,
) -> AppResult<ApiResponse<Order>> {
    ensure_admin(user)?;
    let order = order_service::get_order(&state.orm, user.tenant_id, id).await?;
    Ok(ApiResponse::success("Order found", order, Some(Meta::empty())))
}

pub async fn update_order_status(
    state: &AppState,
    user: &AdminUser,
    id: Uuid,
    payload: UpdateOrderStatusRequest,
) -> AppResult<ApiResponse<Order>> {
    ensure_admin(user)?;
    let raw = payload.status.trim();
    if raw.is_empty() {
        return Err(AppError::bad_request("status is required"));
    }
    let status = raw
        .parse::<OrderStatus>()
        .map_err(|err| AppError::bad_request(err.to_string()))?;

    let order = order_service::update_status(&state.orm, user.tenant_id, id, status).await?;
    Ok(ApiResponse::success("Order updated", order, Some(Meta::empty())))
}

fn parse_status_filter(raw: Option<&str>) -> Result<Option<OrderStatus>, AppError> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(None),
        Some(s) => s
            .parse::<OrderStatus>()
            .map(Some)
            .map_err(|err| AppError::bad_request(err.to_string())),
    }
}
