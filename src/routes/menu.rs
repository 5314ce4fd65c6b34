use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};

use crate::{
    dto::menu::{MenuQuery, MenuResponse},
    error::{AppError, AppResult},
    response::{ApiResponse, Meta},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(get_menu))
}

#[utoipa::path(
    get,
    path = "/api/v1/menu",
    params(MenuQuery),
    responses(
        (status = 200, description = "Active categories and items of a tenant", body = ApiResponse<MenuResponse>),
        (status = 400, description = "tenant_code missing"),
        (status = 404, description = "Tenant not found"),
    ),
    tag = "Menu"
)]
pub async fn get_menu(
    State(state): State<AppState>,
    Query(query): Query<MenuQuery>,
) -> AppResult<Json<ApiResponse<MenuResponse>>> {
    let code = query
        .tenant_code
        .filter(|code| !code.trim().is_empty())
        .ok_or_else(|| AppError::bad_request("tenant_code is required"))?;

    let menu = state.menu.get_menu_by_tenant_code(&code).await?;
    Ok(Json(ApiResponse::success("Menu", menu, Some(Meta::empty()))))
}
