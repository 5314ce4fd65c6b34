use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};

use crate::{
    dto::tables::TableResolution,
    error::AppResult,
    response::ApiResponse,
    services::table_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/{token}", get(resolve_table))
}

#[utoipa::path(
    get,
    path = "/api/v1/table/{token}",
    params(("token" = String, Path, description = "Token printed on the table's QR code")),
    responses(
        (status = 200, description = "Tenant and table for the token", body = ApiResponse<TableResolution>),
        (status = 404, description = "Unknown or inactive table"),
    ),
    tag = "Tables"
)]
pub async fn resolve_table(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> AppResult<Json<ApiResponse<TableResolution>>> {
    let resp = table_service::resolve_table(&state, &token).await?;
    Ok(Json(resp))
}
