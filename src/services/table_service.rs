use chrono::Utc;
use sea_orm::{ColumnTrait, Condition, EntityTrait, QueryFilter};

use crate::{
    dto::tables::TableResolution,
    entity::{
        tables::{Column as TableCol, Entity as Tables, Model as TableModel},
        tenants::{Entity as Tenants, Model as TenantModel},
    },
    error::{AppError, AppResult},
    models::{Table, Tenant},
    response::{ApiResponse, Meta},
    state::AppState,
};

/// Resolve a scanned QR token to its tenant and table. Inactive tables are
/// reported as missing.
pub async fn resolve_table(state: &AppState, token: &str) -> AppResult<ApiResponse<TableResolution>> {
    let token = token.trim();
    if token.is_empty() {
        return Err(AppError::bad_request("token is required"));
    }

    let table = Tables::find()
        .filter(
            Condition::all()
                .add(TableCol::Token.eq(token))
                .add(TableCol::IsActive.eq(true)),
        )
        .one(&state.orm)
        .await?
        .ok_or_else(|| AppError::not_found("table"))?;

    let tenant = Tenants::find_by_id(table.tenant_id)
        .one(&state.orm)
        .await?
        .ok_or_else(|| AppError::not_found("tenant"))?;

    tracing::debug!(tenant_id = %tenant.id, table_id = %table.id, "table resolved");

    Ok(ApiResponse::success(
        "Table",
        TableResolution {
            tenant: tenant_from_entity(tenant),
            table: table_from_entity(table),
        },
        Some(Meta::empty()),
    ))
}

fn tenant_from_entity(model: TenantModel) -> Tenant {
    Tenant {
        id: model.id,
        code: model.code,
        name: model.name,
        created_at: model.created_at.with_timezone(&Utc),
    }
}

fn table_from_entity(model: TableModel) -> Table {
    Table {
        id: model.id,
        tenant_id: model.tenant_id,
        code: model.code,
        name: model.name,
        is_active: model.is_active,
    }
}
