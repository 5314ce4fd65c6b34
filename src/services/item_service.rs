use sea_orm::{ActiveModelTrait, ColumnTrait, Condition, EntityTrait, QueryFilter, Set};
use uuid::Uuid;

use crate::{
    dto::items::{PatchItemRequest, SetItemAvailabilityRequest},
    entity::{
        categories::{Column as CategoryCol, Entity as Categories},
        items::{ActiveModel as ItemActive, Column as ItemCol, Entity as Items, Model as ItemModel},
        tenants::Entity as Tenants,
    },
    error::{AppError, AppResult},
    middleware::auth::{AdminUser, ensure_admin},
    models::Item,
    response::{ApiResponse, Meta},
    services::menu_service::item_from_entity,
    state::AppState,
};

/// Apply a partial update to a menu item, then drop the tenant's cached menu.
pub async fn patch_item(
    state: &AppState,
    user: &AdminUser,
    id: Uuid,
    payload: PatchItemRequest,
) -> AppResult<ApiResponse<Item>> {
    ensure_admin(user)?;
    payload.validate()?;
    if payload.is_empty() {
        return Err(AppError::bad_request("no fields to update"));
    }

    let tenant_code = load_tenant_code(state, user).await?;
    let existing = find_item(state, user, id).await?;

    if let Some(category_id) = payload.category_id {
        let owned = Categories::find()
            .filter(
                Condition::all()
                    .add(CategoryCol::Id.eq(category_id))
                    .add(CategoryCol::TenantId.eq(user.tenant_id)),
            )
            .one(&state.orm)
            .await?;
        if owned.is_none() {
            return Err(AppError::not_found(format!("category {category_id}")));
        }
    }

    let mut active: ItemActive = existing.into();
    if let Some(name) = payload.name {
        active.name = Set(name.trim().to_string());
    }
    if let Some(description) = payload.description {
        active.description = Set(description);
    }
    if let Some(price) = payload.price {
        active.price = Set(price);
    }
    if let Some(category_id) = payload.category_id {
        active.category_id = Set(category_id);
    }
    if let Some(is_active) = payload.is_active {
        active.is_active = Set(is_active);
    }
    let updated = active.update(&state.orm).await?;

    state.menu.invalidate_tenant_menu(&tenant_code).await;

    tracing::info!(tenant_id = %user.tenant_id, item_id = %updated.id, "menu item updated");
    Ok(ApiResponse::success(
        "Item updated",
        item_from_entity(updated),
        Some(Meta::empty()),
    ))
}

/// Toggle whether an item can be ordered ("out of stock").
pub async fn set_item_availability(
    state: &AppState,
    user: &AdminUser,
    id: Uuid,
    payload: SetItemAvailabilityRequest,
) -> AppResult<ApiResponse<Item>> {
    ensure_admin(user)?;
    let tenant_code = load_tenant_code(state, user).await?;
    let existing = find_item(state, user, id).await?;

    let mut active: ItemActive = existing.into();
    active.is_active = Set(payload.is_active);
    let updated = active.update(&state.orm).await?;

    state.menu.invalidate_tenant_menu(&tenant_code).await;

    tracing::info!(
        tenant_id = %user.tenant_id,
        item_id = %updated.id,
        is_active = updated.is_active,
        "menu item availability changed"
    );
    Ok(ApiResponse::success(
        "Item updated",
        item_from_entity(updated),
        Some(Meta::empty()),
    ))
}

async fn find_item(state: &AppState, user: &AdminUser, id: Uuid) -> AppResult<ItemModel> {
    Items::find()
        .filter(
            Condition::all()
                .add(ItemCol::Id.eq(id))
                .add(ItemCol::TenantId.eq(user.tenant_id)),
        )
        .one(&state.orm)
        .await?
        .ok_or_else(|| AppError::not_found(format!("item {id}")))
}

// Resolved before any write so a successful update is always followed by
// invalidation of this code's cached menu.
async fn load_tenant_code(state: &AppState, user: &AdminUser) -> AppResult<String> {
    let tenant = Tenants::find_by_id(user.tenant_id)
        .one(&state.orm)
        .await?
        .ok_or_else(|| AppError::not_found("tenant"))?;
    Ok(tenant.code)
}
