#![allow(dead_code)]

use std::{sync::Arc, time::Duration};

use chrono::{DateTime, Utc};
use qrmenu_api::{
    cache::Cache,
    config::CacheConfig,
    db::run_migrations,
    entity::{
        categories::ActiveModel as CategoryActive,
        items::ActiveModel as ItemActive,
        orders::ActiveModel as OrderActive,
        tables::ActiveModel as TableActive,
        tenants::ActiveModel as TenantActive,
    },
    middleware::auth::AdminUser,
    state::AppState,
};
use sea_orm::{ActiveModelTrait, ConnectOptions, Database, DatabaseConnection, Set};
use uuid::Uuid;

/// Fresh in-memory database with the schema applied. A single connection
/// keeps every query on the same in-memory database.
pub async fn setup_db() -> anyhow::Result<DatabaseConnection> {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);
    let orm = Database::connect(options).await?;
    run_migrations(&orm).await?;
    Ok(orm)
}

pub async fn setup_state() -> anyhow::Result<AppState> {
    setup_state_with_cache(None).await
}

pub async fn setup_state_with_cache(cache: Option<Arc<dyn Cache>>) -> anyhow::Result<AppState> {
    let orm = setup_db().await?;
    Ok(AppState::new(orm, cache, &cache_config()))
}

/// A second server instance over the same database, with its own cache handle.
pub fn replica_of(state: &AppState, cache: Option<Arc<dyn Cache>>) -> AppState {
    AppState::new(state.orm.clone(), cache, &cache_config())
}

pub fn cache_config() -> CacheConfig {
    CacheConfig {
        enabled: true,
        menu_ttl: Duration::from_secs(60),
        op_timeout: Duration::from_millis(200),
        redis_url: None,
    }
}

pub fn admin_for(tenant_id: Uuid) -> AdminUser {
    AdminUser {
        admin_id: Uuid::new_v4(),
        tenant_id,
        role: "admin".into(),
    }
}

pub struct Fixture {
    pub tenant_id: Uuid,
    pub table_token: String,
    pub category_id: Uuid,
}

/// Tenant with one active table and one active category.
pub async fn seed_tenant(orm: &DatabaseConnection, code: &str, table_token: &str) -> anyhow::Result<Fixture> {
    let tenant = TenantActive {
        id: Set(Uuid::new_v4()),
        code: Set(code.into()),
        name: Set(format!("{code} restaurant")),
        created_at: Set(Utc::now().into()),
    }
    .insert(orm)
    .await?;

    add_table(orm, tenant.id, table_token, true).await?;
    let category_id = add_category(orm, tenant.id, "Drinks", 1, true).await?;

    Ok(Fixture {
        tenant_id: tenant.id,
        table_token: table_token.into(),
        category_id,
    })
}

pub async fn add_table(
    orm: &DatabaseConnection,
    tenant_id: Uuid,
    token: &str,
    is_active: bool,
) -> anyhow::Result<Uuid> {
    let table = TableActive {
        id: Set(Uuid::new_v4()),
        tenant_id: Set(tenant_id),
        code: Set(format!("T-{token}")),
        name: Set(format!("Table {token}")),
        token: Set(token.into()),
        is_active: Set(is_active),
    }
    .insert(orm)
    .await?;
    Ok(table.id)
}

pub async fn add_category(
    orm: &DatabaseConnection,
    tenant_id: Uuid,
    name: &str,
    sort: i32,
    is_active: bool,
) -> anyhow::Result<Uuid> {
    let category = CategoryActive {
        id: Set(Uuid::new_v4()),
        tenant_id: Set(tenant_id),
        name: Set(name.into()),
        sort: Set(sort),
        is_active: Set(is_active),
    }
    .insert(orm)
    .await?;
    Ok(category.id)
}

pub async fn add_item(
    orm: &DatabaseConnection,
    fixture: &Fixture,
    name: &str,
    price: i64,
    is_active: bool,
) -> anyhow::Result<Uuid> {
    let item = ItemActive {
        id: Set(Uuid::new_v4()),
        tenant_id: Set(fixture.tenant_id),
        category_id: Set(fixture.category_id),
        name: Set(name.into()),
        description: Set(None),
        price: Set(price),
        is_active: Set(is_active),
    }
    .insert(orm)
    .await?;
    Ok(item.id)
}

/// Insert a bare order row with a chosen timestamp, for paging tests.
pub async fn insert_order_at(
    orm: &DatabaseConnection,
    tenant_id: Uuid,
    table_id: Uuid,
    status: &str,
    created_at: DateTime<Utc>,
) -> anyhow::Result<Uuid> {
    let order = OrderActive {
        id: Set(Uuid::new_v4()),
        tenant_id: Set(tenant_id),
        table_id: Set(table_id),
        guest_session_id: Set("paging".into()),
        note: Set(None),
        status: Set(status.into()),
        paid_status: Set("unpaid".into()),
        created_at: Set(created_at.into()),
    }
    .insert(orm)
    .await?;
    Ok(order.id)
}
