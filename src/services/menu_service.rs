use std::{future::Future, sync::Arc, time::Duration};

use async_trait::async_trait;
use sea_orm::{
    ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
};

use crate::{
    cache::{self, Cache, CacheError},
    config::CacheConfig,
    dto::menu::MenuResponse,
    entity::{
        categories::{Column as CategoryCol, Entity as Categories, Model as CategoryModel},
        items::{Column as ItemCol, Entity as Items, Model as ItemModel},
        tenants::{Column as TenantCol, Entity as Tenants},
    },
    error::{AppError, AppResult},
    models::{Category, Item},
};

/// Where menu snapshots come from when the cache cannot answer.
#[async_trait]
pub trait MenuSource: Send + Sync {
    async fn load_menu(&self, tenant_code: &str) -> AppResult<MenuResponse>;
}

/// Reads the active catalog of a tenant straight from the database.
#[derive(Clone)]
pub struct DbMenuSource {
    db: DatabaseConnection,
}

impl DbMenuSource {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl MenuSource for DbMenuSource {
    async fn load_menu(&self, tenant_code: &str) -> AppResult<MenuResponse> {
        let tenant = Tenants::find()
            .filter(TenantCol::Code.eq(tenant_code))
            .one(&self.db)
            .await?
            .ok_or_else(|| AppError::not_found(format!("tenant {tenant_code}")))?;

        let categories = Categories::find()
            .filter(
                Condition::all()
                    .add(CategoryCol::TenantId.eq(tenant.id))
                    .add(CategoryCol::IsActive.eq(true)),
            )
            .order_by_asc(CategoryCol::Sort)
            .order_by_asc(CategoryCol::Name)
            .all(&self.db)
            .await?
            .into_iter()
            .map(category_from_entity)
            .collect::<Vec<_>>();

        let items = Items::find()
            .filter(
                Condition::all()
                    .add(ItemCol::TenantId.eq(tenant.id))
                    .add(ItemCol::IsActive.eq(true)),
            )
            .order_by_asc(ItemCol::Name)
            .all(&self.db)
            .await?
            .into_iter()
            .map(item_from_entity)
            .collect::<Vec<_>>();

        tracing::debug!(
            tenant_code,
            categories = categories.len(),
            items = items.len(),
            "menu loaded from database"
        );

        Ok(MenuResponse {
            tenant: tenant.code,
            categories,
            items,
        })
    }
}

/// Cache-aside reader for tenant menus.
///
/// A cached snapshot is trusted until its TTL runs out; catalog writers must
/// call [`MenuService::invalidate_tenant_menu`] after every mutation. Cache
/// failures and timeouts are logged and fall through to the source.
pub struct MenuService {
    source: Arc<dyn MenuSource>,
    cache: Option<Arc<dyn Cache>>,
    ttl: Duration,
    op_timeout: Duration,
}

impl MenuService {
    pub fn new(
        source: Arc<dyn MenuSource>,
        cache: Option<Arc<dyn Cache>>,
        config: &CacheConfig,
    ) -> Self {
        let cache = if config.enabled { cache } else { None };
        Self {
            source,
            cache,
            ttl: config.menu_ttl,
            op_timeout: config.op_timeout,
        }
    }

    pub async fn get_menu_by_tenant_code(&self, code: &str) -> AppResult<MenuResponse> {
        let code = code.trim();
        if code.is_empty() {
            return Err(AppError::bad_request("tenant code is required"));
        }

        let key = cache::menu_key(code);

        if let Some(cache) = self.read_through_cache() {
            match self.bounded(cache.get(&key)).await {
                Ok(Some(cached)) if !cached.is_empty() => {
                    match serde_json::from_str::<MenuResponse>(&cached) {
                        Ok(menu) => {
                            tracing::debug!(tenant_code = code, "menu cache hit");
                            return Ok(menu);
                        }
                        Err(err) => {
                            tracing::warn!(tenant_code = code, error = %err, "discarding undecodable menu cache entry")
                        }
                    }
                }
                Ok(_) => tracing::debug!(tenant_code = code, "menu cache miss"),
                Err(err) => tracing::warn!(tenant_code = code, error = %err, "menu cache read failed"),
            }
        }

        let menu = self.source.load_menu(code).await?;

        if let Some(cache) = self.read_through_cache() {
            match serde_json::to_string(&menu) {
                Ok(payload) => {
                    if let Err(err) = self.bounded(cache.set(&key, &payload, self.ttl)).await {
                        tracing::warn!(tenant_code = code, error = %err, "menu cache write failed");
                    }
                }
                Err(err) => {
                    tracing::warn!(tenant_code = code, error = %err, "menu cache payload encoding failed")
                }
            }
        }

        tracing::info!(
            tenant_code = code,
            categories = menu.categories.len(),
            items = menu.items.len(),
            "menu fetched"
        );
        Ok(menu)
    }

    /// Drop the cached snapshot for a tenant. Never fails.
    pub async fn invalidate_tenant_menu(&self, code: &str) {
        let code = code.trim();
        let Some(cache) = self.cache.as_deref() else {
            return;
        };
        if code.is_empty() {
            return;
        }

        let key = cache::menu_key(code);
        match self.bounded(cache.del(&[key.as_str()])).await {
            Ok(()) => tracing::info!(tenant_code = code, "menu cache invalidated"),
            Err(err) => tracing::warn!(tenant_code = code, error = %err, "menu cache invalidation failed"),
        }
    }

    fn read_through_cache(&self) -> Option<&dyn Cache> {
        if self.ttl.is_zero() {
            return None;
        }
        self.cache.as_deref()
    }

    async fn bounded<T>(
        &self,
        op: impl Future<Output = Result<T, CacheError>>,
    ) -> Result<T, CacheError> {
        tokio::time::timeout(self.op_timeout, op)
            .await
            .map_err(|_| CacheError::Timeout(self.op_timeout))?
    }
}

fn category_from_entity(model: CategoryModel) -> Category {
    Category {
        id: model.id,
        tenant_id: model.tenant_id,
        name: model.name,
        sort: model.sort,
        is_active: model.is_active,
    }
}

pub(crate) fn item_from_entity(model: ItemModel) -> Item {
    Item {
        id: model.id,
        tenant_id: model.tenant_id,
        category_id: model.category_id,
        name: model.name,
        description: model.description,
        price: model.price,
        is_active: model.is_active,
    }
}
