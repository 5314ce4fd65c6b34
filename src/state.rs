use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::{
    cache::Cache,
    config::CacheConfig,
    services::menu_service::{DbMenuSource, MenuService},
};

#[derive(Clone)]
pub struct AppState {
    pub orm: DatabaseConnection,
    pub menu: Arc<MenuService>,
    pub jwt_secret: Option<Arc<str>>,
}

impl AppState {
    /// Wires the database-backed menu source and the optional cache into the
    /// services. Construct once, after the connection is up.
    pub fn new(orm: DatabaseConnection, cache: Option<Arc<dyn Cache>>, config: &CacheConfig) -> Self {
        let source = Arc::new(DbMenuSource::new(orm.clone()));
        let menu = Arc::new(MenuService::new(source, cache, config));
        Self {
            orm,
            menu,
            jwt_secret: None,
        }
    }

    pub fn with_jwt_secret(mut self, secret: Option<String>) -> Self {
        self.jwt_secret = secret.map(Arc::from);
        self
    }
}
