use std::{env, time::Duration};

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub allowed_origins: Vec<String>,
    /// HS256 key for admin tokens. Admin routes answer 500 without it.
    pub jwt_secret: Option<String>,
    pub cache: CacheConfig,
}

#[derive(Debug, Clone)]
pub struct CacheConfig {
    pub enabled: bool,
    /// Lifetime of a cached menu snapshot. Zero disables caching.
    pub menu_ttl: Duration,
    /// Upper bound for a single cache call, independent of the request deadline.
    pub op_timeout: Duration,
    /// Shared backend for multi-instance deployments; in-process when unset.
    pub redis_url: Option<String>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            menu_ttl: Duration::from_secs(300),
            op_timeout: Duration::from_millis(3000),
            redis_url: None,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = env::var("DATABASE_URL")?;
        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(8080);
        let allowed_origins = env::var("APP_ALLOWED_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:3000".to_string())
            .split(',')
            .map(|origin| origin.trim().to_string())
            .filter(|origin| !origin.is_empty())
            .collect();

        let defaults = CacheConfig::default();
        let cache = CacheConfig {
            enabled: env::var("CACHE_ENABLED")
                .ok()
                .and_then(|v| v.parse::<bool>().ok())
                .unwrap_or(defaults.enabled),
            menu_ttl: env::var("MENU_CACHE_TTL_SECONDS")
                .ok()
                .and_then(|v| v.parse::<u64>().ok())
                .map(Duration::from_secs)
                .unwrap_or(defaults.menu_ttl),
            op_timeout: env::var("CACHE_OP_TIMEOUT_MS")
                .ok()
                .and_then(|v| v.parse::<u64>().ok())
                .map(Duration::from_millis)
                .unwrap_or(defaults.op_timeout),
            redis_url: non_empty_var("REDIS_URL"),
        };
        let jwt_secret = non_empty_var("JWT_SECRET");

        Ok(Self {
            port,
            database_url,
            host,
            allowed_origins,
            jwt_secret,
            cache,
        })
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
