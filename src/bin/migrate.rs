use qrmenu_api::{config::AppConfig, db::create_orm_conn, migration::Migrator};
use sea_orm_migration::MigratorTrait;

/// `migrate` applies pending migrations; `migrate down` rolls back the last one.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let config = AppConfig::from_env()?;
    let orm = create_orm_conn(&config.database_url).await?;

    match std::env::args().nth(1).as_deref() {
        Some("down") => {
            Migrator::down(&orm, Some(1)).await?;
            tracing::info!("rolled back last migration");
        }
        None | Some("up") => {
            let pending = Migrator::get_pending_migrations(&orm).await?;
            for migration in &pending {
                tracing::info!(name = migration.name(), "applying migration");
            }
            Migrator::up(&orm, None).await?;
            tracing::info!(applied = pending.len(), "migrations up to date");
        }
        Some(other) => anyhow::bail!("unknown command '{other}', expected 'up' or 'down'"),
    }
    Ok(())
}
