use crate::config::AppConfig;
use crate::errors::ServiceError;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;
use std::time::Duration;
use tracing::info;

/// Type alias for a database connection pool
pub type DbPool = DatabaseConnection;

/// Establishes a connection pool from application configuration.
pub async fn establish_connection(cfg: &AppConfig) -> Result<DbPool, ServiceError> {
    let mut options = ConnectOptions::new(cfg.database_url.clone());
    options
        .max_connections(cfg.db_max_connections)
        .min_connections(1)
        .connect_timeout(Duration::from_secs(30))
        .idle_timeout(Duration::from_secs(600))
        .sqlx_logging(false);

    let pool = Database::connect(options).await?;
    info!("Database connection established");
    Ok(pool)
}

/// Runs all pending schema migrations.
pub async fn run_migrations(pool: &DbPool) -> Result<(), ServiceError> {
    crate::migrator::Migrator::up(pool, None).await?;
    info!("Database migrations completed");
    Ok(())
}
