use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use sea_orm_migration::MigratorTrait;
use tracing::{info, instrument};

use super::PostgresConfig;
use crate::common::{DatabaseError, DatabaseResult, RetryConfig, retry_with_backoff};

/// Connect with the default pool settings of [`PostgresConfig::new`].
pub async fn connect(database_url: &str) -> DatabaseResult<DatabaseConnection> {
    connect_from_config(PostgresConfig::new(database_url)).await
}

pub async fn connect_from_config(config: PostgresConfig) -> DatabaseResult<DatabaseConnection> {
    Ok(connect_with_options(config.into_connect_options()).await?)
}

async fn connect_with_options(options: ConnectOptions) -> Result<DatabaseConnection, DbErr> {
    let db = Database::connect(options).await?;
    info!("Connected to PostgreSQL");
    Ok(db)
}

/// Connect from config, retrying with exponential backoff.
///
/// `None` uses [`RetryConfig::default`]. Once the policy is exhausted the
/// last driver error is reported as [`DatabaseError::Unreachable`].
pub async fn connect_from_config_with_retry(
    config: PostgresConfig,
    retry_config: Option<RetryConfig>,
) -> DatabaseResult<DatabaseConnection> {
    let policy = retry_config.unwrap_or_default();
    let attempts = policy.max_retries + 1;
    let options = config.into_connect_options();

    retry_with_backoff(|| connect_with_options(options.clone()), policy)
        .await
        .map_err(|e| DatabaseError::Unreachable {
            attempts,
            reason: e.to_string(),
        })
}

/// Apply all pending migrations of `M`.
#[instrument(skip(db))]
pub async fn run_migrations<M: MigratorTrait>(
    db: &DatabaseConnection,
    app_name: &str,
) -> DatabaseResult<()> {
    info!("Applying pending migrations");
    M::up(db, None).await.map_err(|e| DatabaseError::Migration {
        app: app_name.to_owned(),
        reason: e.to_string(),
    })?;
    info!("Schema is up to date");
    Ok(())
}
