//! Errors surfaced by the connection helpers.

#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
    #[cfg(feature = "postgres")]
    #[error(transparent)]
    Postgres(#[from] sea_orm::DbErr),

    /// Every connection attempt of the retry policy failed
    #[error("database unreachable after {attempts} attempt(s): {reason}")]
    Unreachable { attempts: u32, reason: String },

    #[error("health check failed: {0}")]
    HealthCheckFailed(String),

    #[error("migrations for {app} failed: {reason}")]
    Migration { app: String, reason: String },
}

pub type DatabaseResult<T> = Result<T, DatabaseError>;
