use domain::GatewayError;
use thiserror::Error;

/// Errors raised while setting up the database.
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// A database error occurred.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A database migration error occurred.
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// Result type for database setup.
pub type Result<T> = std::result::Result<T, PersistenceError>;

pub(crate) fn database_error(error: sqlx::Error) -> GatewayError {
    GatewayError::Database(error.to_string())
}
