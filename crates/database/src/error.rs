use thiserror::Error;

#[derive(Error, Debug)]
pub enum DbError {
    #[error("Failed to load environment variables for database connection: {0}")]
    ConnectionConfigError(String),

    #[error("Failed to query the database: {0}")]
    QueryError(#[from] sqlx::Error),

    #[error("Database migration failed: {0}")]
    MigrationError(#[from] sqlx::migrate::MigrateError),

    #[error("Failed to read '{path}': {source}")]
    ReadError {
        path: String,
        #[source]
        source: csv::Error,
    },

    #[error("Schema violation in '{path}' at line {line}: {message}")]
    SchemaError {
        path: String,
        line: u64,
        message: String,
    },

    #[error("Background loading task failed: {0}")]
    TaskError(#[from] tokio::task::JoinError),
}
