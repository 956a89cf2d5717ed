//! Database error types for vs-db.

use thiserror::Error;

/// Errors from database operations.
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// Opening the database or connection failed.
    #[error("Failed to connect to {target}: {reason}")]
    Connect { target: String, reason: String },

    /// A SQL query failed.
    #[error("Query failed: {0}")]
    Query(String),

    /// Required tables are absent from the connected database.
    #[error("Database is missing required tables: {}", .0.join(", "))]
    MissingTables(Vec<String>),

    /// Underlying libSQL error.
    #[error("libSQL error: {0}")]
    LibSql(#[from] libsql::Error),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
