//! # vs-db
//!
//! libSQL database access for vars-summary.
//!
//! Opens the annotation database (local file or remote libSQL server), binds
//! concepts into the fixed statement templates, and drains every result
//! stream into an owned [`vs_core::QueryResult`]. Statements run one at a
//! time; nothing is cached or retried.

pub mod error;
pub mod execute;
pub mod helpers;
pub mod service;
pub mod templates;

#[cfg(test)]
mod test_support;

use error::DatabaseError;
use libsql::Builder;
use vs_config::DatabaseConfig;

/// Tables every statement template reads from.
pub const REQUIRED_TABLES: [&str; 2] = ["Annotations", "QualityImageAnnotations"];

/// Annotation database handle.
pub struct AnnotationDb {
    #[allow(dead_code)]
    db: libsql::Database,
    conn: libsql::Connection,
}

impl AnnotationDb {
    /// Open a local database file (or `":memory:"`).
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Connect` if the database cannot be opened.
    pub async fn open_local(path: &str) -> Result<Self, DatabaseError> {
        let connect_err = |e: libsql::Error| DatabaseError::Connect {
            target: path.to_string(),
            reason: e.to_string(),
        };
        let db = Builder::new_local(path).build().await.map_err(connect_err)?;
        let conn = db.connect().map_err(connect_err)?;
        Ok(Self { db, conn })
    }

    /// Open a remote libSQL database.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Connect` if the database cannot be reached.
    pub async fn open_remote(url: &str, auth_token: &str) -> Result<Self, DatabaseError> {
        let connect_err = |e: libsql::Error| DatabaseError::Connect {
            target: url.to_string(),
            reason: e.to_string(),
        };
        let db = Builder::new_remote(url.to_string(), auth_token.to_string())
            .build()
            .await
            .map_err(connect_err)?;
        let conn = db.connect().map_err(connect_err)?;
        Ok(Self { db, conn })
    }

    /// Open whatever the `[database]` config section points at.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Connect` if the database cannot be opened.
    pub async fn open(config: &DatabaseConfig) -> Result<Self, DatabaseError> {
        if config.is_remote() {
            tracing::debug!(url = %config.url, "opening remote annotation database");
            Self::open_remote(&config.url, &config.auth_token).await
        } else {
            tracing::debug!(path = %config.url, "opening local annotation database");
            Self::open_local(&config.url).await
        }
    }

    /// Access the underlying libSQL connection for direct queries.
    #[must_use]
    pub const fn conn(&self) -> &libsql::Connection {
        &self.conn
    }

    /// Names from [`REQUIRED_TABLES`] that do not exist as a table or view.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the catalog cannot be read.
    pub async fn missing_tables(&self) -> Result<Vec<String>, DatabaseError> {
        let mut missing = Vec::new();
        for table in REQUIRED_TABLES {
            let mut rows = self
                .conn
                .query(
                    "SELECT name FROM sqlite_master WHERE type IN ('table', 'view') AND name = ?1",
                    [table],
                )
                .await?;
            if rows.next().await?.is_none() {
                missing.push(table.to_string());
            }
        }
        Ok(missing)
    }

    /// Fail unless every required table is present.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::MissingTables` listing the absent tables.
    pub async fn verify_schema(&self) -> Result<(), DatabaseError> {
        let missing = self.missing_tables().await?;
        if missing.is_empty() {
            Ok(())
        } else {
            Err(DatabaseError::MissingTables(missing))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::helpers::{seeded_db, test_db};

    #[tokio::test]
    async fn empty_database_reports_missing_tables() {
        let db = AnnotationDb::open_local(":memory:").await.unwrap();
        let missing = db.missing_tables().await.unwrap();
        assert_eq!(missing, vec!["Annotations", "QualityImageAnnotations"]);
        let err = db.verify_schema().await.unwrap_err();
        assert!(err.to_string().contains("Annotations"));
    }

    #[tokio::test]
    async fn fixture_schema_passes_verification() {
        let db = test_db().await;
        db.verify_schema().await.unwrap();
    }

    #[tokio::test]
    async fn seeded_rows_are_queryable() {
        let db = seeded_db().await;
        let mut rows = db
            .conn()
            .query("SELECT COUNT(*) FROM Annotations", ())
            .await
            .unwrap();
        let row = rows.next().await.unwrap().unwrap();
        assert!(row.get::<i64>(0).unwrap() > 0);
    }

    #[tokio::test]
    async fn open_uses_local_path_from_config() {
        let config = DatabaseConfig {
            url: ":memory:".into(),
            auth_token: String::new(),
        };
        let db = AnnotationDb::open(&config).await.unwrap();
        assert_eq!(db.missing_tables().await.unwrap().len(), 2);
    }
}
