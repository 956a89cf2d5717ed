//! Stateless statement execution into owned snapshots.

use vs_core::QueryResult;

use crate::error::DatabaseError;
use crate::helpers::row_cells;
use crate::templates::BoundQuery;

/// Execute a bound statement and drain its cursor into a [`QueryResult`].
///
/// The cursor is consumed to end-of-stream. An error while advancing it ends
/// the snapshot early: rows read so far are kept and the error is recorded in
/// [`QueryResult::interrupted`].
///
/// # Errors
///
/// Returns [`DatabaseError::LibSql`] if the statement cannot be prepared or
/// started. Failures after the first row are not errors.
pub async fn execute(
    conn: &libsql::Connection,
    query: &BoundQuery,
) -> Result<QueryResult, DatabaseError> {
    tracing::debug!(kind = %query.kind, sql = query.sql, params = ?query.params, "executing");

    let mut rows = conn.query(query.sql, query.libsql_params()).await?;
    let width = rows.column_count();
    let columns = (0..width)
        .map(|idx| rows.column_name(idx).unwrap_or_default().to_string())
        .collect();

    let mut result = QueryResult::new(columns);
    loop {
        match rows.next().await {
            Ok(Some(row)) => result.push_row(row_cells(&row, width)),
            Ok(None) => break,
            Err(error) => {
                tracing::warn!(
                    kind = %query.kind,
                    rows_read = result.len(),
                    %error,
                    "result stream failed"
                );
                result.interrupt(error.to_string());
                break;
            }
        }
    }

    tracing::debug!(kind = %query.kind, rows = result.len(), "drained");
    Ok(result)
}

/// Execute a statement, turning a failure to start it into an empty,
/// interrupted snapshot.
pub async fn execute_or_empty(conn: &libsql::Connection, query: &BoundQuery) -> QueryResult {
    match execute(conn, query).await {
        Ok(result) => result,
        Err(error) => {
            tracing::warn!(kind = %query.kind, params = ?query.params, %error, "query failed");
            QueryResult::failed(error.to_string())
        }
    }
}
