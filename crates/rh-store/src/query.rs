//! Row counts and table listing.

use crate::error::{StoreError, StoreResult};
use rh_core::sql_utils::{quote_ident, validate_identifier};
use rusqlite::Connection;

/// Get the row count for `table`.
pub fn count_rows(conn: &Connection, table: &str) -> StoreResult<i64> {
    validate_identifier("table", table)?;
    let count: i64 = conn
        .query_row(
            &format!("SELECT COUNT(*) FROM {}", quote_ident(table)),
            [],
            |row| row.get(0),
        )
        .map_err(|e| StoreError::QueryError(format!("count failed for {table}: {e}")))?;
    Ok(count)
}

/// List user tables, excluding SQLite's internal `sqlite_*` tables.
pub fn list_tables(conn: &Connection) -> StoreResult<Vec<String>> {
    let mut stmt = conn
        .prepare(
            "SELECT name FROM sqlite_master \
             WHERE type = 'table' AND name NOT LIKE 'sqlite\\_%' ESCAPE '\\' \
             ORDER BY name",
        )
        .map_err(|e| StoreError::QueryError(format!("prepare failed: {e}")))?;
    let tables = stmt
        .query_map([], |row| row.get::<_, String>(0))
        .map_err(|e| StoreError::QueryError(format!("query failed: {e}")))?
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| StoreError::QueryError(format!("row error: {e}")))?;
    Ok(tables)
}

#[cfg(test)]
#[path = "query_test.rs"]
mod tests;
