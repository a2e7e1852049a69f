//! Catalog introspection and the additive column change.

use crate::connection::Store;
use crate::error::{StoreError, StoreResult};
use crate::query::list_tables;
use rh_core::sql_utils::{quote_ident, validate_identifier};
use rh_core::ColumnSpec;
use rusqlite::Connection;
use std::collections::BTreeSet;

/// Read the column names of `table` from `pragma_table_info`.
///
/// A table without a catalog entry is reported as
/// [`StoreError::TableNotFound`] rather than an empty set, so a typo in the
/// target can never be mistaken for "column missing".
pub fn inspect_columns(conn: &Connection, table: &str) -> StoreResult<BTreeSet<String>> {
    validate_identifier("table", table)?;

    let mut stmt = conn
        .prepare("SELECT name FROM pragma_table_info(?1)")
        .map_err(|e| StoreError::IntrospectionError(format!("prepare failed: {e}")))?;
    let columns: BTreeSet<String> = stmt
        .query_map([table], |row| row.get::<_, String>(0))
        .map_err(|e| StoreError::IntrospectionError(format!("table_info({table}): {e}")))?
        .collect::<Result<_, _>>()
        .map_err(|e| StoreError::IntrospectionError(format!("table_info({table}) row: {e}")))?;

    if columns.is_empty() {
        let available = list_tables(conn).unwrap_or_default();
        return Err(StoreError::TableNotFound(if available.is_empty() {
            format!("{table} (store has no tables)")
        } else {
            format!("{table} (available: {})", available.join(", "))
        }));
    }

    log::debug!("{table} has {} columns", columns.len());
    Ok(columns)
}

/// Whether `table` has `column`.
///
/// SQLite resolves column names case-insensitively, so `mealtype` counts as
/// present when looking for `MealType`.
pub fn has_column(conn: &Connection, table: &str, column: &str) -> StoreResult<bool> {
    let columns = inspect_columns(conn, table)?;
    Ok(columns.iter().any(|c| c.eq_ignore_ascii_case(column)))
}

/// Whether a table named `table` exists (case-insensitive).
pub fn table_exists(conn: &Connection, table: &str) -> StoreResult<bool> {
    let count: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1 COLLATE NOCASE",
            [table],
            |row| row.get(0),
        )
        .map_err(|e| StoreError::IntrospectionError(format!("sqlite_master lookup: {e}")))?;
    Ok(count > 0)
}

/// Add `column` to `table` inside one transaction.
///
/// The column's presence is re-checked under the write lock and confirmed
/// after the `ALTER TABLE`; any failure rolls the whole change back.
pub fn add_column(store: &Store, table: &str, column: &ColumnSpec) -> StoreResult<()> {
    validate_identifier("table", table)?;
    column.validate()?;

    let sql = format!(
        "ALTER TABLE {} ADD COLUMN {}",
        quote_ident(table),
        column.definition_sql()
    );

    store.transaction(|conn| {
        if has_column(conn, table, &column.name)? {
            return Err(StoreError::MutationError(format!(
                "{table}.{} already exists",
                column.name
            )));
        }

        log::debug!("Executing: {sql}");
        conn.execute_batch(&sql)
            .map_err(|e| StoreError::MutationError(format!("{e}: {sql}")))?;

        if !has_column(conn, table, &column.name)? {
            return Err(StoreError::MutationError(format!(
                "{table}.{} not visible after ALTER TABLE",
                column.name
            )));
        }
        Ok(())
    })?;

    log::info!("Added column {table}.{}", column.name);
    Ok(())
}

#[cfg(test)]
#[path = "schema_test.rs"]
mod tests;
