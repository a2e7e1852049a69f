//! Store connection wrapper.
//!
//! [`Store`] owns a SQLite [`Connection`] to an existing application database
//! and exposes the introspection, mutation, and counting operations the
//! migrator needs. The connection is released when the handle is dropped, so
//! every exit path closes the store; [`Store::close`] additionally surfaces
//! close errors on the success path.

use crate::error::{StoreError, StoreResult};
use crate::{query, schema};
use rh_core::ColumnSpec;
use rusqlite::{Connection, OpenFlags};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// Handle to an open store.
///
/// Single-threaded; the migrator runs strictly sequentially.
pub struct Store {
    conn: Connection,
    path: Option<PathBuf>,
}

impl Store {
    /// Open the existing store at `path`.
    ///
    /// Never creates a file: a missing store is an access error, since an
    /// empty database would have none of the tables the migration expects.
    pub fn open(path: &Path) -> StoreResult<Self> {
        if !path.exists() {
            return Err(StoreError::AccessError(format!(
                "store file does not exist: {}",
                path.display()
            )));
        }

        let conn = Connection::open_with_flags(path, open_flags())
            .map_err(|e| StoreError::AccessError(format!("{e}: {}", path.display())))?;

        log::debug!("Opened store {}", path.display());
        Ok(Self {
            conn,
            path: Some(path.to_path_buf()),
        })
    }

    /// Create an in-memory store.
    ///
    /// Useful for unit tests that don't need persistence.
    pub fn open_memory() -> StoreResult<Self> {
        let conn =
            Connection::open_in_memory().map_err(|e| StoreError::AccessError(e.to_string()))?;
        Ok(Self { conn, path: None })
    }

    /// Borrow the underlying SQLite connection.
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Path of the store file, or `None` for an in-memory store.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Execute `body` within a `BEGIN IMMEDIATE` / `COMMIT` transaction,
    /// rolling back on error.
    ///
    /// `IMMEDIATE` takes the write lock up front so a store held by another
    /// writer fails here instead of halfway through `body`.
    pub fn transaction<F, T>(&self, body: F) -> StoreResult<T>
    where
        F: FnOnce(&Connection) -> StoreResult<T>,
    {
        self.conn
            .execute_batch("BEGIN IMMEDIATE")
            .map_err(|e| StoreError::TransactionError(format!("BEGIN failed: {e}")))?;

        let result = body(&self.conn);

        match &result {
            Ok(_) => {
                if let Err(commit_err) = self.conn.execute_batch("COMMIT") {
                    rollback(&self.conn);
                    return Err(StoreError::TransactionError(format!(
                        "COMMIT failed: {commit_err}"
                    )));
                }
            }
            Err(e) => {
                log::debug!("Rolling back transaction: {e}");
                rollback(&self.conn);
            }
        }
        result
    }

    /// Column names of `table`, read from the catalog.
    pub fn inspect_columns(&self, table: &str) -> StoreResult<BTreeSet<String>> {
        schema::inspect_columns(&self.conn, table)
    }

    /// Whether `table` currently has a column called `column`.
    pub fn has_column(&self, table: &str, column: &str) -> StoreResult<bool> {
        schema::has_column(&self.conn, table, column)
    }

    /// Whether `table` exists in the catalog.
    pub fn table_exists(&self, table: &str) -> StoreResult<bool> {
        schema::table_exists(&self.conn, table)
    }

    /// Add `column` to `table` in a single transaction.
    pub fn add_column(&self, table: &str, column: &ColumnSpec) -> StoreResult<()> {
        schema::add_column(self, table, column)
    }

    /// Current number of rows in `table`.
    pub fn count_rows(&self, table: &str) -> StoreResult<i64> {
        query::count_rows(&self.conn, table)
    }

    /// Close the connection, reporting any error SQLite returns on close.
    pub fn close(self) -> StoreResult<()> {
        let path = self.path;
        self.conn.close().map_err(|(_, e)| StoreError::Sqlite(e))?;
        if let Some(path) = path {
            log::debug!("Closed store {}", path.display());
        }
        Ok(())
    }
}

/// Read-write on an existing file. No `CREATE`, and no `URI` so a path
/// starting with `file:` is taken literally.
fn open_flags() -> OpenFlags {
    OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_NO_MUTEX
}

fn rollback(conn: &Connection) {
    if let Err(e) = conn.execute_batch("ROLLBACK") {
        log::warn!("ROLLBACK failed: {e}");
    }
}

#[cfg(test)]
#[path = "connection_test.rs"]
mod tests;
