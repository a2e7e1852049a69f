//! Idempotent additive migration.
//!
//! [`migrate`] inspects the target table, adds the column only when it is
//! missing, and then counts the rows of every table in the plan so the
//! operator can confirm nothing was lost. Both branches (migrated and
//! already migrated) end in the same verification step. Opening and closing
//! the [`Store`] is the caller's job.

use crate::backup::create_backup;
use crate::connection::Store;
use crate::error::{StoreError, StoreResult};
use chrono::{DateTime, Utc};
use rh_core::{ColumnDefault, MigrationPlan};
use serde::Serialize;
use std::path::PathBuf;

/// Knobs that change how [`migrate`] treats an unmigrated store.
#[derive(Debug, Clone, Default)]
pub struct MigrateOptions {
    /// Report what would happen without touching the store
    pub dry_run: bool,

    /// Back the store up to this path right before the schema change
    pub backup_path: Option<PathBuf>,
}

/// What [`migrate`] did to the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MigrationStatus {
    /// The column was added
    Migrated,
    /// The column was already present; nothing changed
    AlreadyMigrated,
    /// Dry run on an unmigrated store; nothing changed
    WouldMigrate,
}

impl MigrationStatus {
    /// Whether the store was modified.
    pub fn changed_schema(self) -> bool {
        matches!(self, MigrationStatus::Migrated)
    }
}

/// Row count of one table at verification time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableCount {
    pub table: String,
    pub rows: i64,
}

/// Structured result of a successful [`migrate`] call.
#[derive(Debug, Clone, Serialize)]
pub struct MigrationReport {
    pub status: MigrationStatus,
    pub table: String,
    pub column: String,
    /// Default given to pre-existing rows
    pub default: Option<ColumnDefault>,
    /// Row counts after the migration step, in plan order
    pub counts: Vec<TableCount>,
    /// Backup written before the change, if any
    pub backup: Option<PathBuf>,
    pub completed_at: DateTime<Utc>,
}

impl MigrationReport {
    /// Row count recorded for `table`, if it was counted.
    pub fn rows(&self, table: &str) -> Option<i64> {
        self.counts
            .iter()
            .find(|c| c.table == table)
            .map(|c| c.rows)
    }
}

/// Apply `plan` to `store` unless the column already exists.
///
/// Errors raised before the schema change leave the store untouched; the
/// change itself is a single transaction. A failure while counting rows
/// afterwards is reported as [`StoreError::VerificationError`] with
/// `schema_changed` set, since the column is already committed by then.
pub fn migrate(
    store: &Store,
    plan: &MigrationPlan,
    options: &MigrateOptions,
) -> StoreResult<MigrationReport> {
    plan.validate()?;

    let column = &plan.column.name;

    let status = if store.has_column(&plan.table, column)? {
        log::info!("{}.{column} already exists, skipping schema change", plan.table);
        MigrationStatus::AlreadyMigrated
    } else if options.dry_run {
        log::warn!("Dry run: {}.{column} would be added", plan.table);
        MigrationStatus::WouldMigrate
    } else {
        let before = count_tables(store, plan, false)?;

        if let Some(path) = &options.backup_path {
            create_backup(store, path)?;
        }

        store.add_column(&plan.table, &plan.column)?;

        let after = count_tables(store, plan, true)?;
        check_counts_unchanged(&before, &after)?;
        return Ok(report(
            plan,
            MigrationStatus::Migrated,
            after,
            options.backup_path.clone(),
        ));
    };

    let counts = count_tables(store, plan, false)?;
    Ok(report(plan, status, counts, None))
}

fn report(
    plan: &MigrationPlan,
    status: MigrationStatus,
    counts: Vec<TableCount>,
    backup: Option<PathBuf>,
) -> MigrationReport {
    MigrationReport {
        status,
        table: plan.table.clone(),
        column: plan.column.name.clone(),
        default: plan.column.default.clone(),
        counts,
        backup,
        completed_at: Utc::now(),
    }
}

fn count_tables(
    store: &Store,
    plan: &MigrationPlan,
    schema_changed: bool,
) -> StoreResult<Vec<TableCount>> {
    plan.count_tables
        .iter()
        .map(|table| -> StoreResult<TableCount> {
            let rows = store
                .count_rows(table)
                .map_err(|e| StoreError::VerificationError {
                    schema_changed,
                    message: e.to_string(),
                })?;
            log::debug!("{table}: {rows} rows");
            Ok(TableCount {
                table: table.clone(),
                rows,
            })
        })
        .collect()
}

fn check_counts_unchanged(before: &[TableCount], after: &[TableCount]) -> StoreResult<()> {
    for (b, a) in before.iter().zip(after) {
        if b.rows != a.rows {
            return Err(StoreError::VerificationError {
                schema_changed: true,
                message: format!(
                    "{} had {} rows before the change and {} after",
                    b.table, b.rows, a.rows
                ),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "migrator_test.rs"]
mod tests;
