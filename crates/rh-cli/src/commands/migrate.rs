//! Migrate command implementation

use anyhow::{Context, Result};
use rh_core::plan::MEAL_TYPE_COLUMN;
use rh_core::{ColumnDefault, MealType};
use rh_store::{migrate, MigrateOptions, MigrationReport, MigrationStatus, Store, StoreError};
use std::fmt;
use std::fmt::Write as _;

use crate::context::RuntimeContext;

/// Execute the migration against the store named by `ctx`.
///
/// The store is closed explicitly on success and by `Drop` on every error path.
pub fn execute(ctx: &RuntimeContext) -> Result<()> {
    let plan = &ctx.config.migration;

    if !ctx.json {
        println!(
            "Adding {} column to {} table in {}...",
            plan.column.name,
            plan.table,
            ctx.database_path.display()
        );
    }

    let store = Store::open(&ctx.database_path).context("Failed to open store")?;

    let options = MigrateOptions {
        dry_run: ctx.dry_run,
        backup_path: ctx.backup.then(|| ctx.backup_path.clone()),
    };
    let report = migrate(&store, plan, &options).context("Migration failed")?;

    if report.status.changed_schema() {
        store.close().context(SchemaCommitted {
            column: report.column.clone(),
        })?;
    } else {
        store.close().context("Failed to close store")?;
    }

    if ctx.json {
        let output =
            serde_json::to_string_pretty(&report).context("Failed to serialize report")?;
        println!("{output}");
    } else {
        print_report(&report);
    }
    Ok(())
}

fn print_report(report: &MigrationReport) {
    match report.status {
        MigrationStatus::Migrated => {
            println!("{} column added successfully!", report.column);
            if let Some(default) = &report.default {
                println!(
                    "  All existing rows set to {}{}",
                    default,
                    describe_default(report, default)
                );
            }
        }
        MigrationStatus::AlreadyMigrated => {
            println!("{} column already exists!", report.column);
        }
        MigrationStatus::WouldMigrate => {
            println!(
                "Dry run: {} column would be added to {} (no changes made)",
                report.column, report.table
            );
        }
    }

    if let Some(backup) = &report.backup {
        println!("  Backup written to {}", backup.display());
    }

    println!();
    if report.status == MigrationStatus::WouldMigrate {
        println!("Dry run complete.");
    } else {
        println!("Database migration complete!");
    }
    for count in &report.counts {
        println!("  {:<20} {:>6} rows", count.table, count.rows);
    }
    if report.status != MigrationStatus::WouldMigrate {
        println!("  Your data has been preserved!");
    }
}

/// " (Dinner)" when the default is a known meal type on the MealType column.
fn describe_default(report: &MigrationReport, default: &ColumnDefault) -> String {
    match default {
        ColumnDefault::Integer(v) if report.column == MEAL_TYPE_COLUMN => MealType::from_i64(*v)
            .map(|meal| format!(" ({meal})"))
            .unwrap_or_default(),
        _ => String::new(),
    }
}

/// Context marking an error raised after the column was committed.
#[derive(Debug)]
struct SchemaCommitted {
    column: String,
}

impl fmt::Display for SchemaCommitted {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Failed to close store after the {} column was committed",
            self.column
        )
    }
}

/// Error text, commit status, and restore instructions for `err`.
fn failure_message(err: &anyhow::Error, ctx: &RuntimeContext) -> String {
    let column = &ctx.config.migration.column.name;
    let store_err = err.downcast_ref::<StoreError>();

    let mut out = String::new();
    let _ = writeln!(out, "Error: {err:#}");

    if err.downcast_ref::<SchemaCommitted>().is_some() {
        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "The {column} column WAS added and committed, but the store did not close cleanly."
        );
    } else if store_err.is_some_and(StoreError::schema_changed) {
        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "The {column} column WAS added, but row counts could not be confirmed."
        );
    } else if store_err.is_some() {
        let _ = writeln!(out);
        let _ = writeln!(out, "No schema change was committed.");
    }

    let database = ctx.database_path.display();
    let backup = ctx.backup_path.display();
    let _ = writeln!(out);
    let _ = writeln!(out, "If this fails, you can restore from backup:");
    if cfg!(windows) {
        let _ = writeln!(out, "   Copy-Item {backup} {database} -Force");
    } else {
        let _ = writeln!(out, "   cp {backup} {database}");
    }
    if !ctx.backup_path.exists() {
        let _ = writeln!(out, "   (no backup found at {backup})");
    }
    out
}

/// Print `err` with recovery guidance and exit with status 1.
pub fn fail(err: &anyhow::Error, ctx: &RuntimeContext) -> ! {
    eprint!("{}", failure_message(err, ctx));
    std::process::exit(1);
}

#[cfg(test)]
#[path = "migrate_test.rs"]
mod tests;
