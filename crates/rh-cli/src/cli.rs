//! CLI argument definitions using clap derive API

use clap::Parser;
use std::path::PathBuf;

/// Adds the MealType column to MealPlanDays in a ReceiptHealth store.
///
/// Run without arguments to migrate receipts.db in the current directory.
#[derive(Parser, Debug)]
#[command(name = "rh-migrate")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Path to the store (default: receipts.db in the working directory)
    #[arg(short, long, env = "RH_MIGRATE_DATABASE")]
    pub database: Option<PathBuf>,

    /// Override config file path (default: rh-migrate.yml if present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Report what would change without modifying the store
    #[arg(long)]
    pub dry_run: bool,

    /// Back the store up to its backup path before changing it
    #[arg(long)]
    pub backup: bool,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,
}

#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;
