//! Runtime context for the migrate command

use anyhow::{Context, Result};
use rh_core::Config;
use std::path::{Path, PathBuf};

use crate::cli::Cli;

/// Resolved configuration and paths for one invocation
pub struct RuntimeContext {
    /// Loaded configuration with CLI overrides applied
    pub config: Config,

    /// Absolute path of the store
    pub database_path: PathBuf,

    /// Absolute path of the backup used for recovery
    pub backup_path: PathBuf,

    /// Write a backup before changing the store
    pub backup: bool,

    /// Inspect and report only
    pub dry_run: bool,

    /// Emit the report as JSON
    pub json: bool,
}

impl RuntimeContext {
    /// Create a new runtime context relative to the working directory
    pub fn new(cli: &Cli) -> Result<Self> {
        let root = std::env::current_dir().context("Failed to read the working directory")?;
        Self::new_in(cli, &root)
    }

    /// Create a new runtime context relative to `root`
    pub fn new_in(cli: &Cli, root: &Path) -> Result<Self> {
        let mut config = match &cli.config {
            Some(path) => Config::load(&root.join(path)).context("Failed to load configuration file")?,
            None => Config::load_from_dir_or_default(root)
                .context("Failed to load configuration")?,
        };

        if let Some(database) = &cli.database {
            config.database = database.clone();
            config.validate().context("Invalid --database value")?;
        }

        Ok(Self::from_config(config, cli, root))
    }

    /// Context built from defaults and CLI flags only, used to print recovery
    /// guidance when the real configuration could not be loaded.
    pub fn fallback(cli: &Cli) -> Self {
        let root = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        let mut config = Config::default();
        if let Some(database) = &cli.database {
            config.database = database.clone();
        }
        Self::from_config(config, cli, &root)
    }

    fn from_config(config: Config, cli: &Cli, root: &Path) -> Self {
        let database_path = config.database_path(root);
        let backup_path = config.backup_path(root);
        log::debug!(
            "Store: {}, backup: {}",
            database_path.display(),
            backup_path.display()
        );
        Self {
            config,
            database_path,
            backup_path,
            backup: cli.backup,
            dry_run: cli.dry_run,
            json: cli.json,
        }
    }
}
