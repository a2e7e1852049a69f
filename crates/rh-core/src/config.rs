//! Configuration types and parsing for rh-migrate.yml

use crate::error::{CoreError, CoreResult};
use crate::plan::MigrationPlan;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Store file used when nothing else is configured.
pub const DEFAULT_DATABASE: &str = "receipts.db";

/// Suffix appended to the store path to form the default backup path.
pub const BACKUP_SUFFIX: &str = ".backup";

/// Config file names looked up in the working directory, in order.
pub const CONFIG_FILE_NAMES: [&str; 2] = ["rh-migrate.yml", "rh-migrate.yaml"];

/// Migrator configuration from rh-migrate.yml
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Path to the SQLite store
    #[serde(default = "default_database")]
    pub database: PathBuf,

    /// Backup copy referenced by the recovery instructions
    /// (defaults to `<database>.backup`)
    #[serde(default)]
    pub backup: Option<PathBuf>,

    /// The additive change to apply
    #[serde(default)]
    pub migration: MigrationPlan,
}

fn default_database() -> PathBuf {
    PathBuf::from(DEFAULT_DATABASE)
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: default_database(),
            backup: None,
            migration: MigrationPlan::default(),
        }
    }
}

impl Config {
    /// Load configuration from a file path
    pub fn load(path: &Path) -> CoreResult<Self> {
        if !path.exists() {
            return Err(CoreError::ConfigNotFound {
                path: path.display().to_string(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| CoreError::IoWithPath {
            path: path.display().to_string(),
            source: e,
        })?;
        let config: Config = serde_yaml::from_str(&content)?;
        config.validate()?;
        log::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Load configuration from a directory, falling back to the built-in
    /// defaults when neither rh-migrate.yml nor rh-migrate.yaml exists.
    pub fn load_from_dir_or_default(dir: &Path) -> CoreResult<Self> {
        for name in CONFIG_FILE_NAMES {
            let path = dir.join(name);
            if path.exists() {
                return Self::load(&path);
            }
        }
        log::debug!("No config file in {}, using defaults", dir.display());
        Ok(Self::default())
    }

    /// Validate the configuration
    pub fn validate(&self) -> CoreResult<()> {
        if is_blank(&self.database) {
            return Err(CoreError::ConfigInvalid {
                message: "database path cannot be empty".to_string(),
            });
        }
        if self.backup.as_deref().is_some_and(is_blank) {
            return Err(CoreError::ConfigInvalid {
                message: "backup path cannot be empty".to_string(),
            });
        }
        self.migration.validate()
    }

    /// Store path, resolved against `root` when relative
    pub fn database_path(&self, root: &Path) -> PathBuf {
        root.join(&self.database)
    }

    /// Backup path, resolved against `root` when relative
    pub fn backup_path(&self, root: &Path) -> PathBuf {
        match &self.backup {
            Some(backup) => root.join(backup),
            None => {
                let mut backup = self.database.clone().into_os_string();
                backup.push(BACKUP_SUFFIX);
                root.join(backup)
            }
        }
    }
}

/// Empty or whitespace-only path. Non-UTF-8 paths are never blank.
fn is_blank(path: &Path) -> bool {
    path.to_str().is_some_and(|s| s.trim().is_empty())
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
