//! Online backup of the store before it is mutated.

use crate::connection::Store;
use crate::error::{StoreError, StoreResult};
use rusqlite::backup::Backup;
use rusqlite::Connection;
use std::path::Path;
use std::time::Duration;
use tempfile::NamedTempFile;

/// Copy the store into a new database file at `backup_path`.
///
/// Uses SQLite's online backup API so the copy is consistent even if the
/// store has a journal or WAL alongside it. The copy is written to a
/// temporary file next to `backup_path` and only renamed into place once
/// it is complete, so a failed backup leaves nothing behind. An existing
/// file at `backup_path` is never overwritten: it may be the operator's
/// only good copy.
pub fn create_backup(store: &Store, backup_path: &Path) -> StoreResult<()> {
    if backup_path.exists() {
        return Err(already_exists(backup_path));
    }

    let dir = match backup_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let partial = tempfile::Builder::new()
        .prefix(".rh-backup-")
        .suffix(".partial")
        .tempfile_in(dir)
        .map_err(|e| StoreError::BackupError(format!("create {}: {e}", dir.display())))?;

    copy_into(store, &partial)?;

    partial.persist_noclobber(backup_path).map_err(|e| {
        if e.error.kind() == std::io::ErrorKind::AlreadyExists {
            already_exists(backup_path)
        } else {
            StoreError::BackupError(format!("move into place: {}", e.error))
        }
    })?;

    log::info!("Backed up store to {}", backup_path.display());
    Ok(())
}

/// Run the online backup into `partial`. Dropping `partial` on error removes it.
fn copy_into(store: &Store, partial: &NamedTempFile) -> StoreResult<()> {
    let mut dst = Connection::open(partial.path())
        .map_err(|e| StoreError::BackupError(format!("open backup dest: {e}")))?;

    {
        let backup = Backup::new(store.conn(), &mut dst)
            .map_err(|e| StoreError::BackupError(format!("init backup: {e}")))?;
        backup
            .run_to_completion(100, Duration::from_millis(10), None)
            .map_err(|e| StoreError::BackupError(format!("run backup: {e}")))?;
    }

    dst.close()
        .map_err(|(_, e)| StoreError::BackupError(format!("close backup dest: {e}")))
}

fn already_exists(backup_path: &Path) -> StoreError {
    StoreError::BackupError(format!(
        "{} already exists; move it aside or choose another backup path",
        backup_path.display()
    ))
}
