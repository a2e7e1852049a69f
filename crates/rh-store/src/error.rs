//! Error types for the store.

use thiserror::Error;

/// Store and migration errors.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The store file is missing, locked, or not accessible (S001).
    #[error("[S001] Cannot open store: {0}")]
    AccessError(String),

    /// The catalog could not be read (S002).
    #[error("[S002] Schema introspection failed: {0}")]
    IntrospectionError(String),

    /// The inspected table has no catalog entry (S003).
    #[error("[S003] Table not found: {0}")]
    TableNotFound(String),

    /// The schema change failed and was rolled back (S004).
    #[error("[S004] Schema change failed, no changes were applied: {0}")]
    MutationError(String),

    /// Transaction management error (S005).
    #[error("[S005] Transaction failed: {0}")]
    TransactionError(String),

    /// Row counts could not be confirmed after the migration step (S006).
    #[error("[S006] Verification failed{}: {message}", committed_suffix(.schema_changed))]
    VerificationError {
        /// Whether the column had already been committed when verification failed
        schema_changed: bool,
        message: String,
    },

    /// A table or column specification was rejected before use (S007).
    #[error("[S007] Invalid migration target: {0}")]
    InvalidTarget(#[from] rh_core::CoreError),

    /// Copying the store to its backup path failed (S008).
    #[error("[S008] Backup failed: {0}")]
    BackupError(String),

    /// SQLite driver error with preserved source chain (S009).
    #[error("[S009] SQLite error")]
    Sqlite(#[source] rusqlite::Error),

    /// A read query failed (S010).
    #[error("[S010] Store query failed: {0}")]
    QueryError(String),
}

impl StoreError {
    /// Whether the store was modified before this error occurred.
    pub fn schema_changed(&self) -> bool {
        matches!(
            self,
            StoreError::VerificationError {
                schema_changed: true,
                ..
            }
        )
    }
}

fn committed_suffix(schema_changed: &bool) -> &'static str {
    if *schema_changed {
        " after the schema change was committed"
    } else {
        ""
    }
}

/// Result type alias for [`StoreError`].
pub type StoreResult<T> = Result<T, StoreError>;

impl From<rusqlite::Error> for StoreError {
    fn from(err: rusqlite::Error) -> Self {
        StoreError::Sqlite(err)
    }
}
