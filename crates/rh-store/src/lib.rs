//! SQLite store access for the ReceiptHealth migrator.
//!
//! Provides a scoped [`Store`] handle over the application's `receipts.db`,
//! catalog introspection, a transactional additive column change, row counts,
//! and the idempotent [`migrate`] entry point that ties them together.

pub mod backup;
pub mod connection;
pub mod error;
pub mod migrator;
pub mod query;
pub mod schema;

pub use connection::Store;
pub use error::{StoreError, StoreResult};
pub use migrator::{migrate, MigrateOptions, MigrationReport, MigrationStatus, TableCount};

#[cfg(test)]
pub(crate) mod test_utils;
