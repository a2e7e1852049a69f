//! Tests for Store opening, transactions, and closing.

use crate::test_utils::{meal_plan_store, scalar, seed_meal_plans};
use crate::{Store, StoreError};
use rusqlite::Connection;

// ── Opening ────────────────────────────────────────────────────────────

#[test]
fn open_memory_succeeds() {
    let store = Store::open_memory().unwrap();
    assert!(store.path().is_none());
}

#[test]
fn open_missing_file_is_access_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("receipts.db");

    let result = Store::open(&path);

    assert!(matches!(result, Err(StoreError::AccessError(_))));
    assert!(!path.exists(), "open must not create the store file");
}

#[test]
fn open_existing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("receipts.db");
    seed_meal_plans(&Connection::open(&path).unwrap());

    let store = Store::open(&path).unwrap();

    assert_eq!(store.path(), Some(path.as_path()));
    assert_eq!(store.count_rows("MealPlanDays").unwrap(), 3);
    store.close().unwrap();
}

#[test]
fn open_non_database_file_fails_on_first_read() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("receipts.db");
    std::fs::write(&path, b"this is not a sqlite database, just some bytes...").unwrap();

    let store = Store::open(&path).unwrap();
    let result = store.inspect_columns("MealPlanDays");

    assert!(matches!(result, Err(StoreError::IntrospectionError(_))));
}

#[test]
fn open_takes_file_prefixed_paths_literally() {
    use rusqlite::OpenFlags;

    let flags = super::open_flags();

    assert!(!flags.contains(OpenFlags::SQLITE_OPEN_URI));
    assert!(!flags.contains(OpenFlags::SQLITE_OPEN_CREATE));
    assert!(flags.contains(OpenFlags::SQLITE_OPEN_READ_WRITE));
}

// ── Transactions ───────────────────────────────────────────────────────

#[test]
fn transaction_commits_on_ok() {
    let store = meal_plan_store();

    store
        .transaction(|conn| {
            conn.execute("DELETE FROM MealPlanDays WHERE Id = 1", [])?;
            Ok(())
        })
        .unwrap();

    assert_eq!(scalar(&store, "SELECT COUNT(*) FROM MealPlanDays"), 2);
}

#[test]
fn transaction_rolls_back_on_err() {
    let store = meal_plan_store();

    let result: Result<(), _> = store.transaction(|conn| {
        conn.execute("DELETE FROM MealPlanDays", [])?;
        Err(StoreError::MutationError("simulated failure".to_string()))
    });

    assert!(matches!(result, Err(StoreError::MutationError(_))));
    assert_eq!(scalar(&store, "SELECT COUNT(*) FROM MealPlanDays"), 3);
}

#[test]
fn transaction_leaves_connection_usable_after_rollback() {
    let store = meal_plan_store();

    let _ = store.transaction(|_| -> Result<(), StoreError> {
        Err(StoreError::MutationError("boom".to_string()))
    });

    store
        .transaction(|conn| {
            conn.execute("DELETE FROM MealPlanDays WHERE Id = 3", [])?;
            Ok(())
        })
        .unwrap();
    assert_eq!(scalar(&store, "SELECT COUNT(*) FROM MealPlanDays"), 2);
}

#[test]
fn close_in_memory_store() {
    let store = meal_plan_store();
    store.close().unwrap();
}
