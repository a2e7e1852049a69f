use super::*;
use crate::column::{ColumnDefault, SqlType};
use std::fs;
use tempfile::tempdir;

#[test]
fn test_parse_empty_config_uses_defaults() {
    let config: Config = serde_yaml::from_str("{}").unwrap();
    assert_eq!(config, Config::default());
    assert_eq!(config.database, Path::new("receipts.db"));
    assert!(config.backup.is_none());
}

#[test]
fn test_parse_full_config() {
    let yaml = r#"
database: data/app.db
backup: data/app.db.bak
migration:
  table: Entries
  column:
    name: Kind
    type: TEXT
    not_null: true
    default: "other"
  count_tables: [Entries]
"#;
    let config: Config = serde_yaml::from_str(yaml).unwrap();
    config.validate().unwrap();
    assert_eq!(config.database, Path::new("data/app.db"));
    assert_eq!(config.migration.table, "Entries");
    assert_eq!(config.migration.column.sql_type, SqlType::Text);
    assert_eq!(
        config.migration.column.default,
        Some(ColumnDefault::Text("other".to_string()))
    );
    assert_eq!(config.migration.count_tables, vec!["Entries"]);
}

#[test]
fn test_unknown_field_rejected() {
    let result: Result<Config, _> = serde_yaml::from_str("databse: receipts.db");
    assert!(result.is_err());
}

#[test]
fn test_backup_path_defaults_to_suffix() {
    let config = Config::default();
    let root = Path::new("/work");
    assert_eq!(config.database_path(root), root.join("receipts.db"));
    assert_eq!(config.backup_path(root), root.join("receipts.db.backup"));
}

#[test]
fn test_backup_path_explicit() {
    let config = Config {
        backup: Some(PathBuf::from("snapshots/receipts.db")),
        ..Config::default()
    };
    assert_eq!(
        config.backup_path(Path::new("/work")),
        Path::new("/work/snapshots/receipts.db")
    );
}

#[test]
fn test_load_missing_file() {
    let dir = tempdir().unwrap();
    let err = Config::load(&dir.path().join("nope.yml")).unwrap_err();
    assert!(matches!(err, CoreError::ConfigNotFound { .. }));
}

#[test]
fn test_load_invalid_yaml() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("rh-migrate.yml");
    fs::write(&path, "database: [unterminated").unwrap();
    let err = Config::load(&path).unwrap_err();
    assert!(err.to_string().contains("[C002]"));
}

#[test]
fn test_load_runs_validation() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("rh-migrate.yml");
    fs::write(
        &path,
        "migration:\n  column:\n    name: MealType\n    not_null: true\n",
    )
    .unwrap();
    let err = Config::load(&path).unwrap_err();
    assert!(matches!(err, CoreError::ConfigInvalid { .. }));
}

#[test]
fn test_load_from_dir_without_file_uses_defaults() {
    let dir = tempdir().unwrap();
    let config = Config::load_from_dir_or_default(dir.path()).unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn test_load_from_dir_prefers_yml() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("rh-migrate.yml"), "database: a.db\n").unwrap();
    fs::write(dir.path().join("rh-migrate.yaml"), "database: b.db\n").unwrap();
    let config = Config::load_from_dir_or_default(dir.path()).unwrap();
    assert_eq!(config.database, Path::new("a.db"));
}

#[test]
fn test_validate_rejects_empty_database() {
    let config = Config {
        database: PathBuf::from("  "),
        ..Config::default()
    };
    assert!(config.validate().is_err());
}
