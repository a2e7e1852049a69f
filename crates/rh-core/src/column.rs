//! Additive column specifications.
//!
//! A [`ColumnSpec`] describes one column to be added with `ALTER TABLE ..
//! ADD COLUMN`. SQLite only accepts `NOT NULL` on an added column when a
//! non-null default is supplied, so [`ColumnSpec::validate`] enforces that
//! pairing before any statement reaches the store.

use crate::error::{CoreError, CoreResult};
use crate::sql_utils::{escape_sql_string, quote_ident, validate_identifier};
use serde::{Deserialize, Serialize};
use std::fmt;

/// SQLite column type affinity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum SqlType {
    #[default]
    Integer,
    Real,
    Text,
    Blob,
    Numeric,
}

impl SqlType {
    pub fn as_sql(self) -> &'static str {
        match self {
            SqlType::Integer => "INTEGER",
            SqlType::Real => "REAL",
            SqlType::Text => "TEXT",
            SqlType::Blob => "BLOB",
            SqlType::Numeric => "NUMERIC",
        }
    }
}

impl fmt::Display for SqlType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_sql())
    }
}

/// Constant default applied to existing rows when the column is added.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColumnDefault {
    Integer(i64),
    Real(f64),
    Text(String),
}

impl ColumnDefault {
    /// Render the default as a SQL literal.
    pub fn to_sql_literal(&self) -> String {
        match self {
            ColumnDefault::Integer(v) => v.to_string(),
            ColumnDefault::Real(v) => format!("{v:?}"),
            ColumnDefault::Text(s) => format!("'{}'", escape_sql_string(s)),
        }
    }
}

impl fmt::Display for ColumnDefault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_sql_literal())
    }
}

impl From<i64> for ColumnDefault {
    fn from(v: i64) -> Self {
        ColumnDefault::Integer(v)
    }
}

fn default_not_null() -> bool {
    true
}

/// One column to add to an existing table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ColumnSpec {
    /// Column name
    pub name: String,

    /// Declared type
    #[serde(rename = "type", default)]
    pub sql_type: SqlType,

    /// Whether the column carries a `NOT NULL` constraint
    #[serde(default = "default_not_null")]
    pub not_null: bool,

    /// Constant default; required when `not_null` is set
    #[serde(default)]
    pub default: Option<ColumnDefault>,
}

impl ColumnSpec {
    /// Nullable column with no default.
    pub fn new(name: impl Into<String>, sql_type: SqlType) -> Self {
        Self {
            name: name.into(),
            sql_type,
            not_null: false,
            default: None,
        }
    }

    /// `NOT NULL` column whose existing rows receive `default`.
    pub fn not_null_with_default(
        name: impl Into<String>,
        sql_type: SqlType,
        default: impl Into<ColumnDefault>,
    ) -> Self {
        Self {
            name: name.into(),
            sql_type,
            not_null: true,
            default: Some(default.into()),
        }
    }

    /// Check the name and the NOT NULL / default pairing.
    pub fn validate(&self) -> CoreResult<()> {
        validate_identifier("column", &self.name)?;

        match &self.default {
            None if self.not_null => {
                return Err(CoreError::ConfigInvalid {
                    message: format!(
                        "column '{}' is NOT NULL but has no default; existing rows would violate the constraint",
                        self.name
                    ),
                });
            }
            Some(ColumnDefault::Real(v)) if !v.is_finite() => {
                return Err(CoreError::ConfigInvalid {
                    message: format!("column '{}' has a non-finite default: {v}", self.name),
                });
            }
            _ => {}
        }
        Ok(())
    }

    /// Column definition as used after `ADD COLUMN`, e.g.
    /// `"MealType" INTEGER NOT NULL DEFAULT 2`.
    pub fn definition_sql(&self) -> String {
        let mut sql = format!("{} {}", quote_ident(&self.name), self.sql_type);
        if self.not_null {
            sql.push_str(" NOT NULL");
        }
        if let Some(default) = &self.default {
            sql.push_str(" DEFAULT ");
            sql.push_str(&default.to_sql_literal());
        }
        sql
    }
}

#[cfg(test)]
#[path = "column_test.rs"]
mod tests;
