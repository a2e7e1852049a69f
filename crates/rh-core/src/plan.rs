//! The additive migration to apply, and its built-in defaults.

use crate::column::{ColumnSpec, SqlType};
use crate::error::CoreResult;
use crate::meal_type::MealType;
use crate::sql_utils::validate_identifier;
use serde::{Deserialize, Serialize};

/// Meal-plan header table; only counted.
pub const MEAL_PLANS_TABLE: &str = "MealPlans";

/// Per-day meal entries; receives the new column.
pub const MEAL_PLAN_DAYS_TABLE: &str = "MealPlanDays";

/// Column added to [`MEAL_PLAN_DAYS_TABLE`].
pub const MEAL_TYPE_COLUMN: &str = "MealType";

/// Declared type of [`MEAL_TYPE_COLUMN`].
pub const MEAL_TYPE_SQL_TYPE: SqlType = SqlType::Integer;

/// Value given to every pre-existing row.
pub const DEFAULT_MEAL_TYPE: MealType = MealType::Dinner;

/// Target table, column, and the tables whose row counts are reported.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MigrationPlan {
    /// Table that receives the column
    #[serde(default = "default_table")]
    pub table: String,

    /// Column to add
    #[serde(default = "default_column")]
    pub column: ColumnSpec,

    /// Tables counted after the migration as evidence no rows were lost
    #[serde(default = "default_count_tables")]
    pub count_tables: Vec<String>,
}

fn default_table() -> String {
    MEAL_PLAN_DAYS_TABLE.to_string()
}

fn default_column() -> ColumnSpec {
    ColumnSpec::not_null_with_default(
        MEAL_TYPE_COLUMN,
        MEAL_TYPE_SQL_TYPE,
        DEFAULT_MEAL_TYPE.as_i64(),
    )
}

fn default_count_tables() -> Vec<String> {
    vec![MEAL_PLANS_TABLE.to_string(), MEAL_PLAN_DAYS_TABLE.to_string()]
}

impl Default for MigrationPlan {
    fn default() -> Self {
        Self {
            table: default_table(),
            column: default_column(),
            count_tables: default_count_tables(),
        }
    }
}

impl MigrationPlan {
    /// Build a plan for an arbitrary table and column.
    pub fn new(table: impl Into<String>, column: ColumnSpec, count_tables: Vec<String>) -> Self {
        Self {
            table: table.into(),
            column,
            count_tables,
        }
    }

    /// Check every identifier and the column specification.
    pub fn validate(&self) -> CoreResult<()> {
        validate_identifier("table", &self.table)?;
        self.column.validate()?;
        for table in &self.count_tables {
            validate_identifier("table", table)?;
        }
        Ok(())
    }
}
