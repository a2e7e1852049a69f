//! rh-core - Core library for the ReceiptHealth store migrator
//!
//! This crate provides the meal-type domain enum, additive column
//! specifications, SQL identifier helpers, and configuration loading shared
//! by the store and CLI crates.

pub mod column;
pub mod config;
pub mod error;
pub mod meal_type;
pub mod plan;
pub mod sql_utils;

pub use column::{ColumnDefault, ColumnSpec, SqlType};
pub use config::Config;
pub use error::{CoreError, CoreResult};
pub use meal_type::MealType;
pub use plan::MigrationPlan;
