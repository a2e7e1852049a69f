//! Meal categories stored in `MealPlanDays.MealType`.

use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Meal category of a single planned day entry.
///
/// Stored as a small integer; the discriminants are part of the persisted
/// format and must not be renumbered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MealType {
    Breakfast = 0,
    Lunch = 1,
    /// Assigned to every row that predates the column.
    #[default]
    Dinner = 2,
}

impl MealType {
    /// All meal types in discriminant order.
    pub const ALL: [MealType; 3] = [MealType::Breakfast, MealType::Lunch, MealType::Dinner];

    /// Integer value as stored in the database.
    pub fn as_i64(self) -> i64 {
        self as i64
    }

    /// Map a stored integer back to a meal type.
    pub fn from_i64(value: i64) -> CoreResult<Self> {
        Self::ALL
            .into_iter()
            .find(|m| m.as_i64() == value)
            .ok_or(CoreError::UnknownMealType(value))
    }

    pub fn as_str(self) -> &'static str {
        match self {
            MealType::Breakfast => "Breakfast",
            MealType::Lunch => "Lunch",
            MealType::Dinner => "Dinner",
        }
    }
}

impl fmt::Display for MealType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<i64> for MealType {
    type Error = CoreError;

    fn try_from(value: i64) -> CoreResult<Self> {
        Self::from_i64(value)
    }
}

#[cfg(test)]
#[path = "meal_type_test.rs"]
mod tests;
