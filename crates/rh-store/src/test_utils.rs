//! Shared test utilities for rh-store

use crate::Store;
use rusqlite::Connection;

/// Meal-plan tables as the application creates them, before `MealType`.
pub(crate) const MEAL_PLAN_SCHEMA: &str = "
    CREATE TABLE MealPlans (
        Id INTEGER PRIMARY KEY AUTOINCREMENT,
        Name TEXT NOT NULL,
        CreatedAt TEXT NOT NULL,
        StartDate TEXT NOT NULL,
        EndDate TEXT NOT NULL,
        IsActive INTEGER NOT NULL,
        DietaryPreference TEXT
    );
    CREATE TABLE MealPlanDays (
        Id INTEGER PRIMARY KEY AUTOINCREMENT,
        MealPlanId INTEGER NOT NULL REFERENCES MealPlans (Id),
        DayOfWeek INTEGER NOT NULL,
        Date TEXT NOT NULL,
        RecipeId INTEGER NOT NULL
    );
";

/// One meal plan with three planned days.
pub(crate) const MEAL_PLAN_ROWS: &str = "
    INSERT INTO MealPlans (Name, CreatedAt, StartDate, EndDate, IsActive, DietaryPreference)
    VALUES ('Weekly Meal Plan', '2024-01-01', '2024-01-01', '2024-01-07', 1, 'Healthy');
    INSERT INTO MealPlanDays (MealPlanId, DayOfWeek, Date, RecipeId) VALUES
        (1, 1, '2024-01-01', 10),
        (1, 2, '2024-01-02', 11),
        (1, 3, '2024-01-03', 12);
";

/// Create the meal-plan tables and seed rows on `conn`.
pub(crate) fn seed_meal_plans(conn: &Connection) {
    conn.execute_batch(MEAL_PLAN_SCHEMA).unwrap();
    conn.execute_batch(MEAL_PLAN_ROWS).unwrap();
}

/// In-memory store with one plan and three unmigrated days.
pub(crate) fn meal_plan_store() -> Store {
    let store = Store::open_memory().unwrap();
    seed_meal_plans(store.conn());
    store
}

/// Query a single i64 value (convenience for COUNT(*) assertions).
pub(crate) fn scalar(store: &Store, sql: &str) -> i64 {
    store
        .conn()
        .query_row(sql, [], |row| row.get::<_, i64>(0))
        .unwrap()
}

/// All MealPlanDays rows except any MealType column, ordered by Id.
pub(crate) fn day_rows(store: &Store) -> Vec<(i64, i64, i64, String, i64)> {
    let mut stmt = store
        .conn()
        .prepare("SELECT Id, MealPlanId, DayOfWeek, Date, RecipeId FROM MealPlanDays ORDER BY Id")
        .unwrap();
    stmt.query_map([], |row| {
        Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?, row.get(4)?))
    })
    .unwrap()
    .collect::<Result<Vec<_>, _>>()
    .unwrap()
}
