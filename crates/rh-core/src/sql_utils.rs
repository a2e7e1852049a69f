//! SQL identifier quoting and validation utilities
//!
//! Table and column names are interpolated into PRAGMA and DDL statements,
//! which cannot take bound parameters, so every name goes through
//! [`validate_identifier`] and [`quote_ident`] first.

use crate::error::{CoreError, CoreResult};

/// Quote a SQL identifier.
///
/// Wraps the identifier in double quotes and escapes any embedded double quotes
/// by doubling them, following the SQL standard.
///
/// # Examples
/// ```
/// use rh_core::sql_utils::quote_ident;
/// assert_eq!(quote_ident("MealPlanDays"), r#""MealPlanDays""#);
/// assert_eq!(quote_ident(r#"my"table"#), r#""my""table""#);
/// ```
pub fn quote_ident(ident: &str) -> String {
    format!("\"{}\"", ident.replace('"', "\"\""))
}

/// Escape a SQL string literal value by doubling single quotes.
///
/// This is for use inside single-quoted SQL string literals, not identifiers.
pub fn escape_sql_string(value: &str) -> String {
    value.replace('\'', "''")
}

/// Return `true` if `name` is a plain identifier: ASCII letters, digits and
/// underscores, not starting with a digit.
pub fn is_valid_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Reject anything [`is_valid_identifier`] does not accept.
///
/// `kind` names the identifier in the error message ("table", "column").
pub fn validate_identifier(kind: &str, name: &str) -> CoreResult<()> {
    if is_valid_identifier(name) {
        Ok(())
    } else {
        Err(CoreError::ConfigInvalid {
            message: format!(
                "invalid {kind} name '{name}': must contain only ASCII letters, digits, and underscores and not start with a digit"
            ),
        })
    }
}
