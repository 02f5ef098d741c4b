//! Field-shape checks for create requests
//!
//! Pure functions over a single input value. No cross-record checks happen here;
//! referential integrity is left to the store.

use chrono::NaiveDate;

use crate::{Error, Result};

/// Calendar-date format accepted for class record dates
pub const DATE_FORMAT: &str = "%Y-%m-%d";

pub fn require_text(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::invalid(field, "must not be empty"));
    }
    Ok(())
}

pub fn require_finite(field: &str, value: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(Error::invalid(field, "must be a finite number"));
    }
    Ok(())
}

pub fn require_non_negative(field: &str, value: f64) -> Result<()> {
    require_finite(field, value)?;
    if value < 0.0 {
        return Err(Error::invalid(field, format!("must be >= 0 (got {})", value)));
    }
    Ok(())
}

pub fn require_id(field: &str, value: i64) -> Result<()> {
    if value < 1 {
        return Err(Error::invalid(field, format!("must be a positive id (got {})", value)));
    }
    Ok(())
}

/// The date is only shape-checked; the original token is what gets stored.
pub fn require_date(field: &str, value: &str) -> Result<()> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT)
        .map(|_| ())
        .map_err(|e| Error::invalid(field, format!("expected YYYY-MM-DD: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_text() {
        assert!(require_text("name", "Alice").is_ok());
        assert!(require_text("name", "").is_err());
        assert!(require_text("name", "\t ").is_err());
    }

    #[test]
    fn test_require_non_negative() {
        assert!(require_non_negative("rate", 0.0).is_ok());
        assert!(require_non_negative("rate", 12.5).is_ok());
        assert!(require_non_negative("rate", -0.01).is_err());
        assert!(require_non_negative("rate", f64::NAN).is_err());
    }

    #[test]
    fn test_require_date() {
        assert!(require_date("date", "2024-07-01").is_ok());
        assert!(require_date("date", "2024-13-01").is_err());
        assert!(require_date("date", "yesterday").is_err());
    }

    #[test]
    fn test_error_names_field() {
        let err = require_id("teacher_id", 0).unwrap_err();
        assert!(err.to_string().contains("teacher_id"));
    }
}
