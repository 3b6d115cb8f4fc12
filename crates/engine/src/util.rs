//! Internal helpers for model validation and conversion.
//!
//! These utilities are **not** part of the public API. They centralize
//! validation and mapping logic so the engine enforces consistent invariants.

use std::str::FromStr;

use api_types::UnknownVariant;
use chrono::{Datelike, NaiveDate, Utc};
use uuid::Uuid;

use crate::{EngineError, ResultEngine};

/// Fresh identifier for a new row.
pub(crate) fn new_id() -> String {
    Uuid::new_v4().to_string()
}

/// Current calendar date in UTC.
pub(crate) fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// Parse an enum stored as text into its typed form.
pub(crate) fn parse_stored<T>(value: &str) -> ResultEngine<T>
where
    T: FromStr<Err = UnknownVariant>,
{
    value
        .parse::<T>()
        .map_err(|err| EngineError::InvalidInput(err.to_string()))
}

/// Trim a required name and reject it when empty.
pub(crate) fn normalize_required_name(value: &str, label: &str) -> ResultEngine<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(EngineError::InvalidName(format!(
            "{label} name must not be empty"
        )));
    }
    Ok(trimmed.to_string())
}

/// Trim optional free text, mapping blank values to `None`.
pub(crate) fn normalize_optional_text(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
}

pub(crate) fn ensure_positive(amount: i64, label: &str) -> ResultEngine<()> {
    if amount <= 0 {
        return Err(EngineError::InvalidAmount(format!(
            "{label} must be > 0"
        )));
    }
    Ok(())
}

pub(crate) fn ensure_non_negative(amount: i64, label: &str) -> ResultEngine<()> {
    if amount < 0 {
        return Err(EngineError::InvalidAmount(format!(
            "{label} must be >= 0"
        )));
    }
    Ok(())
}

pub(crate) fn ensure_month(month: u32) -> ResultEngine<()> {
    if !(1..=12).contains(&month) {
        return Err(EngineError::InvalidInput(format!(
            "month must be between 1 and 12, got {month}"
        )));
    }
    Ok(())
}

/// First day of the month and first day of the following month.
pub(crate) fn month_bounds(month: u32, year: i32) -> ResultEngine<(NaiveDate, NaiveDate)> {
    ensure_month(month)?;
    let start = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| EngineError::InvalidInput(format!("invalid period {year}-{month}")))?;
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    let end = NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .ok_or_else(|| EngineError::InvalidInput(format!("invalid period {year}-{month}")))?;
    Ok((start, end))
}

/// Resolve an optional period, defaulting each missing part to today.
pub(crate) fn resolve_period(month: Option<u32>, year: Option<i32>) -> ResultEngine<(u32, i32)> {
    let now = today();
    let month = month.unwrap_or_else(|| now.month());
    let year = year.unwrap_or_else(|| now.year());
    ensure_month(month)?;
    Ok((month, year))
}
