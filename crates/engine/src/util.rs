//! Internal helpers for input validation.

use chrono::NaiveDate;

use crate::{EngineError, ResultEngine};

pub(crate) const DATE_FORMAT: &str = "%Y-%m-%d";

/// Trim `value` and reject it when nothing is left.
pub(crate) fn normalize_required_text(value: &str, label: &str) -> ResultEngine<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(EngineError::Validation(format!("{label} must not be empty")));
    }
    Ok(trimmed.to_string())
}

/// Accept only real calendar dates written as `YYYY-MM-DD`.
pub(crate) fn validate_date(value: &str) -> ResultEngine<String> {
    let trimmed = value.trim();
    let invalid =
        || EngineError::Validation(format!("invalid date '{trimmed}': expected YYYY-MM-DD"));
    let parsed = NaiveDate::parse_from_str(trimmed, DATE_FORMAT).map_err(|_| invalid())?;
    // chrono also accepts signs and unpadded fields, the store sorts dates as text.
    if parsed.format(DATE_FORMAT).to_string() != trimmed {
        return Err(invalid());
    }
    Ok(trimmed.to_string())
}
