use crate::{EngineError, ResultEngine};

/// Parses an amount typed by the user.
///
/// Accepts `.` or `,` as decimal separator and surrounding whitespace. Amounts
/// are kept at the precision given.
///
/// Validation rules:
/// - rejects empty/invalid strings
/// - rejects zero, negative and non-finite values
///
/// # Examples
///
/// ```rust
/// use engine::parse_amount;
///
/// assert_eq!(parse_amount("10").unwrap(), 10.0);
/// assert_eq!(parse_amount("10,5").unwrap(), 10.5);
/// assert!(parse_amount("-3").is_err());
/// ```
pub fn parse_amount(s: &str) -> ResultEngine<f64> {
    let empty = || EngineError::Validation("empty amount".to_string());
    let invalid = || EngineError::Validation("invalid amount".to_string());

    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Err(empty());
    }

    let normalized = trimmed.replace(',', ".");
    let digits = normalized.strip_prefix('+').unwrap_or(&normalized);
    if digits.is_empty()
        || digits.matches('.').count() > 1
        || !digits.chars().all(|c| c.is_ascii_digit() || c == '.')
        || !digits.chars().any(|c| c.is_ascii_digit())
    {
        return Err(if digits.starts_with('-') {
            non_positive()
        } else {
            invalid()
        });
    }

    let value: f64 = digits.parse().map_err(|_| invalid())?;
    check_amount(value)?;
    Ok(value)
}

/// Ensures an amount is a finite value strictly greater than zero.
pub(crate) fn check_amount(value: f64) -> ResultEngine<()> {
    if !value.is_finite() {
        return Err(EngineError::Validation("invalid amount".to_string()));
    }
    if value <= 0.0 {
        return Err(non_positive());
    }
    Ok(())
}

fn non_positive() -> EngineError {
    EngineError::Validation("amount must be greater than zero".to_string())
}
