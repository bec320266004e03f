//! Input validation shared by operations.

use crate::repo::failure::{CoreResult, Failure};
use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("valid email regex"));

/// Trims `value`, rejecting blank input with `message`.
pub(crate) fn required_text(value: &str, message: &str) -> CoreResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(Failure::validation(message));
    }
    Ok(trimmed.to_string())
}

/// Trims optional free text; blank collapses to `None`.
pub(crate) fn optional_text(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|trimmed| !trimmed.is_empty())
        .map(str::to_string)
}

pub(crate) fn optional_email(value: Option<&str>) -> CoreResult<Option<String>> {
    match optional_text(value) {
        Some(email) if !EMAIL_RE.is_match(&email) => {
            Err(Failure::validation("Invalid email address"))
        }
        other => Ok(other),
    }
}

pub(crate) fn tax_rate(value: f64) -> CoreResult<f64> {
    if !value.is_finite() || !(0.0..=100.0).contains(&value) {
        return Err(Failure::validation("Tax rate must be between 0 and 100"));
    }
    Ok(value)
}

/// Validates one line item and returns its trimmed description.
pub(crate) fn line_item(description: &str, quantity: f64, unit_price: f64) -> CoreResult<String> {
    let description = required_text(description, "Line item description cannot be empty")?;
    if !quantity.is_finite() || quantity <= 0.0 {
        return Err(Failure::validation(
            "Line item quantity must be greater than zero",
        ));
    }
    if !unit_price.is_finite() || unit_price < 0.0 {
        return Err(Failure::validation(
            "Line item unit price cannot be negative",
        ));
    }
    Ok(description)
}

#[cfg(test)]
mod tests {
    use super::{line_item, optional_email, optional_text, required_text, tax_rate};
    use crate::repo::failure::FailureKind;

    #[test]
    fn required_text_trims_and_rejects_blank() {
        assert_eq!(required_text("  Deck  ", "empty").unwrap(), "Deck");
        let err = required_text(" \t\n", "empty").unwrap_err();
        assert_eq!(err.kind, FailureKind::Validation);
        assert_eq!(err.message, "empty");
    }

    #[test]
    fn optional_text_collapses_blank_to_none() {
        assert_eq!(optional_text(Some("   ")), None);
        assert_eq!(optional_text(Some(" x ")), Some("x".to_string()));
        assert_eq!(optional_text(None), None);
    }

    #[test]
    fn email_must_look_like_an_address() {
        assert!(optional_email(Some("a@b.co")).is_ok());
        assert!(optional_email(Some("")).unwrap().is_none());
        assert_eq!(
            optional_email(Some("nope")).unwrap_err().message,
            "Invalid email address"
        );
    }

    #[test]
    fn tax_rate_and_line_item_bounds() {
        assert!(tax_rate(0.0).is_ok());
        assert!(tax_rate(100.0).is_ok());
        assert!(tax_rate(-1.0).is_err());
        assert!(tax_rate(f64::NAN).is_err());

        assert!(line_item("Paint", 1.0, 0.0).is_ok());
        assert!(line_item("Paint", 0.0, 1.0).is_err());
        assert!(line_item("Paint", 1.0, -0.5).is_err());
        assert!(line_item(" ", 1.0, 1.0).is_err());
    }
}
