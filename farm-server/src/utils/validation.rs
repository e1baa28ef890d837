//! Input validation helpers
//!
//! Centralized text length constants and validation functions.
//! Limits are chosen based on:
//! - Reasonable UX limits for names, descriptions, addresses
//! - The document store has no built-in length enforcement

use crate::utils::AppError;

// ── Text length limits ──────────────────────────────────────────────

/// Entity names: user, product
pub const MAX_NAME_LEN: usize = 200;

/// Product descriptions
pub const MAX_DESCRIPTION_LEN: usize = 2000;

/// Rating comments
pub const MAX_COMMENT_LEN: usize = 500;

/// Short identifiers: category, payment method, pincode, etc.
pub const MAX_SHORT_TEXT_LEN: usize = 100;

/// Email addresses (RFC 5321)
pub const MAX_EMAIL_LEN: usize = 254;

/// Passwords (before hashing)
pub const MAX_PASSWORD_LEN: usize = 128;

/// URLs / image paths
pub const MAX_URL_LEN: usize = 2048;

/// Addresses
pub const MAX_ADDRESS_LEN: usize = 500;

// ── Rating limits ───────────────────────────────────────────────────

pub const MIN_RATING: f64 = 1.0;
pub const MAX_RATING: f64 = 5.0;

// ── Validation helpers ──────────────────────────────────────────────

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{field} must not be empty")));
    }
    if value.len() > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            value.len()
        )));
    }
    Ok(())
}

/// Validate that a string (possibly empty) is within the length limit.
pub fn validate_text_len(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.len() > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            value.len()
        )));
    }
    Ok(())
}

/// Validate that an optional string, if present, is within the length limit.
pub fn validate_optional_text(
    value: &Option<String>,
    field: &str,
    max_len: usize,
) -> Result<(), AppError> {
    if let Some(v) = value
        && v.len() > max_len
    {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            v.len()
        )));
    }
    Ok(())
}

/// Validate that a price is a finite, non-negative number.
pub fn validate_price(value: f64, field: &str) -> Result<(), AppError> {
    if !value.is_finite() || value < 0.0 {
        return Err(AppError::validation(format!(
            "{field} must be a non-negative number"
        )));
    }
    Ok(())
}

/// Validate a rating value (1..=5).
pub fn validate_rating_value(value: f64) -> Result<(), AppError> {
    if !value.is_finite() || !(MIN_RATING..=MAX_RATING).contains(&value) {
        return Err(AppError::validation("Invalid rating"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_text_rejects_empty_and_oversized() {
        assert!(validate_required_text("Tomatoes", "name", MAX_NAME_LEN).is_ok());
        assert!(validate_required_text("   ", "name", MAX_NAME_LEN).is_err());
        let long = "x".repeat(MAX_NAME_LEN + 1);
        assert!(validate_required_text(&long, "name", MAX_NAME_LEN).is_err());
    }

    #[test]
    fn optional_text_allows_none() {
        assert!(validate_optional_text(&None, "comment", MAX_COMMENT_LEN).is_ok());
        assert!(
            validate_optional_text(&Some("fine".to_string()), "comment", MAX_COMMENT_LEN).is_ok()
        );
        let long = Some("x".repeat(MAX_COMMENT_LEN + 1));
        assert!(validate_optional_text(&long, "comment", MAX_COMMENT_LEN).is_err());
    }

    #[test]
    fn price_rejects_negative_and_nan() {
        assert!(validate_price(0.0, "price").is_ok());
        assert!(validate_price(49.5, "price").is_ok());
        assert!(validate_price(-1.0, "price").is_err());
        assert!(validate_price(f64::NAN, "price").is_err());
    }

    #[test]
    fn rating_bounds() {
        assert!(validate_rating_value(1.0).is_ok());
        assert!(validate_rating_value(5.0).is_ok());
        assert!(validate_rating_value(0.0).is_err());
        assert!(validate_rating_value(5.5).is_err());
        assert!(validate_rating_value(f64::NAN).is_err());
    }
}
