//! Input validation helpers
//!
//! Used by the repositories before writing vendor configuration.
//! SQLite TEXT has no built-in length enforcement.

use shared::error::{AppError, ErrorCode};

// ── Text length limits ──────────────────────────────────────────────

/// Zone names
pub const MAX_NAME_LEN: usize = 200;

/// Restriction messages shown to customers
pub const MAX_NOTE_LEN: usize = 500;

/// Zone values and delivery time labels
pub const MAX_SHORT_TEXT_LEN: usize = 100;

/// Maximum delivery fee accepted from configuration
pub const MAX_DELIVERY_FEE: f64 = 100_000.0;

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

/// Delivery fee must be finite, non-negative and below [`MAX_DELIVERY_FEE`].
pub fn validate_delivery_fee(fee: f64) -> Result<(), AppError> {
    if !fee.is_finite() || fee < 0.0 || fee > MAX_DELIVERY_FEE {
        return Err(
            AppError::new(ErrorCode::ZoneFeeInvalid).with_detail("delivery_fee", fee.to_string())
        );
    }
    Ok(())
}
