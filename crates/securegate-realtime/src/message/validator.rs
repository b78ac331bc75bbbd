//! Inbound frame validation.

use securegate_core::error::AppError;

/// Rejects blank frames and frames larger than `max_bytes`.
pub fn validate_inbound(raw: &str, max_bytes: usize) -> Result<(), AppError> {
    if raw.len() > max_bytes {
        return Err(AppError::validation(format!(
            "Message exceeds maximum size of {max_bytes} bytes"
        )));
    }

    if raw.trim().is_empty() {
        return Err(AppError::validation("Empty message"));
    }

    Ok(())
}
