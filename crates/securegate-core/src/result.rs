//! Convenience result type alias for SecureGate.

use crate::error::AppError;

/// A specialized `Result` type for SecureGate operations.
pub type AppResult<T> = Result<T, AppError>;
