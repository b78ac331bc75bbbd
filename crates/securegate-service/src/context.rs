//! Request context carrying the authenticated caller.

use serde::{Deserialize, Serialize};

use securegate_core::error::AppError;
use securegate_core::types::id::UserId;
use securegate_entity::user::UserRole;

/// Context for the current authenticated request.
///
/// Passed into service methods so that every operation knows *who* is
/// acting and with which role.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// The authenticated user's identity.
    pub user_id: UserId,
    /// The user's role as resolved from the credential.
    pub role: UserRole,
}

impl RequestContext {
    /// Creates a new request context.
    pub fn new(user_id: impl Into<UserId>, role: UserRole) -> Self {
        Self {
            user_id: user_id.into(),
            role,
        }
    }

    /// Fails with an authorization error unless the caller is an admin.
    pub fn require_admin(&self) -> Result<(), AppError> {
        if self.role.is_admin() {
            Ok(())
        } else {
            Err(AppError::authorization("Admin access required"))
        }
    }
}
