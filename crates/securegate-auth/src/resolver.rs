//! Identity resolver — the authorization gate in front of every realtime
//! connection.

use async_trait::async_trait;

use securegate_core::error::AppError;
use securegate_core::types::id::UserId;
use securegate_entity::user::UserRole;

/// A verified identity and the role it holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedIdentity {
    /// Stable user identity.
    pub user_id: UserId,
    /// Role granted by the identity provider.
    pub role: UserRole,
}

/// Resolves an opaque credential to an [`AuthenticatedIdentity`].
///
/// Called once per connection handshake. The role returned here is trusted
/// for the lifetime of the connection.
#[async_trait]
pub trait IdentityResolver: Send + Sync + std::fmt::Debug + 'static {
    /// Verify `credential`, failing with an authentication error when it is
    /// missing, malformed, or expired.
    async fn authenticate(&self, credential: &str) -> Result<AuthenticatedIdentity, AppError>;
}
