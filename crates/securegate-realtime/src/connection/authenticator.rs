//! WebSocket authentication — resolves the credential presented at handshake
//! and checks it against the identity the client claims.

use std::sync::Arc;

use securegate_auth::{AuthenticatedIdentity, IdentityResolver};
use securegate_core::error::AppError;
use securegate_core::types::id::UserId;
use securegate_entity::user::UserRole;

/// Client-supplied, untrusted identity hints sent alongside the credential.
#[derive(Debug, Clone)]
pub struct ConnectHints {
    /// Identity the client says it is (from the URL path).
    pub user_id: UserId,
    /// Role the client says it has, if any.
    pub user_role: Option<String>,
}

/// Authenticates WebSocket handshakes through an [`IdentityResolver`].
#[derive(Debug, Clone)]
pub struct WsAuthenticator {
    resolver: Arc<dyn IdentityResolver>,
}

impl WsAuthenticator {
    /// Creates a new WebSocket authenticator.
    pub fn new(resolver: Arc<dyn IdentityResolver>) -> Self {
        Self { resolver }
    }

    /// Verifies `credential` and reconciles it with the client hints.
    ///
    /// A missing or invalid credential is an authentication error. A claimed
    /// identity that differs from the resolved one is an authorization error.
    /// The role always comes from the resolver; a disagreeing hint is logged
    /// and ignored.
    pub async fn authenticate(
        &self,
        credential: Option<&str>,
        hints: &ConnectHints,
    ) -> Result<AuthenticatedIdentity, AppError> {
        let credential = credential
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .ok_or_else(|| AppError::authentication("Missing credential"))?;

        let identity = self.resolver.authenticate(credential).await?;

        if identity.user_id != hints.user_id {
            tracing::warn!(
                claimed = %hints.user_id,
                user_id = %identity.user_id,
                "WebSocket handshake identity mismatch"
            );
            return Err(AppError::authorization(
                "Credential does not belong to the requested user",
            ));
        }

        if let Some(hint) = hints.user_role.as_deref() {
            let matches = hint
                .parse::<UserRole>()
                .is_ok_and(|claimed| claimed == identity.role);
            if !matches {
                tracing::warn!(
                    user_id = %identity.user_id,
                    role = %identity.role,
                    hint = hint,
                    "Ignoring client role hint that disagrees with credential"
                );
            }
        }

        Ok(identity)
    }
}
