//! Application state shared across all handlers.

use std::sync::Arc;

use securegate_auth::IdentityResolver;
use securegate_core::config::AppConfig;
use securegate_realtime::{RealtimeEngine, WsAuthenticator};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// WebSocket realtime engine
    pub realtime: Arc<RealtimeEngine>,
    /// Handshake authenticator
    pub authenticator: WsAuthenticator,
}

impl AppState {
    /// Wire state from configuration, an engine and an identity resolver.
    pub fn new(
        config: Arc<AppConfig>,
        realtime: Arc<RealtimeEngine>,
        resolver: Arc<dyn IdentityResolver>,
    ) -> Self {
        Self {
            config,
            realtime,
            authenticator: WsAuthenticator::new(resolver),
        }
    }
}
