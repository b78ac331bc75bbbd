//! Health check handler.

use axum::Json;
use axum::extract::State;
use serde::{Deserialize, Serialize};

use securegate_realtime::metrics::MetricsSnapshot;

use crate::state::AppState;

/// Health response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always `"ok"` while the process is serving.
    pub status: String,
    /// Crate version.
    pub version: String,
    /// Live WebSocket connections.
    pub ws_connections: usize,
    /// Distinct connected users.
    pub online_users: usize,
    /// Connected administrator sessions.
    pub admin_connections: usize,
    /// Realtime counters.
    pub metrics: MetricsSnapshot,
}

/// GET /health
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let realtime = &state.realtime;

    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        ws_connections: realtime.connection_count(),
        online_users: realtime.user_count(),
        admin_connections: realtime.admin_count(),
        metrics: realtime.metrics_snapshot(),
    })
}
