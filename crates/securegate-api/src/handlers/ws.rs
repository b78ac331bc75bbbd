//! WebSocket upgrade handler.

use axum::extract::ws::rejection::WebSocketUpgradeRejection;
use axum::extract::ws::{Message, WebSocket};
use axum::extract::{Path, Query, State, WebSocketUpgrade};
use axum::response::{IntoResponse, Response};
use futures::{SinkExt, StreamExt, future};
use serde::Deserialize;
use tracing::warn;

use securegate_auth::AuthenticatedIdentity;
use securegate_core::types::id::UserId;
use securegate_realtime::{ConnectHints, Frame, RealtimeEngine, run_session};

use crate::error::ApiError;
use crate::state::AppState;

/// Query parameters accepted on the upgrade request.
#[derive(Debug, Default, Deserialize)]
pub struct WsQuery {
    /// Access token.
    pub token: Option<String>,
    /// Client's claimed role; advisory only.
    pub user_role: Option<String>,
}

/// GET /ws/connect/{user_id}?token={jwt}&user_role={hint} — WebSocket upgrade
///
/// The credential is verified before the upgrade, so a rejected handshake
/// is answered with a plain 401/403 and never opens a socket.
pub async fn ws_connect(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Query(query): Query<WsQuery>,
    ws: Result<WebSocketUpgrade, WebSocketUpgradeRejection>,
) -> Result<Response, ApiError> {
    let hints = ConnectHints {
        user_id: UserId::new(user_id),
        user_role: query.user_role,
    };

    let identity = state
        .authenticator
        .authenticate(query.token.as_deref(), &hints)
        .await
        .inspect_err(|e| {
            warn!(
                claimed = %hints.user_id,
                kind = %e.kind,
                "WebSocket handshake rejected: {}",
                e.message
            );
        })?;

    let ws = match ws {
        Ok(ws) => ws,
        Err(rejection) => return Ok(rejection.into_response()),
    };

    let realtime = state.realtime.clone();
    Ok(ws.on_upgrade(move |socket| handle_socket(realtime, identity, socket)))
}

/// Runs the session loop over an upgraded socket.
async fn handle_socket(
    realtime: std::sync::Arc<RealtimeEngine>,
    identity: AuthenticatedIdentity,
    socket: WebSocket,
) {
    let (sink, stream) = socket.split();

    let inbound = stream.map(|result| result.map(into_frame));
    let outbound = sink.with(|text: String| {
        future::ready(Ok::<_, axum::Error>(Message::Text(text.into())))
    });

    run_session(
        realtime.connections.clone(),
        identity,
        inbound,
        outbound,
        realtime.shutdown_receiver(),
    )
    .await;
}

fn into_frame(msg: Message) -> Frame {
    match msg {
        Message::Text(text) => Frame::Text(text.as_str().to_owned()),
        Message::Close(_) => Frame::Close,
        _ => Frame::Other,
    }
}
