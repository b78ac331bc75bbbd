//! Route table.

use axum::Router;
use axum::routing::get;

use crate::handlers;
use crate::state::AppState;

/// Build the router and thread `state` through every route.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health::health))
        .route("/ws/connect/{user_id}", get(handlers::ws::ws_connect))
        .with_state(state)
}
