//! Integration tests for the health endpoint and HTTP middleware.

mod helpers;

use axum::http::StatusCode;

use securegate_auth::AuthenticatedIdentity;
use securegate_core::types::id::UserId;
use securegate_entity::user::UserRole;

use helpers::TestApp;

#[tokio::test]
async fn test_health_check() {
    let app = TestApp::new();

    let response = app.request("GET", "/health", &[]).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "ok");
    assert_eq!(response.body["ws_connections"], 0);
}

#[tokio::test]
async fn test_health_reports_connection_counts() {
    let app = TestApp::new();
    let identity = |user: &str, role| AuthenticatedIdentity {
        user_id: UserId::new(user),
        role,
    };
    let (_a, _a_rx) = app.engine.connections.connect(&identity("a1", UserRole::Admin));
    let (_u1, _u1_rx) = app.engine.connections.connect(&identity("u1", UserRole::User));
    let (_u2, _u2_rx) = app.engine.connections.connect(&identity("u1", UserRole::User));

    let response = app.request("GET", "/health", &[]).await;

    assert_eq!(response.body["ws_connections"], 3);
    assert_eq!(response.body["online_users"], 2);
    assert_eq!(response.body["admin_connections"], 1);
    assert_eq!(response.body["metrics"]["connections_total"], 3);
}

#[tokio::test]
async fn test_cors_preflight_allows_configured_origin() {
    let app = TestApp::new();
    let origin = app.config.server.cors.allowed_origins[0].clone();

    let response = app
        .request(
            "OPTIONS",
            "/health",
            &[
                ("Origin", origin.as_str()),
                ("Access-Control-Request-Method", "GET"),
            ],
        )
        .await;

    assert_eq!(
        response
            .headers
            .get("access-control-allow-origin")
            .and_then(|v| v.to_str().ok()),
        Some(origin.as_str())
    );
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let app = TestApp::new();

    let response = app.request("GET", "/ws/connect", &[]).await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
}
