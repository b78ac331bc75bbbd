//! Integration tests for the WebSocket handshake and message relay.

mod helpers;

use axum::http::StatusCode;
use futures::SinkExt;
use serde_json::json;
use tokio_tungstenite::tungstenite::Message;

use securegate_core::types::id::UserId;
use securegate_entity::user::UserRole;

use helpers::{TestApp, assert_silent, next_json};

#[tokio::test]
async fn test_ws_connect_without_token() {
    let app = TestApp::new();

    let response = app.request("GET", "/ws/connect/u1", &[]).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["error"], "UNAUTHORIZED");
}

#[tokio::test]
async fn test_ws_connect_with_garbage_token() {
    let app = TestApp::new();

    let response = app
        .request("GET", "/ws/connect/u1?token=definitely-not-a-jwt", &[])
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_ws_connect_identity_mismatch() {
    let app = TestApp::new();
    let token = app.token("u1", UserRole::User);

    let response = app
        .request("GET", &format!("/ws/connect/u2?token={token}"), &[])
        .await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(app.engine.connection_count(), 0);
}

#[tokio::test]
async fn test_ws_connect_valid_token_without_upgrade() {
    let app = TestApp::new();
    let token = app.token("u1", UserRole::User);

    let response = app
        .request("GET", &format!("/ws/connect/u1?token={token}"), &[])
        .await;

    assert!(
        response.status.is_client_error()
            && response.status != StatusCode::UNAUTHORIZED
            && response.status != StatusCode::FORBIDDEN,
        "Expected an upgrade rejection, got {}",
        response.status
    );
    assert_eq!(app.engine.connection_count(), 0);
}

#[tokio::test]
async fn test_emergency_alert_relayed_to_admin() {
    let app = TestApp::new();
    let addr = app.spawn_server().await;

    let mut user = app.connect(addr, "u1", UserRole::User, Some("user")).await;
    let mut admin = app.connect(addr, "a1", UserRole::Admin, Some("admin")).await;
    let mut bystander = app.connect(addr, "u2", UserRole::User, None).await;
    app.wait_for_connections(3).await;

    user.send(Message::Text(
        r#"{"type":"emergency_alert","data":{"location":"North gate","type":"fire"}}"#.into(),
    ))
    .await
    .unwrap();

    assert_eq!(
        next_json(&mut admin).await,
        json!({
            "type": "emergency_alert",
            "data": {"location": "North gate", "type": "fire"},
            "user_id": "u1"
        })
    );
    assert_silent(&mut user).await;
    assert_silent(&mut bystander).await;
}

#[tokio::test]
async fn test_report_update_reaches_every_device_of_target() {
    let app = TestApp::new();
    let addr = app.spawn_server().await;

    let mut admin = app.connect(addr, "a1", UserRole::Admin, None).await;
    let mut phone = app.connect(addr, "u1", UserRole::User, None).await;
    let mut laptop = app.connect(addr, "u1", UserRole::User, None).await;
    app.wait_for_connections(3).await;

    admin
        .send(Message::Text(
            r#"{"type":"report_update","data":{"status":"approved"},"target_user":"u1"}"#.into(),
        ))
        .await
        .unwrap();

    let expected = json!({"type": "report_update", "data": {"status": "approved"}});
    assert_eq!(next_json(&mut phone).await, expected);
    assert_eq!(next_json(&mut laptop).await, expected);
    assert_silent(&mut admin).await;
}

#[tokio::test]
async fn test_report_update_without_target_is_dropped() {
    let app = TestApp::new();
    let addr = app.spawn_server().await;

    let mut admin = app.connect(addr, "a1", UserRole::Admin, None).await;
    let mut user = app.connect(addr, "u1", UserRole::User, None).await;
    app.wait_for_connections(2).await;

    admin
        .send(Message::Text(r#"{"type":"report_update","data":{}}"#.into()))
        .await
        .unwrap();
    admin.send(Message::Text("not json at all".into())).await.unwrap();

    assert_silent(&mut user).await;
    assert_silent(&mut admin).await;
    assert_eq!(app.engine.connection_count(), 2);
}

#[tokio::test]
async fn test_role_hint_does_not_grant_admin() {
    let app = TestApp::new();
    let addr = app.spawn_server().await;

    let mut pretender = app.connect(addr, "u1", UserRole::User, Some("admin")).await;
    app.wait_for_connections(1).await;

    assert_eq!(app.engine.admin_count(), 0);
    app.engine
        .event_bridge
        .emergency_created(json!({"id": "e1", "status": "active"}));

    assert_silent(&mut pretender).await;
}

#[tokio::test]
async fn test_server_events_reach_connected_clients() {
    let app = TestApp::new();
    let addr = app.spawn_server().await;

    let mut admin = app.connect(addr, "a1", UserRole::Admin, None).await;
    let mut owner = app.connect(addr, "u1", UserRole::User, None).await;
    app.wait_for_connections(2).await;

    app.engine
        .event_bridge
        .emergency_created(json!({"id": "e1", "type": "medical"}));
    app.engine
        .event_bridge
        .report_updated(json!({"id": "r1", "status": "resolved"}), &UserId::new("u1"));

    assert_eq!(
        next_json(&mut admin).await,
        json!({"type": "emergency_created", "data": {"id": "e1", "type": "medical"}})
    );
    assert_eq!(
        next_json(&mut owner).await,
        json!({"type": "report_updated", "data": {"id": "r1", "status": "resolved"}})
    );
}

#[tokio::test]
async fn test_disconnect_prunes_registry() {
    let app = TestApp::new();
    let addr = app.spawn_server().await;

    let mut user = app.connect(addr, "u1", UserRole::User, None).await;
    app.wait_for_connections(1).await;
    assert!(app.engine.is_user_connected(&UserId::new("u1")));

    user.close(None).await.unwrap();
    app.wait_for_connections(0).await;

    assert!(!app.engine.is_user_connected(&UserId::new("u1")));
    assert_eq!(app.engine.user_count(), 0);
}

#[tokio::test]
async fn test_engine_shutdown_closes_sockets() {
    let app = TestApp::new();
    let addr = app.spawn_server().await;

    let mut user = app.connect(addr, "u1", UserRole::User, None).await;
    app.wait_for_connections(1).await;

    app.engine.shutdown();

    assert_eq!(app.engine.connection_count(), 0);
    let closed = tokio::time::timeout(std::time::Duration::from_secs(5), async {
        loop {
            match futures::StreamExt::next(&mut user).await {
                Some(Ok(Message::Close(_))) | None | Some(Err(_)) => break,
                Some(Ok(_)) => {}
            }
        }
    })
    .await;
    assert!(closed.is_ok(), "Socket was not closed after shutdown");
}
