//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use futures::StreamExt;
use serde_json::Value;
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream};
use tower::ServiceExt;

use securegate_api::AppState;
use securegate_auth::{JwtDecoder, JwtEncoder};
use securegate_core::config::AppConfig;
use securegate_core::types::id::UserId;
use securegate_entity::user::UserRole;
use securegate_realtime::RealtimeEngine;

/// Client side of a test WebSocket
pub type TestSocket = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Realtime engine behind the router
    pub engine: Arc<RealtimeEngine>,
    /// Mints tokens the app accepts
    pub encoder: JwtEncoder,
    /// Application config
    pub config: Arc<AppConfig>,
}

impl TestApp {
    /// Create a new test application with default configuration
    pub fn new() -> Self {
        let config = Arc::new(AppConfig::default());
        let engine = Arc::new(RealtimeEngine::new(config.realtime.clone()));
        let resolver = Arc::new(JwtDecoder::new(&config.auth));
        let state = AppState::new(config.clone(), engine.clone(), resolver);

        Self {
            router: securegate_api::build_app(state),
            engine,
            encoder: JwtEncoder::new(&config.auth),
            config,
        }
    }

    /// Issue an access token for `user`
    pub fn token(&self, user: &str, role: UserRole) -> String {
        self.encoder
            .generate_access_token(&UserId::new(user), role)
            .expect("Failed to issue token")
    }

    /// Make an HTTP request to the test app
    pub async fn request(&self, method: &str, path: &str, headers: &[(&str, &str)]) -> TestResponse {
        let mut req = Request::builder().method(method).uri(path);
        for (name, value) in headers {
            req = req.header(*name, *value);
        }
        let req = req.body(Body::empty()).expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let headers = response.headers().clone();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse {
            status,
            headers,
            body,
        }
    }

    /// Serve the app on an ephemeral local port
    pub async fn spawn_server(&self) -> SocketAddr {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("No local address");
        let router = self.router.clone();

        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Test server failed");
        });

        addr
    }

    /// Open a WebSocket as `user`, optionally sending a role hint
    pub async fn connect(&self, addr: SocketAddr, user: &str, role: UserRole, hint: Option<&str>) -> TestSocket {
        let token = self.token(user, role);
        let mut url = format!("ws://{addr}/ws/connect/{user}?token={token}");
        if let Some(hint) = hint {
            url.push_str(&format!("&user_role={hint}"));
        }

        let (socket, _) = tokio_tungstenite::connect_async(url)
            .await
            .expect("WebSocket handshake failed");
        socket
    }

    /// Wait until the engine reports exactly `n` live connections
    pub async fn wait_for_connections(&self, n: usize) {
        tokio::time::timeout(Duration::from_secs(5), async {
            while self.engine.connection_count() != n {
                tokio::time::sleep(Duration::from_millis(10)).await;
            }
        })
        .await
        .unwrap_or_else(|_| {
            panic!(
                "Expected {} connections, have {}",
                n,
                self.engine.connection_count()
            )
        });
    }
}

/// Read the next text frame as JSON, skipping control frames
pub async fn next_json(socket: &mut TestSocket) -> Value {
    let deadline = Duration::from_secs(5);
    loop {
        let frame = tokio::time::timeout(deadline, socket.next())
            .await
            .expect("Timed out waiting for frame")
            .expect("Socket closed")
            .expect("Socket error");
        if let Message::Text(text) = frame {
            return serde_json::from_str(text.as_str()).expect("Frame is not JSON");
        }
    }
}

/// Assert no text frame arrives within a short window
pub async fn assert_silent(socket: &mut TestSocket) {
    let result = tokio::time::timeout(Duration::from_millis(200), socket.next()).await;
    if let Ok(Some(Ok(Message::Text(text)))) = result {
        panic!("Unexpected frame: {}", text.as_str());
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Response headers
    pub headers: axum::http::HeaderMap,
    /// Parsed JSON body
    pub body: Value,
}
