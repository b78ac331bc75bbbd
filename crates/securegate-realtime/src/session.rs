//! Per-connection session loop.
//!
//! One task per live connection: the read loop processes inbound frames in
//! arrival order, and a spawned writer drains the connection's outbound
//! queue into the socket with a per-frame timeout. Whichever side ends
//! first ends the session, and the connection is unregistered exactly once.

use std::fmt::Display;
use std::pin::pin;
use std::sync::Arc;

use futures::{Sink, SinkExt, Stream, StreamExt};
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

use securegate_auth::AuthenticatedIdentity;

use crate::connection::manager::ConnectionManager;

/// Transport-neutral view of an inbound WebSocket frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Frame {
    /// A text frame.
    Text(String),
    /// The peer is closing the connection.
    Close,
    /// Ping, pong or binary; ignored.
    Other,
}

/// Runs a connection from registration to cleanup.
///
/// `identity` must already be authenticated. Returns once the peer closes,
/// the transport fails, an outbound write times out, or the engine signals
/// shutdown. Returns at once when the engine has already shut down.
pub async fn run_session<S, E, K>(
    manager: Arc<ConnectionManager>,
    identity: AuthenticatedIdentity,
    inbound: S,
    outbound: K,
    mut shutdown: broadcast::Receiver<()>,
) where
    S: Stream<Item = Result<Frame, E>>,
    E: Display,
    K: Sink<String> + Send + 'static,
    K::Error: Display + Send,
{
    let (handle, mut rx) = manager.connect(&identity);
    let conn_id = handle.id;
    if handle.is_closed() {
        debug!(conn_id = %conn_id, "Engine is shutting down, session not started");
        return;
    }
    let send_timeout = manager.send_timeout();

    let mut writer = tokio::spawn(async move {
        let mut outbound = pin!(outbound);
        while let Some(frame) = rx.recv().await {
            match tokio::time::timeout(send_timeout, outbound.send(frame)).await {
                Ok(Ok(())) => {}
                Ok(Err(e)) => {
                    debug!(conn_id = %conn_id, "WebSocket send failed: {}", e);
                    break;
                }
                Err(_) => {
                    warn!(
                        conn_id = %conn_id,
                        timeout_secs = send_timeout.as_secs(),
                        "WebSocket send timed out, closing connection"
                    );
                    break;
                }
            }
        }
        // A stalled peer can block the closing flush as long as any write.
        let _ = tokio::time::timeout(send_timeout, outbound.close()).await;
    });

    let mut inbound = pin!(inbound);
    loop {
        tokio::select! {
            frame = inbound.next() => match frame {
                Some(Ok(Frame::Text(text))) => {
                    manager.handle_inbound(&handle, &text);
                }
                Some(Ok(Frame::Other)) => {}
                Some(Ok(Frame::Close)) | None => break,
                Some(Err(e)) => {
                    debug!(conn_id = %conn_id, "WebSocket receive error: {}", e);
                    break;
                }
            },
            _ = &mut writer => break,
            _ = shutdown.recv() => {
                debug!(conn_id = %conn_id, "Session stopping for shutdown");
                break;
            }
        }
    }

    writer.abort();
    manager.disconnect(&handle);

    info!(
        conn_id = %conn_id,
        user_id = %handle.user_id,
        "WebSocket session ended"
    );
}

#[cfg(test)]
mod tests {
    use std::convert::Infallible;
    use std::time::Duration;

    use futures::channel::mpsc as fmpsc;
    use serde_json::{Value, json};

    use securegate_core::config::RealtimeConfig;
    use securegate_core::types::id::UserId;
    use securegate_entity::user::UserRole;

    use super::*;
    use crate::connection::registry::ConnectionRegistry;
    use crate::message::types::OutboundMessage;
    use crate::metrics::RealtimeMetrics;
    use crate::notification::hook::LoggingDeliveryHook;
    use crate::notification::router::NotificationRouter;

    struct Fixture {
        manager: Arc<ConnectionManager>,
        router: Arc<NotificationRouter>,
        registry: Arc<ConnectionRegistry>,
        shutdown: broadcast::Sender<()>,
    }

    fn fixture() -> Fixture {
        let registry = Arc::new(ConnectionRegistry::new());
        let metrics = Arc::new(RealtimeMetrics::new());
        let router = Arc::new(NotificationRouter::new(
            registry.clone(),
            Arc::new(LoggingDeliveryHook::new(metrics.clone())),
            metrics.clone(),
        ));
        let manager = Arc::new(ConnectionManager::new(
            RealtimeConfig::default(),
            registry.clone(),
            router.clone(),
            metrics,
        ));
        let (shutdown, _) = broadcast::channel(1);
        Fixture {
            manager,
            router,
            registry,
            shutdown,
        }
    }

    struct Client {
        to_server: fmpsc::UnboundedSender<Result<Frame, Infallible>>,
        from_server: fmpsc::UnboundedReceiver<String>,
        task: tokio::task::JoinHandle<()>,
    }

    fn open(fx: &Fixture, user: &str, role: UserRole) -> Client {
        let (to_server, inbound) = fmpsc::unbounded();
        let (outbound, from_server) = fmpsc::unbounded();
        let identity = AuthenticatedIdentity {
            user_id: UserId::new(user),
            role,
        };
        let task = tokio::spawn(run_session(
            fx.manager.clone(),
            identity,
            inbound,
            outbound,
            fx.shutdown.subscribe(),
        ));
        Client {
            to_server,
            from_server,
            task,
        }
    }

    async fn wait_for_connections(fx: &Fixture, n: usize) {
        tokio::time::timeout(Duration::from_secs(5), async {
            while fx.manager.connection_count() != n {
                tokio::task::yield_now().await;
            }
        })
        .await
        .unwrap();
    }

    async fn next_json(client: &mut Client) -> Value {
        let raw = tokio::time::timeout(Duration::from_secs(5), client.from_server.next())
            .await
            .unwrap()
            .unwrap();
        serde_json::from_str(&raw).unwrap()
    }

    #[tokio::test]
    async fn test_alert_from_user_reaches_admin_only() {
        let fx = fixture();
        let mut user = open(&fx, "u1", UserRole::User);
        let mut admin = open(&fx, "a1", UserRole::Admin);
        wait_for_connections(&fx, 2).await;

        user.to_server
            .unbounded_send(Ok(Frame::Text(
                r#"{"type":"emergency_alert","data":{"location":"Lobby"}}"#.to_string(),
            )))
            .unwrap();

        assert_eq!(
            next_json(&mut admin).await,
            json!({"type": "emergency_alert", "data": {"location": "Lobby"}, "user_id": "u1"})
        );

        // Anything queued for the user would have been flushed before this
        // marker, so its absence proves the alert was not echoed back.
        fx.router
            .send_to_user(&UserId::new("u1"), &OutboundMessage::announcement(json!("marker")));
        assert_eq!(next_json(&mut user).await["data"], json!("marker"));
    }

    #[tokio::test]
    async fn test_malformed_frame_keeps_session_open() {
        let fx = fixture();
        let mut user = open(&fx, "u1", UserRole::User);
        wait_for_connections(&fx, 1).await;

        user.to_server
            .unbounded_send(Ok(Frame::Text("{{{".to_string())))
            .unwrap();
        user.to_server.unbounded_send(Ok(Frame::Other)).unwrap();

        fx.router
            .send_to_user(&UserId::new("u1"), &OutboundMessage::report_updated(json!({"id": 1})));
        assert_eq!(next_json(&mut user).await["type"], "report_updated");
        assert!(!user.task.is_finished());
    }

    #[tokio::test]
    async fn test_peer_close_unregisters() {
        let fx = fixture();
        let user = open(&fx, "u1", UserRole::User);
        wait_for_connections(&fx, 1).await;

        user.to_server.unbounded_send(Ok(Frame::Close)).unwrap();
        user.task.await.unwrap();

        assert_eq!(fx.registry.connection_count(), 0);
        assert!(!fx.registry.contains_user(&UserId::new("u1")));
    }

    #[tokio::test]
    async fn test_stream_end_unregisters() {
        let fx = fixture();
        let Client { to_server, task, .. } = open(&fx, "a1", UserRole::Admin);
        wait_for_connections(&fx, 1).await;

        drop(to_server);
        task.await.unwrap();

        assert_eq!(fx.registry.admin_count(), 0);
    }

    #[tokio::test]
    async fn test_shutdown_signal_ends_sessions() {
        let fx = fixture();
        let first = open(&fx, "u1", UserRole::User);
        let second = open(&fx, "a1", UserRole::Admin);
        wait_for_connections(&fx, 2).await;

        fx.shutdown.send(()).unwrap();
        first.task.await.unwrap();
        second.task.await.unwrap();

        assert_eq!(fx.manager.connection_count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stalled_writer_times_out_and_closes() {
        let fx = fixture();
        let (_to_server, inbound) = fmpsc::unbounded::<Result<Frame, Infallible>>();
        let stalled = futures::sink::unfold((), |(), _frame: String| {
            futures::future::pending::<Result<(), Infallible>>()
        });
        let identity = AuthenticatedIdentity {
            user_id: UserId::new("u1"),
            role: UserRole::User,
        };
        let task = tokio::spawn(run_session(
            fx.manager.clone(),
            identity,
            inbound,
            stalled,
            fx.shutdown.subscribe(),
        ));
        wait_for_connections(&fx, 1).await;

        fx.router
            .send_to_user(&UserId::new("u1"), &OutboundMessage::report_updated(json!({})));

        tokio::time::timeout(Duration::from_secs(60), task)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(fx.manager.connection_count(), 0);
    }
}
