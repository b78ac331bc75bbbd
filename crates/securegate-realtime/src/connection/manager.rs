//! Connection manager — handles connection lifecycle (connect, inbound
//! routing, disconnect).

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use tokio::sync::mpsc;
use tracing::{debug, info};

use securegate_auth::AuthenticatedIdentity;
use securegate_core::config::RealtimeConfig;
use securegate_core::types::id::UserId;

use crate::message::builder::{Route, route_inbound};
use crate::message::{serializer, validator};
use crate::metrics::{RealtimeMetrics, connections, messages};
use crate::notification::router::{DeliveryReport, NotificationRouter};

use super::handle::ConnectionHandle;
use super::registry::ConnectionRegistry;

/// Why an inbound frame was not routed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropReason {
    /// Blank or larger than the frame limit.
    Invalid,
    /// Not a JSON object with a `type` field.
    Malformed,
    /// Unknown type, or a routed type missing its recipient.
    Unroutable,
}

/// Result of processing one inbound frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InboundOutcome {
    /// The frame was relayed.
    Routed(DeliveryReport),
    /// The frame was discarded without a reply.
    Dropped(DropReason),
}

/// Owns the connection lifecycle on top of the shared registry.
#[derive(Debug)]
pub struct ConnectionManager {
    registry: Arc<ConnectionRegistry>,
    router: Arc<NotificationRouter>,
    metrics: Arc<RealtimeMetrics>,
    config: RealtimeConfig,
    /// Set by [`ConnectionManager::close_all`]; refuses later connections.
    shutting_down: AtomicBool,
}

impl ConnectionManager {
    /// Creates a new connection manager.
    pub fn new(
        config: RealtimeConfig,
        registry: Arc<ConnectionRegistry>,
        router: Arc<NotificationRouter>,
        metrics: Arc<RealtimeMetrics>,
    ) -> Self {
        Self {
            registry,
            router,
            metrics,
            config,
            shutting_down: AtomicBool::new(false),
        }
    }

    /// Registers a new authenticated connection.
    ///
    /// Returns the connection handle and a receiver for outbound frames.
    /// After [`ConnectionManager::close_all`] the handle comes back already
    /// closed and is never registered.
    pub fn connect(
        &self,
        identity: &AuthenticatedIdentity,
    ) -> (Arc<ConnectionHandle>, mpsc::Receiver<String>) {
        let (tx, rx) = mpsc::channel(self.config.channel_buffer_size.max(1));
        let handle = Arc::new(ConnectionHandle::new(
            identity.user_id.clone(),
            identity.role,
            tx,
        ));

        if self.is_shutting_down() {
            handle.mark_closed();
            debug!(user_id = %handle.user_id, "Connection refused during shutdown");
            return (handle, rx);
        }

        self.registry.register(handle.clone());
        connections::record_connect(&self.metrics);

        // close_all may have drained the registry between the check above
        // and the insert.
        if self.is_shutting_down() {
            self.disconnect(&handle);
            return (handle, rx);
        }

        info!(
            conn_id = %handle.id,
            user_id = %handle.user_id,
            role = %handle.role,
            "WebSocket connection registered"
        );

        (handle, rx)
    }

    /// Unregisters a connection. Only the first call for a handle has any
    /// effect; returns whether this call performed the cleanup.
    pub fn disconnect(&self, handle: &ConnectionHandle) -> bool {
        if !handle.mark_closed() {
            return false;
        }

        self.registry.unregister(&handle.id, &handle.user_id);
        connections::record_disconnect(&self.metrics);

        info!(
            conn_id = %handle.id,
            user_id = %handle.user_id,
            "WebSocket connection unregistered"
        );
        true
    }

    /// Processes an inbound text frame from `handle`.
    ///
    /// Invalid, malformed, and unroutable frames are dropped silently; the
    /// connection stays open.
    pub fn handle_inbound(&self, handle: &ConnectionHandle, raw: &str) -> InboundOutcome {
        if let Err(e) = validator::validate_inbound(raw, self.config.max_frame_bytes) {
            return self.drop_frame(handle, DropReason::Invalid, &e.message);
        }

        let msg = match serializer::deserialize_inbound(raw) {
            Ok(msg) => msg,
            Err(e) => return self.drop_frame(handle, DropReason::Malformed, &e.to_string()),
        };
        let message_type = msg.message_type();

        let Some(route) = route_inbound(msg, &handle.user_id) else {
            return self.drop_frame(handle, DropReason::Unroutable, message_type);
        };

        messages::record_received(&self.metrics);
        let report = match route {
            Route::Administrators(out) => self.router.broadcast_to_admins(&out),
            Route::User(target, out) => self.router.send_to_user(&target, &out),
        };

        debug!(
            conn_id = %handle.id,
            user_id = %handle.user_id,
            message_type = message_type,
            delivered = report.delivered,
            failed = report.failed,
            "Inbound message routed"
        );

        InboundOutcome::Routed(report)
    }

    fn drop_frame(&self, handle: &ConnectionHandle, reason: DropReason, detail: &str) -> InboundOutcome {
        messages::record_dropped(&self.metrics);
        debug!(
            conn_id = %handle.id,
            user_id = %handle.user_id,
            reason = ?reason,
            "Dropping inbound frame: {}",
            detail
        );
        InboundOutcome::Dropped(reason)
    }

    /// Closes every registered connection and refuses new ones. Returns how
    /// many were closed.
    pub fn close_all(&self) -> usize {
        self.shutting_down.store(true, Ordering::SeqCst);

        let mut closed = 0;
        for handle in self.registry.drain() {
            if handle.mark_closed() {
                connections::record_disconnect(&self.metrics);
                closed += 1;
            }
        }
        info!(closed = closed, "Closed all WebSocket connections");
        closed
    }

    /// Whether [`ConnectionManager::close_all`] has run.
    pub fn is_shutting_down(&self) -> bool {
        self.shutting_down.load(Ordering::SeqCst)
    }

    /// Upper bound on a single socket write.
    pub fn send_timeout(&self) -> Duration {
        self.config.send_timeout()
    }

    /// Returns total number of live connections.
    pub fn connection_count(&self) -> usize {
        self.registry.connection_count()
    }

    /// Returns number of unique connected users.
    pub fn user_count(&self) -> usize {
        self.registry.user_count()
    }

    /// Returns number of admin connections.
    pub fn admin_count(&self) -> usize {
        self.registry.admin_count()
    }

    /// Whether `user_id` has at least one live connection.
    pub fn is_user_connected(&self, user_id: &UserId) -> bool {
        self.registry.contains_user(user_id)
    }
}
