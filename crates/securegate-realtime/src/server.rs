//! Top-level real-time engine that ties together all subsystems.

use std::sync::Arc;

use tokio::sync::broadcast;
use tracing::info;

use securegate_core::config::RealtimeConfig;
use securegate_core::types::id::UserId;

use crate::bridge::event_bridge::EventBridge;
use crate::connection::manager::ConnectionManager;
use crate::connection::registry::ConnectionRegistry;
use crate::metrics::{MetricsSnapshot, RealtimeMetrics};
use crate::notification::hook::{DeliveryHook, LoggingDeliveryHook};
use crate::notification::router::NotificationRouter;

/// Central real-time engine that coordinates all WebSocket subsystems.
#[derive(Debug, Clone)]
pub struct RealtimeEngine {
    /// Connection registry.
    pub registry: Arc<ConnectionRegistry>,
    /// Connection manager.
    pub connections: Arc<ConnectionManager>,
    /// Notification router.
    pub router: Arc<NotificationRouter>,
    /// Event bridge (domain events → notifications).
    pub event_bridge: Arc<EventBridge>,
    /// Metrics collector.
    pub metrics: Arc<RealtimeMetrics>,
    /// Shutdown signal sender.
    shutdown_tx: broadcast::Sender<()>,
}

impl RealtimeEngine {
    /// Creates a new real-time engine that logs delivery failures.
    pub fn new(config: RealtimeConfig) -> Self {
        let metrics = Arc::new(RealtimeMetrics::new());
        let hook = Arc::new(LoggingDeliveryHook::new(metrics.clone()));
        Self::build(config, metrics, hook)
    }

    /// Creates a new real-time engine reporting delivery failures to `hook`.
    pub fn with_delivery_hook(config: RealtimeConfig, hook: Arc<dyn DeliveryHook>) -> Self {
        Self::build(config, Arc::new(RealtimeMetrics::new()), hook)
    }

    fn build(
        config: RealtimeConfig,
        metrics: Arc<RealtimeMetrics>,
        hook: Arc<dyn DeliveryHook>,
    ) -> Self {
        let (shutdown_tx, _) = broadcast::channel(1);

        let registry = Arc::new(ConnectionRegistry::new());
        let router = Arc::new(NotificationRouter::new(
            registry.clone(),
            hook,
            metrics.clone(),
        ));
        let connections = Arc::new(ConnectionManager::new(
            config,
            registry.clone(),
            router.clone(),
            metrics.clone(),
        ));
        let event_bridge = Arc::new(EventBridge::new(router.clone()));

        info!("Real-time engine initialized");

        Self {
            registry,
            connections,
            router,
            event_bridge,
            metrics,
            shutdown_tx,
        }
    }

    /// Returns a shutdown receiver for graceful shutdown coordination.
    pub fn shutdown_receiver(&self) -> broadcast::Receiver<()> {
        self.shutdown_tx.subscribe()
    }

    /// Closes all connections, refuses new ones, and signals every session
    /// to stop.
    ///
    /// The registry is closed before the signal goes out: a session that
    /// subscribes too late for the signal finds its connection refused.
    pub fn shutdown(&self) {
        info!("Shutting down real-time engine");

        self.connections.close_all();
        let _ = self.shutdown_tx.send(());

        info!("Real-time engine shut down");
    }

    /// Returns total number of live connections.
    pub fn connection_count(&self) -> usize {
        self.connections.connection_count()
    }

    /// Returns number of unique connected users.
    pub fn user_count(&self) -> usize {
        self.connections.user_count()
    }

    /// Returns number of admin connections.
    pub fn admin_count(&self) -> usize {
        self.connections.admin_count()
    }

    /// Whether `user_id` has at least one live connection.
    pub fn is_user_connected(&self, user_id: &UserId) -> bool {
        self.connections.is_user_connected(user_id)
    }

    /// Current metrics counters.
    pub fn metrics_snapshot(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }
}
