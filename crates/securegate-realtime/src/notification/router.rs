//! Notification router — resolves targets through the registry and queues
//! one frame per target connection.

use std::sync::Arc;

use serde::Serialize;

use securegate_core::types::id::UserId;

use crate::connection::handle::ConnectionHandle;
use crate::connection::registry::ConnectionRegistry;
use crate::message::serializer;
use crate::message::types::OutboundMessage;
use crate::metrics::{RealtimeMetrics, messages};

use super::hook::{DeliveryFailure, DeliveryHook};

/// Outcome of one fan-out call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DeliveryReport {
    /// Connections in the snapshot
    pub attempted: usize,
    /// Frames queued successfully
    pub delivered: usize,
    /// Frames handed to the delivery hook
    pub failed: usize,
}

/// Fire-and-forget delivery to one user, to administrators, or to everyone.
///
/// Every primitive takes a registry snapshot at call time and never blocks:
/// frames are queued on each connection's bounded outbound channel. A failed
/// target is reported to the [`DeliveryHook`] and skipped.
#[derive(Debug)]
pub struct NotificationRouter {
    registry: Arc<ConnectionRegistry>,
    hook: Arc<dyn DeliveryHook>,
    metrics: Arc<RealtimeMetrics>,
}

impl NotificationRouter {
    /// Create a new router
    pub fn new(
        registry: Arc<ConnectionRegistry>,
        hook: Arc<dyn DeliveryHook>,
        metrics: Arc<RealtimeMetrics>,
    ) -> Self {
        Self {
            registry,
            hook,
            metrics,
        }
    }

    /// Deliver to every connection of `user_id`, in registration order.
    pub fn send_to_user(&self, user_id: &UserId, msg: &OutboundMessage) -> DeliveryReport {
        let targets = self.registry.connections_for(user_id);
        if targets.is_empty() {
            tracing::debug!(
                user_id = %user_id,
                message_type = msg.message_type(),
                "No live connections for user"
            );
        }
        self.deliver(&targets, msg)
    }

    /// Deliver to every administrator connection.
    pub fn broadcast_to_admins(&self, msg: &OutboundMessage) -> DeliveryReport {
        let targets = self.registry.admin_connections();
        self.deliver(&targets, msg)
    }

    /// Deliver to every connection.
    pub fn broadcast_all(&self, msg: &OutboundMessage) -> DeliveryReport {
        let targets = self.registry.all_connections();
        self.deliver(&targets, msg)
    }

    fn deliver(&self, targets: &[Arc<ConnectionHandle>], msg: &OutboundMessage) -> DeliveryReport {
        let mut report = DeliveryReport {
            attempted: targets.len(),
            ..DeliveryReport::default()
        };
        if targets.is_empty() {
            return report;
        }

        let frame = match serializer::serialize_outbound(msg) {
            Ok(frame) => frame,
            Err(e) => {
                tracing::error!(
                    message_type = msg.message_type(),
                    "Failed to serialize outbound message: {}",
                    e
                );
                return report;
            }
        };

        for conn in targets {
            match conn.send(frame.clone()) {
                Ok(()) => {
                    messages::record_sent(&self.metrics);
                    report.delivered += 1;
                }
                Err(error) => {
                    report.failed += 1;
                    self.hook.on_delivery_failed(&DeliveryFailure {
                        conn_id: conn.id,
                        user_id: &conn.user_id,
                        message_type: msg.message_type(),
                        error,
                    });
                }
            }
        }

        report
    }
}
