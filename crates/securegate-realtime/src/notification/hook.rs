//! Delivery failure hook.

use std::sync::Arc;

use securegate_core::types::id::UserId;

use crate::connection::handle::ConnectionId;
use crate::error::DeliveryError;
use crate::metrics::{RealtimeMetrics, messages};

/// One message that could not be queued for one connection.
#[derive(Debug, Clone, Copy)]
pub struct DeliveryFailure<'a> {
    /// Target connection
    pub conn_id: ConnectionId,
    /// Owner of the target connection
    pub user_id: &'a UserId,
    /// Wire type of the undelivered message
    pub message_type: &'a str,
    /// Why the frame was not queued
    pub error: DeliveryError,
}

/// Observer for failed deliveries.
///
/// Called synchronously from the router for every failed target; must not
/// block. Delivery to the remaining targets continues regardless.
pub trait DeliveryHook: Send + Sync + std::fmt::Debug + 'static {
    /// A frame could not be queued for a connection.
    fn on_delivery_failed(&self, failure: &DeliveryFailure<'_>);
}

/// Default hook: logs at `warn` and counts the failure.
#[derive(Debug)]
pub struct LoggingDeliveryHook {
    metrics: Arc<RealtimeMetrics>,
}

impl LoggingDeliveryHook {
    /// Create a hook reporting into `metrics`.
    pub fn new(metrics: Arc<RealtimeMetrics>) -> Self {
        Self { metrics }
    }
}

impl DeliveryHook for LoggingDeliveryHook {
    fn on_delivery_failed(&self, failure: &DeliveryFailure<'_>) {
        messages::record_delivery_failure(&self.metrics);
        tracing::warn!(
            conn_id = %failure.conn_id,
            user_id = %failure.user_id,
            message_type = failure.message_type,
            error = %failure.error,
            "Failed to deliver message"
        );
    }
}
