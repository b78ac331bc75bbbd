//! Realtime engine metrics.

pub mod connections;
pub mod messages;

use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

/// Engine-level metrics counters.
#[derive(Debug, Default)]
pub struct RealtimeMetrics {
    /// Total connections established
    pub connections_total: AtomicU64,
    /// Connections currently open
    pub connections_active: AtomicU64,
    /// Inbound frames accepted for routing
    pub messages_received: AtomicU64,
    /// Outbound frames queued to a connection
    pub messages_sent: AtomicU64,
    /// Outbound frames that could not be queued
    pub delivery_failures: AtomicU64,
    /// Inbound frames discarded (malformed, oversize, unroutable)
    pub frames_dropped: AtomicU64,
}

impl RealtimeMetrics {
    /// Create new zeroed metrics
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a snapshot of all metrics
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            connections_total: self.connections_total.load(Ordering::Relaxed),
            connections_active: self.connections_active.load(Ordering::Relaxed),
            messages_received: self.messages_received.load(Ordering::Relaxed),
            messages_sent: self.messages_sent.load(Ordering::Relaxed),
            delivery_failures: self.delivery_failures.load(Ordering::Relaxed),
            frames_dropped: self.frames_dropped.load(Ordering::Relaxed),
        }
    }
}

/// Serializable metrics snapshot
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    /// Total connections ever established
    pub connections_total: u64,
    /// Currently active connections
    pub connections_active: u64,
    /// Inbound frames accepted for routing
    pub messages_received: u64,
    /// Outbound frames queued
    pub messages_sent: u64,
    /// Outbound frames that failed to queue
    pub delivery_failures: u64,
    /// Inbound frames discarded
    pub frames_dropped: u64,
}
