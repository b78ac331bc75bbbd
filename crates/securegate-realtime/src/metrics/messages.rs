//! Message metrics helpers.

use std::sync::atomic::Ordering;

use super::RealtimeMetrics;

/// Record a frame queued to a client
pub fn record_sent(metrics: &RealtimeMetrics) {
    metrics.messages_sent.fetch_add(1, Ordering::Relaxed);
}

/// Record a frame received from a client
pub fn record_received(metrics: &RealtimeMetrics) {
    metrics.messages_received.fetch_add(1, Ordering::Relaxed);
}

/// Record a frame that could not be queued
pub fn record_delivery_failure(metrics: &RealtimeMetrics) {
    metrics.delivery_failures.fetch_add(1, Ordering::Relaxed);
}

/// Record an inbound frame that was discarded
pub fn record_dropped(metrics: &RealtimeMetrics) {
    metrics.frames_dropped.fetch_add(1, Ordering::Relaxed);
}
