//! Domain event → notification mapping.
//!
//! Report and emergency services call into this bridge after they have
//! persisted a change. Every call is fire-and-forget.

use std::sync::Arc;

use serde_json::Value;

use securegate_core::types::id::UserId;
use securegate_service::EventNotifier;

use crate::message::types::OutboundMessage;
use crate::notification::router::{DeliveryReport, NotificationRouter};

/// Bridges domain events into the realtime system.
#[derive(Debug, Clone)]
pub struct EventBridge {
    router: Arc<NotificationRouter>,
}

impl EventBridge {
    /// Create a new event bridge
    pub fn new(router: Arc<NotificationRouter>) -> Self {
        Self { router }
    }

    /// Tell every administrator about a newly persisted emergency.
    pub fn emergency_created(&self, emergency: Value) -> DeliveryReport {
        let report = self
            .router
            .broadcast_to_admins(&OutboundMessage::emergency_created(emergency));
        tracing::debug!(
            delivered = report.delivered,
            failed = report.failed,
            "Emergency created notification dispatched"
        );
        report
    }

    /// Tell `user_id` about a change to one of their reports.
    pub fn report_updated(&self, report: Value, user_id: &UserId) -> DeliveryReport {
        let outcome = self
            .router
            .send_to_user(user_id, &OutboundMessage::report_updated(report));
        tracing::debug!(
            user_id = %user_id,
            delivered = outcome.delivered,
            failed = outcome.failed,
            "Report updated notification dispatched"
        );
        outcome
    }

    /// Tell `user_id` that an emergency they raised was answered.
    pub fn emergency_updated(&self, emergency: Value, user_id: &UserId) -> DeliveryReport {
        let outcome = self
            .router
            .send_to_user(user_id, &OutboundMessage::emergency_updated(emergency));
        tracing::debug!(
            user_id = %user_id,
            delivered = outcome.delivered,
            failed = outcome.failed,
            "Emergency updated notification dispatched"
        );
        outcome
    }

    /// Send a system-wide announcement to every connection.
    pub fn broadcast(&self, data: Value) -> DeliveryReport {
        self.router
            .broadcast_all(&OutboundMessage::announcement(data))
    }
}

impl EventNotifier for EventBridge {
    fn notify_emergency_created(&self, emergency: Value) {
        self.emergency_created(emergency);
    }

    fn notify_report_updated(&self, report: Value, user_id: &UserId) {
        self.report_updated(report, user_id);
    }

    fn notify_emergency_updated(&self, emergency: Value, user_id: &UserId) {
        self.emergency_updated(emergency, user_id);
    }
}
