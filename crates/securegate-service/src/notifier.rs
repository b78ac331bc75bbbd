//! Outbound notification port consumed by the services.

use serde_json::Value;

use securegate_core::types::id::UserId;

/// Fire-and-forget notification sink for domain events.
///
/// Implementations must never fail or block the caller: delivery outcomes
/// are not part of any service result.
pub trait EventNotifier: Send + Sync + std::fmt::Debug + 'static {
    /// A new emergency was persisted; tell every administrator.
    fn notify_emergency_created(&self, emergency: Value);

    /// A report owned by `user_id` changed; tell its owner.
    fn notify_report_updated(&self, report: Value, user_id: &UserId);

    /// An emergency raised by `user_id` was answered; tell the reporter.
    fn notify_emergency_updated(&self, emergency: Value, user_id: &UserId);
}
