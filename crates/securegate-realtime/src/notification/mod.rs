//! Notification fan-out and delivery failure reporting.

pub mod hook;
pub mod router;

pub use hook::{DeliveryFailure, DeliveryHook, LoggingDeliveryHook};
pub use router::{DeliveryReport, NotificationRouter};
