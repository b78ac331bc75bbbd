//! Bridge between domain services and the realtime notification system.

pub mod event_bridge;

pub use event_bridge::EventBridge;
