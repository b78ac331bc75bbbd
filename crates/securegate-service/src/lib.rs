//! # securegate-service
//!
//! Business logic for emergencies and reports. Every state change is
//! persisted through a repository trait first; only then is the realtime
//! layer notified through [`notifier::EventNotifier`]. The outcome of a
//! service call depends on persistence alone.

pub mod context;
pub mod emergency;
pub mod notifier;
pub mod report;
pub mod repository;

#[cfg(test)]
pub(crate) mod testing;

pub use context::RequestContext;
pub use emergency::EmergencyService;
pub use notifier::EventNotifier;
pub use report::ReportService;
