//! Incident report handling.

pub mod service;

pub use service::{ReportService, ReportUpdate};
