//! Emergency alert handling.

pub mod service;

pub use service::{EmergencyService, EmergencyUpdate};
