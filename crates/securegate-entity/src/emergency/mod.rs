//! Emergency alert entities.

pub mod model;
pub mod status;

pub use model::Emergency;
pub use status::{EmergencyStatus, EmergencyType};
