//! Incident report entities.

pub mod model;
pub mod status;

pub use model::{NewReport, Report};
pub use status::{ReportCategory, ReportStatus};
