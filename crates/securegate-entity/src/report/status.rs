//! Report category and status enumerations.

use serde::{Deserialize, Serialize};

/// Category of an incident report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportCategory {
    /// Theft.
    Theft,
    /// Assault.
    Assault,
    /// Vandalism.
    Vandalism,
    /// Suspicious activity.
    Suspicious,
    /// Noise complaint.
    Noise,
    /// Anything else.
    Other,
}

/// Review status of a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportStatus {
    /// Awaiting review.
    #[default]
    Pending,
    /// Accepted by an administrator.
    Approved,
    /// Closed as handled.
    Resolved,
    /// Rejected.
    Denied,
}
