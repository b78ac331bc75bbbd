//! Emergency type and status enumerations.

use serde::{Deserialize, Serialize};

/// Kind of emergency raised by a resident.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmergencyType {
    /// Fire.
    Fire,
    /// Traffic or domestic accident.
    Accident,
    /// Violence in progress.
    Violence,
    /// Medical emergency.
    Medical,
    /// Anything else.
    General,
}

/// Response lifecycle of an emergency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmergencyStatus {
    /// Raised, nobody has responded yet.
    #[default]
    Active,
    /// An administrator is responding.
    Responded,
    /// Closed.
    Resolved,
}

impl EmergencyStatus {
    /// Whether the emergency is closed.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Resolved)
    }
}
