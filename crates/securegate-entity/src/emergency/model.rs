//! Emergency entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use securegate_core::types::id::{EmergencyId, UserId};

use super::status::{EmergencyStatus, EmergencyType};

/// An emergency alert raised by a resident.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Emergency {
    /// Unique identifier.
    pub id: EmergencyId,
    /// Resident who raised the alert.
    pub user_id: UserId,
    /// Kind of emergency.
    #[serde(rename = "type")]
    pub kind: EmergencyType,
    /// Free-form location description.
    pub location: String,
    /// Current status.
    pub status: EmergencyStatus,
    /// Administrator who last changed the status.
    pub admin_id: Option<UserId>,
    /// Notes left by the responding administrator.
    pub response_notes: Option<String>,
    /// When the alert was raised.
    pub created_at: DateTime<Utc>,
    /// When the alert was resolved.
    pub resolved_at: Option<DateTime<Utc>>,
}

impl Emergency {
    /// Create a new active emergency.
    pub fn new(user_id: UserId, kind: EmergencyType, location: impl Into<String>) -> Self {
        Self {
            id: EmergencyId::new(),
            user_id,
            kind,
            location: location.into(),
            status: EmergencyStatus::Active,
            admin_id: None,
            response_notes: None,
            created_at: Utc::now(),
            resolved_at: None,
        }
    }

    /// Record a status change made by an administrator.
    pub fn transition(&mut self, status: EmergencyStatus, admin_id: UserId) {
        self.status = status;
        self.admin_id = Some(admin_id);
        if status.is_terminal() {
            self.resolved_at = Some(Utc::now());
        }
    }
}
