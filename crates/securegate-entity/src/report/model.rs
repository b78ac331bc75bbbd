//! Report entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use securegate_core::types::id::{ReportId, UserId};

use super::status::{ReportCategory, ReportStatus};

/// An incident report submitted by a resident.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    /// Unique identifier.
    pub id: ReportId,
    /// Resident who submitted the report.
    pub user_id: UserId,
    /// Category.
    pub category: ReportCategory,
    /// Short title.
    pub title: String,
    /// Full description.
    pub description: String,
    /// Where it happened.
    pub location: String,
    /// Link to uploaded evidence.
    pub evidence_url: Option<String>,
    /// Name of the victim, if any.
    pub victim_name: Option<String>,
    /// Contact of the victim, if any.
    pub victim_contact: Option<String>,
    /// Review status.
    pub status: ReportStatus,
    /// Response written by the reviewing administrator.
    pub admin_response: Option<String>,
    /// Submission time.
    pub created_at: DateTime<Utc>,
    /// Last modification time.
    pub updated_at: DateTime<Utc>,
}

/// Fields supplied by a resident when submitting a report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewReport {
    /// Category.
    pub category: ReportCategory,
    /// Short title.
    pub title: String,
    /// Full description.
    pub description: String,
    /// Where it happened.
    pub location: String,
    /// Link to uploaded evidence.
    #[serde(default)]
    pub evidence_url: Option<String>,
    /// Name of the victim, if any.
    #[serde(default)]
    pub victim_name: Option<String>,
    /// Contact of the victim, if any.
    #[serde(default)]
    pub victim_contact: Option<String>,
}

impl Report {
    /// Build a pending report owned by `user_id`.
    pub fn submit(user_id: UserId, fields: NewReport) -> Self {
        let now = Utc::now();
        Self {
            id: ReportId::new(),
            user_id,
            category: fields.category,
            title: fields.title,
            description: fields.description,
            location: fields.location,
            evidence_url: fields.evidence_url,
            victim_name: fields.victim_name,
            victim_contact: fields.victim_contact,
            status: ReportStatus::Pending,
            admin_response: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether `user_id` owns this report.
    pub fn is_owned_by(&self, user_id: &UserId) -> bool {
        &self.user_id == user_id
    }
}
