//! Inbound and outbound WebSocket message type definitions.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use securegate_core::types::id::UserId;

/// Messages sent by the client to the server.
///
/// Frames whose `type` is not listed here deserialize to
/// [`InboundMessage::Unknown`] and are dropped by the session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InboundMessage {
    /// A user raising an alarm; relayed to every administrator.
    EmergencyAlert {
        /// Opaque alert payload.
        #[serde(default)]
        data: Value,
    },
    /// A report change addressed to one user.
    ReportUpdate {
        /// Opaque report payload.
        #[serde(default)]
        data: Value,
        /// Recipient identity.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        target_user: Option<UserId>,
    },
    /// Any other `type` value.
    #[serde(other)]
    Unknown,
}

impl InboundMessage {
    /// Returns the wire `type` tag, or `"unknown"`.
    pub fn message_type(&self) -> &'static str {
        match self {
            Self::EmergencyAlert { .. } => "emergency_alert",
            Self::ReportUpdate { .. } => "report_update",
            Self::Unknown => "unknown",
        }
    }
}

/// Messages sent by the server to the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OutboundMessage {
    /// An alert relayed from a connected user.
    EmergencyAlert {
        /// Payload as sent by the reporter.
        data: Value,
        /// Identity of the sending connection.
        user_id: UserId,
    },
    /// A newly persisted emergency.
    EmergencyCreated {
        /// Emergency document.
        data: Value,
    },
    /// A report change relayed from another connection.
    ReportUpdate {
        /// Report payload.
        data: Value,
    },
    /// A persisted report change for its owner.
    ReportUpdated {
        /// Report document.
        data: Value,
    },
    /// An administrator's response to an emergency, for its reporter.
    EmergencyUpdated {
        /// Emergency document.
        data: Value,
    },
    /// System-wide announcement.
    Announcement {
        /// Announcement payload.
        data: Value,
    },
}

impl OutboundMessage {
    /// Returns the wire `type` tag.
    pub fn message_type(&self) -> &'static str {
        match self {
            Self::EmergencyAlert { .. } => "emergency_alert",
            Self::EmergencyCreated { .. } => "emergency_created",
            Self::ReportUpdate { .. } => "report_update",
            Self::ReportUpdated { .. } => "report_updated",
            Self::EmergencyUpdated { .. } => "emergency_updated",
            Self::Announcement { .. } => "announcement",
        }
    }
}
