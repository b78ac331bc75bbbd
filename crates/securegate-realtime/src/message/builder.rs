//! Constructors for outbound messages.

use serde_json::Value;

use securegate_core::types::id::UserId;

use super::types::{InboundMessage, OutboundMessage};

impl OutboundMessage {
    /// Alert relayed to administrators, tagged with the sender.
    pub fn emergency_alert(data: Value, sender: &UserId) -> Self {
        Self::EmergencyAlert {
            data,
            user_id: sender.clone(),
        }
    }

    /// Newly persisted emergency.
    pub fn emergency_created(data: Value) -> Self {
        Self::EmergencyCreated { data }
    }

    /// Report change relayed between clients.
    pub fn report_update(data: Value) -> Self {
        Self::ReportUpdate { data }
    }

    /// Persisted report change for its owner.
    pub fn report_updated(data: Value) -> Self {
        Self::ReportUpdated { data }
    }

    /// Persisted emergency change for its reporter.
    pub fn emergency_updated(data: Value) -> Self {
        Self::EmergencyUpdated { data }
    }

    /// System-wide announcement.
    pub fn announcement(data: Value) -> Self {
        Self::Announcement { data }
    }
}

/// Where an inbound message should go.
#[derive(Debug, Clone, PartialEq)]
pub enum Route {
    /// Every administrator connection.
    Administrators(OutboundMessage),
    /// Every connection of one user.
    User(UserId, OutboundMessage),
}

/// Resolve the delivery route for a message received from `sender`.
///
/// Returns `None` for messages that are dropped: unknown types, and
/// `report_update` without a recipient. The recipient is read from the
/// top-level `target_user`, falling back to `data.target_user`; blank
/// identities count as absent.
pub fn route_inbound(msg: InboundMessage, sender: &UserId) -> Option<Route> {
    match msg {
        InboundMessage::EmergencyAlert { data } => Some(Route::Administrators(
            OutboundMessage::emergency_alert(data, sender),
        )),
        InboundMessage::ReportUpdate { data, target_user } => {
            let target = target_user
                .or_else(|| {
                    data.get("target_user")
                        .and_then(Value::as_str)
                        .map(UserId::from)
                })
                .filter(|t| !t.is_empty())?;
            Some(Route::User(target, OutboundMessage::report_update(data)))
        }
        InboundMessage::Unknown => None,
    }
}
