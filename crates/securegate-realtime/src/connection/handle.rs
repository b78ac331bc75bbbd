//! Individual WebSocket connection handle.

use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::mpsc;
use uuid::Uuid;

use securegate_core::types::id::UserId;
use securegate_entity::user::UserRole;

use crate::error::DeliveryError;

/// Unique connection identifier
pub type ConnectionId = Uuid;

/// A handle to a single WebSocket connection.
///
/// Holds the sender half of the connection's bounded outbound queue plus
/// the identity and role resolved at handshake time. The role is never
/// re-checked for the lifetime of the connection.
#[derive(Debug)]
pub struct ConnectionHandle {
    /// Unique connection ID
    pub id: ConnectionId,
    /// User who owns this connection
    pub user_id: UserId,
    /// Role at connection time
    pub role: UserRole,
    /// Sender for serialized outbound frames
    sender: mpsc::Sender<String>,
    /// Set once on the `Open -> Closed` transition
    closed: AtomicBool,
}

impl ConnectionHandle {
    /// Create a new connection handle
    pub fn new(user_id: UserId, role: UserRole, sender: mpsc::Sender<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            role,
            sender,
            closed: AtomicBool::new(false),
        }
    }

    /// Queue a serialized frame without waiting.
    pub fn send(&self, frame: String) -> Result<(), DeliveryError> {
        if self.is_closed() {
            return Err(DeliveryError::Closed);
        }
        self.sender.try_send(frame).map_err(|e| match e {
            mpsc::error::TrySendError::Full(_) => DeliveryError::Full,
            mpsc::error::TrySendError::Closed(_) => DeliveryError::Closed,
        })
    }

    /// Whether this connection was registered with the admin role
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    /// Check if the connection has been closed
    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    /// Mark the connection closed.
    ///
    /// Returns `true` only for the call that performed the transition, so
    /// cleanup guarded by it runs exactly once.
    pub fn mark_closed(&self) -> bool {
        !self.closed.swap(true, Ordering::SeqCst)
    }
}
