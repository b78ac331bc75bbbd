//! Delivery errors for a single connection.

use thiserror::Error;

/// Why a message could not be queued for a connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DeliveryError {
    /// The connection is closed or its writer has gone away.
    #[error("connection closed")]
    Closed,
    /// The connection's outbound queue is full; the client is not keeping up.
    #[error("outbound buffer full")]
    Full,
}
