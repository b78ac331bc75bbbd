//! # securegate-realtime
//!
//! Real-time WebSocket engine for SecureGate. Provides:
//!
//! - A connection registry indexed by user identity, with a separate
//!   administrator index
//! - A notification router delivering to one user, to all administrators,
//!   or to everyone, isolating per-connection failures
//! - The per-connection session loop (handshake, inbound routing, cleanup)
//! - The event bridge through which report/emergency services notify clients

pub mod bridge;
pub mod connection;
pub mod error;
pub mod message;
pub mod metrics;
pub mod notification;
pub mod server;
pub mod session;

pub use bridge::event_bridge::EventBridge;
pub use connection::authenticator::{ConnectHints, WsAuthenticator};
pub use connection::manager::ConnectionManager;
pub use connection::registry::ConnectionRegistry;
pub use notification::router::NotificationRouter;
pub use server::RealtimeEngine;
pub use session::{Frame, run_session};
