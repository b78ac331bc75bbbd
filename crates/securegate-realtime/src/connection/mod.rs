//! WebSocket connection management — handles, registry, lifecycle, auth.

pub mod authenticator;
pub mod handle;
pub mod manager;
pub mod registry;

pub use handle::{ConnectionHandle, ConnectionId};
pub use manager::ConnectionManager;
pub use registry::ConnectionRegistry;
