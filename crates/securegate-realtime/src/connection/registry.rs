//! Connection registry — tracks all live connections indexed by user and by
//! administrator role.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use securegate_core::types::id::UserId;

use super::handle::{ConnectionHandle, ConnectionId};

/// Both indexes live under one lock so that a snapshot never observes a
/// connection present in one index but not the other.
#[derive(Debug, Default)]
struct RegistryState {
    /// User ID → connections in registration order.
    by_user: HashMap<UserId, Vec<Arc<ConnectionHandle>>>,
    /// Connections registered with the admin role, in registration order.
    admins: Vec<Arc<ConnectionHandle>>,
}

/// Thread-safe registry of all live WebSocket connections.
///
/// Mutated only through [`register`](Self::register) and
/// [`unregister`](Self::unregister); read only through snapshot accessors
/// that return owned vectors.
#[derive(Debug, Default)]
pub struct ConnectionRegistry {
    state: RwLock<RegistryState>,
}

impl ConnectionRegistry {
    /// Creates a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, RegistryState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, RegistryState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Adds a connection under its owner's identity, and to the admin index
    /// when its role is admin.
    pub fn register(&self, handle: Arc<ConnectionHandle>) {
        let mut state = self.write();
        if handle.is_admin() {
            state.admins.push(handle.clone());
        }
        state
            .by_user
            .entry(handle.user_id.clone())
            .or_default()
            .push(handle);
    }

    /// Removes a connection from both indexes, pruning the user entry once it
    /// is empty. Unknown connections are ignored.
    pub fn unregister(
        &self,
        conn_id: &ConnectionId,
        user_id: &UserId,
    ) -> Option<Arc<ConnectionHandle>> {
        let mut state = self.write();

        let mut removed = None;
        if let Some(connections) = state.by_user.get_mut(user_id) {
            if let Some(pos) = connections.iter().position(|c| c.id == *conn_id) {
                removed = Some(connections.remove(pos));
            }
            if connections.is_empty() {
                state.by_user.remove(user_id);
            }
        }

        if let Some(pos) = state.admins.iter().position(|c| c.id == *conn_id) {
            let admin = state.admins.remove(pos);
            removed.get_or_insert(admin);
        }

        removed
    }

    /// Snapshot of a user's connections, in registration order.
    pub fn connections_for(&self, user_id: &UserId) -> Vec<Arc<ConnectionHandle>> {
        self.read()
            .by_user
            .get(user_id)
            .cloned()
            .unwrap_or_default()
    }

    /// Snapshot of every admin connection.
    pub fn admin_connections(&self) -> Vec<Arc<ConnectionHandle>> {
        self.read().admins.clone()
    }

    /// Snapshot of every connection, flattened across users.
    pub fn all_connections(&self) -> Vec<Arc<ConnectionHandle>> {
        self.read()
            .by_user
            .values()
            .flat_map(|connections| connections.iter().cloned())
            .collect()
    }

    /// Removes every connection and returns them.
    pub fn drain(&self) -> Vec<Arc<ConnectionHandle>> {
        let mut state = self.write();
        state.admins.clear();
        state
            .by_user
            .drain()
            .flat_map(|(_, connections)| connections)
            .collect()
    }

    /// Returns total number of live connections.
    pub fn connection_count(&self) -> usize {
        self.read().by_user.values().map(Vec::len).sum()
    }

    /// Returns number of unique connected users.
    pub fn user_count(&self) -> usize {
        self.read().by_user.len()
    }

    /// Returns number of admin connections.
    pub fn admin_count(&self) -> usize {
        self.read().admins.len()
    }

    /// Whether the registry holds an entry for this user.
    pub fn contains_user(&self, user_id: &UserId) -> bool {
        self.read().by_user.contains_key(user_id)
    }
}
