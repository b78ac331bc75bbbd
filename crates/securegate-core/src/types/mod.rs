//! Core type definitions used across the SecureGate workspace.

pub mod id;

pub use id::*;
