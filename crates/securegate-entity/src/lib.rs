//! # securegate-entity
//!
//! Domain entity models for SecureGate. Every struct in this crate is a
//! document in the external data store or a domain value object. All
//! entities derive `Debug`, `Clone`, `Serialize`, and `Deserialize`.

pub mod emergency;
pub mod report;
pub mod user;
