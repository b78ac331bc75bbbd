//! # securegate-auth
//!
//! Resolves opaque credentials to a verified identity and role. Token
//! issuance belongs to the identity provider; [`jwt::JwtEncoder`] exists so
//! that development tooling and tests can mint compatible tokens.

pub mod jwt;
pub mod resolver;

pub use jwt::{Claims, JwtDecoder, JwtEncoder};
pub use resolver::{AuthenticatedIdentity, IdentityResolver};
