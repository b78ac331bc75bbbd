//! # securegate-api
//!
//! HTTP layer for SecureGate built on Axum.
//!
//! Provides the realtime WebSocket upgrade endpoint, the health check,
//! CORS and request tracing, and the mapping from [`AppError`] kinds to
//! HTTP status codes.
//!
//! [`AppError`]: securegate_core::AppError

pub mod app;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::build_app;
pub use error::ApiError;
pub use state::AppState;
