//! Middleware for request processing

/// Authentication gate and the `AuthUser` extractor
pub mod auth;

pub use auth::{AuthUser, AuthenticatedUser};
