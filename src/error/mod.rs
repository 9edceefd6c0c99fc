//! API Error Module
//!
//! Defines the error taxonomy used by every HTTP handler and its
//! conversion into JSON responses.
//!
//! # Module Structure
//!
//! ```
//! error/
//! ├── mod.rs        - Module exports
//! ├── types.rs      - Error type definitions
//! └── conversion.rs - Error conversion implementations
//! ```
//!
//! # Error Categories
//!
//! - `Validation` - malformed or duplicate input (400)
//! - `Unauthenticated` - missing, invalid, or expired token (401)
//! - `Forbidden` - acting on another user's owned resource (403)
//! - `NotFound` - referenced entity absent (404)
//! - `Internal` - unexpected store or runtime failure (500)
//!
//! Every handler maps every failure into one of these categories; the
//! response body is always a JSON object with a single `error` string.

/// Error type definitions
pub mod types;

/// Error conversion implementations
pub mod conversion;

// Re-export commonly used types
pub use types::ApiError;
