//! Users Module
//!
//! User records, public profiles, the follow relation, and the user
//! endpoints (profile lookup, follow toggle, suggestions, updates).

/// User model and database operations
pub mod db;

/// HTTP handlers for user endpoints
pub mod handlers;

/// Request types
pub mod types;
