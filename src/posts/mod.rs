//! Posts Module
//!
//! Post records, the like relation, comments, and the post endpoints
//! (create/delete, like toggle, comments, feeds).

/// Post model and database operations
pub mod db;

/// HTTP handlers for post endpoints
pub mod handlers;

/// Request and response types
pub mod types;
