//! Notifications Module
//!
//! Notification records written by the follow and like toggles, plus
//! the inbox endpoints.

/// Notification model and database operations
pub mod db;

/// HTTP handlers for notification endpoints
pub mod handlers;

pub use db::NotificationKind;
