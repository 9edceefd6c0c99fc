//! Flitter - Social Network Backend
//!
//! Flitter is the JSON REST backend of a small social network: posts,
//! likes, comments, follows, notifications, and cookie-based
//! authentication. Persistence is delegated to PostgreSQL through
//! sqlx; image storage is delegated to a hosted image service.
//!
//! # Module Structure
//!
//! ```
//! src/
//! ├── lib.rs           - Module exports and documentation
//! ├── main.rs          - Server binary entry point
//! ├── server/          - Configuration, state, app assembly
//! ├── routes/          - Route configuration
//! ├── middleware/      - Authentication gate
//! ├── auth/            - Tokens, session cookie, auth endpoints
//! ├── users/           - User records, follow toggle, profiles
//! ├── posts/           - Posts, like toggle, comments, feeds
//! ├── notifications/   - Notification records and inbox endpoints
//! ├── images/          - Hosted image client
//! └── error/           - Error taxonomy and response conversion
//! ```
//!
//! # Request Flow
//!
//! Incoming request → authentication gate (may short-circuit with
//! 401/404/500) → handler → domain `db` module → JSON response. The
//! follow and like toggles flip a relation row inside one transaction
//! and emit a notification on the activating transition only.

/// Authentication: tokens, session cookie, auth endpoints
pub mod auth;

/// Error taxonomy and response conversion
pub mod error;

/// Hosted image client
pub mod images;

/// Request middleware (authentication gate)
pub mod middleware;

/// Notification records and inbox endpoints
pub mod notifications;

/// Posts, like toggle, comments, feeds
pub mod posts;

/// Route configuration
pub mod routes;

/// Server configuration, state, and assembly
pub mod server;

/// User records, follow toggle, profiles
pub mod users;
