//! Authentication Module
//!
//! This module handles user authentication, registration, and session
//! management.
//!
//! # Module Structure
//!
//! ```
//! auth/
//! ├── mod.rs          - Module exports and documentation
//! ├── tokens.rs       - Identity token issue/verify
//! ├── cookies.rs      - Session cookie shaping
//! └── handlers/       - HTTP handlers
//!     ├── mod.rs      - Handler exports
//!     ├── types.rs    - Request types
//!     ├── signup.rs   - User registration handler
//!     ├── login.rs    - User authentication handler
//!     ├── logout.rs   - Session-clearing handler
//!     └── me.rs       - Current-user handler
//! ```
//!
//! # Authentication Flow
//!
//! 1. **Signup**: user created, token issued, session cookie set
//! 2. **Login**: credentials verified, token issued, session cookie set
//! 3. **Gated request**: cookie verified by `middleware::auth`, user
//!    resolved and handed to the handler
//! 4. **Logout**: session cookie cleared
//!
//! # Security
//!
//! - Passwords are hashed using bcrypt before storage
//! - Tokens are signed, stateless, and expire after 15 days
//! - The cookie is HTTP-only and same-site restricted

/// Identity token issue and verification
pub mod tokens;

/// Session cookie shaping
pub mod cookies;

/// HTTP handlers for authentication endpoints
pub mod handlers;

// Re-export commonly used types and handlers
pub use handlers::types::{LoginRequest, SignupRequest};
pub use handlers::{get_me, login, logout, signup};
pub use tokens::{TokenError, TokenService};
