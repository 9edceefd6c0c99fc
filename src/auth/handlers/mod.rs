//! HTTP handlers for the authentication endpoints

/// Request types
pub mod types;

/// User registration handler
pub mod signup;

/// User authentication handler
pub mod login;

/// Session-clearing handler
pub mod logout;

/// Current-user handler
pub mod me;

pub use login::login;
pub use logout::logout;
pub use me::get_me;
pub use signup::signup;
