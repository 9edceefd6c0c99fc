//! Route configuration

/// Router assembly
pub mod router;

/// API route wiring
pub mod api_routes;

pub use router::create_router;
