/**
 * Application State Management
 *
 * This module defines the application state structure and implements
 * the necessary `FromRef` traits for Axum state extraction.
 *
 * # Architecture
 *
 * `AppState` is the central state container, holding:
 * - Optional database connection pool
 * - The token service (built once from configuration)
 * - Optional image host client
 * - Whether session cookies are marked `Secure`
 *
 * There is no other shared mutable state; requests only share these
 * handles.
 *
 * # State Extraction
 *
 * The `FromRef` implementations allow handlers to extract specific
 * parts of the state without needing the entire `AppState`.
 */

use axum::extract::FromRef;
use sqlx::PgPool;

use crate::auth::tokens::TokenService;
use crate::error::ApiError;
use crate::images::ImageStore;

/// Application state shared by every request handler
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    ///
    /// `None` when the database is not configured. Handlers go through
    /// `require_db`, which maps the missing pool into the
    /// internal-error category.
    pub db_pool: Option<PgPool>,

    /// Identity token service
    pub tokens: TokenService,

    /// Image host client, `None` when credentials are not configured
    pub images: Option<ImageStore>,

    /// Whether session cookies are marked `Secure`
    pub secure_cookies: bool,
}

impl FromRef<AppState> for Option<PgPool> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.db_pool.clone()
    }
}

impl FromRef<AppState> for TokenService {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.tokens.clone()
    }
}

impl FromRef<AppState> for Option<ImageStore> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.images.clone()
    }
}

/// Resolve the database pool or fail with the internal-error category
pub fn require_db(pool: &Option<PgPool>) -> Result<&PgPool, ApiError> {
    pool.as_ref()
        .ok_or_else(|| ApiError::internal("database not configured"))
}

/// Resolve the image host client or fail with the internal-error category
pub fn require_images(images: &Option<ImageStore>) -> Result<&ImageStore, ApiError> {
    images
        .as_ref()
        .ok_or_else(|| ApiError::internal("image host not configured"))
}
