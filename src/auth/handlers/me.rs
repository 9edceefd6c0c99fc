/**
 * Get Current User Handler
 *
 * GET /api/auth/me returns the authenticated user's public profile,
 * including both membership views. The gate has already verified the
 * token and resolved the identity; this handler only loads the fresh
 * record.
 */

use axum::{extract::State, response::Json};
use sqlx::PgPool;

use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::server::state::require_db;
use crate::users::db::{self, UserProfile};

/// Get current user handler
///
/// # Errors
///
/// * `404 Not Found` - the user record disappeared since the gate ran
/// * `500 Internal Server Error` - store failure
pub async fn get_me(
    State(pool): State<Option<PgPool>>,
    AuthUser(user): AuthUser,
) -> Result<Json<UserProfile>, ApiError> {
    let pool = require_db(&pool)?;

    let record = db::get_user_by_id(pool, user.id)
        .await?
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    let profile = db::load_profile(pool, record).await?;
    Ok(Json(profile))
}
