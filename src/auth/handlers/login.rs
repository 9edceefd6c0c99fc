/**
 * Login Handler
 *
 * This module implements the user authentication handler for
 * POST /api/auth/login.
 *
 * # Authentication Process
 *
 * 1. Look up user by username
 * 2. Verify password using bcrypt
 * 3. Issue a token and set the session cookie
 * 4. Return the public user fields
 *
 * # Security
 *
 * - Unknown username and wrong password answer with the same body, so
 *   the endpoint does not reveal which accounts exist
 * - The password check runs even when the user is unknown
 * - Passwords are never logged or returned in responses
 */

use axum::{extract::State, response::Json};
use axum_extra::extract::CookieJar;
use bcrypt::verify;

use crate::auth::cookies::session_cookie;
use crate::auth::handlers::types::LoginRequest;
use crate::error::ApiError;
use crate::server::state::{require_db, AppState};
use crate::users::db::{self, UserProfile};

/// Login handler
///
/// # Errors
///
/// * `400 Bad Request` - unknown username or wrong password
/// * `500 Internal Server Error` - store or token failure
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(request): Json<LoginRequest>,
) -> Result<(CookieJar, Json<UserProfile>), ApiError> {
    let pool = require_db(&state.db_pool)?;
    tracing::info!("Login request for: {}", request.username);

    let user = db::get_user_by_username(pool, &request.username).await?;

    // Run the comparison against a dummy hash when the user is unknown
    // so both failure paths do comparable work.
    let stored_hash = user
        .as_ref()
        .map(|u| u.password_hash.as_str())
        .unwrap_or(" ");
    let password_ok = verify(&request.password, stored_hash).unwrap_or(false);

    let user = match user {
        Some(user) if password_ok => user,
        _ => {
            tracing::warn!("Failed login for: {}", request.username);
            return Err(ApiError::validation("Internal username or password"));
        }
    };

    let token = state
        .tokens
        .issue(user.id)
        .map_err(|err| ApiError::internal(format!("failed to issue token: {err}")))?;
    let jar = jar.add(session_cookie(token, state.secure_cookies));

    tracing::info!("User logged in successfully: {}", user.username);

    let profile = db::load_profile(pool, user).await?;
    Ok((jar, Json(profile)))
}
