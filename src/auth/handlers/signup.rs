/**
 * Signup Handler
 *
 * This module implements the user registration handler for
 * POST /api/auth/signup.
 *
 * # Registration Process
 *
 * 1. Validate email format
 * 2. Check username and email uniqueness
 * 3. Validate password length
 * 4. Hash password using bcrypt
 * 5. Create user in database
 * 6. Issue a token and set the session cookie
 * 7. Return the public user fields with 201
 *
 * # Security
 *
 * - Passwords are hashed using bcrypt with DEFAULT_COST
 * - Passwords are never returned in responses
 * - The token travels only in the HTTP-only session cookie
 */

use axum::{extract::State, http::StatusCode, response::Json};
use axum_extra::extract::CookieJar;
use bcrypt::{hash, DEFAULT_COST};
use regex::Regex;
use std::sync::OnceLock;

use crate::auth::cookies::session_cookie;
use crate::auth::handlers::types::SignupRequest;
use crate::error::ApiError;
use crate::server::state::{require_db, AppState};
use crate::users::db::{self, UserProfile};

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

/// Basic email shape check: something@something.something, no spaces
fn is_valid_email(email: &str) -> bool {
    EMAIL_RE
        .get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap())
        .is_match(email)
}

/// Sign up handler
///
/// # Errors
///
/// * `400 Bad Request` - invalid email format, taken username or email,
///   or password shorter than 6 characters
/// * `500 Internal Server Error` - store, hashing, or token failure
pub async fn signup(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(request): Json<SignupRequest>,
) -> Result<(StatusCode, CookieJar, Json<UserProfile>), ApiError> {
    let pool = require_db(&state.db_pool)?;
    tracing::info!(
        "Signup request for username: {}, email: {}",
        request.username,
        request.email
    );

    if !is_valid_email(&request.email) {
        tracing::warn!("Invalid email format: {}", request.email);
        return Err(ApiError::validation("Invalid email format"));
    }

    if db::get_user_by_username(pool, &request.username)
        .await?
        .is_some()
    {
        tracing::warn!("Username already exists: {}", request.username);
        return Err(ApiError::validation("Username is already taken"));
    }

    if db::get_user_by_email(pool, &request.email).await?.is_some() {
        tracing::warn!("Email already exists: {}", request.email);
        return Err(ApiError::validation("Email is already taken"));
    }

    if request.password.chars().count() < 6 {
        tracing::warn!("Password too short");
        return Err(ApiError::validation(
            "Password must be at least 6 characters long",
        ));
    }

    let password_hash = hash(&request.password, DEFAULT_COST)
        .map_err(|err| ApiError::internal(format!("failed to hash password: {err}")))?;

    let user = db::create_user(
        pool,
        &request.username,
        &request.email,
        &password_hash,
        &request.full_name,
    )
    .await?;

    let token = state
        .tokens
        .issue(user.id)
        .map_err(|err| ApiError::internal(format!("failed to issue token: {err}")))?;
    let jar = jar.add(session_cookie(token, state.secure_cookies));

    tracing::info!("User created successfully: {} ({})", user.username, user.email);

    // A new user has no followers and follows nobody.
    let profile = user.into_profile(Vec::new(), Vec::new());
    Ok((StatusCode::CREATED, jar, Json(profile)))
}
