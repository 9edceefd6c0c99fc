/**
 * Authentication Middleware
 *
 * This module provides the request gate protecting every
 * authenticated route. It extracts the identity cookie, verifies the
 * token, resolves the identity to a user record, and rejects the
 * request before any business logic runs when any step fails.
 *
 * # Per-request steps
 *
 * 1. Missing `jwt` cookie: 401
 * 2. Invalid or expired token: 401
 * 3. Token identity absent from the store: 404
 * 4. Success: a trimmed `AuthenticatedUser` (no password hash) is
 *    attached to request extensions; handlers receive it explicitly
 *    through the `AuthUser` extractor
 *
 * Unexpected store errors surface as 500; the gate never retries.
 */

use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use axum_extra::extract::CookieJar;
use uuid::Uuid;

use crate::auth::cookies::SESSION_COOKIE;
use crate::error::ApiError;
use crate::server::state::{require_db, AppState};
use crate::users::db::{self, User};

/// Authenticated user data resolved by the gate
#[derive(Clone, Debug)]
pub struct AuthenticatedUser {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub full_name: String,
}

impl From<User> for AuthenticatedUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            full_name: user.full_name,
        }
    }
}

/// Authentication middleware for gated routes
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let jar = CookieJar::from_headers(request.headers());
    let token = jar
        .get(SESSION_COOKIE)
        .map(|cookie| cookie.value().to_string())
        .ok_or_else(|| {
            tracing::warn!("Missing session cookie");
            ApiError::unauthenticated("Unauthorized: no token provided")
        })?;

    let user_id = state.tokens.verify(&token).map_err(|err| {
        tracing::warn!("Token rejected: {err}");
        ApiError::unauthenticated("Unauthorized: invalid token")
    })?;

    let pool = require_db(&state.db_pool)?;
    let user = db::get_user_by_id(pool, user_id)
        .await?
        .ok_or_else(|| {
            tracing::warn!("Token maps to unknown user: {user_id}");
            ApiError::not_found("User not found")
        })?;

    request.extensions_mut().insert(AuthenticatedUser::from(user));

    Ok(next.run(request).await)
}

/// Axum extractor for the authenticated user
///
/// Handlers behind `require_auth` take this as a parameter; the
/// identity is an explicit argument, never an ambient field.
#[derive(Clone, Debug)]
pub struct AuthUser(pub AuthenticatedUser);

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .map(AuthUser)
            .ok_or_else(|| {
                tracing::warn!("AuthenticatedUser not found in request extensions");
                ApiError::unauthenticated("Unauthorized: no token provided")
            })
    }
}
