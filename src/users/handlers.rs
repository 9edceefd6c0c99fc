/**
 * User Endpoint Handlers
 *
 * Profile lookup, the follow/unfollow toggle, suggested users, and
 * profile updates. Every route here sits behind the authentication
 * gate.
 */

use axum::{
    extract::{Path, State},
    response::Json,
};
use bcrypt::{hash, verify, DEFAULT_COST};
use serde_json::{json, Value};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::notifications::db::{self as notifications_db, NotificationKind};
use crate::server::state::{require_db, require_images, AppState};
use crate::users::db::{self, UserProfile, UserSummary};
use crate::users::types::UpdateProfileRequest;

/// How many random candidates the suggestion pass draws
const SUGGESTION_SAMPLE_SIZE: i64 = 10;

/// How many suggestions are returned
const SUGGESTION_COUNT: usize = 4;

/// GET /api/users/profile/{username}
pub async fn get_user_profile(
    State(pool): State<Option<PgPool>>,
    Path(username): Path<String>,
) -> Result<Json<UserProfile>, ApiError> {
    let pool = require_db(&pool)?;

    let user = db::get_user_by_username(pool, &username)
        .await?
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    let profile = db::load_profile(pool, user).await?;
    Ok(Json(profile))
}

/// POST /api/users/follow/{id}
///
/// Strict toggle: follows when inactive, unfollows when active. The
/// first transition into the active state emits one `follow`
/// notification; unfollowing emits nothing. Following yourself is
/// rejected regardless of current state.
pub async fn follow_unfollow_user(
    State(pool): State<Option<PgPool>>,
    AuthUser(user): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, ApiError> {
    let pool = require_db(&pool)?;

    if id == user.id {
        return Err(ApiError::validation("You can't follow/unfollow yourself"));
    }

    let target = db::get_user_by_id(pool, id)
        .await?
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    let now_following = db::toggle_follow(pool, user.id, target.id).await?;

    if now_following {
        // Emitted after the toggle committed; a failure here surfaces
        // as an internal error without undoing the follow.
        notifications_db::create(pool, user.id, target.id, NotificationKind::Follow).await?;
        tracing::info!("{} followed {}", user.username, target.username);
        Ok(Json(json!({ "message": "User followed successfully" })))
    } else {
        tracing::info!("{} unfollowed {}", user.username, target.username);
        Ok(Json(json!({ "message": "User unfollowed successfully" })))
    }
}

/// Drop already-followed users from the sample and truncate
fn filter_suggestions(candidates: Vec<UserSummary>, following: &[Uuid]) -> Vec<UserSummary> {
    candidates
        .into_iter()
        .filter(|candidate| !following.contains(&candidate.id))
        .take(SUGGESTION_COUNT)
        .collect()
}

/// GET /api/users/suggested
pub async fn get_suggested_users(
    State(pool): State<Option<PgPool>>,
    AuthUser(user): AuthUser,
) -> Result<Json<Vec<UserSummary>>, ApiError> {
    let pool = require_db(&pool)?;

    let following = db::following_of(pool, user.id).await?;
    let candidates = db::sample_candidates(pool, user.id, SUGGESTION_SAMPLE_SIZE).await?;

    Ok(Json(filter_suggestions(candidates, &following)))
}

/// POST /api/users/update
pub async fn update_profile(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(request): Json<UpdateProfileRequest>,
) -> Result<Json<UserProfile>, ApiError> {
    let pool = require_db(&state.db_pool)?;

    // Untouched form fields arrive as empty strings; treat them as
    // absent so they never overwrite stored values.
    let request = request.normalized();

    let mut record = db::get_user_by_id(pool, user.id)
        .await?
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    match (&request.current_password, &request.new_password) {
        (Some(_), None) | (None, Some(_)) => {
            return Err(ApiError::validation(
                "Please provide both current password and new password",
            ));
        }
        (Some(current), Some(new)) => {
            if !verify(current, &record.password_hash).unwrap_or(false) {
                return Err(ApiError::validation("Current password is incorrect"));
            }
            if new.chars().count() < 6 {
                return Err(ApiError::validation(
                    "Password must be at least 6 characters long",
                ));
            }
            record.password_hash = hash(new, DEFAULT_COST)
                .map_err(|err| ApiError::internal(format!("failed to hash password: {err}")))?;
        }
        (None, None) => {}
    }

    if let Some(img) = &request.profile_img {
        let images = require_images(&state.images)?;
        if let Some(old) = &record.profile_img {
            images.destroy(old).await?;
        }
        record.profile_img = Some(images.upload(img).await?);
    }

    if let Some(img) = &request.cover_img {
        let images = require_images(&state.images)?;
        if let Some(old) = &record.cover_img {
            images.destroy(old).await?;
        }
        record.cover_img = Some(images.upload(img).await?);
    }

    if let Some(full_name) = request.full_name {
        record.full_name = full_name;
    }
    if let Some(email) = request.email {
        record.email = email;
    }
    if let Some(username) = request.username {
        record.username = username;
    }
    if let Some(bio) = request.bio {
        record.bio = Some(bio);
    }
    if let Some(link) = request.link {
        record.link = Some(link);
    }

    let updated = db::update_user(pool, &record).await?;
    tracing::info!("Profile updated: {}", updated.username);

    let profile = db::load_profile(pool, updated).await?;
    Ok(Json(profile))
}
