/**
 * Post Endpoint Handlers
 *
 * Post creation and deletion, the like/unlike toggle, comments, and
 * the feed queries. Every route here sits behind the authentication
 * gate.
 *
 * # Responses
 *
 * Post lists are returned hydrated: author and commenter summaries are
 * populated and the like set is a list of user ids. The password hash
 * never appears in any response.
 */

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use serde_json::{json, Value};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::notifications::db::{self as notifications_db, NotificationKind};
use crate::posts::db;
use crate::posts::types::{CommentRequest, CreatePostRequest, PostResponse};
use crate::server::state::{require_db, require_images, AppState};
use crate::users::db as users_db;

/// Load one post as its hydrated API view
async fn hydrated_post(pool: &PgPool, post: db::Post) -> Result<PostResponse, ApiError> {
    db::hydrate_posts(pool, vec![post])
        .await?
        .pop()
        .ok_or_else(|| ApiError::internal("post author vanished during hydration"))
}

/// POST /api/posts/create
pub async fn create_post(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(request): Json<CreatePostRequest>,
) -> Result<(StatusCode, Json<PostResponse>), ApiError> {
    let pool = require_db(&state.db_pool)?;

    if users_db::get_user_by_id(pool, user.id).await?.is_none() {
        return Err(ApiError::not_found("User not found"));
    }

    // Blank strings count as absent.
    let text = request.text.filter(|t| !t.is_empty());
    let img = request.img.filter(|i| !i.is_empty());

    if text.is_none() && img.is_none() {
        return Err(ApiError::validation("Post must have text or image"));
    }

    let img_url = match img {
        Some(data) => Some(require_images(&state.images)?.upload(&data).await?),
        None => None,
    };

    let post = db::create_post(pool, user.id, text, img_url).await?;
    tracing::info!("Post created by {}: {}", user.username, post.id);

    let response = hydrated_post(pool, post).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// DELETE /api/posts/{id}
pub async fn delete_post(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, ApiError> {
    let pool = require_db(&state.db_pool)?;

    let post = db::get_post_by_id(pool, id)
        .await?
        .ok_or_else(|| ApiError::not_found("Post not found"))?;

    if post.user_id != user.id {
        return Err(ApiError::forbidden(
            "You are not authorized to delete this post",
        ));
    }

    if let Some(img) = &post.img {
        if let Some(images) = &state.images {
            images.destroy(img).await?;
        }
    }

    db::delete_post(pool, id).await?;
    tracing::info!("Post deleted by {}: {}", user.username, id);

    Ok(Json(json!({ "message": "Post deleted successfully" })))
}

/// POST /api/posts/comment/{id}
pub async fn comment_on_post(
    State(pool): State<Option<PgPool>>,
    AuthUser(user): AuthUser,
    Path(id): Path<Uuid>,
    Json(request): Json<CommentRequest>,
) -> Result<Json<PostResponse>, ApiError> {
    let pool = require_db(&pool)?;

    let text = request
        .text
        .filter(|t| !t.is_empty())
        .ok_or_else(|| ApiError::validation("Text field is required"))?;

    let post = db::get_post_by_id(pool, id)
        .await?
        .ok_or_else(|| ApiError::not_found("Post not found"))?;

    db::add_comment(pool, post.id, user.id, &text).await?;

    let response = hydrated_post(pool, post).await?;
    Ok(Json(response))
}

/// POST /api/posts/like/{id}
///
/// Strict toggle: likes when inactive, unlikes when active, answering
/// with the post's updated list of liker ids. The first transition into
/// the active state emits one `like` notification to the post author;
/// unliking emits nothing.
pub async fn like_unlike_post(
    State(pool): State<Option<PgPool>>,
    AuthUser(user): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<Uuid>>, ApiError> {
    let pool = require_db(&pool)?;

    let post = db::get_post_by_id(pool, id)
        .await?
        .ok_or_else(|| ApiError::not_found("Post not found"))?;

    let (now_liked, likes) = db::toggle_like(pool, user.id, post.id).await?;

    if now_liked {
        // Emitted after the toggle committed; a failure here surfaces
        // as an internal error without undoing the like.
        notifications_db::create(pool, user.id, post.user_id, NotificationKind::Like).await?;
    }

    Ok(Json(likes))
}

/// GET /api/posts/all
pub async fn get_all_posts(
    State(pool): State<Option<PgPool>>,
    AuthUser(_user): AuthUser,
) -> Result<Json<Vec<PostResponse>>, ApiError> {
    let pool = require_db(&pool)?;

    let posts = db::list_all_posts(pool).await?;
    Ok(Json(db::hydrate_posts(pool, posts).await?))
}

/// GET /api/posts/following
pub async fn get_following_posts(
    State(pool): State<Option<PgPool>>,
    AuthUser(user): AuthUser,
) -> Result<Json<Vec<PostResponse>>, ApiError> {
    let pool = require_db(&pool)?;

    let following = users_db::following_of(pool, user.id).await?;
    let posts = db::list_posts_by_authors(pool, &following).await?;
    Ok(Json(db::hydrate_posts(pool, posts).await?))
}

/// GET /api/posts/likes/{id}
pub async fn get_liked_posts(
    State(pool): State<Option<PgPool>>,
    AuthUser(_user): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<PostResponse>>, ApiError> {
    let pool = require_db(&pool)?;

    if users_db::get_user_by_id(pool, id).await?.is_none() {
        return Err(ApiError::not_found("User not found"));
    }

    let posts = db::list_liked_posts(pool, id).await?;
    Ok(Json(db::hydrate_posts(pool, posts).await?))
}

/// GET /api/posts/user/{username}
pub async fn get_user_posts(
    State(pool): State<Option<PgPool>>,
    AuthUser(_user): AuthUser,
    Path(username): Path<String>,
) -> Result<Json<Vec<PostResponse>>, ApiError> {
    let pool = require_db(&pool)?;

    let author = users_db::get_user_by_username(pool, &username)
        .await?
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    let posts = db::list_posts_by_author(pool, author.id).await?;
    Ok(Json(db::hydrate_posts(pool, posts).await?))
}
