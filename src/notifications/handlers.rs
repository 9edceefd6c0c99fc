/**
 * Notification Endpoint Handlers
 *
 * Reading the inbox marks everything in it as read; the delete
 * endpoint clears it. Both routes sit behind the authentication gate.
 */

use axum::{extract::State, response::Json};
use serde_json::{json, Value};
use sqlx::PgPool;

use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::notifications::db::{self, NotificationResponse};
use crate::server::state::require_db;

/// GET /api/notifications
pub async fn get_notifications(
    State(pool): State<Option<PgPool>>,
    AuthUser(user): AuthUser,
) -> Result<Json<Vec<NotificationResponse>>, ApiError> {
    let pool = require_db(&pool)?;

    let notifications = db::list_for_user(pool, user.id).await?;
    db::mark_all_read(pool, user.id).await?;

    Ok(Json(notifications))
}

/// DELETE /api/notifications
pub async fn delete_notifications(
    State(pool): State<Option<PgPool>>,
    AuthUser(user): AuthUser,
) -> Result<Json<Value>, ApiError> {
    let pool = require_db(&pool)?;

    db::delete_all_for_user(pool, user.id).await?;

    Ok(Json(json!({ "message": "Notifications deleted successfully" })))
}
