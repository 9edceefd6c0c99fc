//! Notification model and database operations
//!
//! A notification is written whenever a follow or like toggle moves
//! into the active state; deactivation writes nothing. There is no
//! de-duplication and no delivery protocol beyond the read flag.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::users::db::UserSummary;

/// What triggered a notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Follow,
    Like,
    Comment,
}

impl NotificationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationKind::Follow => "follow",
            NotificationKind::Like => "like",
            NotificationKind::Comment => "comment",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "follow" => Some(NotificationKind::Follow),
            "like" => Some(NotificationKind::Like),
            "comment" => Some(NotificationKind::Comment),
            _ => None,
        }
    }
}

/// A notification with its sender populated
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationResponse {
    pub id: Uuid,
    pub from: UserSummary,
    pub to: Uuid,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

/// Persist a notification record
pub async fn create(
    pool: &PgPool,
    from_user_id: Uuid,
    to_user_id: Uuid,
    kind: NotificationKind,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO notifications (id, from_user_id, to_user_id, kind, read, created_at)
        VALUES ($1, $2, $3, $4, FALSE, $5)
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(from_user_id)
    .bind(to_user_id)
    .bind(kind.as_str())
    .bind(Utc::now())
    .execute(pool)
    .await?;
    Ok(())
}

/// Notifications addressed to a user, newest first, sender populated
pub async fn list_for_user(
    pool: &PgPool,
    user_id: Uuid,
) -> Result<Vec<NotificationResponse>, sqlx::Error> {
    let rows = sqlx::query(
        r#"
        SELECT n.id, n.from_user_id, n.to_user_id, n.kind, n.read, n.created_at,
               u.username AS from_username, u.full_name AS from_full_name,
               u.profile_img AS from_profile_img
        FROM notifications n
        JOIN users u ON u.id = n.from_user_id
        WHERE n.to_user_id = $1
        ORDER BY n.created_at DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(|row| NotificationResponse {
            id: row.get("id"),
            from: UserSummary {
                id: row.get("from_user_id"),
                username: row.get("from_username"),
                full_name: row.get("from_full_name"),
                profile_img: row.get("from_profile_img"),
            },
            to: row.get("to_user_id"),
            kind: NotificationKind::from_str(row.get::<String, _>("kind").as_str())
                .unwrap_or(NotificationKind::Like),
            read: row.get("read"),
            created_at: row.get("created_at"),
        })
        .collect())
}

/// Mark every notification addressed to a user as read
pub async fn mark_all_read(pool: &PgPool, user_id: Uuid) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE notifications SET read = TRUE WHERE to_user_id = $1")
        .bind(user_id)
        .execute(pool)
        .await?;
    Ok(())
}

/// Delete every notification addressed to a user
pub async fn delete_all_for_user(pool: &PgPool, user_id: Uuid) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM notifications WHERE to_user_id = $1")
        .bind(user_id)
        .execute(pool)
        .await?;
    Ok(())
}
