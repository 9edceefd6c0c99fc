//! User model and database operations
//!
//! Holds the `users` table model, the follow relation, and the random
//! candidate sample behind suggested users. Follower and following
//! views are projections of the `follows` relation, so the two sides of
//! a follow can never disagree.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::PgPool;
use uuid::Uuid;

/// User struct representing a user in the database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    /// Unique user ID (UUID)
    pub id: Uuid,
    /// Username (unique)
    pub username: String,
    /// User email address (unique)
    pub email: String,
    /// Hashed password (bcrypt)
    pub password_hash: String,
    /// Display name
    pub full_name: String,
    /// Profile bio
    pub bio: Option<String>,
    /// Profile link
    pub link: Option<String>,
    /// Hosted profile image URL
    pub profile_img: Option<String>,
    /// Hosted cover image URL
    pub cover_img: Option<String>,
    /// Created at timestamp
    pub created_at: DateTime<Utc>,
    /// Updated at timestamp
    pub updated_at: DateTime<Utc>,
}

/// Public user view (no password hash), as returned by the API
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub full_name: String,
    pub bio: Option<String>,
    pub link: Option<String>,
    pub profile_img: Option<String>,
    pub cover_img: Option<String>,
    pub followers: Vec<Uuid>,
    pub following: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
}

/// Compact user view embedded in posts, comments, and notifications
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub id: Uuid,
    pub username: String,
    pub full_name: String,
    pub profile_img: Option<String>,
}

impl User {
    /// Public view of this user with the given membership sets
    pub fn into_profile(self, followers: Vec<Uuid>, following: Vec<Uuid>) -> UserProfile {
        UserProfile {
            id: self.id,
            username: self.username,
            email: self.email,
            full_name: self.full_name,
            bio: self.bio,
            link: self.link,
            profile_img: self.profile_img,
            cover_img: self.cover_img,
            followers,
            following,
            created_at: self.created_at,
        }
    }
}

const USER_COLUMNS: &str = "id, username, email, password_hash, full_name, bio, link, profile_img, cover_img, created_at, updated_at";

/// Create a new user
pub async fn create_user(
    pool: &PgPool,
    username: &str,
    email: &str,
    password_hash: &str,
    full_name: &str,
) -> Result<User, sqlx::Error> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    let user = sqlx::query_as::<_, User>(&format!(
        r#"
        INSERT INTO users (id, username, email, password_hash, full_name, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING {USER_COLUMNS}
        "#
    ))
    .bind(id)
    .bind(username)
    .bind(email)
    .bind(password_hash)
    .bind(full_name)
    .bind(now)
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(user)
}

/// Get user by ID
pub async fn get_user_by_id(pool: &PgPool, id: Uuid) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1"))
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// Get user by username
pub async fn get_user_by_username(
    pool: &PgPool,
    username: &str,
) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(&format!(
        "SELECT {USER_COLUMNS} FROM users WHERE username = $1"
    ))
    .bind(username)
    .fetch_optional(pool)
    .await
}

/// Get user by email
pub async fn get_user_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users WHERE email = $1"))
        .bind(email)
        .fetch_optional(pool)
        .await
}

/// Persist every mutable field of a user record
pub async fn update_user(pool: &PgPool, user: &User) -> Result<User, sqlx::Error> {
    let now = Utc::now();

    let user = sqlx::query_as::<_, User>(&format!(
        r#"
        UPDATE users
        SET username = $1, email = $2, password_hash = $3, full_name = $4,
            bio = $5, link = $6, profile_img = $7, cover_img = $8, updated_at = $9
        WHERE id = $10
        RETURNING {USER_COLUMNS}
        "#
    ))
    .bind(&user.username)
    .bind(&user.email)
    .bind(&user.password_hash)
    .bind(&user.full_name)
    .bind(&user.bio)
    .bind(&user.link)
    .bind(&user.profile_img)
    .bind(&user.cover_img)
    .bind(now)
    .bind(user.id)
    .fetch_one(pool)
    .await?;

    Ok(user)
}

/// Ids of users following `user_id`
pub async fn followers_of(pool: &PgPool, user_id: Uuid) -> Result<Vec<Uuid>, sqlx::Error> {
    sqlx::query_scalar(
        "SELECT follower_id FROM follows WHERE followed_id = $1 ORDER BY created_at ASC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
}

/// Ids of users `user_id` follows
pub async fn following_of(pool: &PgPool, user_id: Uuid) -> Result<Vec<Uuid>, sqlx::Error> {
    sqlx::query_scalar(
        "SELECT followed_id FROM follows WHERE follower_id = $1 ORDER BY created_at ASC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
}

/// Load a user's public profile, including both membership views
pub async fn load_profile(pool: &PgPool, user: User) -> Result<UserProfile, sqlx::Error> {
    let followers = followers_of(pool, user.id).await?;
    let following = following_of(pool, user.id).await?;
    Ok(user.into_profile(followers, following))
}

/// Flip the follow relation between two users
///
/// The membership check and the row mutation run in one transaction, so
/// the follower's view and the followed user's view always move
/// together. Returns `true` when the toggle activated (a follow was
/// created), `false` when it deactivated.
pub async fn toggle_follow(
    pool: &PgPool,
    follower_id: Uuid,
    followed_id: Uuid,
) -> Result<bool, sqlx::Error> {
    let mut tx = pool.begin().await?;

    let active: bool = sqlx::query_scalar(
        "SELECT EXISTS(SELECT 1 FROM follows WHERE follower_id = $1 AND followed_id = $2)",
    )
    .bind(follower_id)
    .bind(followed_id)
    .fetch_one(&mut *tx)
    .await?;

    if active {
        sqlx::query("DELETE FROM follows WHERE follower_id = $1 AND followed_id = $2")
            .bind(follower_id)
            .bind(followed_id)
            .execute(&mut *tx)
            .await?;
    } else {
        sqlx::query(
            r#"
            INSERT INTO follows (follower_id, followed_id, created_at)
            VALUES ($1, $2, $3)
            ON CONFLICT DO NOTHING
            "#,
        )
        .bind(follower_id)
        .bind(followed_id)
        .bind(Utc::now())
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;

    Ok(!active)
}

/// Random sample of candidate users, excluding one user
pub async fn sample_candidates(
    pool: &PgPool,
    exclude: Uuid,
    limit: i64,
) -> Result<Vec<UserSummary>, sqlx::Error> {
    sqlx::query_as::<_, UserSummary>(
        r#"
        SELECT id, username, full_name, profile_img
        FROM users
        WHERE id <> $1
        ORDER BY RANDOM()
        LIMIT $2
        "#,
    )
    .bind(exclude)
    .bind(limit)
    .fetch_all(pool)
    .await
}
