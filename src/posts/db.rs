//! Post model and database operations
//!
//! Posts carry optional text and an optional hosted image URL. Likes
//! live in the `post_likes` relation and comments in the `comments`
//! table; `hydrate_posts` assembles the API view with author and
//! commenter summaries attached.

use chrono::{DateTime, Utc};
use sqlx::{PgPool, Row};
use std::collections::HashMap;
use uuid::Uuid;

use crate::posts::types::{CommentResponse, PostResponse};
use crate::users::db::UserSummary;

/// Post struct representing a post in the database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Post {
    pub id: Uuid,
    pub user_id: Uuid,
    pub text: Option<String>,
    pub img: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

const POST_COLUMNS: &str = "id, user_id, text, img, created_at, updated_at";

/// Create a new post
pub async fn create_post(
    pool: &PgPool,
    user_id: Uuid,
    text: Option<String>,
    img: Option<String>,
) -> Result<Post, sqlx::Error> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    sqlx::query_as::<_, Post>(&format!(
        r#"
        INSERT INTO posts (id, user_id, text, img, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING {POST_COLUMNS}
        "#
    ))
    .bind(id)
    .bind(user_id)
    .bind(text)
    .bind(img)
    .bind(now)
    .bind(now)
    .fetch_one(pool)
    .await
}

/// Get post by ID
pub async fn get_post_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Post>, sqlx::Error> {
    sqlx::query_as::<_, Post>(&format!("SELECT {POST_COLUMNS} FROM posts WHERE id = $1"))
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// Delete a post; comments and likes go with it
pub async fn delete_post(pool: &PgPool, id: Uuid) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM posts WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}

/// All posts, newest first
pub async fn list_all_posts(pool: &PgPool) -> Result<Vec<Post>, sqlx::Error> {
    sqlx::query_as::<_, Post>(&format!(
        "SELECT {POST_COLUMNS} FROM posts ORDER BY created_at DESC"
    ))
    .fetch_all(pool)
    .await
}

/// Posts written by one user, newest first
pub async fn list_posts_by_author(
    pool: &PgPool,
    user_id: Uuid,
) -> Result<Vec<Post>, sqlx::Error> {
    sqlx::query_as::<_, Post>(&format!(
        "SELECT {POST_COLUMNS} FROM posts WHERE user_id = $1 ORDER BY created_at DESC"
    ))
    .bind(user_id)
    .fetch_all(pool)
    .await
}

/// Posts written by any of the given users, newest first
pub async fn list_posts_by_authors(
    pool: &PgPool,
    user_ids: &[Uuid],
) -> Result<Vec<Post>, sqlx::Error> {
    sqlx::query_as::<_, Post>(&format!(
        "SELECT {POST_COLUMNS} FROM posts WHERE user_id = ANY($1) ORDER BY created_at DESC"
    ))
    .bind(user_ids)
    .fetch_all(pool)
    .await
}

/// Posts a user has liked, most recently liked first
pub async fn list_liked_posts(pool: &PgPool, user_id: Uuid) -> Result<Vec<Post>, sqlx::Error> {
    sqlx::query_as::<_, Post>(
        r#"
        SELECT p.id, p.user_id, p.text, p.img, p.created_at, p.updated_at
        FROM posts p
        JOIN post_likes l ON l.post_id = p.id
        WHERE l.user_id = $1
        ORDER BY l.created_at DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
}

/// Flip the like relation between a user and a post
///
/// The membership check and the row mutation run in one transaction;
/// the post's like set and the user's liked-posts set are the same
/// relation, so they cannot diverge. Returns whether the toggle
/// activated plus the post's updated list of liker ids.
pub async fn toggle_like(
    pool: &PgPool,
    user_id: Uuid,
    post_id: Uuid,
) -> Result<(bool, Vec<Uuid>), sqlx::Error> {
    let mut tx = pool.begin().await?;

    let active: bool = sqlx::query_scalar(
        "SELECT EXISTS(SELECT 1 FROM post_likes WHERE post_id = $1 AND user_id = $2)",
    )
    .bind(post_id)
    .bind(user_id)
    .fetch_one(&mut *tx)
    .await?;

    if active {
        sqlx::query("DELETE FROM post_likes WHERE post_id = $1 AND user_id = $2")
            .bind(post_id)
            .bind(user_id)
            .execute(&mut *tx)
            .await?;
    } else {
        sqlx::query(
            r#"
            INSERT INTO post_likes (post_id, user_id, created_at)
            VALUES ($1, $2, $3)
            ON CONFLICT DO NOTHING
            "#,
        )
        .bind(post_id)
        .bind(user_id)
        .bind(Utc::now())
        .execute(&mut *tx)
        .await?;
    }

    let likes: Vec<Uuid> =
        sqlx::query_scalar("SELECT user_id FROM post_likes WHERE post_id = $1 ORDER BY created_at ASC")
            .bind(post_id)
            .fetch_all(&mut *tx)
            .await?;

    tx.commit().await?;

    Ok((!active, likes))
}

/// Append a comment to a post
pub async fn add_comment(
    pool: &PgPool,
    post_id: Uuid,
    user_id: Uuid,
    text: &str,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO comments (id, post_id, user_id, text, created_at)
        VALUES ($1, $2, $3, $4, $5)
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(post_id)
    .bind(user_id)
    .bind(text)
    .bind(Utc::now())
    .execute(pool)
    .await?;
    Ok(())
}

/// Attach author summaries, comments, and liker ids to a batch of posts
///
/// Passwords never leave the store: only summary columns are selected
/// for authors and commenters.
pub async fn hydrate_posts(
    pool: &PgPool,
    posts: Vec<Post>,
) -> Result<Vec<PostResponse>, sqlx::Error> {
    if posts.is_empty() {
        return Ok(Vec::new());
    }

    let post_ids: Vec<Uuid> = posts.iter().map(|p| p.id).collect();

    let comment_rows = sqlx::query(
        r#"
        SELECT id, post_id, user_id, text, created_at
        FROM comments
        WHERE post_id = ANY($1)
        ORDER BY created_at ASC
        "#,
    )
    .bind(&post_ids)
    .fetch_all(pool)
    .await?;

    let like_rows = sqlx::query(
        "SELECT post_id, user_id FROM post_likes WHERE post_id = ANY($1) ORDER BY created_at ASC",
    )
    .bind(&post_ids)
    .fetch_all(pool)
    .await?;

    // Authors and commenters in one lookup.
    let mut user_ids: Vec<Uuid> = posts.iter().map(|p| p.user_id).collect();
    user_ids.extend(comment_rows.iter().map(|row| row.get::<Uuid, _>("user_id")));
    user_ids.sort();
    user_ids.dedup();

    let users: HashMap<Uuid, UserSummary> = sqlx::query_as::<_, UserSummary>(
        "SELECT id, username, full_name, profile_img FROM users WHERE id = ANY($1)",
    )
    .bind(&user_ids)
    .fetch_all(pool)
    .await?
    .into_iter()
    .map(|u| (u.id, u))
    .collect();

    let mut comments_by_post: HashMap<Uuid, Vec<CommentResponse>> = HashMap::new();
    for row in comment_rows {
        let Some(user) = users.get(&row.get::<Uuid, _>("user_id")).cloned() else {
            continue;
        };
        comments_by_post
            .entry(row.get("post_id"))
            .or_default()
            .push(CommentResponse {
                id: row.get("id"),
                user,
                text: row.get("text"),
                created_at: row.get("created_at"),
            });
    }

    let mut likes_by_post: HashMap<Uuid, Vec<Uuid>> = HashMap::new();
    for row in like_rows {
        likes_by_post
            .entry(row.get("post_id"))
            .or_default()
            .push(row.get("user_id"));
    }

    Ok(posts
        .into_iter()
        .filter_map(|post| {
            let user = users.get(&post.user_id).cloned()?;
            Some(PostResponse {
                id: post.id,
                user,
                text: post.text,
                img: post.img,
                likes: likes_by_post.remove(&post.id).unwrap_or_default(),
                comments: comments_by_post.remove(&post.id).unwrap_or_default(),
                created_at: post.created_at,
            })
        })
        .collect())
}
