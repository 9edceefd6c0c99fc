//! Request and response types for the post endpoints
//!
//! Field names follow the frontend contract (camelCase).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::users::db::UserSummary;

/// Create post request: at least one of text and img is required
#[derive(Debug, Deserialize)]
pub struct CreatePostRequest {
    pub text: Option<String>,
    /// Image payload as a data URI, uploaded to the image host
    pub img: Option<String>,
}

/// Comment request
#[derive(Debug, Deserialize)]
pub struct CommentRequest {
    pub text: Option<String>,
}

/// A post as returned by the API, with author and commenters populated
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostResponse {
    pub id: Uuid,
    pub user: UserSummary,
    pub text: Option<String>,
    pub img: Option<String>,
    pub likes: Vec<Uuid>,
    pub comments: Vec<CommentResponse>,
    pub created_at: DateTime<Utc>,
}

/// A comment with its author populated
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentResponse {
    pub id: Uuid,
    pub user: UserSummary,
    pub text: String,
    pub created_at: DateTime<Utc>,
}
