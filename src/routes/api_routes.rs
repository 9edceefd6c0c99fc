/**
 * API Route Handlers
 *
 * This module wires every API endpoint to its handler.
 *
 * # Routes
 *
 * ## Authentication (public)
 * - `POST /api/auth/signup` - User registration
 * - `POST /api/auth/login` - User login
 * - `POST /api/auth/logout` - Clear the session cookie
 *
 * ## Gated (behind `middleware::auth::require_auth`)
 * - `GET /api/auth/me` - Current user
 * - `GET /api/users/profile/{username}` - Public profile
 * - `GET /api/users/suggested` - Suggested users
 * - `POST /api/users/follow/{id}` - Follow/unfollow toggle
 * - `POST /api/users/update` - Profile update
 * - `GET /api/posts/all` - All posts
 * - `GET /api/posts/following` - Posts from followed users
 * - `GET /api/posts/likes/{id}` - Posts a user liked
 * - `GET /api/posts/user/{username}` - Posts by a user
 * - `POST /api/posts/create` - Create post
 * - `POST /api/posts/like/{id}` - Like/unlike toggle
 * - `POST /api/posts/comment/{id}` - Comment on post
 * - `DELETE /api/posts/{id}` - Delete own post
 * - `GET /api/notifications` - List (and mark read)
 * - `DELETE /api/notifications` - Clear
 */

use axum::{
    middleware,
    routing::{delete, get, post},
    Router,
};

use crate::auth::{get_me, login, logout, signup};
use crate::middleware::auth::require_auth;
use crate::notifications::handlers::{delete_notifications, get_notifications};
use crate::posts::handlers::{
    comment_on_post, create_post, delete_post, get_all_posts, get_following_posts,
    get_liked_posts, get_user_posts, like_unlike_post,
};
use crate::server::state::AppState;
use crate::users::handlers::{
    follow_unfollow_user, get_suggested_users, get_user_profile, update_profile,
};

/// Configure API routes
///
/// Public authentication routes are merged with the gated routes; the
/// gate runs as a `route_layer` so unknown paths still answer 404
/// instead of 401.
pub fn configure_api_routes(state: AppState) -> Router<AppState> {
    let public = Router::new()
        .route("/api/auth/signup", post(signup))
        .route("/api/auth/login", post(login))
        .route("/api/auth/logout", post(logout));

    let gated = Router::new()
        .route("/api/auth/me", get(get_me))
        // User endpoints
        .route("/api/users/profile/{username}", get(get_user_profile))
        .route("/api/users/suggested", get(get_suggested_users))
        .route("/api/users/follow/{id}", post(follow_unfollow_user))
        .route("/api/users/update", post(update_profile))
        // Post endpoints
        .route("/api/posts/all", get(get_all_posts))
        .route("/api/posts/following", get(get_following_posts))
        .route("/api/posts/likes/{id}", get(get_liked_posts))
        .route("/api/posts/user/{username}", get(get_user_posts))
        .route("/api/posts/create", post(create_post))
        .route("/api/posts/like/{id}", post(like_unlike_post))
        .route("/api/posts/comment/{id}", post(comment_on_post))
        .route("/api/posts/{id}", delete(delete_post))
        // Notification endpoints
        .route(
            "/api/notifications",
            get(get_notifications).delete(delete_notifications),
        )
        .route_layer(middleware::from_fn_with_state(state, require_auth));

    public.merge(gated)
}
