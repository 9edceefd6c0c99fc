//! Database-backed tests for the follow/like toggles and the auth
//! handlers that need a live store
//!
//! Every test here needs a running PostgreSQL server (set
//! `DATABASE_URL`), so they are `#[ignore]`d by default:
//!
//! ```text
//! cargo test -- --ignored
//! ```
//!
//! Tests create uniquely named users instead of truncating tables, so
//! they are safe to run concurrently against one database.

mod common;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum_extra::extract::CookieJar;
use axum::Json;
use pretty_assertions::assert_eq;

use flitter::auth::handlers::types::{LoginRequest, SignupRequest};
use flitter::auth::{login, signup};
use flitter::error::ApiError;
use flitter::middleware::auth::{AuthUser, AuthenticatedUser};
use flitter::notifications::db as notifications_db;
use flitter::notifications::NotificationKind;
use flitter::posts::db as posts_db;
use flitter::posts::handlers::{comment_on_post, like_unlike_post};
use flitter::posts::types::CommentRequest;
use flitter::users::db as users_db;
use flitter::users::handlers::follow_unfollow_user;

use common::auth_helpers::{app_state, create_test_user, unique};
use common::database::TestDatabase;

fn as_auth(user: &users_db::User) -> AuthUser {
    AuthUser(AuthenticatedUser::from(user.clone()))
}

#[tokio::test]
#[ignore = "requires PostgreSQL (set DATABASE_URL)"]
async fn follow_then_unfollow_round_trips() {
    let db = TestDatabase::new().await;
    let pool = db.pool();

    let alice = create_test_user(pool, &unique("alice"), "password123").await;
    let bob = create_test_user(pool, &unique("bob"), "password123").await;

    // Follow.
    assert!(users_db::toggle_follow(pool, alice.id, bob.id).await.unwrap());
    assert_eq!(users_db::following_of(pool, alice.id).await.unwrap(), vec![bob.id]);
    assert_eq!(users_db::followers_of(pool, bob.id).await.unwrap(), vec![alice.id]);

    // Unfollow restores the pre-toggle state on both sides.
    assert!(!users_db::toggle_follow(pool, alice.id, bob.id).await.unwrap());
    assert!(users_db::following_of(pool, alice.id).await.unwrap().is_empty());
    assert!(users_db::followers_of(pool, bob.id).await.unwrap().is_empty());
}

#[tokio::test]
#[ignore = "requires PostgreSQL (set DATABASE_URL)"]
async fn follow_notifies_only_on_activation() {
    let db = TestDatabase::new().await;
    let pool = db.pool();

    let alice = create_test_user(pool, &unique("alice"), "password123").await;
    let bob = create_test_user(pool, &unique("bob"), "password123").await;

    // Activating toggle: one follow notification for bob.
    follow_unfollow_user(State(Some(pool.clone())), as_auth(&alice), Path(bob.id))
        .await
        .unwrap();
    let inbox = notifications_db::list_for_user(pool, bob.id).await.unwrap();
    assert_eq!(inbox.len(), 1);
    assert_eq!(inbox[0].kind, NotificationKind::Follow);
    assert_eq!(inbox[0].from.id, alice.id);
    assert!(!inbox[0].read);

    // Deactivating toggle: no new notification.
    follow_unfollow_user(State(Some(pool.clone())), as_auth(&alice), Path(bob.id))
        .await
        .unwrap();
    let inbox = notifications_db::list_for_user(pool, bob.id).await.unwrap();
    assert_eq!(inbox.len(), 1);

    // The membership did not pick up duplicates along the way.
    assert!(users_db::following_of(pool, alice.id).await.unwrap().is_empty());
}

#[tokio::test]
#[ignore = "requires PostgreSQL (set DATABASE_URL)"]
async fn like_twice_adds_then_removes() {
    let db = TestDatabase::new().await;
    let pool = db.pool();

    let alice = create_test_user(pool, &unique("alice"), "password123").await;
    let bob = create_test_user(pool, &unique("bob"), "password123").await;
    let post = posts_db::create_post(pool, bob.id, Some("hello".to_string()), None)
        .await
        .unwrap();

    // First call: like plus one notification to the author.
    let Json(likes) = like_unlike_post(State(Some(pool.clone())), as_auth(&alice), Path(post.id))
        .await
        .unwrap();
    assert_eq!(likes, vec![alice.id]);
    let inbox = notifications_db::list_for_user(pool, bob.id).await.unwrap();
    assert_eq!(inbox.len(), 1);
    assert_eq!(inbox[0].kind, NotificationKind::Like);

    // Second call: unlike, and no second notification.
    let Json(likes) = like_unlike_post(State(Some(pool.clone())), as_auth(&alice), Path(post.id))
        .await
        .unwrap();
    assert!(likes.is_empty());
    let inbox = notifications_db::list_for_user(pool, bob.id).await.unwrap();
    assert_eq!(inbox.len(), 1);

    assert!(posts_db::list_liked_posts(pool, alice.id).await.unwrap().is_empty());
}

#[tokio::test]
#[ignore = "requires PostgreSQL (set DATABASE_URL)"]
async fn self_follow_is_rejected_regardless_of_state() {
    let db = TestDatabase::new().await;
    let pool = db.pool();

    let alice = create_test_user(pool, &unique("alice"), "password123").await;

    let err = follow_unfollow_user(State(Some(pool.clone())), as_auth(&alice), Path(alice.id))
        .await
        .unwrap_err();
    match err {
        ApiError::Validation(msg) => assert_eq!(msg, "You can't follow/unfollow yourself"),
        other => panic!("expected Validation, got {other:?}"),
    }
}

#[tokio::test]
#[ignore = "requires PostgreSQL (set DATABASE_URL)"]
async fn following_an_absent_user_is_not_found() {
    let db = TestDatabase::new().await;
    let pool = db.pool();

    let alice = create_test_user(pool, &unique("alice"), "password123").await;

    let err = follow_unfollow_user(
        State(Some(pool.clone())),
        as_auth(&alice),
        Path(uuid::Uuid::new_v4()),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, ApiError::NotFound(_)));
}

#[tokio::test]
#[ignore = "requires PostgreSQL (set DATABASE_URL)"]
async fn signup_rejects_short_password() {
    let db = TestDatabase::new().await;
    let state = app_state(db.pool());

    let err = signup(
        State(state),
        CookieJar::default(),
        Json(SignupRequest {
            full_name: "A Person".to_string(),
            username: unique("shorty"),
            email: format!("{}@example.com", unique("shorty")),
            password: "12345".to_string(),
        }),
    )
    .await
    .unwrap_err();
    match err {
        ApiError::Validation(msg) => {
            assert_eq!(msg, "Password must be at least 6 characters long")
        }
        other => panic!("expected Validation, got {other:?}"),
    }
}

#[tokio::test]
#[ignore = "requires PostgreSQL (set DATABASE_URL)"]
async fn signup_rejects_taken_username() {
    let db = TestDatabase::new().await;
    let state = app_state(db.pool());
    let username = unique("taken");

    let request = |email: String| SignupRequest {
        full_name: "A Person".to_string(),
        username: username.clone(),
        email,
        password: "password123".to_string(),
    };

    let (status, _, _) = signup(
        State(state.clone()),
        CookieJar::default(),
        Json(request(format!("{}@example.com", unique("first")))),
    )
    .await
    .unwrap();
    assert_eq!(status, StatusCode::CREATED);

    let err = signup(
        State(state),
        CookieJar::default(),
        Json(request(format!("{}@example.com", unique("second")))),
    )
    .await
    .unwrap_err();
    match err {
        ApiError::Validation(msg) => assert_eq!(msg, "Username is already taken"),
        other => panic!("expected Validation, got {other:?}"),
    }
}

#[tokio::test]
#[ignore = "requires PostgreSQL (set DATABASE_URL)"]
async fn stored_password_is_never_the_plaintext() {
    let db = TestDatabase::new().await;
    let pool = db.pool();
    let state = app_state(pool);
    let username = unique("hasher");

    signup(
        State(state),
        CookieJar::default(),
        Json(SignupRequest {
            full_name: "A Person".to_string(),
            username: username.clone(),
            email: format!("{username}@example.com"),
            password: "password123".to_string(),
        }),
    )
    .await
    .unwrap();

    let stored = users_db::get_user_by_username(pool, &username)
        .await
        .unwrap()
        .unwrap();
    assert_ne!(stored.password_hash, "password123");
    assert!(bcrypt::verify("password123", &stored.password_hash).unwrap());
}

#[tokio::test]
#[ignore = "requires PostgreSQL (set DATABASE_URL)"]
async fn login_rejects_wrong_password() {
    let db = TestDatabase::new().await;
    let pool = db.pool();
    let state = app_state(pool);
    let username = unique("login");

    create_test_user(pool, &username, "password123").await;

    let err = login(
        State(state),
        CookieJar::default(),
        Json(LoginRequest {
            username,
            password: "wrongpassword".to_string(),
        }),
    )
    .await
    .unwrap_err();
    match err {
        ApiError::Validation(msg) => assert_eq!(msg, "Internal username or password"),
        other => panic!("expected Validation, got {other:?}"),
    }
}

#[tokio::test]
#[ignore = "requires PostgreSQL (set DATABASE_URL)"]
async fn comment_requires_text() {
    let db = TestDatabase::new().await;
    let pool = db.pool();

    let alice = create_test_user(pool, &unique("alice"), "password123").await;
    let post = posts_db::create_post(pool, alice.id, Some("hello".to_string()), None)
        .await
        .unwrap();

    let err = comment_on_post(
        State(Some(pool.clone())),
        as_auth(&alice),
        Path(post.id),
        Json(CommentRequest { text: None }),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, ApiError::Validation(_)));

    comment_on_post(
        State(Some(pool.clone())),
        as_auth(&alice),
        Path(post.id),
        Json(CommentRequest {
            text: Some("nice".to_string()),
        }),
    )
    .await
    .unwrap();

    let hydrated = posts_db::hydrate_posts(pool, vec![post]).await.unwrap();
    assert_eq!(hydrated[0].comments.len(), 1);
    assert_eq!(hydrated[0].comments[0].text, "nice");
    assert_eq!(hydrated[0].comments[0].user.id, alice.id);
}
