//! HTTP-level tests for the authentication gate and the auth endpoints
//!
//! These run against an app built without a database, which is enough
//! to prove the gate short-circuits before any business logic and that
//! request validation fires in order.

mod common;

use axum::http::{header, HeaderValue, StatusCode};
use axum_test::TestServer;
use flitter::auth::tokens::TokenService;
use flitter::server::init::create_app;
use serde_json::{json, Value};
use uuid::Uuid;

use common::auth_helpers::{offline_config, TEST_JWT_SECRET};

async fn test_server() -> TestServer {
    TestServer::new(create_app(offline_config()).await).unwrap()
}

#[tokio::test]
async fn me_without_cookie_is_unauthorized() {
    let server = test_server().await;

    let response = server.get("/api/auth/me").await;

    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
    let body: Value = response.json();
    assert_eq!(body["error"], "Unauthorized: no token provided");
}

#[tokio::test]
async fn gated_endpoints_reject_missing_cookie() {
    let server = test_server().await;

    for path in [
        "/api/users/suggested",
        "/api/posts/all",
        "/api/posts/following",
        "/api/notifications",
    ] {
        let response = server.get(path).await;
        assert_eq!(
            response.status_code(),
            StatusCode::UNAUTHORIZED,
            "GET {path} should be gated"
        );
    }

    let response = server
        .post(&format!("/api/users/follow/{}", Uuid::new_v4()))
        .await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);

    let response = server
        .post("/api/posts/create")
        .json(&json!({ "text": "hello" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn garbage_cookie_is_rejected() {
    let server = test_server().await;

    let response = server
        .get("/api/auth/me")
        .add_header(header::COOKIE, HeaderValue::from_static("jwt=garbage"))
        .await;

    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
    let body: Value = response.json();
    assert_eq!(body["error"], "Unauthorized: invalid token");
}

#[tokio::test]
async fn valid_token_reaches_the_user_lookup() {
    let server = test_server().await;

    // A correctly signed token passes verification; with no store
    // configured, the lookup step then fails internally. This pins the
    // gate's step order: cookie, then signature, then store.
    let tokens = TokenService::new(TEST_JWT_SECRET.as_bytes());
    let token = tokens.issue(Uuid::new_v4()).unwrap();

    let response = server
        .get("/api/auth/me")
        .add_header(
            header::COOKIE,
            HeaderValue::from_str(&format!("jwt={token}")).unwrap(),
        )
        .await;

    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json();
    assert_eq!(body["error"], "Internal server error");
}

#[tokio::test]
async fn signup_rejects_invalid_email_before_touching_the_store() {
    let server = test_server().await;

    let response = server
        .post("/api/auth/signup")
        .json(&json!({
            "fullName": "A Person",
            "username": "a_person",
            "email": "not-an-email",
            "password": "password123"
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error"], "Invalid email format");
}

#[tokio::test]
async fn logout_clears_the_session_cookie() {
    let server = test_server().await;

    let response = server.post("/api/auth/logout").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["message"], "Logged out successfully");

    let set_cookie = response.header(header::SET_COOKIE);
    let set_cookie = set_cookie.to_str().unwrap();
    assert!(set_cookie.starts_with("jwt="), "got: {set_cookie}");
    assert!(set_cookie.contains("Max-Age=0"), "got: {set_cookie}");
}

#[tokio::test]
async fn unknown_routes_answer_json_404() {
    let server = test_server().await;

    let response = server.get("/api/nope").await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    let body: Value = response.json();
    assert_eq!(body["error"], "No route found");
}
