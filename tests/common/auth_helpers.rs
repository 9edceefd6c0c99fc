//! Authentication helpers for the integration tests

use flitter::auth::tokens::TokenService;
use flitter::server::config::{Environment, ServerConfig};
use flitter::server::state::AppState;
use flitter::users::db::{self, User};
use sqlx::PgPool;
use uuid::Uuid;

/// Signing secret shared by every test token service
pub const TEST_JWT_SECRET: &str = "flitter-test-secret";

/// A server configuration with no database and no image host
pub fn offline_config() -> ServerConfig {
    ServerConfig {
        port: 0,
        environment: Environment::Development,
        database_url: None,
        jwt_secret: TEST_JWT_SECRET.to_string(),
        image_host: None,
    }
}

/// Application state wired to a live test database
pub fn app_state(pool: &PgPool) -> AppState {
    AppState {
        db_pool: Some(pool.clone()),
        tokens: TokenService::new(TEST_JWT_SECRET.as_bytes()),
        images: None,
        secure_cookies: false,
    }
}

/// A unique name so parallel tests never collide on unique columns
pub fn unique(prefix: &str) -> String {
    format!("{}_{}", prefix, Uuid::new_v4().simple())
}

/// Insert a user directly, with a fast low-cost hash
pub async fn create_test_user(pool: &PgPool, username: &str, password: &str) -> User {
    let hash = bcrypt::hash(password, 4).expect("hash");
    db::create_user(
        pool,
        username,
        &format!("{username}@example.com"),
        &hash,
        "Test User",
    )
    .await
    .expect("create user")
}
