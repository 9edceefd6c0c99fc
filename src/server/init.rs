/**
 * Server Initialization
 *
 * This module turns a loaded `ServerConfig` into the ready-to-serve
 * Axum application.
 *
 * # Initialization Steps
 *
 * 1. Connect the database pool and run migrations (optional service)
 * 2. Build the token service from the signing secret
 * 3. Build the image host client (optional service)
 * 4. Assemble application state and the router
 *
 * # Error Handling
 *
 * Optional services that fail to initialize are set to `None` and the
 * server continues without them; the affected endpoints answer with
 * the internal-error category at request time.
 */

use axum::Router;

use crate::auth::tokens::TokenService;
use crate::images::ImageStore;
use crate::routes::create_router;
use crate::server::config::{load_database, ServerConfig};
use crate::server::state::AppState;

/// Create and configure the Axum application
pub async fn create_app(config: ServerConfig) -> Router<()> {
    tracing::info!("Initializing flitter backend server");

    let db_pool = load_database(&config).await;

    let tokens = TokenService::new(config.jwt_secret.as_bytes());

    let secure_cookies = config.secure_cookies();

    let images = config.image_host.map(ImageStore::new);
    if images.is_none() {
        tracing::warn!("Image host not configured. Image uploads will be disabled.");
    }

    let state = AppState {
        db_pool,
        tokens,
        images,
        secure_cookies,
    };

    tracing::info!("Router configured");
    create_router(state)
}
