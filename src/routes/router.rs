/**
 * Router Configuration
 *
 * This module provides the main router creation function that combines
 * the API routes, request tracing, and the JSON 404 fallback into a
 * single Axum router.
 */

use axum::{http::StatusCode, Json, Router};
use tower_http::trace::TraceLayer;

use crate::routes::api_routes::configure_api_routes;
use crate::server::state::AppState;

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState) -> Router<()> {
    configure_api_routes(app_state.clone())
        .layer(TraceLayer::new_for_http())
        .fallback(|| async {
            (
                StatusCode::NOT_FOUND,
                Json(serde_json::json!({ "error": "No route found" })),
            )
        })
        .with_state(app_state)
}
