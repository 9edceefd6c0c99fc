/**
 * Logout Handler
 *
 * POST /api/auth/logout clears the session cookie. The token itself is
 * not persisted server-side, so there is nothing else to revoke.
 */

use axum::response::Json;
use axum_extra::extract::CookieJar;
use serde_json::{json, Value};

use crate::auth::cookies::clear_session_cookie;

/// Logout handler
pub async fn logout(jar: CookieJar) -> (CookieJar, Json<Value>) {
    (
        jar.remove(clear_session_cookie()),
        Json(json!({ "message": "Logged out successfully" })),
    )
}
