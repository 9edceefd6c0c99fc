/**
 * Session Cookie
 *
 * The identity token travels in an HTTP-only cookie named `jwt`,
 * same-site restricted and secure outside development mode. The token
 * itself is issued by `auth::tokens`; this module only shapes the
 * cookie.
 */

use axum_extra::extract::cookie::{Cookie, SameSite};

/// Name of the identity cookie
pub const SESSION_COOKIE: &str = "jwt";

/// Cookie lifetime, matching the token expiry
const SESSION_TTL_DAYS: i64 = 15;

/// Build the identity cookie carrying a freshly issued token
pub fn session_cookie(token: String, secure: bool) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Strict)
        .secure(secure)
        .max_age(time::Duration::days(SESSION_TTL_DAYS))
        .build()
}

/// Cookie used to clear the session on logout
pub fn clear_session_cookie() -> Cookie<'static> {
    Cookie::build(SESSION_COOKIE).path("/").build()
}
