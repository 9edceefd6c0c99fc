/**
 * Authentication Handler Types
 *
 * Request types for the authentication endpoints. Field names follow
 * the frontend contract (camelCase). Responses use the public
 * `UserProfile` view from `users::db`.
 */

use serde::Deserialize;

/// Sign up request
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    /// Display name
    pub full_name: String,
    /// User's chosen username
    pub username: String,
    /// User's email address
    pub email: String,
    /// User's password (will be hashed before storage)
    pub password: String,
}

/// Login request
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}
