/**
 * Identity Tokens
 *
 * This module implements the signed identity token used for sessions.
 * A token is a JWT carrying the user id and an expiry 15 days out; it
 * is never persisted server-side, so validity is determined purely by
 * signature and expiry.
 */

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};
use thiserror::Error;
use uuid::Uuid;

/// Token lifetime: 15 days
const TOKEN_TTL_SECS: u64 = 15 * 24 * 60 * 60;

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// User ID
    pub sub: String,
    /// Issued at time (Unix timestamp)
    pub iat: u64,
    /// Expiration time (Unix timestamp)
    pub exp: u64,
}

/// Why a token was rejected
///
/// Callers treat both variants as "unauthenticated"; the split exists
/// for logging.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("token expired")]
    Expired,
    #[error("invalid token")]
    Invalid,
}

/// Issues and verifies identity tokens
///
/// Built once from the server configuration and shared through
/// application state; the signing secret is never read from the
/// environment at call time.
#[derive(Clone)]
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl TokenService {
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
        }
    }

    /// Create a signed token for a user, expiring 15 days from now
    pub fn issue(&self, user_id: Uuid) -> Result<String, jsonwebtoken::errors::Error> {
        let now = unix_now();
        self.issue_at(user_id, now, now + TOKEN_TTL_SECS)
    }

    fn issue_at(
        &self,
        user_id: Uuid,
        iat: u64,
        exp: u64,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let claims = Claims {
            sub: user_id.to_string(),
            iat,
            exp,
        };
        encode(&Header::default(), &claims, &self.encoding)
    }

    /// Verify a token and extract the user id it was issued for
    pub fn verify(&self, token: &str) -> Result<Uuid, TokenError> {
        let data = decode::<Claims>(token, &self.decoding, &Validation::default()).map_err(
            |err| match err.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Invalid,
            },
        )?;

        Uuid::parse_str(&data.claims.sub).map_err(|_| TokenError::Invalid)
    }
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system time before Unix epoch")
        .as_secs()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_and_verify_round_trip() {
        let service = TokenService::new(b"test-secret");
        let user_id = Uuid::new_v4();

        let token = service.issue(user_id).unwrap();
        assert!(!token.is_empty());
        assert_eq!(service.verify(&token).unwrap(), user_id);
    }

    #[test]
    fn test_garbage_token_is_invalid() {
        let service = TokenService::new(b"test-secret");
        assert_eq!(
            service.verify("invalid.token.here").unwrap_err(),
            TokenError::Invalid
        );
    }

    #[test]
    fn test_token_signed_with_other_secret_is_invalid() {
        let service = TokenService::new(b"test-secret");
        let other = TokenService::new(b"other-secret");
        let token = other.issue(Uuid::new_v4()).unwrap();

        assert_eq!(service.verify(&token).unwrap_err(), TokenError::Invalid);
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let service = TokenService::new(b"test-secret");
        let now = unix_now();
        // Expired well past the default validation leeway.
        let token = service
            .issue_at(Uuid::new_v4(), now - 1000, now - 500)
            .unwrap();

        assert_eq!(service.verify(&token).unwrap_err(), TokenError::Expired);
    }

    #[test]
    fn test_tampered_token_is_invalid() {
        let service = TokenService::new(b"test-secret");
        let mut token = service.issue(Uuid::new_v4()).unwrap();
        token.push('x');

        assert_eq!(service.verify(&token).unwrap_err(), TokenError::Invalid);
    }
}
