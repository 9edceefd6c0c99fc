/**
 * Server Configuration
 *
 * This module builds the explicit configuration struct the rest of the
 * application is constructed from. Configuration is read from the
 * environment exactly once, in `ServerConfig::from_env`; components
 * receive their settings by value instead of reading the environment
 * ambiently.
 *
 * # Error Handling
 *
 * A missing token-signing secret is a hard startup error. The database
 * and the image host are optional services: when their settings are
 * absent the server still starts and the affected endpoints answer with
 * the internal-error category at request time.
 */

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use thiserror::Error;

/// Deployment environment, controlling cookie security
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    fn parse(value: &str) -> Self {
        match value {
            "production" | "prod" => Environment::Production,
            _ => Environment::Development,
        }
    }
}

/// Credentials for the hosted image service
#[derive(Debug, Clone)]
pub struct ImageHostConfig {
    pub cloud_name: String,
    pub api_key: String,
    pub api_secret: String,
}

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("JWT_SECRET is not set")]
    MissingJwtSecret,
    #[error("invalid PORT value: {0}")]
    InvalidPort(String),
}

/// Everything the server needs, constructed once at startup
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Listening port
    pub port: u16,
    /// Deployment environment
    pub environment: Environment,
    /// Database connection string; persistence is disabled when absent
    pub database_url: Option<String>,
    /// Token-signing secret (required)
    pub jwt_secret: String,
    /// Image host credentials; uploads are disabled when absent
    pub image_host: Option<ImageHostConfig>,
}

impl ServerConfig {
    /// Load configuration from the environment
    pub fn from_env() -> Result<Self, ConfigError> {
        let port = match std::env::var("PORT") {
            Ok(raw) => raw
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidPort(raw))?,
            Err(_) => 5000,
        };

        let environment = std::env::var("APP_ENV")
            .map(|value| Environment::parse(&value))
            .unwrap_or(Environment::Development);

        let jwt_secret = std::env::var("JWT_SECRET")
            .ok()
            .filter(|secret| !secret.is_empty())
            .ok_or(ConfigError::MissingJwtSecret)?;

        let database_url = std::env::var("DATABASE_URL").ok();
        if database_url.is_none() {
            tracing::warn!("DATABASE_URL is not set; persistence-backed endpoints are disabled");
        }

        let image_host = match (
            std::env::var("CLOUDINARY_CLOUD_NAME").ok(),
            std::env::var("CLOUDINARY_API_KEY").ok(),
            std::env::var("CLOUDINARY_API_SECRET").ok(),
        ) {
            (Some(cloud_name), Some(api_key), Some(api_secret)) => Some(ImageHostConfig {
                cloud_name,
                api_key,
                api_secret,
            }),
            (None, None, None) => None,
            _ => {
                tracing::warn!("Incomplete image host credentials. Image uploads will be disabled.");
                None
            }
        };

        Ok(ServerConfig {
            port,
            environment,
            database_url,
            jwt_secret,
            image_host,
        })
    }

    /// Whether session cookies must be marked `Secure`
    pub fn secure_cookies(&self) -> bool {
        self.environment == Environment::Production
    }
}

/// Create the database connection pool and bring the schema up to date
///
/// Returns `None` when no connection string is configured, or when
/// either connecting or migrating fails; the server then runs without
/// persistence-backed endpoints and the affected handlers answer with
/// the internal-error category at request time.
pub async fn load_database(config: &ServerConfig) -> Option<PgPool> {
    let database_url = config.database_url.as_deref()?;

    match connect_and_migrate(database_url).await {
        Ok(pool) => {
            tracing::info!("Database pool ready, schema up to date");
            Some(pool)
        }
        Err(err) => {
            tracing::error!("Database unavailable, continuing without persistence: {err}");
            None
        }
    }
}

async fn connect_and_migrate(database_url: &str) -> Result<PgPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await?;
    sqlx::migrate!().run(&pool).await?;
    Ok(pool)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_env() {
        for key in [
            "PORT",
            "APP_ENV",
            "JWT_SECRET",
            "DATABASE_URL",
            "CLOUDINARY_CLOUD_NAME",
            "CLOUDINARY_API_KEY",
            "CLOUDINARY_API_SECRET",
        ] {
            std::env::remove_var(key);
        }
    }

    #[test]
    #[serial]
    fn test_missing_jwt_secret_is_an_error() {
        clear_env();
        assert!(matches!(
            ServerConfig::from_env(),
            Err(ConfigError::MissingJwtSecret)
        ));
    }

    #[test]
    #[serial]
    fn test_defaults_with_secret_set() {
        clear_env();
        std::env::set_var("JWT_SECRET", "s3cret");

        let config = ServerConfig::from_env().unwrap();
        assert_eq!(config.port, 5000);
        assert_eq!(config.environment, Environment::Development);
        assert!(config.database_url.is_none());
        assert!(config.image_host.is_none());
        assert!(!config.secure_cookies());
    }

    #[test]
    #[serial]
    fn test_production_enables_secure_cookies() {
        clear_env();
        std::env::set_var("JWT_SECRET", "s3cret");
        std::env::set_var("APP_ENV", "production");

        let config = ServerConfig::from_env().unwrap();
        assert!(config.secure_cookies());
    }

    #[test]
    #[serial]
    fn test_invalid_port_is_an_error() {
        clear_env();
        std::env::set_var("JWT_SECRET", "s3cret");
        std::env::set_var("PORT", "not-a-port");

        assert!(matches!(
            ServerConfig::from_env(),
            Err(ConfigError::InvalidPort(_))
        ));
    }
}
