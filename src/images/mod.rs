/**
 * Hosted Image Client
 *
 * This module is a thin client for the third-party image host. The
 * application never stores image bytes itself: uploads send the
 * client-provided data URI to the host and only the returned URL is
 * persisted. Requests are signed with a sha-256 digest over the sorted
 * request parameters plus the API secret, which is the host's signed
 * upload scheme.
 */

use serde::Deserialize;
use sha2::{Digest, Sha256};
use thiserror::Error;

use crate::server::config::ImageHostConfig;

#[derive(Debug, Error)]
pub enum ImageError {
    #[error("image host request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("image host rejected the request: {0}")]
    Rejected(String),
}

/// Client for the hosted image service
#[derive(Clone)]
pub struct ImageStore {
    http: reqwest::Client,
    cloud_name: String,
    api_key: String,
    api_secret: String,
}

#[derive(Deserialize)]
struct UploadResponse {
    secure_url: String,
}

impl ImageStore {
    pub fn new(config: ImageHostConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            cloud_name: config.cloud_name,
            api_key: config.api_key,
            api_secret: config.api_secret,
        }
    }

    /// Upload an image (as a data URI) and return its hosted URL
    pub async fn upload(&self, file: &str) -> Result<String, ImageError> {
        let timestamp = chrono::Utc::now().timestamp().to_string();
        let signature = sign(&[("timestamp", &timestamp)], &self.api_secret);

        let url = format!(
            "https://api.cloudinary.com/v1_1/{}/image/upload",
            self.cloud_name
        );
        let response = self
            .http
            .post(&url)
            .form(&[
                ("file", file),
                ("api_key", self.api_key.as_str()),
                ("timestamp", timestamp.as_str()),
                ("signature", signature.as_str()),
                ("signature_algorithm", "sha256"),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ImageError::Rejected(response.status().to_string()));
        }

        let body: UploadResponse = response.json().await?;
        Ok(body.secure_url)
    }

    /// Remove a previously uploaded image, identified by its hosted URL
    pub async fn destroy(&self, image_url: &str) -> Result<(), ImageError> {
        // Nothing to do for URLs we cannot attribute to the host.
        let Some(public_id) = public_id_from_url(image_url) else {
            return Ok(());
        };

        let timestamp = chrono::Utc::now().timestamp().to_string();
        let signature = sign(
            &[("public_id", &public_id), ("timestamp", &timestamp)],
            &self.api_secret,
        );

        let url = format!(
            "https://api.cloudinary.com/v1_1/{}/image/destroy",
            self.cloud_name
        );
        let response = self
            .http
            .post(&url)
            .form(&[
                ("public_id", public_id.as_str()),
                ("api_key", self.api_key.as_str()),
                ("timestamp", timestamp.as_str()),
                ("signature", signature.as_str()),
                ("signature_algorithm", "sha256"),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ImageError::Rejected(response.status().to_string()));
        }

        Ok(())
    }
}

/// Sign request parameters: sorted `key=value` pairs joined with `&`,
/// followed by the API secret, hashed with sha-256
fn sign(params: &[(&str, &str)], api_secret: &str) -> String {
    let mut sorted: Vec<(&str, &str)> = params.to_vec();
    sorted.sort();

    let payload = sorted
        .iter()
        .map(|(key, value)| format!("{key}={value}"))
        .collect::<Vec<_>>()
        .join("&");

    let mut hasher = Sha256::new();
    hasher.update(payload.as_bytes());
    hasher.update(api_secret.as_bytes());
    hex::encode(hasher.finalize())
}

/// The host's public id is the last path segment minus the extension
pub fn public_id_from_url(url: &str) -> Option<String> {
    let last = url.rsplit('/').next()?;
    let id = last.split('.').next()?;
    if id.is_empty() {
        None
    } else {
        Some(id.to_string())
    }
}
