use std::env;

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::debug;

use crate::models::{Assignment, Course};

pub const DEFAULT_API_URL: &str = "http://localhost:3000";

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Request failed {status}: {body}")]
    Status { status: u16, body: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

#[derive(Clone, Debug)]
pub struct ClientConfig {
    pub base_url: String,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        let trimmed = base_url.trim();
        let base_url = match trimmed.strip_suffix('/') {
            Some(stripped) => stripped.to_string(),
            None => trimmed.to_string(),
        };
        Self { base_url }
    }

    /// Reads `API_URL`, falling back to the local development server.
    pub fn from_env() -> Self {
        match env::var("API_URL") {
            Ok(url) if !url.trim().is_empty() => Self::new(url),
            _ => Self::new(DEFAULT_API_URL),
        }
    }

    pub fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }
}

/// Read access to the course catalogue served by the backend.
#[async_trait]
pub trait CatalogClient: Send + Sync {
    async fn fetch_courses(&self) -> Result<Vec<Course>, ClientError>;
    async fn fetch_assignments(&self) -> Result<Vec<Assignment>, ClientError>;
}

pub struct HttpCatalogClient {
    client: Client,
    config: ClientConfig,
}

impl HttpCatalogClient {
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        let client = Client::builder().build()?;
        Ok(Self { client, config })
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let url = self.config.url(path);
        debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .header("Content-Type", "application/json")
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::Status { status, body });
        }

        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl CatalogClient for HttpCatalogClient {
    async fn fetch_courses(&self) -> Result<Vec<Course>, ClientError> {
        self.get_json("/courses").await
    }

    async fn fetch_assignments(&self) -> Result<Vec<Assignment>, ClientError> {
        self.get_json("/assignments").await
    }
}
