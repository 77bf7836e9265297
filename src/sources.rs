//! Dataset sources for loading the restaurant catalog

use crate::catalog::EncodedTable;
use crate::types::Restaurant;
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Trait for pluggable dataset backends.
///
/// A source hands back the two tables as loaded; alignment and schema checks
/// happen in [`crate::Catalog::load`].
#[async_trait]
pub trait DatasetSource: Send + Sync {
    fn name(&self) -> &'static str;

    async fn load_restaurants(&self) -> Result<Vec<Restaurant>>;

    async fn load_encoded(&self) -> Result<EncodedTable>;
}

/// In-memory source, used by tests and the demo server
pub struct StaticSource {
    restaurants: Vec<Restaurant>,
    encoded: EncodedTable,
}

impl StaticSource {
    pub fn new(restaurants: Vec<Restaurant>, encoded: EncodedTable) -> Self {
        Self { restaurants, encoded }
    }
}

#[async_trait]
impl DatasetSource for StaticSource {
    fn name(&self) -> &'static str {
        "static"
    }

    async fn load_restaurants(&self) -> Result<Vec<Restaurant>> {
        Ok(self.restaurants.clone())
    }

    async fn load_encoded(&self) -> Result<EncodedTable> {
        Ok(self.encoded.clone())
    }
}

/// Two JSON documents on disk: an array of restaurant records and an array
/// of encoded rows (column name to number)
pub struct JsonFileSource {
    restaurants_path: PathBuf,
    encoded_path: PathBuf,
}

impl JsonFileSource {
    pub fn new(restaurants_path: impl Into<PathBuf>, encoded_path: impl Into<PathBuf>) -> Self {
        Self {
            restaurants_path: restaurants_path.into(),
            encoded_path: encoded_path.into(),
        }
    }

    async fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
        debug!("Reading dataset file {}", path.display());

        let bytes = tokio::fs::read(path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?;

        serde_json::from_slice(&bytes).with_context(|| format!("Failed to parse {}", path.display()))
    }
}

#[async_trait]
impl DatasetSource for JsonFileSource {
    fn name(&self) -> &'static str {
        "json_file"
    }

    async fn load_restaurants(&self) -> Result<Vec<Restaurant>> {
        Self::read_json(&self.restaurants_path).await
    }

    async fn load_encoded(&self) -> Result<EncodedTable> {
        Self::read_json(&self.encoded_path).await
    }
}

/// Dataset service serving `GET {base}/restaurants` and `GET {base}/encoded`
pub struct HttpSource {
    base_url: String,
    client: reqwest::Client,
}

impl HttpSource {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    async fn fetch<T: DeserializeOwned>(&self, resource: &str) -> Result<T> {
        let url = format!("{}/{}", self.base_url, resource);
        debug!("Fetching dataset from {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .with_context(|| format!("Failed to reach dataset service at {}", url))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Dataset service error {}: {}", status, body);
        }

        response
            .json()
            .await
            .with_context(|| format!("Failed to decode {}", url))
    }

    /// Health check
    pub async fn health_check(&self) -> Result<bool> {
        let url = format!("{}/health", self.base_url);
        let response = self.client.get(&url).send().await?;
        Ok(response.status().is_success())
    }
}

#[async_trait]
impl DatasetSource for HttpSource {
    fn name(&self) -> &'static str {
        "http"
    }

    async fn load_restaurants(&self) -> Result<Vec<Restaurant>> {
        self.fetch("restaurants").await
    }

    async fn load_encoded(&self) -> Result<EncodedTable> {
        self.fetch("encoded").await
    }
}
