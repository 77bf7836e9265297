//! Server configuration from environment variables and flags

use std::path::PathBuf;

const DEFAULT_PORT: u16 = 8081;
const DEFAULT_RESTAURANTS_PATH: &str = "data/restaurants.json";
const DEFAULT_ENCODED_PATH: &str = "data/encoded.json";

/// Where the catalog comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatasetLocation {
    Demo,
    Http(String),
    Files { restaurants: PathBuf, encoded: PathBuf },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub port: u16,
    pub dataset: DatasetLocation,
}

impl ServerConfig {
    /// Read `TABLEMATCH_*` variables and the `--demo` flag
    pub fn from_env() -> anyhow::Result<Self> {
        let vars = |key: &str| std::env::var(key).ok();
        Self::from_parts(vars, std::env::args().any(|arg| arg == "--demo"))
    }

    pub fn from_parts<F>(var: F, demo: bool) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = match var("TABLEMATCH_PORT") {
            Some(raw) => raw
                .parse()
                .map_err(|e| anyhow::anyhow!("Invalid TABLEMATCH_PORT '{}': {}", raw, e))?,
            None => DEFAULT_PORT,
        };

        let dataset = if demo {
            DatasetLocation::Demo
        } else if let Some(url) = var("TABLEMATCH_DATASET_URL") {
            DatasetLocation::Http(url)
        } else {
            DatasetLocation::Files {
                restaurants: var("TABLEMATCH_RESTAURANTS_PATH")
                    .unwrap_or_else(|| DEFAULT_RESTAURANTS_PATH.to_string())
                    .into(),
                encoded: var("TABLEMATCH_ENCODED_PATH")
                    .unwrap_or_else(|| DEFAULT_ENCODED_PATH.to_string())
                    .into(),
            }
        };

        Ok(Self { port, dataset })
    }
}
