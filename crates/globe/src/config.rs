use std::fs;
use std::path::{Path, PathBuf};

use foundation::math::{BOUNDARY_RADIUS, LABEL_RADIUS};
use layers::labels::LabelVisibilityConfig;
use runtime::interaction::InteractionConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_DATASET: &str =
    "https://raw.githubusercontent.com/datasets/geo-countries/master/data/countries.geojson";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobeConfig {
    /// HTTP(S) URL or local path of the countries GeoJSON.
    pub dataset: String,
    pub boundary_radius: f64,
    pub label_radius: f64,
    pub labels: LabelVisibilityConfig,
    pub interaction: InteractionConfig,
    /// `tracing` filter used when `RUST_LOG` is unset.
    pub log_filter: String,
}

impl Default for GlobeConfig {
    fn default() -> Self {
        Self {
            dataset: DEFAULT_DATASET.to_string(),
            boundary_radius: BOUNDARY_RADIUS,
            label_radius: LABEL_RADIUS,
            labels: LabelVisibilityConfig::default(),
            interaction: InteractionConfig::default(),
            log_filter: "info".to_string(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl GlobeConfig {
    pub fn from_json_str(payload: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(payload)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let payload = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&payload)
    }
}
