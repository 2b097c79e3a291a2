use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::view_model::{DEFAULT_AGE_BINS, RenderOptions};

/// Names a JSON file with [`AppConfig`] overrides.
pub const CONFIG_ENV: &str = "ATTRITION_DASH_CONFIG";
/// Overrides `data_path` from the environment.
pub const DATA_ENV: &str = "ATTRITION_DATA";

/// Startup configuration: defaults, then an optional JSON file, then the environment.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub data_path: PathBuf,
    pub window_width: f32,
    pub window_height: f32,
    pub age_bins: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("EA.csv"),
            window_width: 1400.0,
            window_height: 900.0,
            age_bins: DEFAULT_AGE_BINS,
        }
    }
}

impl AppConfig {
    /// Resolve the configuration from the process environment.
    pub fn load() -> Result<Self> {
        let file = std::env::var_os(CONFIG_ENV).map(PathBuf::from);
        let data = std::env::var_os(DATA_ENV).map(PathBuf::from);
        Self::resolve(file.as_deref(), data)
    }

    fn resolve(file: Option<&Path>, data_override: Option<PathBuf>) -> Result<Self> {
        let mut config = match file {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        if let Some(data) = data_override {
            config.data_path = data;
        }
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("parsing config {}", path.display()))
    }

    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            age_bins: self.age_bins.max(1),
        }
    }
}
