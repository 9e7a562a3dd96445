//! Pipeline configuration.
//!
//! Every field has a default, so a JSON file only needs to name what it
//! overrides:
//!
//! ```json
//! {
//!   "category": "larceny",
//!   "models": { "long_window": 60 },
//!   "targets": ["test"]
//! }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::baseline::{LONG_WINDOW, SHORT_WINDOW};
use crate::models::exponential::ANNUAL_PERIOD;
use crate::split::{SplitPolicy, WindowLabel};
use crate::transform::TransformSpec;

/// Errors raised while loading a configuration file.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid config: {0}")]
    Json(#[from] serde_json::Error),
}

/// Settings for the standard model roster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelsConfig {
    /// Window of the short moving average, in days.
    pub short_window: usize,
    /// Window of the long moving average, in days.
    pub long_window: usize,
    /// Seasonal period of the Holt-Winters model, in days.
    pub seasonal_period: usize,
    pub holt_transform: TransformSpec,
    pub seasonal_transform: TransformSpec,
}

impl Default for ModelsConfig {
    fn default() -> Self {
        Self {
            short_window: SHORT_WINDOW,
            long_window: LONG_WINDOW,
            seasonal_period: ANNUAL_PERIOD,
            holt_transform: TransformSpec::None,
            seasonal_transform: TransformSpec::BoxCox { lambda: None },
        }
    }
}

/// Configuration for one evaluation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Keyword matched against offense descriptions.
    pub category: String,
    pub split: SplitPolicy,
    pub models: ModelsConfig,
    /// Significance level for the hypothesis tests.
    pub alpha: f64,
    /// Windows each model is scored against.
    pub targets: Vec<WindowLabel>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            category: "fraud".to_string(),
            split: SplitPolicy::default(),
            models: ModelsConfig::default(),
            alpha: 0.05,
            targets: vec![WindowLabel::Validate, WindowLabel::Test],
        }
    }
}

impl PipelineConfig {
    /// Load a configuration from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Parse a configuration from JSON text.
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }
}
