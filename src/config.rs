// Sat Oct 17 2026 - Alex

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub parallel: bool,
    pub max_matches: Option<usize>,
    pub output_format: OutputFormat,
    pub color: bool,
    pub log_level: String,
    pub lenient_database: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            parallel: true,
            max_matches: None,
            output_format: OutputFormat::Text,
            color: true,
            log_level: "info".to_string(),
            lenient_database: false,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&content)
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn with_max_matches(mut self, max: Option<usize>) -> Self {
        self.max_matches = max;
        self
    }

    pub fn with_output_format(mut self, format: OutputFormat) -> Self {
        self.output_format = format;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_matches == Some(0) {
            return Err(ConfigError::Invalid("max_matches must be greater than 0".to_string()));
        }
        if crate::utils::logging::parse_level(&self.log_level).is_none() {
            return Err(ConfigError::Invalid(format!("unknown log_level '{}'", self.log_level)));
        }
        Ok(())
    }
}
