//! Configuration file parsing for the server
//!
//! Loads settings from TOML files: bind address, upload and guideline
//! directories, model defaults, and store capacity.

use grantflow_pipeline::PipelineConfig;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Server configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    /// Failed to parse TOML
    #[error("Failed to parse config TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// A field failed validation
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Server configuration loaded from TOML
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Bind address (e.g., "127.0.0.1")
    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    /// Bind port (e.g., 8000)
    #[serde(default = "default_bind_port")]
    pub bind_port: u16,

    /// Directory for temporary uploaded files
    #[serde(default = "default_upload_dir")]
    pub upload_dir: PathBuf,

    /// Directory holding per-organization guideline files
    #[serde(default = "default_guidelines_dir")]
    pub guidelines_dir: PathBuf,

    /// Model used when an upload does not name one
    #[serde(default = "default_model")]
    pub default_model: String,

    /// Temperature used when an upload does not set one
    #[serde(default = "default_temperature")]
    pub default_temperature: f32,

    /// Maximum number of task records kept in memory
    #[serde(default = "default_store_capacity")]
    pub store_capacity: usize,

    /// Maximum time for a single model call (seconds)
    #[serde(default = "default_llm_timeout_secs")]
    pub llm_timeout_secs: u64,
}

fn default_bind_address() -> String {
    "0.0.0.0".to_string()
}

fn default_bind_port() -> u16 {
    8000
}

fn default_upload_dir() -> PathBuf {
    PathBuf::from("uploads")
}

fn default_guidelines_dir() -> PathBuf {
    PathBuf::from("guidelines")
}

fn default_model() -> String {
    grantflow_llm::DEFAULT_MODEL.to_string()
}

fn default_temperature() -> f32 {
    0.2
}

fn default_store_capacity() -> usize {
    grantflow_store::DEFAULT_CAPACITY
}

fn default_llm_timeout_secs() -> u64 {
    300
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            bind_port: default_bind_port(),
            upload_dir: default_upload_dir(),
            guidelines_dir: default_guidelines_dir(),
            default_model: default_model(),
            default_temperature: default_temperature(),
            store_capacity: default_store_capacity(),
            llm_timeout_secs: default_llm_timeout_secs(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: ServerConfig = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate field values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.store_capacity == 0 {
            return Err(ConfigError::Invalid(
                "store_capacity must be greater than 0".to_string(),
            ));
        }
        if self.llm_timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "llm_timeout_secs must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }

    /// Get the full bind address (address:port)
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.bind_address, self.bind_port)
    }

    /// Derive the pipeline configuration
    pub fn pipeline_config(&self) -> PipelineConfig {
        PipelineConfig {
            guidelines_dir: self.guidelines_dir.clone(),
            llm_timeout_secs: self.llm_timeout_secs,
            ..PipelineConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ServerConfig::default();
        assert_eq!(config.bind_addr(), "0.0.0.0:8000");
        assert_eq!(config.upload_dir, PathBuf::from("uploads"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_toml_with_defaults() {
        let toml = r#"
            bind_address = "127.0.0.1"
            bind_port = 9000
            default_model = "openai/gpt-4o-mini"
        "#;

        let config: ServerConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.bind_addr(), "127.0.0.1:9000");
        assert_eq!(config.default_model, "openai/gpt-4o-mini");
        assert_eq!(config.store_capacity, grantflow_store::DEFAULT_CAPACITY);
    }

    #[test]
    fn test_zero_capacity_rejected() {
        let toml = "store_capacity = 0";
        let config: ServerConfig = toml::from_str(toml).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_pipeline_config_inherits_dirs() {
        let mut config = ServerConfig::default();
        config.guidelines_dir = PathBuf::from("/srv/guidelines");
        assert_eq!(
            config.pipeline_config().guidelines_dir,
            PathBuf::from("/srv/guidelines")
        );
    }
}
