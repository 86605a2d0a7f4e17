//! Configuration management for the CLI
//!
//! This module handles loading and merging configuration from:
//! - Default values
//! - Configuration files (TOML/YAML/JSON)
//! - Command-line arguments (applied by the handlers)

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Build settings
    pub build: BuildConfig,

    /// Output settings
    pub output: OutputConfig,
}

/// Build (generation) configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    /// Output directory for the generated tree
    pub out_dir: PathBuf,

    /// Approximate token budget per chunk file
    pub chunk_token_budget: usize,

    /// Minimum operations per chunk before a budget-triggered flush
    pub min_ops_per_chunk: usize,
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Default output format when no --output flag is given
    pub format: Option<String>,

    /// Use colored output by default
    pub color: bool,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            out_dir: PathBuf::from("api-md"),
            chunk_token_budget: 1500,
            min_ops_per_chunk: 1,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: None,
            color: true,
        }
    }
}

impl Config {
    /// Load configuration from a file, dispatching on the extension
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;

        let config = match path.extension().and_then(|s| s.to_str()) {
            Some("yaml") | Some("yml") => serde_yaml::from_str(&content)?,
            Some("toml") => toml::from_str(&content)?,
            _ => serde_json::from_str(&content)?,
        };

        Ok(config)
    }

    /// Load configuration from default locations
    pub fn load() -> Result<Self> {
        let config_paths = Self::default_config_paths();

        for path in &config_paths {
            if path.exists() {
                match Self::from_file(path) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        tracing::warn!(path = %path.display(), error = %e, "failed to load config file");
                    }
                }
            }
        }

        Ok(Self::default())
    }

    /// Load configuration from a specific file or default locations
    pub fn load_with_file(file: Option<&Path>) -> Result<Self> {
        if let Some(path) = file {
            Self::from_file(path)
        } else {
            Self::load()
        }
    }

    /// Get default configuration file paths to check
    fn default_config_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        // Current directory
        for ext in ["toml", "yaml", "json"] {
            paths.push(PathBuf::from(format!(".docshard.{ext}")));
        }
        for ext in ["toml", "yaml", "json"] {
            paths.push(PathBuf::from(format!("docshard.{ext}")));
        }

        // User config directory
        if let Some(config_dir) = dirs::config_dir() {
            let docshard_dir = config_dir.join("docshard");
            for ext in ["toml", "yaml", "json"] {
                paths.push(docshard_dir.join(format!("config.{ext}")));
            }
        }

        // Home directory
        if let Some(home_dir) = dirs::home_dir() {
            for ext in ["toml", "yaml", "json"] {
                paths.push(home_dir.join(format!(".docshard.{ext}")));
            }
        }

        paths
    }
}
