//! Configuration management for schema-sync
//!
//! Supports loading configuration from:
//! - Default values
//! - Config file (schema-sync.toml)
//! - Environment variables (SCHEMA_SYNC__*)
//!
//! Command-line flags take precedence over everything loaded here.
//!
//! ## Example config file (schema-sync.toml):
//! ```toml
//! [registry]
//! host = "http://localhost:8081"
//! timeout_secs = 30
//!
//! [download]
//! file = "./schemas.csv"
//! outdir = "./api"
//!
//! [register]
//! include_schema_type = true
//! version = "1"
//! ```

use config_crate::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Main configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SyncConfig {
    /// Registry connection settings
    #[serde(default)]
    pub registry: RegistryConfig,

    /// Download workflow defaults
    #[serde(default)]
    pub download: DownloadConfig,

    /// Register workflow defaults
    #[serde(default)]
    pub register: RegisterConfig,
}

/// Registry connection configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// Base URL, used when `--host` is not given
    #[serde(default)]
    pub host: Option<String>,

    /// Whole-request timeout; the HTTP client default applies when unset
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

/// Download configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DownloadConfig {
    /// Path to the CSV manifest
    #[serde(default = "default_manifest_path")]
    pub file: PathBuf,

    /// Root directory for downloaded schemas
    #[serde(default = "default_outdir")]
    pub outdir: PathBuf,
}

/// Register configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterConfig {
    /// Send `schemaType` alongside the schema text
    #[serde(default = "default_true")]
    pub include_schema_type: bool,

    /// Version label used in diagnostics
    #[serde(default = "default_version")]
    pub version: String,
}

// Default value functions
fn default_manifest_path() -> PathBuf {
    PathBuf::from("./schemas.csv")
}

fn default_outdir() -> PathBuf {
    PathBuf::from("./api")
}

fn default_true() -> bool {
    true
}

fn default_version() -> String {
    "1".to_string()
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            file: default_manifest_path(),
            outdir: default_outdir(),
        }
    }
}

impl Default for RegisterConfig {
    fn default() -> Self {
        Self {
            include_schema_type: true,
            version: default_version(),
        }
    }
}

impl RegistryConfig {
    /// Configured timeout, if any
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

impl SyncConfig {
    /// Load configuration, adding a required file when `config_path` is given
    pub fn load_from(config_path: Option<&str>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();

        let config_locations = [
            "schema-sync.toml",
            ".schema-sync.toml",
            "config/schema-sync.toml",
        ];

        for location in config_locations {
            builder = builder.add_source(File::with_name(location).required(false));
        }

        // XDG config directory
        if let Some(config_dir) = directories::ProjectDirs::from("dev", "schema-sync", "schema-sync") {
            let xdg_config = config_dir.config_dir().join("schema-sync.toml");
            if xdg_config.exists() {
                builder = builder.add_source(File::from(xdg_config).required(false));
            }
        }

        if let Some(path) = config_path {
            builder = builder.add_source(File::with_name(path).required(true));
        }

        // SCHEMA_SYNC__REGISTRY__HOST and friends
        builder = builder.add_source(
            Environment::with_prefix("SCHEMA_SYNC")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build()?;
        config.try_deserialize()
    }

    /// Save configuration to a file
    pub fn save(&self, path: &str) -> std::io::Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        std::fs::write(path, content)
    }
}
