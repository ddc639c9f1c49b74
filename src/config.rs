//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::countries::DEFAULT_FLAG_HOST;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub dataset: DatasetConfig,

    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Dataset source configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DatasetConfig {
    #[serde(default = "default_dataset_path")]
    pub path: String,

    /// Host serving `/{alpha2}/flat/64.png` flag images
    #[serde(default = "default_flag_host")]
    pub flag_host: String,

    /// Load the table at startup instead of on the first request
    #[serde(default)]
    pub preload: bool,
}

fn default_dataset_path() -> String {
    "./owid-covid-data.csv".to_string()
}

fn default_flag_host() -> String {
    DEFAULT_FLAG_HOST.to_string()
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            path: default_dataset_path(),
            flag_host: default_flag_host(),
            preload: false,
        }
    }
}

/// API server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_enable_export")]
    pub enable_export: bool,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8501
}

fn default_enable_export() -> bool {
    true
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            enable_export: default_enable_export(),
        }
    }
}

impl ApiConfig {
    /// Runtime settings handed to the router
    pub fn to_runtime(&self) -> crate::api::ApiConfig {
        crate::api::ApiConfig {
            host: self.host.clone(),
            port: self.port,
            enable_export: self.enable_export,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,

    pub file: Option<String>,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            file: None,
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Self::parse(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })
    }

    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// First existing file among the default config locations
    pub fn locate() -> Option<PathBuf> {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("epidash").join("config.toml")),
            Some(PathBuf::from("/etc/epidash/config.toml")),
            Some(PathBuf::from("./config.toml")),
        ];

        config_paths.into_iter().flatten().find(|p| p.exists())
    }

    /// Apply environment variable overrides to an existing config
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        // Dataset overrides
        if let Some(path) = var("EPIDASH_DATASET_PATH") {
            self.dataset.path = path;
        }
        if let Some(host) = var("EPIDASH_FLAG_HOST") {
            self.dataset.flag_host = host;
        }

        // API overrides
        if let Some(host) = var("EPIDASH_API_HOST") {
            self.api.host = host;
        }
        if let Some(port) = var("EPIDASH_API_PORT") {
            match port.parse() {
                Ok(p) => self.api.port = p,
                Err(_) => tracing::warn!(value = %port, "Ignoring invalid EPIDASH_API_PORT"),
            }
        }

        // Logging overrides
        if let Some(level) = var("EPIDASH_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = var("EPIDASH_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# epidash Configuration
#
# Environment variables override these settings:
# - EPIDASH_DATASET_PATH
# - EPIDASH_FLAG_HOST
# - EPIDASH_API_HOST
# - EPIDASH_API_PORT
# - EPIDASH_LOG_LEVEL
# - EPIDASH_LOG_FORMAT

[dataset]
# Our World in Data COVID-19 CSV
path = "./owid-covid-data.csv"

# Flag images are linked from https://{flag_host}/{alpha2}/flat/64.png
flag_host = "flagsapi.com"

# Load the dataset at startup rather than on the first request
preload = false

[api]
# API server host
host = "0.0.0.0"

# API server port
port = 8501

# Serve per-country CSV downloads at /api/v1/export
enable_export = true

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"

# Optional log file path
# file = "/var/log/epidash/epidash.log"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.dataset.path, "./owid-covid-data.csv");
        assert_eq!(config.dataset.flag_host, "flagsapi.com");
        assert!(!config.dataset.preload);
        assert_eq!(config.api.port, 8501);
        assert!(config.api.enable_export);
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn test_generated_config_parses() {
        let config = Config::parse(&generate_default_config()).unwrap();
        assert_eq!(config.dataset.path, "./owid-covid-data.csv");
        assert_eq!(config.api.host, "0.0.0.0");
        assert_eq!(config.logging.level, "info");
        assert!(config.logging.file.is_none());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[dataset]\npath = \"/data/owid.csv\"\n\n[api]\nport = 9000").unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.dataset.path, "/data/owid.csv");
        assert_eq!(config.dataset.flag_host, "flagsapi.com");
        assert_eq!(config.api.port, 9000);
        assert_eq!(config.api.host, "0.0.0.0");
    }

    #[test]
    fn test_env_overrides_win_over_file() {
        let mut config = Config::parse("[api]\nport = 9000\n[logging]\nformat = \"pretty\"").unwrap();
        let env: HashMap<&str, &str> = [
            ("EPIDASH_API_PORT", "9100"),
            ("EPIDASH_LOG_FORMAT", "json"),
            ("EPIDASH_DATASET_PATH", "/srv/owid.csv"),
        ]
        .into_iter()
        .collect();

        config.apply_overrides(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.api.port, 9100);
        assert_eq!(config.logging.format, "json");
        assert_eq!(config.dataset.path, "/srv/owid.csv");
        assert_eq!(config.dataset.flag_host, "flagsapi.com");
    }

    #[test]
    fn test_invalid_port_override_is_ignored() {
        let mut config = Config::default();
        config.apply_overrides(|key| (key == "EPIDASH_API_PORT").then(|| "http".to_string()));
        assert_eq!(config.api.port, 8501);
    }

    #[test]
    fn test_load_errors() {
        let missing = Config::load(Path::new("/nonexistent/epidash.toml"));
        assert!(matches!(missing, Err(ConfigError::Io { .. })));

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[api\nport = ").unwrap();
        assert!(matches!(
            Config::load(file.path()),
            Err(ConfigError::Parse { .. })
        ));
    }
}
