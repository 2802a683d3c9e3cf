//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use crate::data::{TableLoader, DEFAULT_CITY_COLUMN, DEFAULT_DATE_COLUMN, DEFAULT_TIMESTAMP_FORMATS};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,

    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Input spreadsheet configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DataConfig {
    #[serde(default = "default_data_path")]
    pub path: PathBuf,

    #[serde(default = "default_date_column")]
    pub date_column: String,

    #[serde(default = "default_city_column")]
    pub city_column: String,

    #[serde(default = "default_timestamp_formats")]
    pub timestamp_formats: Vec<String>,
}

fn default_data_path() -> PathBuf {
    PathBuf::from("users_with_location.xlsx")
}

fn default_date_column() -> String {
    DEFAULT_DATE_COLUMN.to_string()
}

fn default_city_column() -> String {
    DEFAULT_CITY_COLUMN.to_string()
}

fn default_timestamp_formats() -> Vec<String> {
    DEFAULT_TIMESTAMP_FORMATS
        .iter()
        .map(|f| f.to_string())
        .collect()
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            path: default_data_path(),
            date_column: default_date_column(),
            city_column: default_city_column(),
            timestamp_formats: default_timestamp_formats(),
        }
    }
}

impl DataConfig {
    /// Build a table loader for this configuration
    pub fn loader(&self) -> TableLoader {
        TableLoader::new()
            .with_date_column(&self.date_column)
            .with_city_column(&self.city_column)
            .with_timestamp_formats(&self.timestamp_formats)
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Allowed CORS origins; empty allows any origin
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: Vec::new(),
        }
    }
}

impl ServerConfig {
    /// Create config with custom host and port
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            ..Default::default()
        }
    }

    /// Get the socket address string
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
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
        }
    }
}

impl LoggingConfig {
    pub fn is_json(&self) -> bool {
        self.format.eq_ignore_ascii_case("json")
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Self::parse(&content).map_err(|e| match e {
            ConfigError::Parse { error, .. } => ConfigError::Parse {
                path: path.to_path_buf(),
                error,
            },
            other => other,
        })
    }

    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            path: PathBuf::new(),
            error: e.to_string(),
        })
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Config::default();
        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Load from default locations or environment
    ///
    /// The first config file found is used. A file that exists but cannot
    /// be read or parsed is an error rather than a silent fallback to
    /// defaults. Nothing is logged here, since this runs before logging is
    /// configured; see [`Config::default_path`] for reporting the source.
    pub fn load_default() -> Result<Self, ConfigError> {
        Self::load_first(&default_paths())
    }

    /// First existing config file among the default locations
    pub fn default_path() -> Option<PathBuf> {
        default_paths().into_iter().find(|p| p.exists())
    }

    fn load_first(paths: &[PathBuf]) -> Result<Self, ConfigError> {
        match paths.iter().find(|p| p.exists()) {
            Some(path) => Self::load_with_env(path),
            None => Self::from_env(),
        }
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from a key lookup (environment in production)
    fn apply_overrides(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        if let Some(path) = lookup("REGBOARD_DATA_PATH") {
            self.data.path = PathBuf::from(path);
        }

        if let Some(host) = lookup("REGBOARD_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("REGBOARD_PORT") {
            self.server.port = port.parse().map_err(|_| ConfigError::InvalidEnv {
                key: "REGBOARD_PORT".to_string(),
                value: port,
            })?;
        }

        if let Some(level) = lookup("REGBOARD_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = lookup("REGBOARD_LOG_FORMAT") {
            self.logging.format = format;
        }

        Ok(())
    }
}

/// Config file locations, in search order
fn default_paths() -> Vec<PathBuf> {
    [
        dirs::config_dir().map(|p| p.join("regboard").join("config.toml")),
        Some(PathBuf::from("/etc/regboard/config.toml")),
        Some(PathBuf::from("./config.toml")),
    ]
    .into_iter()
    .flatten()
    .collect()
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },

    #[error("Invalid value for {key}: {value:?}")]
    InvalidEnv { key: String, value: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# Regboard Configuration
#
# Environment variables override these settings:
# - REGBOARD_DATA_PATH
# - REGBOARD_HOST
# - REGBOARD_PORT
# - REGBOARD_LOG_LEVEL
# - REGBOARD_LOG_FORMAT

[data]
# User spreadsheet: an Excel workbook (.xlsx, .xls, .ods; first sheet
# is read) or a CSV export of it
path = "users_with_location.xlsx"

# Column holding the account creation timestamp
date_column = "Created_At"

# Column holding the city
city_column = "City"

# Accepted timestamp formats (strftime), tried in order.
# Native spreadsheet dates need no format. RFC 3339 timestamps and
# "YYYY-MM-DD HH:MM:SS+HH:MM" are always accepted as a last resort.
timestamp_formats = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S %Z",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d",
    "%m/%d/%Y %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %I:%M:%S %p",
    "%m/%d/%Y %I:%M %p",
    "%m/%d/%Y",
    "%Y/%m/%d",
    "%d.%m.%Y",
]

[server]
# Interface to bind
host = "0.0.0.0"

# Port to listen on
port = 3000

# Allowed CORS origins (empty = any)
cors_origins = []

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}
