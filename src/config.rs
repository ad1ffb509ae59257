//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::api::ApiConfig;
use crate::dataset::{builtin_sources, DatasetSource};
use crate::explore::SessionConfig;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,

    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub sessions: SessionsConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Dataset source configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DataConfig {
    /// Directory that relative dataset paths are resolved against
    #[serde(default = "default_data_dir")]
    pub data_dir: String,

    /// Dataset sources; the built-in catalog when empty
    #[serde(default)]
    pub datasets: Vec<DatasetSource>,
}

fn default_data_dir() -> String {
    "./Data".to_string()
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            datasets: Vec::new(),
        }
    }
}

impl DataConfig {
    /// Configured sources with paths resolved against `data_dir`
    pub fn sources(&self) -> Vec<DatasetSource> {
        let sources = if self.datasets.is_empty() {
            builtin_sources()
        } else {
            self.datasets.clone()
        };
        let data_dir = Path::new(&self.data_dir);
        sources.into_iter().map(|s| s.resolved(data_dir)).collect()
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Allowed CORS origins; permissive when empty
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8050
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

/// Explore session configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SessionsConfig {
    #[serde(default = "default_max_sessions")]
    pub max_sessions: usize,

    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_secs: u64,
}

fn default_max_sessions() -> usize {
    1000
}

fn default_idle_timeout() -> u64 {
    3600 // 1 hour
}

impl Default for SessionsConfig {
    fn default() -> Self {
        Self {
            max_sessions: default_max_sessions(),
            idle_timeout_secs: default_idle_timeout(),
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

    /// Config file locations searched when none is given, in priority order
    pub fn default_paths() -> Vec<PathBuf> {
        [
            dirs::config_dir().map(|p| p.join("nuclide-explorer").join("config.toml")),
            Some(PathBuf::from("/etc/nuclide-explorer/config.toml")),
            Some(PathBuf::from("./config.toml")),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    /// Load the first existing file among `candidates`, with environment
    /// overrides. A file that exists but cannot be read or parsed is an
    /// error. Returns `None` when no candidate exists.
    pub fn load_first(candidates: &[PathBuf]) -> Result<Option<(Self, PathBuf)>, ConfigError> {
        match candidates.iter().find(|p| p.exists()) {
            Some(path) => Ok(Some((Self::load_with_env(path)?, path.clone()))),
            None => Ok(None),
        }
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) -> Result<(), ConfigError> {
        if let Some(data_dir) = var("NUCLIDE_DATA_DIR") {
            self.data.data_dir = data_dir;
        }

        if let Some(host) = var("NUCLIDE_HOST") {
            self.server.host = host;
        }
        if let Some(port) = var("NUCLIDE_PORT") {
            self.server.port = port.parse().map_err(|_| ConfigError::InvalidEnv {
                key: "NUCLIDE_PORT",
                value: port.clone(),
            })?;
        }

        if let Some(level) = var("NUCLIDE_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = var("NUCLIDE_LOG_FORMAT") {
            self.logging.format = format;
        }
        Ok(())
    }

    /// HTTP server settings for the API layer
    pub fn api_config(&self) -> ApiConfig {
        ApiConfig {
            host: self.server.host.clone(),
            port: self.server.port,
            cors_origins: self.server.cors_origins.clone(),
            ..Default::default()
        }
    }

    /// Session store settings
    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            max_sessions: self.sessions.max_sessions,
            idle_timeout: Duration::from_secs(self.sessions.idle_timeout_secs),
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

    #[error("Invalid value for {key}: {value}")]
    InvalidEnv { key: &'static str, value: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# Nuclide Explorer Configuration
#
# Environment variables override these settings:
# - NUCLIDE_DATA_DIR
# - NUCLIDE_HOST
# - NUCLIDE_PORT
# - NUCLIDE_LOG_LEVEL
# - NUCLIDE_LOG_FORMAT

[data]
# Directory containing the dataset files
data_dir = "./Data"

# Dataset sources. Leave out to use the built-in catalog
# (AME 2016 mass and reaction tables, FRDM 2012, Mass Explorer).
#
# [[data.datasets]]
# name = "FRDM 2012"
# path = "frdm2012named.csv"
# label_field = "EL"
# [data.datasets.defaults]
# x = "Emic"
# y = "Es+p"
# color = "Ebind"
# nuclide_color = "eps4"
#
# [[data.datasets]]
# name = "Mass Explorer"
# path = "Mass_Explorer/All_Nuclei.xlsx"
# label_field = "Symbol"
# format = { kind = "workbook", strip_suffix = "_all_nuclei" }
# [data.datasets.defaults]
# x = "S_p_(MeV)"
# y = "S_n_(MeV)"

[server]
# HTTP server host
host = "0.0.0.0"

# HTTP server port
port = 8050

# Allowed CORS origins (empty = any)
cors_origins = []

[sessions]
# Maximum number of concurrent explore sessions
max_sessions = 1000

# Drop sessions idle for longer than this (seconds)
idle_timeout_secs = 3600

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_config_parses() {
        let config = Config::parse(&generate_default_config()).unwrap();
        assert_eq!(config.server.port, 8050);
        assert_eq!(config.sessions.max_sessions, 1000);
        assert_eq!(config.logging.format, "pretty");
        assert!(config.data.datasets.is_empty());
    }

    #[test]
    fn test_builtin_sources_are_resolved() {
        let config = Config::parse("[data]\ndata_dir = \"/srv/data\"\n").unwrap();
        let sources = config.data.sources();
        assert_eq!(sources.len(), 4);
        assert_eq!(sources[2].path, PathBuf::from("/srv/data/frdm2012named.csv"));
    }

    #[test]
    fn test_configured_datasets_replace_catalog() {
        let config = Config::parse(
            r#"
            [[data.datasets]]
            name = "FRDM 2012"
            path = "frdm.csv"
            label_field = "EL"
            [data.datasets.defaults]
            x = "Emic"
            y = "Es+p"
            "#,
        )
        .unwrap();
        let sources = config.data.sources();
        assert_eq!(sources.len(), 1);
        assert_eq!(sources[0].path, PathBuf::from("./Data/frdm.csv"));
    }

    #[test]
    fn test_env_overrides() {
        let vars: HashMap<&str, &str> = [
            ("NUCLIDE_PORT", "9000"),
            ("NUCLIDE_HOST", "127.0.0.1"),
            ("NUCLIDE_LOG_FORMAT", "json"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config
            .apply_overrides(|k| vars.get(k).map(|v| v.to_string()))
            .unwrap();

        assert_eq!(config.server.port, 9000);
        assert_eq!(config.api_config().addr(), "127.0.0.1:9000");
        assert_eq!(config.logging.format, "json");
        assert_eq!(config.data.data_dir, "./Data");
    }

    #[test]
    fn test_invalid_port_override_is_an_error() {
        let mut config = Config::default();
        let err = config
            .apply_overrides(|k| (k == "NUCLIDE_PORT").then(|| "not-a-port".to_string()))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnv { key: "NUCLIDE_PORT", .. }));
        assert_eq!(config.server.port, 8050);
    }

    #[test]
    fn test_load_first_skips_missing_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[server]\nport = 9100\n").unwrap();

        let candidates = vec![dir.path().join("missing.toml"), path.clone()];
        let (config, found) = Config::load_first(&candidates).unwrap().unwrap();
        assert_eq!(found, path);
        assert_eq!(config.server.port, 9100);

        assert!(Config::load_first(&candidates[..1]).unwrap().is_none());
    }

    #[test]
    fn test_malformed_default_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[server\nport = \"not a port\"\n").unwrap();

        let err = Config::load_first(&[path]).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_session_config() {
        let config = Config::parse("[sessions]\nidle_timeout_secs = 5\n").unwrap();
        let sessions = config.session_config();
        assert_eq!(sessions.idle_timeout, Duration::from_secs(5));
        assert_eq!(sessions.max_sessions, 1000);
    }
}
