//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub auth: AuthConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Which key-value backend to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    Memory,
    #[default]
    File,
    Sqlite,
}

impl FromStr for BackendKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "memory" => Ok(BackendKind::Memory),
            "file" | "json" => Ok(BackendKind::File),
            "sqlite" => Ok(BackendKind::Sqlite),
            other => Err(ConfigError::Invalid(format!("unknown storage backend '{}'", other))),
        }
    }
}

impl std::fmt::Display for BackendKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BackendKind::Memory => write!(f, "memory"),
            BackendKind::File => write!(f, "file"),
            BackendKind::Sqlite => write!(f, "sqlite"),
        }
    }
}

/// Storage backend configuration
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: BackendKind,

    #[serde(default = "default_data_dir")]
    pub data_dir: String,
}

fn default_data_dir() -> String {
    dirs::data_local_dir()
        .map(|p| p.join("gatehouse").to_string_lossy().to_string())
        .unwrap_or_else(|| "./gatehouse_data".to_string())
}

impl StorageConfig {
    /// `data_dir` with a leading `~/` expanded to the home directory
    pub fn data_path(&self) -> PathBuf {
        match self.data_dir.strip_prefix("~/") {
            Some(rest) => dirs::home_dir()
                .map(|home| home.join(rest))
                .unwrap_or_else(|| PathBuf::from(&self.data_dir)),
            None => PathBuf::from(&self.data_dir),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: BackendKind::default(),
            data_dir: default_data_dir(),
        }
    }
}

/// Auth workflow timing and session scoping
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// Simulated network latency before a form submission is processed
    #[serde(default = "default_submit_delay")]
    pub submit_delay_ms: u64,

    /// Delay between a successful register/login and the dashboard
    #[serde(default = "default_redirect_delay")]
    pub redirect_delay_ms: u64,

    /// Delay between logout and the login section
    #[serde(default = "default_logout_delay")]
    pub logout_delay_ms: u64,

    /// Optional prefix for the session slot keys
    #[serde(default)]
    pub session_scope: Option<String>,
}

fn default_submit_delay() -> u64 {
    1000
}

fn default_redirect_delay() -> u64 {
    1500
}

fn default_logout_delay() -> u64 {
    1000
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            submit_delay_ms: default_submit_delay(),
            redirect_delay_ms: default_redirect_delay(),
            logout_delay_ms: default_logout_delay(),
            session_scope: None,
        }
    }
}

impl AuthConfig {
    /// No artificial delays, for tests and scripted use
    pub fn immediate() -> Self {
        Self {
            submit_delay_ms: 0,
            redirect_delay_ms: 0,
            logout_delay_ms: 0,
            session_scope: None,
        }
    }

    pub fn submit_delay(&self) -> Duration {
        Duration::from_millis(self.submit_delay_ms)
    }

    pub fn redirect_delay(&self) -> Duration {
        Duration::from_millis(self.redirect_delay_ms)
    }

    pub fn logout_delay(&self) -> Duration {
        Duration::from_millis(self.logout_delay_ms)
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

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("gatehouse").join("config.toml")),
            Some(PathBuf::from("./gatehouse.toml")),
        ];

        for path_opt in config_paths.iter().flatten() {
            if path_opt.exists() {
                match Self::load_with_env(path_opt) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path_opt);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path_opt, e);
                    }
                }
            }
        }

        tracing::debug!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        // Storage overrides
        if let Ok(backend) = std::env::var("GATEHOUSE_BACKEND") {
            match backend.parse() {
                Ok(kind) => self.storage.backend = kind,
                Err(e) => tracing::warn!("Ignoring GATEHOUSE_BACKEND: {}", e),
            }
        }
        if let Ok(data_dir) = std::env::var("GATEHOUSE_DATA_DIR") {
            self.storage.data_dir = data_dir;
        }

        // Auth overrides
        if let Ok(delay) = std::env::var("GATEHOUSE_SUBMIT_DELAY_MS") {
            if let Ok(ms) = delay.parse() {
                self.auth.submit_delay_ms = ms;
            }
        }
        if let Ok(delay) = std::env::var("GATEHOUSE_REDIRECT_DELAY_MS") {
            if let Ok(ms) = delay.parse() {
                self.auth.redirect_delay_ms = ms;
            }
        }
        if let Ok(delay) = std::env::var("GATEHOUSE_LOGOUT_DELAY_MS") {
            if let Ok(ms) = delay.parse() {
                self.auth.logout_delay_ms = ms;
            }
        }
        if let Ok(scope) = std::env::var("GATEHOUSE_SESSION_SCOPE") {
            self.auth.session_scope = Some(scope);
        }

        // Logging overrides
        if let Ok(level) = std::env::var("GATEHOUSE_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("GATEHOUSE_LOG_FORMAT") {
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

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# Gatehouse Configuration
#
# Environment variables override these settings:
# - GATEHOUSE_BACKEND
# - GATEHOUSE_DATA_DIR
# - GATEHOUSE_SUBMIT_DELAY_MS
# - GATEHOUSE_REDIRECT_DELAY_MS
# - GATEHOUSE_LOGOUT_DELAY_MS
# - GATEHOUSE_SESSION_SCOPE
# - GATEHOUSE_LOG_LEVEL
# - GATEHOUSE_LOG_FORMAT

[storage]
# Key-value backend: memory, file or sqlite
backend = "file"

# Directory for the store file
data_dir = "~/.local/share/gatehouse"

[auth]
# Simulated latency before a form is processed (ms)
submit_delay_ms = 1000

# Delay before switching to the dashboard after register/login (ms)
redirect_delay_ms = 1500

# Delay before switching to the login section after logout (ms)
logout_delay_ms = 1000

# Prefix for the session slot keys (authToken, currentUser, rememberedUser)
# session_scope = "tab-1"

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

    #[test]
    fn test_defaults() {
        let config = Config::default();

        assert_eq!(config.storage.backend, BackendKind::File);
        assert_eq!(config.auth.submit_delay_ms, 1000);
        assert_eq!(config.auth.redirect_delay(), Duration::from_millis(1500));
        assert_eq!(config.auth.logout_delay(), Duration::from_millis(1000));
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn test_generated_config_parses() {
        let config = Config::parse(&generate_default_config()).unwrap();

        assert_eq!(config.storage.backend, BackendKind::File);
        assert_eq!(config.storage.data_dir, "~/.local/share/gatehouse");
        assert_eq!(config.auth.redirect_delay_ms, 1500);
        assert!(config.auth.session_scope.is_none());
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_data_path_expands_home() {
        let mut storage = StorageConfig::default();

        storage.data_dir = "./local".to_string();
        assert_eq!(storage.data_path(), PathBuf::from("./local"));

        storage.data_dir = "~/.local/share/gatehouse".to_string();
        if let Some(home) = dirs::home_dir() {
            assert_eq!(storage.data_path(), home.join(".local/share/gatehouse"));
        }
    }

    #[test]
    fn test_partial_config() {
        let config = Config::parse(
            r#"
            [storage]
            backend = "sqlite"

            [auth]
            submit_delay_ms = 0
            session_scope = "tab-2"
            "#,
        )
        .unwrap();

        assert_eq!(config.storage.backend, BackendKind::Sqlite);
        assert_eq!(config.auth.submit_delay_ms, 0);
        assert_eq!(config.auth.redirect_delay_ms, 1500);
        assert_eq!(config.auth.session_scope.as_deref(), Some("tab-2"));
    }

    #[test]
    fn test_invalid_backend() {
        assert!(Config::parse("[storage]\nbackend = \"redis\"").is_err());
        assert!("redis".parse::<BackendKind>().is_err());
        assert_eq!("SQLite".parse::<BackendKind>().unwrap(), BackendKind::Sqlite);
    }

    #[test]
    fn test_load_missing_file() {
        let err = Config::load(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gatehouse.toml");
        std::fs::write(&path, "[logging]\nlevel = \"debug\"\n").unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_logout_delay_env_override() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gatehouse.toml");
        std::fs::write(&path, "[auth]\nlogout_delay_ms = 250\n").unwrap();

        std::env::set_var("GATEHOUSE_LOGOUT_DELAY_MS", "0");
        let from_env = Config::from_env();
        let from_file = Config::load_with_env(&path).unwrap();
        std::env::remove_var("GATEHOUSE_LOGOUT_DELAY_MS");

        assert_eq!(from_env.auth.logout_delay(), Duration::ZERO);
        assert_eq!(from_file.auth.logout_delay_ms, 0);
        assert!(generate_default_config().contains("GATEHOUSE_LOGOUT_DELAY_MS"));
    }
}
