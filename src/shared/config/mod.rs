//! Application configuration module
//!
//! Provides the client configuration: where the backend lives, where to
//! send users on logout, and which storage area holds the session token.
//! Configuration comes from defaults, a TOML file, or environment
//! variables, and is validated before use.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default backend base URL
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080/hospital/";
/// Default route users are sent to after logout
pub const DEFAULT_LOGIN_ROUTE: &str = "/login";
/// Default storage key for the session token
pub const DEFAULT_TOKEN_KEY: &str = "token";
/// Default name of the server session cookie
pub const DEFAULT_SESSION_COOKIE: &str = "JSESSIONID";
/// Config file read by [`AppConfig::load`] when `LIFEBRIDGE_CONFIG` is unset
pub const DEFAULT_CONFIG_FILE: &str = "lifebridge.toml";

/// Which storage area holds the session token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageKind {
    /// Lives as long as the process; a new process starts logged out
    #[default]
    Session,
    /// Survives restarts, backed by a file in the user data directory
    Persistent,
}

impl std::str::FromStr for StorageKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "session" => Ok(Self::Session),
            "persistent" => Ok(Self::Persistent),
            other => Err(ConfigError::InvalidValue {
                key: "storage",
                value: other.to_string(),
            }),
        }
    }
}

/// Application configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Backend base URL, requests are resolved against it
    pub api_base_url: String,
    /// Route passed to the navigator on logout
    pub login_route: String,
    /// Storage key of the session token
    pub token_key: String,
    /// Cookie expired on logout
    pub session_cookie: String,
    /// Storage area used for the session token
    pub storage: StorageKind,
    /// File backing persistent storage, `<data dir>/lifebridge/storage.json`
    /// when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage_path: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            login_route: DEFAULT_LOGIN_ROUTE.to_string(),
            token_key: DEFAULT_TOKEN_KEY.to_string(),
            session_cookie: DEFAULT_SESSION_COOKIE.to_string(),
            storage: StorageKind::default(),
            storage_path: None,
        }
    }
}

impl AppConfig {
    /// Create a new AppConfigBuilder
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }

    /// Load from `LIFEBRIDGE_*` environment variables over the defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::default().with_env_overrides()
    }

    /// Read the config file named by `LIFEBRIDGE_CONFIG` (or
    /// `lifebridge.toml` if it exists), then apply the environment.
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var("LIFEBRIDGE_CONFIG")
            .map(PathBuf::from)
            .ok()
            .or_else(|| {
                let default = PathBuf::from(DEFAULT_CONFIG_FILE);
                default.exists().then_some(default)
            });
        let config = match path {
            Some(path) => {
                tracing::debug!("Loading config from {}", path.display());
                Self::from_file(path)?
            }
            None => Self::default(),
        };
        config.with_env_overrides()
    }

    /// Apply `LIFEBRIDGE_*` environment variables over `self`.
    pub fn with_env_overrides(mut self) -> Result<Self, ConfigError> {
        if let Ok(url) = std::env::var("LIFEBRIDGE_API_URL") {
            self.api_base_url = url;
        }
        if let Ok(route) = std::env::var("LIFEBRIDGE_LOGIN_ROUTE") {
            self.login_route = route;
        }
        if let Ok(storage) = std::env::var("LIFEBRIDGE_STORAGE") {
            self.storage = storage.parse()?;
        }
        if let Ok(path) = std::env::var("LIFEBRIDGE_STORAGE_PATH") {
            self.storage_path = Some(PathBuf::from(path));
        }
        self.validate()?;
        Ok(self)
    }

    /// Parse a TOML document. Missing keys fall back to the defaults.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: AppConfig =
            toml::from_str(source).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a TOML file such as `lifebridge.toml`.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let source = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&source)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = self.api_base_url.trim();
        if url.is_empty() {
            return Err(ConfigError::MissingValue("api_base_url"));
        }
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::InvalidUrl(self.api_base_url.clone()));
        }
        if !self.login_route.starts_with('/') {
            return Err(ConfigError::InvalidValue {
                key: "login_route",
                value: self.login_route.clone(),
            });
        }
        if self.token_key.trim().is_empty() {
            return Err(ConfigError::MissingValue("token_key"));
        }
        if self.session_cookie.trim().is_empty() {
            return Err(ConfigError::MissingValue("session_cookie"));
        }
        Ok(())
    }

    /// Get the full URL for an API endpoint
    pub fn api_url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.api_base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

/// Builder for AppConfig
#[derive(Debug, Default)]
pub struct AppConfigBuilder {
    api_base_url: Option<String>,
    login_route: Option<String>,
    token_key: Option<String>,
    session_cookie: Option<String>,
    storage: Option<StorageKind>,
    storage_path: Option<PathBuf>,
}

impl AppConfigBuilder {
    /// Set the backend base URL
    pub fn api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = Some(url.into());
        self
    }

    pub fn login_route(mut self, route: impl Into<String>) -> Self {
        self.login_route = Some(route.into());
        self
    }

    pub fn token_key(mut self, key: impl Into<String>) -> Self {
        self.token_key = Some(key.into());
        self
    }

    pub fn session_cookie(mut self, name: impl Into<String>) -> Self {
        self.session_cookie = Some(name.into());
        self
    }

    pub fn storage(mut self, storage: StorageKind) -> Self {
        self.storage = Some(storage);
        self
    }

    pub fn storage_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.storage_path = Some(path.into());
        self
    }

    /// Build and validate the configuration
    pub fn build(self) -> Result<AppConfig, ConfigError> {
        let defaults = AppConfig::default();
        let config = AppConfig {
            api_base_url: self.api_base_url.unwrap_or(defaults.api_base_url),
            login_route: self.login_route.unwrap_or(defaults.login_route),
            token_key: self.token_key.unwrap_or(defaults.token_key),
            session_cookie: self.session_cookie.unwrap_or(defaults.session_cookie),
            storage: self.storage.unwrap_or(defaults.storage),
            storage_path: self.storage_path.or(defaults.storage_path),
        };
        config.validate()?;
        Ok(config)
    }
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
    #[error("missing value: {0}")]
    MissingValue(&'static str),
    #[error("invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },
    #[error("config parse error: {0}")]
    Parse(String),
    #[error("config file error: {0}")]
    Io(#[from] std::io::Error),
}
