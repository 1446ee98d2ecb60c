//! Application configuration.
//!
//! Stored as TOML in the platform config dir (`config.toml`); environment variables
//! override the file for one run.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};
use url::Url;

use crate::infra::{HttpTransport, MockTransport, RentalApi, Session, Transport};
use crate::util::persistence::project_dirs;

pub const ENV_API_MODE: &str = "RENTAL_DESK_API_MODE";
pub const ENV_API_URL: &str = "RENTAL_DESK_API_URL";
pub const ENV_API_TOKEN: &str = "RENTAL_DESK_API_TOKEN";
pub const ENV_LOG: &str = "RENTAL_DESK_LOG";

const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config directory unavailable")]
    NotFound,
    #[error("failed to read or write config: {0}")]
    Io(#[from] std::io::Error),
    #[error("config file is not valid TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("failed to encode config: {0}")]
    Encode(#[from] toml::ser::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiMode {
    /// In-process mock backend with seeded data.
    #[default]
    Mock,
    Http,
}

impl ApiMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApiMode::Mock => "mock",
            ApiMode::Http => "http",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "mock" => Some(ApiMode::Mock),
            "http" | "live" => Some(ApiMode::Http),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default)]
    pub mode: ApiMode,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "http://localhost:8000/api/v1/".to_string()
}

fn default_timeout_secs() -> u64 {
    20
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            mode: ApiMode::default(),
            base_url: default_base_url(),
            access_token: None,
            refresh_token: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `tracing_subscriber::EnvFilter` directive; `RUST_LOG` still wins when set.
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

fn default_log_filter() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        project_dirs()
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE))
            .ok_or(ConfigError::NotFound)
    }

    /// File (or defaults), then environment overrides, then validation.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path()?, |key| std::env::var(key).ok())
    }

    /// Loads once at start-up; an unusable config falls back to defaults and the
    /// error is handed back for the caller to log.
    pub fn load_or_default() -> (Self, Option<ConfigError>) {
        Self::or_default(Self::load())
    }

    fn or_default(loaded: Result<Self, ConfigError>) -> (Self, Option<ConfigError>) {
        match loaded {
            Ok(config) => (config, None),
            Err(err) => (AppConfig::default(), Some(err)),
        }
    }

    fn load_from<F>(path: &Path, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = if path.exists() {
            Self::from_toml(&std::fs::read_to_string(path)?)?
        } else {
            AppConfig::default()
        };
        config.apply_env_overrides(lookup);
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml(raw: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(raw)?)
    }

    pub fn save(&self) -> Result<PathBuf, ConfigError> {
        self.validate()?;
        let path = Self::config_path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, toml::to_string_pretty(self)?)?;
        info!(path = %path.display(), "config saved");
        Ok(path)
    }

    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(mode) = lookup(ENV_API_MODE).and_then(|raw| ApiMode::parse(&raw)) {
            self.api.mode = mode;
        }
        if let Some(url) = lookup(ENV_API_URL) {
            self.api.base_url = url.trim().to_string();
        }
        if let Some(token) = lookup(ENV_API_TOKEN) {
            self.api.access_token = Some(token.trim().to_string());
        }
        if let Some(filter) = lookup(ENV_LOG) {
            self.logging.filter = filter.trim().to_string();
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = Url::parse(&self.api.base_url)
            .map_err(|err| ConfigError::Invalid(format!("base_url {}: {err}", self.api.base_url)))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::Invalid(format!(
                "base_url must use http or https, got {}",
                url.scheme()
            )));
        }
        if !self.api.base_url.ends_with('/') {
            return Err(ConfigError::Invalid(
                "base_url must end with '/'".to_string(),
            ));
        }
        if self.api.timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "timeout_secs must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Builds the API client for the configured mode.
    pub fn build_api(&self) -> Result<RentalApi, ConfigError> {
        let transport = match self.api.mode {
            ApiMode::Mock => Transport::Mock(MockTransport::seeded()),
            ApiMode::Http => {
                let session = Session::new(
                    self.api.access_token.clone(),
                    self.api.refresh_token.clone(),
                );
                let http = HttpTransport::new(
                    &self.api.base_url,
                    Duration::from_secs(self.api.timeout_secs),
                    session,
                )
                .map_err(|err| ConfigError::Invalid(err.to_string()))?;
                Transport::Http(http)
            }
        };
        debug!(mode = self.api.mode.as_str(), "api client built");
        Ok(RentalApi::new(transport))
    }
}

impl fmt::Display for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "api={} url={} token={} timeout={}s log={}",
            self.api.mode.as_str(),
            self.api.base_url,
            if self.api.access_token.is_some() {
                "set"
            } else {
                "none"
            },
            self.api.timeout_secs,
            self.logging.filter
        )
    }
}
