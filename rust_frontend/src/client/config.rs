//! Front-end configuration file support.
//!
//! Settings come from `banya.toml` with environment variables layered on
//! top:
//!
//! ```toml
//! [api]
//! base_url = "http://127.0.0.1:8000/api"
//! backend = "http"        # or "local"
//! timeout_secs = 10
//!
//! [kitchen]
//! default_category = "first"   # "none", or a category slug
//!
//! [gateway]
//! host = "0.0.0.0"
//! port = 8080
//! ```
//!
//! `first` and `none` are keywords for `kitchen.default_category`. A category
//! whose slug is literally one of them is selected with the `slug:` prefix,
//! e.g. `default_category = "slug:first"`.
//!
//! # Environment Variables
//!
//! - `BANYA_API_URL`: overrides `api.base_url`
//! - `BANYA_API_BACKEND`: overrides `api.backend`
//! - `BANYA_API_TIMEOUT_SECS`: overrides `api.timeout_secs`
//! - `HOST`, `PORT`: override the gateway bind address

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use log::debug;
use serde::{Deserialize, Serialize};

use super::error::ClientError;
use super::factory::ApiBackend;
use crate::services::kitchen::DefaultCategoryPolicy;

pub const CONFIG_FILE_NAME: &str = "banya.toml";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("No {CONFIG_FILE_NAME} found in standard locations")]
    NotFound,

    #[error("Invalid value for {key}: '{value}'")]
    InvalidValue { key: String, value: String },
}

impl From<ConfigError> for ClientError {
    fn from(err: ConfigError) -> Self {
        ClientError::configuration(err.to_string())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FrontendConfig {
    #[serde(default)]
    pub api: ApiSettings,
    #[serde(default)]
    pub kitchen: KitchenSettings,
    #[serde(default)]
    pub gateway: GatewaySettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiSettings {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default)]
    pub backend: ApiBackend,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            backend: ApiBackend::default(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ApiSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KitchenSettings {
    #[serde(default)]
    pub default_category: DefaultCategoryPolicy,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GatewaySettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for GatewaySettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl GatewaySettings {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn default_base_url() -> String {
    "http://127.0.0.1:8000/api".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

impl FrontendConfig {
    /// Load configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(toml::from_str(&content)?)
    }

    /// Searches for `banya.toml` in:
    /// 1. Current directory
    /// 2. `rust_frontend/` directory
    /// 3. Parent directory
    pub fn from_default_location() -> Result<Self, ConfigError> {
        let search_paths = [
            PathBuf::from(CONFIG_FILE_NAME),
            PathBuf::from("rust_frontend").join(CONFIG_FILE_NAME),
            PathBuf::from("..").join(CONFIG_FILE_NAME),
        ];

        for path in search_paths {
            if path.exists() {
                return Self::from_file(&path);
            }
        }

        Err(ConfigError::NotFound)
    }

    /// Default-location file if one exists (defaults otherwise), then
    /// environment overrides.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = match Self::from_default_location() {
            Ok(config) => config,
            Err(ConfigError::NotFound) => {
                debug!("No {} found, using defaults", CONFIG_FILE_NAME);
                Self::default()
            }
            Err(e) => return Err(e),
        };
        config.apply_env()?;
        Ok(config)
    }

    /// Overlay the environment variables listed in the module docs.
    pub fn apply_env(&mut self) -> Result<(), ConfigError> {
        if let Ok(url) = env::var("BANYA_API_URL") {
            self.api.base_url = url;
        }
        if let Ok(backend) = env::var("BANYA_API_BACKEND") {
            self.api.backend = backend
                .parse()
                .map_err(|_| invalid("BANYA_API_BACKEND", &backend))?;
        }
        if let Ok(timeout) = env::var("BANYA_API_TIMEOUT_SECS") {
            self.api.timeout_secs = timeout
                .parse()
                .map_err(|_| invalid("BANYA_API_TIMEOUT_SECS", &timeout))?;
        }
        if let Ok(host) = env::var("HOST") {
            self.gateway.host = host;
        }
        if let Ok(port) = env::var("PORT") {
            self.gateway.port = port.parse().map_err(|_| invalid("PORT", &port))?;
        }
        Ok(())
    }
}

fn invalid(key: &str, value: &str) -> ConfigError {
    ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
    }
}
