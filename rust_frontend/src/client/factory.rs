//! Client factory.
//!
//! Picks the backend named by configuration and hands it out behind the
//! [`FullApi`] trait object every view works with.

use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::backends::{HttpApiClient, LocalApi};
use super::config::{ApiSettings, FrontendConfig};
use super::error::ClientResult;
use super::traits::FullApi;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiBackend {
    /// The REST API over HTTP
    #[default]
    Http,
    /// In-memory API
    Local,
}

impl FromStr for ApiBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "http" | "rest" => Ok(Self::Http),
            "local" | "memory" => Ok(Self::Local),
            _ => Err(format!("Unknown API backend: {}", s)),
        }
    }
}

impl fmt::Display for ApiBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Http => f.write_str("http"),
            Self::Local => f.write_str("local"),
        }
    }
}

pub struct ApiFactory;

impl ApiFactory {
    pub fn create(settings: &ApiSettings) -> ClientResult<Arc<dyn FullApi>> {
        match settings.backend {
            ApiBackend::Http => {
                let client = HttpApiClient::new(&settings.base_url, settings.timeout())?;
                Ok(Arc::new(client))
            }
            ApiBackend::Local => Ok(Self::create_local()),
        }
    }

    /// Empty in-memory API.
    pub fn create_local() -> Arc<dyn FullApi> {
        Arc::new(LocalApi::new())
    }

    /// Defaults, the default-location file, then the environment.
    pub fn from_env() -> ClientResult<Arc<dyn FullApi>> {
        let config = FrontendConfig::load()?;
        Self::create(&config.api)
    }

    pub fn from_config_file<P: AsRef<Path>>(path: P) -> ClientResult<Arc<dyn FullApi>> {
        let config = FrontendConfig::from_file(path)?;
        Self::create(&config.api)
    }
}
