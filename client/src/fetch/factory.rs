//! Client factory for dependency injection.
//!
//! This module creates fetch clients based on runtime configuration.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use super::client::FetchClient;
use super::clients::LocalFetchClient;
#[cfg(feature = "http-client")]
use super::clients::HttpFetchClient;
use super::config::ClientConfig;
use super::error::{FetchError, FetchResult};

/// Client type configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientType {
    /// Remote schedule API over HTTP
    Http,
    /// In-memory local client
    Local,
}

impl FromStr for ClientType {
    type Err = String;

    /// Parse client type from string.
    ///
    /// # Arguments
    /// * `s` - String representation ("http", "remote", "local", "memory")
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "http" | "remote" => Ok(Self::Http),
            "local" | "memory" => Ok(Self::Local),
            _ => Err(format!("Unknown client type: {}", s)),
        }
    }
}

impl fmt::Display for ClientType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClientType::Http => f.write_str("http"),
            ClientType::Local => f.write_str("local"),
        }
    }
}

impl ClientType {
    /// Get client type from environment variables.
    ///
    /// Reads `ORAR_CLIENT_TYPE`. Without it, defaults to Http when
    /// `ORAR_API_URL` is set, otherwise Local.
    pub fn from_env() -> Self {
        if let Ok(val) = std::env::var("ORAR_CLIENT_TYPE") {
            return val.parse().unwrap_or(Self::Local);
        }

        if std::env::var("ORAR_API_URL").is_ok() {
            Self::Http
        } else {
            Self::Local
        }
    }
}

/// Factory for creating fetch clients.
///
/// # Example
/// ```ignore
/// use orar_rust::fetch::{ClientConfig, ClientFactory};
///
/// let config = ClientConfig::from_default_location()?;
/// let client = ClientFactory::create(&config)?;
/// ```
pub struct ClientFactory;

impl ClientFactory {
    /// Create a client as described by `config`.
    ///
    /// # Returns
    /// * `Ok(Arc<dyn FetchClient>)` - Shared client instance
    /// * `Err(FetchError)` - Unknown type, missing settings, or disabled feature
    pub fn create(config: &ClientConfig) -> FetchResult<Arc<dyn FetchClient>> {
        let client_type = config.client_type().map_err(FetchError::configuration)?;
        match client_type {
            ClientType::Local => Ok(Self::create_local()),
            ClientType::Http => {
                #[cfg(feature = "http-client")]
                {
                    let client = HttpFetchClient::new(&config.http)?;
                    Ok(Arc::new(client) as Arc<dyn FetchClient>)
                }
                #[cfg(not(feature = "http-client"))]
                {
                    Err(FetchError::configuration("HTTP client feature not enabled"))
                }
            }
        }
    }

    /// Create an empty in-memory client.
    pub fn create_local() -> Arc<dyn FetchClient> {
        Arc::new(LocalFetchClient::new())
    }
}
