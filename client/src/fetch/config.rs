//! Client configuration file support.
//!
//! This module reads fetch-client configuration from TOML files or from
//! environment variables.

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use super::error::{FetchError, FetchResult};
use super::factory::ClientType;

/// Client configuration from file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    pub client: ClientSettings,
    #[serde(default)]
    pub http: HttpSettings,
}

/// Client type settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientSettings {
    #[serde(rename = "type")]
    pub client_type: String,
}

/// Remote schedule API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpSettings {
    #[serde(default)]
    pub base_url: String,
    #[serde(default = "default_schedule_path")]
    pub schedule_path: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            schedule_path: default_schedule_path(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_schedule_path() -> String {
    "/api/schedule".to_string()
}

fn default_timeout_secs() -> u64 {
    20
}

impl HttpSettings {
    /// `base_url` joined with `schedule_path`, without doubled slashes.
    pub fn schedule_url(&self) -> String {
        let base = self.base_url.trim_end_matches('/');
        let path = self.schedule_path.trim_start_matches('/');
        if path.is_empty() {
            base.to_string()
        } else {
            format!("{}/{}", base, path)
        }
    }
}

impl ClientConfig {
    /// Configuration for the in-memory client.
    pub fn local() -> Self {
        Self {
            client: ClientSettings {
                client_type: "local".to_string(),
            },
            http: HttpSettings::default(),
        }
    }

    /// Configuration for the HTTP client against `base_url`.
    pub fn http(base_url: impl Into<String>) -> Self {
        Self {
            client: ClientSettings {
                client_type: "http".to_string(),
            },
            http: HttpSettings {
                base_url: base_url.into(),
                ..HttpSettings::default()
            },
        }
    }

    /// Load client configuration from a TOML file.
    ///
    /// # Arguments
    /// * `path` - Path to the configuration file
    ///
    /// # Returns
    /// * `Ok(ClientConfig)` if successful
    /// * `Err(FetchError)` if the file cannot be read or parsed
    pub fn from_file<P: AsRef<Path>>(path: P) -> FetchResult<Self> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| {
            FetchError::configuration(format!("Failed to read config file: {}", e))
        })?;

        let config: ClientConfig = toml::from_str(&content).map_err(|e| {
            FetchError::configuration(format!("Failed to parse config file: {}", e))
        })?;

        Ok(config)
    }

    /// Load client configuration from the default location.
    ///
    /// Searches for `orar.toml` in:
    /// 1. Current directory
    /// 2. `client/` directory
    /// 3. Parent directory
    pub fn from_default_location() -> FetchResult<Self> {
        let search_paths = [
            PathBuf::from("orar.toml"),
            PathBuf::from("client/orar.toml"),
            PathBuf::from("../orar.toml"),
        ];

        for path in search_paths {
            if path.exists() {
                return Self::from_file(&path);
            }
        }

        Err(FetchError::configuration(
            "No orar.toml found in standard locations",
        ))
    }

    /// Build configuration from environment variables.
    ///
    /// # Environment Variables
    /// - `ORAR_CLIENT_TYPE` (optional): `http` | `local`; see [`ClientType::from_env`]
    /// - `ORAR_API_URL` (required for `http`): base URL of the schedule API
    /// - `ORAR_SCHEDULE_PATH` (optional, default: `/api/schedule`)
    /// - `ORAR_TIMEOUT_SECS` (optional, default: 20)
    pub fn from_env() -> FetchResult<Self> {
        let client_type = ClientType::from_env();
        let base_url = env::var("ORAR_API_URL").unwrap_or_default();
        let schedule_path =
            env::var("ORAR_SCHEDULE_PATH").unwrap_or_else(|_| default_schedule_path());
        let timeout_secs = match env::var("ORAR_TIMEOUT_SECS") {
            Ok(raw) => raw.trim().parse().map_err(|_| {
                FetchError::configuration("ORAR_TIMEOUT_SECS must be a whole number of seconds")
            })?,
            Err(_) => default_timeout_secs(),
        };

        if client_type == ClientType::Http && base_url.is_empty() {
            return Err(FetchError::configuration(
                "ORAR_API_URL environment variable not set",
            ));
        }

        Ok(Self {
            client: ClientSettings {
                client_type: client_type.to_string(),
            },
            http: HttpSettings {
                base_url,
                schedule_path,
                timeout_secs,
            },
        })
    }

    /// Get the client type from configuration.
    pub fn client_type(&self) -> Result<ClientType, String> {
        ClientType::from_str(&self.client.client_type)
    }

    pub fn schedule_url(&self) -> String {
        self.http.schedule_url()
    }
}
