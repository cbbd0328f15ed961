//! Client configuration structures
//!
//! Loaded by `chainverdict-infra::config` from the environment or from a
//! JSON/TOML file. Every field has a default, so a partial file is valid.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_API_URL, DEFAULT_KEYCHAIN_SERVICE, DEFAULT_SESSION_FILE, DEFAULT_TIMEOUT_SECS,
};
use crate::impl_status_conversions;

/// Top-level client configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub api: ApiConfig,
    pub session: SessionConfig,
}

/// Backend endpoint settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Prefix for every request path, e.g. `http://localhost:5000/api`
    pub base_url: String,
    /// Per-request timeout; `0` disables it
    pub timeout_secs: u64,
    pub user_agent: Option<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: None,
        }
    }
}

impl ApiConfig {
    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_secs > 0).then(|| Duration::from_secs(self.timeout_secs))
    }
}

/// Where the session token and cached profile are persisted
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionBackend {
    /// Process memory only; the session ends with the process
    Memory,
    /// JSON file on disk
    #[default]
    File,
    /// Platform keychain
    Keychain,
}

impl_status_conversions!(SessionBackend {
    Memory => "memory",
    File => "file",
    Keychain => "keychain",
});

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub backend: SessionBackend,
    /// Session file location for the `file` backend
    pub path: PathBuf,
    /// Keychain service name for the `keychain` backend
    pub service_name: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            backend: SessionBackend::default(),
            path: PathBuf::from(DEFAULT_SESSION_FILE),
            service_name: DEFAULT_KEYCHAIN_SERVICE.to_string(),
        }
    }
}
