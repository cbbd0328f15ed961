//! Configuration loader
//!
//! Loads client configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. If an API URL variable is set, the environment wins
//! 2. Otherwise the first config file found by [`probe_config_paths`]
//! 3. Otherwise built-in defaults (`http://localhost:5000/api`)
//!
//! ## Environment Variables
//! - `VITE_API_URL`: Backend base URL (name shared with the web frontend)
//! - `CHAINVERDICT_API_URL`: Backend base URL, takes precedence over
//!   `VITE_API_URL`
//! - `CHAINVERDICT_HTTP_TIMEOUT_SECS`: Per-request timeout, `0` disables it
//! - `CHAINVERDICT_HTTP_USER_AGENT`: Optional `User-Agent` header
//! - `CHAINVERDICT_SESSION_BACKEND`: `memory`, `file` or `keychain`
//! - `CHAINVERDICT_SESSION_PATH`: Session file for the `file` backend
//! - `CHAINVERDICT_KEYCHAIN_SERVICE`: Service name for the `keychain` backend
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./chainverdict.json` or `./chainverdict.toml`
//! 2. `./config.json` or `./config.toml`
//! 3. `../config.{json,toml}` and `../../config.{json,toml}`
//! 4. The same names next to the executable

use std::path::{Path, PathBuf};

use chainverdict_domain::constants::{API_URL_ENV, API_URL_ENV_OVERRIDE};
use chainverdict_domain::{ChainVerdictError, ClientConfig, Result, SessionBackend};

const TIMEOUT_ENV: &str = "CHAINVERDICT_HTTP_TIMEOUT_SECS";
const USER_AGENT_ENV: &str = "CHAINVERDICT_HTTP_USER_AGENT";
const SESSION_BACKEND_ENV: &str = "CHAINVERDICT_SESSION_BACKEND";
const SESSION_PATH_ENV: &str = "CHAINVERDICT_SESSION_PATH";
const KEYCHAIN_SERVICE_ENV: &str = "CHAINVERDICT_KEYCHAIN_SERVICE";

/// Load configuration with automatic fallback strategy
///
/// # Errors
/// Returns `ChainVerdictError::Config` if the environment holds an invalid
/// value, or if a config file was found but cannot be read or parsed.
pub fn load() -> Result<ClientConfig> {
    if api_url_from_env().is_some() {
        let config = load_from_env()?;
        tracing::info!(base_url = %config.api.base_url, "Configuration loaded from environment variables");
        return Ok(config);
    }

    match probe_config_paths() {
        Some(path) => load_from_file(Some(path)),
        None => {
            tracing::debug!("No API URL in environment and no config file, using defaults");
            Ok(ClientConfig::default())
        }
    }
}

/// Load configuration from environment variables
///
/// An API URL variable is required; everything else falls back to its
/// default when unset.
///
/// # Errors
/// Returns `ChainVerdictError::Config` if no API URL is set or a variable
/// has an invalid value.
pub fn load_from_env() -> Result<ClientConfig> {
    let mut config = ClientConfig::default();

    config.api.base_url = api_url_from_env().ok_or_else(|| {
        ChainVerdictError::Config(format!(
            "Missing required environment variable: {} or {}",
            API_URL_ENV_OVERRIDE, API_URL_ENV
        ))
    })?;

    if let Some(raw) = env_opt(TIMEOUT_ENV) {
        config.api.timeout_secs = raw.parse::<u64>().map_err(|e| {
            ChainVerdictError::Config(format!("Invalid {}: {}", TIMEOUT_ENV, e))
        })?;
    }
    config.api.user_agent = env_opt(USER_AGENT_ENV);

    if let Some(raw) = env_opt(SESSION_BACKEND_ENV) {
        config.session.backend = raw
            .parse::<SessionBackend>()
            .map_err(|e| ChainVerdictError::Config(format!("{}: {}", SESSION_BACKEND_ENV, e)))?;
    }
    if let Some(path) = env_opt(SESSION_PATH_ENV) {
        config.session.path = PathBuf::from(path);
    }
    if let Some(service) = env_opt(KEYCHAIN_SERVICE_ENV) {
        config.session.service_name = service;
    }

    Ok(config)
}

/// Load configuration from a file
///
/// If `path` is `None`, probes the standard locations. JSON and TOML are
/// detected by extension; missing fields take their defaults.
///
/// # Errors
/// Returns `ChainVerdictError::Config` if:
/// - File not found (when path is specified)
/// - No config file found (when path is `None`)
/// - File format is invalid
pub fn load_from_file(path: Option<PathBuf>) -> Result<ClientConfig> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(ChainVerdictError::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            ChainVerdictError::Config(
                "No config file found in any of the standard locations".to_string(),
            )
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| ChainVerdictError::Config(format!("Failed to read config file: {}", e)))?;

    parse_config(&contents, &config_path)
}

/// Parse configuration by file extension (`.json` or `.toml`)
fn parse_config(contents: &str, path: &Path) -> Result<ClientConfig> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| ChainVerdictError::Config(format!("Invalid TOML format: {}", e))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| ChainVerdictError::Config(format!("Invalid JSON format: {}", e))),
        _ => Err(ChainVerdictError::Config(format!("Unsupported config format: {}", extension))),
    }
}

/// Probe the standard locations for a configuration file
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut candidates = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        candidates.extend(candidates_in(&cwd));
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            candidates.extend(candidates_in(exe_dir));
        }
    }

    candidates.into_iter().find(|path| path.is_file())
}

fn candidates_in(dir: &Path) -> Vec<PathBuf> {
    vec![
        dir.join("chainverdict.json"),
        dir.join("chainverdict.toml"),
        dir.join("config.json"),
        dir.join("config.toml"),
        dir.join("../config.json"),
        dir.join("../config.toml"),
        dir.join("../../config.json"),
        dir.join("../../config.toml"),
    ]
}

/// `CHAINVERDICT_API_URL`, then `VITE_API_URL`
fn api_url_from_env() -> Option<String> {
    env_opt(API_URL_ENV_OVERRIDE).or_else(|| env_opt(API_URL_ENV))
}

/// Environment variable, treating empty values as unset
fn env_opt(key: &str) -> Option<String> {
    std::env::var(key).ok().map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}
