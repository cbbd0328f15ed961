//! Application constants
//!
//! Centralized location for the storage keys, endpoints and fixed messages
//! shared by the session layer and the request client.

// Persisted session state
pub const TOKEN_STORAGE_KEY: &str = "cv_access_token";
pub const USER_STORAGE_KEY: &str = "cv_user_data";

// Backend endpoint
pub const DEFAULT_API_URL: &str = "http://localhost:5000/api";
pub const API_URL_ENV: &str = "VITE_API_URL";
pub const API_URL_ENV_OVERRIDE: &str = "CHAINVERDICT_API_URL";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

// Session expiry handling
pub const LOGIN_PATH: &str = "/login";
/// Substring the backend puts in 401 messages caused by a bad or stale token.
pub const SESSION_EXPIRY_MARKER: &str = "token";
pub const SESSION_EXPIRED_MESSAGE: &str = "Session expired. Please login again.";

/// Message reported for a 2xx reply that carried neither data nor a message.
pub const EMPTY_SUCCESS_MESSAGE: &str = "Request succeeded";

// Keychain service used when the session lives in the platform keychain
pub const DEFAULT_KEYCHAIN_SERVICE: &str = "ChainVerdict.session";
pub const DEFAULT_SESSION_FILE: &str = "chainverdict-session.json";
