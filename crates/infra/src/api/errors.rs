//! API-specific error types
//!
//! Classifies every way a request can fail so callers can tell a dead
//! session from a rejected request from an unreachable server.

use std::time::Duration;

use chainverdict_domain::constants::SESSION_EXPIRED_MESSAGE;
use chainverdict_domain::ChainVerdictError;
use thiserror::Error;

/// Categories of API errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorCategory {
    /// Token rejected by the server; the user must log in again
    SessionExpired,
    /// 4xx responses other than session expiry
    Client,
    /// 5xx responses
    Server,
    /// Transport failures, timeouts and unreadable bodies
    Network,
    /// A 2xx reply whose JSON did not fit the requested type
    Decode,
    /// Client construction or request building problems
    Config,
}

/// API operation errors
///
/// `Display` yields the text a UI can show as-is: for HTTP failures that is
/// the server's own message.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{}", SESSION_EXPIRED_MESSAGE)]
    SessionExpired,

    #[error("{message}")]
    Http { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Unexpected response shape: {0}")]
    Decode(String),

    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl ApiError {
    /// Error for a non-2xx status, using the server message when present
    pub fn from_status(status: u16, message: Option<String>) -> Self {
        let message = message
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| format!("HTTP error! status: {status}"));
        Self::Http { status, message }
    }

    /// Get the error category for this error
    pub fn category(&self) -> ApiErrorCategory {
        match self {
            Self::SessionExpired => ApiErrorCategory::SessionExpired,
            Self::Http { status, .. } if *status >= 500 => ApiErrorCategory::Server,
            Self::Http { .. } => ApiErrorCategory::Client,
            Self::Network(_) | Self::Timeout(_) => ApiErrorCategory::Network,
            Self::Decode(_) => ApiErrorCategory::Decode,
            Self::InvalidRequest(_) | Self::Config(_) => ApiErrorCategory::Config,
        }
    }

    /// HTTP status behind this error, if the server answered
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::SessionExpired => Some(401),
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_session_expired(&self) -> bool {
        matches!(self, Self::SessionExpired)
    }
}

/// Convert errors raised below the request client (transport, config)
impl From<ChainVerdictError> for ApiError {
    fn from(err: ChainVerdictError) -> Self {
        match err {
            ChainVerdictError::Config(msg) => Self::Config(msg),
            ChainVerdictError::InvalidInput(msg) => Self::InvalidRequest(msg),
            ChainVerdictError::Network(msg)
            | ChainVerdictError::Serialization(msg)
            | ChainVerdictError::Storage(msg)
            | ChainVerdictError::Auth(msg)
            | ChainVerdictError::Internal(msg) => Self::Network(msg),
        }
    }
}
