//! Conversions from external infrastructure errors into domain errors.

use std::io::Error as IoError;

use chainverdict_domain::ChainVerdictError;
use keyring::Error as KeyringError;
use reqwest::Error as HttpError;
use serde_json::Error as JsonError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub ChainVerdictError);

impl From<InfraError> for ChainVerdictError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<ChainVerdictError> for InfraError {
    fn from(value: ChainVerdictError) -> Self {
        InfraError(value)
    }
}

/// Extension trait to make the conversion logic explicit in tests and within
/// this module.
trait IntoChainVerdictError {
    fn into_chainverdict(self) -> ChainVerdictError;
}

/* -------------------------------------------------------------------------- */
/* keyring::Error → ChainVerdictError */
/* -------------------------------------------------------------------------- */

impl IntoChainVerdictError for KeyringError {
    fn into_chainverdict(self) -> ChainVerdictError {
        use KeyringError::*;

        let description = self.to_string();

        match self {
            NoEntry => ChainVerdictError::Storage("keychain entry not found".into()),
            BadEncoding(_) => {
                ChainVerdictError::Storage("credential in keychain is not valid UTF-8".into())
            }
            TooLong(name, limit) => ChainVerdictError::Storage(format!(
                "keychain attribute '{name}' exceeds platform limit ({limit})"
            )),
            Invalid(attr, reason) => ChainVerdictError::Storage(format!(
                "keychain attribute '{attr}' is invalid: {reason}"
            )),
            PlatformFailure(err) => {
                ChainVerdictError::Storage(format!("keychain platform error: {err}"))
            }
            NoStorageAccess(err) => {
                ChainVerdictError::Storage(format!("unable to access secure storage: {err}"))
            }
            _ => ChainVerdictError::Storage(description),
        }
    }
}

impl From<KeyringError> for InfraError {
    fn from(value: KeyringError) -> Self {
        InfraError(value.into_chainverdict())
    }
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → ChainVerdictError */
/* -------------------------------------------------------------------------- */

impl IntoChainVerdictError for HttpError {
    fn into_chainverdict(self) -> ChainVerdictError {
        if self.is_timeout() {
            return ChainVerdictError::Network("HTTP request timed out".into());
        }

        if self.is_connect() {
            return ChainVerdictError::Network(format!("HTTP connection failure: {self}"));
        }

        if self.is_builder() {
            return ChainVerdictError::InvalidInput(format!("invalid HTTP request: {self}"));
        }

        if self.is_decode() {
            return ChainVerdictError::Serialization(format!("invalid HTTP response: {self}"));
        }

        ChainVerdictError::Network(self.to_string())
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        InfraError(value.into_chainverdict())
    }
}

/* -------------------------------------------------------------------------- */
/* std::io::Error / serde_json::Error → ChainVerdictError */
/* -------------------------------------------------------------------------- */

impl IntoChainVerdictError for IoError {
    fn into_chainverdict(self) -> ChainVerdictError {
        ChainVerdictError::Storage(format!("I/O failure ({:?}): {self}", self.kind()))
    }
}

impl From<IoError> for InfraError {
    fn from(value: IoError) -> Self {
        InfraError(value.into_chainverdict())
    }
}

impl IntoChainVerdictError for JsonError {
    fn into_chainverdict(self) -> ChainVerdictError {
        ChainVerdictError::Serialization(format!(
            "invalid JSON at line {} column {}: {self}",
            self.line(),
            self.column()
        ))
    }
}

impl From<JsonError> for InfraError {
    fn from(value: JsonError) -> Self {
        InfraError(value.into_chainverdict())
    }
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */
