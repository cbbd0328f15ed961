//! Platform keychain session store
//!
//! Each storage key becomes one keychain entry under a shared service name,
//! e.g. service `ChainVerdict.session`, account `cv_access_token`.

use chainverdict_core::SessionStore;
use chainverdict_domain::{ChainVerdictError, Result};
use keyring::Entry;
use tracing::debug;

use crate::errors::InfraError;

/// Session values held in the platform keychain
///
/// Every call is a blocking round trip to the OS credential service, and the
/// request client reads the token once per request. On an async runtime that
/// blocks a worker thread for the duration of the lookup; hosts issuing many
/// concurrent requests should prefer the file or memory backend.
pub struct KeychainSessionStore {
    service_name: String,
}

impl KeychainSessionStore {
    pub fn new(service_name: impl Into<String>) -> Self {
        Self { service_name: service_name.into() }
    }

    pub fn service_name(&self) -> &str {
        &self.service_name
    }

    fn entry(&self, key: &str) -> Result<Entry> {
        Entry::new(&self.service_name, key).map_err(to_domain)
    }
}

impl SessionStore for KeychainSessionStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        debug!(service = %self.service_name, key = %key, "Reading session value from keychain");
        match self.entry(key)?.get_password() {
            Ok(value) => Ok(Some(value)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(err) => Err(to_domain(err)),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        debug!(service = %self.service_name, key = %key, "Storing session value in keychain");
        self.entry(key)?.set_password(value).map_err(to_domain)
    }

    fn remove(&self, key: &str) -> Result<()> {
        debug!(service = %self.service_name, key = %key, "Deleting session value from keychain");
        match self.entry(key)?.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(err) => Err(to_domain(err)),
        }
    }
}

fn to_domain(err: keyring::Error) -> ChainVerdictError {
    InfraError::from(err).into()
}
