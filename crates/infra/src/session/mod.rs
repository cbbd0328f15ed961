//! Session-state adapters
//!
//! Implementations of the `SessionStore` and `Navigator` ports from
//! `chainverdict-core`, plus [`open_store`] to pick a store from config.

pub mod file;
pub mod keychain;
pub mod memory;
pub mod navigator;

use std::sync::Arc;

use chainverdict_core::SessionStore;
use chainverdict_domain::{Result, SessionBackend, SessionConfig};
use tracing::info;

pub use file::FileSessionStore;
pub use keychain::KeychainSessionStore;
pub use memory::MemorySessionStore;
#[cfg(test)]
pub(crate) use navigator::RecordingNavigator;
pub use navigator::{ChannelNavigator, NavigationEvent, TracingNavigator};

/// Build the session store selected by `config`
///
/// # Errors
///
/// Returns a storage error if the session file exists but cannot be read.
pub fn open_store(config: &SessionConfig) -> Result<Arc<dyn SessionStore>> {
    info!(backend = %config.backend, "Opening session store");

    let store: Arc<dyn SessionStore> = match config.backend {
        SessionBackend::Memory => Arc::new(MemorySessionStore::new()),
        SessionBackend::File => Arc::new(FileSessionStore::open(&config.path)?),
        SessionBackend::Keychain => Arc::new(KeychainSessionStore::new(&config.service_name)),
    };
    Ok(store)
}
