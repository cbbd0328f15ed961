//! Session service - owns the bearer token and the cached user profile

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use chainverdict_domain::constants::{LOGIN_PATH, TOKEN_STORAGE_KEY, USER_STORAGE_KEY};
use chainverdict_domain::{ChainVerdictError, Result, UserProfile};
use parking_lot::Mutex;
use tracing::{debug, error, info, warn};

use super::ports::{Navigator, SessionStore};

/// Session manager
///
/// The only component that reads or writes the stored token. Expiry handling
/// is one-shot per token: [`SessionManager::expire`] only acts while the
/// rejected token is still the stored one, so the first caller clears the
/// stored credentials and navigates to the login page, and later callers
/// (including late replies to requests sent before a new login) only learn
/// that their session is gone.
pub struct SessionManager {
    store: Arc<dyn SessionStore>,
    navigator: Arc<dyn Navigator>,
    /// Held while the stored token is compared or replaced
    transition: Mutex<()>,
    expired: AtomicBool,
}

impl SessionManager {
    /// Create a new session manager
    pub fn new(store: Arc<dyn SessionStore>, navigator: Arc<dyn Navigator>) -> Self {
        Self { store, navigator, transition: Mutex::new(()), expired: AtomicBool::new(false) }
    }

    /// Current bearer token, if any
    ///
    /// A storage failure is logged and treated as "no token" so the request
    /// still goes out unauthenticated instead of failing locally.
    pub fn token(&self) -> Option<String> {
        match self.store.get(TOKEN_STORAGE_KEY) {
            Ok(token) => token.filter(|t| !t.is_empty()),
            Err(err) => {
                warn!(error = %err, "Failed to read session token");
                None
            }
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    /// Persist a freshly issued token (and profile) after a successful login
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for an empty token, or the store's error if
    /// persisting fails.
    pub fn begin(&self, token: &str, user: Option<&UserProfile>) -> Result<()> {
        if token.is_empty() {
            return Err(ChainVerdictError::InvalidInput("empty session token".into()));
        }

        let _transition = self.transition.lock();
        self.store.set(TOKEN_STORAGE_KEY, token)?;
        match user {
            Some(profile) => self.cache_user(profile)?,
            None => self.store.remove(USER_STORAGE_KEY)?,
        }

        self.expired.store(false, Ordering::Release);
        info!(has_profile = user.is_some(), "Session started");
        Ok(())
    }

    /// Profile cached at login, if present and readable
    ///
    /// # Errors
    ///
    /// Returns the store's error, or `Serialization` if the cached JSON is
    /// corrupt.
    pub fn cached_user(&self) -> Result<Option<UserProfile>> {
        self.store
            .get(USER_STORAGE_KEY)?
            .map(|raw| {
                serde_json::from_str(&raw).map_err(|e| {
                    ChainVerdictError::Serialization(format!("cached profile is corrupt: {e}"))
                })
            })
            .transpose()
    }

    /// Replace the cached profile (after a profile update)
    ///
    /// # Errors
    ///
    /// Returns the store's error if persisting fails.
    pub fn cache_user(&self, user: &UserProfile) -> Result<()> {
        let raw = serde_json::to_string(user)
            .map_err(|e| ChainVerdictError::Serialization(e.to_string()))?;
        self.store.set(USER_STORAGE_KEY, &raw)
    }

    /// Explicit logout: drop token and profile without navigating
    ///
    /// # Errors
    ///
    /// Returns the first storage error; both keys are still attempted.
    pub fn end(&self) -> Result<()> {
        let _transition = self.transition.lock();
        self.clear()?;
        info!("Session ended");
        Ok(())
    }

    /// React to a server-reported token expiry
    ///
    /// `rejected` is the token the failing request carried (`None` if it
    /// went out anonymous). Returns `true` if this call performed the cleanup
    /// and navigation, `false` if the session it belonged to is already gone
    /// or has been replaced by a newer login.
    pub fn expire(&self, rejected: Option<&str>) -> bool {
        {
            let _transition = self.transition.lock();
            if self.is_expired() || self.token().as_deref() != rejected {
                debug!("Rejected token is no longer current, nothing to expire");
                return false;
            }

            warn!("Session expired, clearing stored credentials");
            if let Err(err) = self.clear() {
                error!(error = %err, "Failed to clear expired session");
            }
            self.expired.store(true, Ordering::Release);
        }

        self.navigator.navigate(LOGIN_PATH);
        true
    }

    /// Whether an expiry has been handled since the last login
    pub fn is_expired(&self) -> bool {
        self.expired.load(Ordering::Acquire)
    }

    fn clear(&self) -> Result<()> {
        let token = self.store.remove(TOKEN_STORAGE_KEY);
        let user = self.store.remove(USER_STORAGE_KEY);
        token.and(user)
    }
}
