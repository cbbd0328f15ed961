//! Port interfaces for session state
//!
//! These traits define the boundaries between the session service and the
//! infrastructure that stores credentials or moves the user around the app.

use chainverdict_domain::Result;

/// Key/value persistence for session state (token, cached profile)
///
/// Mirrors browser local storage: synchronous, string values, removal of a
/// missing key is not an error.
pub trait SessionStore: Send + Sync {
    /// Read a value, `None` when the key was never written or was removed
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write or overwrite a value
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Delete a value (idempotent)
    fn remove(&self, key: &str) -> Result<()>;
}

/// Moves the application to another top-level route
///
/// Used to force re-authentication; implementations perform a full
/// navigation rather than an in-app transition.
pub trait Navigator: Send + Sync {
    fn navigate(&self, path: &str);
}
