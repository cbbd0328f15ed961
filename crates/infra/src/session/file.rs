//! JSON-file session store
//!
//! Keeps every key in one small JSON object on disk, the way browser local
//! storage keeps them per origin. Writes go to a sibling temp file first and
//! are renamed into place so a crash never leaves half a token behind.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use chainverdict_core::SessionStore;
use chainverdict_domain::{ChainVerdictError, Result};
use parking_lot::Mutex;
use tracing::debug;

use crate::errors::InfraError;

/// Session values cached in memory and mirrored to one JSON file
///
/// The in-memory view only changes once the file write has succeeded, so
/// memory and disk never disagree after a failed write.
pub struct FileSessionStore {
    path: PathBuf,
    values: Mutex<BTreeMap<String, String>>,
}

impl FileSessionStore {
    /// Open the store at `path`, loading existing values if the file exists
    ///
    /// # Errors
    ///
    /// Returns `Storage` if the file cannot be read and `Serialization` if it
    /// is not a JSON object of strings.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        let values = if path.exists() {
            let raw = fs::read_to_string(&path).map_err(to_domain)?;
            if raw.trim().is_empty() {
                BTreeMap::new()
            } else {
                serde_json::from_str(&raw).map_err(to_domain)?
            }
        } else {
            BTreeMap::new()
        };

        debug!(path = %path.display(), keys = values.len(), "Session file opened");
        Ok(Self { path, values: Mutex::new(values) })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, values: &BTreeMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(to_domain)?;
        }

        let raw = serde_json::to_string_pretty(values).map_err(to_domain)?;
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, raw).map_err(to_domain)?;
        fs::rename(&tmp, &self.path).map_err(to_domain)?;
        Ok(())
    }
}

impl SessionStore for FileSessionStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.lock().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut values = self.values.lock();
        let mut next = values.clone();
        next.insert(key.to_string(), value.to_string());
        self.persist(&next)?;
        *values = next;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut values = self.values.lock();
        if !values.contains_key(key) {
            return Ok(());
        }
        let mut next = values.clone();
        next.remove(key);
        self.persist(&next)?;
        *values = next;
        Ok(())
    }
}

fn to_domain(err: impl Into<InfraError>) -> ChainVerdictError {
    let infra: InfraError = err.into();
    infra.into()
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn values_survive_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("session.json");

        let store = FileSessionStore::open(&path).unwrap();
        store.set("cv_access_token", "jwt").unwrap();
        store.set("cv_user_data", r#"{"id":"u-1"}"#).unwrap();
        drop(store);

        let reopened = FileSessionStore::open(&path).unwrap();
        assert_eq!(reopened.get("cv_access_token").unwrap().as_deref(), Some("jwt"));
        assert_eq!(reopened.get("cv_user_data").unwrap().as_deref(), Some(r#"{"id":"u-1"}"#));
    }

    #[test]
    fn remove_is_persisted_and_idempotent() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("session.json");

        let store = FileSessionStore::open(&path).unwrap();
        store.set("cv_access_token", "jwt").unwrap();
        store.remove("cv_access_token").unwrap();
        store.remove("cv_access_token").unwrap();

        let reopened = FileSessionStore::open(&path).unwrap();
        assert_eq!(reopened.get("cv_access_token").unwrap(), None);
    }

    #[test]
    fn failed_write_leaves_values_untouched() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("session.json");

        let store = FileSessionStore::open(&path).unwrap();
        store.set("cv_access_token", "jwt-1").unwrap();

        // A directory in place of the file makes the final rename fail
        fs::remove_file(&path).unwrap();
        fs::create_dir(&path).unwrap();

        assert!(store.set("cv_access_token", "jwt-2").is_err());
        assert_eq!(store.get("cv_access_token").unwrap().as_deref(), Some("jwt-1"));

        assert!(store.remove("cv_access_token").is_err());
        assert_eq!(store.get("cv_access_token").unwrap().as_deref(), Some("jwt-1"));
    }

    #[test]
    fn corrupt_file_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("session.json");
        fs::write(&path, "[1, 2, 3]").unwrap();

        let result = FileSessionStore::open(&path);
        assert!(matches!(result, Err(ChainVerdictError::Serialization(_))));
    }
}
