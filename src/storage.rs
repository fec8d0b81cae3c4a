//! File-backed key/value storage.
//!
//! This is the durable client-side store used for credential mirroring
//! and table layout overrides. Each key is a small file under the
//! application data directory, written whole on every set.
//!
//! Writers all run on the UI thread; no locking is done. A second
//! process pointed at the same directory would race, which is accepted
//! for a single-user client.

use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::warn;

/// Directory name under the platform data dir
const APP_DIR: &str = "velora";

/// Subdirectory holding the key/value entries
const STORAGE_DIR: &str = "storage";

#[derive(Debug, Clone)]
pub struct Storage {
    dir: PathBuf,
}

impl Storage {
    /// Open a store rooted at an explicit directory. The directory is
    /// created lazily on first write.
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    /// Open the default store under the platform data directory.
    pub fn open_default() -> Result<Self> {
        let data_dir = dirs::data_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find data directory"))?;
        Ok(Self::new(data_dir.join(APP_DIR).join(STORAGE_DIR)))
    }

    /// Read the value for a key. Missing or unreadable entries read as
    /// absent rather than failing.
    pub fn get(&self, key: &str) -> Option<String> {
        let path = self.entry_path(key);
        match std::fs::read_to_string(&path) {
            Ok(value) => Some(value),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(e) => {
                warn!(key, error = %e, "Failed to read storage entry");
                None
            }
        }
    }

    /// Write the value for a key, replacing any previous value.
    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        std::fs::create_dir_all(&self.dir)
            .with_context(|| format!("Failed to create storage directory {}", self.dir.display()))?;
        std::fs::write(self.entry_path(key), value)
            .with_context(|| format!("Failed to write storage entry '{}'", key))?;
        Ok(())
    }

    /// Remove a key. Removing an absent key is not an error.
    pub fn remove(&self, key: &str) -> Result<()> {
        let path = self.entry_path(key);
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e).with_context(|| format!("Failed to remove storage entry '{}'", key)),
        }
    }

    /// Keys map to file names; anything outside a conservative
    /// character set is replaced so a key can never escape the store
    /// directory.
    fn entry_path(&self, key: &str) -> PathBuf {
        let file_name: String = key
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.dir.join(file_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_storage() -> (tempfile::TempDir, Storage) {
        let dir = tempfile::tempdir().expect("tempdir");
        let storage = Storage::new(dir.path().join("storage"));
        (dir, storage)
    }

    #[test]
    fn test_set_get_roundtrip() {
        let (_dir, storage) = temp_storage();
        assert_eq!(storage.get("accessToken"), None);

        storage.set("accessToken", "abc123").expect("set");
        assert_eq!(storage.get("accessToken").as_deref(), Some("abc123"));

        storage.set("accessToken", "def456").expect("overwrite");
        assert_eq!(storage.get("accessToken").as_deref(), Some("def456"));
    }

    #[test]
    fn test_remove_is_idempotent() {
        let (_dir, storage) = temp_storage();
        storage.set("user", "{}").expect("set");
        storage.remove("user").expect("remove");
        assert_eq!(storage.get("user"), None);
        // Removing again is fine
        storage.remove("user").expect("remove absent");
    }

    #[test]
    fn test_key_sanitization_stays_in_dir() {
        let (_dir, storage) = temp_storage();
        storage.set("../escape", "nope").expect("set");
        assert_eq!(storage.get("../escape").as_deref(), Some("nope"));
        // The sanitized entry lives inside the store directory
        assert_eq!(storage.get(".._escape").as_deref(), Some("nope"));
    }
}
