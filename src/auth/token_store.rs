//! Durable credential mirroring.
//!
//! Three storage keys hold the access token, the refresh token, and
//! the serialized user profile. Restore is all-or-nothing: a partial
//! set (or an unparseable profile) reads back as no credentials at
//! all, so the session never starts half-populated.

use anyhow::Result;
use tracing::warn;

use crate::models::UserProfile;
use crate::storage::Storage;

use super::Credentials;

pub const ACCESS_TOKEN_KEY: &str = "accessToken";
pub const REFRESH_TOKEN_KEY: &str = "refreshToken";
pub const USER_KEY: &str = "user";

#[derive(Debug, Clone)]
pub struct TokenStore {
    storage: Storage,
}

impl TokenStore {
    pub fn new(storage: Storage) -> Self {
        Self { storage }
    }

    /// Load the persisted credential set, or None unless all three
    /// entries are present and the profile parses.
    pub fn load(&self) -> Option<Credentials> {
        let access_token = self.storage.get(ACCESS_TOKEN_KEY)?;
        let refresh_token = self.storage.get(REFRESH_TOKEN_KEY)?;
        let raw_user = self.storage.get(USER_KEY)?;

        let user: UserProfile = match serde_json::from_str(&raw_user) {
            Ok(user) => user,
            Err(e) => {
                warn!(error = %e, "Discarding unparseable stored profile");
                return None;
            }
        };

        Some(Credentials {
            access_token,
            refresh_token,
            user,
        })
    }

    /// Persist the full credential set.
    pub fn save(&self, credentials: &Credentials) -> Result<()> {
        self.storage.set(ACCESS_TOKEN_KEY, &credentials.access_token)?;
        self.storage.set(REFRESH_TOKEN_KEY, &credentials.refresh_token)?;
        self.storage
            .set(USER_KEY, &serde_json::to_string(&credentials.user)?)?;
        Ok(())
    }

    /// Persist a replacement access token, leaving the other entries
    /// untouched.
    pub fn save_access_token(&self, access_token: &str) -> Result<()> {
        self.storage.set(ACCESS_TOKEN_KEY, access_token)
    }

    /// Remove all three entries. Best-effort: failures are logged and
    /// swallowed so logout can never fail.
    pub fn clear(&self) {
        for key in [ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY, USER_KEY] {
            if let Err(e) = self.storage.remove(key) {
                warn!(key, error = %e, "Failed to remove stored credential");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_store() -> (tempfile::TempDir, TokenStore) {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = TokenStore::new(Storage::new(dir.path().join("storage")));
        (dir, store)
    }

    fn test_credentials() -> Credentials {
        Credentials {
            access_token: "at-1".to_string(),
            refresh_token: "rt-1".to_string(),
            user: UserProfile {
                id: 7,
                display_name: "Ada".to_string(),
                email: "ada@example.com".to_string(),
                organization_id: None,
                theme: None,
                is_admin: false,
                created_at: None,
            },
        }
    }

    #[test]
    fn test_save_load_roundtrip() {
        let (_dir, store) = test_store();
        store.save(&test_credentials()).expect("save");

        let loaded = store.load().expect("credentials present");
        assert_eq!(loaded.access_token, "at-1");
        assert_eq!(loaded.refresh_token, "rt-1");
        assert_eq!(loaded.user.email, "ada@example.com");
    }

    #[test]
    fn test_partial_set_reads_as_absent() {
        let (dir, store) = test_store();
        let storage = Storage::new(dir.path().join("storage"));

        // Only two of the three keys present
        storage.set(ACCESS_TOKEN_KEY, "at-1").expect("set");
        storage.set(REFRESH_TOKEN_KEY, "rt-1").expect("set");
        assert!(store.load().is_none());
    }

    #[test]
    fn test_unparseable_profile_reads_as_absent() {
        let (dir, store) = test_store();
        let storage = Storage::new(dir.path().join("storage"));

        storage.set(ACCESS_TOKEN_KEY, "at-1").expect("set");
        storage.set(REFRESH_TOKEN_KEY, "rt-1").expect("set");
        storage.set(USER_KEY, "not json").expect("set");
        assert!(store.load().is_none());
    }

    #[test]
    fn test_clear_removes_everything() {
        let (dir, store) = test_store();
        store.save(&test_credentials()).expect("save");
        store.clear();

        let storage = Storage::new(dir.path().join("storage"));
        assert!(storage.get(ACCESS_TOKEN_KEY).is_none());
        assert!(storage.get(REFRESH_TOKEN_KEY).is_none());
        assert!(storage.get(USER_KEY).is_none());

        // Clearing an empty store is fine
        store.clear();
    }

    #[test]
    fn test_save_access_token_leaves_rest() {
        let (_dir, store) = test_store();
        store.save(&test_credentials()).expect("save");
        store.save_access_token("at-2").expect("save token");

        let loaded = store.load().expect("credentials present");
        assert_eq!(loaded.access_token, "at-2");
        assert_eq!(loaded.refresh_token, "rt-1");
    }
}
