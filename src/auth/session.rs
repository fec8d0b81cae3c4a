//! In-memory session state and the login/logout/refresh operations.

use tracing::{debug, info, warn};

use crate::api::{ApiClient, ApiError};
use crate::models::UserProfile;

use super::TokenStore;

/// The complete credential set. Both tokens are always present
/// together; a session either holds all of this or nothing.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub access_token: String,
    pub refresh_token: String,
    pub user: UserProfile,
}

/// Single source of truth for authentication state. Constructed once
/// at startup and passed by reference to everything that needs it.
pub struct AuthSession {
    store: TokenStore,
    credentials: Option<Credentials>,
}

impl AuthSession {
    /// Create a session, restoring persisted credentials when the
    /// complete set is available.
    pub fn restore(store: TokenStore) -> Self {
        let credentials = store.load();
        match &credentials {
            Some(c) => info!(user = %c.user.email, "Restored persisted session"),
            None => debug!("No persisted session to restore"),
        }
        Self { store, credentials }
    }

    /// Authenticate against the login endpoint. On success the whole
    /// credential set is replaced and mirrored to storage; on failure
    /// the previous state is left untouched and the error propagates.
    pub async fn login(
        &mut self,
        api: &ApiClient,
        email: &str,
        password: &str,
    ) -> Result<(), ApiError> {
        let response = api.login(email, password).await?;

        let credentials = Credentials {
            access_token: response.access_token,
            refresh_token: response.refresh_token,
            user: response.user,
        };

        if let Err(e) = self.store.save(&credentials) {
            warn!(error = %e, "Failed to persist credentials");
        }

        info!(user = %credentials.user.email, "Login successful");
        self.credentials = Some(credentials);
        Ok(())
    }

    /// Drop the session in memory and in storage. Idempotent, purely
    /// local, and infallible.
    pub fn logout(&mut self) {
        if self.credentials.take().is_some() {
            info!("Logged out");
        }
        self.store.clear();
    }

    /// Exchange the held refresh token for a new access token. Only
    /// the access token changes; the refresh token and profile are
    /// kept. Failures propagate without touching state.
    pub async fn refresh(&mut self, api: &ApiClient) -> Result<(), ApiError> {
        let refresh_token = self
            .credentials
            .as_ref()
            .map(|c| c.refresh_token.clone())
            .ok_or(ApiError::NoRefreshToken)?;

        let response = api.refresh(&refresh_token).await?;

        // Guard against the session having been torn down while the
        // request was in flight; a stale token is discarded.
        match self.credentials.as_mut() {
            Some(c) if c.refresh_token == refresh_token => {
                c.access_token = response.access_token;
                if let Err(e) = self.store.save_access_token(&c.access_token) {
                    warn!(error = %e, "Failed to persist refreshed access token");
                }
                debug!("Access token refreshed");
            }
            _ => debug!("Session ended during refresh; discarding new token"),
        }
        Ok(())
    }

    pub fn is_authenticated(&self) -> bool {
        self.credentials.is_some()
    }

    pub fn access_token(&self) -> Option<&str> {
        self.credentials.as_ref().map(|c| c.access_token.as_str())
    }

    pub fn user(&self) -> Option<&UserProfile> {
        self.credentials.as_ref().map(|c| &c.user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::Storage;
    use crate::theme::Theme;

    fn test_session(dir: &tempfile::TempDir) -> AuthSession {
        AuthSession::restore(TokenStore::new(Storage::new(dir.path().join("storage"))))
    }

    fn seeded_credentials() -> Credentials {
        Credentials {
            access_token: "at-1".to_string(),
            refresh_token: "rt-1".to_string(),
            user: UserProfile {
                id: 1,
                display_name: "Ada".to_string(),
                email: "ada@example.com".to_string(),
                organization_id: None,
                theme: Some(Theme::Dark),
                is_admin: true,
                created_at: None,
            },
        }
    }

    #[test]
    fn test_restore_full_set() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = TokenStore::new(Storage::new(dir.path().join("storage")));
        store.save(&seeded_credentials()).expect("save");

        let session = test_session(&dir);
        assert!(session.is_authenticated());
        assert_eq!(session.access_token(), Some("at-1"));
        assert_eq!(session.user().map(|u| u.theme), Some(Some(Theme::Dark)));
    }

    #[test]
    fn test_restore_partial_set_is_absent() {
        let dir = tempfile::tempdir().expect("tempdir");
        let storage = Storage::new(dir.path().join("storage"));
        storage.set(super::super::token_store::ACCESS_TOKEN_KEY, "at-1").expect("set");
        storage.set(super::super::token_store::USER_KEY, "{}").expect("set");

        let session = test_session(&dir);
        assert!(!session.is_authenticated());
        assert!(session.access_token().is_none());
    }

    #[test]
    fn test_logout_clears_memory_and_storage() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = TokenStore::new(Storage::new(dir.path().join("storage")));
        store.save(&seeded_credentials()).expect("save");

        let mut session = test_session(&dir);
        session.logout();
        assert!(!session.is_authenticated());

        // A fresh restore sees nothing
        let reopened = test_session(&dir);
        assert!(!reopened.is_authenticated());

        // Logging out again is a no-op
        session.logout();
    }

    #[tokio::test]
    async fn test_refresh_without_token_fails_fast() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut session = test_session(&dir);
        // No request is made; the error comes from the missing token.
        let api = ApiClient::new("http://127.0.0.1:1").expect("client");
        let err = session.refresh(&api).await.expect_err("must fail");
        assert!(matches!(err, ApiError::NoRefreshToken));
    }
}
