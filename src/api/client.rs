//! HTTP client for the Velora backend.
//!
//! The client is stateless with respect to authentication: the access
//! token lives in `auth::AuthSession` and is passed into each
//! authenticated call. This keeps a single source of truth for
//! credentials and lets the session layer react to 401s in one place.

use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::{debug, warn};

use crate::models::UserProfile;

use super::ApiError;

/// HTTP request timeout in seconds.
/// 30s allows for slow API responses while failing fast enough for good UX.
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Login endpoint path
const LOGIN_PATH: &str = "/api/login";

/// Refresh endpoint path
const REFRESH_PATH: &str = "/api/refresh";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RefreshRequest<'a> {
    refresh_token: &'a str,
}

/// Successful login payload: both tokens plus the user profile.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub user: UserProfile,
}

/// Successful refresh payload: a new access token only.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshResponse {
    pub access_token: String,
}

/// API client for the Velora backend.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self { client, base_url })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Exchange an email/password pair for a token pair and profile.
    /// Any non-success status is an authentication failure.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, ApiError> {
        let response = self
            .client
            .post(self.url(LOGIN_PATH))
            .json(&LoginRequest { email, password })
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            debug!(%status, "Login rejected");
            return Err(ApiError::Authentication(format!("login returned {}", status))
                .with_body(&body));
        }

        response
            .json()
            .await
            .map_err(|e| ApiError::InvalidResponse(format!("login response: {}", e)))
    }

    /// Exchange a refresh token for a new access token.
    /// Any non-success status is a refresh failure.
    pub async fn refresh(&self, refresh_token: &str) -> Result<RefreshResponse, ApiError> {
        let response = self
            .client
            .post(self.url(REFRESH_PATH))
            .json(&RefreshRequest { refresh_token })
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            debug!(%status, "Refresh rejected");
            return Err(ApiError::Authentication(format!("refresh returned {}", status)));
        }

        response
            .json()
            .await
            .map_err(|e| ApiError::InvalidResponse(format!("refresh response: {}", e)))
    }

    /// Authenticated GET returning JSON. Attaches `Authorization:
    /// Bearer` whenever a token is supplied; failures are logged here
    /// and propagated to the caller unchanged.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        token: Option<&str>,
    ) -> Result<T, ApiError> {
        let mut request = self.client.get(self.url(path));
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                warn!(path, error = %e, "Request failed");
                return Err(e.into());
            }
        };

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            let err = ApiError::from_status(status, &body);
            warn!(path, %status, "Request rejected");
            return Err(err);
        }

        response
            .json()
            .await
            .map_err(|e| ApiError::InvalidResponse(format!("{}: {}", path, e)))
    }

    /// Authenticated POST with a JSON body, discarding the response
    /// body. Used for fire-and-forget telemetry.
    pub async fn post_json<B: Serialize>(
        &self,
        path: &str,
        body: &B,
        token: Option<&str>,
    ) -> Result<(), ApiError> {
        let mut request = self.client.post(self.url(path)).json(body);
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                warn!(path, error = %e, "Request failed");
                return Err(e.into());
            }
        };

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            let err = ApiError::from_status(status, &body);
            warn!(path, %status, "Request rejected");
            return Err(err);
        }

        Ok(())
    }
}

impl ApiError {
    /// Append a (truncated) response body to an authentication error
    /// message when one was returned.
    fn with_body(self, body: &str) -> Self {
        match self {
            ApiError::Authentication(msg) if !body.trim().is_empty() => {
                let body = body.trim();
                let shown: String = body.chars().take(120).collect();
                ApiError::Authentication(format!("{}: {}", msg, shown))
            }
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_login_response() {
        let json = r#"{
            "accessToken": "at-1",
            "refreshToken": "rt-1",
            "user": {"id": 7, "displayName": "Ada", "email": "ada@example.com", "theme": "dark"}
        }"#;

        let parsed: LoginResponse = serde_json::from_str(json).expect("parse login response");
        assert_eq!(parsed.access_token, "at-1");
        assert_eq!(parsed.refresh_token, "rt-1");
        assert_eq!(parsed.user.display_name, "Ada");
    }

    #[test]
    fn test_parse_refresh_response() {
        let parsed: RefreshResponse =
            serde_json::from_str(r#"{"accessToken": "at-2"}"#).expect("parse refresh response");
        assert_eq!(parsed.access_token, "at-2");
    }

    #[test]
    fn test_base_url_trailing_slash_normalized() {
        let client = ApiClient::new("https://api.example.com/").expect("client");
        assert_eq!(client.url("/api/login"), "https://api.example.com/api/login");
    }

    #[test]
    fn test_request_bodies_use_wire_names() {
        let login = serde_json::to_value(LoginRequest {
            email: "a@b.com",
            password: "pw",
        })
        .expect("serialize");
        assert_eq!(login["email"], "a@b.com");
        assert_eq!(login["password"], "pw");

        let refresh = serde_json::to_value(RefreshRequest { refresh_token: "rt" }).expect("serialize");
        assert_eq!(refresh["refreshToken"], "rt");
    }
}
