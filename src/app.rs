//! Application state management for the Velora client.
//!
//! This module contains the core `App` struct that owns the auth
//! session, the session watchdog, page navigation, and the directory
//! table state. Services are constructed once here and passed by
//! reference; nothing reaches for ambient globals.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::Result;
use serde::Serialize;
use tracing::{debug, error, info, warn};

use crate::api::{ApiClient, ApiError};
use crate::auth::{
    AuthSession, CredentialStore, SessionWatchdog, TokenStore, WatchdogEvent, WatchdogPhase,
};
use crate::config::Config;
use crate::models::{member::columns, Member};
use crate::routes::Page;
use crate::storage::Storage;
use crate::table::{Column, TableController};
use crate::theme::Theme;

// ============================================================================
// Constants
// ============================================================================

/// Maximum length for email input.
/// 254 is the practical upper bound for an address.
const MAX_EMAIL_LENGTH: usize = 254;

/// Maximum length for password input.
/// 128 chars accommodates password managers and passphrases.
const MAX_PASSWORD_LENGTH: usize = 128;

/// Maximum length for the goto prompt input.
const MAX_PATH_LENGTH: usize = 64;

/// Pixels a single keyboard resize step moves a column edge.
pub const RESIZE_STEP_PX: i32 = 16;

/// Members endpoint backing the directory page
const MEMBERS_PATH: &str = "/api/members";

/// Page-view telemetry endpoint
const PAGE_VIEW_LOG_PATH: &str = "/api/logs/page-view";

/// Pinned width for the directory name column, in px
const DIRECTORY_NAME_WIDTH: u16 = 240;

/// Storage id for the directory table's persisted widths
const DIRECTORY_TABLE_ID: &str = "directory";

// ============================================================================
// UI State Types
// ============================================================================

/// Overall application state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Normal,
    Searching,
    GotoPrompt,
    ShowingHelp,
    LoggingIn,
    ConfirmingQuit,
    Quitting,
}

/// Login form focus state
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LoginFocus {
    Email,
    Password,
    Button,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PageViewPayload {
    path: String,
    timestamp: String,
    user_id: Option<i64>,
}

// ============================================================================
// Main Application Struct
// ============================================================================

/// Main application state container
pub struct App {
    // Core services
    pub config: Config,
    pub api: ApiClient,
    pub session: AuthSession,
    pub theme: Theme,
    watchdog: Option<SessionWatchdog>,

    // UI state
    pub state: AppState,
    pub page: Page,
    pub status_message: Option<String>,
    pub last_error: Option<String>,
    pub last_missing_path: Option<String>,

    // Login form state
    pub login_email: String,
    pub login_password: String,
    pub login_focus: LoginFocus,
    pub login_error: Option<String>,
    login_return_to: Option<Page>,

    // Goto prompt state
    pub goto_input: String,

    // Directory page state
    pub members: Vec<Member>,
    pub directory: TableController,
    pub directory_selection: usize,
    pub active_column: usize,
    members_fetched: bool,

    // Page-view logging dedup
    last_logged_path: Option<String>,
}

impl App {
    /// Create a new application instance, restoring any persisted
    /// session.
    pub fn new() -> Result<Self> {
        debug!("App::new() starting");
        let config = match Config::load() {
            Ok(c) => c,
            Err(e) => {
                warn!(error = %e, "Failed to load config, using defaults");
                Config::default()
            }
        };
        debug!(base_url = %config.api_base_url, "Config loaded");

        let api = ApiClient::new(&config.api_base_url)?;

        let storage = match Storage::open_default() {
            Ok(storage) => storage,
            Err(e) => {
                warn!(error = %e, "Falling back to local storage directory");
                Storage::new(PathBuf::from("./velora-storage"))
            }
        };

        let session = AuthSession::restore(TokenStore::new(storage.clone()));

        let theme = session
            .user()
            .and_then(|u| u.theme)
            .unwrap_or_default();

        // The watchdog exists exactly while a session does
        let watchdog = session
            .is_authenticated()
            .then(|| SessionWatchdog::start(Instant::now()));

        let directory = TableController::with_persistence(
            vec![
                Column::fixed(columns::NAME, DIRECTORY_NAME_WIDTH),
                Column::new(columns::AGE),
                Column::new(columns::EMAIL),
            ],
            storage,
            DIRECTORY_TABLE_ID,
        );

        let login_email = std::env::var("VELORA_EMAIL")
            .ok()
            .or_else(|| config.last_email.clone())
            .unwrap_or_default();
        let login_password = std::env::var("VELORA_PASSWORD").unwrap_or_default();

        Ok(Self {
            config,
            api,
            session,
            theme,
            watchdog,

            state: AppState::Normal,
            page: Page::Home,
            status_message: None,
            last_error: None,
            last_missing_path: None,

            login_email,
            login_password,
            login_focus: LoginFocus::Email,
            login_error: None,
            login_return_to: None,

            goto_input: String::new(),

            members: Member::sample_roster(),
            directory,
            directory_selection: 0,
            active_column: 0,
            members_fetched: false,

            last_logged_path: None,
        })
    }

    // =========================================================================
    // Navigation
    // =========================================================================

    /// Navigate to a page, routing through the login overlay when the
    /// target is gated and no session is held.
    pub fn navigate(&mut self, page: Page) {
        if page.requires_auth() && !self.session.is_authenticated() {
            debug!(page = page.title(), "Gated page without session, opening login");
            self.start_login(Some(page));
            return;
        }
        self.page = page;
        self.log_page_view(page.path());
    }

    /// Navigate by typed route path; unknown paths land on the 404
    /// page with the attempted path remembered for display.
    pub fn navigate_path(&mut self, raw: &str) {
        let page = Page::from_path(raw);
        if page == Page::NotFound {
            self.last_missing_path = Some(raw.trim().to_string());
        }
        self.navigate(page);
    }

    /// Fire-and-forget page-view telemetry, deduplicating consecutive
    /// repeats of the same path. Off unless enabled in config.
    fn log_page_view(&mut self, path: &str) {
        if !self.config.page_view_logging {
            return;
        }
        if self.last_logged_path.as_deref() == Some(path) {
            return;
        }
        self.last_logged_path = Some(path.to_string());

        let payload = PageViewPayload {
            path: path.to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            user_id: self.session.user().map(|u| u.id),
        };
        let api = self.api.clone();
        let token = self.session.access_token().map(str::to_owned);

        tokio::spawn(async move {
            if let Err(e) = api
                .post_json(PAGE_VIEW_LOG_PATH, &payload, token.as_deref())
                .await
            {
                debug!(error = %e, "Failed to log page view");
            }
        });
    }

    // =========================================================================
    // Authentication
    // =========================================================================

    /// Start the login process (show login overlay)
    pub fn start_login(&mut self, return_to: Option<Page>) {
        self.state = AppState::LoggingIn;
        self.login_return_to = return_to;
        self.login_error = None;

        // Prefill a remembered password for the prefilled email
        if self.login_password.is_empty() && !self.login_email.is_empty() {
            if let Ok(password) = CredentialStore::get_password(&self.login_email) {
                self.login_password = password;
            }
        }

        self.login_focus = if self.login_email.is_empty() {
            LoginFocus::Email
        } else if self.login_password.is_empty() {
            LoginFocus::Password
        } else {
            LoginFocus::Button
        };
    }

    /// Dismiss the login overlay without authenticating.
    pub fn cancel_login(&mut self) {
        self.state = AppState::Normal;
        self.login_return_to = None;
        self.login_error = None;
    }

    /// Attempt login with the credentials from the login form
    pub async fn attempt_login(&mut self) -> Result<(), ApiError> {
        let email = self.login_email.clone();
        let password = self.login_password.clone();

        if email.is_empty() || password.is_empty() {
            self.login_error = Some("Email and password required".to_string());
            return Err(ApiError::Authentication("email and password required".into()));
        }

        self.login_error = None;

        match self.session.login(&self.api, &email, &password).await {
            Ok(()) => {
                if let Err(e) = CredentialStore::store(&email, &password) {
                    warn!(error = %e, "Failed to store credentials");
                }

                self.config.last_email = Some(email);
                if let Err(e) = self.config.save() {
                    warn!(error = %e, "Failed to save config");
                }

                self.theme = self
                    .session
                    .user()
                    .and_then(|u| u.theme)
                    .unwrap_or_default();
                self.watchdog = Some(SessionWatchdog::start(Instant::now()));

                self.login_password.clear();
                self.state = AppState::Normal;
                self.status_message = None;

                if let Some(target) = self.login_return_to.take() {
                    self.navigate(target);
                }
                Ok(())
            }
            Err(e) => {
                error!(error = %e, "Login failed");
                let user_message = match &e {
                    ApiError::Authentication(_) => "Invalid email or password".to_string(),
                    ApiError::Network(_) => {
                        "Unable to connect to server. Check your internet connection.".to_string()
                    }
                    other => format!("Login failed: {}", other),
                };
                self.login_error = Some(user_message);
                Err(e)
            }
        }
    }

    /// User-initiated logout from the nav bar.
    pub fn logout(&mut self) {
        self.force_logout(None);
    }

    /// Tear the session down: credentials, watchdog, and theme all go.
    /// Gated pages fall back to home.
    fn force_logout(&mut self, status: Option<&str>) {
        self.session.logout();
        self.watchdog = None;
        self.theme = Theme::default();
        self.members = Member::sample_roster();
        self.members_fetched = false;
        if let Some(status) = status {
            self.status_message = Some(status.to_string());
        }
        if self.page.requires_auth() {
            self.page = Page::Home;
        }
    }

    // =========================================================================
    // Session Watchdog
    // =========================================================================

    /// Whether the session-expiry dialog is up.
    pub fn watchdog_prompting(&self) -> bool {
        self.watchdog
            .as_ref()
            .is_some_and(|w| w.phase() == WatchdogPhase::Prompting)
    }

    /// Countdown seconds shown by the session-expiry dialog.
    pub fn watchdog_remaining_seconds(&self) -> u32 {
        self.watchdog
            .as_ref()
            .map(SessionWatchdog::remaining_seconds)
            .unwrap_or(0)
    }

    /// Service the watchdog deadlines. Called every event-loop pass.
    pub fn tick(&mut self) {
        let event = self
            .watchdog
            .as_mut()
            .and_then(|w| w.poll(Instant::now()));

        match event {
            Some(WatchdogEvent::PromptOpened) => {
                info!("Session expiring soon, prompting for confirmation");
            }
            Some(WatchdogEvent::Expired) => {
                info!("Session prompt expired without confirmation");
                self.force_logout(Some("Session expired. Please log in again."));
            }
            Some(WatchdogEvent::CountdownTicked) | None => {}
        }
    }

    /// The user confirmed the session-expiry dialog: refresh the
    /// access token, or log out if the exchange fails.
    pub async fn confirm_session(&mut self) {
        if !self.watchdog_prompting() {
            return;
        }
        match self.session.refresh(&self.api).await {
            Ok(()) => {
                if let Some(watchdog) = &mut self.watchdog {
                    watchdog.confirm_succeeded(Instant::now());
                }
                debug!("Session extended");
            }
            Err(e) => {
                warn!(error = %e, "Session refresh failed, logging out");
                self.force_logout(Some("Session could not be extended. Please log in again."));
            }
        }
    }

    // =========================================================================
    // Directory Data
    // =========================================================================

    /// Authenticated GET through the shared client. A 401 tears the
    /// session down before the error reaches the caller.
    async fn authed_get<T: serde::de::DeserializeOwned>(
        &mut self,
        path: &str,
    ) -> Result<T, ApiError> {
        let token = self.session.access_token().map(str::to_owned);
        match self.api.get_json(path, token.as_deref()).await {
            Err(ApiError::Unauthorized) => {
                warn!(path, "Unauthorized response, logging out");
                self.force_logout(Some("Session expired. Please log in again."));
                Err(ApiError::Unauthorized)
            }
            other => other,
        }
    }

    /// Fetch the member roster once per session when the directory
    /// page is open. Failures keep the built-in sample roster.
    pub async fn maybe_load_members(&mut self) {
        if self.page != Page::Directory || self.members_fetched {
            return;
        }
        if !self.session.is_authenticated() {
            return;
        }
        self.members_fetched = true;

        match self.authed_get::<Vec<Member>>(MEMBERS_PATH).await {
            Ok(members) if !members.is_empty() => {
                info!(count = members.len(), "Member roster fetched");
                self.members = members;
                self.directory_selection = 0;
            }
            Ok(_) => debug!("Member roster empty, keeping samples"),
            Err(e) => {
                warn!(error = %e, "Member fetch failed, keeping samples");
                self.last_error = Some(e.to_string());
                self.status_message = Some("Could not load members; showing sample data".into());
            }
        }
    }

    /// Force the next directory visit to refetch the roster.
    pub fn request_member_reload(&mut self) {
        self.members_fetched = false;
    }

    /// Rows currently visible in the directory table.
    pub fn visible_members(&self) -> Vec<&Member> {
        self.directory.view(&self.members)
    }

    /// Column key targeted by keyboard resize/auto-fit.
    pub fn active_column_key(&self) -> &'static str {
        let columns = self.directory.columns();
        columns[self.active_column.min(columns.len() - 1)].key
    }

    pub fn select_next_column(&mut self) {
        let count = self.directory.columns().len();
        self.active_column = (self.active_column + 1) % count;
    }

    pub fn select_prev_column(&mut self) {
        let count = self.directory.columns().len();
        self.active_column = (self.active_column + count - 1) % count;
    }

    /// Move the active column edge one step.
    pub fn resize_active_column(&mut self, steps: i32) {
        let key = self.active_column_key();
        self.directory.resize_by(key, steps * RESIZE_STEP_PX);
    }

    /// Fit the active column to its content.
    pub fn auto_fit_active_column(&mut self) {
        let key = self.active_column_key();
        self.directory.auto_fit(key, &self.members);
    }

    /// Clamp the row selection after a filter or dataset change.
    pub fn clamp_directory_selection(&mut self) {
        let visible = self.visible_members().len();
        if visible == 0 {
            self.directory_selection = 0;
        } else if self.directory_selection >= visible {
            self.directory_selection = visible - 1;
        }
    }

    // =========================================================================
    // Input helpers
    // =========================================================================

    pub fn can_add_email_char(&self) -> bool {
        self.login_email.len() < MAX_EMAIL_LENGTH
    }

    pub fn can_add_password_char(&self) -> bool {
        self.login_password.len() < MAX_PASSWORD_LENGTH
    }

    pub fn can_add_path_char(&self) -> bool {
        self.goto_input.len() < MAX_PATH_LENGTH
    }

    /// Toggle the theme from the account page.
    pub fn toggle_theme(&mut self) {
        self.theme = self.theme.toggle();
        debug!(theme = self.theme.name(), "Theme toggled");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // App::new touches real platform directories, so state-machine
    // level behavior is covered in the auth and table modules; here we
    // only pin pure helpers.

    #[test]
    fn test_page_view_payload_wire_names() {
        let payload = PageViewPayload {
            path: "/about".to_string(),
            timestamp: "2026-01-01T00:00:00Z".to_string(),
            user_id: Some(9),
        };
        let value = serde_json::to_value(&payload).expect("serialize");
        assert_eq!(value["path"], "/about");
        assert_eq!(value["userId"], 9);
        assert!(value.get("user_id").is_none());
    }
}
