//! Keyboard input handling for the TUI.
//!
//! This module handles all keyboard events and translates them into
//! application state changes. Modal surfaces (session-expiry dialog,
//! login form, prompts) take priority over page-level keys.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};

use crate::app::{App, AppState, LoginFocus};
use crate::models::member::columns;
use crate::routes::{Page, NAV_PAGES};

/// Handle keyboard input. Returns true if the app should quit.
pub async fn handle_input(app: &mut App, key: KeyEvent) -> Result<bool> {
    // The session-expiry dialog outranks every other surface
    if app.watchdog_prompting() {
        match key.code {
            KeyCode::Enter | KeyCode::Char('c') => app.confirm_session().await,
            KeyCode::Esc => app.logout(),
            _ => {}
        }
        return Ok(false);
    }

    // Handle login overlay
    if matches!(app.state, AppState::LoggingIn) {
        return handle_login_input(app, key).await;
    }

    // Handle help overlay
    if matches!(app.state, AppState::ShowingHelp) {
        if matches!(key.code, KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q')) {
            app.state = AppState::Normal;
        }
        return Ok(false);
    }

    // Handle quit confirmation
    if matches!(app.state, AppState::ConfirmingQuit) {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                app.state = AppState::Quitting;
                return Ok(true);
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                app.state = AppState::Normal;
            }
            _ => {}
        }
        return Ok(false);
    }

    // Handle search mode
    if matches!(app.state, AppState::Searching) {
        handle_search_input(app, key);
        return Ok(false);
    }

    // Handle the goto prompt
    if matches!(app.state, AppState::GotoPrompt) {
        handle_goto_input(app, key).await;
        return Ok(false);
    }

    // Global keys
    match key.code {
        KeyCode::Char('q') => {
            app.state = AppState::ConfirmingQuit;
            return Ok(false);
        }
        KeyCode::Char('?') => {
            app.state = AppState::ShowingHelp;
            return Ok(false);
        }
        KeyCode::Char(':') => {
            app.goto_input.clear();
            app.state = AppState::GotoPrompt;
            return Ok(false);
        }
        KeyCode::Char(c @ '1'..='4') => {
            let index = (c as usize) - ('1' as usize);
            app.navigate(NAV_PAGES[index]);
            app.maybe_load_members().await;
            return Ok(false);
        }
        KeyCode::Left => {
            app.navigate(app.page.prev());
            app.maybe_load_members().await;
            return Ok(false);
        }
        KeyCode::Right => {
            app.navigate(app.page.next());
            app.maybe_load_members().await;
            return Ok(false);
        }
        KeyCode::Char('i') if !app.session.is_authenticated() => {
            app.start_login(None);
            return Ok(false);
        }
        KeyCode::Char('o') if app.session.is_authenticated() => {
            app.logout();
            return Ok(false);
        }
        _ => {}
    }

    // Page-specific keys
    match app.page {
        Page::Directory => handle_directory_input(app, key).await,
        Page::Account => {
            if key.code == KeyCode::Char('t') {
                app.toggle_theme();
            }
        }
        _ => {}
    }

    Ok(false)
}

async fn handle_directory_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('/') => {
            app.state = AppState::Searching;
        }
        KeyCode::Char('n') => {
            app.directory.toggle_sort(columns::NAME);
            app.clamp_directory_selection();
        }
        KeyCode::Char('a') => {
            app.directory.toggle_sort(columns::AGE);
            app.clamp_directory_selection();
        }
        KeyCode::Char('e') => {
            app.directory.toggle_sort(columns::EMAIL);
            app.clamp_directory_selection();
        }
        KeyCode::Up => {
            app.directory_selection = app.directory_selection.saturating_sub(1);
        }
        KeyCode::Down => {
            let visible = app.visible_members().len();
            if visible > 0 && app.directory_selection + 1 < visible {
                app.directory_selection += 1;
            }
        }
        KeyCode::Char('[') => app.select_prev_column(),
        KeyCode::Char(']') => app.select_next_column(),
        KeyCode::Char('<') => app.resize_active_column(-1),
        KeyCode::Char('>') => app.resize_active_column(1),
        KeyCode::Char('f') => app.auto_fit_active_column(),
        KeyCode::Char('r') => {
            app.request_member_reload();
            app.maybe_load_members().await;
        }
        _ => {}
    }
}

fn handle_search_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            app.directory.set_filter("");
            app.state = AppState::Normal;
        }
        KeyCode::Enter => {
            app.state = AppState::Normal;
        }
        KeyCode::Backspace => {
            let mut filter = app.directory.filter().to_string();
            filter.pop();
            app.directory.set_filter(filter);
        }
        KeyCode::Char(c) => {
            let mut filter = app.directory.filter().to_string();
            filter.push(c);
            app.directory.set_filter(filter);
        }
        _ => {}
    }
    app.clamp_directory_selection();
}

async fn handle_goto_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            app.goto_input.clear();
            app.state = AppState::Normal;
        }
        KeyCode::Enter => {
            let path = app.goto_input.clone();
            app.goto_input.clear();
            app.state = AppState::Normal;
            app.navigate_path(&path);
            app.maybe_load_members().await;
        }
        KeyCode::Backspace => {
            app.goto_input.pop();
        }
        KeyCode::Char(c) if app.can_add_path_char() => {
            if c.is_ascii_alphanumeric() || matches!(c, '/' | '-' | '_' | '.') {
                app.goto_input.push(c);
            }
        }
        _ => {}
    }
}

async fn handle_login_input(app: &mut App, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Esc => {
            app.cancel_login();
        }
        KeyCode::Tab | KeyCode::Down => {
            app.login_focus = match app.login_focus {
                LoginFocus::Email => LoginFocus::Password,
                LoginFocus::Password => LoginFocus::Button,
                LoginFocus::Button => LoginFocus::Email,
            };
        }
        KeyCode::BackTab | KeyCode::Up => {
            app.login_focus = match app.login_focus {
                LoginFocus::Email => LoginFocus::Button,
                LoginFocus::Password => LoginFocus::Email,
                LoginFocus::Button => LoginFocus::Password,
            };
        }
        KeyCode::Enter => match app.login_focus {
            LoginFocus::Email => {
                app.login_focus = LoginFocus::Password;
            }
            LoginFocus::Password | LoginFocus::Button => {
                // Errors surface in the form; nothing to do here
                if app.attempt_login().await.is_ok() {
                    app.maybe_load_members().await;
                }
            }
        },
        KeyCode::Backspace => match app.login_focus {
            LoginFocus::Email => {
                app.login_email.pop();
            }
            LoginFocus::Password => {
                app.login_password.pop();
            }
            LoginFocus::Button => {}
        },
        KeyCode::Char(c) => match app.login_focus {
            LoginFocus::Email if app.can_add_email_char() => {
                app.login_email.push(c);
            }
            LoginFocus::Password if app.can_add_password_char() => {
                app.login_password.push(c);
            }
            _ => {}
        },
        _ => {}
    }
    Ok(false)
}
