use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::app::{App, AppState, LoginFocus};
use crate::routes::{Page, NAV_PAGES};

use super::pages;
use super::styles;

pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Title bar
            Constraint::Length(2), // Nav bar
            Constraint::Min(10),   // Main content
            Constraint::Length(2), // Status bar
        ])
        .split(frame.area());

    render_title_bar(frame, app, chunks[0]);
    render_nav_bar(frame, app, chunks[1]);
    render_page(frame, app, chunks[2]);
    render_status_bar(frame, app, chunks[3]);

    // Render overlays
    if matches!(app.state, AppState::ShowingHelp) {
        render_help_overlay(frame, app);
    }

    if matches!(app.state, AppState::LoggingIn) {
        render_login_overlay(frame, app);
    }

    if matches!(app.state, AppState::ConfirmingQuit) {
        render_quit_overlay(frame, app);
    }

    // The session-expiry dialog outranks everything else
    if app.watchdog_prompting() {
        render_session_expiry_overlay(frame, app);
    }
}

fn render_title_bar(frame: &mut Frame, app: &App, area: Rect) {
    let theme = app.theme;
    let title = "  Velora";
    let help_hint = "[?] Help";

    let title_line = Line::from(vec![
        Span::styled(title, styles::title_style(theme)),
        Span::raw(" ".repeat(
            (area.width as usize)
                .saturating_sub(title.len() + help_hint.len() + 4),
        )),
        Span::styled(help_hint, styles::muted_style(theme)),
    ]);

    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(styles::muted_style(theme));

    frame.render_widget(Paragraph::new(title_line).block(block), area);
}

fn render_nav_bar(frame: &mut Frame, app: &App, area: Rect) {
    let theme = app.theme;

    let mut spans = vec![Span::raw(" ")];
    for (i, page) in NAV_PAGES.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" | ", styles::muted_style(theme)));
        }
        let label = format!("[{}] {}", i + 1, page.title());
        if app.page == *page {
            spans.push(Span::styled(label, styles::tab_style(theme, true)));
        } else {
            spans.push(Span::styled(label, styles::muted_style(theme)));
        }
    }

    // Auth entry on the right, like a navbar account menu
    let auth_label = if app.session.is_authenticated() {
        "[o] Log Out".to_string()
    } else {
        "[i] Log In".to_string()
    };
    let main_width: usize = spans.iter().map(|s| s.content.len()).sum();
    let padding = (area.width as usize).saturating_sub(main_width + auth_label.len() + 2);
    spans.push(Span::raw(" ".repeat(padding)));
    spans.push(Span::styled(auth_label, styles::muted_style(theme)));

    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(styles::muted_style(theme));

    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}

fn render_page(frame: &mut Frame, app: &App, area: Rect) {
    match app.page {
        Page::Home => pages::home::render(frame, app, area),
        Page::About => pages::about::render(frame, app, area),
        Page::Directory => pages::directory::render(frame, app, area),
        Page::Account => pages::account::render(frame, app, area),
        Page::Error => pages::error::render(frame, app, area),
        Page::NotFound => pages::not_found::render(frame, app, area),
    }
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let theme = app.theme;

    let left_text = if matches!(app.state, AppState::GotoPrompt) {
        format!(" go to: {}▌", app.goto_input)
    } else if let Some(ref msg) = app.status_message {
        format!(" {} ", msg)
    } else if let Some(user) = app.session.user() {
        format!(" {} ", user.email)
    } else {
        " Not signed in ".to_string()
    };

    let right_text = " [:]go to | [q]uit ";

    let padding = (area.width as usize)
        .saturating_sub(left_text.len())
        .saturating_sub(right_text.len());
    let status_line = Line::from(vec![
        Span::styled(left_text, styles::muted_style(theme)),
        Span::raw(" ".repeat(padding)),
        Span::styled(right_text, styles::muted_style(theme)),
    ]);

    frame.render_widget(
        Paragraph::new(status_line).style(styles::status_bar_style(theme)),
        area,
    );
}

fn render_help_overlay(frame: &mut Frame, app: &App) {
    let theme = app.theme;
    let area = centered_rect_fixed(52, 24, frame.area());

    // Clear the area
    frame.render_widget(Clear, area);

    let version = env!("CARGO_PKG_VERSION");

    let help_text = vec![
        Line::from(Span::styled("                 V E L O R A", styles::title_style(theme))),
        Line::from(Span::styled(
            format!("                 version {}", version),
            styles::muted_style(theme),
        )),
        Line::from(""),
        Line::from(Span::styled(" Navigation", styles::highlight_style(theme))),
        Line::from(vec![
            Span::styled("  1-4       ", styles::help_key_style(theme)),
            Span::styled("Switch pages", styles::help_desc_style(theme)),
        ]),
        Line::from(vec![
            Span::styled("  ←/→       ", styles::help_key_style(theme)),
            Span::styled("Prev/next page", styles::help_desc_style(theme)),
        ]),
        Line::from(vec![
            Span::styled("  :         ", styles::help_key_style(theme)),
            Span::styled("Go to route path (e.g. /about)", styles::help_desc_style(theme)),
        ]),
        Line::from(vec![
            Span::styled("  i / o     ", styles::help_key_style(theme)),
            Span::styled("Log in / log out", styles::help_desc_style(theme)),
        ]),
        Line::from(""),
        Line::from(Span::styled(" Directory", styles::highlight_style(theme))),
        Line::from(vec![
            Span::styled("  /         ", styles::help_key_style(theme)),
            Span::styled("Search", styles::help_desc_style(theme)),
        ]),
        Line::from(vec![
            Span::styled("  n/a/e     ", styles::help_key_style(theme)),
            Span::styled("Sort by name/age/email", styles::help_desc_style(theme)),
        ]),
        Line::from(vec![
            Span::styled("  ↑/↓       ", styles::help_key_style(theme)),
            Span::styled("Move row selection", styles::help_desc_style(theme)),
        ]),
        Line::from(vec![
            Span::styled("  [ / ]     ", styles::help_key_style(theme)),
            Span::styled("Pick column to resize", styles::help_desc_style(theme)),
        ]),
        Line::from(vec![
            Span::styled("  < / >     ", styles::help_key_style(theme)),
            Span::styled("Shrink/grow column", styles::help_desc_style(theme)),
        ]),
        Line::from(vec![
            Span::styled("  f         ", styles::help_key_style(theme)),
            Span::styled("Fit column to content", styles::help_desc_style(theme)),
        ]),
        Line::from(vec![
            Span::styled("  r         ", styles::help_key_style(theme)),
            Span::styled("Reload members", styles::help_desc_style(theme)),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("       Press ", styles::muted_style(theme)),
            Span::styled("?", styles::help_key_style(theme)),
            Span::styled(" or ", styles::muted_style(theme)),
            Span::styled("Esc", styles::help_key_style(theme)),
            Span::styled(" to close", styles::muted_style(theme)),
        ]),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style(theme, true));

    frame.render_widget(Paragraph::new(help_text).block(block), area);
}

fn render_login_overlay(frame: &mut Frame, app: &App) {
    let theme = app.theme;
    let height = if app.login_error.is_some() { 12 } else { 10 };
    let area = centered_rect_fixed(46, height, frame.area());

    // Clear the area
    frame.render_widget(Clear, area);

    let mut lines = vec![];

    lines.push(Line::from(Span::styled(
        "              V E L O R A",
        styles::title_style(theme),
    )));
    lines.push(Line::from(""));

    // Email field
    let email_focused = app.login_focus == LoginFocus::Email;
    let email_style = if email_focused {
        styles::selected_style(theme)
    } else {
        styles::list_item_style(theme)
    };
    let email_display = format!("{:<24}", tail(&app.login_email, 24));
    let cursor = if email_focused { "▌" } else { "" };
    lines.push(Line::from(vec![
        Span::raw("  "),
        Span::styled("Email:    [", styles::muted_style(theme)),
        Span::styled(format!("{}{}", email_display, cursor), email_style),
        Span::styled("]", styles::muted_style(theme)),
    ]));

    // Password field
    let password_focused = app.login_focus == LoginFocus::Password;
    let password_style = if password_focused {
        styles::selected_style(theme)
    } else {
        styles::list_item_style(theme)
    };
    let password_masked: String = "*".repeat(app.login_password.len().min(24));
    let password_display = format!("{:<24}", password_masked);
    let cursor = if password_focused { "▌" } else { "" };
    lines.push(Line::from(vec![
        Span::raw("  "),
        Span::styled("Password: [", styles::muted_style(theme)),
        Span::styled(format!("{}{}", password_display, cursor), password_style),
        Span::styled("]", styles::muted_style(theme)),
    ]));

    // Login button
    let button_focused = app.login_focus == LoginFocus::Button;
    let button_style = if button_focused {
        styles::selected_style(theme)
    } else {
        styles::list_item_style(theme)
    };
    lines.push(Line::from(""));
    let button_label = if button_focused { " ▶ Log In ◀ " } else { "   Log In   " };
    lines.push(Line::from(vec![
        Span::raw("              ["),
        Span::styled(button_label, button_style),
        Span::raw("]"),
    ]));

    // Error message
    if let Some(ref error) = app.login_error {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!(" {}", error),
            styles::error_style(theme),
        )));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "    Tab to move, Enter to submit, Esc to close",
        styles::muted_style(theme),
    )));

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style(theme, true));

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_session_expiry_overlay(frame: &mut Frame, app: &App) {
    let theme = app.theme;
    let area = centered_rect_fixed(48, 9, frame.area());

    // Clear the area
    frame.render_widget(Clear, area);

    let remaining = app.watchdog_remaining_seconds();

    let lines = vec![
        Line::from(Span::styled(
            "   Session Expiring",
            styles::title_style(theme),
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!("   Your session will expire in {} seconds.", remaining),
            styles::list_item_style(theme),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("   Press ", styles::muted_style(theme)),
            Span::styled("[Enter]", styles::help_key_style(theme)),
            Span::styled(" to stay signed in", styles::muted_style(theme)),
        ]),
        Line::from(vec![
            Span::styled("   Press ", styles::muted_style(theme)),
            Span::styled("[Esc]", styles::help_key_style(theme)),
            Span::styled(" to log out now", styles::muted_style(theme)),
        ]),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style(theme, true));

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_quit_overlay(frame: &mut Frame, app: &App) {
    let theme = app.theme;
    let area = centered_rect_fixed(46, 7, frame.area());

    // Clear the area
    frame.render_widget(Clear, area);

    let lines = vec![
        Line::from(Span::styled(
            "              V E L O R A",
            styles::title_style(theme),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "   Are you sure you want to quit?",
            styles::highlight_style(theme),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("   Press ", styles::muted_style(theme)),
            Span::styled("[Y]", styles::help_key_style(theme)),
            Span::styled(" to quit, ", styles::muted_style(theme)),
            Span::styled("[N]", styles::help_key_style(theme)),
            Span::styled(" to cancel", styles::muted_style(theme)),
        ]),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style(theme, true));

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// Keep the tail of a long input visible in a fixed-width field
fn tail(s: &str, width: usize) -> String {
    let count = s.chars().count();
    if count <= width {
        s.to_string()
    } else {
        s.chars().skip(count - width).collect()
    }
}

/// Create a centered rectangle with fixed dimensions
fn centered_rect_fixed(width: u16, height: u16, r: Rect) -> Rect {
    let x = r.x + (r.width.saturating_sub(width)) / 2;
    let y = r.y + (r.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(r.width), height.min(r.height))
}
