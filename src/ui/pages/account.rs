use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::App;
use crate::ui::styles;
use crate::utils::truncate;

/// Render the Account page: profile details and the theme toggle.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let theme = app.theme;
    let placeholder = "-";

    let mut lines = vec![];

    match app.session.user() {
        Some(user) => {
            lines.push(Line::from(Span::styled(
                user.display_name.clone(),
                styles::title_style(theme),
            )));
            lines.push(Line::from(""));

            lines.push(Line::from(Span::styled("Profile", styles::highlight_style(theme))));
            lines.push(Line::from(vec![
                Span::styled("Email:        ", styles::muted_style(theme)),
                Span::raw(truncate(&user.email, 40)),
            ]));
            lines.push(Line::from(vec![
                Span::styled("User ID:      ", styles::muted_style(theme)),
                Span::raw(user.id.to_string()),
            ]));

            let organization = user
                .organization_id
                .clone()
                .unwrap_or_else(|| placeholder.to_string());
            lines.push(Line::from(vec![
                Span::styled("Organization: ", styles::muted_style(theme)),
                Span::raw(organization),
            ]));

            if user.is_admin {
                lines.push(Line::from(vec![
                    Span::styled("Role:         ", styles::muted_style(theme)),
                    Span::styled("Administrator", styles::success_style(theme)),
                ]));
            }

            let created = user
                .created_at
                .clone()
                .unwrap_or_else(|| placeholder.to_string());
            lines.push(Line::from(vec![
                Span::styled("Member since: ", styles::muted_style(theme)),
                Span::raw(created),
            ]));

            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                "Appearance",
                styles::highlight_style(theme),
            )));
            lines.push(Line::from(vec![
                Span::styled("Theme:        ", styles::muted_style(theme)),
                Span::raw(theme.name()),
                Span::styled("   [t] toggle", styles::muted_style(theme)),
            ]));

            lines.push(Line::from(""));
            lines.push(Line::from(vec![
                Span::styled("Press ", styles::muted_style(theme)),
                Span::styled("[o]", styles::help_key_style(theme)),
                Span::styled(" to log out", styles::muted_style(theme)),
            ]));
        }
        None => {
            // Gating keeps this page behind login; this is a fallback.
            lines.push(Line::from(Span::styled(
                "Not signed in.",
                styles::muted_style(theme),
            )));
        }
    }

    let block = Block::default()
        .title(" Account Settings ")
        .title_style(styles::muted_style(theme))
        .borders(Borders::ALL)
        .border_style(styles::border_style(theme, true));

    let paragraph = Paragraph::new(lines).block(block);
    frame.render_widget(paragraph, area);
}
