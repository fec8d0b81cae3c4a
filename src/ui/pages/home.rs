use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::App;
use crate::ui::styles;

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let theme = app.theme;
    let greeting = match app.session.user() {
        Some(user) => format!("Signed in as {}.", user.display_name),
        None => "This is the home page.".to_string(),
    };

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled("Welcome to Velora", styles::title_style(theme))),
        Line::from(""),
        Line::from(Span::styled(greeting, styles::list_item_style(theme))),
        Line::from(""),
        Line::from(Span::styled(
            "Use the number keys or arrows to move between pages.",
            styles::muted_style(theme),
        )),
    ];

    let paragraph = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}
