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
    let version = env!("CARGO_PKG_VERSION");

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled("About Velora", styles::title_style(theme))),
        Line::from(""),
        Line::from(Span::styled(
            "A keyboard-driven terminal client for the Velora platform.",
            styles::list_item_style(theme),
        )),
        Line::from(Span::styled(
            format!("version {}", version),
            styles::muted_style(theme),
        )),
    ];

    let paragraph = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}
