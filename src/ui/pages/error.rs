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

    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled("Something went wrong", styles::error_style(theme))),
        Line::from(""),
    ];

    if let Some(ref detail) = app.last_error {
        lines.push(Line::from(Span::styled(
            detail.clone(),
            styles::muted_style(theme),
        )));
        lines.push(Line::from(""));
    }

    lines.push(Line::from(Span::styled(
        "Please try again or come back later.",
        styles::list_item_style(theme),
    )));
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("Press ", styles::muted_style(theme)),
        Span::styled("[1]", styles::help_key_style(theme)),
        Span::styled(" to go home", styles::muted_style(theme)),
    ]));

    let paragraph = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}
