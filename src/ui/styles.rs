// Allow dead code: Style functions defined for consistent UI
#![allow(dead_code)]

use ratatui::style::{Color, Modifier, Style};

use crate::theme::Theme;

// Shared accents
const PRIMARY: Color = Color::Rgb(64, 128, 192);
const SECONDARY: Color = Color::Rgb(96, 160, 96);
const ACCENT_DARK: Color = Color::Rgb(192, 160, 64);
const ACCENT_LIGHT: Color = Color::Rgb(144, 112, 16);
const ERROR: Color = Color::Rgb(192, 64, 64);

fn foreground(theme: Theme) -> Color {
    match theme {
        Theme::Light => Color::Black,
        Theme::Dark => Color::White,
    }
}

fn muted(theme: Theme) -> Color {
    match theme {
        Theme::Light => Color::Rgb(96, 96, 96),
        Theme::Dark => Color::Rgb(128, 128, 128),
    }
}

fn accent(theme: Theme) -> Color {
    match theme {
        Theme::Light => ACCENT_LIGHT,
        Theme::Dark => ACCENT_DARK,
    }
}

fn selection_bg(theme: Theme) -> Color {
    match theme {
        Theme::Light => Color::Rgb(208, 220, 236),
        Theme::Dark => Color::Rgb(48, 48, 64),
    }
}

// Styles
pub fn title_style(_theme: Theme) -> Style {
    Style::default().fg(PRIMARY).add_modifier(Modifier::BOLD)
}

pub fn selected_style(theme: Theme) -> Style {
    Style::default()
        .bg(selection_bg(theme))
        .add_modifier(Modifier::BOLD)
}

pub fn list_item_style(theme: Theme) -> Style {
    Style::default().fg(foreground(theme))
}

pub fn muted_style(theme: Theme) -> Style {
    Style::default().fg(muted(theme))
}

pub fn highlight_style(theme: Theme) -> Style {
    Style::default().fg(accent(theme))
}

pub fn success_style(_theme: Theme) -> Style {
    Style::default().fg(SECONDARY)
}

pub fn error_style(_theme: Theme) -> Style {
    Style::default().fg(ERROR)
}

pub fn tab_style(theme: Theme, selected: bool) -> Style {
    if selected {
        Style::default()
            .fg(PRIMARY)
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
    } else {
        Style::default().fg(foreground(theme))
    }
}

pub fn border_style(theme: Theme, focused: bool) -> Style {
    if focused {
        Style::default().fg(PRIMARY)
    } else {
        Style::default().fg(muted(theme))
    }
}

pub fn search_style(theme: Theme) -> Style {
    Style::default().fg(accent(theme))
}

pub fn status_bar_style(theme: Theme) -> Style {
    match theme {
        Theme::Light => Style::default()
            .bg(Color::Rgb(224, 224, 228))
            .fg(Color::Black),
        Theme::Dark => Style::default()
            .bg(Color::Rgb(32, 32, 40))
            .fg(Color::White),
    }
}

pub fn help_key_style(theme: Theme) -> Style {
    Style::default().fg(accent(theme)).add_modifier(Modifier::BOLD)
}

pub fn help_desc_style(theme: Theme) -> Style {
    Style::default().fg(foreground(theme))
}
