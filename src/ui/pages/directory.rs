use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

use crate::app::{App, AppState};
use crate::table::TableRow;
use crate::ui::styles;

/// Terminal cells per pixel unit of column width. Widths are modelled
/// in px to match the persisted layout; rendering quantizes them.
const PX_PER_CELL: u16 = 8;

fn px_to_cells(px: u16) -> u16 {
    ((px + PX_PER_CELL / 2) / PX_PER_CELL).max(4)
}

/// Render the Directory page - filter box above the member table.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(5)])
        .split(area);

    render_filter(frame, app, chunks[0]);
    render_table(frame, app, chunks[1]);
}

fn render_filter(frame: &mut Frame, app: &App, area: Rect) {
    let theme = app.theme;
    let searching = matches!(app.state, AppState::Searching);

    let content = if app.directory.filter().is_empty() && !searching {
        Line::from(Span::styled("Press / to search", styles::muted_style(theme)))
    } else {
        let cursor = if searching { "▌" } else { "" };
        Line::from(vec![
            Span::styled("/", styles::muted_style(theme)),
            Span::styled(
                format!("{}{}", app.directory.filter(), cursor),
                styles::search_style(theme),
            ),
        ])
    };

    let block = Block::default()
        .title(" Search ")
        .title_style(styles::muted_style(theme))
        .borders(Borders::ALL)
        .border_style(styles::border_style(theme, searching));

    frame.render_widget(Paragraph::new(content).block(block), area);
}

fn render_table(frame: &mut Frame, app: &App, area: Rect) {
    let theme = app.theme;
    let visible = app.visible_members();
    let active_key = app.active_column_key();

    // Build header with sort and resize-target indicators
    let header_cells: Vec<Cell> = app
        .directory
        .columns()
        .iter()
        .map(|column| {
            let sort_indicator = if app.directory.sort_column() == Some(column.key) {
                if app.directory.sort_ascending() {
                    " ▲"
                } else {
                    " ▼"
                }
            } else {
                ""
            };
            let label = format!("{}{}", column.key.to_uppercase(), sort_indicator);
            if column.key == active_key {
                Cell::from(label).style(styles::highlight_style(theme))
            } else {
                Cell::from(label)
            }
        })
        .collect();

    let header = Row::new(header_cells)
        .style(styles::title_style(theme))
        .height(1);

    let rows: Vec<Row> = visible
        .iter()
        .map(|member| {
            let cells: Vec<Cell> = app
                .directory
                .columns()
                .iter()
                .map(|column| Cell::from(member.cell(column.key).to_string()))
                .collect();
            Row::new(cells).style(styles::list_item_style(theme))
        })
        .collect();

    let widths: Vec<Constraint> = app
        .directory
        .columns()
        .iter()
        .map(|column| Constraint::Length(px_to_cells(app.directory.width_of(column.key))))
        .collect();

    let title = format!(
        " Directory ({}) - sort: [n]ame [a]ge [e]mail ",
        visible.len()
    );

    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .title(title)
                .title_style(styles::muted_style(theme))
                .borders(Borders::ALL)
                .border_style(styles::border_style(theme, true)),
        )
        .row_highlight_style(styles::selected_style(theme));

    let mut state = TableState::default();
    if !visible.is_empty() {
        state.select(Some(app.directory_selection.min(visible.len() - 1)));
    }

    frame.render_stateful_widget(table, area, &mut state);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_px_to_cells_rounds_and_floors() {
        assert_eq!(px_to_cells(150), 19);
        assert_eq!(px_to_cells(600), 75);
        // Never collapses below a readable column
        assert_eq!(px_to_cells(1), 4);
    }
}
