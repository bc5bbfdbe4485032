//! Report area
//!
//! Draws the shown report as a table or a wrapped paragraph, or a hint for
//! the current state when nothing is shown.

use ratatui::{
    Frame,
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Cell, Paragraph, Row, Table as TableWidget, Wrap},
};
use textlab_app::{App, Report, SessionState, Table};

const BORDER_SIZE: u16 = 2;
const HEADER_HEIGHT: u16 = 1;

/// Render the report area.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let Some(shown) = app.report() else {
        let block = Block::default().borders(Borders::ALL).title(" Report ");
        let hint = Paragraph::new(Line::styled(hint(app), Style::default().fg(Color::DarkGray)))
            .wrap(Wrap { trim: true })
            .block(block);
        frame.render_widget(hint, area);
        return;
    };

    let block =
        Block::default().borders(Borders::ALL).title(format!(" {} ", shown.operation.heading()));

    match &shown.report {
        Report::Table(table) => render_table(frame, table, block, area),
        Report::Text(body) => {
            let paragraph = Paragraph::new(body.as_str()).wrap(Wrap { trim: false }).block(block);
            frame.render_widget(paragraph, area);
        },
    }
}

fn render_table(frame: &mut Frame, table: &Table, block: Block<'_>, area: Rect) {
    let header = Row::new(table.columns().iter().map(|c| Cell::from(c.as_str())))
        .style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD));

    let visible = area.height.saturating_sub(BORDER_SIZE + HEADER_HEIGHT) as usize;
    let rows = table
        .rows()
        .iter()
        .take(visible)
        .map(|row| Row::new(row.iter().map(|cell| Cell::from(cell.as_str()))));

    let widget = TableWidget::new(rows, column_widths(table)).header(header).block(block);
    frame.render_widget(widget, area);
}

/// Width of each column: its longest cell or header.
fn column_widths(table: &Table) -> Vec<Constraint> {
    table
        .columns()
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let widest = table
                .rows()
                .iter()
                .filter_map(|row| row.get(i))
                .map(|cell| cell.chars().count())
                .chain(std::iter::once(name.chars().count()))
                .max()
                .unwrap_or(0);
            Constraint::Length(u16::try_from(widest).unwrap_or(u16::MAX))
        })
        .collect()
}

fn hint(app: &App) -> &'static str {
    if app.session().is_model_lost() && !app.session().is_load_pending() {
        return "Model connection lost. Type 'r' to reload it.";
    }
    match app.session().state() {
        SessionState::ModelLoading => "Loading model...",
        SessionState::ModelFailed { .. } => {
            "Model failed to load. Type 'r' to retry or 'q' to exit."
        },
        SessionState::Idle => "Enter text to analyze.",
        SessionState::Ready => "Choose an operation from the menu.",
    }
}
