//! Status bar
//!
//! Displays the latest status message and the model state.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};
use textlab_app::{App, SessionState, StatusLevel};

/// Render the status bar.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let model = match app.session().state() {
        SessionState::ModelLoading => {
            Span::styled("Loading", Style::default().fg(Color::Yellow))
        },
        SessionState::ModelFailed { .. } => {
            Span::styled("No model", Style::default().fg(Color::Red))
        },
        SessionState::Idle | SessionState::Ready => Span::styled(
            app.session().model_name().unwrap_or("Ready").to_string(),
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        ),
    };

    let message = app.status().map_or_else(
        || Span::raw(""),
        |status| {
            let style = match status.level {
                StatusLevel::Info => Style::default(),
                StatusLevel::Success => Style::default().fg(Color::Green),
                StatusLevel::Error => Style::default().fg(Color::Red),
            };
            Span::styled(format!(" | {}", status.text), style)
        },
    );

    let status_line = Line::from(vec![Span::raw(" "), model, message]);

    let paragraph =
        Paragraph::new(status_line).style(Style::default().bg(Color::DarkGray).fg(Color::White));

    frame.render_widget(paragraph, area);
}
