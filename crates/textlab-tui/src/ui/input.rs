//! Input line
//!
//! Displays the input buffer with cursor. The title tells whether the line
//! will be read as text or as a menu option.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    widgets::{Block, Borders, Paragraph},
};
use textlab_app::{App, Mode};

use crate::InputState;

const PROMPT_WIDTH: u16 = 2; // "> "
const INPUT_LINE_OFFSET_Y: u16 = 1; // inside top border
const LEFT_BORDER: u16 = 1;
const RIGHT_PADDING: u16 = 1; // inside right border

/// Render the input line.
pub fn render(frame: &mut Frame, app: &App, input: &InputState, area: Rect) {
    let title = match app.mode() {
        Mode::EnterText => " Text ",
        Mode::ChooseOperation => " Option (1 - 9, n for new text) ",
    };
    let block = Block::default().borders(Borders::ALL).title(title);

    let input_text = format!("> {}", input.buffer());
    let paragraph =
        Paragraph::new(input_text).style(Style::default().fg(Color::White)).block(block);

    frame.render_widget(paragraph, area);

    let available_width = area.width.saturating_sub(LEFT_BORDER + PROMPT_WIDTH + RIGHT_PADDING);
    let cursor_offset = u16::try_from(input.cursor()).unwrap_or(u16::MAX).min(available_width);

    let cursor_x =
        area.x.saturating_add(LEFT_BORDER + PROMPT_WIDTH).saturating_add(cursor_offset);
    let cursor_y = area.y.saturating_add(INPUT_LINE_OFFSET_Y);
    let max_x = area.x.saturating_add(area.width).saturating_sub(RIGHT_PADDING);
    let cursor_x = cursor_x.min(max_x);

    frame.set_cursor_position((cursor_x, cursor_y));
}
