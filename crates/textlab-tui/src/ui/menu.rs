//! Menu sidebar
//!
//! Lists the operations with their keys. The highlighted entry is what an
//! empty Enter picks.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
};
use textlab_app::{App, MenuEntry, Mode};

use crate::InputState;

const SELECTED_PREFIX: &str = ">";
const UNSELECTED_PREFIX: &str = " ";

/// Render the menu sidebar.
pub fn render(frame: &mut Frame, app: &App, input_state: &InputState, area: Rect) {
    let choosing = app.mode() == Mode::ChooseOperation;
    let shown = app.report().map(|r| r.operation);

    let items: Vec<ListItem> = MenuEntry::ALL
        .into_iter()
        .map(|entry| {
            let selected = choosing && entry == input_state.selected();
            let prefix = if selected { SELECTED_PREFIX } else { UNSELECTED_PREFIX };

            let style = if !choosing {
                Style::default().fg(Color::DarkGray)
            } else if selected {
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
            } else if matches!(entry, MenuEntry::Operation(op) if Some(op) == shown) {
                Style::default().fg(Color::Cyan)
            } else {
                Style::default()
            };

            ListItem::new(Line::from(vec![
                Span::raw(prefix),
                Span::styled(format!("{}. {}", entry.key(), entry.label()), style),
            ]))
        })
        .collect();

    let block = Block::default().borders(Borders::ALL).title(" Operations ");
    let list = List::new(items).block(block);

    frame.render_widget(list, area);
}
