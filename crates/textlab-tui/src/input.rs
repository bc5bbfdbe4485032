//! Input state and key handling for the TUI.
//!
//! This module owns all text input state (buffer, cursor, highlighted menu
//! entry) and handles character-level key events. Completed lines are
//! handed to the [`App`] on Enter.

use textlab_app::{App, AppAction, AppEvent, KeyInput, MenuEntry, Mode};

/// Input state for the TUI.
///
/// Manages the text input buffer, the cursor position (in characters) and
/// the menu entry highlighted in the sidebar.
#[derive(Debug, Default)]
pub struct InputState {
    /// Text buffer for user input.
    buffer: String,
    /// Cursor position within the buffer, in characters.
    cursor: usize,
    /// Index into [`MenuEntry::ALL`].
    selected: usize,
}

impl InputState {
    /// Create a new empty input state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Input state pre-filled with `text`, cursor at the end.
    pub fn with_text(text: impl Into<String>) -> Self {
        let buffer = text.into();
        let cursor = buffer.chars().count();
        Self { buffer, cursor, selected: 0 }
    }

    /// Current text in the input buffer.
    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    /// Current cursor position, in characters.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Highlighted menu entry.
    pub fn selected(&self) -> MenuEntry {
        MenuEntry::ALL.get(self.selected).copied().unwrap_or(MenuEntry::Exit)
    }

    /// Handle a key input event.
    ///
    /// Returns actions to process (may be empty for keys that change
    /// nothing).
    pub fn handle_key(&mut self, key: KeyInput, app: &mut App) -> Vec<AppAction> {
        match key {
            KeyInput::Char(c) => {
                let at = self.byte_offset(self.cursor);
                self.buffer.insert(at, c);
                self.cursor = self.cursor.saturating_add(1);
                vec![AppAction::Render]
            },
            KeyInput::Backspace => {
                if self.cursor > 0 {
                    self.cursor = self.cursor.saturating_sub(1);
                    let at = self.byte_offset(self.cursor);
                    self.buffer.remove(at);
                }
                vec![AppAction::Render]
            },
            KeyInput::Delete => {
                if self.cursor < self.len() {
                    let at = self.byte_offset(self.cursor);
                    self.buffer.remove(at);
                }
                vec![AppAction::Render]
            },
            KeyInput::Left => {
                self.cursor = self.cursor.saturating_sub(1);
                vec![AppAction::Render]
            },
            KeyInput::Right => {
                if self.cursor < self.len() {
                    self.cursor = self.cursor.saturating_add(1);
                }
                vec![AppAction::Render]
            },
            KeyInput::Home => {
                self.cursor = 0;
                vec![AppAction::Render]
            },
            KeyInput::End => {
                self.cursor = self.len();
                vec![AppAction::Render]
            },
            KeyInput::Up => self.move_selection(app, MenuEntry::ALL.len() - 1),
            KeyInput::Down | KeyInput::Tab => self.move_selection(app, 1),
            KeyInput::Enter => self.handle_enter(app),
            KeyInput::Esc | KeyInput::Ctrl('c') => app.quit(),
            KeyInput::Ctrl('l') => app.handle(AppEvent::Clear),
            KeyInput::Ctrl(_) => vec![],
        }
    }

    /// Handle Enter key.
    ///
    /// An empty line while choosing an operation picks the highlighted menu
    /// entry. Anything else goes to the App as a completed line.
    fn handle_enter(&mut self, app: &mut App) -> Vec<AppAction> {
        let line = std::mem::take(&mut self.buffer);
        self.cursor = 0;

        if line.trim().is_empty() && app.mode() == Mode::ChooseOperation {
            return app.choose(self.selected().choice());
        }

        app.handle(AppEvent::Line(line))
    }

    fn move_selection(&mut self, app: &App, step: usize) -> Vec<AppAction> {
        if app.mode() != Mode::ChooseOperation {
            return vec![];
        }
        self.selected = (self.selected + step) % MenuEntry::ALL.len();
        vec![AppAction::Render]
    }

    fn len(&self) -> usize {
        self.buffer.chars().count()
    }

    fn byte_offset(&self, chars: usize) -> usize {
        self.buffer.char_indices().nth(chars).map_or(self.buffer.len(), |(i, _)| i)
    }
}
