//! Application state machine.
//!
//! This module defines the [`App`] state machine, which manages the interactive
//! state of the application completely decoupled from terminal I/O and from
//! the language engine.
//!
//! It consumes [`crate::AppEvent`] inputs and produces [`crate::AppAction`]
//! instructions for the runtime to execute.
//!
//! # Responsibilities
//!
//! - Owns the [`Session`] and turns its outcomes into status lines.
//! - Tracks whether the next input line is text or a menu choice.
//! - Keeps the report currently on screen.
//! - Stores terminal dimensions to handle resize events.

use std::sync::Arc;

use textlab_core::ModelGateway;

use crate::{
    AppAction, AppEvent, MenuChoice, Mode, OperationId, Session, SessionError, SessionState,
    ShownReport, StatusLevel, StatusMessage,
};

/// Longest text prefix echoed back in the status line.
const PREVIEW_CHARS: usize = 50;

const RELOAD_HINT: &str = "Type 'r' to reload the model.";

/// Application state machine.
///
/// Processes events and produces actions. The only I/O it triggers is the
/// session's background model load.
#[derive(Debug)]
pub struct App {
    /// Session controller.
    session: Session,
    /// Meaning of the next input line.
    mode: Mode,
    /// Report on screen. `None` if nothing is shown.
    report: Option<ShownReport>,
    /// Transient status message. `None` if no message.
    status: Option<StatusMessage>,
    /// Terminal dimensions (columns, rows).
    terminal_size: (u16, u16),
    /// Bumped on every visible change.
    revision: u64,
    /// Revision at which the status last changed.
    status_revision: u64,
    /// Revision at which the report last changed.
    report_revision: u64,
}

impl App {
    /// Create an App around an existing session.
    pub fn new(session: Session) -> Self {
        Self {
            session,
            mode: Mode::EnterText,
            report: None,
            status: None,
            terminal_size: (80, 24),
            revision: 0,
            status_revision: 0,
            report_revision: 0,
        }
    }

    /// Create an App with a fresh session over `gateway`.
    pub fn with_gateway(gateway: Arc<dyn ModelGateway>) -> Self {
        Self::new(Session::new(gateway))
    }

    /// Start loading the model in the background.
    pub fn start(&mut self) -> Vec<AppAction> {
        self.session.start_model_load();
        if let SessionState::ModelFailed { reason } = self.session.state() {
            let text = format!("Error loading model: {reason}");
            self.set_status_level(StatusLevel::Error, text);
        } else {
            self.set_status_level(StatusLevel::Info, "Loading model...");
        }
        vec![AppAction::Render]
    }

    /// Process an event and return actions.
    pub fn handle(&mut self, event: AppEvent) -> Vec<AppAction> {
        match event {
            AppEvent::Tick => match self.session.poll_model_load() {
                Some(outcome) => self.apply_model_outcome(outcome),
                None => vec![],
            },
            AppEvent::Resize(cols, rows) => {
                self.terminal_size = (cols, rows);
                self.touch();
                vec![AppAction::Render]
            },
            AppEvent::Line(line) => self.enter_line(&line),
            AppEvent::Clear => self.clear(),
            AppEvent::Quit => self.quit(),
        }
    }

    /// Wait for an in-flight model load and apply it. No-op if none is
    /// pending.
    pub async fn wait_for_model(&mut self) -> Vec<AppAction> {
        if !self.session.is_load_pending() {
            return vec![];
        }
        let outcome = self.session.wait_for_model().await;
        self.apply_model_outcome(outcome)
    }

    fn apply_model_outcome(&mut self, outcome: Result<(), SessionError>) -> Vec<AppAction> {
        match outcome {
            Ok(()) => {
                self.set_status_level(StatusLevel::Success, "Model loaded. Enter text to analyze.");
            },
            Err(e) => {
                let reason = match e {
                    SessionError::ModelLoadFailed { reason } => reason,
                    other => other.to_string(),
                };
                self.set_status_level(StatusLevel::Error, format!("Error loading model: {reason}"));
            },
        }
        vec![AppAction::Render]
    }

    /// Interpret a completed input line according to the current mode.
    pub fn enter_line(&mut self, line: &str) -> Vec<AppAction> {
        if matches!(self.session.state(), SessionState::ModelFailed { .. }) {
            return match MenuChoice::parse(line) {
                choice @ (MenuChoice::Reload | MenuChoice::Exit) => self.choose(choice),
                _ => {
                    self.set_status_level(
                        StatusLevel::Error,
                        "Model failed to load. Type 'r' to retry or 'q' to exit.",
                    );
                    vec![AppAction::Render]
                },
            };
        }

        match self.mode {
            Mode::EnterText => match MenuChoice::parse_text_command(line) {
                Some(MenuChoice::Exit) => self.quit(),
                Some(MenuChoice::Reload) if self.session.is_model_lost() => self.reload(),
                _ => self.submit_text(line),
            },
            Mode::ChooseOperation => self.choose(MenuChoice::parse(line)),
        }
    }

    /// Process `text` and show its tokens.
    pub fn submit_text(&mut self, text: &str) -> Vec<AppAction> {
        match self.session.submit_text(text) {
            Ok(document) => {
                let count = document.len();
                let message = format!("Processed {count} tokens: '{}'", preview(text.trim()));
                self.mode = Mode::ChooseOperation;
                self.set_status_level(StatusLevel::Success, message);
                self.show(OperationId::Tokenize)
            },
            Err(e) => {
                let mut message = capitalize(&e.to_string());
                if self.session.is_model_lost() {
                    message = format!("{message}. {RELOAD_HINT}");
                }
                self.set_status_level(StatusLevel::Error, message);
                vec![AppAction::Render]
            },
        }
    }

    /// Act on a menu choice.
    pub fn choose(&mut self, choice: MenuChoice) -> Vec<AppAction> {
        match choice {
            MenuChoice::Operation(op) => self.show(op),
            MenuChoice::Reset => self.new_text(),
            MenuChoice::Exit => self.quit(),
            MenuChoice::Reload => self.reload(),
            MenuChoice::Invalid(token) => {
                self.set_status_level(
                    StatusLevel::Error,
                    format!("Invalid option: {token}"),
                );
                vec![AppAction::Render]
            },
        }
    }

    /// Run `op` on the current document and show the result.
    pub fn show(&mut self, op: OperationId) -> Vec<AppAction> {
        match self.session.invoke(op) {
            Ok(report) => {
                self.report = Some(ShownReport { operation: op, report });
                self.report_revision = self.touch();
            },
            Err(e) => self.set_error(&e),
        }
        vec![AppAction::Render]
    }

    /// Discard the current document and prompt for new text.
    pub fn new_text(&mut self) -> Vec<AppAction> {
        self.session.reset();
        self.mode = Mode::EnterText;
        if self.report.take().is_some() {
            self.report_revision = self.touch();
        }
        self.set_status_level(StatusLevel::Info, "Enter new text to analyze.");
        vec![AppAction::Render]
    }

    /// Retry loading the model after a failure or a lost engine connection.
    pub fn reload(&mut self) -> Vec<AppAction> {
        let message = if self.session.is_load_pending() {
            "Model is still loading."
        } else if self.session.is_model_lost()
            || matches!(self.session.state(), SessionState::ModelFailed { .. })
        {
            self.session.start_model_load();
            "Reloading model..."
        } else {
            "Model is already loaded."
        };
        self.set_status_level(StatusLevel::Info, message);
        vec![AppAction::Render]
    }

    /// Remove the report from screen.
    pub fn clear(&mut self) -> Vec<AppAction> {
        self.report = None;
        self.report_revision = self.touch();
        self.set_status_level(StatusLevel::Info, "Cleared");
        vec![AppAction::Render]
    }

    /// Quit the application.
    pub fn quit(&self) -> Vec<AppAction> {
        vec![AppAction::Quit]
    }

    /// Set an informational status message.
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.set_status_level(StatusLevel::Info, message);
    }

    fn set_status_level(&mut self, level: StatusLevel, message: impl Into<String>) {
        self.status = Some(StatusMessage::new(level, message));
        self.status_revision = self.touch();
    }

    fn set_error(&mut self, error: &SessionError) {
        self.set_status_level(StatusLevel::Error, capitalize(&error.to_string()));
    }

    fn touch(&mut self) -> u64 {
        self.revision = self.revision.wrapping_add(1);
        self.revision
    }

    /// Session controller.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Meaning of the next input line.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Report on screen. `None` if nothing is shown.
    pub fn report(&self) -> Option<&ShownReport> {
        self.report.as_ref()
    }

    /// Transient status message. `None` if no message.
    pub fn status(&self) -> Option<&StatusMessage> {
        self.status.as_ref()
    }

    /// Terminal dimensions (columns, rows).
    pub fn terminal_size(&self) -> (u16, u16) {
        self.terminal_size
    }

    /// Counter bumped on every visible change.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Revision at which the status last changed.
    pub fn status_revision(&self) -> u64 {
        self.status_revision
    }

    /// Revision at which the report last changed.
    pub fn report_revision(&self) -> u64 {
        self.report_revision
    }
}

fn preview(text: &str) -> String {
    let mut out: String = text.chars().take(PREVIEW_CHARS).collect();
    if text.chars().count() > PREVIEW_CHARS {
        out.push_str("...");
    }
    out
}

fn capitalize(message: &str) -> String {
    let mut chars = message.chars();
    chars.next().map_or_else(String::new, |first| first.to_uppercase().chain(chars).collect())
}
