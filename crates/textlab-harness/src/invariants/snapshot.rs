//! Observable state snapshots for invariant checking.
//!
//! Snapshots capture the observable state of a session at a point in time.
//! Invariants operate on snapshots rather than live state to ensure
//! consistent, atomic checks.

use textlab_app::{App, Mode, OperationId, Report, Session, SessionState, ShownReport};
use textlab_core::Document;

/// Snapshot of one session, optionally with the App around it.
#[derive(Debug, Clone)]
pub struct SessionSnapshot {
    /// Session state.
    pub state: SessionState,
    /// A model handle is installed.
    pub model_loaded: bool,
    /// Current document.
    pub document: Option<Document>,
    /// Raw text of the current document.
    pub text: Option<String>,
    /// Output of every operation over the current document, in menu order.
    /// Empty when no document is current.
    pub reports: Vec<(OperationId, Report)>,
    /// App input mode. `None` for a bare session.
    pub mode: Option<Mode>,
    /// Report the App has on screen.
    pub shown: Option<ShownReport>,
}

impl SessionSnapshot {
    /// Snapshot of a fresh session before any load completes.
    pub fn loading() -> Self {
        Self {
            state: SessionState::ModelLoading,
            model_loaded: false,
            document: None,
            text: None,
            reports: Vec::new(),
            mode: None,
            shown: None,
        }
    }

    /// Capture a bare session.
    pub fn from_session(session: &Session) -> Self {
        let reports = if session.document().is_some() {
            OperationId::ALL
                .iter()
                .filter_map(|&op| session.invoke(op).ok().map(|report| (op, report)))
                .collect()
        } else {
            Vec::new()
        };

        Self {
            state: session.state().clone(),
            model_loaded: session.is_model_ready(),
            document: session.document().cloned(),
            text: session.text().map(str::to_owned),
            reports,
            mode: None,
            shown: None,
        }
    }

    /// Capture an App and its session.
    pub fn from_app(app: &App) -> Self {
        Self {
            mode: Some(app.mode()),
            shown: app.report().cloned(),
            ..Self::from_session(app.session())
        }
    }

    /// Report produced by `op`, if captured.
    pub fn report(&self, op: OperationId) -> Option<&Report> {
        self.reports.iter().find(|(id, _)| *id == op).map(|(_, report)| report)
    }
}
