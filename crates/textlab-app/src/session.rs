//! Session controller.
//!
//! This module defines the [`Session`] state machine, which owns the model
//! handle and the current document for one interactive session.
//!
//! # State machine
//!
//! ```text
//! ModelLoading --load ok-->     Idle
//! ModelLoading --load failed--> ModelFailed --reload--> ModelLoading
//! Idle  --submit ok-->  Ready
//! Ready --submit ok-->  Ready   (document replaced)
//! Ready --reset-->      Idle
//! Idle/Ready --submit failed--> unchanged
//! ```
//!
//! A handle whose engine connection is gone stays installed but is marked
//! lost. Reloading then replaces it in the background without leaving
//! `Idle`/`Ready`, so the current document survives.
//!
//! # Concurrency
//!
//! Model loading is the only work that runs concurrently with the caller: it
//! executes on a dedicated thread and hands its result back over a oneshot
//! channel. The handle is installed only when the foreground observes the
//! result through [`Session::poll_model_load`] or [`Session::wait_for_model`],
//! so a partially initialized model is never visible. All transitions take
//! `&mut self`, which makes the owner the single writer.

use std::{sync::Arc, thread};

use textlab_core::{Document, LoadError, ModelGateway, ModelHandle, ProcessError};
use tokio::sync::{Mutex, oneshot};

use crate::{OperationId, OperationRegistry, Report, SessionError, SessionState};

/// A session shared between tasks. The mutex serializes transitions.
pub type SharedSession = Arc<Mutex<Session>>;

type LoadOutcome = Result<Arc<dyn ModelHandle>, LoadError>;

const LOADER_THREAD_NAME: &str = "textlab-model-loader";

/// The current document and the text it was produced from.
struct Analysis {
    document: Document,
    text: String,
}

/// Session controller.
///
/// Invariants:
/// - a document is current iff the state is [`SessionState::Ready`]
/// - a model handle is installed iff the state is `Idle` or `Ready`
/// - `model_lost` implies a model handle is installed
pub struct Session {
    gateway: Arc<dyn ModelGateway>,
    registry: OperationRegistry,
    state: SessionState,
    model: Option<Arc<dyn ModelHandle>>,
    /// The installed handle reported a dropped engine connection.
    model_lost: bool,
    current: Option<Analysis>,
    pending_load: Option<oneshot::Receiver<LoadOutcome>>,
}

impl Session {
    /// Create a session over `gateway`. No load is started.
    pub fn new(gateway: Arc<dyn ModelGateway>) -> Self {
        Self {
            gateway,
            registry: OperationRegistry::standard(),
            state: SessionState::ModelLoading,
            model: None,
            model_lost: false,
            current: None,
            pending_load: None,
        }
    }

    /// Wrap the session for sharing between tasks.
    pub fn into_shared(self) -> SharedSession {
        Arc::new(Mutex::new(self))
    }

    /// Begin loading the model on a background thread. Returns immediately.
    ///
    /// No-op while a load is in flight or once a healthy model is installed.
    /// From [`SessionState::ModelFailed`] this is the reload path. If the
    /// installed model lost its engine connection, the replacement loads in
    /// the background and the state is left as it is.
    pub fn start_model_load(&mut self) {
        if self.pending_load.is_some() {
            tracing::debug!("model load already in flight");
            return;
        }
        if self.model.is_some() && !self.model_lost {
            tracing::debug!("model already loaded");
            return;
        }
        let replacing = self.model.is_some();

        let (tx, rx) = oneshot::channel();
        let gateway = Arc::clone(&self.gateway);
        let spawned = thread::Builder::new().name(LOADER_THREAD_NAME.to_owned()).spawn(move || {
            let outcome = gateway.load();
            // Receiver is gone if the session was dropped mid-load
            let _ = tx.send(outcome);
        });

        match spawned {
            Ok(_) => {
                tracing::debug!(replacing, "model load started");
                if !replacing {
                    self.state = SessionState::ModelLoading;
                }
                self.pending_load = Some(rx);
            },
            Err(e) if replacing => {
                tracing::warn!(error = %e, "failed to spawn model loader, keeping lost model");
            },
            Err(e) => {
                tracing::warn!(error = %e, "failed to spawn model loader");
                self.state =
                    SessionState::ModelFailed { reason: format!("could not start loader: {e}") };
            },
        }
    }

    /// Apply a finished model load, if any.
    ///
    /// Returns `None` while the load is still running or when none was
    /// started, and `Some` exactly once per completed load.
    pub fn poll_model_load(&mut self) -> Option<Result<(), SessionError>> {
        let rx = self.pending_load.as_mut()?;
        let outcome = match rx.try_recv() {
            Ok(outcome) => outcome,
            Err(oneshot::error::TryRecvError::Empty) => return None,
            Err(oneshot::error::TryRecvError::Closed) => Err(loader_vanished()),
        };

        self.pending_load = None;
        Some(self.apply_load(outcome))
    }

    /// Wait for the in-flight model load and apply it.
    ///
    /// Cancel-safe: dropping the future leaves the load pending.
    ///
    /// # Errors
    ///
    /// [`SessionError::ModelLoadFailed`] if the load failed (now or earlier),
    /// [`SessionError::ModelNotReady`] if no load was ever started.
    pub async fn wait_for_model(&mut self) -> Result<(), SessionError> {
        let Some(rx) = self.pending_load.as_mut() else {
            return match &self.state {
                SessionState::Idle | SessionState::Ready => Ok(()),
                SessionState::ModelFailed { reason } => {
                    Err(SessionError::ModelLoadFailed { reason: reason.clone() })
                },
                SessionState::ModelLoading => Err(SessionError::ModelNotReady),
            };
        };

        let outcome = rx.await.unwrap_or_else(|_| Err(loader_vanished()));
        self.pending_load = None;
        self.apply_load(outcome)
    }

    fn apply_load(&mut self, outcome: LoadOutcome) -> Result<(), SessionError> {
        match outcome {
            Ok(model) => {
                tracing::info!(model = model.name(), "model loaded");
                self.model = Some(model);
                self.model_lost = false;
                if !self.state.accepts_text() {
                    self.state = SessionState::Idle;
                }
                Ok(())
            },
            Err(e) => {
                let reason = e.to_string();
                tracing::warn!(%reason, "model load failed");
                // A lost model stays installed so the document survives
                if self.model.is_none() {
                    self.state = SessionState::ModelFailed { reason: reason.clone() };
                }
                Err(SessionError::ModelLoadFailed { reason })
            },
        }
    }

    /// Process `raw` and make the result the current document.
    ///
    /// The text is trimmed before processing. On failure the previous
    /// document, if any, stays current.
    ///
    /// # Errors
    ///
    /// - [`SessionError::EmptyInput`] if `raw` is blank
    /// - [`SessionError::ModelNotReady`] while loading or after a failed load
    /// - [`SessionError::ProcessingFailed`] if the gateway fails. A lost
    ///   engine connection also marks the model lost; see
    ///   [`Session::is_model_lost`].
    pub fn submit_text(&mut self, raw: &str) -> Result<&Document, SessionError> {
        let text = raw.trim();
        if text.is_empty() {
            return Err(SessionError::EmptyInput);
        }

        let model = match (&self.state, &self.model) {
            (SessionState::Idle | SessionState::Ready, Some(model)) => Arc::clone(model),
            _ => return Err(SessionError::ModelNotReady),
        };

        let document = match model.process(text) {
            Ok(document) => document,
            Err(e) => {
                tracing::warn!(error = %e, "processing failed");
                if matches!(e, ProcessError::Disconnected { .. }) {
                    self.model_lost = true;
                }
                return Err(SessionError::ProcessingFailed { reason: e.to_string() });
            },
        };

        tracing::debug!(tokens = document.len(), "document replaced");
        self.state = SessionState::Ready;
        let analysis = self.current.insert(Analysis { document, text: text.to_owned() });
        Ok(&analysis.document)
    }

    /// Run `op` against the current document.
    ///
    /// # Errors
    ///
    /// [`SessionError::NoDocument`] unless a document is current;
    /// [`SessionError::InvalidOperation`] if `op` is not registered.
    pub fn invoke(&self, op: OperationId) -> Result<Report, SessionError> {
        let analysis = self.current.as_ref().ok_or(SessionError::NoDocument)?;
        let operation = self
            .registry
            .get(op)
            .ok_or_else(|| SessionError::InvalidOperation { id: op.to_string() })?;

        Ok(operation.run(&analysis.document))
    }

    /// Resolve a free-form operation name, then [`Session::invoke`] it.
    ///
    /// # Errors
    ///
    /// [`SessionError::InvalidOperation`] for an unknown name, otherwise as
    /// [`Session::invoke`].
    pub fn invoke_by_name(&self, name: &str) -> Result<Report, SessionError> {
        let op: OperationId = name.parse()?;
        self.invoke(op)
    }

    /// Drop the current document and return to [`SessionState::Idle`]. The
    /// model stays loaded. No effect unless [`SessionState::Ready`].
    pub fn reset(&mut self) {
        if self.state == SessionState::Ready {
            tracing::debug!("session reset");
            self.current = None;
            self.state = SessionState::Idle;
        }
    }

    /// Current state.
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Current document. `None` unless [`SessionState::Ready`].
    pub fn document(&self) -> Option<&Document> {
        self.current.as_ref().map(|a| &a.document)
    }

    /// Text of the current document. `None` unless [`SessionState::Ready`].
    pub fn text(&self) -> Option<&str> {
        self.current.as_ref().map(|a| a.text.as_str())
    }

    /// A model is installed.
    pub fn is_model_ready(&self) -> bool {
        self.model.is_some()
    }

    /// Name of the installed model.
    pub fn model_name(&self) -> Option<&str> {
        self.model.as_deref().map(ModelHandle::name)
    }

    /// The installed model lost its engine connection and needs a reload.
    pub fn is_model_lost(&self) -> bool {
        self.model_lost
    }

    /// A model load is in flight.
    pub fn is_load_pending(&self) -> bool {
        self.pending_load.is_some()
    }

    /// The operation table this session dispatches through.
    pub fn registry(&self) -> &OperationRegistry {
        &self.registry
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("state", &self.state)
            .field("model", &self.model_name())
            .field("model_lost", &self.model_lost)
            .field("tokens", &self.document().map(Document::len))
            .field("load_pending", &self.pending_load.is_some())
            .finish_non_exhaustive()
    }
}

fn loader_vanished() -> LoadError {
    LoadError::Unavailable { reason: "model loader exited without a result".to_owned() }
}

#[cfg(test)]
mod tests {
    use textlab_core::{Sentence, Token};

    use super::*;

    struct EchoModel;

    impl ModelHandle for EchoModel {
        fn name(&self) -> &str {
            "echo"
        }

        fn process(&self, text: &str) -> Result<Document, ProcessError> {
            if text == "boom" {
                return Err(ProcessError::Rejected { reason: "boom".into() });
            }
            if text == "unplug" {
                return Err(ProcessError::Disconnected { reason: "pipe closed".into() });
            }
            let tokens: Vec<Token> = text
                .split_whitespace()
                .map(|w| Token {
                    text: w.into(),
                    pos: "X".into(),
                    tag: "XX".into(),
                    tag_explanation: None,
                    lemma: w.to_lowercase(),
                    dep: "dep".into(),
                    head: 0,
                    entity_type: None,
                    is_stop: false,
                })
                .collect();
            let len = tokens.len();
            Ok(Document::new(text, tokens, vec![Sentence { text: text.into(), start: 0, end: len }], vec![])?)
        }
    }

    struct EchoGateway {
        fail: bool,
    }

    impl ModelGateway for EchoGateway {
        fn load(&self) -> Result<Arc<dyn ModelHandle>, LoadError> {
            if self.fail {
                Err(LoadError::Model { model: "echo".into(), reason: "missing".into() })
            } else {
                Ok(Arc::new(EchoModel))
            }
        }
    }

    fn block_on<F: std::future::Future>(future: F) -> F::Output {
        tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(future)
    }

    fn loaded() -> Session {
        let mut session = Session::new(Arc::new(EchoGateway { fail: false }));
        session.start_model_load();
        block_on(session.wait_for_model()).unwrap();
        session
    }

    #[test]
    fn starts_loading_without_model() {
        let session = Session::new(Arc::new(EchoGateway { fail: false }));
        assert_eq!(session.state(), &SessionState::ModelLoading);
        assert!(!session.is_model_ready());
        assert!(!session.is_load_pending());
    }

    #[test]
    fn wait_without_load_is_not_ready() {
        let mut session = Session::new(Arc::new(EchoGateway { fail: false }));
        assert_eq!(block_on(session.wait_for_model()), Err(SessionError::ModelNotReady));
    }

    #[test]
    fn load_success_goes_idle() {
        let session = loaded();
        assert_eq!(session.state(), &SessionState::Idle);
        assert_eq!(session.model_name(), Some("echo"));
    }

    #[test]
    fn load_failure_is_terminal_until_reload() {
        let mut session = Session::new(Arc::new(EchoGateway { fail: true }));
        session.start_model_load();
        let result = block_on(session.wait_for_model());

        assert!(matches!(result, Err(SessionError::ModelLoadFailed { .. })));
        assert!(matches!(session.state(), SessionState::ModelFailed { .. }));
        assert_eq!(session.submit_text("hello"), Err(SessionError::ModelNotReady));
    }

    #[test]
    fn submit_and_replace() {
        let mut session = loaded();
        assert_eq!(session.submit_text("  one two  ").map(Document::len), Ok(2));
        assert_eq!(session.text(), Some("one two"));

        assert_eq!(session.submit_text("three").map(Document::len), Ok(1));
        assert_eq!(session.text(), Some("three"));
        assert_eq!(session.state(), &SessionState::Ready);
    }

    #[test]
    fn failed_submit_keeps_previous_document() {
        let mut session = loaded();
        session.submit_text("keep me").unwrap();

        let result = session.submit_text("boom");
        assert!(matches!(result, Err(SessionError::ProcessingFailed { .. })));
        assert_eq!(session.text(), Some("keep me"));
        assert_eq!(session.state(), &SessionState::Ready);
    }

    #[test]
    fn healthy_model_ignores_reload() {
        let mut session = loaded();
        session.start_model_load();
        assert!(!session.is_load_pending());
    }

    #[test]
    fn lost_model_reloads_in_place() {
        let mut session = loaded();
        session.submit_text("keep me").unwrap();

        let result = session.submit_text("unplug");
        assert!(matches!(result, Err(SessionError::ProcessingFailed { .. })));
        assert!(session.is_model_lost());
        assert_eq!(session.state(), &SessionState::Ready);

        session.start_model_load();
        assert!(session.is_load_pending());
        assert_eq!(session.state(), &SessionState::Ready);
        block_on(session.wait_for_model()).unwrap();

        assert!(!session.is_model_lost());
        assert_eq!(session.text(), Some("keep me"));
        assert_eq!(session.submit_text("fresh").map(Document::len), Ok(1));
    }

    #[test]
    fn rejected_text_does_not_mark_model_lost() {
        let mut session = loaded();
        assert!(session.submit_text("boom").is_err());
        assert!(!session.is_model_lost());
    }

    #[test]
    fn reset_returns_to_idle_and_keeps_model() {
        let mut session = loaded();
        session.submit_text("a b").unwrap();
        session.reset();

        assert_eq!(session.state(), &SessionState::Idle);
        assert!(session.document().is_none());
        assert!(session.is_model_ready());
        assert_eq!(session.invoke(OperationId::Tokenize), Err(SessionError::NoDocument));
    }

    #[test]
    fn invoke_by_name_rejects_unknown() {
        let mut session = loaded();
        session.submit_text("a").unwrap();

        assert!(session.invoke_by_name("tokens").is_ok());
        assert_eq!(
            session.invoke_by_name("juggle"),
            Err(SessionError::InvalidOperation { id: "juggle".into() })
        );
    }
}
