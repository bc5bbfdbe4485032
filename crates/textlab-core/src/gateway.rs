//! Model gateway contract.
//!
//! The gateway is the only path to the language-processing engine. Loading a
//! model is slow and happens off the interactive path; processing is bounded
//! and callers wait for it.

use std::sync::Arc;

use crate::{Document, LoadError, ProcessError};

/// A loaded model, ready to process text.
///
/// Handles are shared between the loader thread and the session, so
/// implementations must be thread-safe and serialize access to any
/// underlying engine connection themselves.
pub trait ModelHandle: Send + Sync {
    /// Model name, for status display and logging.
    fn name(&self) -> &str;

    /// Process `text` into a [`Document`].
    ///
    /// # Errors
    ///
    /// Returns [`ProcessError`] if the engine fails or replies with an
    /// invalid document.
    fn process(&self, text: &str) -> Result<Document, ProcessError>;
}

/// Source of model handles.
///
/// # Implementations
///
/// - **spaCy**: drives a Python worker process (`textlab-spacy`)
/// - **Simulation**: deterministic rule-based stand-in (`textlab-harness`)
pub trait ModelGateway: Send + Sync {
    /// Acquire a model. Blocking and potentially slow; may be retried after a
    /// failure.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError`] if the engine or the model is unavailable.
    fn load(&self) -> Result<Arc<dyn ModelHandle>, LoadError>;
}
