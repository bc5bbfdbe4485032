//! Session error signals.
//!
//! Every session transition returns an explicit outcome. These are the
//! failure values; none of them leave the session in a partial state.

use thiserror::Error;

/// Failure outcome of a session transition.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// Submitted text was empty or whitespace. No state change.
    #[error("please enter some text to analyze")]
    EmptyInput,

    /// Model is still loading or failed to load.
    #[error("model is not ready yet")]
    ModelNotReady,

    /// No text has been processed yet, so there is nothing to analyze.
    #[error("no text has been processed yet")]
    NoDocument,

    /// The gateway failed while processing text. Any previous document is
    /// kept.
    #[error("processing failed: {reason}")]
    ProcessingFailed {
        /// Gateway error description
        reason: String,
    },

    /// Operation identifier is not in the registry.
    #[error("invalid operation: {id}")]
    InvalidOperation {
        /// The identifier as given
        id: String,
    },

    /// Model failed to initialize. Terminal until an explicit reload.
    #[error("model failed to load: {reason}")]
    ModelLoadFailed {
        /// Gateway error description
        reason: String,
    },
}

impl SessionError {
    /// The user can carry on without reloading the model.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, Self::ModelLoadFailed { .. })
    }
}

/// Operation name did not match any known operation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown operation: {0}")]
pub struct UnknownOperation(pub String);

impl From<UnknownOperation> for SessionError {
    fn from(err: UnknownOperation) -> Self {
        Self::InvalidOperation { id: err.0 }
    }
}
