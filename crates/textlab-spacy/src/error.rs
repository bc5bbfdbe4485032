//! Worker error types.

use std::io;

use textlab_core::{LoadError, ProcessError};
use thiserror::Error;

/// Errors from the spaCy worker.
#[derive(Error, Debug)]
pub enum SpacyError {
    /// The interpreter could not be started
    #[error("failed to start {python}: {source}")]
    Spawn {
        /// Interpreter that was run
        python: String,
        /// OS error
        #[source]
        source: io::Error,
    },

    /// Reading from or writing to the worker failed
    #[error("worker I/O failed: {0}")]
    Io(#[from] io::Error),

    /// The worker closed its output
    #[error("worker exited")]
    Closed,

    /// The worker sent something that is not a valid message
    #[error("invalid worker message: {reason}")]
    Protocol {
        /// What was wrong
        reason: String,
    },

    /// spaCy or the model failed to load
    #[error("{reason}")]
    Model {
        /// Message from the worker
        reason: String,
    },

    /// spaCy failed on a request
    #[error("{reason}")]
    Engine {
        /// Message from the worker
        reason: String,
    },
}

impl SpacyError {
    /// Classify a failure during model acquisition.
    pub fn into_load_error(self, model: &str) -> LoadError {
        match self {
            Self::Model { reason } => LoadError::Model { model: model.to_owned(), reason },
            other => LoadError::Unavailable { reason: other.to_string() },
        }
    }
}

impl From<SpacyError> for ProcessError {
    fn from(err: SpacyError) -> Self {
        match err {
            SpacyError::Engine { reason } | SpacyError::Model { reason } => Self::Rejected { reason },
            SpacyError::Protocol { reason } => Self::Malformed { reason },
            other @ (SpacyError::Spawn { .. } | SpacyError::Io(_) | SpacyError::Closed) => {
                Self::Disconnected { reason: other.to_string() }
            },
        }
    }
}
