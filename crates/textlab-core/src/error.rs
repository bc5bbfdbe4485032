//! Error types for the document model and the gateway contract.
//!
//! Gateway failures are split by phase: [`LoadError`] while acquiring a model
//! and [`ProcessError`] while turning text into a document. Both are plain
//! values so the session layer can report them without unwinding.

use thiserror::Error;

/// Structural problems in a document produced by a gateway.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DocumentError {
    /// Token head points outside the token sequence
    #[error("token {index} has head {head}, but the document has {len} tokens")]
    HeadOutOfRange {
        /// Offending token index
        index: usize,
        /// Head index it points at
        head: usize,
        /// Number of tokens
        len: usize,
    },

    /// Sentence span is inverted or past the last token
    #[error("sentence {index} spans {start}..{end}, but the document has {len} tokens")]
    SentenceSpan {
        /// Offending sentence index
        index: usize,
        /// Span start
        start: usize,
        /// Span end (exclusive)
        end: usize,
        /// Number of tokens
        len: usize,
    },

    /// Entity span is empty, inverted or past the last token
    #[error("entity {index} spans {start}..{end}, but the document has {len} tokens")]
    EntitySpan {
        /// Offending entity index
        index: usize,
        /// Span start
        start: usize,
        /// Span end (exclusive)
        end: usize,
        /// Number of tokens
        len: usize,
    },
}

/// Failure to acquire a model.
///
/// Loading is expected to be retryable: a later [`crate::ModelGateway::load`]
/// call may succeed where this one failed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    /// The engine could not be started at all
    #[error("engine unavailable: {reason}")]
    Unavailable {
        /// Description from the engine or the OS
        reason: String,
    },

    /// The engine started but the requested model could not be loaded
    #[error("model '{model}' could not be loaded: {reason}")]
    Model {
        /// Requested model name
        model: String,
        /// Description from the engine
        reason: String,
    },
}

/// Failure to process text with a loaded model.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProcessError {
    /// The engine rejected the text
    #[error("engine rejected the text: {reason}")]
    Rejected {
        /// Description from the engine
        reason: String,
    },

    /// The connection to the engine was lost
    #[error("engine disconnected: {reason}")]
    Disconnected {
        /// What was observed
        reason: String,
    },

    /// The engine replied with something that is not a document
    #[error("malformed engine reply: {reason}")]
    Malformed {
        /// Decoder message
        reason: String,
    },

    /// The engine replied with a structurally invalid document
    #[error("invalid document: {0}")]
    InvalidDocument(#[from] DocumentError),
}
