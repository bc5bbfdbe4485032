//! Observable application state types.
//!
//! This module defines the data structures that represent the application's
//! current view of the world, such as [`SessionState`] and [`Mode`].
//!
//! These structures serve as the "View Model" for the application: renderers
//! read them to decide what to draw, and never reach into the session's
//! document directly.

use crate::{OperationId, Report};

/// Lifecycle of a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    /// Model acquisition has not finished.
    ModelLoading,
    /// Model acquisition failed. Only a reload or exit is possible.
    ModelFailed {
        /// Gateway error description.
        reason: String,
    },
    /// Model loaded, no document yet.
    Idle,
    /// A document and its raw text are current.
    Ready,
}

impl SessionState {
    /// Text can be submitted in this state.
    pub fn accepts_text(&self) -> bool {
        matches!(self, Self::Idle | Self::Ready)
    }
}

/// What a completed input line means.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// The line is text to analyze.
    #[default]
    EnterText,
    /// The line is a menu choice.
    ChooseOperation,
}

/// Severity of a status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    /// Progress or hint.
    Info,
    /// Something completed.
    Success,
    /// Something failed.
    Error,
}

/// Transient status line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    /// Severity.
    pub level: StatusLevel,
    /// Message text.
    pub text: String,
}

impl StatusMessage {
    /// Build a status message.
    pub fn new(level: StatusLevel, text: impl Into<String>) -> Self {
        Self { level, text: text.into() }
    }
}

/// The report currently on screen and the operation that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShownReport {
    /// Producing operation.
    pub operation: OperationId,
    /// Operation output.
    pub report: Report,
}
