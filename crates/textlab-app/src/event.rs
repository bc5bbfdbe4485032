//! Application input events.
//!
//! This module defines [`AppEvent`], the set of inputs that drive the
//! [`crate::App`] state machine. Events come from the front end (completed
//! input lines, resize, clear/quit requests) and from the periodic tick that
//! observes background model loading.

/// Events processed by the App state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// Periodic tick.
    Tick,

    /// Terminal resize (columns, rows).
    Resize(u16, u16),

    /// A completed line of user input.
    Line(String),

    /// Clear the shown report.
    Clear,

    /// Quit requested by the front end (e.g. end of input).
    Quit,
}
