//! Driver trait for abstracting I/O operations.
//!
//! The [`Driver`] trait decouples the application runtime from specific I/O
//! implementations. Each frontend implements the trait to provide
//! platform-specific I/O, while the generic [`crate::Runtime`] handles all
//! orchestration.

use std::future::Future;

use crate::{App, AppAction};

/// Abstracts I/O operations for the application runtime.
///
/// Implementations provide platform-specific I/O while the generic
/// [`Runtime`](crate::Runtime) handles orchestration logic. This ensures
/// the same orchestration code runs in the terminal UI, the line-oriented
/// front end and simulation.
///
/// # Implementations
///
/// - **TUI**: Uses crossterm for terminal events, ratatui for drawing
/// - **Plain**: Reads lines from stdin, prints pipe tables
/// - **Simulation**: Replays a scripted list of events
pub trait Driver: Send {
    /// Platform-specific error type.
    type Error: std::error::Error + Send + 'static;

    /// Wait for the next input and feed it to `app`.
    ///
    /// Returns the actions the app produced. An empty vector means nothing
    /// visible happened (for example a tick while the model is loading).
    ///
    /// # Errors
    ///
    /// Returns an error if reading input fails.
    fn poll_event(
        &mut self,
        app: &mut App,
    ) -> impl Future<Output = Result<Vec<AppAction>, Self::Error>> + Send;

    /// Render the application state.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering fails.
    fn render(&mut self, app: &App) -> Result<(), Self::Error>;

    /// Restore the platform and release resources.
    fn stop(&mut self);
}
