//! Generic runtime for application orchestration.
//!
//! The Runtime drives the application event loop, coordinating between:
//! - [`App`]: UI state machine
//! - [`Driver`]: Platform-specific I/O

use crate::{App, AppAction, Driver};

/// Generic runtime that orchestrates App and Driver.
///
/// # Type Parameters
///
/// - `D`: Platform-specific I/O driver
pub struct Runtime<D>
where
    D: Driver,
{
    driver: D,
    app: App,
}

impl<D> Runtime<D>
where
    D: Driver,
{
    /// Create a new runtime with the given driver and app.
    pub fn new(driver: D, app: App) -> Self {
        Self { driver, app }
    }

    /// Run the main event loop.
    ///
    /// Starts the model load, then:
    /// 1. Polls the driver, which feeds input to the App
    /// 2. Executes the returned actions
    /// 3. Stops the driver once the App asks to quit
    ///
    /// Returns the App so callers can inspect the final state.
    ///
    /// # Errors
    ///
    /// Returns an error if the driver encounters an I/O error. The driver is
    /// stopped in either case.
    pub async fn run(mut self) -> Result<App, D::Error> {
        let result = self.event_loop().await;
        self.driver.stop();
        result.map(|()| self.app)
    }

    async fn event_loop(&mut self) -> Result<(), D::Error> {
        self.driver.render(&self.app)?;
        let actions = self.app.start();
        if self.process_actions(actions)? {
            return Ok(());
        }

        loop {
            let actions = self.driver.poll_event(&mut self.app).await?;
            if self.process_actions(actions)? {
                tracing::debug!("quit requested");
                return Ok(());
            }
        }
    }

    /// Execute actions returned by the App.
    ///
    /// Returns `true` if should quit.
    fn process_actions(&mut self, actions: Vec<AppAction>) -> Result<bool, D::Error> {
        let mut rendered = false;
        for action in actions {
            match action {
                AppAction::Render if !rendered => {
                    self.driver.render(&self.app)?;
                    rendered = true;
                },
                AppAction::Render => {},
                AppAction::Quit => return Ok(true),
            }
        }
        Ok(false)
    }

    /// Get a reference to the App
    pub fn app(&self) -> &App {
        &self.app
    }

    /// Get a mutable reference to the App
    pub fn app_mut(&mut self) -> &mut App {
        &mut self.app
    }
}
