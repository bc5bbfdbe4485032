//! Simulation driver implementing the Driver trait.
//!
//! `SimDriver` provides the same interface as the terminal and line drivers
//! but replays a scripted list of steps. It implements [`Driver`] so the same
//! [`textlab_app::Runtime`] orchestration code runs in both production and
//! simulation.

use std::{
    collections::VecDeque,
    sync::{
        Arc, Mutex, PoisonError,
        atomic::{AtomicBool, Ordering},
    },
};

use textlab_app::{
    App, AppAction, AppEvent, Driver, Mode, SessionState, ShownReport, StatusMessage,
};

use crate::invariants::{InvariantRegistry, SessionSnapshot, Violation};

/// Error type for simulation driver.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SimDriverError {
    /// An invariant failed after a step
    #[error("after step {step}: {violations:?}")]
    InvariantViolated {
        /// Zero-based step index
        step: usize,
        /// Everything that failed
        violations: Vec<Violation>,
    },
}

/// One scripted step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimStep {
    /// Feed an event to the App.
    Event(AppEvent),
    /// Block until the in-flight model load completes.
    WaitForModel,
}

/// What the App looked like at one render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedView {
    /// App revision at render time.
    pub revision: u64,
    /// Input mode.
    pub mode: Mode,
    /// Session state.
    pub state: SessionState,
    /// Status line.
    pub status: Option<StatusMessage>,
    /// Report on screen.
    pub report: Option<ShownReport>,
}

impl RenderedView {
    fn capture(app: &App) -> Self {
        Self {
            revision: app.revision(),
            mode: app.mode(),
            state: app.session().state().clone(),
            status: app.status().cloned(),
            report: app.report().cloned(),
        }
    }
}

/// Renders recorded by a [`SimDriver`].
///
/// Clones share the log, so a test can keep one while the runtime owns the
/// driver.
#[derive(Debug, Clone, Default)]
pub struct RenderLog {
    views: Arc<Mutex<Vec<RenderedView>>>,
    stopped: Arc<AtomicBool>,
}

impl RenderLog {
    /// All renders so far.
    pub fn views(&self) -> Vec<RenderedView> {
        self.views.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Most recent render.
    pub fn last(&self) -> Option<RenderedView> {
        self.views.lock().unwrap_or_else(PoisonError::into_inner).last().cloned()
    }

    /// Number of renders.
    pub fn len(&self) -> usize {
        self.views.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Nothing rendered yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The driver was stopped.
    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::SeqCst)
    }

    fn push(&self, view: RenderedView) {
        self.views.lock().unwrap_or_else(PoisonError::into_inner).push(view);
    }
}

/// Simulation driver for deterministic testing.
///
/// Implements [`Driver`] so the same [`textlab_app::Runtime`] orchestration
/// code runs in both production front ends and simulation tests. Once the
/// script is drained the driver asks the App to quit.
#[derive(Debug, Default)]
pub struct SimDriver {
    script: VecDeque<SimStep>,
    steps: usize,
    log: RenderLog,
    invariants: Option<InvariantRegistry>,
}

impl SimDriver {
    /// Create a driver with an empty script.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable invariant checking after every step.
    #[must_use]
    pub fn with_invariants(mut self, registry: InvariantRegistry) -> Self {
        self.invariants = Some(registry);
        self
    }

    /// Queue an event.
    pub fn inject_event(&mut self, event: AppEvent) {
        self.script.push_back(SimStep::Event(event));
    }

    /// Queue a completed input line.
    pub fn inject_line(&mut self, line: impl Into<String>) {
        self.inject_event(AppEvent::Line(line.into()));
    }

    /// Queue a wait for the in-flight model load.
    pub fn inject_wait_for_model(&mut self) {
        self.script.push_back(SimStep::WaitForModel);
    }

    /// Steps not yet replayed.
    pub fn has_pending(&self) -> bool {
        !self.script.is_empty()
    }

    /// Shared handle to the render log.
    pub fn log(&self) -> RenderLog {
        self.log.clone()
    }

    fn check_invariants(&self, app: &App, step: usize) -> Result<(), SimDriverError> {
        let Some(registry) = &self.invariants else {
            return Ok(());
        };
        registry
            .check_all(&SessionSnapshot::from_app(app))
            .map_err(|violations| SimDriverError::InvariantViolated { step, violations })
    }
}

impl Driver for SimDriver {
    type Error = SimDriverError;

    async fn poll_event(&mut self, app: &mut App) -> Result<Vec<AppAction>, Self::Error> {
        let Some(step) = self.script.pop_front() else {
            return Ok(vec![AppAction::Quit]);
        };

        let actions = match step {
            SimStep::Event(event) => app.handle(event),
            SimStep::WaitForModel => app.wait_for_model().await,
        };

        let index = self.steps;
        self.steps += 1;
        self.check_invariants(app, index)?;
        Ok(actions)
    }

    fn render(&mut self, app: &App) -> Result<(), Self::Error> {
        self.log.push(RenderedView::capture(app));
        Ok(())
    }

    fn stop(&mut self) {
        self.log.stopped.store(true, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::SimGateway;

    #[test]
    fn inject_event_queues_step() {
        let mut driver = SimDriver::new();
        driver.inject_event(AppEvent::Tick);

        assert!(driver.has_pending());
    }

    #[tokio::test]
    async fn drained_script_quits() {
        let mut driver = SimDriver::new();
        let mut app = App::with_gateway(Arc::new(SimGateway::new()));

        let actions = driver.poll_event(&mut app).await.unwrap();
        assert_eq!(actions, [AppAction::Quit]);
    }

    #[test]
    fn render_records_view() {
        let mut driver = SimDriver::new();
        let log = driver.log();
        let mut app = App::with_gateway(Arc::new(SimGateway::new()));
        app.set_status("hello");

        driver.render(&app).unwrap();
        let view = log.last().unwrap();
        assert_eq!(view.status.map(|s| s.text), Some("hello".to_owned()));
        assert_eq!(view.state, SessionState::ModelLoading);
    }
}
