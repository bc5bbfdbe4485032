//! Simulated model gateway with failure injection.
//!
//! [`SimGateway`] hands out [`SimModel`] handles. Tests configure it to fail
//! the first N loads, to reject texts containing a marker, to hand out a
//! first model whose engine connection drops, or to block inside `load`
//! until a [`LoadGate`] is opened. The gate makes the "still loading" window
//! observable without sleeping.

use std::sync::{
    Arc, Condvar, Mutex, PoisonError,
    atomic::{AtomicUsize, Ordering},
};

use textlab_core::{LoadError, ModelGateway, ModelHandle};

use crate::sim_model::{SIM_MODEL_NAME, SimModel};

/// Latch that holds simulated loads until opened.
///
/// Clones share the latch.
#[derive(Debug, Clone, Default)]
pub struct LoadGate {
    inner: Arc<(Mutex<bool>, Condvar)>,
}

impl LoadGate {
    /// Closed gate.
    pub fn new() -> Self {
        Self::default()
    }

    /// Release every waiting and future load.
    pub fn open(&self) {
        let (lock, cvar) = &*self.inner;
        *lock.lock().unwrap_or_else(PoisonError::into_inner) = true;
        cvar.notify_all();
    }

    /// The gate has been opened.
    pub fn is_open(&self) -> bool {
        *self.inner.0.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Block until the gate is opened.
    pub fn wait(&self) {
        let (lock, cvar) = &*self.inner;
        let mut open = lock.lock().unwrap_or_else(PoisonError::into_inner);
        while !*open {
            open = cvar.wait(open).unwrap_or_else(PoisonError::into_inner);
        }
    }
}

/// Deterministic gateway for tests.
#[derive(Debug, Default)]
pub struct SimGateway {
    failing_loads: AtomicUsize,
    fail_on: Option<String>,
    gate: Option<LoadGate>,
    disconnect_after: Option<usize>,
    loads: AtomicUsize,
    handed_out: AtomicUsize,
}

impl SimGateway {
    /// Gateway whose loads succeed immediately.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail the next `count` loads.
    #[must_use]
    pub fn failing_loads(self, count: usize) -> Self {
        self.failing_loads.store(count, Ordering::SeqCst);
        self
    }

    /// Loaded models reject any text containing `needle`.
    #[must_use]
    pub fn failing_on(mut self, needle: impl Into<String>) -> Self {
        self.fail_on = Some(needle.into());
        self
    }

    /// The first model handed out drops its engine connection after
    /// processing `calls` texts. Later loads return healthy models.
    #[must_use]
    pub fn disconnecting_after(mut self, calls: usize) -> Self {
        self.disconnect_after = Some(calls);
        self
    }

    /// Block every load until `gate` is opened.
    #[must_use]
    pub fn gated(mut self, gate: LoadGate) -> Self {
        self.gate = Some(gate);
        self
    }

    /// Number of `load` calls so far, including failed ones.
    pub fn load_count(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }
}

impl ModelGateway for SimGateway {
    fn load(&self) -> Result<Arc<dyn ModelHandle>, LoadError> {
        let attempt = self.loads.fetch_add(1, Ordering::SeqCst) + 1;
        tracing::debug!(attempt, "sim model load");

        if let Some(gate) = &self.gate {
            gate.wait();
        }

        let fail = self
            .failing_loads
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if fail {
            return Err(LoadError::Model {
                model: SIM_MODEL_NAME.to_owned(),
                reason: format!("injected failure on attempt {attempt}"),
            });
        }

        let mut model = match &self.fail_on {
            Some(needle) => SimModel::failing_on(needle.clone()),
            None => SimModel::new(),
        };
        let first = self.handed_out.fetch_add(1, Ordering::SeqCst) == 0;
        if let Some(calls) = self.disconnect_after
            && first
        {
            model = model.disconnecting_after(calls);
        }
        Ok(Arc::new(model))
    }
}
