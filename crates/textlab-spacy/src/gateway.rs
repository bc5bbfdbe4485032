//! [`ModelGateway`] backed by the Python worker.

use std::sync::{Arc, Mutex};

use textlab_core::{Document, LoadError, ModelGateway, ModelHandle, ProcessError};

use crate::{SpacyConfig, worker::Worker};

/// Starts one spaCy worker per load.
#[derive(Debug, Clone, Default)]
pub struct SpacyGateway {
    config: SpacyConfig,
}

impl SpacyGateway {
    /// Gateway with the given launch configuration.
    pub fn new(config: SpacyConfig) -> Self {
        Self { config }
    }

    /// Launch configuration.
    pub fn config(&self) -> &SpacyConfig {
        &self.config
    }
}

impl ModelGateway for SpacyGateway {
    fn load(&self) -> Result<Arc<dyn ModelHandle>, LoadError> {
        tracing::info!(model = %self.config.model, "loading spaCy model");
        let (worker, name) =
            Worker::spawn(&self.config).map_err(|e| e.into_load_error(&self.config.model))?;
        Ok(Arc::new(SpacyModel { name, worker: Mutex::new(worker) }))
    }
}

/// Loaded spaCy pipeline. Requests are serialized over the worker pipe.
pub struct SpacyModel {
    name: String,
    worker: Mutex<Worker>,
}

impl std::fmt::Debug for SpacyModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpacyModel").field("name", &self.name).finish_non_exhaustive()
    }
}

impl ModelHandle for SpacyModel {
    fn name(&self) -> &str {
        &self.name
    }

    fn process(&self, text: &str) -> Result<Document, ProcessError> {
        let mut worker = self
            .worker
            .lock()
            .map_err(|_| ProcessError::Disconnected { reason: "worker lock poisoned".to_owned() })?;
        let started = std::time::Instant::now();
        let document = worker.request(text)?;
        tracing::debug!(
            tokens = document.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "spaCy request done"
        );
        Ok(document)
    }
}
