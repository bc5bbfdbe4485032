//! Runtime configuration.

use std::{path::PathBuf, sync::Arc};

use textlab_core::ModelGateway;
use textlab_harness::SimGateway;
use textlab_spacy::{DEFAULT_MODEL, DEFAULT_PYTHON, SpacyConfig, SpacyGateway};

/// Configuration for one run of the binary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// Use the line-oriented front end instead of the full-screen one.
    pub plain: bool,
    /// spaCy pipeline to load (e.g. "en_core_web_sm")
    pub model: String,
    /// Python interpreter that runs the worker
    pub python: String,
    /// Default log filter when `RUST_LOG` is unset
    pub log_level: String,
    /// Log destination. Required for logs in full-screen mode.
    pub log_file: Option<PathBuf>,
    /// Text to analyze first
    pub text: Option<String>,
    /// Use the built-in rule engine instead of spaCy
    pub sim: bool,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            plain: false,
            model: DEFAULT_MODEL.to_string(),
            python: DEFAULT_PYTHON.to_string(),
            log_level: "info".to_string(),
            log_file: None,
            text: None,
            sim: false,
        }
    }
}

impl RuntimeConfig {
    /// Gateway selected by this configuration.
    pub fn gateway(&self) -> Arc<dyn ModelGateway> {
        if self.sim {
            return Arc::new(SimGateway::new());
        }
        let spacy = SpacyConfig::default()
            .with_python(self.python.clone())
            .with_model(self.model.clone());
        Arc::new(SpacyGateway::new(spacy))
    }
}
