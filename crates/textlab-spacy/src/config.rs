//! Worker launch configuration.

/// Pipeline loaded when none is configured.
pub const DEFAULT_MODEL: &str = "en_core_web_sm";

/// Interpreter used when none is configured.
pub const DEFAULT_PYTHON: &str = "python3";

/// How to start the spaCy worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpacyConfig {
    /// Python interpreter with spaCy installed.
    pub python: String,
    /// spaCy pipeline name or path.
    pub model: String,
}

impl Default for SpacyConfig {
    fn default() -> Self {
        Self { python: DEFAULT_PYTHON.to_owned(), model: DEFAULT_MODEL.to_owned() }
    }
}

impl SpacyConfig {
    /// Use `python` as the interpreter.
    #[must_use]
    pub fn with_python(mut self, python: impl Into<String>) -> Self {
        self.python = python.into();
        self
    }

    /// Load `model` instead of the default pipeline.
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }
}
