//! Invariant checking for session and App state.
//!
//! Invariants are properties that must always hold during execution. Unlike
//! example-based tests that check specific scenarios, invariants verify
//! behavioral properties across all possible event sequences.
//!
//! # Architecture
//!
//! The invariant system extracts observable state from a [`textlab_app::Session`]
//! or [`textlab_app::App`] into a [`SessionSnapshot`], then runs registered
//! [`Invariant`] checks against it.
//!
//! # Usage
//!
//! ```ignore
//! let registry = InvariantRegistry::standard();
//! let snapshot = SessionSnapshot::from_app(&app);
//! registry.check_all(&snapshot)?;
//! ```

mod checks;
mod snapshot;

pub use checks::{
    DocumentPresentIffReady, EntityReportShape, ModeMatchesState, ModelPresentWhenUsable,
    StopwordAccounting, TokenizeMatchesDocument,
};
pub use snapshot::SessionSnapshot;

/// Invariant check result.
pub type InvariantResult = Result<(), Violation>;

/// Identifies an invariant in violation reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvariantKind {
    /// See [`DocumentPresentIffReady`].
    DocumentPresentIffReady,
    /// See [`ModelPresentWhenUsable`].
    ModelPresentWhenUsable,
    /// See [`TokenizeMatchesDocument`].
    TokenizeMatchesDocument,
    /// See [`StopwordAccounting`].
    StopwordAccounting,
    /// See [`EntityReportShape`].
    EntityReportShape,
    /// See [`ModeMatchesState`].
    ModeMatchesState,
}

impl InvariantKind {
    /// Stable name for reporting.
    pub fn name(self) -> &'static str {
        match self {
            Self::DocumentPresentIffReady => "document_present_iff_ready",
            Self::ModelPresentWhenUsable => "model_present_when_usable",
            Self::TokenizeMatchesDocument => "tokenize_matches_document",
            Self::StopwordAccounting => "stopword_accounting",
            Self::EntityReportShape => "entity_report_shape",
            Self::ModeMatchesState => "mode_matches_state",
        }
    }
}

impl std::fmt::Display for InvariantKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Invariant violation with context.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{invariant}: {message}")]
pub struct Violation {
    /// The violated invariant.
    pub invariant: InvariantKind,
    /// Description of what went wrong.
    pub message: String,
}

/// An invariant that can be checked against session state.
///
/// Invariants are behavioral properties that must always hold.
/// They capture WHAT must be true, not specific test scenarios.
pub trait Invariant: Send + Sync {
    /// Invariant identifier for error reporting.
    fn kind(&self) -> InvariantKind;

    /// Check the invariant against a snapshot.
    ///
    /// Returns `Ok(())` if the invariant holds, or a [`Violation`]
    /// describing what went wrong.
    fn check(&self, state: &SessionSnapshot) -> InvariantResult;
}

/// Registry of invariants to check.
///
/// Collects multiple invariants and runs them all against a snapshot.
/// Use [`InvariantRegistry::standard()`] for the common session invariants.
pub struct InvariantRegistry {
    invariants: Vec<Box<dyn Invariant>>,
}

impl Default for InvariantRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for InvariantRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.invariants.iter().map(|inv| inv.kind())).finish()
    }
}

impl InvariantRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self { invariants: Vec::new() }
    }

    /// Create a registry with the standard session invariants.
    ///
    /// Includes:
    /// - [`DocumentPresentIffReady`]: document and text exist only when Ready
    /// - [`ModelPresentWhenUsable`]: a model is installed iff Idle or Ready
    /// - [`TokenizeMatchesDocument`]: Tokenize rows are 1..N over the tokens
    /// - [`StopwordAccounting`]: kept + removed == total
    /// - [`EntityReportShape`]: Text iff no entities, else one row each
    /// - [`ModeMatchesState`]: the menu is active iff a document is current
    pub fn standard() -> Self {
        let mut registry = Self::new();
        registry.add(DocumentPresentIffReady);
        registry.add(ModelPresentWhenUsable);
        registry.add(TokenizeMatchesDocument);
        registry.add(StopwordAccounting);
        registry.add(EntityReportShape);
        registry.add(ModeMatchesState);
        registry
    }

    /// Add an invariant to the registry.
    pub fn add<I: Invariant + 'static>(&mut self, invariant: I) {
        self.invariants.push(Box::new(invariant));
    }

    /// Check all invariants against the given state.
    ///
    /// Returns `Ok(())` if all invariants hold, or all violations found.
    pub fn check_all(&self, state: &SessionSnapshot) -> Result<(), Vec<Violation>> {
        let violations: Vec<_> =
            self.invariants.iter().filter_map(|inv| inv.check(state).err()).collect();

        if violations.is_empty() { Ok(()) } else { Err(violations) }
    }

    /// Check all invariants, panicking on first violation.
    ///
    /// Use this in tests where you want immediate failure with context.
    #[allow(clippy::panic, reason = "test assertion helper")]
    pub fn assert_all(&self, state: &SessionSnapshot, context: &str) {
        if let Err(violations) = self.check_all(state) {
            let messages: Vec<_> = violations.iter().map(ToString::to_string).collect();
            panic!("Invariant violation {context}:\n  {}", messages.join("\n  "));
        }
    }

    /// Number of registered invariants.
    pub fn len(&self) -> usize {
        self.invariants.len()
    }

    /// Check if registry is empty.
    pub fn is_empty(&self) -> bool {
        self.invariants.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_registry_has_invariants() {
        let registry = InvariantRegistry::standard();
        assert_eq!(registry.len(), 6);
    }

    #[test]
    fn loading_snapshot_passes_invariants() {
        let registry = InvariantRegistry::standard();
        let snapshot = SessionSnapshot::loading();
        assert!(registry.check_all(&snapshot).is_ok());
    }
}
