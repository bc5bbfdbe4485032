//! Deterministic simulation harness for textlab testing.
//!
//! A rule-based stand-in for the language engine plus a scripted driver, so
//! the session, the App and the runtime can be exercised without Python or a
//! terminal.
//!
//! # Simulated engine
//!
//! [`SimGateway`] loads a [`SimModel`] whose analysis is a small, fully
//! deterministic rule set: punctuation-splitting tokenizer, stop-word list,
//! suffix lemmatizer, heuristic tagger and parser, and a gazetteer for named
//! entities. Failures can be injected at load and process time, and a
//! [`LoadGate`] holds a load open until the test releases it.
//!
//! # Invariant Testing
//!
//! The `invariants` module provides behavioral testing through invariant
//! checks. Invariants verify WHAT must be true across all execution paths, not
//! specific scenarios. Use [`InvariantRegistry::standard()`] for the common
//! session invariants.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod invariants;
pub mod sim_driver;
pub mod sim_gateway;
pub mod sim_model;

pub use invariants::{
    DocumentPresentIffReady, EntityReportShape, Invariant, InvariantKind, InvariantRegistry,
    InvariantResult, ModeMatchesState, ModelPresentWhenUsable, SessionSnapshot,
    StopwordAccounting, TokenizeMatchesDocument, Violation,
};
pub use sim_driver::{RenderLog, RenderedView, SimDriver, SimDriverError, SimStep};
pub use sim_gateway::{LoadGate, SimGateway};
pub use sim_model::{SIM_MODEL_NAME, SimModel, analyze};
