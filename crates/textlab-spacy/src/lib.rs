//! spaCy model gateway for textlab
//!
//! Implements [`textlab_core::ModelGateway`] by running a small Python worker
//! that owns a spaCy pipeline. The worker speaks newline-delimited JSON over
//! its stdin/stdout:
//!
//! ```text
//! worker -> {"status": "ready", "model": "en_core_web_sm"}      (or "error")
//! client -> {"text": "..."}
//! worker -> {"text": ..., "tokens": [...], "sentences": [...], "entities": [...]}
//!           | {"error": "..."}
//! ```
//!
//! Loading spawns the worker and waits for the handshake, which is where the
//! slow `spacy.load` happens. Each processed text is one request/reply pair.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod config;
mod error;
mod gateway;
pub mod protocol;
mod worker;

pub use config::{DEFAULT_MODEL, DEFAULT_PYTHON, SpacyConfig};
pub use error::SpacyError;
pub use gateway::{SpacyGateway, SpacyModel};
