//! Core types for textlab
//!
//! Defines the processed [`Document`] value and the [`ModelGateway`] contract
//! through which an external language-processing engine is reached. Nothing in
//! this crate tokenizes, tags or parses text: those capabilities belong to the
//! engine behind the gateway.
//!
//! # Components
//!
//! - [`Document`]: immutable result of processing one piece of text
//! - [`ModelGateway`]: loads an engine model (slow, retryable)
//! - [`ModelHandle`]: a loaded model that turns text into a [`Document`]

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod document;
mod error;
mod gateway;

pub use document::{Document, Entity, Sentence, Token};
pub use error::{DocumentError, LoadError, ProcessError};
pub use gateway::{ModelGateway, ModelHandle};
