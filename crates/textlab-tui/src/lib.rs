//! Terminal front ends for textlab
//!
//! Thin shells over [`textlab_app::Driver`] that provide terminal-specific
//! I/O. All orchestration logic lives in the generic [`textlab_app::Runtime`].
//!
//! Two drivers ship here:
//!
//! - [`TerminalDriver`]: full-screen ratatui interface
//! - [`PlainDriver`]: line-oriented stdin/stdout interface
//!
//! This crate only handles rendering, key editing and process setup.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod config;
pub mod input;
pub mod logging;
pub mod plain;
pub mod terminal;
pub mod ui;

pub use config::RuntimeConfig;
pub use input::InputState;
pub use plain::{PlainDriver, PlainRenderer};
pub use terminal::{TerminalDriver, TerminalError};
pub use textlab_app::{App, AppAction, AppEvent, Driver, KeyInput, Runtime};
