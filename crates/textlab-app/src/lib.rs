//! Application layer for textlab
//!
//! The interaction controller every front end shares: a session state machine
//! that loads a model in the background, accepts text, and dispatches named
//! analyses against the current document, plus a renderer-neutral UI state
//! machine and a generic runtime loop over a platform [`Driver`].
//!
//! # Components
//!
//! - [`Session`]: model loading, text submission, operation dispatch
//! - [`OperationRegistry`]: fixed table of the eight analyses
//! - [`Report`]: renderer-neutral operation output
//! - [`App`]: UI state machine (input mode, status line, shown report)
//! - [`Driver`]: Trait for platform-specific I/O abstraction
//! - [`Runtime`]: Generic orchestration loop using Driver

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod action;
mod app;
mod driver;
mod error;
mod event;
mod input;
mod menu;
mod operation;
mod operations;
mod registry;
mod report;
mod runtime;
mod session;
mod state;

pub use action::AppAction;
pub use app::App;
pub use driver::Driver;
pub use error::{SessionError, UnknownOperation};
pub use event::AppEvent;
pub use input::KeyInput;
pub use menu::{MenuChoice, MenuEntry};
pub use operation::OperationId;
pub use registry::{Operation, OperationFn, OperationRegistry};
pub use report::{Report, Table};
pub use runtime::Runtime;
pub use session::{Session, SharedSession};
pub use state::{Mode, SessionState, ShownReport, StatusLevel, StatusMessage};
