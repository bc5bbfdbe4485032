//! textlab entry point.
//!
//! # Usage
//!
//! ```bash
//! # Full-screen interface over spaCy's small English pipeline
//! textlab
//!
//! # Line-oriented interface, analyzing a sentence right away
//! textlab --plain --text "Apple is looking at buying U.K. startup for $1 billion"
//!
//! # No Python needed: built-in rule engine
//! textlab --sim
//! ```

use std::path::PathBuf;

use clap::Parser;
use textlab_app::{App, Runtime};
use textlab_spacy::{DEFAULT_MODEL, DEFAULT_PYTHON};
use textlab_tui::{InputState, PlainDriver, RuntimeConfig, TerminalDriver, logging};

/// textlab natural language processing console
#[derive(Parser, Debug)]
#[command(name = "textlab")]
#[command(about = "Interactive natural language processing over spaCy")]
#[command(version)]
struct Args {
    /// Use the line-oriented interface instead of the full-screen one
    #[arg(long)]
    plain: bool,

    /// spaCy pipeline to load
    #[arg(short, long, env = "TEXTLAB_MODEL", default_value = DEFAULT_MODEL)]
    model: String,

    /// Python interpreter with spaCy installed
    #[arg(long, env = "TEXTLAB_PYTHON", default_value = DEFAULT_PYTHON)]
    python: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Write logs to this file (the only log output in full-screen mode)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Text to analyze first
    #[arg(short, long)]
    text: Option<String>,

    /// Use the built-in rule engine instead of spaCy
    #[arg(long)]
    sim: bool,
}

impl From<Args> for RuntimeConfig {
    fn from(args: Args) -> Self {
        Self {
            plain: args.plain,
            model: args.model,
            python: args.python,
            log_level: args.log_level,
            log_file: args.log_file,
            text: args.text,
            sim: args.sim,
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = RuntimeConfig::from(Args::parse());
    logging::init(&config)?;

    tracing::info!(model = %config.model, sim = config.sim, plain = config.plain, "textlab starting");

    let app = App::with_gateway(config.gateway());

    let app = if config.plain {
        Runtime::new(PlainDriver::new(config.text), app).run().await?
    } else {
        let input = config.text.map_or_else(InputState::new, InputState::with_text);
        Runtime::new(TerminalDriver::new(input)?, app).run().await?
    };

    tracing::info!(state = ?app.session().state(), "textlab exiting");
    Ok(())
}
