//! Line-oriented front end.
//!
//! [`PlainDriver`] reads lines from stdin and prints the menu, reports and
//! status lines to stdout, the way a classic console program does. Table
//! reports are printed in pipe format. [`PlainRenderer`] holds the output
//! half and writes to any [`Write`], which is what the tests use.

use std::io::{self, Stdout, Write};

use textlab_app::{
    App, AppAction, AppEvent, Driver, MenuEntry, Mode, Report, SessionState, Table,
};
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

use crate::{TerminalError, terminal::TICK_INTERVAL};

const RULE_WIDTH: usize = 100;
const WELCOME: &str = "Welcome to textlab, natural language processing on the command line.";

/// Format a table in pipe style.
///
/// Columns are left aligned and padded to their widest cell. There is no
/// trailing newline.
pub fn format_table(table: &Table) -> String {
    let widths: Vec<usize> = table
        .columns()
        .iter()
        .enumerate()
        .map(|(i, name)| {
            table
                .rows()
                .iter()
                .filter_map(|row| row.get(i))
                .map(|cell| cell.chars().count())
                .fold(name.chars().count(), usize::max)
        })
        .collect();

    let line = |cells: &[String]| {
        let padded: Vec<String> = cells
            .iter()
            .zip(&widths)
            .map(|(cell, &width)| format!(" {cell:<width$} "))
            .collect();
        format!("|{}|", padded.join("|"))
    };

    let separator: Vec<String> = widths.iter().map(|&w| "-".repeat(w + 2)).collect();

    let mut lines = Vec::with_capacity(table.len() + 2);
    lines.push(line(table.columns()));
    lines.push(format!("|{}|", separator.join("|")));
    lines.extend(table.rows().iter().map(|row| line(row)));
    lines.join("\n")
}

/// Format a report body.
pub fn format_report(report: &Report) -> String {
    match report {
        Report::Table(table) => format_table(table),
        Report::Text(body) => body.clone(),
    }
}

/// Format the operation menu.
pub fn format_menu() -> String {
    let entries: Vec<String> = MenuEntry::ALL
        .into_iter()
        .map(|entry| format!("{}. {}", entry.key(), entry.label()))
        .collect();
    format!("Choose the operation to run:\n\n{}", entries.join("\n"))
}

/// Writes the visible changes of an [`App`] since the previous render.
///
/// Status and report changes are tracked through the App's revision
/// counters, so each message and report is written once.
#[derive(Debug)]
pub struct PlainRenderer<W> {
    out: W,
    started: bool,
    revision: u64,
    status_revision: u64,
    report_revision: u64,
}

impl<W: Write> PlainRenderer<W> {
    /// Renderer writing to `out`.
    pub fn new(out: W) -> Self {
        Self { out, started: false, revision: 0, status_revision: 0, report_revision: 0 }
    }

    /// Write everything that changed since the last call.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    pub fn render(&mut self, app: &App) -> io::Result<()> {
        if !self.started {
            self.started = true;
            self.rule()?;
            writeln!(self.out, "{WELCOME}")?;
            self.rule()?;
        }

        if app.revision() == self.revision {
            return self.out.flush();
        }
        self.revision = app.revision();

        if app.status_revision() > self.status_revision {
            self.status_revision = app.status_revision();
            if let Some(status) = app.status() {
                writeln!(self.out, "{}", status.text)?;
            }
        }

        if app.report_revision() > self.report_revision {
            self.report_revision = app.report_revision();
            if let Some(shown) = app.report() {
                writeln!(self.out, "\n{}:\n", shown.operation.heading())?;
                writeln!(self.out, "{}", format_report(&shown.report))?;
                self.rule()?;
            }
        }

        self.prompt(app)?;
        self.out.flush()
    }

    /// Echo a line the program typed on the user's behalf.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    pub fn echo(&mut self, line: &str) -> io::Result<()> {
        writeln!(self.out, "{line}")?;
        self.out.flush()
    }

    /// The underlying writer.
    pub fn get_ref(&self) -> &W {
        &self.out
    }

    /// Consume the renderer and return the writer.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn prompt(&mut self, app: &App) -> io::Result<()> {
        let state = app.session().state();
        if matches!(state, SessionState::ModelFailed { .. }) {
            return write!(self.out, "\nType 'r' to retry loading the model or 'q' to exit.\n> ");
        }
        if !state.accepts_text() {
            return Ok(());
        }
        match app.mode() {
            Mode::EnterText => {
                write!(self.out, "\nWrite your text below to analyze it ('q' to quit):\n> ")
            },
            Mode::ChooseOperation => write!(self.out, "\n{}\n\nOption (1 - 9): ", format_menu()),
        }
    }

    fn rule(&mut self) -> io::Result<()> {
        writeln!(self.out, "{}", "=".repeat(RULE_WIDTH))
    }
}

/// Line-oriented driver implementing the [`Driver`] trait.
///
/// End of input quits.
pub struct PlainDriver {
    renderer: PlainRenderer<Stdout>,
    lines: Lines<BufReader<Stdin>>,
    pending_text: Option<String>,
}

impl PlainDriver {
    /// Driver over the process's stdin and stdout.
    ///
    /// `text`, if given, is submitted as soon as the model is ready.
    pub fn new(text: Option<String>) -> Self {
        Self {
            renderer: PlainRenderer::new(io::stdout()),
            lines: BufReader::new(tokio::io::stdin()).lines(),
            pending_text: text,
        }
    }

    fn take_pending(&mut self, app: &App) -> Option<String> {
        let ready = app.session().state().accepts_text() && app.mode() == Mode::EnterText;
        if ready { self.pending_text.take() } else { None }
    }
}

impl Driver for PlainDriver {
    type Error = TerminalError;

    async fn poll_event(&mut self, app: &mut App) -> Result<Vec<AppAction>, Self::Error> {
        if let Some(text) = self.take_pending(app) {
            self.renderer.echo(&text)?;
            return Ok(app.handle(AppEvent::Line(text)));
        }

        tokio::select! {
            biased;

            line = self.lines.next_line() => match line? {
                Some(line) => Ok(app.handle(AppEvent::Line(line))),
                None => Ok(app.handle(AppEvent::Quit)),
            },

            () = tokio::time::sleep(TICK_INTERVAL) => Ok(app.handle(AppEvent::Tick)),
        }
    }

    fn render(&mut self, app: &App) -> Result<(), Self::Error> {
        self.renderer.render(app).map_err(TerminalError::from)
    }

    fn stop(&mut self) {
        let _ = self.renderer.echo("\nThank you for using textlab. Goodbye!");
    }
}
