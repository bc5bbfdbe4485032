//! Python worker process.

use std::{
    io::{BufRead, BufReader, Write},
    process::{Child, ChildStdin, ChildStdout, Command, Stdio},
};

use textlab_core::Document;

use crate::{
    SpacyConfig, SpacyError,
    protocol::{self, Handshake},
};

/// Python source run with `python -c`.
const WORKER_SCRIPT: &str = include_str!("worker.py");

/// A running worker with a loaded pipeline.
pub(crate) struct Worker {
    child: Child,
    stdin: ChildStdin,
    stdout: BufReader<ChildStdout>,
}

impl Worker {
    /// Start the worker and wait for its handshake.
    ///
    /// Returns the worker and the model name it reported.
    pub(crate) fn spawn(config: &SpacyConfig) -> Result<(Self, String), SpacyError> {
        let mut child = Command::new(&config.python)
            .arg("-u")
            .arg("-c")
            .arg(WORKER_SCRIPT)
            .arg(&config.model)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|source| SpacyError::Spawn { python: config.python.clone(), source })?;

        let (Some(stdin), Some(stdout)) = (child.stdin.take(), child.stdout.take()) else {
            let _ = child.kill();
            return Err(SpacyError::Protocol { reason: "worker pipes unavailable".to_owned() });
        };
        tracing::debug!(pid = child.id(), python = %config.python, "spaCy worker started");

        let mut worker = Self { child, stdin, stdout: BufReader::new(stdout) };
        let line = worker.read_line()?;
        match protocol::parse_handshake(&line)? {
            Handshake::Ready { model } => {
                let model = model.unwrap_or_else(|| config.model.clone());
                Ok((worker, model))
            },
            Handshake::Error { message } => Err(SpacyError::Model { reason: message }),
        }
    }

    /// Send one text and read its document.
    pub(crate) fn request(&mut self, text: &str) -> Result<Document, SpacyError> {
        let mut line = protocol::encode_request(text)?;
        line.push('\n');
        self.stdin.write_all(line.as_bytes())?;
        self.stdin.flush()?;

        let reply = self.read_line()?;
        protocol::parse_reply(&reply)
    }

    fn read_line(&mut self) -> Result<String, SpacyError> {
        let mut line = String::new();
        if self.stdout.read_line(&mut line)? == 0 {
            return Err(SpacyError::Closed);
        }
        Ok(line)
    }
}

impl Drop for Worker {
    fn drop(&mut self) {
        // Already exited is fine
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}
