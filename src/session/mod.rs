//! The spawned child process and its three pipes

mod command;
mod reader;
mod spawn;

use crate::config::ScriptConfig;
use crate::logging::Logger;
use crate::result::ExpectError;
use std::io::{self, Write};
use std::process::{Child, ChildStdin, ExitStatus};
use std::sync::mpsc::{Receiver, RecvTimeoutError};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};
use tracing::Level;

/// Result of one bounded read from stdout.
#[derive(Debug, PartialEq, Eq)]
pub enum ReadResult {
    /// A chunk of output
    Data(Vec<u8>),
    /// Nothing arrived within the wait
    Idle,
    /// stdout reached EOF; no more output will come
    Closed,
}

/// A running child with piped stdin, stdout and stderr.
///
/// stdout is pumped into a channel by a reader thread; stderr is drained by a
/// second thread and forwarded to the logger at TRACE level.
///
/// Dropping a handle that was not [`close`](Self::close)d closes stdin, kills
/// the child if it is still running, and reaps it.
pub struct ProcessHandle {
    child: Child,
    stdin: Option<ChildStdin>,
    stdout: Receiver<Vec<u8>>,
    exit_status: Option<ExitStatus>,
}

impl ProcessHandle {
    /// Start `command` according to `config`.
    pub fn spawn(
        command: &str,
        config: &ScriptConfig,
        logger: Arc<dyn Logger>,
    ) -> Result<Self, ExpectError> {
        let creation_error = |source: io::Error| ExpectError::ProcessCreation {
            command: command.to_string(),
            source,
        };

        let mut child = spawn::build_command(command, config)?
            .spawn()
            .map_err(creation_error)?;

        let (Some(stdin), Some(stdout), Some(stderr)) =
            (child.stdin.take(), child.stdout.take(), child.stderr.take())
        else {
            reap(&mut child);
            return Err(creation_error(io::Error::other("child pipes unavailable")));
        };

        let stdout = match reader::spawn_reader("expect-stdout", stdout, config.chunk_size) {
            Ok(rx) => rx,
            Err(e) => {
                reap(&mut child);
                return Err(creation_error(e));
            }
        };

        let handle = Self {
            child,
            stdin: Some(stdin),
            stdout,
            exit_status: None,
        };

        reader::spawn_pump("expect-stderr", stderr, config.chunk_size, move |chunk| {
            logger.log(
                Level::TRACE,
                "stderr: {output}",
                &[("output", String::from_utf8_lossy(&chunk).into_owned())],
            );
            true
        })
        .map_err(creation_error)?;

        Ok(handle)
    }

    /// OS process id.
    pub fn id(&self) -> u32 {
        self.child.id()
    }

    /// Wait up to `wait` for the next stdout chunk.
    ///
    /// After EOF this sleeps for `wait` and reports [`ReadResult::Closed`], so
    /// a caller polling in a loop does not spin.
    pub fn read_output(&mut self, wait: Duration) -> ReadResult {
        match self.stdout.recv_timeout(wait) {
            Ok(chunk) => ReadResult::Data(chunk),
            Err(RecvTimeoutError::Timeout) => ReadResult::Idle,
            Err(RecvTimeoutError::Disconnected) => {
                thread::sleep(wait);
                ReadResult::Closed
            }
        }
    }

    /// Collect whatever output is still in flight, for at most `grace` in
    /// total.
    ///
    /// A background process that inherited stdout can keep the pipe open and
    /// busy long after the child exited; the deadline stops the drain anyway.
    pub fn drain_output(&mut self, grace: Duration) -> Vec<u8> {
        let deadline = Instant::now() + grace;
        let mut drained = Vec::new();
        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                break;
            }
            match self.stdout.recv_timeout(remaining) {
                Ok(chunk) => drained.extend_from_slice(&chunk),
                Err(_) => break,
            }
        }
        drained
    }

    /// Write `text` to stdin and flush it.
    pub fn send(&mut self, text: &str) -> Result<(), ExpectError> {
        let send_failed = |source: io::Error| ExpectError::SendFailed {
            text: text.to_string(),
            source,
        };

        let stdin = self
            .stdin
            .as_mut()
            .ok_or_else(|| send_failed(io::Error::from(io::ErrorKind::BrokenPipe)))?;

        stdin.write_all(text.as_bytes()).map_err(send_failed)?;
        stdin.flush().map_err(send_failed)
    }

    /// Exit status if the child has exited, `None` while it runs.
    pub fn try_status(&mut self) -> Result<Option<ExitStatus>, ExpectError> {
        let status = self.child.try_wait()?;
        if status.is_some() {
            self.exit_status = status;
        }
        Ok(status)
    }

    /// Close stdin and wait for the child to exit.
    ///
    /// Blocks until the child exits on its own.
    pub fn close(mut self) -> Result<ExitStatus, ExpectError> {
        drop(self.stdin.take());
        let status = self.child.wait()?;
        self.exit_status = Some(status);
        Ok(status)
    }
}

fn reap(child: &mut Child) {
    let _ = child.kill();
    let _ = child.wait();
}

impl Drop for ProcessHandle {
    fn drop(&mut self) {
        if self.exit_status.is_some() {
            return;
        }
        drop(self.stdin.take());
        if let Ok(None) = self.child.try_wait() {
            let _ = self.child.kill();
        }
        let _ = self.child.wait();
    }
}
