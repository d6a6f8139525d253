//! The script engine: an ordered list of expect/send steps run against one
//! child process.

mod step;
mod wait;

pub use step::{Step, LINE_ENDING};

use crate::config::ScriptConfig;
use crate::logging::{ConsoleLogger, Logger, NullLogger};
use crate::pattern::GlobPattern;
use crate::result::{ExpectError, Outcome, RunReport};
use crate::session::ProcessHandle;
use std::fmt;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::Level;
use wait::{wait_for_match, WaitOutcome};

/// A scripted conversation with an interactive program.
///
/// Build the script by chaining [`expect`](Self::expect) and
/// [`send`](Self::send), then call [`run`](Self::run). Nothing is started until
/// `run`, and every call to `run` starts a fresh process.
///
/// # Examples
///
/// ```no_run
/// use expect_script::Script;
///
/// # fn example() -> Result<(), expect_script::ExpectError> {
/// let report = Script::spawn("passwd")
///     .expect("*current*password:*")
///     .send("old-secret")
///     .expect("*new password:*")
///     .send("new-secret")
///     .expect("*new password:*")
///     .send("new-secret")
///     .run()?;
///
/// assert!(report.is_completed());
/// # Ok(())
/// # }
/// ```
///
/// # Blocking
///
/// An expect step waits until its pattern matches the output or the process
/// exits. A process that stays alive without ever printing a match blocks
/// `run` forever unless a timeout is set with [`timeout`](Self::timeout) or
/// [`expect_within`](Self::expect_within).
pub struct Script {
    command: String,
    config: ScriptConfig,
    logger: Arc<dyn Logger>,
    steps: Vec<Step>,
}

impl Script {
    /// Start a script for `command`.
    ///
    /// The command is split into program and arguments shell-style (quotes
    /// and backslashes are honoured, nothing is expanded). Use
    /// [`shell`](Self::shell) to run it through `sh -c` instead.
    pub fn spawn(command: impl Into<String>) -> Self {
        Self::with_config(command, ScriptConfig::default())
    }

    /// Start a script for `command`, run inside `working_dir`.
    pub fn spawn_in(command: impl Into<String>, working_dir: impl Into<PathBuf>) -> Self {
        Self::with_config(command, ScriptConfig::default().working_dir(working_dir))
    }

    /// Start a script for `command` with explicit configuration.
    pub fn with_config(command: impl Into<String>, config: ScriptConfig) -> Self {
        Self {
            command: command.into(),
            config,
            logger: Arc::new(NullLogger),
            steps: Vec::new(),
        }
    }

    /// Wait for the output to match the glob `pattern`.
    ///
    /// The pattern must match the whole output this step has collected, minus
    /// one trailing line break. It is not validated here; an invalid glob
    /// simply never matches.
    pub fn expect(mut self, pattern: impl Into<String>) -> Self {
        self.steps.push(Step::expect(pattern));
        self
    }

    /// Like [`expect`](Self::expect), failing with [`ExpectError::Timeout`]
    /// after `timeout`.
    pub fn expect_within(mut self, pattern: impl Into<String>, timeout: Duration) -> Self {
        self.steps.push(Step::Expect {
            pattern: pattern.into(),
            timeout: Some(timeout),
        });
        self
    }

    /// Type `text` into the process, followed by a line break unless it
    /// already ends with one.
    pub fn send(mut self, text: impl Into<String>) -> Self {
        self.steps.push(Step::send(text));
        self
    }

    /// Install a logger for diagnostics.
    pub fn logger(mut self, logger: impl Logger + 'static) -> Self {
        self.logger = Arc::new(logger);
        self
    }

    /// Print diagnostics to stdout with [`ConsoleLogger`].
    pub fn debug(self) -> Self {
        self.logger(ConsoleLogger::stdout())
    }

    /// Run the process in `dir`.
    pub fn working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config = self.config.working_dir(dir);
        self
    }

    /// Default limit for expect steps without their own timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config = self.config.timeout(timeout);
        self
    }

    /// How long a single read waits before the liveness check.
    pub fn poll_interval(mut self, interval: Duration) -> Self {
        self.config = self.config.poll_interval(interval);
        self
    }

    /// Run the command through the platform shell.
    pub fn shell(mut self, shell: bool) -> Self {
        self.config = self.config.shell(shell);
        self
    }

    /// Run the command under `unbuffer` so it sees a terminal.
    ///
    /// [`run`](Self::run) fails with [`ExpectError::UnbufferUnavailable`]
    /// when the helper is not installed.
    pub fn unbuffer(mut self, unbuffer: bool) -> Self {
        self.config = self.config.unbuffer(unbuffer);
        self
    }

    /// Remove ANSI escape sequences from output before matching.
    pub fn strip_ansi(mut self, strip: bool) -> Self {
        self.config = self.config.strip_ansi(strip);
        self
    }

    /// The command string.
    pub fn command(&self) -> &str {
        &self.command
    }

    /// The effective configuration.
    pub fn config(&self) -> &ScriptConfig {
        &self.config
    }

    /// Registered steps, in execution order.
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Start the process and walk the steps in order.
    ///
    /// Returns once every step has run and the process has exited, or early
    /// with [`Outcome::ProcessDied`] when the process exits while an expect
    /// step is still waiting. The process is reaped on every path; on error
    /// paths a still-running process is killed first.
    ///
    /// # Errors
    ///
    /// - [`ExpectError::ProcessCreation`] / [`ExpectError::UnbufferUnavailable`]
    ///   before any step runs
    /// - [`ExpectError::SendFailed`] when stdin is closed
    /// - [`ExpectError::Timeout`] when an opt-in timeout expires
    pub fn run(&self) -> Result<RunReport, ExpectError> {
        self.log(
            Level::INFO,
            "spawning '{command}'",
            &[("command", self.command.clone())],
        );

        let mut process =
            ProcessHandle::spawn(&self.command, &self.config, Arc::clone(&self.logger))?;
        self.log(
            Level::DEBUG,
            "started process {pid}",
            &[("pid", process.id().to_string())],
        );

        let (outcome, steps_executed) = self.run_steps(&mut process)?;

        let status = process.close()?;
        self.log(
            Level::INFO,
            "process exited with {status}",
            &[("status", status.to_string())],
        );

        Ok(RunReport {
            outcome,
            exit_status: status,
            steps_executed,
        })
    }

    /// [`run`](Self::run) on tokio's blocking thread pool.
    pub async fn run_async(self) -> Result<RunReport, ExpectError> {
        tokio::task::spawn_blocking(move || self.run())
            .await
            .map_err(|e| ExpectError::Io(io::Error::other(e)))?
    }

    fn run_steps(&self, process: &mut ProcessHandle) -> Result<(Outcome, usize), ExpectError> {
        for (index, step) in self.steps.iter().enumerate() {
            match step {
                Step::Expect { pattern, timeout } => {
                    let glob = GlobPattern::new(pattern.as_str());
                    if !glob.is_valid() {
                        self.log(
                            Level::WARN,
                            "'{pattern}' is not a valid glob and will never match",
                            &[("pattern", pattern.clone())],
                        );
                    }

                    self.log(
                        Level::DEBUG,
                        "step {step}: getting response...",
                        &[("step", index.to_string())],
                    );
                    let limit = timeout.or(self.config.timeout);
                    match wait_for_match(process, &glob, limit, &self.config, self.logger.as_ref())? {
                        WaitOutcome::Matched { response } => {
                            self.log(
                                Level::DEBUG,
                                "step {step} matched '{response}'",
                                &[("step", index.to_string()), ("response", response)],
                            );
                        }
                        WaitOutcome::ProcessDied { response, status } => {
                            self.log(
                                Level::WARN,
                                "process died ({status}) before '{pattern}' matched",
                                &[
                                    ("status", status.to_string()),
                                    ("pattern", pattern.clone()),
                                ],
                            );
                            let outcome = Outcome::ProcessDied {
                                step: index,
                                pattern: pattern.clone(),
                                last_response: response,
                            };
                            return Ok((outcome, index));
                        }
                    }
                }
                Step::Send { text } => {
                    self.log(Level::DEBUG, "sending '{text}'", &[("text", text.clone())]);
                    process.send(text)?;
                }
            }
        }

        Ok((Outcome::Completed, self.steps.len()))
    }

    fn log(&self, level: Level, message: &str, context: &[(&str, String)]) {
        self.logger.log(level, message, context);
    }
}

impl fmt::Debug for Script {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Script")
            .field("command", &self.command)
            .field("config", &self.config)
            .field("steps", &self.steps)
            .finish_non_exhaustive()
    }
}
