//! Error types for expect-script

use std::io;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur while running a script.
///
/// A process that dies before an expectation is met is *not* an error from
/// [`Script::run`](crate::Script::run): it is reported through
/// [`Outcome::ProcessDied`](crate::Outcome::ProcessDied). Call
/// [`RunReport::into_result`](crate::RunReport::into_result) to turn that outcome
/// into [`ExpectError::ProcessDied`].
///
/// # Examples
///
/// ```no_run
/// use expect_script::{ExpectError, Script};
///
/// match Script::spawn("no-such-program").expect("ready").run() {
///     Ok(report) => println!("finished: {:?}", report.outcome),
///     Err(ExpectError::ProcessCreation { command, source }) => {
///         eprintln!("could not start {command}: {source}");
///     }
///     Err(e) => eprintln!("script failed: {e}"),
/// }
/// ```
#[derive(Error, Debug)]
pub enum ExpectError {
    /// The process or its pipes could not be created.
    ///
    /// Covers empty commands, malformed quoting in the command string, and
    /// programs the OS refuses to execute. No step has run when this is
    /// returned.
    #[error("Could not create the process `{command}`: {source}")]
    ProcessCreation {
        /// The command string as given to the script
        command: String,
        /// Underlying cause
        #[source]
        source: io::Error,
    },

    /// The unbuffering helper was requested but cannot be used.
    #[error("Unbuffer helper `{helper}` unavailable: {reason}")]
    UnbufferUnavailable {
        /// Name of the helper program
        helper: &'static str,
        /// Why it cannot be used
        reason: String,
    },

    /// Writing to the child's stdin failed, usually because it already exited.
    #[error("Failed to send {text:?} to the process: {source}")]
    SendFailed {
        /// The text that was being sent
        text: String,
        /// Underlying cause
        #[source]
        source: io::Error,
    },

    /// The process exited before an expect step matched.
    #[error("Process died before step {step} matched {pattern:?} (last output {response:?})")]
    ProcessDied {
        /// Zero-based index of the step that was waiting
        step: usize,
        /// The glob pattern that never matched
        pattern: String,
        /// Trimmed output collected by that step
        response: String,
    },

    /// An expect step with a timeout did not match in time.
    ///
    /// Only produced when a timeout was configured with
    /// [`Script::timeout`](crate::Script::timeout) or
    /// [`Script::expect_within`](crate::Script::expect_within).
    #[error("Timeout waiting for {pattern:?} (after {duration:?})")]
    Timeout {
        /// The glob pattern that never matched
        pattern: String,
        /// How long the step waited
        duration: Duration,
    },

    /// I/O error while querying or reaping the process.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Errors reported by strict glob validation.
///
/// The script engine never raises these: an invalid pattern simply never
/// matches. Use [`GlobPattern::try_new`](crate::GlobPattern::try_new) to catch
/// typos up front.
#[derive(Error, Debug)]
pub enum PatternError {
    /// The glob could not be compiled.
    #[error("Invalid glob {pattern:?}: {reason}")]
    InvalidGlob {
        /// The pattern as written
        pattern: String,
        /// Compiler message
        reason: String,
    },
}
