//! Result types for script runs

mod error;

pub use error::{ExpectError, PatternError};

use std::process::ExitStatus;

/// How a script run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Every step ran in order.
    Completed,

    /// The process exited while an expect step was still waiting.
    ///
    /// The remaining steps were skipped.
    ProcessDied {
        /// Zero-based index of the step that was waiting
        step: usize,
        /// The glob pattern that never matched
        pattern: String,
        /// Trimmed output that step had collected
        last_response: String,
    },
}

/// Summary of a finished [`Script::run`](crate::Script::run).
///
/// # Examples
///
/// ```no_run
/// use expect_script::{Outcome, Script};
///
/// # fn example() -> Result<(), expect_script::ExpectError> {
/// let report = Script::spawn("python3 -i")
///     .expect(">>> ")
///     .send("exit()")
///     .run()?;
///
/// match report.outcome {
///     Outcome::Completed => println!("done, {}", report.exit_status),
///     Outcome::ProcessDied { step, .. } => println!("died waiting at step {step}"),
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct RunReport {
    /// How the run ended
    pub outcome: Outcome,

    /// Exit status collected when the process was reaped
    pub exit_status: ExitStatus,

    /// Number of steps that completed (matched or sent).
    pub steps_executed: usize,
}

impl RunReport {
    /// `true` when all steps ran.
    pub fn is_completed(&self) -> bool {
        self.outcome == Outcome::Completed
    }

    /// Exit code of the reaped process; `None` if a signal ended it.
    pub fn exit_code(&self) -> Option<i32> {
        self.exit_status.code()
    }

    /// Convert a died-early run into [`ExpectError::ProcessDied`].
    ///
    /// For callers that treat an unmet expectation as a failure rather than a
    /// normal way for a script to end.
    pub fn into_result(self) -> Result<Self, ExpectError> {
        match self.outcome {
            Outcome::Completed => Ok(self),
            Outcome::ProcessDied {
                step,
                pattern,
                last_response,
            } => Err(ExpectError::ProcessDied {
                step,
                pattern,
                response: last_response,
            }),
        }
    }
}
