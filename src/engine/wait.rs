//! The per-step wait loop

use crate::buffer::OutputBuffer;
use crate::config::ScriptConfig;
use crate::logging::Logger;
use crate::pattern::GlobPattern;
use crate::result::ExpectError;
use crate::session::{ProcessHandle, ReadResult};
use std::process::ExitStatus;
use std::time::{Duration, Instant};
use tracing::Level;

/// How an expect step resolved.
#[derive(Debug)]
pub enum WaitOutcome {
    /// The trimmed output matched
    Matched {
        /// The matching output
        response: String,
    },
    /// The process exited first
    ProcessDied {
        /// Everything the step collected, trimmed
        response: String,
        /// How the process ended
        status: ExitStatus,
    },
}

/// Block until the output matches `pattern`, the process exits, or `timeout`
/// elapses.
///
/// Each pass reads at most one chunk, re-tests the whole accumulated output,
/// then checks liveness. Output already in flight when the process exits is
/// drained and tested once more before the step is declared dead.
pub fn wait_for_match(
    process: &mut ProcessHandle,
    pattern: &GlobPattern,
    timeout: Option<Duration>,
    config: &ScriptConfig,
    logger: &dyn Logger,
) -> Result<WaitOutcome, ExpectError> {
    let started = Instant::now();
    let mut buffer = OutputBuffer::new(config.strip_ansi);
    let mut first = true;

    loop {
        let fresh = match process.read_output(config.poll_interval) {
            ReadResult::Data(chunk) => {
                buffer.append(&chunk);
                true
            }
            ReadResult::Idle | ReadResult::Closed => false,
        };

        let response = buffer.response();
        // idle passes repeat the same response; keep them out of DEBUG
        let level = if fresh || first { Level::DEBUG } else { Level::TRACE };
        first = false;
        log_progress(logger, level, pattern, &response);
        if pattern.is_match(&response) {
            return Ok(WaitOutcome::Matched { response });
        }

        if let Some(status) = process.try_status()? {
            let tail = process.drain_output(config.poll_interval);
            let response = if tail.is_empty() {
                response
            } else {
                buffer.append(&tail);
                let response = buffer.response();
                log_progress(logger, Level::DEBUG, pattern, &response);
                response
            };

            if pattern.is_match(&response) {
                return Ok(WaitOutcome::Matched { response });
            }
            return Ok(WaitOutcome::ProcessDied { response, status });
        }

        if let Some(limit) = timeout {
            if started.elapsed() >= limit {
                return Err(ExpectError::Timeout {
                    pattern: pattern.as_str().to_string(),
                    duration: limit,
                });
            }
        }
    }
}

fn log_progress(logger: &dyn Logger, level: Level, pattern: &GlobPattern, response: &str) {
    logger.log(
        level,
        "expected '{pattern}', got '{response}'",
        &[
            ("pattern", pattern.as_str().to_string()),
            ("response", response.to_string()),
        ],
    );
}
