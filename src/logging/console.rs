//! Plain console logger

use super::{interpolate, Context, Logger};
use std::io::{self, Write};
use std::sync::{Mutex, PoisonError};
use tracing::Level;

/// Prints one `* message` line per event.
///
/// Line breaks inside a message are shown as `⏎` so that every event stays on
/// a single line, which keeps prompts such as `"Password: \n"` readable.
/// Events more verbose than the configured level (DEBUG by default) are
/// dropped.
///
/// # Examples
///
/// ```no_run
/// use expect_script::{ConsoleLogger, Script};
///
/// # fn example() -> Result<(), expect_script::ExpectError> {
/// Script::spawn("ftp example.org")
///     .logger(ConsoleLogger::stdout())
///     .expect("Name*:*")
///     .send("anonymous")
///     .run()?;
/// # Ok(())
/// # }
/// ```
pub struct ConsoleLogger {
    out: Mutex<Box<dyn Write + Send>>,
    max_level: Level,
}

impl ConsoleLogger {
    /// Log to an arbitrary writer.
    pub fn new(out: impl Write + Send + 'static) -> Self {
        Self {
            out: Mutex::new(Box::new(out)),
            max_level: Level::DEBUG,
        }
    }

    /// Log to standard output.
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }

    /// Only print events at `level` or less verbose.
    pub fn with_max_level(mut self, level: Level) -> Self {
        self.max_level = level;
        self
    }
}

impl std::fmt::Debug for ConsoleLogger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConsoleLogger")
            .field("max_level", &self.max_level)
            .finish_non_exhaustive()
    }
}

impl Logger for ConsoleLogger {
    fn log(&self, level: Level, message: &str, context: &Context<'_>) {
        if level > self.max_level {
            return;
        }

        let line = format_line(&interpolate(message, context));
        let mut out = self.out.lock().unwrap_or_else(PoisonError::into_inner);
        // a broken console must not abort the script
        let _ = out.write_all(line.as_bytes()).and_then(|()| out.flush());
    }
}

fn format_line(message: &str) -> String {
    format!("* {}\n", message.replace("\r\n", "⏎").replace('\n', "⏎"))
}
