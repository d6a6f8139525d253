//! Script steps

use std::time::Duration;

/// Line terminator appended to sent text.
pub const LINE_ENDING: &str = if cfg!(windows) { "\r\n" } else { "\n" };

/// One unit of scripted interaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Wait until the output collected by this step glob-matches `pattern`.
    Expect {
        /// Glob matched against the whole trimmed output
        pattern: String,
        /// Per-step limit, overriding the script default
        timeout: Option<Duration>,
    },

    /// Write `text` to the process's stdin.
    Send {
        /// Text to write; always ends with [`LINE_ENDING`]
        text: String,
    },
}

impl Step {
    /// An expect step without its own timeout.
    pub fn expect(pattern: impl Into<String>) -> Self {
        Step::Expect {
            pattern: pattern.into(),
            timeout: None,
        }
    }

    /// A send step, terminated by exactly one [`LINE_ENDING`].
    pub fn send(text: impl Into<String>) -> Self {
        Step::Send {
            text: with_line_ending(text.into()),
        }
    }
}

/// Append [`LINE_ENDING`] unless `text` already ends with it.
pub fn with_line_ending(mut text: String) -> String {
    if !text.ends_with(LINE_ENDING) {
        text.push_str(LINE_ENDING);
    }
    text
}
