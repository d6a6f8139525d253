//! Diagnostic logging for script runs.
//!
//! The engine reports what it is doing through an injected [`Logger`]. Nothing
//! is printed unless a logger is installed: the default is [`NullLogger`].
//! [`TracingLogger`] forwards into the `tracing` ecosystem, and
//! [`ConsoleLogger`] prints a compact human-readable trail.
//!
//! Messages carry `{key}` placeholders that loggers fill from the context with
//! [`interpolate`].

mod console;

pub use console::ConsoleLogger;

use regex::{Captures, Regex};
use std::borrow::Cow;
use std::sync::LazyLock;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Environment variable read by [`init_tracing`].
pub const LOG_ENV_VAR: &str = "EXPECT_SCRIPT_LOG";

/// Key/value pairs attached to a log message.
pub type Context<'a> = [(&'a str, String)];

/// Sink for engine diagnostics.
pub trait Logger: Send + Sync {
    /// Record `message` at `level`.
    ///
    /// `message` may contain `{key}` placeholders naming entries of `context`.
    fn log(&self, level: Level, message: &str, context: &Context<'_>);
}

/// Discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullLogger;

impl Logger for NullLogger {
    fn log(&self, _level: Level, _message: &str, _context: &Context<'_>) {}
}

/// Forwards diagnostics to `tracing` under the `expect_script` target.
///
/// The context is attached as a debug-formatted field, and the message is
/// interpolated before it is emitted.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn log(&self, level: Level, message: &str, context: &Context<'_>) {
        let message = interpolate(message, context);
        match level {
            Level::ERROR => tracing::error!(target: "expect_script", ?context, "{message}"),
            Level::WARN => tracing::warn!(target: "expect_script", ?context, "{message}"),
            Level::INFO => tracing::info!(target: "expect_script", ?context, "{message}"),
            Level::DEBUG => tracing::debug!(target: "expect_script", ?context, "{message}"),
            _ => tracing::trace!(target: "expect_script", ?context, "{message}"),
        }
    }
}

static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{([A-Za-z0-9_.]+)\}").expect("placeholder regex is valid")
});

/// Replace `{key}` placeholders with their context values.
///
/// Placeholders without a matching key are left as written.
///
/// ```
/// use expect_script::logging::interpolate;
///
/// let context = [("pattern", "ready".to_string())];
/// assert_eq!(interpolate("waiting for '{pattern}'", &context), "waiting for 'ready'");
/// assert_eq!(interpolate("{missing}", &context), "{missing}");
/// ```
pub fn interpolate<'m>(message: &'m str, context: &Context<'_>) -> Cow<'m, str> {
    if context.is_empty() {
        return Cow::Borrowed(message);
    }

    PLACEHOLDER.replace_all(message, |caps: &Captures<'_>| {
        context
            .iter()
            .find(|(key, _)| *key == &caps[1])
            .map_or_else(|| caps[0].to_string(), |(_, value)| value.clone())
    })
}

/// Install a `tracing-subscriber` formatter on stderr.
///
/// The filter comes from `EXPECT_SCRIPT_LOG` (e.g. `debug`,
/// `expect_script=trace`) and defaults to `info`. Calling this again after a
/// subscriber is installed returns an error and changes nothing.
pub fn init_tracing() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init()
}
