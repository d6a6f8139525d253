//! Script configuration

mod env;

pub use env::EnvConfig;

use crate::buffer::DEFAULT_CHUNK_SIZE;
use std::path::PathBuf;
use std::time::Duration;

/// Default pause between empty reads (in milliseconds)
const DEFAULT_POLL_INTERVAL_MS: u64 = 10;

/// Process and I/O settings for a [`Script`](crate::Script).
///
/// # Defaults
///
/// - Working directory: inherited from the caller
/// - Timeout: none (an expect step waits until it matches or the process dies)
/// - Poll interval: 10 ms
/// - Chunk size: 4096 bytes
/// - Shell: off (the command string is split into program and arguments)
/// - Unbuffer: off
/// - ANSI stripping: off
///
/// # Examples
///
/// ```
/// use expect_script::ScriptConfig;
/// use std::time::Duration;
///
/// let config = ScriptConfig::default()
///     .timeout(Duration::from_secs(5))
///     .shell(true);
/// assert_eq!(config.timeout, Some(Duration::from_secs(5)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptConfig {
    /// Directory the process starts in.
    pub working_dir: Option<PathBuf>,

    /// Default limit for every expect step; `None` waits forever.
    pub timeout: Option<Duration>,

    /// How long one read waits for output before the liveness check runs.
    /// Also bounds the final drain after the process exits.
    pub poll_interval: Duration,

    /// Maximum bytes taken from stdout per read.
    pub chunk_size: usize,

    /// Run the command through `sh -c` (`cmd /C` on Windows).
    pub shell: bool,

    /// Run the command under the `unbuffer` helper so it sees a terminal.
    pub unbuffer: bool,

    /// Remove ANSI escape sequences before matching.
    pub strip_ansi: bool,
}

impl Default for ScriptConfig {
    fn default() -> Self {
        Self {
            working_dir: None,
            timeout: None,
            poll_interval: Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
            chunk_size: DEFAULT_CHUNK_SIZE,
            shell: false,
            unbuffer: false,
            strip_ansi: false,
        }
    }
}

impl ScriptConfig {
    /// Defaults overlaid with `EXPECT_*` environment variables.
    ///
    /// See [`EnvConfig::apply`] for the variables read.
    pub fn from_env() -> Self {
        EnvConfig::default().apply(Self::default())
    }

    /// Set the working directory.
    pub fn working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    /// Set the default expect timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the poll interval. Zero is raised to one millisecond.
    pub fn poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval.max(Duration::from_millis(1));
        self
    }

    /// Set the read chunk size. Zero is raised to one byte.
    pub fn chunk_size(mut self, size: usize) -> Self {
        self.chunk_size = size.max(1);
        self
    }

    /// Enable or disable shell mode.
    pub fn shell(mut self, shell: bool) -> Self {
        self.shell = shell;
        self
    }

    /// Enable or disable the unbuffer helper.
    pub fn unbuffer(mut self, unbuffer: bool) -> Self {
        self.unbuffer = unbuffer;
        self
    }

    /// Enable or disable ANSI stripping.
    pub fn strip_ansi(mut self, strip: bool) -> Self {
        self.strip_ansi = strip;
        self
    }
}
