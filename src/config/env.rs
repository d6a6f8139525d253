//! Environment-based configuration.

use super::ScriptConfig;
use std::time::Duration;

/// Environment variable prefix.
pub const DEFAULT_PREFIX: &str = "EXPECT";

/// Reads `PREFIX_NAME` style variables.
#[derive(Debug, Clone)]
pub struct EnvConfig {
    prefix: String,
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self::new(DEFAULT_PREFIX)
    }
}

impl EnvConfig {
    /// Create a reader for `prefix`.
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    fn var_name(&self, name: &str) -> String {
        format!("{}_{}", self.prefix, name.to_uppercase())
    }

    /// Raw value of `PREFIX_NAME`.
    pub fn get(&self, name: &str) -> Option<String> {
        std::env::var(self.var_name(name)).ok()
    }

    /// Parsed value; unparseable values count as unset.
    pub fn parse<T: std::str::FromStr>(&self, name: &str) -> Option<T> {
        self.get(name).and_then(|v| v.trim().parse().ok())
    }

    /// Boolean value; `1`, `true`, `yes` and `on` are true.
    pub fn bool(&self, name: &str) -> Option<bool> {
        self.get(name).map(|v| is_truthy(&v))
    }

    /// Duration given in milliseconds.
    pub fn duration_millis(&self, name: &str) -> Option<Duration> {
        self.parse::<u64>(name).map(Duration::from_millis)
    }

    /// Overlay the variables that are set onto `config`.
    ///
    /// | Variable | Field |
    /// |---|---|
    /// | `EXPECT_TIMEOUT_MS` | `timeout` |
    /// | `EXPECT_POLL_INTERVAL_MS` | `poll_interval` |
    /// | `EXPECT_CHUNK_SIZE` | `chunk_size` |
    /// | `EXPECT_SHELL` | `shell` |
    /// | `EXPECT_UNBUFFER` | `unbuffer` |
    /// | `EXPECT_STRIP_ANSI` | `strip_ansi` |
    pub fn apply(&self, mut config: ScriptConfig) -> ScriptConfig {
        if let Some(timeout) = self.duration_millis("timeout_ms") {
            config = config.timeout(timeout);
        }
        if let Some(interval) = self.duration_millis("poll_interval_ms") {
            config = config.poll_interval(interval);
        }
        if let Some(size) = self.parse::<usize>("chunk_size") {
            config = config.chunk_size(size);
        }
        if let Some(shell) = self.bool("shell") {
            config.shell = shell;
        }
        if let Some(unbuffer) = self.bool("unbuffer") {
            config.unbuffer = unbuffer;
        }
        if let Some(strip) = self.bool("strip_ansi") {
            config.strip_ansi = strip;
        }
        config
    }
}

fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
