//! Turning a command string into an OS process

use super::command::split_command;
use crate::config::ScriptConfig;
use crate::result::ExpectError;
use std::ffi::OsStr;
use std::io;
use std::path::PathBuf;
use std::process::{Command, Stdio};

/// Pseudo-terminal helper shipped with the `expect` package.
pub const UNBUFFER_HELPER: &str = "unbuffer";

/// Build the command for `command`, wiring all three standard streams to pipes.
///
/// Fails before anything is spawned when the command is empty or badly quoted,
/// or when unbuffering is requested and the helper cannot be found.
pub fn build_command(command: &str, config: &ScriptConfig) -> Result<Command, ExpectError> {
    let creation_error = |source: io::Error| ExpectError::ProcessCreation {
        command: command.to_string(),
        source,
    };

    let mut argv = if config.shell {
        shell_argv(command)
    } else {
        split_command(command)
            .map_err(|e| creation_error(io::Error::new(io::ErrorKind::InvalidInput, e)))?
    };

    if argv.is_empty() {
        return Err(creation_error(io::Error::new(
            io::ErrorKind::InvalidInput,
            "empty command",
        )));
    }

    if config.unbuffer {
        let helper = resolve_unbuffer(std::env::var_os("PATH").as_deref())?;
        let mut wrapped = vec![helper.to_string_lossy().into_owned(), "-p".to_string()];
        wrapped.append(&mut argv);
        argv = wrapped;
    }

    let mut cmd = Command::new(&argv[0]);
    cmd.args(&argv[1..])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());

    if let Some(dir) = &config.working_dir {
        cmd.current_dir(dir);
    }

    Ok(cmd)
}

fn shell_argv(command: &str) -> Vec<String> {
    if cfg!(windows) {
        vec!["cmd".to_string(), "/C".to_string(), command.to_string()]
    } else {
        vec!["sh".to_string(), "-c".to_string(), command.to_string()]
    }
}

/// Locate the unbuffer helper on `path_var`.
pub fn resolve_unbuffer(path_var: Option<&OsStr>) -> Result<PathBuf, ExpectError> {
    if cfg!(windows) {
        return Err(ExpectError::UnbufferUnavailable {
            helper: UNBUFFER_HELPER,
            reason: "not supported on this platform".to_string(),
        });
    }

    find_in_path(UNBUFFER_HELPER, path_var).ok_or_else(|| ExpectError::UnbufferUnavailable {
        helper: UNBUFFER_HELPER,
        reason: "not found on PATH (install the `expect` package)".to_string(),
    })
}

fn find_in_path(program: &str, path_var: Option<&OsStr>) -> Option<PathBuf> {
    std::env::split_paths(path_var?)
        .map(|dir| dir.join(program))
        .find(|candidate| candidate.is_file())
}
