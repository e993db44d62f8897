//! Command execution primitives with consistent error handling.

use std::path::Path;
use std::process::{Command, ExitStatus, Stdio};

use crate::error::{Error, Result};

/// Run a command in `dir` with stdio inherited from this process.
///
/// Blocks until the child exits; there is no timeout. Returns the exit
/// status whether or not it is a success, and only errors when the
/// process could not be started at all.
pub fn run_inherited(program: &str, args: &[String], dir: &Path) -> Result<ExitStatus> {
    Command::new(program)
        .args(args)
        .current_dir(dir)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
        .map_err(|e| {
            Error::build_spawn_failed(program, dir.to_string_lossy(), e.to_string())
        })
}

/// Map an exit status to a shell-style exit code.
///
/// A child killed by a signal reports `128 + signal` on Unix.
pub fn exit_code(status: &ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }

    -1
}
