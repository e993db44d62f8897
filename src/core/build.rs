use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::error::{BuildFailedDetails, Error, Result};
use crate::invocation::BuildMode;
use crate::paths;
use crate::utils::command;
use crate::utils::shell;

/// Action token the driver script receives before the forwarded arguments.
pub const BUILD_ACTION: &str = "build";

// === Build Driver ===

/// Entry point of the underlying build system.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildDriver {
    pub program: String,
    pub script: PathBuf,
}

impl BuildDriver {
    /// `sh <script>`.
    pub fn new(script: impl Into<PathBuf>) -> Self {
        Self {
            program: "sh".to_string(),
            script: script.into(),
        }
    }

    /// `sh <base_dir>/cargo.sh`.
    pub fn for_base_dir(base_dir: &Path) -> Self {
        Self::new(paths::build_script(base_dir))
    }

    /// Arguments passed to `program`: the script, the build action, then `passthrough` verbatim.
    pub fn args(&self, passthrough: &[String]) -> Vec<String> {
        let mut args = Vec::with_capacity(passthrough.len() + 2);
        args.push(self.script.to_string_lossy().to_string());
        args.push(BUILD_ACTION.to_string());
        args.extend(passthrough.iter().cloned());
        args
    }

    /// Full command line, program included.
    pub fn command_line(&self, passthrough: &[String]) -> Vec<String> {
        let mut line = vec![self.program.clone()];
        line.extend(self.args(passthrough));
        line
    }
}

// === Public API ===

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildOutcome {
    pub command: String,
    pub mode: BuildMode,
    pub working_dir: String,
    pub exit_code: i32,
}

/// Run the build and wait for it to finish.
///
/// Output streams are inherited so the build's diagnostics reach the caller
/// unchanged. A nonzero exit is returned as `build.failed`.
pub fn run(
    driver: &BuildDriver,
    mode: BuildMode,
    passthrough: &[String],
    working_dir: &Path,
) -> Result<BuildOutcome> {
    let command = shell::display_command(&driver.command_line(passthrough));
    let working_dir_str = working_dir.to_string_lossy().to_string();

    log_status!("build", "Running {} ({} mode)", command, mode.dir_name());

    let status = command::run_inherited(&driver.program, &driver.args(passthrough), working_dir)?;
    let exit_code = command::exit_code(&status);

    if !status.success() {
        return Err(Error::build_failed(BuildFailedDetails {
            command,
            working_dir: working_dir_str,
            exit_code,
        })
        .with_hint(build_hint(exit_code)));
    }

    Ok(BuildOutcome {
        command,
        mode,
        working_dir: working_dir_str,
        exit_code,
    })
}

/// Only universal POSIX exit codes get a specific hint.
fn build_hint(exit_code: i32) -> &'static str {
    match exit_code {
        127 => "Command not found. Check that the build script and cargo are installed and in PATH.",
        126 => "Permission denied. Check file permissions on the build script.",
        _ => "See the build output above; no artifact was copied.",
    }
}
