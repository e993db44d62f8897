use serde::Serialize;
use std::path::PathBuf;

use crate::build::{self, BuildDriver, BuildOutcome};
use crate::error::Result;
use crate::invocation::{self, BuildMode};
use crate::relocate::{self, RelocationReport};

/// Everything resolved once at startup and threaded through the run.
#[derive(Debug, Clone)]
pub struct Context {
    /// Working directory of the build and root of the `debug/` and `release/` dirs.
    pub base_dir: PathBuf,
    /// Relative destinations are resolved against this.
    pub caller_dir: PathBuf,
    pub driver: BuildDriver,
}

impl Context {
    pub fn new(base_dir: PathBuf, caller_dir: PathBuf) -> Self {
        let driver = BuildDriver::for_base_dir(&base_dir);
        Self {
            base_dir,
            caller_dir,
            driver,
        }
    }

    pub fn with_driver(mut self, driver: BuildDriver) -> Self {
        self.driver = driver;
        self
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunReport {
    pub mode: BuildMode,
    pub build: BuildOutcome,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relocation: Option<RelocationReport>,
}

/// Classify, build, then relocate. Stops at the first failure.
///
/// Usage errors are raised before the build starts; a failed build never
/// reaches the copy step.
pub fn run(args: &[String], ctx: &Context) -> Result<RunReport> {
    let invocation = invocation::classify(args)?;
    let plan = relocate::plan(&invocation, &ctx.base_dir, &ctx.caller_dir)?;

    let build = build::run(
        &ctx.driver,
        invocation.mode,
        &invocation.passthrough,
        &ctx.base_dir,
    )?;

    let relocation = match &plan {
        Some(plan) => Some(relocate::execute(plan)?),
        None => {
            log_status!("relocate", "No destination given, skipping copy");
            None
        }
    };

    Ok(RunReport {
        mode: invocation.mode,
        build,
        relocation,
    })
}
