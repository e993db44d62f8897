//! Argument classification for a single wrapper run.
//!
//! Splits the raw argument list into the release flag, the rename directive,
//! the destination path and everything that is forwarded to the build.

use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Selects release mode. Also forwarded to the build as-is.
pub const RELEASE_FLAG: &str = "--release";

/// Takes one value: the file name the build produces.
pub const RENAME_FLAG: &str = "--rename";

/// Tokens starting with this are never taken as the destination.
pub const FLAG_PREFIX: &str = "--";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildMode {
    #[default]
    Debug,
    Release,
}

impl BuildMode {
    /// Name of the subdirectory the build places its artifacts in.
    pub fn dir_name(&self) -> &'static str {
        match self {
            BuildMode::Debug => "debug",
            BuildMode::Release => "release",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildInvocation {
    pub mode: BuildMode,
    pub renamed_artifact: Option<String>,
    pub destination: Option<PathBuf>,
    pub passthrough: Vec<String>,
}

impl BuildInvocation {
    /// File name to look for in the mode directory.
    ///
    /// The rename value wins; otherwise the destination's last path segment.
    pub fn artifact_filename(&self) -> Option<String> {
        if let Some(name) = &self.renamed_artifact {
            return Some(name.clone());
        }
        self.destination
            .as_deref()
            .and_then(Path::file_name)
            .map(|name| name.to_string_lossy().to_string())
    }
}

/// Classify raw arguments (program name excluded) into a [`BuildInvocation`].
///
/// The input is never mutated. The mode comes from the raw arguments; only the
/// first `--rename` is a directive and its value is taken literally, even when
/// it looks like a flag.
pub fn classify(args: &[String]) -> Result<BuildInvocation> {
    let mode = if args.iter().any(|arg| arg == RELEASE_FLAG) {
        BuildMode::Release
    } else {
        BuildMode::Debug
    };

    let rename_at = args.iter().position(|arg| arg == RENAME_FLAG);

    let renamed_artifact = match rename_at {
        Some(i) => Some(args.get(i + 1).cloned().ok_or_else(|| {
            Error::validation_missing_argument(vec![RENAME_FLAG.to_string()])
                .with_hint(format!("Usage: {} <artifact-file-name>", RENAME_FLAG))
        })?),
        None => None,
    };

    let remaining: Vec<&String> = args
        .iter()
        .enumerate()
        .filter(|(i, _)| match rename_at {
            Some(at) => *i != at && *i != at + 1,
            None => true,
        })
        .map(|(_, arg)| arg)
        .collect();

    let destination_at = remaining
        .iter()
        .position(|arg| !arg.starts_with(FLAG_PREFIX));

    let destination = destination_at.map(|i| PathBuf::from(remaining[i].as_str()));

    let passthrough = remaining
        .into_iter()
        .enumerate()
        .filter(|(i, _)| Some(*i) != destination_at)
        .map(|(_, arg)| arg.clone())
        .collect();

    Ok(BuildInvocation {
        mode,
        renamed_artifact,
        destination,
        passthrough,
    })
}
