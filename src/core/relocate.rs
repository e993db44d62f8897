//! Copies the built artifact from the mode directory to the caller's destination.

use serde::Serialize;
use std::fs;
use std::path::{Component, Path, PathBuf};

use crate::error::{Error, Result};
use crate::invocation::BuildInvocation;
use crate::paths;
use crate::utils::io;

/// Resolved source and destination for one copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelocationPlan {
    pub source: PathBuf,
    pub destination: PathBuf,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RelocationReport {
    pub source: String,
    pub destination: String,
    pub bytes: u64,
}

/// Work out what to copy where. Only reads metadata; nothing is written.
///
/// Returns `None` when no destination was given. Run this before the build so
/// an unusable destination is reported before anything is started.
pub fn plan(
    invocation: &BuildInvocation,
    base_dir: &Path,
    caller_dir: &Path,
) -> Result<Option<RelocationPlan>> {
    let Some(destination) = &invocation.destination else {
        return Ok(None);
    };

    let destination = paths::absolutize(destination, caller_dir);

    let filename = invocation
        .renamed_artifact
        .clone()
        .or_else(|| {
            destination
                .file_name()
                .map(|name| name.to_string_lossy().to_string())
        })
        .ok_or_else(|| {
            Error::validation_invalid_argument(
                "destination",
                "Destination has no file name; pass --rename <NAME> to name the artifact",
                Some(destination.to_string_lossy().to_string()),
            )
        })?;
    let artifact = artifact_path(&filename)?;

    let source = base_dir.join(invocation.mode.dir_name()).join(artifact);

    let destination = resolve_link(destination);

    // cp semantics: an existing directory receives the file under its own name.
    let destination = if destination.is_dir() {
        match artifact.file_name() {
            Some(name) => destination.join(name),
            None => destination,
        }
    } else {
        destination
    };

    Ok(Some(RelocationPlan {
        source,
        destination,
    }))
}

/// The artifact name must stay inside the mode directory.
fn artifact_path(filename: &str) -> Result<&Path> {
    let path = Path::new(filename);
    let mut has_name = false;
    for component in path.components() {
        match component {
            Component::Normal(_) => has_name = true,
            Component::CurDir => {}
            Component::RootDir | Component::Prefix(_) | Component::ParentDir => {
                return Err(invalid_artifact_name(filename));
            }
        }
    }

    if has_name {
        Ok(path)
    } else {
        Err(invalid_artifact_name(filename))
    }
}

fn invalid_artifact_name(filename: &str) -> Error {
    Error::validation_invalid_argument(
        "rename",
        "Artifact name must be a relative path inside the build output directory",
        Some(filename.to_string()),
    )
}

/// Follow a destination symlink so the copy writes through it, like `cp`.
/// Dangling links are left as they are and get replaced.
fn resolve_link(destination: PathBuf) -> PathBuf {
    let is_link = fs::symlink_metadata(&destination)
        .map(|meta| meta.file_type().is_symlink())
        .unwrap_or(false);

    if is_link {
        fs::canonicalize(&destination).unwrap_or(destination)
    } else {
        destination
    }
}

/// Copy the artifact. The destination is replaced atomically.
pub fn execute(plan: &RelocationPlan) -> Result<RelocationReport> {
    let source = plan.source.to_string_lossy().to_string();
    let destination = plan.destination.to_string_lossy().to_string();

    if !plan.source.is_file() {
        return Err(Error::relocate_source_missing(source, destination));
    }

    let bytes = io::copy_file_atomic(&plan.source, &plan.destination)
        .map_err(|e| Error::relocate_copy_failed(&source, &destination, e.to_string()))?;

    log_status!("relocate", "Copied {} -> {} ({} bytes)", source, destination, bytes);

    Ok(RelocationReport {
        source,
        destination,
        bytes,
    })
}
