use crate::error::{Error, Result};
use std::env;
use std::path::{Path, PathBuf};

/// Default name of the build driver script inside the base directory.
pub const BUILD_SCRIPT_NAME: &str = "cargo.sh";

/// Base directory for the build and for artifact lookup.
///
/// An explicit override wins (made absolute against the caller's directory);
/// otherwise the directory holding the running executable.
pub fn resolve_base_dir(override_dir: Option<&Path>, caller_dir: &Path) -> Result<PathBuf> {
    if let Some(dir) = override_dir {
        return Ok(absolutize(dir, caller_dir));
    }

    let exe = env::current_exe().map_err(|e| {
        Error::internal_io(e.to_string(), Some("get current executable path".to_string()))
    })?;

    exe.parent().map(Path::to_path_buf).ok_or_else(|| {
        Error::internal_unexpected(format!(
            "Executable path has no parent directory: {}",
            exe.display()
        ))
    })
}

/// Working directory of the process at startup.
pub fn caller_dir() -> Result<PathBuf> {
    env::current_dir().map_err(|e| {
        Error::internal_io(e.to_string(), Some("get current directory".to_string()))
    })
}

/// Default build driver script for a base directory.
pub fn build_script(base_dir: &Path) -> PathBuf {
    base_dir.join(BUILD_SCRIPT_NAME)
}

/// Join `path` onto `against` unless it is already absolute.
pub fn absolutize(path: &Path, against: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        against.join(path)
    }
}
