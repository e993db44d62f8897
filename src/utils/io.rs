//! File I/O primitives with consistent error handling.

use std::fs::{self, File, FileTimes};
use std::io;
use std::path::{Path, PathBuf};

/// Copy `source` over `destination` atomically (copy to a sibling temp, then rename).
///
/// Permission bits and access/modification times of the source are carried
/// over. Readers of `destination` see either the old file or the complete new
/// one. On error the temp file is removed and `destination` is left as it was.
pub fn copy_file_atomic(source: &Path, destination: &Path) -> io::Result<u64> {
    let tmp_path = temp_sibling(destination)?;

    match copy_with_times(source, &tmp_path)
        .and_then(|bytes| fs::rename(&tmp_path, destination).map(|_| bytes))
    {
        Ok(bytes) => Ok(bytes),
        Err(e) => {
            let _ = fs::remove_file(&tmp_path);
            Err(e)
        }
    }
}

fn copy_with_times(source: &Path, target: &Path) -> io::Result<u64> {
    let mut reader = File::open(source)?;
    let metadata = reader.metadata()?;

    let mut times = FileTimes::new();
    if let Ok(modified) = metadata.modified() {
        times = times.set_modified(modified);
    }
    if let Ok(accessed) = metadata.accessed() {
        times = times.set_accessed(accessed);
    }

    let bytes = {
        let mut writer = File::create(target)?;
        let bytes = io::copy(&mut reader, &mut writer)?;
        writer.set_times(times)?;
        bytes
    };

    // Applied last so a read-only source still produces a writable temp above.
    fs::set_permissions(target, metadata.permissions())?;

    Ok(bytes)
}

fn temp_sibling(path: &Path) -> io::Result<PathBuf> {
    let filename = path.file_name().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("Invalid path: {}", path.display()),
        )
    })?;
    let parent = path.parent().unwrap_or_else(|| Path::new("."));

    Ok(parent.join(format!(".{}.tmp", filename.to_string_lossy())))
}
