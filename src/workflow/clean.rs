use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use crate::error::AppResult;

/// Deletes every regular file directly inside `dir`, returning how many went.
///
/// Subdirectories and their contents are left alone; a missing `dir` is a no-op.
pub fn clean_directory(dir: &Path) -> AppResult<usize> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(0),
        Err(err) => return Err(err.into()),
    };

    let mut removed = 0;
    for entry in entries {
        let entry = entry?;
        if entry.file_type()?.is_dir() {
            continue;
        }
        fs::remove_file(entry.path())?;
        tracing::debug!("Removed {}", entry.path().display());
        removed += 1;
    }
    Ok(removed)
}
