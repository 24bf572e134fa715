use std::path::Path;

use crate::error::AppResult;
use crate::workflow::clean::clean_directory;

pub fn run(dir: &Path) -> AppResult<()> {
    let removed = clean_directory(dir)?;
    tracing::debug!("Removed {removed} files from {}", dir.display());
    println!("Cleaned the '{}' directory.", dir.display());
    Ok(())
}
