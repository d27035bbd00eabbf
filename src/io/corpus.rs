//! Directory listing for image corpora

use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// List the regular files directly inside `directory`, sorted by path
///
/// Subdirectories are not descended into. A missing or unreadable directory
/// yields an empty list and a warning instead of an error, so extraction over
/// it produces empty samples.
pub fn corpus_files(directory: &Path) -> Vec<PathBuf> {
    let entries = match std::fs::read_dir(directory) {
        Ok(entries) => entries,
        Err(e) => {
            warn!("Failed to read directory {}: {e}", directory.display());
            return Vec::new();
        }
    };

    let mut files: Vec<PathBuf> = entries
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| path.is_file())
        .collect();

    // Directory iteration order is platform dependent
    files.sort();

    debug!("Found {} files in {}", files.len(), directory.display());
    files
}
