//! Locating the submission file

use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;

use crate::error::{GermsError, Result};

/// Find the single file with the given extension directly inside `dir`
pub fn locate_submission(dir: &Path, extension: &str) -> Result<PathBuf> {
    let mut candidates: Vec<PathBuf> = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| path.extension().is_some_and(|ext| ext == extension))
        .collect();
    candidates.sort();

    match candidates.len() {
        0 => Err(GermsError::NoSubmissionFound {
            dir: dir.to_path_buf(),
            extension: extension.to_string(),
        }),
        1 => {
            let path = candidates.remove(0);
            debug!(path = %path.display(), "located submission");
            Ok(path)
        }
        _ => Err(GermsError::AmbiguousSubmission {
            dir: dir.to_path_buf(),
            extension: extension.to_string(),
            candidates: candidates
                .iter()
                .filter_map(|p| p.file_name())
                .map(|name| name.to_string_lossy().into_owned())
                .collect::<Vec<_>>()
                .join(", "),
        }),
    }
}

/// Use `path` directly if it is a file, otherwise search it as a directory
pub fn resolve_submission(path: &Path, extension: &str) -> Result<PathBuf> {
    if path.is_dir() {
        locate_submission(path, extension)
    } else {
        Ok(path.to_path_buf())
    }
}
