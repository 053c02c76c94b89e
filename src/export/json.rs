//! JSON snapshot of a study set, review states included.
//! Saves and loads StudySet structures to/from JSON files.

use crate::error::Result;
use crate::models::StudySet;
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Exports a study set to a JSON file at the specified path.
/// Missing parent directories are created. The snapshot is written to a
/// sibling temp file and renamed over `path`, so a failed write leaves the
/// previous file intact.
pub fn export_json_to_path(study_set: &StudySet, path: &Path) -> Result<()> {
    let parent = match path.parent().filter(|p| !p.as_os_str().is_empty()) {
        Some(parent) => {
            fs::create_dir_all(parent)?;
            parent
        }
        None => Path::new("."),
    };
    let json_string = serde_json::to_string_pretty(study_set)?;

    let mut file = NamedTempFile::new_in(parent)?;
    file.write_all(json_string.as_bytes())?;
    file.as_file().sync_all()?;
    file.persist(path).map_err(|err| err.error)?;

    tracing::info!(
        "Study set '{}' saved to '{}'",
        study_set.title,
        path.display()
    );
    Ok(())
}

/// Imports a study set from a JSON file.
/// Fails if the file doesn't exist, contains invalid JSON, or stores a
/// non-finite ease factor.
pub fn import_json(path: &Path) -> Result<StudySet> {
    let contents = fs::read_to_string(path)?;
    let study_set: StudySet = serde_json::from_str(&contents)?;

    tracing::info!(
        "Study set '{}' loaded from '{}' ({} items)",
        study_set.title,
        path.display(),
        study_set.items().count()
    );
    Ok(study_set)
}
