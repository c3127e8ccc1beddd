//! Artifact naming and lookup on durable storage.
//!
//! Uploaded files are stored as `<file_id>_<original_name>.docx`. Derived
//! artifacts (`_corrected`, `_restructured`, `_backup`) reuse the file id so
//! the original is never overwritten.

use std::path::{Path, PathBuf};

use crate::error::DocxError;

/// Leading uuid-style id of a stored artifact, if the name carries one.
pub fn file_id(path: &Path) -> Option<String> {
    let stem = path.file_stem()?.to_str()?;
    let (id, rest) = stem.split_once('_')?;
    if id.is_empty() || rest.is_empty() {
        return None;
    }
    Some(id.to_string())
}

/// Path for a derived artifact next to the original, e.g. suffix
/// `"corrected"` yields `<file_id>_corrected.docx`.
pub fn derived_path(original: &Path, suffix: &str) -> PathBuf {
    let dir = original.parent().unwrap_or_else(|| Path::new("."));
    let name = match file_id(original) {
        Some(id) => format!("{id}_{suffix}.docx"),
        None => {
            let stem = original
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("document");
            format!("{suffix}_{stem}.docx")
        }
    };
    dir.join(name)
}

/// Find the stored artifact for a file id, preferring the uploaded original
/// over derived artifacts.
pub fn find_by_id(dir: &Path, id: &str) -> Result<PathBuf, DocxError> {
    let prefix = format!("{id}_");
    let mut derived = None;

    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let name = entry.file_name();
        let Some(name) = name.to_str() else { continue };
        if !name.starts_with(&prefix) {
            continue;
        }
        let is_derived = ["_corrected.docx", "_restructured.docx", "_backup.docx"]
            .iter()
            .any(|s| name.ends_with(s));
        if is_derived {
            derived.get_or_insert(entry.path());
        } else {
            return Ok(entry.path());
        }
    }

    derived.ok_or_else(|| DocxError::NotFound(id.to_string()))
}

/// Every stored artifact for a file id, original and derived alike.
pub fn artifacts_for_id(dir: &Path, id: &str) -> Result<Vec<PathBuf>, DocxError> {
    let prefix = format!("{id}_");
    let mut artifacts = Vec::new();

    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let name = entry.file_name();
        let Some(name) = name.to_str() else { continue };
        if name.starts_with(&prefix) {
            artifacts.push(entry.path());
        }
    }

    Ok(artifacts)
}

/// Byte copy of the original, preserving binary fidelity.
pub fn create_backup(original: &Path) -> Result<PathBuf, DocxError> {
    let backup = derived_path(original, "backup");
    std::fs::copy(original, &backup)?;
    tracing::info!(backup = %backup.display(), "backup created");
    Ok(backup)
}
