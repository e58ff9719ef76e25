//! Removal of build outputs.

use std::path::Path;

use shade_cache::MANIFEST_FILE;
use shade_common::TargetFormat;
use walkdir::WalkDir;

use crate::error::BuildError;

/// Deletes every compiled artifact and the manifest under `output_dir`, then
/// removes directories left empty, including `output_dir` itself.
///
/// Files the build did not produce are left alone, and so are the directories
/// that contain them. Returns the number of files removed; a missing output
/// directory removes nothing.
pub fn clean_outputs(output_dir: &Path) -> Result<usize, BuildError> {
    if !output_dir.exists() {
        return Ok(0);
    }

    let io_err = |path: &Path, source| BuildError::Io {
        path: path.to_path_buf(),
        source,
    };

    let mut removed = 0;
    for entry in WalkDir::new(output_dir).contents_first(true) {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(output_dir).to_path_buf();
            BuildError::Io {
                path,
                source: e.into(),
            }
        })?;
        let path = entry.path();

        if entry.file_type().is_dir() {
            let is_empty = std::fs::read_dir(path)
                .map_err(|e| io_err(path, e))?
                .next()
                .is_none();
            if is_empty {
                std::fs::remove_dir(path).map_err(|e| io_err(path, e))?;
            }
        } else if is_build_output(entry.file_name().to_str().unwrap_or_default()) {
            std::fs::remove_file(path).map_err(|e| io_err(path, e))?;
            removed += 1;
        }
    }

    log::debug!("removed {removed} files from {}", output_dir.display());
    Ok(removed)
}

fn is_build_output(file_name: &str) -> bool {
    file_name == MANIFEST_FILE
        || TargetFormat::ALL
            .iter()
            .any(|t| t.matches_file_name(file_name))
}
