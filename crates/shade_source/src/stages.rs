//! Stage extraction from the in-file `// [moe(...)]` annotation.

use std::path::Path;

use shade_common::Stage;

use crate::scan::find_stage_annotation;

/// Returns the pipeline stages a source file declares.
///
/// Reads the file, finds the first stage annotation and keeps the entries that
/// name known stages. An unreadable file, a missing annotation, or a list of
/// only unknown names all yield an empty list; the file then produces no
/// tasks.
pub fn stages_for(path: &Path) -> Vec<Stage> {
    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) => {
            log::debug!("cannot read {} for stage metadata: {e}", path.display());
            return Vec::new();
        }
    };
    let text = String::from_utf8_lossy(&bytes);

    match find_stage_annotation(&text) {
        Some(list) => parse_stage_list(list),
        None => {
            log::debug!("no stage annotation in {}", path.display());
            Vec::new()
        }
    }
}

/// Parses the inside of a stage annotation: a comma-separated list whose
/// entries may be quoted with `"` or `'` and padded with whitespace.
///
/// Unknown entries are dropped. Duplicates are dropped after their first
/// occurrence so every (file, stage) pair appears once.
pub fn parse_stage_list(list: &str) -> Vec<Stage> {
    let unquoted: String = list.chars().filter(|c| *c != '"' && *c != '\'').collect();

    let mut stages = Vec::new();
    for entry in unquoted.split(',').map(str::trim) {
        match Stage::from_name(entry) {
            Some(stage) if !stages.contains(&stage) => stages.push(stage),
            Some(_) => {}
            None if entry.is_empty() => {}
            None => log::debug!("ignoring unknown stage '{entry}'"),
        }
    }
    stages
}
