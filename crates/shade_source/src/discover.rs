//! Source file enumeration across include directories.

use std::path::PathBuf;

use shade_common::SOURCE_EXTENSION;
use walkdir::WalkDir;

/// Recursively collects every `.slang` file under the include directories.
///
/// Directories are walked in configured order and entries within a directory
/// in file-name order. A file reachable from several include directories is
/// listed once, at its first occurrence. Unreadable directories are skipped,
/// and so are paths that are not valid UTF-8: manifest keys and artifact names
/// are derived from the path text.
pub fn discover_sources(include_dirs: &[PathBuf]) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = Vec::new();

    for dir in include_dirs {
        let walker = WalkDir::new(dir).sort_by_file_name().into_iter();
        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    log::debug!("skipping unreadable entry under {}: {e}", dir.display());
                    continue;
                }
            };
            if !entry.file_type().is_file() || !has_source_extension(entry.path()) {
                continue;
            }
            if entry.path().to_str().is_none() {
                log::warn!(
                    "skipping {}: path is not valid UTF-8",
                    entry.path().display()
                );
                continue;
            }
            let path = entry.into_path();
            if !files.contains(&path) {
                files.push(path);
            }
        }
    }

    files
}

fn has_source_extension(path: &std::path::Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .and_then(|n| n.strip_suffix(SOURCE_EXTENSION))
        .is_some_and(|stem| stem.ends_with('.'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn finds_nested_sources_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("post")).unwrap();
        fs::write(root.join("mesh.slang"), "").unwrap();
        fs::write(root.join("post/bloom.slang"), "").unwrap();
        fs::write(root.join("readme.md"), "").unwrap();
        fs::write(root.join("notes.slang.bak"), "").unwrap();

        let files = discover_sources(&[root.to_path_buf()]);
        assert_eq!(
            files,
            vec![root.join("mesh.slang"), root.join("post/bloom.slang")]
        );
    }

    #[test]
    fn overlapping_include_dirs_deduplicated() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("common")).unwrap();
        fs::write(root.join("common/util.slang"), "").unwrap();
        fs::write(root.join("main.slang"), "").unwrap();

        let files = discover_sources(&[root.join("common"), root.to_path_buf()]);
        assert_eq!(
            files,
            vec![root.join("common/util.slang"), root.join("main.slang")]
        );
    }

    #[test]
    fn missing_dir_yields_nothing() {
        let files = discover_sources(&[PathBuf::from("/nonexistent/shaders")]);
        assert!(files.is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn non_utf8_paths_are_skipped() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        for raw in [&b"sub\xff"[..], &b"sub\xfe"[..]] {
            let sub = root.join(OsStr::from_bytes(raw));
            fs::create_dir_all(&sub).unwrap();
            fs::write(sub.join("a.slang"), "").unwrap();
        }
        fs::write(root.join("ok.slang"), "").unwrap();

        let files = discover_sources(&[root.to_path_buf()]);
        assert_eq!(files, vec![root.join("ok.slang")]);
    }
}
