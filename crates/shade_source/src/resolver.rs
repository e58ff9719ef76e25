//! Module-name to source-file resolution across include directories.

use std::path::{Path, PathBuf};

use shade_common::SOURCE_EXTENSION;

/// Locates the source file behind a dotted module name.
///
/// For a module `a.b.c` each include directory `dir` is searched, in configured
/// order, for `dir/a/b/c.slang` and then `dir/a/b/c/c.slang`. The first
/// existing file wins.
#[derive(Debug, Clone)]
pub struct ModuleResolver {
    include_dirs: Vec<PathBuf>,
}

impl ModuleResolver {
    /// Creates a resolver over the given include directories. Order is
    /// preserved and significant.
    pub fn new(include_dirs: Vec<PathBuf>) -> Self {
        Self { include_dirs }
    }

    /// Resolves `module_name` to a source file path.
    ///
    /// Returns `None` when no include directory contains a match. That is an
    /// unresolved import (for example a module the compiler itself provides),
    /// not an error.
    pub fn resolve(&self, module_name: &str) -> Option<PathBuf> {
        let segments: Vec<&str> = module_name.split('.').collect();
        if segments.iter().any(|s| s.is_empty()) {
            return None;
        }
        let basename = segments[segments.len() - 1];
        let relative: PathBuf = segments.iter().collect();

        self.include_dirs.iter().find_map(|dir| {
            let flat = with_source_extension(&dir.join(&relative));
            if flat.is_file() {
                return Some(flat);
            }
            let nested = with_source_extension(&dir.join(&relative).join(basename));
            nested.is_file().then_some(nested)
        })
    }
}

/// Appends `.slang` to the final component without replacing any existing
/// dotted suffix.
fn with_source_extension(path: &Path) -> PathBuf {
    let mut s = path.as_os_str().to_owned();
    s.push(".");
    s.push(SOURCE_EXTENSION);
    PathBuf::from(s)
}
