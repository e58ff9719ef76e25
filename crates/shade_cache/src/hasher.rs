//! Dependency-aware source fingerprinting.
//!
//! A fingerprint covers a source file and everything it transitively imports,
//! so that touching a shared module invalidates every shader built on top of
//! it.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use shade_common::{absolutize, Fingerprint, FingerprintBuilder};
use shade_source::{scan_imports, ModuleResolver};

use crate::error::CacheError;

/// Computes transitive content fingerprints.
///
/// The digest absorbs the root file's bytes, then the bytes of each imported
/// module, visited depth-first in the order the `import` statements appear.
/// Every file is absorbed at most once, which makes cycles and diamonds
/// terminate. Imports that resolve to no file are ignored.
#[derive(Debug, Clone)]
pub struct DependencyHasher {
    resolver: ModuleResolver,
}

/// Traversal state for one fingerprint computation.
struct Walk<'a> {
    resolver: &'a ModuleResolver,
    visited: HashSet<PathBuf>,
    digest: FingerprintBuilder,
}

impl DependencyHasher {
    /// Creates a hasher resolving imports with `resolver`.
    pub fn new(resolver: ModuleResolver) -> Self {
        Self { resolver }
    }

    /// Computes the fingerprint of `path` and its import closure.
    ///
    /// Fails with [`CacheError::FileMissing`] if the file or any resolved
    /// import cannot be read.
    pub fn fingerprint(&self, path: &Path) -> Result<Fingerprint, CacheError> {
        let cwd = std::env::current_dir().unwrap_or_default();
        let mut walk = Walk {
            resolver: &self.resolver,
            visited: HashSet::new(),
            digest: FingerprintBuilder::new(),
        };
        walk.visit(absolutize(path, &cwd), &cwd)?;
        Ok(walk.digest.finish())
    }
}

impl Walk<'_> {
    fn visit(&mut self, path: PathBuf, cwd: &Path) -> Result<(), CacheError> {
        if !self.visited.insert(path.clone()) {
            return Ok(());
        }

        let bytes = std::fs::read(&path).map_err(|e| CacheError::FileMissing {
            path: path.clone(),
            source: e,
        })?;
        self.digest.update(&bytes);

        let text = String::from_utf8_lossy(&bytes);
        for module in scan_imports(&text) {
            match self.resolver.resolve(module) {
                Some(found) => self.visit(absolutize(&found, cwd), cwd)?,
                None => log::debug!(
                    "unresolved import '{module}' in {} ignored",
                    path.display()
                ),
            }
        }
        Ok(())
    }
}
