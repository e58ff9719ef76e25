//! Build manifest that records the fingerprint each task was last built from.
//!
//! The manifest is stored as `.shader_cached.json` in the output directory: a
//! flat JSON object from task key to hex fingerprint. It is loaded once at the
//! start of a build and replaced once at the end with entries for exactly the
//! tasks that built or were skipped in that run.

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};
use shade_common::{Fingerprint, Stage, TargetFormat};

use crate::error::CacheError;

/// Name of the manifest file within the output directory.
pub const MANIFEST_FILE: &str = ".shader_cached.json";

/// Separator between the fields of a [`TaskKey`].
const KEY_SEPARATOR: &str = "::";

/// Manifest key identifying one (source path, stage, target) task.
///
/// Encoded as `<path>::<stage>::<target>`. Stage and target names never
/// contain `:`, so a key splits unambiguously from the right even when the
/// path itself contains `::`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskKey(String);

impl TaskKey {
    /// Builds the key for a task. `path` is expected to be valid UTF-8;
    /// source discovery drops paths that are not.
    pub fn new(path: &Path, stage: Stage, target: TargetFormat) -> Self {
        Self(format!(
            "{}{KEY_SEPARATOR}{}{KEY_SEPARATOR}{}",
            path.display(),
            stage.name(),
            target.name()
        ))
    }

    /// Returns the encoded key.
    pub fn as_str(&self) -> &str {
        &self.0
    }

}

impl fmt::Display for TaskKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Persisted map from task key to the fingerprint of its last successful
/// build.
///
/// Values are kept as strings so that entries written by other versions of
/// the tool survive a load/save cycle untouched. Entries are ordered by key,
/// which keeps the file byte-stable across runs with the same inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BuildManifest {
    entries: BTreeMap<String, String>,
}

impl BuildManifest {
    /// Creates an empty manifest.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads the manifest from the output directory.
    ///
    /// This is fail-safe: a missing, unreadable or corrupt file results in an
    /// empty manifest, triggering a full rebuild.
    pub fn load(output_dir: &Path) -> Self {
        let path = output_dir.join(MANIFEST_FILE);
        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(_) => return Self::new(),
        };
        match serde_json::from_str(&content) {
            Ok(manifest) => manifest,
            Err(e) => {
                log::warn!("ignoring corrupt manifest {}: {e}", path.display());
                Self::new()
            }
        }
    }

    /// Saves the manifest into the output directory, replacing any previous
    /// file atomically.
    ///
    /// The JSON is written to a sibling temporary file first and renamed over
    /// the manifest, so a crash never leaves a truncated manifest behind.
    /// Creates the output directory if it doesn't exist.
    pub fn save(&self, output_dir: &Path) -> Result<(), CacheError> {
        std::fs::create_dir_all(output_dir).map_err(|e| CacheError::Io {
            path: output_dir.to_path_buf(),
            source: e,
        })?;
        let json = serde_json::to_string_pretty(self).map_err(|e| CacheError::Serialization {
            reason: e.to_string(),
        })?;

        let path = output_dir.join(MANIFEST_FILE);
        let tmp = output_dir.join(format!("{MANIFEST_FILE}.tmp"));
        std::fs::write(&tmp, json).map_err(|e| CacheError::Io {
            path: tmp.clone(),
            source: e,
        })?;
        std::fs::rename(&tmp, &path).map_err(|e| CacheError::Io { path, source: e })
    }

    /// Returns the recorded fingerprint for `key`, if any.
    pub fn get(&self, key: &TaskKey) -> Option<&str> {
        self.entries.get(key.as_str()).map(String::as_str)
    }

    /// Returns `true` if `key` was last built from exactly `fingerprint`.
    pub fn matches(&self, key: &TaskKey, fingerprint: &Fingerprint) -> bool {
        self.get(key)
            .is_some_and(|recorded| recorded == fingerprint.to_string())
    }

    /// Records the fingerprint a task was built (or verified) from.
    pub fn record(&mut self, key: TaskKey, fingerprint: Fingerprint) {
        self.entries.insert(key.0, fingerprint.to_string());
    }

    /// Returns `true` if the manifest has an entry for `key`.
    pub fn contains(&self, key: &TaskKey) -> bool {
        self.entries.contains_key(key.as_str())
    }

    /// Number of recorded tasks.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no task is recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over `(key, fingerprint)` pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn key(path: &str) -> TaskKey {
        TaskKey::new(Path::new(path), Stage::Vertex, TargetFormat::Spirv)
    }

    #[test]
    fn key_encoding() {
        let k = TaskKey::new(
            Path::new("/shaders/mesh.slang"),
            Stage::Fragment,
            TargetFormat::Glsl,
        );
        assert_eq!(k.as_str(), "/shaders/mesh.slang::fragment::glsl");
    }

    #[test]
    fn separator_in_path_keeps_fixed_suffix() {
        let k = TaskKey::new(
            Path::new("/odd::dir/a.slang"),
            Stage::Compute,
            TargetFormat::Spirv,
        );
        let (rest, target) = k.as_str().rsplit_once("::").unwrap();
        let (path, stage) = rest.rsplit_once("::").unwrap();
        assert_eq!((path, stage, target), ("/odd::dir/a.slang", "compute", "spirv"));
    }

    #[test]
    fn distinct_tasks_distinct_keys() {
        let path = Path::new("/s/a.slang");
        let mut keys = Vec::new();
        for stage in Stage::ALL {
            for target in TargetFormat::ALL {
                keys.push(TaskKey::new(path, stage, target));
            }
        }
        let count = keys.len();
        keys.sort();
        keys.dedup();
        assert_eq!(keys.len(), count);
    }

    #[test]
    fn record_and_match() {
        let mut m = BuildManifest::new();
        let fp = Fingerprint::from_bytes(b"a");
        m.record(key("/s/a.slang"), fp);
        assert!(m.matches(&key("/s/a.slang"), &fp));
        assert!(!m.matches(&key("/s/a.slang"), &Fingerprint::from_bytes(b"b")));
        assert!(!m.matches(&key("/s/other.slang"), &fp));
    }

    #[test]
    fn save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let mut m = BuildManifest::new();
        m.record(key("/s/a.slang"), Fingerprint::from_bytes(b"a"));
        m.record(key("/s/b.slang"), Fingerprint::from_bytes(b"b"));
        m.save(dir.path()).unwrap();

        let loaded = BuildManifest::load(dir.path());
        assert_eq!(loaded, m);
        assert!(!dir.path().join(".shader_cached.json.tmp").exists());
    }

    #[test]
    fn file_is_a_flat_string_map() {
        let dir = tempfile::tempdir().unwrap();
        let mut m = BuildManifest::new();
        let fp = Fingerprint::from_bytes(b"a");
        m.record(key("/s/a.slang"), fp);
        m.save(dir.path()).unwrap();

        let raw = std::fs::read_to_string(dir.path().join(MANIFEST_FILE)).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        let obj = value.as_object().unwrap();
        assert_eq!(obj.len(), 1);
        assert_eq!(
            obj["/s/a.slang::vertex::spirv"],
            serde_json::Value::String(fp.to_string())
        );
    }

    #[test]
    fn save_is_byte_stable() {
        let dir = tempfile::tempdir().unwrap();
        let mut m = BuildManifest::new();
        m.record(key("/s/z.slang"), Fingerprint::from_bytes(b"z"));
        m.record(key("/s/a.slang"), Fingerprint::from_bytes(b"a"));
        m.save(dir.path()).unwrap();
        let first = std::fs::read(dir.path().join(MANIFEST_FILE)).unwrap();

        BuildManifest::load(dir.path()).save(dir.path()).unwrap();
        let second = std::fs::read(dir.path().join(MANIFEST_FILE)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn foreign_entries_survive_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(MANIFEST_FILE),
            r#"{"legacy-key": "not-a-digest"}"#,
        )
        .unwrap();
        let m = BuildManifest::load(dir.path());
        assert_eq!(m.len(), 1);
        assert_eq!(m.iter().next(), Some(("legacy-key", "not-a-digest")));
    }

    #[test]
    fn load_nonexistent_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        assert!(BuildManifest::load(dir.path()).is_empty());
        assert!(BuildManifest::load(&PathBuf::from("/nonexistent/out")).is_empty());
    }

    #[test]
    fn load_corrupt_json_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(MANIFEST_FILE), "not valid json {{{").unwrap();
        assert!(BuildManifest::load(dir.path()).is_empty());
    }

    #[test]
    fn load_non_string_values_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(MANIFEST_FILE), r#"{"k": 1}"#).unwrap();
        assert!(BuildManifest::load(dir.path()).is_empty());
    }

    #[test]
    fn save_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("deeply").join("nested").join("out");
        BuildManifest::new().save(&nested).unwrap();
        assert!(nested.join(MANIFEST_FILE).exists());
    }
}
