//! Lexical path helpers.

use std::path::{Component, Path, PathBuf};

/// Joins `path` onto `base` (unless already absolute) and removes `.` and `..`
/// components lexically, without touching the filesystem.
///
/// Symlinks are not resolved, so two spellings of the same file through
/// different symlinks stay distinct.
pub fn absolutize(path: &Path, base: &Path) -> PathBuf {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    };

    let mut out = PathBuf::new();
    for component in joined.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    out.push(component);
                }
            }
            other => out.push(other),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_joined_onto_base() {
        let p = absolutize(Path::new("shaders/common"), Path::new("/proj"));
        assert_eq!(p, PathBuf::from("/proj/shaders/common"));
    }

    #[test]
    fn absolute_kept() {
        let p = absolutize(Path::new("/opt/inc"), Path::new("/proj"));
        assert_eq!(p, PathBuf::from("/opt/inc"));
    }

    #[test]
    fn dots_removed() {
        let p = absolutize(Path::new("./a/../b/./c"), Path::new("/proj/x"));
        assert_eq!(p, PathBuf::from("/proj/x/b/c"));
        let up = absolutize(Path::new("../out"), Path::new("/proj/x"));
        assert_eq!(up, PathBuf::from("/proj/out"));
    }
}
