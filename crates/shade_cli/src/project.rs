//! Shared helpers for resolving the build description.

use std::path::Path;

use shade_config::BuildDescription;

/// Loads the build description for `config`, resolving a relative path
/// against the current working directory.
pub fn load_project(config: &Path) -> Result<BuildDescription, Box<dyn std::error::Error>> {
    let cwd = std::env::current_dir()?;
    let desc = shade_config::load_description(config, &cwd);
    log::debug!(
        "root {}, output {}, {} include dirs",
        desc.root_dir.display(),
        desc.output_dir.display(),
        desc.include_dirs.len()
    );
    Ok(desc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn config_directory_becomes_root() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("shaders.json");
        fs::write(&config, r#"{"output_dir": "out"}"#).unwrap();

        let desc = load_project(&config).unwrap();
        assert_eq!(desc.root_dir, dir.path());
        assert_eq!(desc.output_dir, dir.path().join("out"));
    }
}
