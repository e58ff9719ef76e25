//! Configuration file loading with fall-back to defaults.

use std::path::Path;

use shade_common::absolutize;

use crate::error::ConfigError;
use crate::types::{BuildDescription, ConfigFile};

/// Configuration file name used when none is given on the command line.
pub const DEFAULT_CONFIG_FILE: &str = "shaders.json";

/// Loads the build description for `config_path`.
///
/// The root directory is the directory containing `config_path` (resolved
/// against `cwd` when relative). A missing or malformed file logs a warning
/// and yields [`BuildDescription::with_defaults`]; this never fails.
pub fn load_description(config_path: &Path, cwd: &Path) -> BuildDescription {
    let config_path = absolutize(config_path, cwd);
    let root_dir = config_path
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| cwd.to_path_buf());

    let content = match std::fs::read_to_string(&config_path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            log::warn!(
                "build configuration file '{}' not found; using default paths",
                config_path.display()
            );
            return BuildDescription::with_defaults(root_dir);
        }
        Err(e) => {
            log::warn!("{}; using default paths", ConfigError::IoError(e));
            return BuildDescription::with_defaults(root_dir);
        }
    };

    match parse_description(&content, &root_dir) {
        Ok(desc) => desc,
        Err(e) => {
            log::warn!(
                "invalid JSON in '{}' ({e}); using default paths",
                config_path.display()
            );
            BuildDescription::with_defaults(root_dir)
        }
    }
}

/// Parses configuration JSON and resolves it against `root_dir`.
///
/// Useful for testing without filesystem dependencies.
pub fn parse_description(content: &str, root_dir: &Path) -> Result<BuildDescription, ConfigError> {
    let file: ConfigFile =
        serde_json::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;

    let mut desc = BuildDescription::with_defaults(root_dir.to_path_buf());
    if let Some(dirs) = file.include_dirs {
        desc.include_dirs = dirs
            .iter()
            .map(|d| absolutize(Path::new(d), root_dir))
            .collect();
    }
    if let Some(out) = file.output_dir {
        desc.output_dir = absolutize(Path::new(&out), root_dir);
    }
    if let Some(compiler) = file.compiler {
        desc.toolchain.compiler = compiler;
    }
    if let Some(validator) = file.validator {
        desc.toolchain.validator = validator;
    }
    Ok(desc)
}
