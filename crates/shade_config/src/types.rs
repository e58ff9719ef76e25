//! Configuration types: the raw JSON file and the resolved build description.

use std::path::PathBuf;

use serde::Deserialize;

/// Name of the output directory used when the configuration does not set one.
pub const DEFAULT_OUTPUT_DIR: &str = "bin_shaders";

/// The raw contents of `shaders.json`. Every key is optional and unknown keys
/// are ignored.
#[derive(Debug, Default, Deserialize)]
pub struct ConfigFile {
    /// Include directories, relative to the configuration's root directory.
    #[serde(default)]
    pub include_dirs: Option<Vec<String>>,
    /// Output directory, relative to the configuration's root directory.
    #[serde(default)]
    pub output_dir: Option<String>,
    /// Override for the compiler program name.
    #[serde(default)]
    pub compiler: Option<String>,
    /// Override for the validator program name.
    #[serde(default)]
    pub validator: Option<String>,
}

/// External tools and their fixed option sets.
///
/// Built once per process and passed by reference to the build and validation
/// schedulers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toolchain {
    /// Shader compiler program.
    pub compiler: String,
    /// Profile passed with `-profile`.
    pub profile: String,
    /// Options appended to every compiler invocation.
    pub compiler_options: Vec<String>,
    /// Binary-artifact validator program.
    pub validator: String,
    /// Options passed to every validator invocation, before the artifact path.
    pub validator_options: Vec<String>,
}

impl Default for Toolchain {
    fn default() -> Self {
        Self {
            compiler: "slangc".to_string(),
            profile: "glsl_450".to_string(),
            compiler_options: vec![
                "-fvk-use-scalar-layout".to_string(),
                "-matrix-layout-column-major".to_string(),
            ],
            validator: "spirv-val".to_string(),
            validator_options: vec![
                "--target-env".to_string(),
                "vulkan1.3".to_string(),
                "--scalar-block-layout".to_string(),
            ],
        }
    }
}

/// The fully resolved configuration for one invocation.
///
/// All paths are absolute. `include_dirs` keeps the configured order, which
/// decides both module resolution and output-path derivation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildDescription {
    /// Directory relative paths in the configuration are resolved against.
    pub root_dir: PathBuf,
    /// Ordered include directories.
    pub include_dirs: Vec<PathBuf>,
    /// Directory receiving compiled artifacts and the manifest.
    pub output_dir: PathBuf,
    /// External tools.
    pub toolchain: Toolchain,
}

impl BuildDescription {
    /// The built-in defaults for a given root: the root itself as the only
    /// include directory and `<root>/bin_shaders` as output.
    pub fn with_defaults(root_dir: PathBuf) -> Self {
        Self {
            include_dirs: vec![root_dir.clone()],
            output_dir: root_dir.join(DEFAULT_OUTPUT_DIR),
            root_dir,
            toolchain: Toolchain::default(),
        }
    }
}
