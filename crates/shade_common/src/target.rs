//! Output encodings produced from a (source, stage) pair.

use std::fmt;

/// An output encoding the compiler produces.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TargetFormat {
    /// Binary SPIR-V intermediate representation.
    Spirv,
    /// Textual GLSL source.
    Glsl,
}

impl TargetFormat {
    /// Every target format, in the order tasks are generated.
    pub const ALL: [TargetFormat; 2] = [TargetFormat::Spirv, TargetFormat::Glsl];

    /// The name passed to the compiler's target flag.
    pub fn name(self) -> &'static str {
        match self {
            TargetFormat::Spirv => "spirv",
            TargetFormat::Glsl => "glsl",
        }
    }

    /// File extension of produced artifacts (without the dot).
    pub fn suffix(self) -> &'static str {
        match self {
            TargetFormat::Spirv => "spv",
            TargetFormat::Glsl => "glsl",
        }
    }

    /// Returns `true` if `file_name` ends with this format's artifact extension.
    pub fn matches_file_name(self, file_name: &str) -> bool {
        file_name
            .strip_suffix(self.suffix())
            .is_some_and(|rest| rest.ends_with('.'))
    }
}

impl fmt::Display for TargetFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
