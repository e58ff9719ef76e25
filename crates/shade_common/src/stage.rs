//! Pipeline stages a shader source can participate in.

use std::fmt;
use std::str::FromStr;

/// A pipeline phase a shader source participates in.
///
/// Each stage carries the suffix used in output filenames and the entry-point
/// function name passed to the compiler.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Stage {
    /// Vertex shader stage.
    Vertex,
    /// Fragment (pixel) shader stage.
    Fragment,
    /// Compute shader stage.
    Compute,
    /// Geometry shader stage.
    Geometry,
}

impl Stage {
    /// Every known stage, in table order.
    pub const ALL: [Stage; 4] = [
        Stage::Vertex,
        Stage::Fragment,
        Stage::Compute,
        Stage::Geometry,
    ];

    /// The stage name as it appears in metadata annotations and on the
    /// compiler command line.
    pub fn name(self) -> &'static str {
        match self {
            Stage::Vertex => "vertex",
            Stage::Fragment => "fragment",
            Stage::Compute => "compute",
            Stage::Geometry => "geometry",
        }
    }

    /// Suffix inserted into output filenames (`<base>.<suffix>.<target>`).
    pub fn suffix(self) -> &'static str {
        match self {
            Stage::Vertex => "vert",
            Stage::Fragment => "frag",
            Stage::Compute => "comp",
            Stage::Geometry => "geom",
        }
    }

    /// Entry-point function the compiler is asked to compile for this stage.
    pub fn entry_point(self) -> &'static str {
        match self {
            Stage::Vertex => "vertexMain",
            Stage::Fragment => "fragmentMain",
            Stage::Compute => "computeMain",
            Stage::Geometry => "geometryMain",
        }
    }

    /// Looks up a stage by its exact name, returning `None` for unknown names.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.name() == name)
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when a string is not a known stage name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown shader stage '{0}'")]
pub struct UnknownStage(pub String);

impl FromStr for Stage {
    type Err = UnknownStage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| UnknownStage(s.to_string()))
    }
}
