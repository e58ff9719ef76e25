//! Source-level views of shading-language files.
//!
//! This crate understands exactly two textual patterns: `import a.b.c;`
//! statements and the `// [moe(...)]` stage annotation. It also resolves
//! module names against the configured include directories and enumerates the
//! source files a build should consider.

#![warn(missing_docs)]

pub mod discover;
pub mod resolver;
pub mod scan;
pub mod stages;

pub use discover::discover_sources;
pub use resolver::ModuleResolver;
pub use scan::{find_stage_annotation, scan_imports};
pub use stages::{parse_stage_list, stages_for};
