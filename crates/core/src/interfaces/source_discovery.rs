//! Source discovery interface
//!
//! Provides abstraction for enumerating the C# compilation units of a project.

use crate::error::Result;
use std::path::{Path, PathBuf};

/// Trait for listing the source units that belong to a project file
pub trait SourceDiscovery: Send + Sync {
    /// All `.cs` files of the project owning `project_file`, in a stable order
    fn source_units(&self, project_file: &Path) -> Result<Vec<PathBuf>>;
}
