//! Package installation interface

use crate::error::Result;
use std::path::Path;

/// Trait for adding a package reference to a project file
pub trait PackageInstaller: Send + Sync {
    fn add_package(&self, project_file: &Path, package: &str, prerelease: bool) -> Result<()>;
}
