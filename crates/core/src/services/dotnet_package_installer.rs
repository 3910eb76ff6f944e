//! Package installation through the `dotnet` CLI

use crate::{
    error::{Error, Result},
    interfaces::PackageInstaller,
};
use std::path::Path;
use std::process::Command;
use tracing::{debug, info};

/// Runs `dotnet add <project> package <name> [--prerelease]`
#[derive(Debug, Clone)]
pub struct DotnetPackageInstaller {
    program: String,
}

impl Default for DotnetPackageInstaller {
    fn default() -> Self {
        Self::new()
    }
}

impl DotnetPackageInstaller {
    pub fn new() -> Self {
        Self {
            program: "dotnet".to_string(),
        }
    }

    /// Use a different executable, e.g. a pinned SDK path
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn command(&self, project_file: &Path, package: &str, prerelease: bool) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.arg("add")
            .arg(project_file)
            .arg("package")
            .arg(package);
        if prerelease {
            cmd.arg("--prerelease");
        }
        cmd
    }
}

impl PackageInstaller for DotnetPackageInstaller {
    fn add_package(&self, project_file: &Path, package: &str, prerelease: bool) -> Result<()> {
        info!("Adding package {} to {}", package, project_file.display());
        let mut cmd = self.command(project_file, package, prerelease);
        debug!("Running: {:?}", cmd);

        let output = cmd.output().map_err(|e| {
            Error::PackageError(format!("Failed to run '{}': {e}", self.program))
        })?;

        if !output.status.success() {
            return Err(Error::PackageError(format!(
                "'{package}' could not be added to {}: {}",
                project_file.display(),
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        Ok(())
    }
}
