use super::source_file::SourceFile;
use crate::{
    error::{Error, Result},
    interfaces::SourceDiscovery,
};
use serde::Serialize;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, warn};

/// Conventional name of the file holding a project's entry code
pub const ENTRY_FILE: &str = "Program.cs";

/// A project file and the source units discovered next to it
#[derive(Debug, Clone)]
pub struct Project {
    project_file: PathBuf,
    units: Vec<PathBuf>,
}

impl Project {
    pub fn discover(project_file: &Path, discovery: &dyn SourceDiscovery) -> Result<Self> {
        if !project_file.is_file() {
            return Err(Error::FileNotFound(project_file.to_path_buf()));
        }
        let units = discovery.source_units(project_file)?;
        debug!(
            "Discovered {} source units for {}",
            units.len(),
            project_file.display()
        );
        Ok(Self {
            project_file: project_file.to_path_buf(),
            units,
        })
    }

    pub fn project_file(&self) -> &Path {
        &self.project_file
    }

    pub fn directory(&self) -> &Path {
        self.project_file
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or(Path::new("."))
    }

    /// Project name as MSBuild derives it: the project file stem
    pub fn name(&self) -> &str {
        self.project_file
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("")
    }

    pub fn units(&self) -> &[PathBuf] {
        &self.units
    }

    /// Best unit named `file_name`: hand-written before generated, shallow before deep
    pub fn find_unit(&self, file_name: &str) -> Option<&Path> {
        self.units
            .iter()
            .filter(|p| {
                p.file_name()
                    .and_then(|n| n.to_str())
                    .is_some_and(|n| n.eq_ignore_ascii_case(file_name))
            })
            .min_by_key(|p| (self.is_generated(p), p.components().count(), (*p).clone()))
            .map(PathBuf::as_path)
    }

    /// Sources under `obj/` are produced by the build, not written by hand
    pub fn is_generated(&self, unit: &Path) -> bool {
        unit.strip_prefix(self.directory())
            .unwrap_or(unit)
            .components()
            .any(|c| matches!(c, Component::Normal(name) if name == "obj"))
    }

    /// Parse every unit for fact discovery; units that cannot be read are left out
    pub fn load_units(&self) -> Vec<SourceFile> {
        self.units
            .iter()
            .filter_map(|path| match SourceFile::load(path) {
                Ok(unit) => Some(unit),
                Err(e) => {
                    warn!("Skipping {}: {}", path.display(), e);
                    None
                }
            })
            .collect()
    }
}

/// Style of a whole project, used to gate config entries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ProjectStyle {
    pub top_level_statements: bool,
    pub minimal_app: bool,
}

impl ProjectStyle {
    pub fn from_units(units: &[SourceFile]) -> Self {
        let entry = units
            .iter()
            .find(|u| u.file_name().eq_ignore_ascii_case(ENTRY_FILE))
            .or_else(|| units.iter().find(|u| u.facts().top_level_statements));

        Self {
            top_level_statements: entry.is_some_and(|u| u.facts().top_level_statements),
            minimal_app: units.iter().all(|u| u.facts().minimal_setup),
        }
    }
}
