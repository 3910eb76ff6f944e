//! File system source discovery
//!
//! Walks the directory of a project file and collects its `.cs` units.

use crate::{error::Result, interfaces::SourceDiscovery};
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// Build output that never holds sources we want to read or edit
const SKIPPED_DIRS: &[&str] = &["bin", "node_modules", "TestResults"];

/// Default implementation of SourceDiscovery using walkdir
#[derive(Debug, Default, Clone, Copy)]
pub struct FileSystemDiscovery;

impl FileSystemDiscovery {
    pub fn new() -> Self {
        Self
    }
}

impl SourceDiscovery for FileSystemDiscovery {
    fn source_units(&self, project_file: &Path) -> Result<Vec<PathBuf>> {
        let root = project_file
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or(Path::new("."));

        let mut units = Vec::new();
        for entry in WalkDir::new(root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| e.depth() == 0 || !is_skipped_dir(e))
        {
            let entry = entry.map_err(|e| {
                e.into_io_error()
                    .unwrap_or_else(|| std::io::Error::other("directory walk failed"))
            })?;
            if entry.file_type().is_file()
                && entry.path().extension().and_then(|s| s.to_str()) == Some("cs")
            {
                units.push(entry.into_path());
            }
        }

        Ok(units)
    }
}

fn is_skipped_dir(entry: &DirEntry) -> bool {
    if !entry.file_type().is_dir() {
        return false;
    }
    let name = entry.file_name().to_str().unwrap_or("");
    if name.starts_with('.') || SKIPPED_DIRS.contains(&name) {
        return true;
    }
    // A nested project owns its own sources
    has_project_file(entry.path())
}

fn has_project_file(dir: &Path) -> bool {
    std::fs::read_dir(dir)
        .map(|entries| {
            entries.filter_map(|e| e.ok()).any(|e| {
                e.path().extension().and_then(|s| s.to_str()) == Some("csproj")
            })
        })
        .unwrap_or(false)
}
