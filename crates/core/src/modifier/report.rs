use serde::Serialize;
use std::path::PathBuf;

/// What happened to one configured file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileOutcome {
    pub file_name: String,
    /// Absent when no matching file exists in the project
    pub path: Option<PathBuf>,
    pub applied: usize,
    /// One reason per edit that could not be placed
    pub skipped: Vec<String>,
}

impl FileOutcome {
    pub fn new(file_name: impl Into<String>, path: PathBuf) -> Self {
        Self {
            file_name: file_name.into(),
            path: Some(path),
            applied: 0,
            skipped: Vec::new(),
        }
    }

    pub fn missing(file_name: impl Into<String>) -> Self {
        let file_name = file_name.into();
        Self {
            skipped: vec![format!("{file_name} not found in project")],
            file_name,
            path: None,
            applied: 0,
        }
    }

    pub fn success(&self) -> bool {
        self.path.is_some() && self.skipped.is_empty()
    }
}

/// Per-file results of one modification run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ModifierReport {
    pub identifier: String,
    pub files: Vec<FileOutcome>,
}

impl ModifierReport {
    /// True when every processed file succeeded; a run that touched no file counts as success
    pub fn success(&self) -> bool {
        self.files.iter().all(FileOutcome::success)
    }

    pub fn applied(&self) -> usize {
        self.files.iter().map(|f| f.applied).sum()
    }

    pub fn skipped(&self) -> impl Iterator<Item = &str> {
        self.files
            .iter()
            .flat_map(|f| f.skipped.iter().map(String::as_str))
    }
}
