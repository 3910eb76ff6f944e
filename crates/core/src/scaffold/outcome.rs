use crate::{error::Error, modifier::ModifierReport};
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    UpdateAppHost,
    CreateDbContext,
    UpdateProject,
    UpdateAppSettings,
    UpdateProgram,
    UpdateDbContext,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Stage::UpdateAppHost => "update app host",
            Stage::CreateDbContext => "create DbContext",
            Stage::UpdateProject => "update project",
            Stage::UpdateAppSettings => "update appsettings.json",
            Stage::UpdateProgram => "update program",
            Stage::UpdateDbContext => "update DbContext",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct StageOutcome {
    pub stage: Stage,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report: Option<ModifierReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<PathBuf>,
}

impl StageOutcome {
    pub fn done(stage: Stage, message: impl Into<String>) -> Self {
        Self {
            stage,
            success: true,
            message: Some(message.into()),
            report: None,
            created: None,
        }
    }

    pub fn created(stage: Stage, path: PathBuf) -> Self {
        Self {
            stage,
            success: true,
            message: None,
            report: None,
            created: Some(path),
        }
    }

    pub fn from_report(stage: Stage, report: ModifierReport) -> Self {
        Self {
            stage,
            success: report.success(),
            message: None,
            report: Some(report),
            created: None,
        }
    }

    pub fn failed(stage: Stage, error: &Error) -> Self {
        Self {
            stage,
            success: false,
            message: Some(error.to_string()),
            report: None,
            created: None,
        }
    }
}

/// Result of a whole command: every stage that ran, in order
#[derive(Debug, Clone, Default, Serialize)]
pub struct ScaffoldOutcome {
    pub stages: Vec<StageOutcome>,
    /// Non-fatal problems, such as packages that could not be added
    pub warnings: Vec<String>,
}

impl ScaffoldOutcome {
    pub fn push(&mut self, outcome: StageOutcome) {
        self.stages.push(outcome);
    }

    pub fn success(&self) -> bool {
        self.stages.iter().all(|s| s.success)
    }

    pub fn stage(&self, stage: Stage) -> Option<&StageOutcome> {
        self.stages.iter().find(|s| s.stage == stage)
    }
}
