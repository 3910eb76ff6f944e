use crate::{
    analysis::ProjectStyle,
    config::{ChangeOption, Condition},
};
use serde::Serialize;

/// Which gated config entries apply to the current run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct CodeChangeOptions {
    pub top_level_statements: bool,
    pub minimal_app: bool,
    pub ef_scenario: bool,
}

impl CodeChangeOptions {
    pub fn with_ef_scenario(mut self, enabled: bool) -> Self {
        self.ef_scenario = enabled;
        self
    }

    pub fn is_active(&self, option: ChangeOption) -> bool {
        match option {
            ChangeOption::TopLevelStatements => self.top_level_statements,
            ChangeOption::MinimalApp => self.minimal_app,
            ChangeOption::EfScenario => self.ef_scenario,
        }
    }

    /// Every condition holds; an empty list always does
    pub fn satisfies(&self, conditions: &[Condition]) -> bool {
        conditions.iter().all(|c| c.holds(self.is_active(c.option)))
    }
}

impl From<ProjectStyle> for CodeChangeOptions {
    fn from(style: ProjectStyle) -> Self {
        Self {
            top_level_statements: style.top_level_statements,
            minimal_app: style.minimal_app,
            ef_scenario: false,
        }
    }
}
