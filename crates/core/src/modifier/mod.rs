//! Applying an edit config to a project

mod options;
mod project_modifier;
mod report;

pub use options::CodeChangeOptions;
pub use project_modifier::ProjectModifier;
pub use report::{FileOutcome, ModifierReport};
