//! Declarative edit configuration: which text goes where, under which conditions

use crate::{
    binder::Param,
    error::{Error, Result},
    impl_case_insensitive_enum,
    utils::serde_helpers::{deserialize_ordered_map, serialize_ordered_map},
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A named set of file edits applied together by one modification run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditConfig {
    pub identifier: String,
    #[serde(default)]
    pub files: Vec<FileEdit>,
}

impl EditConfig {
    pub fn new(identifier: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            files: Vec::new(),
        }
    }

    /// Parse and validate a configuration document
    pub fn from_json(json: &str) -> Result<Self> {
        let config: EditConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.identifier.trim().is_empty() {
            return Err(Error::ConfigError("identifier must not be empty".to_string()));
        }
        for file in &self.files {
            if file.file_name.trim().is_empty() {
                return Err(Error::ConfigError(format!(
                    "{}: file entry without file_name",
                    self.identifier
                )));
            }
            for (scope, changes) in &file.methods {
                if let Some(change) = changes.code_changes.iter().find(|c| c.block.is_empty()) {
                    return Err(Error::ConfigError(format!(
                        "{}: empty block in {} scope {scope} (parent {:?})",
                        self.identifier, file.file_name, change.parent
                    )));
                }
            }
        }
        Ok(())
    }

    pub fn file(&self, file_name: &str) -> Option<&FileEdit> {
        self.files
            .iter()
            .find(|f| f.file_name.eq_ignore_ascii_case(file_name))
    }

    /// Copy of this config with `file` appended; the original is left untouched
    pub fn with_file(&self, file: FileEdit) -> Self {
        let mut files = self.files.clone();
        files.push(file);
        Self {
            identifier: self.identifier.clone(),
            files,
        }
    }
}

/// Edits targeting one source file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileEdit {
    pub file_name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<Condition>,
    /// Namespaces the file must import
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub usings: Vec<String>,
    /// Statement edits keyed by scope name, in document order
    #[serde(
        default,
        deserialize_with = "deserialize_ordered_map",
        serialize_with = "serialize_ordered_map",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub methods: Vec<(String, MethodChanges)>,
    /// Members appended to `class_name`, or to the class named after the file
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub class_properties: Vec<MemberSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
}

impl FileEdit {
    pub fn new(file_name: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            ..Default::default()
        }
    }

    /// Class receiving `class_properties`
    pub fn target_class(&self) -> &str {
        match &self.class_name {
            Some(name) => name,
            None => self
                .file_name
                .strip_suffix(".cs")
                .unwrap_or(&self.file_name),
        }
    }

    pub fn change_count(&self) -> usize {
        self.methods
            .iter()
            .map(|(_, m)| m.code_changes.len())
            .sum::<usize>()
            + self.class_properties.len()
            + self.usings.len()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodChanges {
    #[serde(default)]
    pub code_changes: Vec<ChangeSpec>,
}

/// One statement-level edit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeSpec {
    /// Template text, with `{N}` placeholders filled from `block_args`
    pub block: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub block_args: Vec<Param>,
    /// Anchor pattern; without one the edit lands at the top of the scope
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parent_args: Vec<Param>,
    #[serde(default)]
    pub insert: InsertPosition,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<Condition>,
}

/// A member declaration added to a class body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberSpec {
    pub block: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub block_args: Vec<Param>,
}

/// Where rendered text goes relative to the anchor statement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InsertPosition {
    Before,
    #[default]
    After,
    Replace,
    /// Appended to the anchor's expression, just before its `;`
    Chain,
}

impl_case_insensitive_enum!(
    InsertPosition,
    Before => "before",
    After => "after",
    Replace => "replace",
    Chain => "chain"
);

/// Project properties a config entry can be gated on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeOption {
    TopLevelStatements,
    MinimalApp,
    EfScenario,
}

impl_case_insensitive_enum!(
    ChangeOption,
    TopLevelStatements => "toplevelstatements",
    MinimalApp => "minimalapp",
    EfScenario => "efscenario"
);

/// `MinimalApp` or `!MinimalApp`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Condition {
    pub option: ChangeOption,
    pub negated: bool,
}

impl Condition {
    pub fn requires(option: ChangeOption) -> Self {
        Self {
            option,
            negated: false,
        }
    }

    pub fn excludes(option: ChangeOption) -> Self {
        Self {
            option,
            negated: true,
        }
    }

    pub fn holds(&self, active: bool) -> bool {
        active != self.negated
    }
}

impl FromStr for Condition {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let s = s.trim();
        match s.strip_prefix('!') {
            Some(rest) => rest.parse().map(Self::excludes),
            None => s.parse().map(Self::requires),
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self.option {
            ChangeOption::TopLevelStatements => "TopLevelStatements",
            ChangeOption::MinimalApp => "MinimalApp",
            ChangeOption::EfScenario => "EfScenario",
        };
        if self.negated {
            write!(f, "!{name}")
        } else {
            f.write_str(name)
        }
    }
}

impl Serialize for Condition {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Condition {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
