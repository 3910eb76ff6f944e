use super::template::bind;
use crate::{
    error::{Error, Result},
    impl_case_insensitive_enum,
};
use std::collections::BTreeMap;

/// Names a config entry can bind into a template slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Param {
    DbName,
    AddDbMethod,
    DbType,
    AddDbContextMethod,
    DbContextName,
    UseDbMethod,
    ProjectReference,
    ModelName,
    DbSetName,
}

impl_case_insensitive_enum!(
    Param,
    DbName => "db_name",
    AddDbMethod => "add_db_method",
    DbType => "db_type",
    AddDbContextMethod => "add_db_context_method",
    DbContextName => "db_context_name",
    UseDbMethod => "use_db_method",
    ProjectReference => "project_reference",
    ModelName => "model_name",
    DbSetName => "db_set_name"
);

/// Values available to one modification run.
///
/// Built up front and read-only while edits are applied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParameterContext {
    values: BTreeMap<Param, String>,
}

impl ParameterContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of this context with `param` set to `value`
    pub fn with(mut self, param: Param, value: impl Into<String>) -> Self {
        self.values.insert(param, value.into());
        self
    }

    pub fn get(&self, param: Param) -> Option<&str> {
        self.values.get(&param).map(String::as_str)
    }

    /// Values for `params`, in order
    pub fn values_for(&self, params: &[Param]) -> Result<Vec<&str>> {
        params
            .iter()
            .map(|param| {
                self.get(*param).ok_or_else(|| {
                    Error::BindingError(format!("no value supplied for `{param}`"))
                })
            })
            .collect()
    }

    pub fn render(&self, template: &str, params: &[Param]) -> Result<String> {
        let values = self.values_for(params)?;
        bind(template, &values)
    }
}
