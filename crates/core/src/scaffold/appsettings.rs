use crate::{
    error::{Error, Result},
    utils::write_atomic,
};
use serde_json::{Map, Value};
use std::path::Path;
use tracing::{debug, info};

pub const APP_SETTINGS_FILE: &str = "appsettings.json";
const CONNECTION_STRINGS: &str = "ConnectionStrings";

/// Add `ConnectionStrings:<name>` to the project's settings unless it is already set.
///
/// Existing keys keep their order. Returns whether the file changed.
pub fn ensure_connection_string(project_dir: &Path, name: &str, value: &str) -> Result<bool> {
    let path = project_dir.join(APP_SETTINGS_FILE);
    let mut document = if path.is_file() {
        serde_json::from_str(&std::fs::read_to_string(&path)?)?
    } else {
        Value::Object(Map::new())
    };

    let root = document
        .as_object_mut()
        .ok_or_else(|| Error::ConfigError(format!("{} is not a JSON object", path.display())))?;
    let section = root
        .entry(CONNECTION_STRINGS)
        .or_insert_with(|| Value::Object(Map::new()))
        .as_object_mut()
        .ok_or_else(|| {
            Error::ConfigError(format!(
                "{CONNECTION_STRINGS} in {} is not an object",
                path.display()
            ))
        })?;

    if section.contains_key(name) {
        debug!("Connection string '{name}' already present in {}", path.display());
        return Ok(false);
    }
    section.insert(name.to_string(), Value::String(value.to_string()));

    let mut text = serde_json::to_string_pretty(&document)?;
    text.push('\n');
    write_atomic(&path, &text)?;
    info!("Added connection string '{name}' to {}", path.display());
    Ok(true)
}
