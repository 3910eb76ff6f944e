use crate::{
    binder::bind,
    error::Result,
    utils::{ensure_cs_extension, unique_file_path},
};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

const DB_CONTEXT_TEMPLATE: &str = include_str!("../../resources/NewDbContext.cs.template");

pub fn render_db_context(class_name: &str) -> Result<String> {
    bind(DB_CONTEXT_TEMPLATE, &[class_name])
}

/// Create `<class_name>.cs` in `directory`, numbering the file name if it is taken
pub fn write_db_context(directory: &Path, class_name: &str) -> Result<PathBuf> {
    let contents = render_db_context(class_name)?;
    let path = unique_file_path(&directory.join(ensure_cs_extension(class_name)));

    let mut file = OpenOptions::new().write(true).create_new(true).open(&path)?;
    file.write_all(contents.as_bytes())?;

    info!("Created {}", path.display());
    Ok(path)
}
