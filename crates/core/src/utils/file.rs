use crate::error::{Error, Result};
use std::io::Write;
use std::path::{Path, PathBuf};

/// `name` with a `.cs` suffix, added only when missing
pub fn ensure_cs_extension(name: &str) -> String {
    let name = name.trim();
    if name.to_lowercase().ends_with(".cs") {
        name.to_string()
    } else {
        format!("{name}.cs")
    }
}

/// First of `Name.cs`, `Name1.cs`, `Name2.cs`, ... that does not exist yet
pub fn unique_file_path(path: &Path) -> PathBuf {
    if !path.exists() {
        return path.to_path_buf();
    }

    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let extension = path
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default();

    (1u32..)
        .map(|n| path.with_file_name(format!("{stem}{n}{extension}")))
        .find(|candidate| !candidate.exists())
        .unwrap_or_else(|| path.to_path_buf())
}

/// Replace `path` with `contents` through a temp file in the same directory
pub fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));

    let mut temp = tempfile::NamedTempFile::new_in(dir)?;
    temp.write_all(contents.as_bytes())?;
    temp.flush()?;
    temp.persist(path).map_err(|e| Error::IoError(e.error))?;
    Ok(())
}
