use anyhow::{Result, bail};
use dbwire_core::SourceFile;
use std::path::Path;
use tracing::debug;

use crate::commands::exit_code;
use crate::display::print_analysis;

pub fn analyze_command(filepath: &Path, json: bool) -> Result<i32> {
    debug!("Analyzing file: {}", filepath.display());

    if !filepath.is_file() {
        bail!("File not found: {}", filepath.display());
    }

    let file = SourceFile::load(filepath)?;
    let regions = file.regions()?;
    print_analysis(&file, &regions, json)?;

    Ok(exit_code::SUCCESS)
}
