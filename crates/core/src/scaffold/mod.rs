//! End-to-end pipelines behind the `database` and `dbcontext` commands

mod appsettings;
mod database;
mod db_context;
mod entity;
mod outcome;

pub use appsettings::{APP_SETTINGS_FILE, ensure_connection_string};
pub use database::{DatabaseRequest, DatabaseScaffolder, DatabaseSettings};
pub use db_context::{DbContextRequest, DbContextScaffolder, DbContextSettings, ModelRef};
pub use entity::{render_db_context, write_db_context};
pub use outcome::{ScaffoldOutcome, Stage, StageOutcome};

use crate::{interfaces::PackageInstaller, utils::text::is_identifier};
use std::path::{Path, PathBuf};
use tracing::warn;

/// An existing `.csproj` file, or `None`
fn existing_project(path: Option<&Path>) -> Option<PathBuf> {
    path.filter(|p| p.is_file())
        .filter(|p| {
            p.extension()
                .is_some_and(|e| e.eq_ignore_ascii_case("csproj"))
        })
        .map(Path::to_path_buf)
}

fn valid_identifier(name: Option<&str>) -> Option<String> {
    name.map(str::trim).filter(|n| is_identifier(n)).map(str::to_string)
}

/// Add each package, logging failures instead of stopping
fn install_packages(
    installer: &dyn PackageInstaller,
    packages: &[(&Path, &str)],
    prerelease: bool,
    outcome: &mut ScaffoldOutcome,
) {
    for (project_file, package) in packages {
        if let Err(e) = installer.add_package(project_file, package, prerelease) {
            warn!("{e}");
            outcome.warnings.push(e.to_string());
        }
    }
}
