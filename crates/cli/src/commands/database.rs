use anyhow::{Context, Result};
use dbwire_core::{
    ConfigCatalog, DatabaseScaffolder, DatabaseSettings, DotnetPackageInstaller,
    FileSystemDiscovery,
};
use tracing::debug;

pub fn database_command(settings: DatabaseSettings, json: bool) -> Result<i32> {
    debug!("database: {:?}", settings);

    let catalog = ConfigCatalog::load().context("Bundled edit configs are invalid")?;
    let discovery = FileSystemDiscovery::new();
    let installer = DotnetPackageInstaller::new();

    let result = DatabaseScaffolder::new(&catalog, &discovery, &installer).run(&settings);
    super::finish(result, json)
}
