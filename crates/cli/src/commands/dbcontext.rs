use anyhow::{Context, Result};
use dbwire_core::{
    ConfigCatalog, DbContextScaffolder, DbContextSettings, DotnetPackageInstaller,
    FileSystemDiscovery,
};
use tracing::debug;

pub fn dbcontext_command(settings: DbContextSettings, json: bool) -> Result<i32> {
    debug!("dbcontext: {:?}", settings);

    let catalog = ConfigCatalog::load().context("Bundled edit configs are invalid")?;
    let discovery = FileSystemDiscovery::new();
    let installer = DotnetPackageInstaller::new();

    let result = DbContextScaffolder::new(&catalog, &discovery, &installer).run(&settings);
    super::finish(result, json)
}
