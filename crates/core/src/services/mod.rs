//! Service implementations for the collaborator interfaces

pub mod dotnet_package_installer;
pub mod filesystem_discovery;

pub use dotnet_package_installer::DotnetPackageInstaller;
pub use filesystem_discovery::FileSystemDiscovery;
