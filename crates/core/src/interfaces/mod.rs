//! Collaborator interfaces
//!
//! The engine reaches the file system layout of a project and the package
//! manager of the target ecosystem only through these traits.

pub mod package_installer;
pub mod source_discovery;

pub use package_installer::PackageInstaller;
pub use source_discovery::SourceDiscovery;
