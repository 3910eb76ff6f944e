//! dbwire - Wire database dependencies into existing C# projects
//!
//! This crate provides functionality to:
//! - Parse C# source files and detect the regions edits can target
//! - Classify a project's authoring style (top-level statements, minimal hosting)
//! - Apply declarative edit configs by splicing text at matched statements
//! - Scaffold database resources, DbContext classes and their registrations
pub mod analysis;
pub mod binder;
pub mod config;
pub mod error;
pub mod interfaces;
pub mod modifier;
pub mod parser;
pub mod providers;
pub mod resolver;
pub mod scaffold;
pub mod services;
pub mod types;
pub mod utils;
pub mod writer;

// Re-export commonly used types and traits
pub use error::{Error, Result, ValidationError};
pub use types::*;

// Re-export main API components
pub use analysis::{Project, ProjectReferences, ProjectStyle, SourceFile, StyleFacts};
pub use binder::{Param, ParameterContext};
pub use config::{ConfigCatalog, EditConfig, Scenario};
pub use interfaces::{PackageInstaller, SourceDiscovery};
pub use modifier::{CodeChangeOptions, ModifierReport, ProjectModifier};
pub use providers::DatabaseProvider;
pub use scaffold::{
    DatabaseScaffolder, DatabaseSettings, DbContextScaffolder, DbContextSettings, ScaffoldOutcome,
};
pub use services::{DotnetPackageInstaller, FileSystemDiscovery};
