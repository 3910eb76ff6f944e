use anyhow::Result;
use clap::{Parser, Subcommand};
use dbwire_core::{DatabaseSettings, DbContextSettings};
use std::path::PathBuf;

use crate::commands::{analyze_command, database_command, dbcontext_command};

#[derive(Parser, Debug)]
#[command(name = "dbwire")]
#[command(version, about, long_about = None)]
#[command(after_help = "ENVIRONMENT:\n    RUST_LOG=debug    Enable debug logging")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Add a database resource to an app host and wire it into a project
    Database {
        /// Database provider: postgres, sqlserver, sqlite or cosmosdb
        #[arg(long = "type", value_name = "PROVIDER")]
        provider: Option<String>,

        /// Orchestration host project (.csproj)
        #[arg(long = "apphost-project", value_name = "CSPROJ")]
        app_host_project: Option<PathBuf>,

        /// Project that consumes the database (.csproj)
        #[arg(long, value_name = "CSPROJ")]
        project: Option<PathBuf>,

        /// Allow prerelease package versions
        #[arg(long)]
        prerelease: bool,

        /// Do not add package references
        #[arg(long)]
        skip_install: bool,

        /// Print the outcome as JSON
        #[arg(long)]
        json: bool,
    },
    /// Create or extend an Entity Framework DbContext in a web project
    #[command(name = "dbcontext")]
    DbContext {
        /// Database provider: postgres, sqlserver, sqlite or cosmosdb
        #[arg(long = "type", value_name = "PROVIDER")]
        provider: Option<String>,

        /// Web project to update (.csproj)
        #[arg(long, value_name = "CSPROJ")]
        project: Option<PathBuf>,

        /// DbContext class name (defaults to the provider's name)
        #[arg(long)]
        context: Option<String>,

        /// Entity to expose as a DbSet, e.g. Shop.Models.Product
        #[arg(long)]
        model: Option<String>,

        /// Allow prerelease package versions
        #[arg(long)]
        prerelease: bool,

        /// Do not add package references
        #[arg(long)]
        skip_install: bool,

        /// Print the outcome as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the editable regions and style facts of a C# file
    #[command(visible_alias = "a")]
    Analyze {
        /// Path to the C# file
        filepath: PathBuf,

        /// Print the analysis as JSON
        #[arg(long)]
        json: bool,
    },
}

impl Cli {
    /// Run the selected command and return the process exit code
    pub fn execute(self) -> Result<i32> {
        match self.command {
            Commands::Database {
                provider,
                app_host_project,
                project,
                prerelease,
                skip_install,
                json,
            } => database_command(
                DatabaseSettings {
                    provider,
                    app_host_project,
                    project,
                    prerelease,
                    skip_install,
                },
                json,
            ),
            Commands::DbContext {
                provider,
                project,
                context,
                model,
                prerelease,
                skip_install,
                json,
            } => dbcontext_command(
                DbContextSettings {
                    provider,
                    project,
                    context,
                    model,
                    prerelease,
                    skip_install,
                },
                json,
            ),
            Commands::Analyze { filepath, json } => analyze_command(&filepath, json),
        }
    }
}
