use super::{
    ScaffoldOutcome, Stage, StageOutcome, entity::write_db_context, existing_project,
    install_packages,
};
use crate::{
    analysis::{Project, ProjectReferences, ProjectStyle},
    binder::Param,
    config::{ConfigCatalog, Scenario},
    error::{Result, ValidationError},
    interfaces::{PackageInstaller, SourceDiscovery},
    modifier::{CodeChangeOptions, ModifierReport, ProjectModifier},
    providers::DatabaseProvider,
};
use std::path::{Path, PathBuf};
use tracing::{error, info};

/// Raw inputs of the `database` command
#[derive(Debug, Clone, Default)]
pub struct DatabaseSettings {
    pub provider: Option<String>,
    pub app_host_project: Option<PathBuf>,
    pub project: Option<PathBuf>,
    pub prerelease: bool,
    pub skip_install: bool,
}

/// Inputs that passed validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseRequest {
    pub provider: DatabaseProvider,
    pub app_host_project: PathBuf,
    pub project: PathBuf,
}

impl DatabaseSettings {
    pub fn validate(&self) -> std::result::Result<DatabaseRequest, ValidationError> {
        let provider = self
            .provider
            .as_deref()
            .and_then(|p| p.parse::<DatabaseProvider>().ok())
            .ok_or_else(|| ValidationError::InvalidProvider {
                valid_options: DatabaseProvider::valid_options(),
            })?;
        let app_host_project = existing_project(self.app_host_project.as_deref())
            .ok_or(ValidationError::InvalidAppHostProject)?;
        let project =
            existing_project(self.project.as_deref()).ok_or(ValidationError::InvalidProject)?;

        Ok(DatabaseRequest {
            provider,
            app_host_project,
            project,
        })
    }
}

/// Wires a database resource into an orchestration host and the project that consumes it
pub struct DatabaseScaffolder<'a> {
    catalog: &'a ConfigCatalog,
    discovery: &'a dyn SourceDiscovery,
    installer: &'a dyn PackageInstaller,
}

impl<'a> DatabaseScaffolder<'a> {
    pub fn new(
        catalog: &'a ConfigCatalog,
        discovery: &'a dyn SourceDiscovery,
        installer: &'a dyn PackageInstaller,
    ) -> Self {
        Self {
            catalog,
            discovery,
            installer,
        }
    }

    /// Validate, add packages, then run every stage even when an earlier one fails
    pub fn run(&self, settings: &DatabaseSettings) -> Result<ScaffoldOutcome> {
        let request = settings.validate()?;
        let properties = request.provider.properties();
        info!(
            "Adding {} to {} and {}",
            request.provider,
            request.app_host_project.display(),
            request.project.display()
        );

        let mut outcome = ScaffoldOutcome::default();
        if !settings.skip_install {
            install_packages(
                self.installer,
                &[
                    (request.app_host_project.as_path(), properties.app_host_package),
                    (request.project.as_path(), properties.project_package),
                ],
                settings.prerelease,
                &mut outcome,
            );
        }

        outcome.push(match self.update_app_host(&request) {
            Ok(report) => StageOutcome::from_report(Stage::UpdateAppHost, report),
            Err(e) => {
                error!("Updating the app host failed: {e}");
                StageOutcome::failed(Stage::UpdateAppHost, &e)
            }
        });

        let project_dir = request
            .project
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or(Path::new("."));
        outcome.push(match write_db_context(project_dir, properties.db_context_name) {
            Ok(path) => StageOutcome::created(Stage::CreateDbContext, path),
            Err(e) => {
                error!("Creating the DbContext failed: {e}");
                StageOutcome::failed(Stage::CreateDbContext, &e)
            }
        });

        outcome.push(match self.update_project(&request) {
            Ok(report) => StageOutcome::from_report(Stage::UpdateProject, report),
            Err(e) => {
                error!("Updating the project failed: {e}");
                StageOutcome::failed(Stage::UpdateProject, &e)
            }
        });

        Ok(outcome)
    }

    fn update_app_host(&self, request: &DatabaseRequest) -> Result<ModifierReport> {
        let project = Project::discover(&request.app_host_project, self.discovery)?;
        let units = project.load_units();
        let references = ProjectReferences::discover(&units);
        let options = CodeChangeOptions::from(ProjectStyle::from_units(&units));

        let reference = references.reference_for(&request.project);
        info!("Referencing {} as {}", request.project.display(), reference);
        let context = request
            .provider
            .properties()
            .parameters()
            .with(Param::ProjectReference, reference);

        ProjectModifier::new(&project, self.catalog.get(Scenario::DbAppHost), &context, options)
            .run()
    }

    fn update_project(&self, request: &DatabaseRequest) -> Result<ModifierReport> {
        let project = Project::discover(&request.project, self.discovery)?;
        let units = project.load_units();
        let options = CodeChangeOptions::from(ProjectStyle::from_units(&units));
        let context = request.provider.properties().parameters();

        ProjectModifier::new(&project, self.catalog.get(Scenario::DbWebApi), &context, options)
            .run()
    }
}
