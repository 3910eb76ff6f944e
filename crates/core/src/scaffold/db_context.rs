use super::{
    ScaffoldOutcome, Stage, StageOutcome, appsettings::ensure_connection_string,
    entity::write_db_context, existing_project, install_packages, valid_identifier,
};
use crate::{
    analysis::{Project, ProjectStyle, SourceFile},
    binder::{Param, ParameterContext},
    config::{ConfigCatalog, EditConfig, FileEdit, MemberSpec, Scenario},
    error::{Result, ValidationError},
    interfaces::{PackageInstaller, SourceDiscovery},
    modifier::{CodeChangeOptions, ModifierReport, ProjectModifier},
    providers::DatabaseProvider,
    types::RegionKind,
    utils::{
        ensure_cs_extension,
        text::{is_identifier, squash},
    },
};
use std::path::{Path, PathBuf};
use tracing::{error, info};

const DB_SET_TEMPLATE: &str = "public DbSet<{0}> {1} {{ get; set; }} = default!;";

/// Raw inputs of the `dbcontext` command
#[derive(Debug, Clone, Default)]
pub struct DbContextSettings {
    pub provider: Option<String>,
    pub project: Option<PathBuf>,
    /// Context class name; the provider's default when absent
    pub context: Option<String>,
    /// Entity exposed as a `DbSet`, optionally namespace-qualified
    pub model: Option<String>,
    pub prerelease: bool,
    pub skip_install: bool,
}

/// An entity type, split into namespace and simple name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelRef {
    pub namespace: Option<String>,
    pub name: String,
}

impl ModelRef {
    pub fn parse(qualified: &str) -> Option<Self> {
        let qualified = qualified.trim();
        if !qualified.split('.').all(is_identifier) {
            return None;
        }
        Some(match qualified.rsplit_once('.') {
            Some((namespace, name)) => Self {
                namespace: Some(namespace.to_string()),
                name: name.to_string(),
            },
            None => Self {
                namespace: None,
                name: qualified.to_string(),
            },
        })
    }

    /// Conventional collection name: `Products`, `Categories`, `Boxes`
    pub fn db_set_name(&self) -> String {
        pluralize(&self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DbContextRequest {
    pub provider: DatabaseProvider,
    pub project: PathBuf,
    pub context: String,
    pub model: Option<ModelRef>,
}

impl DbContextSettings {
    pub fn validate(&self) -> std::result::Result<DbContextRequest, ValidationError> {
        let provider = self
            .provider
            .as_deref()
            .and_then(|p| p.parse::<DatabaseProvider>().ok())
            .ok_or_else(|| ValidationError::InvalidProvider {
                valid_options: DatabaseProvider::valid_options(),
            })?;
        let project =
            existing_project(self.project.as_deref()).ok_or(ValidationError::InvalidProject)?;
        let context = match self.context.as_deref() {
            Some(name) => {
                valid_identifier(Some(name)).ok_or(ValidationError::InvalidContextName)?
            }
            None => provider.properties().db_context_name.to_string(),
        };
        let model = self
            .model
            .as_deref()
            .map(|m| ModelRef::parse(m).ok_or(ValidationError::InvalidModel))
            .transpose()?;

        Ok(DbContextRequest {
            provider,
            project,
            context,
            model,
        })
    }
}

/// Creates or extends an Entity Framework context in a standalone web project
pub struct DbContextScaffolder<'a> {
    catalog: &'a ConfigCatalog,
    discovery: &'a dyn SourceDiscovery,
    installer: &'a dyn PackageInstaller,
}

impl<'a> DbContextScaffolder<'a> {
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

    pub fn run(&self, settings: &DbContextSettings) -> Result<ScaffoldOutcome> {
        let request = settings.validate()?;
        let properties = request.provider.properties();
        let context_file = ensure_cs_extension(&request.context);

        let project = Project::discover(&request.project, self.discovery)?;
        let exists = project.find_unit(&context_file).is_some();
        let parameters = parameters_for(&request);
        let mut outcome = ScaffoldOutcome::default();

        if exists {
            info!("{} already exists, leaving its registration alone", context_file);
            if request.model.is_none() {
                outcome.push(StageOutcome::done(
                    Stage::CreateDbContext,
                    format!("{context_file} already exists"),
                ));
            }
        } else {
            if !settings.skip_install {
                install_packages(
                    self.installer,
                    &[(request.project.as_path(), properties.ef_package)],
                    settings.prerelease,
                    &mut outcome,
                );
            }

            outcome.push(match write_db_context(project.directory(), &request.context) {
                Ok(path) => StageOutcome::created(Stage::CreateDbContext, path),
                Err(e) => {
                    error!("Creating the DbContext failed: {e}");
                    StageOutcome::failed(Stage::CreateDbContext, &e)
                }
            });

            let connection = properties.connection_string_for(properties.db_name);
            outcome.push(
                match ensure_connection_string(project.directory(), &request.context, &connection) {
                    Ok(true) => StageOutcome::done(Stage::UpdateAppSettings, "connection string added"),
                    Ok(false) => {
                        StageOutcome::done(Stage::UpdateAppSettings, "connection string already set")
                    }
                    Err(e) => {
                        error!("Updating appsettings.json failed: {e}");
                        StageOutcome::failed(Stage::UpdateAppSettings, &e)
                    }
                },
            );

            outcome.push(match self.update_program(&request.project, &parameters) {
                Ok(report) => StageOutcome::from_report(Stage::UpdateProgram, report),
                Err(e) => {
                    error!("Updating the program failed: {e}");
                    StageOutcome::failed(Stage::UpdateProgram, &e)
                }
            });
        }

        if let Some(model) = &request.model {
            outcome.push(
                match self.add_db_set(&request.project, &request.context, model, &parameters) {
                    Ok(Some(report)) => StageOutcome::from_report(Stage::UpdateDbContext, report),
                    Ok(None) => StageOutcome::done(
                        Stage::UpdateDbContext,
                        format!("{} already exposes DbSet<{}>", request.context, model.name),
                    ),
                    Err(e) => {
                        error!("Adding the DbSet failed: {e}");
                        StageOutcome::failed(Stage::UpdateDbContext, &e)
                    }
                },
            );
        }

        Ok(outcome)
    }

    fn update_program(&self, project_file: &Path, parameters: &ParameterContext) -> Result<ModifierReport> {
        let project = Project::discover(project_file, self.discovery)?;
        let units = project.load_units();
        let options = CodeChangeOptions::from(ProjectStyle::from_units(&units)).with_ef_scenario(true);

        ProjectModifier::new(&project, self.catalog.get(Scenario::EfProgram), parameters, options)
            .run()
    }

    fn add_db_set(
        &self,
        project_file: &Path,
        context: &str,
        model: &ModelRef,
        parameters: &ParameterContext,
    ) -> Result<Option<ModifierReport>> {
        // rediscover so a context created earlier in this run is visible
        let project = Project::discover(project_file, self.discovery)?;
        if declares_db_set(&project, context, model)? {
            info!("{} already exposes DbSet<{}>", context, model.name);
            return Ok(None);
        }
        let config = EditConfig::new("ef-dbset").with_file(db_set_edit(context, model));

        ProjectModifier::new(&project, &config, parameters, CodeChangeOptions::default())
            .run()
            .map(Some)
    }
}

fn parameters_for(request: &DbContextRequest) -> ParameterContext {
    let parameters = request
        .provider
        .properties()
        .parameters()
        .with(Param::DbContextName, request.context.as_str());
    match &request.model {
        Some(model) => parameters
            .with(Param::ModelName, model.name.as_str())
            .with(Param::DbSetName, model.db_set_name()),
        None => parameters,
    }
}

/// Whether the `context` class already has a `DbSet` of `model`, qualified or not
fn declares_db_set(project: &Project, context: &str, model: &ModelRef) -> Result<bool> {
    let Some(path) = project.find_unit(&ensure_cs_extension(context)) else {
        return Ok(false);
    };
    let file = SourceFile::load(path)?;
    let regions = file.regions()?;

    Ok(regions
        .iter()
        .filter(|r| r.kind == RegionKind::ClassBody && r.has_name(context))
        .flat_map(|r| &r.items)
        .map(|item| squash(&file.source()[item.span.clone()]))
        .any(|member| {
            member.split("DbSet<").skip(1).any(|rest| {
                rest.split('>')
                    .next()
                    .and_then(|arg| arg.rsplit('.').next())
                    .is_some_and(|name| name == model.name)
            })
        }))
}

fn db_set_edit(context: &str, model: &ModelRef) -> FileEdit {
    let mut edit = FileEdit::new(ensure_cs_extension(context));
    edit.class_name = Some(context.to_string());
    edit.usings = model.namespace.iter().cloned().collect();
    edit.class_properties.push(MemberSpec {
        block: DB_SET_TEMPLATE.to_string(),
        block_args: vec![Param::ModelName, Param::DbSetName],
    });
    edit
}

fn pluralize(name: &str) -> String {
    let lower = name.to_lowercase();
    if let Some(stem) = name.strip_suffix('y') {
        let before_y = stem.chars().last();
        if before_y.is_some_and(|c| !"aeiouAEIOU".contains(c)) {
            return format!("{stem}ies");
        }
    }
    if ["s", "x", "z", "ch", "sh"].iter().any(|s| lower.ends_with(s)) {
        return format!("{name}es");
    }
    format!("{name}s")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::services::FileSystemDiscovery;
    use std::fs;
    use tempfile::TempDir;

    struct NoopInstaller;

    impl PackageInstaller for NoopInstaller {
        fn add_package(&self, _: &Path, _: &str, _: bool) -> Result<()> {
            Ok(())
        }
    }

    fn web_project(temp: &TempDir, program: &str) -> PathBuf {
        let project = temp.path().join("Shop.csproj");
        fs::write(&project, "<Project Sdk=\"Microsoft.NET.Sdk.Web\" />").unwrap();
        fs::write(temp.path().join("Program.cs"), program).unwrap();
        project
    }

    fn settings(project: &Path) -> DbContextSettings {
        DbContextSettings {
            provider: Some("sqlite".to_string()),
            project: Some(project.to_path_buf()),
            context: Some("ShopContext".to_string()),
            model: None,
            prerelease: false,
            skip_install: true,
        }
    }

    #[test]
    fn test_model_ref_and_plurals() {
        let model = ModelRef::parse("Shop.Models.Category").unwrap();
        assert_eq!(model.namespace.as_deref(), Some("Shop.Models"));
        assert_eq!(model.db_set_name(), "Categories");
        assert_eq!(ModelRef::parse("Product").unwrap().db_set_name(), "Products");
        assert_eq!(ModelRef::parse("Box").unwrap().db_set_name(), "Boxes");
        assert_eq!(ModelRef::parse("Day").unwrap().db_set_name(), "Days");
        assert!(ModelRef::parse("Shop..Product").is_none());
    }

    #[test]
    fn test_validation() {
        let temp = TempDir::new().unwrap();
        let project = web_project(&temp, "var x = 1;\n");

        let mut s = settings(&project);
        s.context = Some("Shop Context".to_string());
        assert_eq!(s.validate(), Err(ValidationError::InvalidContextName));

        s.context = None;
        assert_eq!(s.validate().unwrap().context, "SqliteDbContext");

        s.model = Some("1Product".to_string());
        assert_eq!(s.validate(), Err(ValidationError::InvalidModel));
    }

    #[test]
    fn test_new_context_in_minimal_app() {
        let temp = TempDir::new().unwrap();
        let project = web_project(
            &temp,
            "var builder = WebApplication.CreateBuilder(args);\nvar app = builder.Build();\napp.Run();\n",
        );
        let catalog = ConfigCatalog::load().unwrap();
        let scaffolder = DbContextScaffolder::new(&catalog, &FileSystemDiscovery, &NoopInstaller);

        let mut s = settings(&project);
        s.model = Some("Shop.Models.Product".to_string());
        let outcome = scaffolder.run(&s).unwrap();
        assert!(outcome.success(), "{outcome:?}");

        let program = fs::read_to_string(temp.path().join("Program.cs")).unwrap();
        assert_eq!(
            program,
            "using Microsoft.EntityFrameworkCore;\n\nvar builder = WebApplication.CreateBuilder(args);\nvar connectionString = builder.Configuration.GetConnectionString(\"ShopContext\") ?? throw new InvalidOperationException(\"Connection string 'ShopContext' not found.\");\nbuilder.Services.AddDbContext<ShopContext>(options =>\n    options.UseSqlite(connectionString));\nvar app = builder.Build();\napp.Run();\n"
        );

        let context = fs::read_to_string(temp.path().join("ShopContext.cs")).unwrap();
        assert!(context.contains("using Shop.Models;"));
        assert!(context.contains("    public DbSet<Product> Products { get; set; } = default!;\n}"));

        let settings: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(temp.path().join("appsettings.json")).unwrap())
                .unwrap();
        assert_eq!(
            settings["ConnectionStrings"]["ShopContext"],
            "Data Source=sqlitedb.db"
        );
    }

    #[test]
    fn test_existing_context_only_gains_db_set() {
        let temp = TempDir::new().unwrap();
        let program = "var builder = WebApplication.CreateBuilder(args);\nbuilder.Build().Run();\n";
        let project = web_project(&temp, program);
        fs::write(
            temp.path().join("ShopContext.cs"),
            "using Microsoft.EntityFrameworkCore;\n\npublic class ShopContext : DbContext\n{\n    public DbSet<Order> Orders { get; set; } = default!;\n}\n",
        )
        .unwrap();
        let catalog = ConfigCatalog::load().unwrap();
        let scaffolder = DbContextScaffolder::new(&catalog, &FileSystemDiscovery, &NoopInstaller);

        let mut s = settings(&project);
        s.model = Some("Product".to_string());
        let outcome = scaffolder.run(&s).unwrap();

        assert!(outcome.success());
        assert_eq!(outcome.stages.len(), 1);
        assert_eq!(fs::read_to_string(temp.path().join("Program.cs")).unwrap(), program);
        assert_eq!(
            fs::read_to_string(temp.path().join("ShopContext.cs")).unwrap(),
            "using Microsoft.EntityFrameworkCore;\n\npublic class ShopContext : DbContext\n{\n    public DbSet<Order> Orders { get; set; } = default!;\n    public DbSet<Product> Products { get; set; } = default!;\n}\n"
        );
    }

    #[test]
    fn test_existing_db_set_is_not_duplicated() {
        let temp = TempDir::new().unwrap();
        let project = web_project(&temp, "var builder = WebApplication.CreateBuilder(args);\n");
        let context = "using Microsoft.EntityFrameworkCore;\n\npublic class ShopContext : DbContext\n{\n    public DbSet<Shop.Models.Product> Products { get; set; } = default!;\n}\n";
        fs::write(temp.path().join("ShopContext.cs"), context).unwrap();
        let catalog = ConfigCatalog::load().unwrap();
        let scaffolder = DbContextScaffolder::new(&catalog, &FileSystemDiscovery, &NoopInstaller);

        let mut s = settings(&project);
        s.model = Some("Product".to_string());
        let outcome = scaffolder.run(&s).unwrap();

        assert!(outcome.success(), "{outcome:?}");
        let stage = outcome.stage(Stage::UpdateDbContext).unwrap();
        assert_eq!(
            stage.message.as_deref(),
            Some("ShopContext already exposes DbSet<Product>")
        );
        assert_eq!(fs::read_to_string(temp.path().join("ShopContext.cs")).unwrap(), context);

        s.model = Some("ProductLine".to_string());
        scaffolder.run(&s).unwrap();
        let extended = fs::read_to_string(temp.path().join("ShopContext.cs")).unwrap();
        assert_eq!(extended.matches("DbSet<").count(), 2);
        assert!(extended.contains("public DbSet<ProductLine> ProductLines { get; set; } = default!;"));
    }

    #[test]
    fn test_verbose_app_edits_startup() {
        let temp = TempDir::new().unwrap();
        let program = "public class Program\n{\n    public static void Main(string[] args)\n    {\n        CreateHostBuilder(args).Build().Run();\n    }\n\n    public static IHostBuilder CreateHostBuilder(string[] args) =>\n        Host.CreateDefaultBuilder(args)\n            .ConfigureWebHostDefaults(web => web.UseStartup<Startup>());\n}\n";
        let project = web_project(&temp, program);
        fs::write(
            temp.path().join("Startup.cs"),
            "public class Startup\n{\n    public void ConfigureServices(IServiceCollection services)\n    {\n        services.AddControllers();\n    }\n}\n",
        )
        .unwrap();
        let catalog = ConfigCatalog::load().unwrap();
        let scaffolder = DbContextScaffolder::new(&catalog, &FileSystemDiscovery, &NoopInstaller);

        let outcome = scaffolder.run(&settings(&project)).unwrap();
        assert!(outcome.success(), "{outcome:?}");

        let startup = fs::read_to_string(temp.path().join("Startup.cs")).unwrap();
        assert_eq!(
            startup,
            "using Microsoft.EntityFrameworkCore;\n\npublic class Startup\n{\n    public void ConfigureServices(IServiceCollection services)\n    {\n        services.AddDbContext<ShopContext>(options =>\n            options.UseSqlite(Configuration.GetConnectionString(\"ShopContext\")));\n        services.AddControllers();\n    }\n}\n"
        );
        // no registration lands in Program.cs, so it gains no using either
        assert_eq!(fs::read_to_string(temp.path().join("Program.cs")).unwrap(), program);
    }

    #[test]
    fn test_missing_project_is_invalid() {
        let temp = TempDir::new().unwrap();
        let catalog = ConfigCatalog::load().unwrap();
        let scaffolder = DbContextScaffolder::new(&catalog, &FileSystemDiscovery, &NoopInstaller);
        let result = scaffolder.run(&settings(&temp.path().join("Nope.csproj")));
        assert!(matches!(
            result,
            Err(Error::Validation(ValidationError::InvalidProject))
        ));
    }
}
