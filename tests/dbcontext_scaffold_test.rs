//! End-to-end runs of the standalone Entity Framework pipeline

mod common;

use common::{RecordingInstaller, write};
use dbwire::{
    ConfigCatalog, DbContextScaffolder, DbContextSettings, Error, FileSystemDiscovery,
    ValidationError, scaffold::Stage,
};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

const EXPLICIT_MINIMAL: &str = r#"using System;

namespace Blog;

public class Program
{
    public static void Main(string[] args)
    {
        var builder = WebApplication.CreateBuilder(args);
        builder.Services.AddControllers();

        var app = builder.Build();
        app.Run();
    }
}
"#;

fn project(program: &str) -> (TempDir, PathBuf) {
    let temp = TempDir::new().unwrap();
    let project = temp.path().join("Blog.csproj");
    write(&project, "<Project Sdk=\"Microsoft.NET.Sdk.Web\" />");
    write(&temp.path().join("Program.cs"), program);
    write(
        &temp.path().join("appsettings.json"),
        "{\n  \"Logging\": {\n    \"LogLevel\": {\n      \"Default\": \"Information\"\n    }\n  },\n  \"AllowedHosts\": \"*\"\n}\n",
    );
    (temp, project)
}

fn run(settings: &DbContextSettings, installer: &RecordingInstaller) -> dbwire::Result<dbwire::ScaffoldOutcome> {
    let catalog = ConfigCatalog::load().unwrap();
    DbContextScaffolder::new(&catalog, &FileSystemDiscovery, installer).run(settings)
}

#[test]
fn test_postgres_context_in_explicit_main() {
    let (temp, project) = project(EXPLICIT_MINIMAL);
    let installer = RecordingInstaller::default();
    let settings = DbContextSettings {
        provider: Some("postgres".to_string()),
        project: Some(project),
        context: Some("BlogContext".to_string()),
        model: Some("Blog.Models.Post".to_string()),
        prerelease: false,
        skip_install: false,
    };

    let outcome = run(&settings, &installer).unwrap();
    assert!(outcome.success(), "{outcome:?}");
    assert_eq!(
        *installer.packages.lock().unwrap(),
        vec!["Npgsql.EntityFrameworkCore.PostgreSQL".to_string()]
    );

    let program = fs::read_to_string(temp.path().join("Program.cs")).unwrap();
    assert!(program.starts_with("using System;\nusing Microsoft.EntityFrameworkCore;\n\nnamespace Blog;"));
    assert!(program.contains(
        "        var builder = WebApplication.CreateBuilder(args);\n        var connectionString = builder.Configuration.GetConnectionString(\"BlogContext\") ?? throw new InvalidOperationException(\"Connection string 'BlogContext' not found.\");\n        builder.Services.AddDbContext<BlogContext>(options =>\n            options.UseNpgsql(connectionString));\n        builder.Services.AddControllers();\n"
    ));

    let context = fs::read_to_string(temp.path().join("BlogContext.cs")).unwrap();
    assert!(context.contains("using Blog.Models;"));
    assert!(context.contains("public DbSet<Post> Posts { get; set; } = default!;"));

    let settings_json = fs::read_to_string(temp.path().join("appsettings.json")).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&settings_json).unwrap();
    let keys: Vec<_> = parsed.as_object().unwrap().keys().cloned().collect();
    assert_eq!(keys, vec!["Logging", "AllowedHosts", "ConnectionStrings"]);
    assert_eq!(
        parsed["ConnectionStrings"]["BlogContext"],
        "server=localhost;username=postgres;database=postgresqldb"
    );
}

#[test]
fn test_default_context_name_comes_from_provider() {
    let (temp, project) = project("var builder = WebApplication.CreateBuilder(args);\nbuilder.Build().Run();\n");
    let settings = DbContextSettings {
        provider: Some("sqlserver".to_string()),
        project: Some(project),
        skip_install: true,
        ..Default::default()
    };

    let outcome = run(&settings, &RecordingInstaller::default()).unwrap();
    assert!(outcome.success());
    assert!(temp.path().join("SqlServerDbContext.cs").is_file());
    assert!(outcome.stage(Stage::UpdateDbContext).is_none());

    let program = fs::read_to_string(temp.path().join("Program.cs")).unwrap();
    assert!(program.contains("options.UseSqlServer(connectionString)"));
}

#[test]
fn test_existing_context_without_model_changes_nothing() {
    let program = "var builder = WebApplication.CreateBuilder(args);\nbuilder.Build().Run();\n";
    let (temp, project) = project(program);
    write(&temp.path().join("Data/SqliteDbContext.cs"), "public class SqliteDbContext { }\n");
    let settings = DbContextSettings {
        provider: Some("sqlite".to_string()),
        project: Some(project),
        skip_install: true,
        ..Default::default()
    };

    let outcome = run(&settings, &RecordingInstaller::default()).unwrap();

    assert!(outcome.success());
    let stage = outcome.stage(Stage::CreateDbContext).unwrap();
    assert_eq!(stage.message.as_deref(), Some("SqliteDbContext.cs already exists"));
    assert_eq!(fs::read_to_string(temp.path().join("Program.cs")).unwrap(), program);
}

#[test]
fn test_invalid_provider() {
    let (_temp, project) = project("var x = 1;\n");
    let settings = DbContextSettings {
        provider: None,
        project: Some(project),
        ..Default::default()
    };

    match run(&settings, &RecordingInstaller::default()) {
        Err(Error::Validation(e @ ValidationError::InvalidProvider { .. })) => {
            assert_eq!(e.valid_options(), Some("postgres, sqlserver, sqlite and cosmosdb"));
        }
        other => panic!("expected a provider validation error, got {other:?}"),
    }
}
