#![allow(dead_code)]

use dbwire::{PackageInstaller, Result};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tempfile::TempDir;

pub const TOP_LEVEL_HOST: &str = r#"var builder = DistributedApplication.CreateBuilder(args);

var cache = builder.AddRedis("cache");

builder.AddProject<Projects.Shop_Api>("api")
    .WithReference(cache);

builder.Build().Run();
"#;

pub const EXPLICIT_HOST: &str = r#"namespace Shop.AppHost;

public class Program
{
    public static void Main(string[] args)
    {
        var builder = DistributedApplication.CreateBuilder(args);

        builder.AddProject<Projects.Shop_Api>("api");

        builder.Build().Run();
    }
}
"#;

pub const TOP_LEVEL_API: &str = r#"var builder = WebApplication.CreateBuilder(args);

builder.AddServiceDefaults();

var app = builder.Build();
app.MapDefaultEndpoints();
app.Run();
"#;

pub const EXPLICIT_API: &str = r#"namespace Shop.Api;

public class Program
{
    public static void Main(string[] args)
    {
        var builder = WebApplication.CreateBuilder(args);
        builder.AddServiceDefaults();

        var app = builder.Build();
        app.Run();
    }
}
"#;

/// An app host and an API project side by side
pub struct Solution {
    pub temp: TempDir,
    pub host: PathBuf,
    pub api: PathBuf,
}

impl Solution {
    pub fn new(host_program: &str, api_program: &str) -> Self {
        let temp = TempDir::new().unwrap();
        let host = temp.path().join("Shop.AppHost").join("Shop.AppHost.csproj");
        let api = temp.path().join("Shop.Api").join("Shop.Api.csproj");
        write(&host, "<Project Sdk=\"Microsoft.NET.Sdk\" />");
        write(&api, "<Project Sdk=\"Microsoft.NET.Sdk.Web\" />");
        write(&host.with_file_name("Program.cs"), host_program);
        write(&api.with_file_name("Program.cs"), api_program);
        Self { temp, host, api }
    }

    pub fn host_file(&self, name: &str) -> PathBuf {
        self.host.with_file_name(name)
    }

    pub fn api_file(&self, name: &str) -> PathBuf {
        self.api.with_file_name(name)
    }

    pub fn read_host(&self, name: &str) -> String {
        fs::read_to_string(self.host_file(name)).unwrap()
    }

    pub fn read_api(&self, name: &str) -> String {
        fs::read_to_string(self.api_file(name)).unwrap()
    }
}

pub fn write(path: &Path, contents: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

/// Records requested packages without running anything
#[derive(Default)]
pub struct RecordingInstaller {
    pub packages: Mutex<Vec<String>>,
}

impl PackageInstaller for RecordingInstaller {
    fn add_package(&self, _project_file: &Path, package: &str, _prerelease: bool) -> Result<()> {
        self.packages.lock().unwrap().push(package.to_string());
        Ok(())
    }
}
