use super::{
    options::CodeChangeOptions,
    report::{FileOutcome, ModifierReport},
};
use crate::{
    analysis::{Project, SourceFile},
    binder::ParameterContext,
    config::{ChangeSpec, EditConfig, FileEdit, MemberSpec},
    error::Result,
    resolver::{ResolveMiss, ScopeStrategy, resolve, strategy_for},
    types::RegionKind,
    writer::DocumentWriter,
};
use tracing::{debug, info, warn};

/// Applies one [`EditConfig`] to a project, best effort.
///
/// Each file is opened once and written once. An edit that cannot be placed
/// is recorded and skipped; edits already applied stay applied.
pub struct ProjectModifier<'a> {
    project: &'a Project,
    config: &'a EditConfig,
    context: &'a ParameterContext,
    options: CodeChangeOptions,
}

impl<'a> ProjectModifier<'a> {
    pub fn new(
        project: &'a Project,
        config: &'a EditConfig,
        context: &'a ParameterContext,
        options: CodeChangeOptions,
    ) -> Self {
        Self {
            project,
            config,
            context,
            options,
        }
    }

    pub fn run(&self) -> Result<ModifierReport> {
        info!(
            "Applying '{}' to {}",
            self.config.identifier,
            self.project.project_file().display()
        );

        let mut open: Vec<SourceFile> = Vec::new();
        let mut files = Vec::new();

        for edit in &self.config.files {
            if !self.options.satisfies(&edit.options) {
                debug!("Skipping {}: options {:?} not met", edit.file_name, edit.options);
                continue;
            }

            let Some(path) = self.project.find_unit(&edit.file_name) else {
                warn!(
                    "{} not found in {}",
                    edit.file_name,
                    self.project.project_file().display()
                );
                files.push(FileOutcome::missing(&edit.file_name));
                continue;
            };

            let index = match open.iter().position(|f| f.path() == path) {
                Some(index) => index,
                None => {
                    open.push(SourceFile::load(path)?);
                    open.len() - 1
                }
            };
            files.push(self.apply_file_edit(&mut open[index], edit)?);
        }

        for file in open.iter().filter(|f| f.is_modified()) {
            file.commit()?;
            info!("Updated {}", file.path().display());
        }

        Ok(ModifierReport {
            identifier: self.config.identifier.clone(),
            files,
        })
    }

    fn apply_file_edit(&self, file: &mut SourceFile, edit: &FileEdit) -> Result<FileOutcome> {
        let mut outcome = FileOutcome::new(&edit.file_name, file.path().to_path_buf());
        let strategy = strategy_for(file.facts());
        debug!("Editing {} with the {} strategy", edit.file_name, strategy.name());

        for namespace in &edit.usings {
            if DocumentWriter::ensure_using(file, namespace)? {
                outcome.applied += 1;
            }
        }

        for (scope, changes) in &edit.methods {
            for change in &changes.code_changes {
                if !self.options.satisfies(&change.options) {
                    debug!("Skipping change in {scope}: options {:?} not met", change.options);
                    continue;
                }
                match self.apply_change(file, strategy, scope, change) {
                    Ok(()) => outcome.applied += 1,
                    Err(e) if e.is_edit_local() => {
                        warn!("{}: {}", edit.file_name, e);
                        outcome.skipped.push(e.to_string());
                    }
                    Err(e) => return Err(e),
                }
            }
        }

        for member in &edit.class_properties {
            match self.apply_member(file, edit.target_class(), member) {
                Ok(()) => outcome.applied += 1,
                Err(e) if e.is_edit_local() => {
                    warn!("{}: {}", edit.file_name, e);
                    outcome.skipped.push(e.to_string());
                }
                Err(e) => return Err(e),
            }
        }

        Ok(outcome)
    }

    fn apply_change(
        &self,
        file: &mut SourceFile,
        strategy: &dyn ScopeStrategy,
        scope: &str,
        change: &ChangeSpec,
    ) -> Result<()> {
        let parent = change
            .parent
            .as_deref()
            .map(|p| self.context.render(p, &change.parent_args))
            .transpose()?;
        let block = self.context.render(&change.block, &change.block_args)?;

        let regions = file.regions()?;
        let target = resolve(
            strategy,
            &regions,
            file.source(),
            scope,
            parent.as_deref(),
            change.insert,
        )?;
        DocumentWriter::apply(file, &target, change.insert, &block)
    }

    fn apply_member(&self, file: &mut SourceFile, class_name: &str, member: &MemberSpec) -> Result<()> {
        let block = self.context.render(&member.block, &member.block_args)?;
        let regions = file.regions()?;
        let class = regions
            .iter()
            .find(|r| r.kind == RegionKind::ClassBody && r.has_name(class_name))
            .ok_or_else(|| ResolveMiss::ScopeNotFound(class_name.to_string()))?;
        DocumentWriter::insert_member(file, class, &block)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binder::Param;
    use crate::services::FileSystemDiscovery;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    const HOST_CONFIG: &str = r#"{
  "identifier": "test-host",
  "files": [
    {
      "file_name": "Program.cs",
      "methods": {
        "Global": {
          "code_changes": [
            {
              "block": "var {0} = builder.AddPostgres(\"postgres\").AddDatabase(\"{0}\");",
              "block_args": ["db_name"],
              "parent": "builder.AddProject<{0}>",
              "parent_args": ["project_reference"],
              "insert": "before"
            },
            {
              "block": ".WithReference({0})",
              "block_args": ["db_name"],
              "parent": "builder.AddProject<{0}>",
              "parent_args": ["project_reference"],
              "insert": "chain"
            }
          ]
        }
      }
    },
    {
      "file_name": "Startup.cs",
      "options": ["!MinimalApp"],
      "methods": {
        "ConfigureServices": { "code_changes": [{ "block": "services.AddDb();" }] }
      }
    }
  ]
}"#;

    fn project(dir: &Path, program: &str) -> Project {
        let project_file = dir.join("Host.csproj");
        fs::write(&project_file, "<Project />").unwrap();
        fs::write(dir.join("Program.cs"), program).unwrap();
        Project::discover(&project_file, &FileSystemDiscovery::new()).unwrap()
    }

    fn context(reference: &str) -> ParameterContext {
        ParameterContext::new()
            .with(Param::DbName, "postgresqldb")
            .with(Param::ProjectReference, reference)
    }

    fn minimal() -> CodeChangeOptions {
        CodeChangeOptions {
            top_level_statements: true,
            minimal_app: true,
            ef_scenario: false,
        }
    }

    #[test]
    fn test_applies_changes_in_order_and_writes_once() {
        let temp = TempDir::new().unwrap();
        let project = project(
            temp.path(),
            "var builder = DistributedApplication.CreateBuilder(args);\nbuilder.AddProject<Projects.Api>(\"api\");\nbuilder.Build().Run();\n",
        );
        let config = EditConfig::from_json(HOST_CONFIG).unwrap();
        let context = context("Projects.Api");

        let report = ProjectModifier::new(&project, &config, &context, minimal())
            .run()
            .unwrap();

        assert!(report.success());
        assert_eq!(report.files.len(), 1, "Startup.cs is gated out");
        assert_eq!(report.applied(), 2);
        assert_eq!(
            fs::read_to_string(temp.path().join("Program.cs")).unwrap(),
            "var builder = DistributedApplication.CreateBuilder(args);\nvar postgresqldb = builder.AddPostgres(\"postgres\").AddDatabase(\"postgresqldb\");\nbuilder.AddProject<Projects.Api>(\"api\").WithReference(postgresqldb);\nbuilder.Build().Run();\n"
        );
    }

    #[test]
    fn test_missing_anchor_is_skipped_and_file_untouched() {
        let temp = TempDir::new().unwrap();
        let program = "var builder = DistributedApplication.CreateBuilder(args);\nbuilder.Build().Run();\n";
        let project = project(temp.path(), program);
        let config = EditConfig::from_json(HOST_CONFIG).unwrap();
        let context = context("Projects.Api");

        let report = ProjectModifier::new(&project, &config, &context, minimal())
            .run()
            .unwrap();

        assert!(!report.success());
        assert_eq!(report.skipped().count(), 2);
        assert_eq!(
            fs::read_to_string(temp.path().join("Program.cs")).unwrap(),
            program
        );
    }

    #[test]
    fn test_crlf_file_keeps_crlf_endings() {
        let temp = TempDir::new().unwrap();
        let project = project(
            temp.path(),
            "var builder = DistributedApplication.CreateBuilder(args);\r\nbuilder.AddProject<Projects.Api>(\"api\");\r\nbuilder.Build().Run();\r\n",
        );
        let config = EditConfig::from_json(HOST_CONFIG).unwrap();
        let context = context("Projects.Api");

        let report = ProjectModifier::new(&project, &config, &context, minimal())
            .run()
            .unwrap();

        assert!(report.success());
        let written = fs::read_to_string(temp.path().join("Program.cs")).unwrap();
        assert_eq!(
            written,
            "var builder = DistributedApplication.CreateBuilder(args);\r\nvar postgresqldb = builder.AddPostgres(\"postgres\").AddDatabase(\"postgresqldb\");\r\nbuilder.AddProject<Projects.Api>(\"api\").WithReference(postgresqldb);\r\nbuilder.Build().Run();\r\n"
        );
        assert_eq!(written.matches('\n').count(), written.matches("\r\n").count());
    }

    #[test]
    fn test_one_missing_anchor_keeps_the_other_edit() {
        let temp = TempDir::new().unwrap();
        let project = project(
            temp.path(),
            "var builder = WebApplication.CreateBuilder(args);\nvar app = builder.Build();\napp.Run();\n",
        );
        let config = EditConfig::from_json(
            r#"{
  "identifier": "partial",
  "files": [
    {
      "file_name": "Program.cs",
      "methods": {
        "Global": {
          "code_changes": [
            { "block": "builder.AddSqliteDbContext<ShopContext>(\"{0}\");", "block_args": ["db_name"], "parent": "WebApplication.CreateBuilder" },
            { "block": "app.MapHealthChecks(\"/health\");", "parent": "app.UseRouting()" }
          ]
        }
      }
    }
  ]
}"#,
        )
        .unwrap();
        let context = context("Projects.Api");

        let report = ProjectModifier::new(&project, &config, &context, minimal())
            .run()
            .unwrap();

        assert!(!report.success());
        assert_eq!(report.files[0].applied, 1);
        assert_eq!(report.files[0].skipped.len(), 1);
        assert!(report.files[0].skipped[0].contains("app.UseRouting()"));
        assert_eq!(
            fs::read_to_string(temp.path().join("Program.cs")).unwrap(),
            "var builder = WebApplication.CreateBuilder(args);\nbuilder.AddSqliteDbContext<ShopContext>(\"postgresqldb\");\nvar app = builder.Build();\napp.Run();\n"
        );
    }

    #[test]
    fn test_missing_file_fails_that_file_only() {
        let temp = TempDir::new().unwrap();
        let project = project(
            temp.path(),
            "var builder = DistributedApplication.CreateBuilder(args);\nbuilder.AddProject<Projects.Api>(\"api\");\n",
        );
        let config = EditConfig::from_json(HOST_CONFIG).unwrap();
        let context = context("Projects.Api");
        let options = CodeChangeOptions {
            minimal_app: false,
            ..minimal()
        };

        let report = ProjectModifier::new(&project, &config, &context, options)
            .run()
            .unwrap();

        assert_eq!(report.files.len(), 2);
        assert!(report.files[0].success());
        assert_eq!(report.files[1].path, None);
        assert!(!report.success());
    }

    #[test]
    fn test_binding_failure_is_recorded() {
        let temp = TempDir::new().unwrap();
        let project = project(
            temp.path(),
            "var builder = DistributedApplication.CreateBuilder(args);\nbuilder.AddProject<Projects.Api>(\"api\");\n",
        );
        let config = EditConfig::from_json(HOST_CONFIG).unwrap();
        // no project reference supplied
        let context = ParameterContext::new().with(Param::DbName, "postgresqldb");

        let report = ProjectModifier::new(&project, &config, &context, minimal())
            .run()
            .unwrap();

        assert!(!report.success());
        assert!(report.skipped().all(|reason| reason.contains("project_reference")));
    }
}
