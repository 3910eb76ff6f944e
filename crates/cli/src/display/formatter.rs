use anyhow::Result;
use dbwire_core::{
    Region, RegionKind, ScaffoldOutcome, SourceFile, ValidationError, scaffold::StageOutcome,
};
use serde_json::json;

pub fn print_validation_error(error: &ValidationError) {
    eprintln!("{error}");
    if let Some(options) = error.valid_options() {
        eprintln!("Valid options : {options}");
    }
}

pub fn print_outcome(outcome: &ScaffoldOutcome, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(outcome)?);
        return Ok(());
    }

    for warning in &outcome.warnings {
        println!("⚠️  {warning}");
    }
    for stage in &outcome.stages {
        print_stage(stage);
    }

    if outcome.success() {
        println!("\n✅ Done");
    } else {
        println!("\n❌ Finished with errors");
    }
    Ok(())
}

fn print_stage(stage: &StageOutcome) {
    let mark = if stage.success { "✅" } else { "❌" };
    println!("{mark} {}", stage.stage);

    if let Some(path) = &stage.created {
        println!("   📄 Created {}", path.display());
    }
    if let Some(message) = &stage.message {
        println!("   {message}");
    }
    if let Some(report) = &stage.report {
        for file in &report.files {
            let name = file
                .path
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| file.file_name.clone());
            println!("   📝 {name}: {} edit(s) applied", file.applied);
            for reason in &file.skipped {
                println!("      skipped: {reason}");
            }
        }
    }
}

pub fn print_analysis(file: &SourceFile, regions: &[Region], json: bool) -> Result<()> {
    if json {
        let value = json!({
            "file": file.path(),
            "facts": file.facts(),
            "regions": regions,
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    let facts = file.facts();
    println!("🔍 Analyzing: {}", file.path().display());
    println!("{}", "=".repeat(80));
    println!(
        "   Entry code: {}",
        if facts.top_level_statements {
            "top-level statements"
        } else {
            "explicit Main method"
        }
    );
    println!(
        "   Hosting:    {}",
        if facts.minimal_setup { "minimal" } else { "host builder / Startup" }
    );

    println!("\n📦 Regions ({}):", regions.len());
    for region in regions {
        let kind = match region.kind {
            RegionKind::TopLevel => "top-level",
            RegionKind::EntryMethod => "entry method",
            RegionKind::Method => "method",
            RegionKind::ClassBody => "class",
        };
        println!(
            "   {:<24} {:<13} lines {}-{}  ({} item(s))",
            region.name,
            kind,
            region.start.line + 1,
            region.end.line + 1,
            region.items.len()
        );
    }
    Ok(())
}
