//! `confport platform`: platform listing and description.

use anyhow::{bail, Context, Result};
use confport_targets::{Platform, TargetTables};

use crate::manifest::Project;

/// List the platforms in the active tables.
pub fn list(project: &Project) -> Result<()> {
    let tables = project.tables()?;
    print!("{}", render_list(&tables));
    Ok(())
}

/// Describe a platform's triple table.
pub fn describe(project: &Project, name: &str, format: Option<&str>) -> Result<()> {
    let tables = project.tables()?;
    let platform = tables.require_platform(name)?;
    print!("{}", render_describe(&tables, platform, format)?);
    Ok(())
}

pub(crate) fn render_list(tables: &TargetTables) -> String {
    let mut out = String::from("Platforms:\n\n");
    for platform in &tables.platforms {
        let triples: Vec<&str> = platform.triples.iter().map(|t| t.triple.as_str()).collect();
        out.push_str(&format!("  {:<12} {}\n", platform.name, triples.join(", ")));
    }
    out.push_str("\nUse 'confport platform describe <name>' for details.\n");
    out
}

pub(crate) fn render_describe(
    tables: &TargetTables,
    platform: &Platform,
    format: Option<&str>,
) -> Result<String> {
    match format {
        Some("toml") => toml::to_string_pretty(platform).context("serializing platform to TOML"),
        Some("json") => {
            let mut json =
                serde_json::to_string_pretty(platform).context("serializing platform to JSON")?;
            json.push('\n');
            Ok(json)
        }
        Some(other) => bail!("unknown format '{other}' (expected toml or json)"),
        None => Ok(render_human(tables, platform)),
    }
}

fn render_human(tables: &TargetTables, platform: &Platform) -> String {
    let mut out = format!("=== Platform: {} ===\n\n", platform.name);
    out.push_str("--- Triples ---\n");
    for entry in &platform.triples {
        let arch = tables
            .architecture_detected_by(&entry.detection_macro)
            .map_or("(no architecture)", |a| a.name.as_str());
        out.push_str(&format!(
            "  {:<14} {:<10} {}\n",
            entry.detection_macro, arch, entry.triple
        ));
    }
    out.push('\n');
    out.push_str("--- Architectures ---\n");
    for arch in &tables.architectures {
        out.push_str(&format!("  {:<10} {}\n", arch.name, arch.condition()));
    }
    out
}
