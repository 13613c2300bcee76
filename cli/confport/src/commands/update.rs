//! `confport update`: build, copy common files, generate platform headers.

use anyhow::{Context, Result};
use confport_rewrite::{run_update, NativeBuild, UpdateOptions, UpdateReport};
use confport_targets::TargetTables;

use crate::commands::build::{default_jobs, CmakeBuild};
use crate::manifest::Project;

/// Run the full update for `platform` using cmake + make as the native build.
pub fn run(project: &Project, platform: &str, jobs: Option<usize>, skip_build: bool) -> Result<()> {
    let tables = project.tables()?;
    // Reject an unknown platform before any build or file I/O.
    tables.require_platform(platform)?;
    let native = CmakeBuild::from_project(project, &tables);
    let report = execute(project, &tables, platform, jobs, skip_build, &native)?;
    print_report(project, platform, &report);
    Ok(())
}

/// Run the update with an arbitrary native build.
pub(crate) fn execute(
    project: &Project,
    tables: &TargetTables,
    platform: &str,
    jobs: Option<usize>,
    skip_build: bool,
    native: &dyn NativeBuild,
) -> Result<UpdateReport> {
    let layout = project.layout();
    let options = UpdateOptions {
        platform: platform.to_string(),
        jobs: jobs.unwrap_or_else(default_jobs),
        skip_build,
    };
    run_update(tables, &layout, native, &options)
        .with_context(|| format!("updating configuration headers for '{platform}'"))
}

fn print_report(project: &Project, platform: &str, report: &UpdateReport) {
    let layout = project.layout();
    println!(
        "Copied {} common file(s) to {}",
        report.common.files,
        layout.common_output_dir().display()
    );
    println!(
        "Generated {} '{platform}' header(s) in {} ({} line(s) rewritten)",
        report.platform.files,
        layout.platform_output_dir(platform).display(),
        report.platform.rewritten_lines
    );
}
