//! `confport doctor`: toolchain and project diagnostics.

use std::path::Path;
use std::process::Command;

use anyhow::Result;

use crate::manifest::Project;

/// Print toolchain and project diagnostic information.
pub fn run(project: &Project) -> Result<()> {
    println!("=== Confport Doctor ===");
    println!();

    println!("Confport version: {}", env!("CARGO_PKG_VERSION"));
    println!();

    // System tools
    println!("--- System Tools ---");
    print_tool_status(&project.manifest.build.cmake, &["--version"]);
    print_tool_status(&project.manifest.build.make, &["--version"]);
    println!();

    // Project status
    println!("--- Project Status ---");
    match &project.manifest_path {
        Some(path) => println!("  confport.toml: found at {}", path.display()),
        None => println!("  confport.toml: not found (using defaults)"),
    }
    print_dir_status("Toolchain source", &project.llvm_dir());
    print_dir_status("Build directory", &project.objs_dir());
    print_dir_status("Output directory", &project.configs_dir());
    println!();

    // Tables
    println!("--- Tables ---");
    match project.tables() {
        Ok(tables) => {
            let source = match &project.manifest.tables.file {
                Some(file) => project.resolve(file).display().to_string(),
                None => "built-in".to_string(),
            };
            let archs: Vec<&str> = tables.architectures.iter().map(|a| a.name.as_str()).collect();
            let platforms: Vec<&str> = tables.platform_names().collect();
            println!("  Source:        {source}");
            println!("  Architectures: {}", archs.join(", "));
            println!("  Platforms:     {}", platforms.join(", "));
            println!("  Undefined:     {} symbol(s)", tables.undefine.len());
        }
        Err(e) => println!("  error: {e:#}"),
    }

    Ok(())
}

fn print_tool_status(name: &str, args: &[&str]) {
    match Command::new(name).args(args).output() {
        Ok(output) => {
            let version = String::from_utf8_lossy(&output.stdout);
            let first_line = version.lines().next().unwrap_or("(unknown version)");
            println!("  {name}: {first_line}");
        }
        Err(_) => {
            println!("  {name}: not found");
        }
    }
}

fn print_dir_status(label: &str, path: &Path) {
    let state = if path.is_dir() { "present" } else { "missing" };
    println!("  {label:<17} {} ({state})", path.display());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn doctor_runs_without_error() {
        let dir = tempfile::tempdir().unwrap();
        let project = Project::discover(None, dir.path()).unwrap();
        run(&project).unwrap();
    }

    #[test]
    fn doctor_reports_broken_tables_without_failing() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("confport.toml"), "[tables]\nfile = \"missing.toml\"\n").unwrap();
        let project = Project::discover(None, dir.path()).unwrap();
        run(&project).unwrap();
    }
}
