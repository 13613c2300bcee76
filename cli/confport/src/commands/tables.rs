//! `confport tables`: table file validation and templates.

use std::path::Path;

use anyhow::{bail, Context, Result};
use confport_targets::parse::{self, Severity, ValidationIssue};

use crate::manifest::Project;

/// Validate `file`, or the project's active tables when no file is given.
pub fn validate(project: &Project, file: Option<&Path>) -> Result<()> {
    let (tables, source) = match file {
        Some(path) => (
            parse::load_tables_toml(path)
                .with_context(|| format!("loading {}", path.display()))?,
            path.display().to_string(),
        ),
        None => match &project.manifest.tables.file {
            Some(file) => {
                let path = project.resolve(file);
                let tables = parse::load_tables_toml(&path)
                    .with_context(|| format!("loading {}", path.display()))?;
                (tables, path.display().to_string())
            }
            None => (project.tables()?, "built-in tables".to_string()),
        },
    };

    match parse::validate_tables(&tables) {
        Ok(()) => {
            println!("{source}: OK");
            Ok(())
        }
        Err(issues) => {
            print!("{}", render_issues(&issues));
            let errors = issues
                .iter()
                .filter(|i| i.severity == Severity::Error)
                .count();
            if errors > 0 {
                bail!("{source}: {errors} error(s)");
            }
            println!("{source}: OK (with warnings)");
            Ok(())
        }
    }
}

/// Print a tables file seeded from the built-in tables.
pub fn template() -> Result<()> {
    print!("{}", parse::generate_template()?);
    Ok(())
}

fn render_issues(issues: &[ValidationIssue]) -> String {
    let mut out = String::new();
    for issue in issues {
        let label = match issue.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
        };
        out.push_str(&format!("  {label}: {}\n", issue.message));
    }
    out
}
