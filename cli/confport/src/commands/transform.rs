//! `confport transform`: rewrite a single header.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use confport_rewrite::copy::write_atomic;
use confport_rewrite::Transformer;
use confport_targets::TargetTables;

use crate::manifest::Project;

/// Rewrite `file` for `platform`, printing to stdout or writing to `output`.
pub fn run(project: &Project, file: &Path, platform: &str, output: Option<&Path>) -> Result<()> {
    let tables = project.tables()?;
    let rendered = render(&tables, file, platform)?;
    match output {
        Some(path) => {
            write_atomic(path, rendered.text.as_bytes())?;
            println!(
                "Wrote {} ({} line(s) rewritten)",
                path.display(),
                rendered.rewritten
            );
        }
        None => print!("{}", rendered.text),
    }
    Ok(())
}

#[derive(Debug)]
pub(crate) struct Rendered {
    pub text: String,
    pub rewritten: usize,
}

pub(crate) fn render(tables: &TargetTables, file: &Path, platform: &str) -> Result<Rendered> {
    let transformer = Transformer::for_platform(tables, platform)?;
    let text = fs::read_to_string(file).with_context(|| format!("reading {}", file.display()))?;
    let mut out = String::with_capacity(text.len());
    let rewritten = transformer.transform_into(&text, &mut out);
    Ok(Rendered {
        text: out,
        rewritten,
    })
}
