//! `confport clean`: remove the native build directory and generated trees.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::manifest::Project;

/// Remove the build directory, and with `outputs` the generated configuration trees.
pub fn run(project: &Project, outputs: bool) -> Result<()> {
    remove_dir(&project.objs_dir())?;
    if outputs {
        remove_dir(&project.configs_dir())?;
    }
    Ok(())
}

fn remove_dir(path: &Path) -> Result<()> {
    if path.exists() {
        fs::remove_dir_all(path).with_context(|| format!("removing {}", path.display()))?;
        println!("Removed {}", path.display());
    } else {
        println!("Already clean: {} does not exist", path.display());
    }
    Ok(())
}
