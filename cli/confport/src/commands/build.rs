//! Native toolchain build via cmake + make.

use std::fs;
use std::path::PathBuf;
use std::process::Command;

use confport_rewrite::{NativeBuild, RewriteError};
use confport_targets::TargetTables;

use crate::manifest::Project;

/// Configures the toolchain with cmake and builds it with make.
#[derive(Debug, Clone)]
pub struct CmakeBuild {
    pub cmake: String,
    pub make: String,
    pub source_dir: PathBuf,
    pub objs_dir: PathBuf,
    pub options: Vec<String>,
}

impl CmakeBuild {
    /// Build configuration for `project`, restricted to the tables' architectures.
    pub fn from_project(project: &Project, tables: &TargetTables) -> Self {
        let build = &project.manifest.build;
        let mut options = build.options.clone();
        options.push(targets_to_build(tables));
        Self {
            cmake: build.cmake.clone(),
            make: build.make.clone(),
            source_dir: project.llvm_dir(),
            objs_dir: project.objs_dir(),
            options,
        }
    }

    pub fn configure_command(&self) -> Command {
        let mut cmd = Command::new(&self.cmake);
        cmd.arg(&self.source_dir)
            .args(&self.options)
            .current_dir(&self.objs_dir);
        cmd
    }

    pub fn make_command(&self, jobs: usize) -> Command {
        let mut cmd = Command::new(&self.make);
        cmd.arg(format!("-j{jobs}")).current_dir(&self.objs_dir);
        cmd
    }
}

/// `-DLLVM_TARGETS_TO_BUILD=AArch64;ARM;X86` for the tables' architectures.
pub fn targets_to_build(tables: &TargetTables) -> String {
    let names: Vec<&str> = tables.architectures.iter().map(|a| a.name.as_str()).collect();
    format!("-DLLVM_TARGETS_TO_BUILD={}", names.join(";"))
}

fn run_step(step: &str, mut cmd: Command) -> confport_rewrite::Result<()> {
    tracing::info!(step, command = ?cmd, "running");
    let status = cmd.status().map_err(|e| RewriteError::Build {
        detail: format!("failed to spawn {step}: {e}"),
    })?;
    if !status.success() {
        return Err(RewriteError::Build {
            detail: format!("{step} failed (exit status: {status})"),
        });
    }
    Ok(())
}

impl NativeBuild for CmakeBuild {
    fn build(&self, jobs: usize) -> confport_rewrite::Result<()> {
        fs::create_dir_all(&self.objs_dir).map_err(|e| RewriteError::Io {
            path: self.objs_dir.clone(),
            source: e,
        })?;
        run_step("cmake", self.configure_command())?;
        run_step("make", self.make_command(jobs))?;
        Ok(())
    }
}

/// Default parallelism for the native build.
pub fn default_jobs() -> usize {
    std::thread::available_parallelism()
        .map(std::num::NonZero::get)
        .unwrap_or(1)
}
