//! Build → copy → generate sequencing.
//!
//! The platform is resolved before anything touches the filesystem. The native
//! build must finish before any of its outputs are read.

use confport_targets::TargetTables;

use crate::error::Result;
use crate::generate::{copy_common_files, generate_platform_files, GenerateSummary, Layout};
use crate::transform::Transformer;

/// Produces the single-platform generated headers under [`Layout::objs_dir`].
pub trait NativeBuild {
    /// Run the build synchronously with the given parallelism hint.
    fn build(&self, jobs: usize) -> Result<()>;
}

impl<F> NativeBuild for F
where
    F: Fn(usize) -> Result<()>,
{
    fn build(&self, jobs: usize) -> Result<()> {
        self(jobs)
    }
}

/// Options for one update run.
#[derive(Debug, Clone)]
pub struct UpdateOptions {
    /// Platform whose headers are generated.
    pub platform: String,
    /// Parallelism hint for the native build.
    pub jobs: usize,
    /// Reuse an existing build output instead of rebuilding.
    pub skip_build: bool,
}

/// What an update run produced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UpdateReport {
    pub common: GenerateSummary,
    pub platform: GenerateSummary,
}

/// Build, copy the platform-independent files, then generate the platform headers.
pub fn run_update(
    tables: &TargetTables,
    layout: &Layout,
    native: &dyn NativeBuild,
    options: &UpdateOptions,
) -> Result<UpdateReport> {
    let transformer = Transformer::for_platform(tables, &options.platform)?;

    if options.skip_build {
        tracing::info!("skipping native build");
    } else {
        tracing::info!(jobs = options.jobs, "running native build");
        native.build(options.jobs)?;
    }

    let common = copy_common_files(layout)?;
    let platform = generate_platform_files(&transformer, layout)?;
    Ok(UpdateReport { common, platform })
}
