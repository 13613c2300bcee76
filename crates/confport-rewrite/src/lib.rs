//! Portable configuration header synthesis.
//!
//! Takes the configuration headers a native toolchain build generated for one
//! architecture and rewrites them into headers that select the right definitions
//! for every supported architecture through preprocessor conditionals.
//!
//! ## Modules
//!
//! - [`classify`]: Line classification into the rewrite rules
//! - [`emit`]: Conditional-compilation block construction
//! - [`transform`]: Line and file transformer
//! - [`enumerate`]: Deterministic discovery of candidate files
//! - [`copy`]: Verbatim copies and atomic writes
//! - [`generate`]: Common-file copy and platform header generation
//! - [`driver`]: Build → copy → generate sequencing

pub mod classify;
pub mod copy;
pub mod driver;
pub mod emit;
pub mod enumerate;
pub mod error;
pub mod generate;
pub mod transform;

pub use classify::{LineClass, LineClassifier};
pub use driver::{run_update, NativeBuild, UpdateOptions, UpdateReport};
pub use emit::GeneratedBlock;
pub use error::{Result, RewriteError};
pub use generate::{GenerateSummary, Layout};
pub use transform::Transformer;
