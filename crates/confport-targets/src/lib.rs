//! Architecture, platform and undefinition tables for portable configuration headers.
//!
//! A [`TargetTables`] value is the read-only context every header rewrite runs against:
//! - **Architectures:** CPU targets and the compiler macros that detect them
//! - **Platforms:** per host OS, the ordered (detection macro, triple) pairs
//! - **Undefinition set:** symbols that must never keep a concrete definition
//! - **Dialect:** the macro prefixes the rewrite patterns are keyed on

pub mod arch;
pub mod error;
pub mod parse;
pub mod platform;
pub mod tables;

pub use arch::Architecture;
pub use error::{Result, TargetError};
pub use platform::{Platform, TripleEntry};
pub use tables::{Dialect, SuffixRecovery, TargetTables};
