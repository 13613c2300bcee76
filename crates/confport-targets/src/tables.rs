//! Complete table set.
//!
//! Assembles architectures, platforms, the undefinition set and the rewrite
//! dialect into the immutable context used by the header rewriter.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::arch::Architecture;
use crate::error::{Result, TargetError};
use crate::platform::Platform;

/// How the trailing suffix of a native-init literal is recovered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SuffixRecovery {
    /// Keep the literal's tail when it equals the field name, ignoring case
    /// (`LLVMInitializeX86AsmParser` under field `ASMPARSER` keeps `AsmParser`).
    #[default]
    FieldName,
    /// Never recover a suffix.
    None,
}

/// Macro naming conventions the rewrite patterns are keyed on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct Dialect {
    /// Prefix of architecture-conditional invocations and triple definitions.
    pub macro_prefix: String,
    /// Prefix of native-initialization definitions.
    pub native_prefix: String,
    /// Optional prefix of native-initialization values.
    pub init_prefix: String,
    /// Suffix recovery rule for native-initialization values.
    pub suffix_recovery: SuffixRecovery,
}

impl Default for Dialect {
    fn default() -> Self {
        Self {
            macro_prefix: "LLVM".into(),
            native_prefix: "LLVM_NATIVE_".into(),
            init_prefix: "LLVMInitialize".into(),
            suffix_recovery: SuffixRecovery::FieldName,
        }
    }
}

/// Architectures, platforms and undefined symbols for one rewrite run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct TargetTables {
    /// Symbols that never keep a concrete definition.
    #[serde(default)]
    pub undefine: BTreeSet<String>,
    /// Macro naming conventions.
    #[serde(default)]
    pub dialect: Dialect,
    /// Supported architectures, in `#if`/`#elif` emission order.
    pub architectures: Vec<Architecture>,
    /// Host platforms with their triple tables.
    pub platforms: Vec<Platform>,
}

impl TargetTables {
    /// The built-in tables for AArch64, ARM and X86 on Android and Linux.
    pub fn builtin() -> Self {
        let undefine = [
            "BACKTRACE_HEADER",
            "ENABLE_BACKTRACES",
            "ENABLE_CRASH_OVERRIDES",
            "HAVE_BACKTRACE",
            "HAVE_POSIX_SPAWN",
            "HAVE_PTHREAD_GETNAME_NP",
            "HAVE_PTHREAD_SETNAME_NP",
            "HAVE_TERMIOS_H",
            "HAVE_ZLIB_H",
            "HAVE__UNWIND_BACKTRACE",
        ]
        .into_iter()
        .map(String::from)
        .collect();

        Self {
            undefine,
            dialect: Dialect::default(),
            architectures: vec![
                Architecture::aarch64(),
                Architecture::arm(),
                Architecture::x86(),
            ],
            platforms: vec![Platform::android(), Platform::linux()],
        }
    }

    /// Look up an architecture by name.
    pub fn architecture(&self, name: &str) -> Option<&Architecture> {
        self.architectures.iter().find(|a| a.name == name)
    }

    /// Look up a platform by name.
    pub fn platform(&self, name: &str) -> Option<&Platform> {
        self.platforms.iter().find(|p| p.name == name)
    }

    /// Look up a platform, failing with the list of known names.
    pub fn require_platform(&self, name: &str) -> Result<&Platform> {
        self.platform(name)
            .ok_or_else(|| TargetError::UnknownPlatform {
                name: name.to_string(),
                known: self.platform_names().map(String::from).collect(),
            })
    }

    /// Platform names in table order.
    pub fn platform_names(&self) -> impl Iterator<Item = &str> {
        self.platforms.iter().map(|p| p.name.as_str())
    }

    /// Whether `symbol` belongs to the undefinition set.
    pub fn is_undefined(&self, symbol: &str) -> bool {
        self.undefine.contains(symbol)
    }

    /// Architecture owning `detection_macro`, if any.
    pub fn architecture_detected_by(&self, detection_macro: &str) -> Option<&Architecture> {
        self.architectures
            .iter()
            .find(|a| a.is_detected_by(detection_macro))
    }
}

impl Default for TargetTables {
    fn default() -> Self {
        Self::builtin()
    }
}
