//! Architecture model.
//!
//! An architecture is identified by name and detected at compile time by any one
//! of a set of compiler-defined preprocessor macros.

use serde::{Deserialize, Serialize};

/// A CPU instruction-set target and the macros that detect it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Architecture {
    /// Architecture name as spelled in generated headers (e.g., "X86", "AArch64").
    pub name: String,
    /// Detection macros; any one being defined selects this architecture.
    pub detection_macros: Vec<String>,
}

impl Architecture {
    pub fn new<I, S>(name: impl Into<String>, detection_macros: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            detection_macros: detection_macros.into_iter().map(Into::into).collect(),
        }
    }

    /// Preprocessor condition selecting this architecture.
    ///
    /// Renders `defined(A) || defined(B)` in table order.
    pub fn condition(&self) -> String {
        self.detection_macros
            .iter()
            .map(|m| format!("defined({m})"))
            .collect::<Vec<_>>()
            .join(" || ")
    }

    /// Whether `macro_name` is one of this architecture's detection macros.
    pub fn is_detected_by(&self, macro_name: &str) -> bool {
        self.detection_macros.iter().any(|m| m == macro_name)
    }

    /// AArch64 (ARMv8-A, 64-bit).
    pub fn aarch64() -> Self {
        Self::new("AArch64", ["__aarch64__"])
    }

    /// 32-bit ARM.
    pub fn arm() -> Self {
        Self::new("ARM", ["__arm__"])
    }

    /// x86, both 32-bit and 64-bit.
    pub fn x86() -> Self {
        Self::new("X86", ["__i386__", "__x86_64__"])
    }
}
