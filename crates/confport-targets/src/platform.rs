//! Host platform triple tables.
//!
//! Each platform maps detection macros to the canonical target triple used on
//! that host. Entry order becomes `#if`/`#elif` branch order in generated headers.

use serde::{Deserialize, Serialize};

/// One (detection macro, triple) pair of a platform table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct TripleEntry {
    /// Compiler-defined macro selecting this entry (e.g., "__x86_64__").
    pub detection_macro: String,
    /// Target triple (e.g., "x86_64-unknown-linux-gnu").
    pub triple: String,
}

impl TripleEntry {
    pub fn new(detection_macro: impl Into<String>, triple: impl Into<String>) -> Self {
        Self {
            detection_macro: detection_macro.into(),
            triple: triple.into(),
        }
    }
}

/// A host platform and its ordered triple table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Platform {
    /// Platform name (e.g., "android", "linux").
    pub name: String,
    /// Ordered triple entries.
    pub triples: Vec<TripleEntry>,
}

impl Platform {
    /// Triple selected by `detection_macro`, if any.
    pub fn triple_for(&self, detection_macro: &str) -> Option<&str> {
        self.triples
            .iter()
            .find(|t| t.detection_macro == detection_macro)
            .map(|t| t.triple.as_str())
    }

    /// Android NDK triples.
    pub fn android() -> Self {
        Self {
            name: "android".into(),
            triples: vec![
                TripleEntry::new("__x86_64__", "x86_64-linux-android"),
                TripleEntry::new("__i386__", "i686-linux-android"),
                TripleEntry::new("__arm__", "armv7-linux-androideabi"),
                TripleEntry::new("__aarch64__", "aarch64-linux-android"),
            ],
        }
    }

    /// Desktop GNU/Linux triples.
    pub fn linux() -> Self {
        Self {
            name: "linux".into(),
            triples: vec![
                TripleEntry::new("__x86_64__", "x86_64-unknown-linux-gnu"),
                TripleEntry::new("__i386__", "i686-pc-linux-gnu"),
                TripleEntry::new("__arm__", "armv7-linux-gnueabihf"),
                TripleEntry::new("__aarch64__", "aarch64-linux-gnu"),
            ],
        }
    }
}
