//! TOML parsing, serialization and validation for table definitions.
//!
//! Tables can be overridden with a `.toml` file holding `undefine`, `[dialect]`,
//! `[[architectures]]` and `[[platforms]]` entries. This module loads, validates
//! and serializes such files.

use std::collections::HashSet;
use std::path::Path;

use crate::error::{Result, TargetError};
use crate::tables::TargetTables;

/// How serious a validation finding is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

/// A validation issue found in a table definition.
#[derive(Debug, Clone)]
pub struct ValidationIssue {
    pub severity: Severity,
    /// Human-readable description.
    pub message: String,
}

impl ValidationIssue {
    fn error(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            message: message.into(),
        }
    }

    fn warning(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            message: message.into(),
        }
    }
}

/// Load tables from a TOML file.
pub fn load_tables_toml(path: &Path) -> Result<TargetTables> {
    if !path.exists() {
        return Err(TargetError::NotFound {
            path: path.to_path_buf(),
        });
    }
    let content = std::fs::read_to_string(path)?;
    parse_tables_toml(&content)
}

/// Parse tables from a TOML string.
pub fn parse_tables_toml(toml_str: &str) -> Result<TargetTables> {
    let tables: TargetTables = toml::from_str(toml_str)?;
    Ok(tables)
}

/// Serialize tables to pretty TOML.
pub fn tables_to_toml(tables: &TargetTables) -> Result<String> {
    let toml_str = toml::to_string_pretty(tables)?;
    Ok(toml_str)
}

/// Generate a template tables file seeded from the built-in tables.
pub fn generate_template() -> Result<String> {
    tables_to_toml(&TargetTables::builtin())
}

/// Load tables from `path` and reject them if validation reports errors.
///
/// Warnings are logged and otherwise ignored.
pub fn load_validated(path: &Path) -> Result<TargetTables> {
    let tables = load_tables_toml(path)?;
    check(&tables)?;
    Ok(tables)
}

/// Validate `tables`, logging warnings and turning errors into [`TargetError::Validation`].
pub fn check(tables: &TargetTables) -> Result<()> {
    let issues = match validate_tables(tables) {
        Ok(()) => return Ok(()),
        Err(issues) => issues,
    };
    let mut errors = Vec::new();
    for issue in issues {
        match issue.severity {
            Severity::Warning => tracing::warn!("tables: {}", issue.message),
            Severity::Error => errors.push(issue.message),
        }
    }
    if errors.is_empty() {
        Ok(())
    } else {
        Err(TargetError::Validation {
            detail: errors.join("; "),
        })
    }
}

fn is_c_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Validate tables for structural correctness.
///
/// Returns `Ok(())` if no issues were found, or `Err(issues)` with every problem,
/// warnings included.
pub fn validate_tables(tables: &TargetTables) -> std::result::Result<(), Vec<ValidationIssue>> {
    let mut issues = Vec::new();

    // 1. At least one architecture
    if tables.architectures.is_empty() {
        issues.push(ValidationIssue::error("no architectures defined"));
    }

    // 2. Architecture names are unique identifiers with detection macros
    let mut arch_names = HashSet::new();
    for arch in &tables.architectures {
        if !is_c_identifier(&arch.name) {
            issues.push(ValidationIssue::error(format!(
                "architecture name '{}' is not a valid identifier",
                arch.name
            )));
        }
        if !arch_names.insert(arch.name.as_str()) {
            issues.push(ValidationIssue::error(format!(
                "duplicate architecture '{}'",
                arch.name
            )));
        }
        if arch.detection_macros.is_empty() {
            issues.push(ValidationIssue::error(format!(
                "architecture '{}' has no detection macros",
                arch.name
            )));
        }
        for m in &arch.detection_macros {
            if !is_c_identifier(m) {
                issues.push(ValidationIssue::error(format!(
                    "detection macro '{}' of architecture '{}' is not a valid identifier",
                    m, arch.name
                )));
            }
        }
    }

    // 3. Detection macro sets are pairwise disjoint
    let archs = &tables.architectures;
    for i in 0..archs.len() {
        for j in (i + 1)..archs.len() {
            for m in &archs[i].detection_macros {
                if archs[j].is_detected_by(m) {
                    issues.push(ValidationIssue::error(format!(
                        "detection macro '{}' is shared by architectures '{}' and '{}'",
                        m, archs[i].name, archs[j].name
                    )));
                }
            }
        }
    }

    // 4. Platforms are unique and have usable triple tables
    let mut platform_names = HashSet::new();
    for platform in &tables.platforms {
        if !platform_names.insert(platform.name.as_str()) {
            issues.push(ValidationIssue::error(format!(
                "duplicate platform '{}'",
                platform.name
            )));
        }
        if platform.triples.is_empty() {
            issues.push(ValidationIssue::error(format!(
                "platform '{}' has no triples",
                platform.name
            )));
        }
        let mut seen = HashSet::new();
        for entry in &platform.triples {
            if !seen.insert(entry.detection_macro.as_str()) {
                issues.push(ValidationIssue::error(format!(
                    "platform '{}' lists detection macro '{}' more than once",
                    platform.name, entry.detection_macro
                )));
            }
            if entry.triple.is_empty() || entry.triple.contains('"') {
                issues.push(ValidationIssue::error(format!(
                    "platform '{}' has an invalid triple '{}'",
                    platform.name, entry.triple
                )));
            }
            if tables.architecture_detected_by(&entry.detection_macro).is_none() {
                issues.push(ValidationIssue::warning(format!(
                    "platform '{}' detection macro '{}' belongs to no architecture",
                    platform.name, entry.detection_macro
                )));
            }
        }
    }

    // 5. Undefined symbols are identifiers
    for symbol in &tables.undefine {
        if !is_c_identifier(symbol) {
            issues.push(ValidationIssue::error(format!(
                "undefined symbol '{symbol}' is not a valid identifier"
            )));
        }
    }

    // 6. Dialect prefixes are non-empty
    if tables.dialect.macro_prefix.is_empty() {
        issues.push(ValidationIssue::error("dialect macro-prefix is empty"));
    }
    if tables.dialect.native_prefix.is_empty() {
        issues.push(ValidationIssue::error("dialect native-prefix is empty"));
    }

    if issues.is_empty() {
        Ok(())
    } else {
        Err(issues)
    }
}
