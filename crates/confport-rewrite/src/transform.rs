//! Line and file transformer.
//!
//! Holds no state between lines: the output for a line depends only on the line
//! itself and the tables the transformer was built with.

use std::borrow::Cow;

use confport_targets::{Platform, SuffixRecovery, TargetTables};

use crate::classify::{LineClass, LineClassifier};
use crate::emit::GeneratedBlock;
use crate::error::Result;

/// Rewrites header text for one platform.
#[derive(Debug, Clone)]
pub struct Transformer<'t> {
    tables: &'t TargetTables,
    platform: &'t Platform,
    classifier: LineClassifier<'t>,
}

impl<'t> Transformer<'t> {
    pub fn new(tables: &'t TargetTables, platform: &'t Platform) -> Result<Self> {
        Ok(Self {
            tables,
            platform,
            classifier: LineClassifier::new(tables)?,
        })
    }

    /// Build a transformer for the platform named `platform`.
    pub fn for_platform(tables: &'t TargetTables, platform: &str) -> Result<Self> {
        let platform = tables.require_platform(platform)?;
        Self::new(tables, platform)
    }

    pub fn platform(&self) -> &Platform {
        self.platform
    }

    pub fn classify<'a>(&self, line: &'a str) -> LineClass<'a> {
        self.classifier.classify(line)
    }

    /// Transform one line (terminator included, if any).
    ///
    /// Unclassified lines are borrowed back unchanged.
    pub fn transform_line<'a>(&self, line: &'a str) -> Cow<'a, str> {
        match self.rewrite(line) {
            Some(block) => {
                let mut out = String::new();
                block.render_into(&mut out);
                Cow::Owned(out)
            }
            None => Cow::Borrowed(line),
        }
    }

    /// Transform a whole file, returning the new text.
    pub fn transform_text(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        self.transform_into(text, &mut out);
        out
    }

    /// Transform `text` into `out`, returning the number of rewritten lines.
    pub fn transform_into(&self, text: &str, out: &mut String) -> usize {
        let mut rewritten = 0;
        for line in text.split_inclusive('\n') {
            match self.rewrite(line) {
                Some(block) => {
                    block.render_into(out);
                    rewritten += 1;
                }
                None => out.push_str(line),
            }
        }
        rewritten
    }

    fn rewrite(&self, line: &str) -> Option<GeneratedBlock> {
        let block = match self.classify(line) {
            LineClass::ArchInvocation { arch } => {
                // The echoed line keeps its own `\r`, if any.
                let body = line.strip_suffix('\n').unwrap_or(line);
                match self.tables.architecture(arch) {
                    Some(architecture) => GeneratedBlock::guarded(&architecture.condition(), body),
                    None => {
                        tracing::warn!(arch, "invocation names an architecture with no table entry");
                        GeneratedBlock::unknown_architecture(body)
                    }
                }
            }
            LineClass::NativeInit {
                field,
                init,
                literal,
            } => {
                let macro_name = format!("{}{field}", self.tables.dialect.native_prefix);
                let suffix = self.recover_suffix(field, literal);
                GeneratedBlock::native_init(&self.tables.architectures, &macro_name, init, suffix)
            }
            LineClass::TripleDefine { name, .. } => GeneratedBlock::triple(self.platform, name),
            LineClass::Undefine { symbol } => GeneratedBlock::undefined(symbol),
            LineClass::Verbatim => return None,
        };
        Some(block)
    }

    fn recover_suffix<'a>(&self, field: &str, literal: &'a str) -> &'a str {
        match self.tables.dialect.suffix_recovery {
            SuffixRecovery::None => "",
            SuffixRecovery::FieldName => field_suffix(field, literal),
        }
    }
}

/// Tail of `literal` equal to `field` ignoring ASCII case, in the literal's own casing.
///
/// `("ASMPARSER", "X86AsmParser")` gives `"AsmParser"`; `("ARCH", "X86")` gives `""`.
pub fn field_suffix<'a>(field: &str, literal: &'a str) -> &'a str {
    let Some(start) = literal.len().checked_sub(field.len()) else {
        return "";
    };
    if !literal.is_char_boundary(start) {
        return "";
    }
    let tail = &literal[start..];
    if tail.eq_ignore_ascii_case(field) {
        tail
    } else {
        ""
    }
}
