//! Line classification.
//!
//! Every header line falls into exactly one [`LineClass`]. Rules are tried in a
//! fixed priority order and the first match wins:
//!
//! 1. `PREFIX_NAME(Arch)`: architecture-conditional invocation
//! 2. `#define NATIVE_FIELD [Init]Literal`: native-initialization definition
//! 3. `#define PREFIX_..._TRIPLE "value"`: target-triple definition
//! 4. `#define SYMBOL value` with `SYMBOL` in the undefinition set
//! 5. anything else: verbatim

use confport_targets::{Dialect, TargetTables};
use regex::Regex;

use crate::error::Result;

/// Classification of one header line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineClass<'a> {
    /// `LLVM_TARGET(X86)`: invocation that only applies to one architecture.
    ArchInvocation {
        /// The architecture argument.
        arch: &'a str,
    },
    /// `#define LLVM_NATIVE_ASMPARSER LLVMInitializeX86AsmParser`.
    NativeInit {
        /// Field name after the native prefix (e.g., "ASMPARSER").
        field: &'a str,
        /// Init prefix when present, otherwise empty.
        init: &'a str,
        /// Remainder of the value after the init prefix (e.g., "X86AsmParser").
        literal: &'a str,
    },
    /// `#define LLVM_DEFAULT_TARGET_TRIPLE "x86_64-unknown-linux-gnu"`.
    TripleDefine {
        /// Full macro name.
        name: &'a str,
        /// The single-platform triple being replaced.
        value: &'a str,
    },
    /// `#define HAVE_ZLIB_H 1` where the symbol must be compiled out.
    Undefine {
        /// The defined symbol.
        symbol: &'a str,
    },
    /// Anything else; copied unchanged.
    Verbatim,
}

/// Split a line into its content and its terminator (`"\n"`, `"\r\n"` or `""`).
pub fn split_terminator(line: &str) -> (&str, &str) {
    if let Some(content) = line.strip_suffix("\r\n") {
        (content, &line[content.len()..])
    } else if let Some(content) = line.strip_suffix('\n') {
        (content, &line[content.len()..])
    } else {
        (line, "")
    }
}

/// Compiled rewrite patterns for one dialect, bound to the tables they came from.
#[derive(Debug, Clone)]
pub struct LineClassifier<'t> {
    arch_invocation: Regex,
    native_init: Regex,
    triple_define: Regex,
    define: Regex,
    tables: &'t TargetTables,
}

impl<'t> LineClassifier<'t> {
    /// Compile the patterns for `tables.dialect`.
    pub fn new(tables: &'t TargetTables) -> Result<Self> {
        let Dialect {
            macro_prefix,
            native_prefix,
            init_prefix,
            ..
        } = &tables.dialect;
        let prefix = regex::escape(macro_prefix);
        let native = regex::escape(native_prefix);

        let init = if init_prefix.is_empty() {
            String::new()
        } else {
            format!("(?P<init>{})?", regex::escape(init_prefix))
        };

        Ok(Self {
            arch_invocation: Regex::new(&format!(r"^{prefix}_[A-Z_]+\((?P<arch>[A-Za-z0-9_]+)\)$"))?,
            native_init: Regex::new(&format!(
                r"^#define {native}(?P<field>[A-Z]+) {init}(?P<literal>.*)$"
            ))?,
            triple_define: Regex::new(&format!(
                r#"^#define (?P<name>{prefix}_[A-Z_]+_TRIPLE) "(?P<value>.*)"$"#
            ))?,
            define: Regex::new(r"^#define (?P<symbol>[A-Za-z0-9_]+) (.*)$")?,
            tables,
        })
    }

    /// Classify one line. A trailing `\n` or `\r\n` is ignored.
    pub fn classify<'a>(&self, line: &'a str) -> LineClass<'a> {
        let (content, _) = split_terminator(line);

        if let Some(caps) = self.arch_invocation.captures(content) {
            if let Some(arch) = caps.name("arch") {
                return LineClass::ArchInvocation {
                    arch: arch.as_str(),
                };
            }
        }

        if let Some(caps) = self.native_init.captures(content) {
            if let (Some(field), Some(literal)) = (caps.name("field"), caps.name("literal")) {
                return LineClass::NativeInit {
                    field: field.as_str(),
                    init: caps.name("init").map_or("", |m| m.as_str()),
                    literal: literal.as_str(),
                };
            }
        }

        if let Some(caps) = self.triple_define.captures(content) {
            if let (Some(name), Some(value)) = (caps.name("name"), caps.name("value")) {
                return LineClass::TripleDefine {
                    name: name.as_str(),
                    value: value.as_str(),
                };
            }
        }

        if let Some(caps) = self.define.captures(content) {
            if let Some(symbol) = caps.name("symbol") {
                if self.tables.is_undefined(symbol.as_str()) {
                    return LineClass::Undefine {
                        symbol: symbol.as_str(),
                    };
                }
            }
        }

        LineClass::Verbatim
    }
}
