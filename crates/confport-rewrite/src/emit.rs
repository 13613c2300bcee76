//! Conditional-compilation block construction.
//!
//! Case-analysis blocks always end with an `#else` branch carrying an
//! `#error`, so a compilation for an architecture missing from the tables fails
//! loudly instead of silently picking up another architecture's definitions.

use std::fmt;

use confport_targets::{Architecture, Platform};

/// Diagnostic emitted when no branch of a block matches.
pub const UNKNOWN_ARCHITECTURE: &str = "#error \"unknown architecture\"";

/// An ordered sequence of output lines, rendered with `\n` terminators.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeneratedBlock {
    lines: Vec<String>,
}

impl GeneratedBlock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one line (without terminator).
    pub fn push(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Append the rendered block to `out`.
    pub fn render_into(&self, out: &mut String) {
        for line in &self.lines {
            out.push_str(line);
            out.push('\n');
        }
    }

    /// `#if <condition>` / `body` / `#endif`.
    pub fn guarded(condition: &str, body: &str) -> Self {
        let mut block = Self::new();
        block.push(format!("#if {condition}"));
        block.push(body);
        block.push("#endif");
        block
    }

    /// Total case analysis: one `#if`/`#elif` per branch, then `#else` + `#error`.
    ///
    /// With no branches at all only the `#error` line is emitted.
    pub fn case_analysis<I>(branches: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut block = Self::new();
        let mut directive = "#if";
        for (condition, body) in branches {
            block.push(format!("{directive} {condition}"));
            block.push(body);
            directive = "#elif";
        }
        if directive == "#if" {
            block.push(UNKNOWN_ARCHITECTURE);
            return block;
        }
        block.push("#else");
        block.push(UNKNOWN_ARCHITECTURE);
        block.push("#endif");
        block
    }

    /// Redefine `<macro_name>` as `<init><arch><suffix>` for every architecture.
    pub fn native_init(
        architectures: &[Architecture],
        macro_name: &str,
        init: &str,
        suffix: &str,
    ) -> Self {
        Self::case_analysis(architectures.iter().map(|arch| {
            (
                arch.condition(),
                format!("#define {macro_name} {init}{}{suffix}", arch.name),
            )
        }))
    }

    /// Redefine `<macro_name>` as the platform's triple for each detection macro.
    pub fn triple(platform: &Platform, macro_name: &str) -> Self {
        Self::case_analysis(platform.triples.iter().map(|entry| {
            (
                format!("defined({})", entry.detection_macro),
                format!("#define {macro_name} \"{}\"", entry.triple),
            )
        }))
    }

    /// Commented-out record of an intentionally undefined symbol.
    pub fn undefined(symbol: &str) -> Self {
        let mut block = Self::new();
        block.push(format!("/* #undef {symbol} */"));
        block
    }

    /// Invocation naming an architecture with no table entry.
    ///
    /// No detection macro selects it, so the line is kept under `#if 0` and is
    /// compiled out on every target. Builds for the supported architectures
    /// are unaffected.
    pub fn unknown_architecture(body: &str) -> Self {
        Self::guarded("0", body)
    }
}

impl fmt::Display for GeneratedBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in &self.lines {
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use confport_targets::{TargetTables, TripleEntry};

    #[test]
    fn guarded_block() {
        let block = GeneratedBlock::guarded("defined(__arm__)", "LLVM_TARGET(ARM)");
        assert_eq!(
            block.to_string(),
            "#if defined(__arm__)\nLLVM_TARGET(ARM)\n#endif\n"
        );
    }

    #[test]
    fn native_init_covers_every_architecture() {
        let tables = TargetTables::builtin();
        let block = GeneratedBlock::native_init(
            &tables.architectures,
            "LLVM_NATIVE_TARGET",
            "LLVMInitialize",
            "Target",
        );
        assert_eq!(
            block.to_string(),
            "#if defined(__aarch64__)\n\
             #define LLVM_NATIVE_TARGET LLVMInitializeAArch64Target\n\
             #elif defined(__arm__)\n\
             #define LLVM_NATIVE_TARGET LLVMInitializeARMTarget\n\
             #elif defined(__i386__) || defined(__x86_64__)\n\
             #define LLVM_NATIVE_TARGET LLVMInitializeX86Target\n\
             #else\n\
             #error \"unknown architecture\"\n\
             #endif\n"
        );
    }

    #[test]
    fn triple_block_follows_platform_order() {
        let block = GeneratedBlock::triple(&Platform::android(), "LLVM_HOST_TRIPLE");
        let lines = block.lines();
        assert_eq!(lines[0], "#if defined(__x86_64__)");
        assert_eq!(lines[1], "#define LLVM_HOST_TRIPLE \"x86_64-linux-android\"");
        assert_eq!(lines[2], "#elif defined(__i386__)");
        assert_eq!(lines[6], "#elif defined(__aarch64__)");
        assert_eq!(lines[8], "#else");
        assert_eq!(lines[9], UNKNOWN_ARCHITECTURE);
        assert_eq!(lines[10], "#endif");
        assert_eq!(lines.len(), 11);
    }

    #[test]
    fn single_entry_has_no_elif() {
        let platform = Platform {
            name: "solo".into(),
            triples: vec![TripleEntry::new("__riscv", "riscv64-unknown-elf")],
        };
        let block = GeneratedBlock::triple(&platform, "LLVM_HOST_TRIPLE");
        assert!(!block.lines().iter().any(|l| l.starts_with("#elif")));
        assert_eq!(block.lines().len(), 5);
    }

    #[test]
    fn empty_case_analysis_is_only_error() {
        let block = GeneratedBlock::case_analysis(Vec::<(String, String)>::new());
        assert_eq!(block.lines(), [UNKNOWN_ARCHITECTURE]);
    }

    #[test]
    fn undefined_comment() {
        assert_eq!(
            GeneratedBlock::undefined("HAVE_ZLIB_H").to_string(),
            "/* #undef HAVE_ZLIB_H */\n"
        );
    }

    #[test]
    fn render_into_appends() {
        let mut out = String::from("// head\n");
        GeneratedBlock::undefined("HAVE_ZLIB_H").render_into(&mut out);
        assert_eq!(out, "// head\n/* #undef HAVE_ZLIB_H */\n");
    }

    #[test]
    fn unknown_architecture_is_compiled_out() {
        assert_eq!(
            GeneratedBlock::unknown_architecture("LLVM_TARGET(Mips)").to_string(),
            "#if 0\nLLVM_TARGET(Mips)\n#endif\n"
        );
    }
}
