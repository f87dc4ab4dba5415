//! Compilation driver
//!
//! A single synchronous pass: recognize, generate, then decide at the
//! boundary. State is fresh per call; nothing persists across runs. Any
//! accumulated diagnostic makes the run fail and suppresses the output text,
//! even though the instruction sequence was fully constructed.

use crate::codegen::{CodeGenerator, CompilationUnit};
use crate::common::Diagnostic;
use crate::lexer;
use std::fmt::Write as _;

/// Compile GenesisBASIC source to M68000 assembly text.
pub fn compile(source: &str) -> Result<String, Vec<Diagnostic>> {
    let unit = compile_unit(source);
    if unit.has_errors() {
        Err(unit.diagnostics)
    } else {
        Ok(unit.render())
    }
}

/// Run the full pass and keep everything it produced, diagnostics included.
pub fn compile_unit(source: &str) -> CompilationUnit {
    let tokens = lexer::tokenize(source);
    CodeGenerator::new().generate(&tokens)
}

/// Debug listing of the recognized token stream.
pub fn dump_tokens(source: &str) -> String {
    let mut out = String::new();
    for token in lexer::tokenize(source) {
        let _ = writeln!(out, "{:>4}  {:?}", token.line, token.kind);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const DEMO: &str = "\
// minimal program
DIM score AS WORD = 0
VDP SET 1, $64
main:
WAITVBLANK
ADD score, 1
GOTO main
";

    #[test]
    fn test_success_produces_text() {
        let asm = compile(DEMO).expect("demo compiles");
        assert!(asm.starts_with("; GenesisBASIC Compiled ROM\n"));
        assert!(asm.contains("    add.w #1, (score)"));
        assert!(asm.contains("score: ds.w 1"));
        assert!(asm.ends_with("    end\n"));
    }

    #[test]
    fn test_full_program_compiles() {
        // Uninitialized declarations, bare keywords, and conditionals mixed
        // across lines the way a real program writes them.
        let source = "\
DIM pad AS WORD
PALETTE 0, $0EEE, $000E
SPRITE 0, 160, 120, 1, 0, 0, 0
loop:
WAITVBLANK
READCONTROLLER 0
MOVE D0, pad
IF pad AND 4 THEN
ADD pad, 1
ENDIF
GOTO loop
";
        let asm = compile(source).expect("program compiles");
        assert!(asm.contains(".wait_vblank:"));
        assert!(asm.contains("pad: ds.w 1"));
    }

    #[test]
    fn test_idempotent_output() {
        let first = compile(DEMO).unwrap();
        let second = compile(DEMO).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_failure_suppresses_output() {
        let result = compile("DIM score AS WORD\nDIM score AS WORD");
        let diags = result.expect_err("duplicate declaration must fail");
        assert_eq!(diags.len(), 1);
        assert_eq!(
            diags[0].to_string(),
            "Error line 2: Variable score redeclared"
        );
    }

    #[test]
    fn test_diagnostics_do_not_abort_generation() {
        // Three independent errors across the unit, all reported.
        let diags = compile("MOVE ghost, D0\nENDIF\nWHILE x > 0").unwrap_err();
        assert_eq!(diags.len(), 3);
    }

    #[test]
    fn test_epilogue_after_body() {
        let asm = compile("DIM a AS WORD\nDIM b AS LONG\nHALT").unwrap();
        let halt = asm.find("Halt: bra Halt").unwrap();
        let allocs = asm.find("; Variable allocations").unwrap();
        assert!(halt < allocs);
        assert!(asm.contains("a: ds.w 1\nb: ds.l 1\n    even\nrom_end:\n    end\n"));
    }

    #[test]
    fn test_dump_tokens() {
        let listing = dump_tokens("DIM x AS WORD\nHALT");
        assert!(listing.contains("Declare"));
        assert!(listing.contains("Halt"));
    }
}
