//! GenesisBASIC compiler for the Sega Mega Drive/Genesis
//!
//! Translates a small BASIC-like language describing Genesis hardware
//! operations (tile/sprite/palette/VDP register writes, controller polling,
//! sound-chip writes, arithmetic, control flow) into Motorola 68000 assembly
//! text for an external assembler.
//!
//! ## Architecture
//!
//! One single-threaded pass per compilation unit:
//! - **Lexer** (`lexer/`): recognizes statement shapes and captures their
//!   operand fields; total, never fails
//! - **Codegen** (`codegen/`): per-statement dispatch over the token stream,
//!   backed by the symbol table/allocator, operand resolver, and skip-label
//!   stack
//! - **Driver** (`driver/`): orchestrates the pass and enforces the exit
//!   contract (any diagnostic suppresses output)
//! - **Common** (`common/`): spans and diagnostics

pub mod codegen;
pub mod common;
pub mod driver;
pub mod lexer;

// Re-exports for convenience
pub use codegen::{CodeGenerator, CompilationUnit};
pub use common::{Diagnostic, DiagnosticKind, DiagnosticReporter, Span};
pub use driver::compile;
