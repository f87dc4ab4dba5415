//! Operand classification
//!
//! A pure function from an operand lexeme to its addressing form. Declared
//! variables shadow register names, which shadow literals; anything else is
//! `Invalid`, carrying the raw lexeme so the generator can keep going and
//! accumulate the diagnostic instead of aborting the pass.

use super::symtab::SymbolTable;

/// The 15 machine register names usable as operands
pub const REGISTERS: [&str; 15] = [
    "D0", "D1", "D2", "D3", "D4", "D5", "D6", "D7", "A0", "A1", "A2", "A3", "A4", "A5", "A6",
];

/// A classified operand ready to render as assembly text
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedOperand {
    /// Numeric or hex literal, rendered `#lit`
    Immediate(String),
    /// Direct machine register, canonical uppercase
    Register(&'static str),
    /// Declared variable, rendered as a memory reference `(name)`
    MemoryRef(String),
    /// Unclassifiable lexeme, rendered as written
    Invalid(String),
}

impl ResolvedOperand {
    pub fn render(&self) -> String {
        match self {
            Self::Immediate(lit) => format!("#{lit}"),
            Self::Register(reg) => (*reg).to_string(),
            Self::MemoryRef(name) => format!("({name})"),
            Self::Invalid(raw) => raw.clone(),
        }
    }
}

/// Classify an operand lexeme against the symbol table.
pub fn resolve(lexeme: &str, symbols: &SymbolTable) -> ResolvedOperand {
    if symbols.lookup(lexeme).is_some() {
        return ResolvedOperand::MemoryRef(lexeme.to_string());
    }
    if let Some(reg) = REGISTERS.iter().find(|r| r.eq_ignore_ascii_case(lexeme)) {
        return ResolvedOperand::Register(reg);
    }
    if is_hex(lexeme) || is_decimal(lexeme) {
        return ResolvedOperand::Immediate(lexeme.to_string());
    }
    ResolvedOperand::Invalid(lexeme.to_string())
}

/// Numeric value of a decimal or `$`-prefixed hex literal.
pub fn parse_literal(s: &str) -> Option<u32> {
    match s.strip_prefix('$') {
        Some(hex) => u32::from_str_radix(hex, 16).ok(),
        None => s.parse().ok(),
    }
}

fn is_hex(s: &str) -> bool {
    s.strip_prefix('$')
        .is_some_and(|h| !h.is_empty() && h.bytes().all(|b| b.is_ascii_hexdigit()))
}

fn is_decimal(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}
