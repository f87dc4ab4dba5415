//! Symbol table and static storage allocator
//!
//! Variables live at fixed work-RAM addresses handed out by a monotonic
//! cursor. The language has no scopes, so storage is never reclaimed; the
//! table lives for the whole compilation unit and drives the end-of-unit
//! storage-reservation epilogue in declaration order.

use crate::lexer::token::StorageClass;
use std::collections::HashMap;

/// Start of writable work RAM where variables are allocated
pub const RAM_BASE: u32 = 0xFF0000;

/// A declared variable with its assigned storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variable {
    pub name: String,
    pub class: StorageClass,
    /// 24-bit work-RAM address
    pub address: u32,
}

/// Flat, unscoped symbol table
#[derive(Debug)]
pub struct SymbolTable {
    vars: Vec<Variable>,
    index: HashMap<String, usize>,
    cursor: u32,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self {
            vars: Vec::new(),
            index: HashMap::new(),
            cursor: RAM_BASE,
        }
    }

    /// Reserve storage for `name` and return its address, or `None` if the
    /// name is already declared (in which case nothing is allocated and the
    /// original mapping is untouched).
    pub fn declare(&mut self, name: &str, class: StorageClass) -> Option<u32> {
        if self.index.contains_key(name) {
            return None;
        }
        let address = self.cursor;
        self.cursor += class.size();
        self.index.insert(name.to_string(), self.vars.len());
        self.vars.push(Variable {
            name: name.to_string(),
            class,
            address,
        });
        Some(address)
    }

    pub fn lookup(&self, name: &str) -> Option<&Variable> {
        self.index.get(name).map(|&i| &self.vars[i])
    }

    /// Variables in declaration order
    pub fn iter(&self) -> impl Iterator<Item = &Variable> {
        self.vars.iter()
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}
