//! Statement recognizer for the GenesisBASIC source language
//!
//! Converts raw source text into an ordered sequence of typed statement
//! tokens carrying their captured operand fields.

pub mod scanner;
pub mod token;

pub use scanner::{Scanner, tokenize};
pub use token::{Token, TokenKind};
