//! Shared infrastructure: spans and diagnostics

mod error;
mod span;

pub use error::{Diagnostic, DiagnosticKind, DiagnosticReporter};
pub use span::Span;
