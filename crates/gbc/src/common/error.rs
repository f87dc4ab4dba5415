//! Diagnostics and terminal reporting

use codespan_reporting::diagnostic::{self, Label};
use codespan_reporting::files::SimpleFiles;
use codespan_reporting::term;
use codespan_reporting::term::termcolor::{ColorChoice, StandardStream};
use std::fmt;
use thiserror::Error;

use super::Span;

/// What went wrong with a single statement.
///
/// None of these abort the pass; they accumulate on the compilation unit
/// and make the overall run fail at the end.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DiagnosticKind {
    #[error("Variable {0} redeclared")]
    RedeclaredVariable(String),

    #[error("Invalid operand: {0}")]
    InvalidOperand(String),

    #[error("Unknown token: {0}")]
    UnknownToken(String),

    #[error("ENDIF without matching IF")]
    UnmatchedEndif,
}

/// A recorded compilation error with its source location
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub line: u32,
    pub span: Span,
}

impl Diagnostic {
    pub fn new(kind: DiagnosticKind, line: u32, span: Span) -> Self {
        Self { kind, line, span }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Error line {}: {}", self.line, self.kind)
    }
}

/// Diagnostic reporter for pretty error output
pub struct DiagnosticReporter {
    files: SimpleFiles<String, String>,
    writer: StandardStream,
    config: term::Config,
}

impl DiagnosticReporter {
    pub fn new() -> Self {
        Self {
            files: SimpleFiles::new(),
            writer: StandardStream::stderr(ColorChoice::Auto),
            config: term::Config::default(),
        }
    }

    pub fn add_file(&mut self, name: impl Into<String>, source: impl Into<String>) -> usize {
        self.files.add(name.into(), source.into())
    }

    pub fn report(&self, file_id: usize, diag: &Diagnostic) {
        let rendered = diagnostic::Diagnostic::error()
            .with_message(diag.kind.to_string())
            .with_labels(vec![Label::primary(file_id, diag.span.start..diag.span.end)]);

        let _ = term::emit(&mut self.writer.lock(), &self.config, &self.files, &rendered);
    }

    pub fn report_all(&self, file_id: usize, diags: &[Diagnostic]) {
        for diag in diags {
            self.report(file_id, diag);
        }
    }
}

impl Default for DiagnosticReporter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_display_format() {
        let diag = Diagnostic::new(
            DiagnosticKind::RedeclaredVariable("score".to_string()),
            3,
            Span::new(10, 32),
        );
        assert_eq!(diag.to_string(), "Error line 3: Variable score redeclared");

        let diag = Diagnostic::new(
            DiagnosticKind::InvalidOperand("bogus".to_string()),
            7,
            Span::default(),
        );
        assert_eq!(diag.to_string(), "Error line 7: Invalid operand: bogus");

        let diag = Diagnostic::new(DiagnosticKind::UnmatchedEndif, 1, Span::default());
        assert_eq!(diag.to_string(), "Error line 1: ENDIF without matching IF");
    }
}
