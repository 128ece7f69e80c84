//! Diagnostics produced while reading and validating a workflow file
//!
//! Every problem found in a file becomes a [`Diagnostic`] instead of an early
//! return, so a single pass can report everything that is wrong with it.

use serde::{Deserialize, Serialize};

/// Source location of a diagnostic (1-indexed; a zero line means unknown)
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    /// File name, empty when the source was not read from a named file
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub file: String,
    /// Line (1-indexed)
    pub line: usize,
    /// Column (1-indexed)
    pub column: usize,
}

impl Position {
    pub fn new(file: impl Into<String>, line: usize, column: usize) -> Self {
        Self {
            file: file.into(),
            line,
            column,
        }
    }

    /// Whether this position points somewhere in a file
    pub fn is_known(&self) -> bool {
        self.line != 0
    }
}

/// Severity levels, ordered from least to most severe
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// The file is still runnable but might not do what the author intended
    Warning,
    /// The file can be displayed but cannot be executed
    Error,
    /// The file cannot even be displayed reliably (syntax failure or a cycle)
    Fatal,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Warning => "warning",
            Severity::Error => "error",
            Severity::Fatal => "fatal",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single problem found in a workflow file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Human-readable message
    pub message: String,
    /// Where the problem is
    pub position: Position,
    /// How bad it is
    pub severity: Severity,
    /// Validation rule that produced this diagnostic, if any
    #[serde(skip)]
    pub rule: Option<&'static str>,
}

impl Diagnostic {
    pub fn new(severity: Severity, position: Position, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            position,
            severity,
            rule: None,
        }
    }

    /// Create a new fatal diagnostic
    pub fn fatal(position: Position, message: impl Into<String>) -> Self {
        Self::new(Severity::Fatal, position, message)
    }

    /// Create a new error diagnostic
    pub fn error(position: Position, message: impl Into<String>) -> Self {
        Self::new(Severity::Error, position, message)
    }

    /// Create a new warning diagnostic
    pub fn warning(position: Position, message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, position, message)
    }

    /// Tag the diagnostic with the validation rule that produced it
    pub fn with_rule(mut self, rule: &'static str) -> Self {
        self.rule = Some(rule);
        self
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.position.is_known() {
            write!(f, "Line {}: {}", self.position.line, self.message)
        } else {
            f.write_str(&self.message)
        }
    }
}

/// Sort diagnostics by line.
///
/// The sort is stable, so diagnostics on the same line keep their emission
/// order: left to right, extraction problems before validation problems.
pub fn sort_diagnostics(diagnostics: &mut [Diagnostic]) {
    diagnostics.sort_by_key(|d| d.position.line);
}
