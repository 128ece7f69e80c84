//! Workflow file parser
//!
//! Turns a syntax tree into a [`Configuration`], collecting every problem
//! along the way instead of stopping at the first one:
//!
//! 1. extraction builds actions and workflows from the tree
//! 2. the semantic validator checks references, cycles and limits
//! 3. diagnostics are sorted by line and compared to the suppression level
//!
//! The result is either the configuration or a [`ParserError`] that still
//! carries the partial configuration and all diagnostics.

use std::path::Path;

use crate::diagnostics::{sort_diagnostics, Diagnostic, Severity};
use crate::error::{Error, Result};
use crate::model::{Action, Configuration, Workflow};
use crate::syntax::{self, ObjectList};

mod cycles;
mod extract;
mod literal;
pub mod positions;
pub mod semantic_validator;


use extract::{Extraction, Extractor};
use semantic_validator::{ValidationContext, Validator};

/* ===================== Options ===================== */

/// Controls which diagnostics make a parse fail
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseOptions {
    /// Diagnostics at or below this severity do not fail the parse; `None`
    /// means every diagnostic does
    pub suppress_severity: Option<Severity>,
}

impl ParseOptions {
    /// Fail only on errors and fatal problems
    pub fn suppress_warnings() -> Self {
        Self {
            suppress_severity: Some(Severity::Warning),
        }
    }

    /// Fail only on fatal problems
    pub fn suppress_errors() -> Self {
        Self {
            suppress_severity: Some(Severity::Error),
        }
    }

    /// Whether `diagnostic` makes the parse fail
    pub fn fails_on(&self, diagnostic: &Diagnostic) -> bool {
        match self.suppress_severity {
            None => true,
            Some(level) => diagnostic.severity > level,
        }
    }
}

/* ===================== Error Types ===================== */

/// A parse that found at least one unsuppressed diagnostic.
///
/// Carries whatever was extracted, so a caller can still show a best-effort
/// view of a broken file.
#[derive(Debug, Clone)]
pub struct ParserError {
    configuration: Configuration,
    suppress_severity: Option<Severity>,
}

impl ParserError {
    /// All diagnostics, suppressed ones included, sorted by line
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.configuration.diagnostics
    }

    /// Diagnostics that made the parse fail
    pub fn failures(&self) -> impl Iterator<Item = &Diagnostic> + '_ {
        let options = ParseOptions {
            suppress_severity: self.suppress_severity,
        };
        self.diagnostics()
            .iter()
            .filter(move |d| options.fails_on(d))
    }

    pub fn actions(&self) -> &[Action] {
        &self.configuration.actions
    }

    pub fn workflows(&self) -> &[Workflow] {
        &self.configuration.workflows
    }

    pub fn configuration(&self) -> &Configuration {
        &self.configuration
    }

    pub fn into_configuration(self) -> Configuration {
        self.configuration
    }
}

impl std::fmt::Display for ParserError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unable to parse and validate")?;
        for diagnostic in self.diagnostics() {
            write!(f, "\n  {}", diagnostic)?;
        }
        Ok(())
    }
}

impl std::error::Error for ParserError {}

pub type ParseResult<T> = std::result::Result<T, ParserError>;

/* ===================== Public API ===================== */

/// Parse an already-read syntax tree
pub fn parse(root: &ObjectList, options: &ParseOptions) -> ParseResult<Configuration> {
    let Extraction {
        mut configuration,
        positions,
        mut diagnostics,
    } = Extractor::new().extract(root);

    let context = ValidationContext::new(&configuration, &positions);
    diagnostics.extend(Validator::new().validate(&context));

    for action in &mut configuration.actions {
        dedup_in_order(&mut action.needs);
    }

    finish(configuration, diagnostics, options)
}

/// Parse source text with no file name attached to positions
pub fn parse_str(source: &str, options: &ParseOptions) -> ParseResult<Configuration> {
    parse_named(source, "", options)
}

/// Parse source text, stamping `file` on every diagnostic position
pub fn parse_named(source: &str, file: &str, options: &ParseOptions) -> ParseResult<Configuration> {
    match syntax::read(source, file) {
        Ok(root) => parse(&root, options),
        Err(diagnostic) => finish(Configuration::default(), vec![diagnostic], options),
    }
}

/// Read and parse a file. Failing to read it is an [`Error::Io`], not a
/// diagnostic.
pub fn parse_file(path: impl AsRef<Path>, options: &ParseOptions) -> Result<Configuration> {
    let path = path.as_ref();
    let source = std::fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(parse_named(&source, &path.display().to_string(), options)?)
}

/* ===================== Helpers ===================== */

fn finish(
    mut configuration: Configuration,
    mut diagnostics: Vec<Diagnostic>,
    options: &ParseOptions,
) -> ParseResult<Configuration> {
    sort_diagnostics(&mut diagnostics);
    let failed = diagnostics.iter().any(|d| options.fails_on(d));

    tracing::debug!(
        actions = configuration.actions.len(),
        workflows = configuration.workflows.len(),
        diagnostics = diagnostics.len(),
        failed,
        "parsed configuration"
    );

    configuration.diagnostics = diagnostics;
    if failed {
        Err(ParserError {
            configuration,
            suppress_severity: options.suppress_severity,
        })
    } else {
        Ok(configuration)
    }
}

/// Remove repeated entries, keeping the first occurrence of each
fn dedup_in_order(items: &mut Vec<String>) {
    let mut seen = std::collections::HashSet::new();
    items.retain(|item| seen.insert(item.clone()));
}
