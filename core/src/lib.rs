pub mod cli;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod model;
pub mod parser;
pub mod syntax;

// Re-export main types
pub use diagnostics::{Diagnostic, Position, Severity};
pub use error::{Error, Result};
pub use model::{Action, Command, Configuration, Uses, UsesForm, UsesTarget, Workflow};

// Re-export parser API for convenience
pub use parser::{parse, parse_file, parse_named, parse_str, ParseOptions, ParseResult, ParserError};
