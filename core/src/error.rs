use std::path::PathBuf;

use crate::parser::ParserError;

/// Errors surfaced by the library's file and configuration entry points.
///
/// Problems inside a workflow file are never an `Error` on their own; they are
/// diagnostics carried by [`Error::Parse`].
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] ParserError),

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid configuration: {0}")]
    Config(#[from] config::ConfigError),
}

pub type Result<T> = std::result::Result<T, Error>;
