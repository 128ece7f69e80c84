//! Runtime configuration for the command-line driver
//!
//! Sources, lowest precedence first:
//!
//! 1. built-in defaults
//! 2. a TOML file (`--config PATH`, or `workflow-parser.toml` if present)
//! 3. `WORKFLOW_PARSER_*` environment variables, `__` between sections
//!    (e.g. `WORKFLOW_PARSER_PARSER__SUPPRESS=warnings`)
//! 4. values set on the [`ConfigBuilder`]

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::diagnostics::Severity;
use crate::error::Result;
use crate::parser::ParseOptions;

const DEFAULT_FILE: &str = "workflow-parser";
const ENV_PREFIX: &str = "WORKFLOW_PARSER";

/// Which diagnostics are tolerated without failing a file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SuppressLevel {
    /// Every diagnostic fails the file
    #[default]
    None,
    /// Warnings are tolerated
    Warnings,
    /// Warnings and errors are tolerated; only fatal problems fail
    Errors,
}

impl SuppressLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            SuppressLevel::None => "none",
            SuppressLevel::Warnings => "warnings",
            SuppressLevel::Errors => "errors",
        }
    }

    pub fn parse_options(&self) -> ParseOptions {
        ParseOptions {
            suppress_severity: match self {
                SuppressLevel::None => None,
                SuppressLevel::Warnings => Some(Severity::Warning),
                SuppressLevel::Errors => Some(Severity::Error),
            },
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub parser: ParserConfig,
    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParserConfig {
    #[serde(default)]
    pub suppress: SuppressLevel,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogConfig {
    /// `tracing_subscriber::EnvFilter` directives
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
        }
    }
}

fn default_log_filter() -> String {
    "warn".to_string()
}

impl Config {
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }
}

#[derive(Debug, Default)]
pub struct ConfigBuilder {
    config_path: Option<PathBuf>,
    suppress: Option<SuppressLevel>,
}

impl ConfigBuilder {
    /// Read this file instead of looking for `workflow-parser.toml`. The file
    /// must exist.
    pub fn config_path(mut self, path: Option<PathBuf>) -> Self {
        self.config_path = path;
        self
    }

    pub fn suppress(mut self, level: Option<SuppressLevel>) -> Self {
        self.suppress = level;
        self
    }

    pub fn build(self) -> Result<Config> {
        let mut builder =
            config::Config::builder().add_source(config::Config::try_from(&Config::default())?);

        builder = match &self.config_path {
            Some(path) => builder.add_source(
                config::File::from(path.as_path())
                    .format(config::FileFormat::Toml)
                    .required(true),
            ),
            None => builder.add_source(config::File::with_name(DEFAULT_FILE).required(false)),
        };

        builder = builder.add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__"),
        );

        if let Some(level) = self.suppress {
            builder = builder.set_override("parser.suppress", level.as_str())?;
        }

        let config: Config = builder.build()?.try_deserialize()?;
        tracing::debug!(
            path = ?self.config_path,
            suppress = config.parser.suppress.as_str(),
            "loaded configuration"
        );
        Ok(config)
    }
}
