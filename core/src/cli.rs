use std::path::{Path, PathBuf};

use anyhow::{bail, Result};
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use crate::config::{Config, SuppressLevel};
use crate::diagnostics::Diagnostic;
use crate::error::Error;
use crate::model::Configuration;
use crate::parser::{parse_file, ParseOptions, ParserError};

#[derive(Parser)]
#[command(name = "workflow-parser")]
#[command(about = "Parse and validate workflow files", long_about = None)]
pub struct Cli {
    /// Path to config file (overrides default search)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Diagnostics to tolerate without failing (overrides config file and env vars)
    #[arg(long, value_enum)]
    pub suppress: Option<SuppressLevel>,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Text)]
    pub format: Format,

    /// Workflow files to check
    #[arg(required = true)]
    pub files: Vec<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Text,
    Json,
}

/// Run the CLI by parsing process arguments
pub fn run_cli() -> Result<()> {
    let cli = Cli::parse();
    run_cli_with_args(cli)
}

/// Run the CLI with provided arguments
pub fn run_cli_from_args(args: Vec<String>) -> Result<()> {
    let cli = Cli::parse_from(args);
    run_cli_with_args(cli)
}

fn run_cli_with_args(cli: Cli) -> Result<()> {
    let config = Config::builder()
        .config_path(cli.config)
        .suppress(cli.suppress)
        .build()?;

    init_tracing(&config.log.filter);

    let options = config.parser.suppress.parse_options();
    let total = cli.files.len();
    let mut failed = 0;

    for path in &cli.files {
        let outcome = check(path, &options);
        if !outcome.is_valid() {
            failed += 1;
        }
        match cli.format {
            Format::Text => print!("{}", outcome.text(path)),
            Format::Json => println!("{}", serde_json::to_string_pretty(&outcome.json(path))?),
        }
    }

    if failed > 0 {
        bail!("{} of {} file(s) failed to parse", failed, total);
    }
    Ok(())
}

/// Install a stderr subscriber. `RUST_LOG` wins over the configured filter.
fn init_tracing(filter: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/* ===================== Per-File Outcome ===================== */

enum Outcome {
    Valid(Configuration),
    Invalid(ParserError),
    Unreadable(Error),
}

fn check(path: &Path, options: &ParseOptions) -> Outcome {
    match parse_file(path, options) {
        Ok(configuration) => Outcome::Valid(configuration),
        Err(Error::Parse(err)) => Outcome::Invalid(err),
        Err(err) => Outcome::Unreadable(err),
    }
}

impl Outcome {
    fn is_valid(&self) -> bool {
        matches!(self, Outcome::Valid(_))
    }

    fn text(&self, path: &Path) -> String {
        match self {
            Outcome::Valid(configuration) => format!(
                "{} is a valid file with {} and {}\n",
                path.display(),
                plural(configuration.actions.len(), "action"),
                plural(configuration.workflows.len(), "workflow"),
            ),
            Outcome::Invalid(err) => err
                .diagnostics()
                .iter()
                .map(|d| format!("{}\n", render(d)))
                .collect(),
            Outcome::Unreadable(err) => format!("{}\n", err),
        }
    }

    fn json(&self, path: &Path) -> serde_json::Value {
        let file = path.display().to_string();
        match self {
            Outcome::Valid(configuration) => serde_json::json!({
                "file": file,
                "valid": true,
                "configuration": configuration,
            }),
            Outcome::Invalid(err) => serde_json::json!({
                "file": file,
                "valid": false,
                "configuration": err.configuration(),
            }),
            Outcome::Unreadable(err) => serde_json::json!({
                "file": file,
                "valid": false,
                "error": err.to_string(),
            }),
        }
    }
}

/// `file:line:column: severity: message`
fn render(diagnostic: &Diagnostic) -> String {
    let position = &diagnostic.position;
    format!(
        "{}:{}:{}: {}: {}",
        position.file, position.line, position.column, diagnostic.severity, diagnostic.message
    )
}

fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{} {}", count, noun)
    } else {
        format!("{} {}s", count, noun)
    }
}
