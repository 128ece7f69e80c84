/// Workflow file checker
///
/// Parses and validates each file given on the command line, printing either
/// a one-line summary or the file's diagnostics. Exits non-zero if any file
/// fails.
use workflow_parser_core::cli;

fn main() {
    dotenvy::dotenv().ok();

    if let Err(e) = cli::run_cli() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
