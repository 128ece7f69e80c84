//! Rule: Environment Names
//!
//! Checks the names in each action's `env` map and `secrets` list.
//!
//! # Examples
//!
//! ```text
//! action "a" {
//!   uses = "./x"
//!   env = { GITHUB_FOO = "x" }    // Warning: reserved prefix
//!   secrets = ["9LIVES", "A", "A"] // Warning: bad name; Warning: `A' redefined
//! }
//! ```
//!
//! # Notes
//!
//! - Names must match `[A-Za-z_][A-Za-z_0-9]*`
//! - The `GITHUB_` prefix is reserved, except for `GITHUB_TOKEN`
//! - A secret that is also an env key of the same action is an error
//! - Name problems are warnings: the file still runs

use std::collections::HashSet;
use std::sync::OnceLock;

use regex::Regex;

use crate::diagnostics::{Diagnostic, Position};
use crate::parser::positions::{Field, Owner};

use super::super::{ValidationContext, ValidationRule};

const RESERVED_PREFIX: &str = "GITHUB_";
const RESERVED_EXEMPTION: &str = "GITHUB_TOKEN";

fn name_pattern() -> &'static Regex {
    static NAME_PATTERN: OnceLock<Regex> = OnceLock::new();
    NAME_PATTERN.get_or_init(|| Regex::new(r"\A[A-Za-z_][A-Za-z_0-9]*\z").expect("valid regex"))
}

pub struct EnvironmentNamesRule;

impl ValidationRule for EnvironmentNamesRule {
    fn id(&self) -> &'static str {
        "environment-names"
    }

    fn description(&self) -> &'static str {
        "Environment variable and secret names must be valid, unreserved and unique"
    }

    fn validate(&self, context: &ValidationContext<'_>) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();

        for (index, action) in context.configuration.actions.iter().enumerate() {
            let owner = Owner::Action(index);

            let env_position = context.position(owner, Field::Env);
            for key in action.env.keys() {
                check_name(key, &env_position, &mut diagnostics);
            }

            let secrets_position = context.position(owner, Field::Secrets);
            let mut seen = HashSet::new();
            for secret in &action.secrets {
                check_name(secret, &secrets_position, &mut diagnostics);
                if action.env.contains_key(secret) {
                    diagnostics.push(Diagnostic::error(
                        secrets_position.clone(),
                        format!(
                            "Secret `{}' conflicts with an environment variable with the same name",
                            secret
                        ),
                    ));
                }
                if !seen.insert(secret.as_str()) {
                    diagnostics.push(Diagnostic::warning(
                        secrets_position.clone(),
                        format!("Secret `{}' redefined", secret),
                    ));
                }
            }
        }

        diagnostics
    }
}

fn check_name(name: &str, position: &Position, diagnostics: &mut Vec<Diagnostic>) {
    if name != RESERVED_EXEMPTION && name.starts_with(RESERVED_PREFIX) {
        diagnostics.push(Diagnostic::warning(
            position.clone(),
            "Environment variables and secrets beginning with `GITHUB_' are reserved",
        ));
    }
    if !name_pattern().is_match(name) {
        diagnostics.push(Diagnostic::warning(
            position.clone(),
            format!(
                "Environment variables and secrets must contain only A-Z, a-z, 0-9, and _ characters, got `{}'",
                name
            ),
        ));
    }
}
