//! Rule: Unknown Dependency
//!
//! Reports an error for every `needs` entry that names no declared action.
//!
//! # Examples
//!
//! ```text
//! // Error: Action `a' needs nonexistent action `b'
//! action "a" { uses = "./x" needs = ["b"] }
//! ```
//!
//! # Notes
//!
//! - Reported once per occurrence, so `needs = ["b", "b"]` reports twice
//! - The dangling entry stays in the model

use crate::diagnostics::Diagnostic;
use crate::parser::positions::{Field, Owner};

use super::super::{ValidationContext, ValidationRule};

pub struct UnknownDependencyRule;

impl ValidationRule for UnknownDependencyRule {
    fn id(&self) -> &'static str {
        "unknown-dependency"
    }

    fn description(&self) -> &'static str {
        "Every `needs` entry must name a declared action"
    }

    fn validate(&self, context: &ValidationContext<'_>) -> Vec<Diagnostic> {
        let known = context.action_names();
        let mut errors = Vec::new();

        for (index, action) in context.configuration.actions.iter().enumerate() {
            for need in &action.needs {
                if !known.contains(need.as_str()) {
                    errors.push(Diagnostic::error(
                        context.position(Owner::Action(index), Field::Needs),
                        format!(
                            "Action `{}' needs nonexistent action `{}'",
                            action.identifier, need
                        ),
                    ));
                }
            }
        }

        errors
    }
}
