//! Rule: Unknown Resolve
//!
//! Reports an error for every `resolves` entry that names no declared action.
//! Duplicate entries are allowed and each unknown one is reported.

use crate::diagnostics::Diagnostic;
use crate::parser::positions::{Field, Owner};

use super::super::{ValidationContext, ValidationRule};

pub struct UnknownResolveRule;

impl ValidationRule for UnknownResolveRule {
    fn id(&self) -> &'static str {
        "unknown-resolve"
    }

    fn description(&self) -> &'static str {
        "Every `resolves' entry must name a declared action"
    }

    fn validate(&self, context: &ValidationContext<'_>) -> Vec<Diagnostic> {
        let known = context.action_names();
        let mut errors = Vec::new();

        for (index, workflow) in context.configuration.workflows.iter().enumerate() {
            for target in &workflow.resolves {
                if !known.contains(target.as_str()) {
                    errors.push(Diagnostic::error(
                        context.position(Owner::Workflow(index), Field::Resolves),
                        format!(
                            "Workflow `{}' resolves unknown action `{}'",
                            workflow.identifier, target
                        ),
                    ));
                }
            }
        }

        errors
    }
}
