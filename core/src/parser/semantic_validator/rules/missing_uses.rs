//! Rule: Missing Uses
//!
//! Reports an error for an action with no usable `uses` attribute, either
//! because it was never written or because every value given was invalid.

use crate::diagnostics::Diagnostic;
use crate::parser::positions::{Field, Owner};

use super::super::{ValidationContext, ValidationRule};

pub struct MissingUsesRule;

impl ValidationRule for MissingUsesRule {
    fn id(&self) -> &'static str {
        "missing-uses"
    }

    fn description(&self) -> &'static str {
        "Every action must have a `uses' attribute"
    }

    fn validate(&self, context: &ValidationContext<'_>) -> Vec<Diagnostic> {
        context
            .configuration
            .actions
            .iter()
            .enumerate()
            .filter(|(_, action)| !action.has_uses())
            .map(|(index, action)| {
                Diagnostic::error(
                    context.position(Owner::Action(index), Field::Block),
                    format!("Action `{}' must have a `uses' attribute", action.identifier),
                )
            })
            .collect()
    }
}
