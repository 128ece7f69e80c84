//! Rule: Secret Limit
//!
//! Reports a single error once the actions of a file, taken together, name
//! more than [`MAX_SECRETS`] distinct secrets. The error points at the
//! `secrets` list where the first excess name appears.

use std::collections::HashSet;

use crate::diagnostics::Diagnostic;
use crate::parser::positions::{Field, Owner};

use super::super::{ValidationContext, ValidationRule};

/// Most distinct secret names a single file may use
pub const MAX_SECRETS: usize = 100;

pub struct SecretLimitRule;

impl ValidationRule for SecretLimitRule {
    fn id(&self) -> &'static str {
        "secret-limit"
    }

    fn description(&self) -> &'static str {
        "All actions combined must not use too many distinct secrets"
    }

    fn validate(&self, context: &ValidationContext<'_>) -> Vec<Diagnostic> {
        let mut seen = HashSet::new();

        for (index, action) in context.configuration.actions.iter().enumerate() {
            for secret in &action.secrets {
                if seen.insert(secret.as_str()) && seen.len() == MAX_SECRETS + 1 {
                    return vec![Diagnostic::error(
                        context.position(Owner::Action(index), Field::Secrets),
                        format!(
                            "All actions combined must not have more than {} unique secrets",
                            MAX_SECRETS
                        ),
                    )];
                }
            }
        }

        Vec::new()
    }
}
