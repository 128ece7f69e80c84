//! Semantic validation of an extracted configuration
//!
//! Extraction only checks what can be seen one attribute at a time. The rules
//! in this module run afterwards over the whole model and catch what needs
//! cross-record context: dangling references, dependency cycles, missing
//! required attributes, and limits on secrets.
//!
//! # Architecture
//!
//! 1. **ValidationRule trait** - Each rule implements this trait
//! 2. **Validator** - Runs the rules in a fixed order
//! 3. **Diagnostic** - The output of validation, tagged with the rule id
//!
//! # Adding a New Rule
//!
//! 1. Create a new file in `semantic_validator/rules/`
//! 2. Implement `ValidationRule` for your struct
//! 3. Add it to the `Validator::new()` constructor
//!
//! Rule order matters: diagnostics on the same line keep the order in which
//! rules emitted them.

pub mod rules;

use std::collections::HashSet;

use super::positions::{Field, Owner, PositionTable};
use crate::diagnostics::{Diagnostic, Position};
use crate::model::Configuration;

// ============================================================================
// Validation Context
// ============================================================================

/// Everything a rule may look at
pub struct ValidationContext<'a> {
    pub configuration: &'a Configuration,
    pub positions: &'a PositionTable,
}

impl<'a> ValidationContext<'a> {
    pub fn new(configuration: &'a Configuration, positions: &'a PositionTable) -> Self {
        Self {
            configuration,
            positions,
        }
    }

    /// Where a field of a record was written
    pub fn position(&self, owner: Owner, field: Field) -> Position {
        self.positions.get(owner, field)
    }

    /// Identifiers of all declared actions
    pub fn action_names(&self) -> HashSet<&'a str> {
        self.configuration
            .actions
            .iter()
            .map(|a| a.identifier.as_str())
            .collect()
    }
}

// ============================================================================
// ValidationRule Trait
// ============================================================================

/// Trait that all validation rules must implement.
///
/// Each rule checks one aspect of the configuration and never fails; it only
/// returns diagnostics.
pub trait ValidationRule: Send + Sync {
    /// Unique identifier for this rule (e.g., "unknown-dependency")
    fn id(&self) -> &'static str;

    /// Human-readable description of what this rule checks
    fn description(&self) -> &'static str;

    /// Run the rule. An empty vector means no issues found.
    fn validate(&self, context: &ValidationContext<'_>) -> Vec<Diagnostic>;
}

// ============================================================================
// Validator - Runs All Rules
// ============================================================================

pub struct Validator {
    rules: Vec<Box<dyn ValidationRule>>,
}

impl Validator {
    /// Create a new validator with all built-in rules.
    pub fn new() -> Self {
        Self {
            rules: vec![
                // Dependency graph
                Box::new(rules::UnknownDependencyRule),
                Box::new(rules::CircularDependencyRule),
                // Actions
                Box::new(rules::MissingUsesRule),
                Box::new(rules::SecretLimitRule),
                Box::new(rules::EnvironmentNamesRule),
                // Workflows
                Box::new(rules::WorkflowEventRule),
                Box::new(rules::UnknownResolveRule),
            ],
        }
    }

    /// Run all validation rules and collect their diagnostics, each tagged
    /// with the id of the rule that produced it.
    pub fn validate(&self, context: &ValidationContext<'_>) -> Vec<Diagnostic> {
        self.rules
            .iter()
            .flat_map(|rule| {
                let id = rule.id();
                let diagnostics = rule.validate(context);
                if !diagnostics.is_empty() {
                    tracing::trace!(rule = id, count = diagnostics.len(), "rule reported");
                }
                diagnostics.into_iter().map(move |d| d.with_rule(id))
            })
            .collect()
    }

    /// All registered rules as `(id, description)`
    pub fn rules(&self) -> impl Iterator<Item = (&'static str, &'static str)> + '_ {
        self.rules.iter().map(|r| (r.id(), r.description()))
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests;
