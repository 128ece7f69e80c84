//! Rule: Circular Dependency
//!
//! Reports a fatal diagnostic for every elementary cycle in the graph formed
//! by the actions' `needs` lists.
//!
//! # Examples
//!
//! ```text
//! // Fatal: Circular dependency on `a'
//! action "a" { uses = "./x" needs = ["b"] }
//! action "b" { uses = "./x" needs = ["a"] }
//! ```
//!
//! # Notes
//!
//! - Each cycle is named after its earliest-declared action and reported at
//!   the `needs` of the last action in the cycle
//! - A self-dependency is a one-action cycle
//! - `needs` entries naming no declared action are left out of the graph
//! - When two actions share a name, the later one receives the edges

use std::collections::HashMap;

use crate::diagnostics::Diagnostic;
use crate::parser::cycles::elementary_cycles;
use crate::parser::positions::{Field, Owner};

use super::super::{ValidationContext, ValidationRule};

pub struct CircularDependencyRule;

impl ValidationRule for CircularDependencyRule {
    fn id(&self) -> &'static str {
        "circular-dependency"
    }

    fn description(&self) -> &'static str {
        "Actions must not depend on themselves, directly or indirectly"
    }

    fn validate(&self, context: &ValidationContext<'_>) -> Vec<Diagnostic> {
        let actions = &context.configuration.actions;

        let index: HashMap<&str, usize> = actions
            .iter()
            .enumerate()
            .map(|(i, action)| (action.identifier.as_str(), i))
            .collect();

        let adjacency: Vec<Vec<usize>> = actions
            .iter()
            .map(|action| {
                let mut edges = Vec::with_capacity(action.needs.len());
                for need in &action.needs {
                    if let Some(&target) = index.get(need.as_str()) {
                        if !edges.contains(&target) {
                            edges.push(target);
                        }
                    }
                }
                edges
            })
            .collect();

        let cycles = elementary_cycles(&adjacency);
        tracing::debug!(count = cycles.len(), "dependency cycles found");

        cycles
            .iter()
            .filter_map(|cycle| {
                let (first, last) = (*cycle.first()?, *cycle.last()?);
                Some(Diagnostic::fatal(
                    context.position(Owner::Action(last), Field::Needs),
                    format!("Circular dependency on `{}'", actions[first].identifier),
                ))
            })
            .collect()
    }
}
