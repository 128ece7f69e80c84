//! Rule: Workflow Event
//!
//! Every workflow needs an `on` attribute naming a known event type
//! (matched case-insensitively).

use crate::diagnostics::Diagnostic;
use crate::model::events::is_allowed_event_type;
use crate::parser::positions::{Field, Owner};

use super::super::{ValidationContext, ValidationRule};

pub struct WorkflowEventRule;

impl ValidationRule for WorkflowEventRule {
    fn id(&self) -> &'static str {
        "workflow-event"
    }

    fn description(&self) -> &'static str {
        "Every workflow must be triggered by a known event type"
    }

    fn validate(&self, context: &ValidationContext<'_>) -> Vec<Diagnostic> {
        let mut errors = Vec::new();

        for (index, workflow) in context.configuration.workflows.iter().enumerate() {
            let owner = Owner::Workflow(index);
            if workflow.on.is_empty() {
                errors.push(Diagnostic::error(
                    context.position(owner, Field::Block),
                    format!("Workflow `{}' must have an `on' attribute", workflow.identifier),
                ));
            } else if !is_allowed_event_type(&workflow.on) {
                errors.push(Diagnostic::error(
                    context.position(owner, Field::On),
                    format!(
                        "Workflow `{}' has unknown `on' value `{}'",
                        workflow.identifier, workflow.on
                    ),
                ));
            }
        }

        errors
    }
}
