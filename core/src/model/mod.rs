//! Typed model of a workflow file
//!
//! A [`Configuration`] is what a successful parse produces: the file version,
//! the actions and workflows in file order, and every diagnostic that was
//! below the active suppression threshold.

mod command;
pub mod events;
mod uses;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::diagnostics::{Diagnostic, Severity};

pub use command::Command;
pub use uses::{Uses, UsesForm, UsesTarget};

/// A parsed workflow file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Configuration {
    pub version: i64,
    pub actions: Vec<Action>,
    pub workflows: Vec<Workflow>,
    /// Diagnostics found while parsing, sorted by line
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub diagnostics: Vec<Diagnostic>,
}

impl Configuration {
    /// Look up an action by identifier
    pub fn get_action(&self, id: &str) -> Option<&Action> {
        self.actions.iter().find(|a| a.identifier == id)
    }

    /// Look up a workflow by identifier
    pub fn get_workflow(&self, id: &str) -> Option<&Workflow> {
        self.workflows.iter().find(|w| w.identifier == id)
    }

    /// All workflows triggered by the given event type, e.g. `"push"`
    pub fn get_workflows(&self, event_type: &str) -> Vec<&Workflow> {
        self.workflows
            .iter()
            .filter(|w| events::is_matching_event_type(&w.on, event_type))
            .collect()
    }

    /// First diagnostic at or above `severity`.
    ///
    /// A caller about to execute the file checks `Severity::Warning`; one
    /// that only displays it checks `Severity::Fatal`.
    pub fn first_diagnostic(&self, severity: Severity) -> Option<&Diagnostic> {
        self.diagnostics.iter().find(|d| d.severity >= severity)
    }
}

/// A single `action "<id>" { ... }` block
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Action {
    pub identifier: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uses: Option<Uses>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub runs: Option<Command>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub args: Option<Command>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub needs: Vec<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub env: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub secrets: Vec<String>,
}

impl Action {
    pub fn new(identifier: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            ..Default::default()
        }
    }

    /// Whether the action has a usable `uses` value
    pub fn has_uses(&self) -> bool {
        self.uses.as_ref().is_some_and(|u| !u.raw.is_empty())
    }
}

/// A single `workflow "<id>" { ... }` block
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Workflow {
    pub identifier: String,
    /// Triggering event type; empty when missing or invalid
    #[serde(default)]
    pub on: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub resolves: Vec<String>,
}

impl Workflow {
    pub fn new(identifier: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            ..Default::default()
        }
    }
}
