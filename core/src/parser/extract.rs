//! Structural extraction: syntax tree to typed model
//!
//! Walks the top-level items once, turning `version`, `action` and
//! `workflow` items into model records. A malformed item is reported and
//! skipped; a malformed attribute is reported and leaves the field at its
//! previous value, so one bad block never hides problems in the rest of the
//! file.

use std::collections::HashSet;

use super::literal::{
    check_assignments_only, expect_int, expect_string, expect_string_array, expect_string_map,
};
use super::positions::{Field, Owner, PositionTable};
use crate::diagnostics::Diagnostic;
use crate::model::{Action, Command, Configuration, Uses, Workflow};
use crate::syntax::{KeyKind, Node, ObjectItem, ObjectKey, ObjectList, ObjectNode};

/// Lowest and highest supported file versions
const MIN_VERSION: i64 = 0;
const MAX_VERSION: i64 = 0;

/// Result of extraction, before any cross-record validation
pub struct Extraction {
    pub configuration: Configuration,
    pub positions: PositionTable,
    pub diagnostics: Vec<Diagnostic>,
}

#[derive(Default)]
pub struct Extractor {
    configuration: Configuration,
    positions: PositionTable,
    diagnostics: Vec<Diagnostic>,
    /// Identifiers seen so far, shared by actions and workflows
    identifiers: HashSet<String>,
}

impl Extractor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn extract(mut self, root: &ObjectList) -> Extraction {
        for (index, item) in root.items.iter().enumerate() {
            if item.assign.is_some() {
                self.version(index, item);
            } else {
                self.block(item);
            }
        }

        tracing::debug!(
            actions = self.configuration.actions.len(),
            workflows = self.configuration.workflows.len(),
            diagnostics = self.diagnostics.len(),
            "extracted configuration"
        );

        Extraction {
            configuration: self.configuration,
            positions: self.positions,
            diagnostics: self.diagnostics,
        }
    }

    /* ===================== Top Level ===================== */

    fn version(&mut self, index: usize, item: &ObjectItem) {
        let position = item.value.position();

        if item.keys.len() != 1 || item.keys[0].name != "version" {
            self.diagnostics.push(Diagnostic::error(
                position.clone(),
                "Toplevel declarations cannot be assignments",
            ));
            return;
        }
        if index != 0 {
            self.diagnostics.push(Diagnostic::error(
                position.clone(),
                "`version` must be the first declaration",
            ));
            return;
        }

        let Some(version) = expect_int(&item.value, &mut self.diagnostics) else {
            return;
        };
        if !(MIN_VERSION..=MAX_VERSION).contains(&version) {
            self.diagnostics.push(Diagnostic::error(
                position.clone(),
                format!("`version = {}` is not supported", version),
            ));
            return;
        }

        self.configuration.version = version;
    }

    fn block(&mut self, item: &ObjectItem) {
        let position = item.value.position();

        if item.keys.len() != 2 {
            self.diagnostics
                .push(Diagnostic::error(position.clone(), "Invalid toplevel declaration"));
            return;
        }

        let identifier = match item.keys[0].name.as_str() {
            "action" => self.action(item),
            "workflow" => self.workflow(item),
            other => {
                self.diagnostics.push(Diagnostic::error(
                    position.clone(),
                    format!("Invalid toplevel keyword, `{}'", other),
                ));
                return;
            }
        };

        if let Some(identifier) = identifier {
            if !self.identifiers.insert(identifier.clone()) {
                self.diagnostics.push(Diagnostic::error(
                    position.clone(),
                    format!("Identifier `{}' redefined", identifier),
                ));
            }
        }
    }

    /// Block name: a double-quoted, non-empty string
    fn identifier(&mut self, key: &ObjectKey) -> Option<String> {
        if key.kind != KeyKind::String || key.name.is_empty() {
            self.diagnostics.push(Diagnostic::error(
                key.position.clone(),
                format!("Invalid format for identifier `{}'", key.text),
            ));
            return None;
        }
        Some(key.name.clone())
    }

    /// Shared start of `action` and `workflow` blocks
    fn preamble<'i>(&mut self, item: &'i ObjectItem, kind: &str) -> Option<(String, &'i ObjectNode)> {
        let identifier = self.identifier(&item.keys[1])?;

        let Node::Object(body) = &item.value else {
            self.diagnostics.push(Diagnostic::error(
                item.value.position().clone(),
                format!("Each {} must have an {{ ... }} block", kind),
            ));
            return None;
        };

        check_assignments_only(
            &body.list,
            &format!("{} `{}'", kind, identifier),
            &mut self.diagnostics,
        );

        Some((identifier, body))
    }

    /* ===================== Actions ===================== */

    fn action(&mut self, item: &ObjectItem) -> Option<String> {
        let (identifier, body) = self.preamble(item, "action")?;
        let owner = Owner::Action(self.configuration.actions.len());
        self.positions.record(owner, Field::Block, &body.position);

        let mut action = Action::new(identifier);
        let mut seen = HashSet::new();
        for attribute in &body.list.items {
            // Keyless items were already reported by the assignment check
            let Some(key) = attribute.keys.first() else {
                continue;
            };
            let name = key.name.as_str();
            let first = seen.insert(name);
            self.action_attribute(&mut action, owner, name, &attribute.value, first);
        }

        let identifier = action.identifier.clone();
        self.configuration.actions.push(action);
        Some(identifier)
    }

    fn action_attribute(
        &mut self,
        action: &mut Action,
        owner: Owner,
        name: &str,
        value: &Node,
        first: bool,
    ) {
        match name {
            "uses" => self.uses(action, value, first),
            "needs" => {
                if let Some(needs) = expect_string_array(value, true, &mut self.diagnostics) {
                    action.needs = needs;
                    self.positions.record(owner, Field::Needs, value.position());
                }
            }
            "runs" => self.command(&action.identifier, &mut action.runs, name, value, first, false),
            "args" => self.command(&action.identifier, &mut action.args, name, value, first, true),
            "env" => {
                if let Some(env) = expect_string_map(value, &mut self.diagnostics) {
                    action.env = env;
                }
                self.positions.record(owner, Field::Env, value.position());
            }
            "secrets" => {
                if let Some(secrets) = expect_string_array(value, false, &mut self.diagnostics) {
                    action.secrets = secrets;
                    self.positions.record(owner, Field::Secrets, value.position());
                }
            }
            _ => self.diagnostics.push(Diagnostic::warning(
                value.position().clone(),
                format!("Unknown action attribute `{}'", name),
            )),
        }
    }

    fn uses(&mut self, action: &mut Action, value: &Node, first: bool) {
        let position = value.position();

        if !first {
            self.diagnostics.push(Diagnostic::warning(
                position.clone(),
                format!("`uses' redefined in action `{}'", action.identifier),
            ));
        }

        let Some(raw) = expect_string(value, &mut self.diagnostics) else {
            return;
        };
        if raw.is_empty() {
            self.diagnostics.push(Diagnostic::error(
                position.clone(),
                format!("`uses' value in action `{}' cannot be blank", action.identifier),
            ));
            return;
        }

        let uses = Uses::parse(&raw);
        if !uses.is_recognized() {
            self.diagnostics.push(Diagnostic::error(
                position.clone(),
                "The `uses' attribute must be a path, a Docker image, or owner/repo@ref",
            ));
        }
        action.uses = Some(uses);
    }

    /// `runs` or `args`: a whitespace-separated string or a list of strings
    fn command(
        &mut self,
        identifier: &str,
        dest: &mut Option<Command>,
        name: &str,
        value: &Node,
        first: bool,
        allow_blank: bool,
    ) {
        let position = value.position();

        if !first {
            self.diagnostics.push(Diagnostic::warning(
                position.clone(),
                format!("`{}' redefined in action `{}'", name, identifier),
            ));
        }

        if let Node::List(_) = value {
            if let Some(items) = expect_string_array(value, false, &mut self.diagnostics) {
                *dest = Some(Command::List(items));
            }
            return;
        }

        let Some(raw) = expect_string(value, &mut self.diagnostics) else {
            self.diagnostics.push(Diagnostic::error(
                position.clone(),
                format!("The `{}' attribute must be a string or a list", name),
            ));
            return;
        };
        if raw.is_empty() && !allow_blank {
            self.diagnostics.push(Diagnostic::error(
                position.clone(),
                format!("`{}' value in action `{}' cannot be blank", name, identifier),
            ));
            return;
        }

        *dest = Some(Command::Raw(raw));
    }

    /* ===================== Workflows ===================== */

    fn workflow(&mut self, item: &ObjectItem) -> Option<String> {
        let (identifier, body) = self.preamble(item, "workflow")?;
        let owner = Owner::Workflow(self.configuration.workflows.len());

        let mut workflow = Workflow::new(identifier);
        let mut seen = HashSet::new();
        for attribute in &body.list.items {
            let Some(key) = attribute.keys.first() else {
                continue;
            };
            let name = key.name.as_str();
            let first = seen.insert(name);
            let value = &attribute.value;

            match name {
                "on" => self.on(&mut workflow, owner, value, first),
                "resolves" => self.resolves(&mut workflow, owner, value, first),
                _ => self.diagnostics.push(Diagnostic::warning(
                    value.position().clone(),
                    format!("Unknown workflow attribute `{}'", name),
                )),
            }
        }

        self.positions.record(owner, Field::Block, &body.position);
        let identifier = workflow.identifier.clone();
        self.configuration.workflows.push(workflow);
        Some(identifier)
    }

    fn on(&mut self, workflow: &mut Workflow, owner: Owner, value: &Node, first: bool) {
        let position = value.position();

        if !first {
            self.diagnostics.push(Diagnostic::warning(
                position.clone(),
                format!("`on' redefined in workflow `{}'", workflow.identifier),
            ));
        }

        let Some(on) = expect_string(value, &mut self.diagnostics) else {
            self.diagnostics.push(Diagnostic::error(
                position.clone(),
                format!(
                    "Invalid format for `on' in workflow `{}', expected string",
                    workflow.identifier
                ),
            ));
            return;
        };
        if on.is_empty() {
            self.diagnostics.push(Diagnostic::error(
                position.clone(),
                format!("`on' value in workflow `{}' cannot be blank", workflow.identifier),
            ));
            return;
        }

        workflow.on = on;
        self.positions.record(owner, Field::On, position);
    }

    fn resolves(&mut self, workflow: &mut Workflow, owner: Owner, value: &Node, first: bool) {
        let position = value.position();

        if !first {
            self.diagnostics.push(Diagnostic::warning(
                position.clone(),
                format!("`resolves' redefined in workflow `{}'", workflow.identifier),
            ));
        }

        match expect_string_array(value, true, &mut self.diagnostics) {
            Some(resolves) => workflow.resolves = resolves,
            None => {
                workflow.resolves.clear();
                self.diagnostics.push(Diagnostic::error(
                    position.clone(),
                    format!(
                        "Invalid format for `resolves' in workflow `{}', expected list of strings",
                        workflow.identifier
                    ),
                ));
            }
        }
        self.positions.record(owner, Field::Resolves, position);
    }
}
