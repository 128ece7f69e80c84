//! Coercion of syntax-tree values into plain Rust values
//!
//! Each coercer reports a type mismatch into the diagnostic sink and returns
//! `None`, leaving the caller free to carry on with the next attribute.

use std::collections::BTreeMap;

use crate::diagnostics::Diagnostic;
use crate::syntax::{Literal, Node, ObjectList};

fn mismatch(node: &Node, expected: &str) -> Diagnostic {
    Diagnostic::error(
        node.position().clone(),
        format!("Expected {}, got {}", expected, node.type_name()),
    )
}

pub fn expect_string(node: &Node, diagnostics: &mut Vec<Diagnostic>) -> Option<String> {
    match node {
        Node::Literal(literal) => match &literal.value {
            Literal::String(value) => Some(value.clone()),
            _ => {
                diagnostics.push(mismatch(node, "string"));
                None
            }
        },
        _ => {
            diagnostics.push(mismatch(node, "string"));
            None
        }
    }
}

pub fn expect_int(node: &Node, diagnostics: &mut Vec<Diagnostic>) -> Option<i64> {
    if let Node::Literal(literal) = node {
        if let Literal::Number(value) = literal.value {
            return Some(value);
        }
    }
    diagnostics.push(mismatch(node, "number"));
    None
}

/// A list of strings. With `promote_scalars`, a single string `"a"` is
/// accepted as `["a"]`. Non-string list items are reported and dropped.
pub fn expect_string_array(
    node: &Node,
    promote_scalars: bool,
    diagnostics: &mut Vec<Diagnostic>,
) -> Option<Vec<String>> {
    match node {
        Node::List(list) => Some(
            list.items
                .iter()
                .filter_map(|item| expect_string(item, diagnostics))
                .collect(),
        ),
        Node::Literal(literal) if promote_scalars => match &literal.value {
            Literal::String(value) => Some(vec![value.clone()]),
            _ => {
                diagnostics.push(mismatch(node, "list"));
                None
            }
        },
        _ => {
            diagnostics.push(mismatch(node, "list"));
            None
        }
    }
}

/// An object of `KEY = "value"` assignments.
///
/// A key written twice keeps its last value and is reported once per
/// repetition. Non-string values are reported and skipped. Non-assignment
/// items are skipped silently: the enclosing block's
/// [`check_assignments_only`] pass has already reported them.
pub fn expect_string_map(
    node: &Node,
    diagnostics: &mut Vec<Diagnostic>,
) -> Option<BTreeMap<String, String>> {
    let Node::Object(object) = node else {
        diagnostics.push(mismatch(node, "object"));
        return None;
    };

    let mut map = BTreeMap::new();
    for item in object.list.items.iter().filter(|item| item.is_assignment()) {
        let Some(key) = item.keys.first().map(|key| &key.name) else {
            continue;
        };
        let Some(value) = expect_string(&item.value, diagnostics) else {
            continue;
        };
        if key.is_empty() {
            continue;
        }
        if map.insert(key.clone(), value).is_some() {
            diagnostics.push(Diagnostic::warning(
                object.position.clone(),
                format!("Environment variable `{}' redefined", key),
            ));
        }
    }

    Some(map)
}

/// Report every item in `list` that is not a plain `key = value`, descending
/// into assignments whose value is itself an object.
pub fn check_assignments_only(list: &ObjectList, owner: &str, diagnostics: &mut Vec<Diagnostic>) {
    for item in &list.items {
        if !item.is_assignment() {
            diagnostics.push(Diagnostic::error(
                item.key_position().clone(),
                format!("Each attribute of {} must be an assignment", owner),
            ));
            continue;
        }

        if let Node::Object(child) = &item.value {
            check_assignments_only(&child.list, owner, diagnostics);
        }
    }
}
