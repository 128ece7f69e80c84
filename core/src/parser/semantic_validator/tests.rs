//! Tests for the semantic validation rules

use super::*;
use crate::diagnostics::Severity;
use crate::parser::extract::Extractor;
use crate::syntax::read;

// ============================================================================
// Helper Functions
// ============================================================================

/// Extract and validate source, returning only the validator's diagnostics
fn validate(source: &str) -> Vec<Diagnostic> {
    let root = read(source, "").expect("Read should succeed");
    let extraction = Extractor::new().extract(&root);
    let context = ValidationContext::new(&extraction.configuration, &extraction.positions);
    Validator::new().validate(&context)
}

/// Check if diagnostics contain a specific rule
fn has_rule(diagnostics: &[Diagnostic], rule_id: &str) -> bool {
    diagnostics.iter().any(|d| d.rule == Some(rule_id))
}

/// Get diagnostics for a specific rule
fn for_rule<'a>(diagnostics: &'a [Diagnostic], rule_id: &str) -> Vec<&'a Diagnostic> {
    diagnostics
        .iter()
        .filter(|d| d.rule == Some(rule_id))
        .collect()
}

fn secrets_list(range: std::ops::RangeInclusive<usize>) -> String {
    range
        .map(|i| format!("\"S{}\"", i))
        .collect::<Vec<_>>()
        .join(", ")
}

// ============================================================================
// Validator
// ============================================================================

#[test]
fn test_valid_file_has_no_findings() {
    let source = r#"
workflow "ci" {
  on = "push"
  resolves = ["test"]
}

action "build" {
  uses = "docker://rust"
  runs = "cargo build"
  env = { RUST_LOG = "debug" }
  secrets = ["GITHUB_TOKEN", "DEPLOY_KEY"]
}

action "test" {
  uses = "./ci/test"
  needs = "build"
}
"#;

    assert!(validate(source).is_empty());
}

#[test]
fn test_rules_are_listed_in_order() {
    let ids: Vec<_> = Validator::new().rules().map(|(id, _)| id).collect();
    assert_eq!(
        ids,
        vec![
            "unknown-dependency",
            "circular-dependency",
            "missing-uses",
            "secret-limit",
            "environment-names",
            "workflow-event",
            "unknown-resolve",
        ]
    );
}

// ============================================================================
// Unknown Dependency Tests
// ============================================================================

#[test]
fn test_unknown_dependency() {
    let diagnostics = validate(
        r#"
action "a" {
  uses = "./x"
  needs = ["b", "c", "b"]
}
action "c" { uses = "./y" }
"#,
    );

    let errors = for_rule(&diagnostics, "unknown-dependency");
    assert_eq!(errors.len(), 2, "reported once per occurrence");
    assert!(errors
        .iter()
        .all(|e| e.message == "Action `a' needs nonexistent action `b'"));
    assert!(errors.iter().all(|e| e.position.line == 4));
    assert!(errors.iter().all(|e| e.severity == Severity::Error));
}

// ============================================================================
// Circular Dependency Tests
// ============================================================================

#[test]
fn test_self_dependency_is_fatal() {
    let diagnostics = validate(r#"action "a" { uses = "./x" needs = "a" }"#);

    let cycles = for_rule(&diagnostics, "circular-dependency");
    assert_eq!(cycles.len(), 1);
    assert_eq!(cycles[0].severity, Severity::Fatal);
    assert_eq!(cycles[0].message, "Circular dependency on `a'");
}

#[test]
fn test_cycle_reported_once_with_duplicate_needs() {
    let diagnostics = validate(
        r#"
action "a" { uses = "./x" needs = ["b", "b"] }
action "b" { uses = "./x" needs = ["a", "missing"] }
"#,
    );

    let cycles = for_rule(&diagnostics, "circular-dependency");
    assert_eq!(cycles.len(), 1);
    assert_eq!(cycles[0].message, "Circular dependency on `a'");
    assert_eq!(cycles[0].position.line, 3);
    assert!(has_rule(&diagnostics, "unknown-dependency"));
}

#[test]
fn test_no_cycle_in_diamond() {
    let diagnostics = validate(
        r#"
action "a" { uses = "./x" needs = ["b", "c"] }
action "b" { uses = "./x" needs = "d" }
action "c" { uses = "./x" needs = "d" }
action "d" { uses = "./x" }
"#,
    );

    assert!(!has_rule(&diagnostics, "circular-dependency"));
}

// ============================================================================
// Missing Uses Tests
// ============================================================================

#[test]
fn test_missing_uses_points_at_block() {
    let diagnostics = validate("\naction \"a\" {\n}\n");

    let errors = for_rule(&diagnostics, "missing-uses");
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].message, "Action `a' must have a `uses' attribute");
    assert_eq!(errors[0].position.line, 2);
    assert_eq!(errors[0].position.column, 12);
}

#[test]
fn test_unrecognized_uses_is_not_missing() {
    let diagnostics = validate(r#"action "a" { uses = "foo" }"#);
    assert!(!has_rule(&diagnostics, "missing-uses"));
}

// ============================================================================
// Secret Limit Tests
// ============================================================================

#[test]
fn test_exactly_max_secrets_is_allowed() {
    let source = format!(
        "action \"a\" {{ uses = \"./a\" secrets = [{}] }}\naction \"b\" {{ uses = \"./b\" secrets = [{}] }}",
        secrets_list(1..=60),
        secrets_list(41..=100),
    );

    assert!(!has_rule(&validate(&source), "secret-limit"));
}

#[test]
fn test_one_over_max_secrets_reports_once() {
    let source = format!(
        "action \"a\" {{ uses = \"./a\" secrets = [{}] }}\n\naction \"b\" {{ uses = \"./b\" secrets = [{}] }}\naction \"c\" {{ uses = \"./c\" secrets = [{}] }}",
        secrets_list(1..=60),
        secrets_list(50..=101),
        secrets_list(102..=110),
    );

    let diagnostics = validate(&source);
    let errors = for_rule(&diagnostics, "secret-limit");
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].position.line, 3, "reported where the 101st name appears");
    assert_eq!(
        errors[0].message,
        format!(
            "All actions combined must not have more than {} unique secrets",
            rules::MAX_SECRETS
        )
    );
}

// ============================================================================
// Environment Name Tests
// ============================================================================

#[test]
fn test_reserved_prefix() {
    let diagnostics = validate(
        r#"
action "a" {
  uses = "./a"
  env = {
    GITHUB_FOO = "nope"
    GITHUB_TOKEN = "yup"
  }
  secrets = ["GITHUB_BAR", "GITHUB_TOKEN", "github_lower"]
}
"#,
    );

    let findings = for_rule(&diagnostics, "environment-names");
    let (warnings, errors): (Vec<_>, Vec<_>) = findings
        .into_iter()
        .partition(|d| d.severity == Severity::Warning);

    let lines: Vec<_> = warnings.iter().map(|w| w.position.line).collect();
    assert_eq!(lines, vec![4, 8]);
    assert!(warnings
        .iter()
        .all(|w| w.message.contains("beginning with `GITHUB_' are reserved")));

    // GITHUB_TOKEN is exempt from the prefix check but still clashes with env
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].position.line, 8);
    assert_eq!(
        errors[0].message,
        "Secret `GITHUB_TOKEN' conflicts with an environment variable with the same name"
    );
}

#[test]
fn test_invalid_names() {
    let diagnostics = validate(r#"action "a" { uses = "./x" secrets = ["-", "^", "9", "a", "0_o", "o_0"] }"#);

    let bad: Vec<_> = for_rule(&diagnostics, "environment-names")
        .iter()
        .map(|d| d.message.rsplit(' ').next().unwrap_or_default().to_string())
        .collect();
    assert_eq!(bad, vec!["`-'", "`^'", "`9'", "`0_o'"]);
}

#[test]
fn test_secret_conflicts_with_env() {
    let diagnostics = validate(r#"action "a" { uses = "./x" env = { x = "foo" } secrets = ["x"] }"#);

    let errors = for_rule(&diagnostics, "environment-names");
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].severity, Severity::Error);
    assert_eq!(
        errors[0].message,
        "Secret `x' conflicts with an environment variable with the same name"
    );
}

#[test]
fn test_secret_redefined() {
    let diagnostics = validate(r#"action "a" { uses = "./x" secrets = ["x", "y", "x", "x"] }"#);

    let warnings = for_rule(&diagnostics, "environment-names");
    assert_eq!(warnings.len(), 2);
    assert!(warnings.iter().all(|w| w.message == "Secret `x' redefined"));
}

// ============================================================================
// Workflow Tests
// ============================================================================

#[test]
fn test_workflow_missing_on() {
    let diagnostics = validate(r#"workflow "w" { resolves = "a" } action "a" { uses = "./x" }"#);

    let errors = for_rule(&diagnostics, "workflow-event");
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].message, "Workflow `w' must have an `on' attribute");
}

#[test]
fn test_workflow_unknown_event() {
    let diagnostics = validate("workflow \"w\" {\n  on = \"installation\"\n}");

    let errors = for_rule(&diagnostics, "workflow-event");
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].message, "Workflow `w' has unknown `on' value `installation'");
    assert_eq!(errors[0].position.line, 2);
}

#[test]
fn test_workflow_event_is_case_insensitive() {
    let diagnostics = validate(r#"workflow "w" { on = "Pull_Request" }"#);
    assert!(!has_rule(&diagnostics, "workflow-event"));
}

#[test]
fn test_unknown_resolve() {
    let diagnostics = validate(
        r#"workflow "w" { on = "push" resolves = ["a", "x", "a"] } action "a" { uses = "./x" }"#,
    );

    let errors = for_rule(&diagnostics, "unknown-resolve");
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].message, "Workflow `w' resolves unknown action `x'");
}

#[test]
fn test_resolving_a_workflow_is_unknown() {
    let diagnostics = validate(r#"workflow "w" { on = "push" resolves = "w" }"#);
    assert!(has_rule(&diagnostics, "unknown-resolve"));
}
