//! Event types a workflow may be triggered by

/// Event types accepted in a workflow's `on` attribute
pub const ALLOWED_EVENT_TYPES: &[&str] = &[
    "check_run",
    "check_suite",
    "commit_comment",
    "create",
    "delete",
    "deployment",
    "deployment_status",
    "fork",
    "gollum",
    "issue_comment",
    "issues",
    "label",
    "member",
    "milestone",
    "page_build",
    "project_card",
    "project_column",
    "project",
    "public",
    "pull_request_review_comment",
    "pull_request_review",
    "pull_request",
    "push",
    "release",
    "repository_dispatch",
    "status",
    "watch",
];

/// Whether `on` names a known event type (case-insensitive)
pub fn is_allowed_event_type(on: &str) -> bool {
    ALLOWED_EVENT_TYPES
        .iter()
        .any(|allowed| allowed.eq_ignore_ascii_case(on))
}

/// Whether a workflow with the given `on` value fires for `event_type`
pub fn is_matching_event_type(on: &str, event_type: &str) -> bool {
    on.eq_ignore_ascii_case(event_type)
}
