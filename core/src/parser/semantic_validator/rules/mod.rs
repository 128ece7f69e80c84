//! Validation Rules
//!
//! Each file in this module contains one validation rule:
//!
//! - `unknown_dependency.rs` - `needs` entries naming no declared action
//! - `circular_dependency.rs` - cycles in the `needs` graph
//! - `missing_uses.rs` - actions without a `uses` attribute
//! - `secret_limit.rs` - too many distinct secrets in one file
//! - `environment_names.rs` - malformed, reserved and clashing env/secret names
//! - `workflow_event.rs` - missing or unknown `on` event
//! - `unknown_resolve.rs` - `resolves` entries naming no declared action

mod circular_dependency;
mod environment_names;
mod missing_uses;
mod secret_limit;
mod unknown_dependency;
mod unknown_resolve;
mod workflow_event;

pub use circular_dependency::CircularDependencyRule;
pub use environment_names::EnvironmentNamesRule;
pub use missing_uses::MissingUsesRule;
pub use secret_limit::{SecretLimitRule, MAX_SECRETS};
pub use unknown_dependency::UnknownDependencyRule;
pub use unknown_resolve::UnknownResolveRule;
pub use workflow_event::WorkflowEventRule;
