//! Side table from model fields back to where they were written

use std::collections::HashMap;

use crate::diagnostics::Position;

/// The record a position belongs to, by index into the configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Owner {
    Action(usize),
    Workflow(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    /// The `{ ... }` body of the block
    Block,
    Needs,
    Env,
    Secrets,
    On,
    Resolves,
}

#[derive(Debug, Clone, Default)]
pub struct PositionTable {
    entries: HashMap<(Owner, Field), Position>,
}

impl PositionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record where a field was written. A later record replaces an earlier one.
    pub fn record(&mut self, owner: Owner, field: Field, position: &Position) {
        self.entries.insert((owner, field), position.clone());
    }

    /// Position of a field, or an unknown position if it was never recorded
    pub fn get(&self, owner: Owner, field: Field) -> Position {
        self.entries
            .get(&(owner, field))
            .cloned()
            .unwrap_or_default()
    }
}
