//! Structural connection with no physical cost.

use std::sync::Arc;

use crate::config::WalkOptions;
use crate::state::State;

use super::{EdgeEffect, EdgeType, WalkResult};

/// A zero-cost connection, e.g. between a stop and its platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    name: Arc<str>,
}

impl Link {
    pub fn new(name: impl Into<Arc<str>>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    fn pass(&self, state: &State) -> WalkResult {
        let mut next = state.clone();
        next.stamp(EdgeType::Link, Some(self.name.clone()));
        Ok(Some(next))
    }
}

impl EdgeEffect for Link {
    fn walk(&self, state: &State, _options: &WalkOptions) -> WalkResult {
        self.pass(state)
    }

    fn walk_back(&self, state: &State, _options: &WalkOptions) -> WalkResult {
        self.pass(state)
    }
}
