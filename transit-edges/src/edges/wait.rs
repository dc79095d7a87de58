//! Waiting in place for a fixed clock time.

use std::sync::Arc;

use tracing::trace;

use crate::calendar::Timezone;
use crate::config::WalkOptions;
use crate::state::State;

use super::{EdgeEffect, EdgeType, WalkResult};

/// Wait in place until a fixed clock time.
///
/// `end` is absolute, so traversal never consults the timezone; it only
/// records where the wait happens for callers presenting the itinerary.
#[derive(Debug, Clone)]
pub struct Wait {
    end: i64,
    timezone: Arc<dyn Timezone>,
}

impl Wait {
    /// `end` is absolute seconds since the epoch.
    pub fn new(end: i64, timezone: Arc<dyn Timezone>) -> Self {
        Self { end, timezone }
    }

    pub fn end(&self) -> i64 {
        self.end
    }

    /// Returns the timezone the wait is described in. Not used by `walk`.
    pub fn timezone(&self) -> &Arc<dyn Timezone> {
        &self.timezone
    }
}

impl EdgeEffect for Wait {
    fn walk(&self, state: &State, _options: &WalkOptions) -> WalkResult {
        if state.time() > self.end {
            trace!(time = state.time(), end = self.end, "wait already over");
            return Ok(None);
        }
        let mut next = state.clone();
        next.advance(self.end - state.time(), self.end - state.time());
        next.stamp(EdgeType::Wait, None);
        Ok(Some(next))
    }

    fn walk_back(&self, state: &State, _options: &WalkOptions) -> WalkResult {
        if state.time() < self.end {
            trace!(time = state.time(), end = self.end, "wait not yet begun");
            return Ok(None);
        }
        let mut next = state.clone();
        next.regress(state.time() - self.end, state.time() - self.end);
        next.stamp(EdgeType::Wait, None);
        Ok(Some(next))
    }
}


#[cfg(test)]
mod proptests {
    use super::super::fixtures::utc;
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// A wait is reachable exactly when its end is not in the past,
        /// and then lands on the end
        #[test]
        fn walk_lands_on_end(end in -100_000i64..100_000, time in -100_000i64..100_000) {
            let wait = Wait::new(end, utc());
            let result = wait.walk(&State::new(0, time), &WalkOptions::default()).unwrap();
            match result {
                Some(next) => {
                    prop_assert!(time <= end);
                    prop_assert_eq!(next.time(), end);
                    prop_assert_eq!(next.weight(), end - time);
                }
                None => prop_assert!(time > end),
            }
        }
    }
}
