//! Fixed delays at junctions.

use crate::config::WalkOptions;
use crate::state::State;

use super::{EdgeEffect, EdgeError, EdgeType, WalkResult};

/// A fixed delay, such as crossing a road or changing platforms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Crossing {
    crossing_time: i64,
}

impl Crossing {
    /// Create a crossing taking `crossing_time` seconds, which must not be
    /// negative.
    pub fn new(crossing_time: i64) -> Result<Self, EdgeError> {
        if crossing_time < 0 {
            return Err(EdgeError::InvalidCrossingTime(crossing_time));
        }
        Ok(Self { crossing_time })
    }

    /// Returns the delay in seconds.
    pub fn crossing_time(&self) -> i64 {
        self.crossing_time
    }
}

impl EdgeEffect for Crossing {
    fn walk(&self, state: &State, _options: &WalkOptions) -> WalkResult {
        let mut next = state.clone();
        next.advance(self.crossing_time, self.crossing_time);
        next.stamp(EdgeType::Crossing, None);
        Ok(Some(next))
    }

    fn walk_back(&self, state: &State, _options: &WalkOptions) -> WalkResult {
        let mut next = state.clone();
        next.regress(self.crossing_time, self.crossing_time);
        next.stamp(EdgeType::Crossing, None);
        Ok(Some(next))
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn walk_then_walk_back_round_trip(
            crossing_time in 0i64..100_000,
            time in -1_000_000i64..1_000_000,
            weight in -1_000_000i64..1_000_000,
        ) {
            let crossing = Crossing::new(crossing_time).unwrap();
            let options = WalkOptions::default();
            let mut state = State::new(0, time);
            state.set_weight(weight);

            let there = crossing.walk(&state, &options).unwrap().unwrap();
            let back = crossing.walk_back(&there, &options).unwrap().unwrap();

            prop_assert_eq!(back.time(), time);
            prop_assert_eq!(back.weight(), weight);
        }
    }
}
