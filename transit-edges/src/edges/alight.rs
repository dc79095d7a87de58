//! Leaving a vehicle.

use crate::config::WalkOptions;
use crate::state::State;

use super::{EdgeEffect, EdgeType, WalkResult};

/// Step off a vehicle.
///
/// Costs nothing, but ends the current ride: the next in-vehicle edge is a
/// new boarding even if it names the same trip.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Alight;

impl Alight {
    pub fn new() -> Self {
        Self
    }

    fn pass(state: &State) -> WalkResult {
        let mut next = state.clone();
        next.stamp(EdgeType::Alight, None);
        Ok(Some(next))
    }
}

impl EdgeEffect for Alight {
    fn walk(&self, state: &State, _options: &WalkOptions) -> WalkResult {
        Self::pass(state)
    }

    fn walk_back(&self, state: &State, _options: &WalkOptions) -> WalkResult {
        Self::pass(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clears_trip_and_costs_nothing() {
        let mut state = State::new(0, 700);
        state.set_weight(12);
        state.set_prev_edge_type(Some(EdgeType::TripHop));
        state.set_prev_edge_name(Some("T1".into()));

        let next = Alight::new()
            .walk(&state, &WalkOptions::default())
            .unwrap()
            .unwrap();
        assert_eq!(next.time(), 700);
        assert_eq!(next.weight(), 12);
        assert_eq!(next.prev_edge_type(), Some(EdgeType::Alight));
        assert_eq!(next.prev_edge_name(), None);

        let back = Alight::new()
            .walk_back(&state, &WalkOptions::default())
            .unwrap()
            .unwrap();
        assert_eq!(back, next);
    }
}
