//! When riding a vehicle counts as a transfer.
//!
//! Consecutive in-vehicle edges naming the same trip are one ride. Any
//! in-vehicle edge that does not continue the previous one is a boarding:
//! it bumps the transfer count and charges the transfer penalty (refunded
//! in the backward direction, mirroring how reverse walks regress weight).
//! Non-vehicle edges in between, Alight in particular, break continuity.

use crate::state::State;

use super::SearchDirection;

/// Does stepping onto `trip_id` continue the ride the state is already on?
pub(crate) fn continues_trip(state: &State, trip_id: &str) -> bool {
    state.prev_edge_type().is_some_and(|t| t.is_in_vehicle())
        && state.prev_edge_name() == Some(trip_id)
}

/// Apply the transfer policy for an in-vehicle edge on `trip_id`.
///
/// Must run before the edge stamps itself on the state. Returns whether a
/// new vehicle was boarded.
pub(crate) fn board(
    state: &mut State,
    trip_id: &str,
    transfer_penalty: i64,
    direction: SearchDirection,
) -> bool {
    if continues_trip(state, trip_id) {
        return false;
    }
    state.set_num_transfers(state.num_transfers() + 1);
    match direction {
        SearchDirection::Forward => state.set_weight(state.weight() + transfer_penalty),
        SearchDirection::Backward => state.set_weight(state.weight() - transfer_penalty),
    }
    true
}
