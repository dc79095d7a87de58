//! Edge construction and traversal errors.
//!
//! These represent broken invariants: malformed schedules, agency indices the
//! traveler state cannot hold, clashing custom payload registrations. An edge
//! that simply cannot be used from a state is not an error; traversals
//! report that as `Ok(None)`.

use crate::state::StateError;

/// Errors raised while building or traversing edges.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EdgeError {
    /// State bookkeeping failed (e.g. agency index out of range)
    #[error(transparent)]
    State(#[from] StateError),

    /// Departures must ascend through a schedule
    #[error("schedule out of order at index {index}: {depart} follows {previous}")]
    UnsortedSchedule {
        index: usize,
        previous: i64,
        depart: i64,
    },

    /// Parallel schedule arrays differ in length
    #[error("schedule arrays differ in length: {departs} departs, {arrives} arrives, {trip_ids} trip ids")]
    MismatchedSchedule {
        departs: usize,
        arrives: usize,
        trip_ids: usize,
    },

    /// A single hop has impossible times
    #[error("invalid hop at index {index}: {reason}")]
    InvalidHop { index: usize, reason: &'static str },

    /// Headway window or interval is malformed
    #[error("invalid headway: {0}")]
    InvalidHeadway(&'static str),

    /// Street length must be finite and non-negative
    #[error("invalid street length: {0}")]
    InvalidLength(f64),

    /// Crossing delays must not run the clock backward
    #[error("invalid crossing time: {0}")]
    InvalidCrossingTime(i64),

    /// Walk options that cannot produce a sane street cost
    #[error("invalid walk options: {0}")]
    InvalidWalkOptions(String),

    /// A custom payload kind was registered twice
    #[error("custom payload type already defined: {0}")]
    DuplicatePayloadType(String),
}
