//! In-vehicle hops between consecutive stops.
//!
//! A [`TripHopSchedule`] bundles every scheduled hop between two stops for
//! one service: one [`TripHop`] per trip, sorted by departure. Walking the
//! schedule searches for the hop to ride; once a path is known,
//! [`TripHopSchedule::collapse`] pins that choice down to the single
//! [`TripHop`] the itinerary actually used.
//!
//! Hop times are seconds since the service day's local midnight. They may
//! exceed one day (a trip leaving at 23:50 reaches its next stop at 24:10)
//! but departures stay within one week.

use std::sync::Arc;

use tracing::trace;

use crate::calendar::SECONDS_IN_WEEK;
use crate::config::WalkOptions;
use crate::state::State;

use super::service::{ScheduleService, SearchDirection};
use super::{EdgeEffect, EdgeError, EdgeType, WalkResult, transfer};

/// Offset of `state` into its service day, resolved in `direction`.
///
/// `None` when the service is not running or the day has not begun.
fn day_offset(
    service: &ScheduleService,
    state: &mut State,
    direction: SearchDirection,
) -> Result<Option<i64>, EdgeError> {
    let Some(day) = service.service_day(state, direction)? else {
        return Ok(None);
    };
    let offset = day.seconds_since_midnight(state.time());
    Ok((offset >= 0).then_some(offset))
}

/// One trip's ride from one stop to the next.
#[derive(Debug, Clone)]
pub struct TripHop {
    depart: i64,
    arrive: i64,
    trip_id: Arc<str>,
    service: ScheduleService,
}

impl TripHop {
    pub fn depart(&self) -> i64 {
        self.depart
    }

    pub fn arrive(&self) -> i64 {
        self.arrive
    }

    /// Returns the ride duration in seconds.
    pub fn transit(&self) -> i64 {
        self.arrive - self.depart
    }

    pub fn trip_id(&self) -> &str {
        &self.trip_id
    }

    pub fn service(&self) -> &ScheduleService {
        &self.service
    }
}

impl EdgeEffect for TripHop {
    fn walk(&self, state: &State, options: &WalkOptions) -> WalkResult {
        let mut next = state.clone();
        let Some(offset) = day_offset(&self.service, &mut next, SearchDirection::Forward)? else {
            return Ok(None);
        };
        if offset > self.depart {
            trace!(trip_id = %self.trip_id, offset, depart = self.depart, "hop already left");
            return Ok(None);
        }

        let elapsed = self.arrive - offset;
        next.advance(elapsed, elapsed);
        transfer::board(
            &mut next,
            &self.trip_id,
            options.transfer_penalty,
            SearchDirection::Forward,
        );
        next.stamp(EdgeType::TripHop, Some(self.trip_id.clone()));
        Ok(Some(next))
    }

    fn walk_back(&self, state: &State, options: &WalkOptions) -> WalkResult {
        let mut next = state.clone();
        let Some(offset) = day_offset(&self.service, &mut next, SearchDirection::Backward)? else {
            return Ok(None);
        };
        if offset < self.arrive {
            trace!(trip_id = %self.trip_id, offset, arrive = self.arrive, "hop not yet arrived");
            return Ok(None);
        }

        let elapsed = offset - self.depart;
        next.regress(elapsed, elapsed);
        transfer::board(
            &mut next,
            &self.trip_id,
            options.transfer_penalty,
            SearchDirection::Backward,
        );
        next.stamp(EdgeType::TripHop, Some(self.trip_id.clone()));
        Ok(Some(next))
    }
}

/// Every scheduled hop between two stops for one service.
#[derive(Debug, Clone)]
pub struct TripHopSchedule {
    hops: Vec<Arc<TripHop>>,
    service: ScheduleService,
}

impl TripHopSchedule {
    /// Build a schedule from parallel arrays, one entry per trip.
    ///
    /// Departures must lie within `[0, SECONDS_IN_WEEK)`, no hop may arrive
    /// before it departs, and both departures and arrivals must be
    /// non-decreasing, so trips never overtake each other.
    pub fn new(
        departs: &[i64],
        arrives: &[i64],
        trip_ids: &[&str],
        service: ScheduleService,
    ) -> Result<Self, EdgeError> {
        if departs.len() != arrives.len() || departs.len() != trip_ids.len() {
            return Err(EdgeError::MismatchedSchedule {
                departs: departs.len(),
                arrives: arrives.len(),
                trip_ids: trip_ids.len(),
            });
        }

        let mut hops: Vec<Arc<TripHop>> = Vec::with_capacity(departs.len());
        for (index, ((&depart, &arrive), &trip_id)) in
            departs.iter().zip(arrives).zip(trip_ids).enumerate()
        {
            if !(0..SECONDS_IN_WEEK).contains(&depart) {
                return Err(EdgeError::InvalidHop {
                    index,
                    reason: "departure outside the service week",
                });
            }
            if arrive < depart {
                return Err(EdgeError::InvalidHop {
                    index,
                    reason: "arrives before it departs",
                });
            }
            if let Some(previous) = hops.last() {
                if depart < previous.depart {
                    return Err(EdgeError::UnsortedSchedule {
                        index,
                        previous: previous.depart,
                        depart,
                    });
                }
                if arrive < previous.arrive {
                    return Err(EdgeError::InvalidHop {
                        index,
                        reason: "overtakes the previous trip",
                    });
                }
            }
            hops.push(Arc::new(TripHop {
                depart,
                arrive,
                trip_id: trip_id.into(),
                service: service.clone(),
            }));
        }

        Ok(Self { hops, service })
    }

    pub fn len(&self) -> usize {
        self.hops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hops.is_empty()
    }

    pub fn hop(&self, index: usize) -> Option<&Arc<TripHop>> {
        self.hops.get(index)
    }

    pub fn hops(&self) -> &[Arc<TripHop>] {
        &self.hops
    }

    pub fn service(&self) -> &ScheduleService {
        &self.service
    }

    /// Seconds since the local midnight of the service day containing the
    /// state's time, reduced modulo one week.
    ///
    /// Resolves the service day, populating the state's service cache.
    /// Returns `None` if the service does not run; a negative offset means
    /// the next service day has not begun.
    pub fn seconds_since_midnight(&self, state: &mut State) -> Result<Option<i64>, EdgeError> {
        let day = self.service.service_day(state, SearchDirection::Forward)?;
        Ok(day.map(|day| day.seconds_since_midnight(state.time())))
    }

    /// The first hop departing at or after `offset`.
    pub fn next_hop(&self, offset: i64) -> Option<&Arc<TripHop>> {
        let index = self.hops.partition_point(|hop| hop.depart < offset);
        self.hops.get(index)
    }

    /// The last hop arriving at or before `offset`.
    pub fn last_hop(&self, offset: i64) -> Option<&Arc<TripHop>> {
        let index = self.hops.partition_point(|hop| hop.arrive <= offset);
        index.checked_sub(1).and_then(|i| self.hops.get(i))
    }

    /// The hop a forward walk from `state` would ride.
    ///
    /// `state` is not modified; the calendar lookup runs on a scratch copy.
    pub fn collapse(&self, state: &State) -> Result<Option<Arc<TripHop>>, EdgeError> {
        let mut scratch = state.clone();
        let offset = day_offset(&self.service, &mut scratch, SearchDirection::Forward)?;
        Ok(offset.and_then(|offset| self.next_hop(offset)).cloned())
    }

    /// The hop a backward walk from `state` would ride.
    pub fn collapse_back(&self, state: &State) -> Result<Option<Arc<TripHop>>, EdgeError> {
        let mut scratch = state.clone();
        let offset = day_offset(&self.service, &mut scratch, SearchDirection::Backward)?;
        Ok(offset.and_then(|offset| self.last_hop(offset)).cloned())
    }
}

impl EdgeEffect for TripHopSchedule {
    fn walk(&self, state: &State, options: &WalkOptions) -> WalkResult {
        let mut next = state.clone();
        let Some(offset) = day_offset(&self.service, &mut next, SearchDirection::Forward)? else {
            return Ok(None);
        };
        let Some(hop) = self.next_hop(offset) else {
            trace!(offset, hops = self.hops.len(), "no later hop");
            return Ok(None);
        };

        // Waiting for the departure is charged along with the ride
        let elapsed = hop.arrive - offset;
        next.advance(elapsed, elapsed);
        transfer::board(
            &mut next,
            &hop.trip_id,
            options.transfer_penalty,
            SearchDirection::Forward,
        );
        next.stamp(EdgeType::TripHopSchedule, Some(hop.trip_id.clone()));
        Ok(Some(next))
    }

    fn walk_back(&self, state: &State, options: &WalkOptions) -> WalkResult {
        let mut next = state.clone();
        let Some(offset) = day_offset(&self.service, &mut next, SearchDirection::Backward)? else {
            return Ok(None);
        };
        let Some(hop) = self.last_hop(offset) else {
            trace!(offset, hops = self.hops.len(), "no earlier hop");
            return Ok(None);
        };

        let elapsed = offset - hop.depart;
        next.regress(elapsed, elapsed);
        transfer::board(
            &mut next,
            &hop.trip_id,
            options.transfer_penalty,
            SearchDirection::Backward,
        );
        next.stamp(EdgeType::TripHopSchedule, Some(hop.trip_id.clone()));
        Ok(Some(next))
    }
}
