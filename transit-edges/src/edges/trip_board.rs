//! Boarding a vehicle from a stop's departure board.

use std::sync::Arc;

use tracing::trace;

use crate::config::WalkOptions;
use crate::state::State;

use super::service::{ScheduleService, SearchDirection};
use super::{EdgeEffect, EdgeError, EdgeType, WalkResult, transfer};

/// The departures from one stop for one service, earliest first.
///
/// Departure times are seconds since the service day's local midnight and
/// strictly ascend. Walking the board waits for the next departure and puts
/// the traveler on that trip. Boarding only makes sense in an
/// earliest-arrival search, so the board is not walkable backward; reverse
/// searches reach trips through their hop schedules instead.
#[derive(Debug, Clone)]
pub struct TripBoard {
    departs: Vec<i64>,
    trip_ids: Vec<Arc<str>>,
    service: ScheduleService,
}

impl TripBoard {
    pub fn new(service: ScheduleService) -> Self {
        Self {
            departs: Vec::new(),
            trip_ids: Vec::new(),
            service,
        }
    }

    /// Append a departure. It must be strictly later than the last one.
    pub fn add_boarding(
        &mut self,
        trip_id: impl Into<Arc<str>>,
        depart: i64,
    ) -> Result<(), EdgeError> {
        if let Some(&previous) = self.departs.last() {
            if depart <= previous {
                return Err(EdgeError::UnsortedSchedule {
                    index: self.departs.len(),
                    previous,
                    depart,
                });
            }
        }
        self.departs.push(depart);
        self.trip_ids.push(trip_id.into());
        Ok(())
    }

    pub fn num_boardings(&self) -> usize {
        self.departs.len()
    }

    pub fn boarding_trip_id(&self, index: usize) -> Option<&str> {
        self.trip_ids.get(index).map(|id| &**id)
    }

    pub fn boarding_depart(&self, index: usize) -> Option<i64> {
        self.departs.get(index).copied()
    }

    pub fn service(&self) -> &ScheduleService {
        &self.service
    }

    /// Index of the earliest departure at or after `offset`, if any.
    pub fn search_boardings_list(&self, offset: i64) -> Option<usize> {
        let index = self.departs.partition_point(|&depart| depart < offset);
        (index < self.departs.len()).then_some(index)
    }

    /// Index of the next departure catchable from `state`.
    ///
    /// Resolves the service day first, populating the state's service cache.
    /// Returns `None` when the service is not running, the day has not
    /// begun, or every departure has gone.
    pub fn next_boarding_index(&self, state: &mut State) -> Result<Option<usize>, EdgeError> {
        Ok(self.next_boarding(state)?.map(|(index, _)| index))
    }

    /// Next catchable departure's index, with the state's offset into the
    /// service day.
    fn next_boarding(&self, state: &mut State) -> Result<Option<(usize, i64)>, EdgeError> {
        let Some(day) = self.service.service_day(state, SearchDirection::Forward)? else {
            return Ok(None);
        };
        let offset = day.seconds_since_midnight(state.time());
        if offset < 0 {
            return Ok(None);
        }
        Ok(self.search_boardings_list(offset).map(|index| (index, offset)))
    }
}

impl EdgeEffect for TripBoard {
    fn walk(&self, state: &State, options: &WalkOptions) -> WalkResult {
        let mut next = state.clone();
        let Some((index, offset)) = self.next_boarding(&mut next)? else {
            trace!(
                service_id = %self.service.service_id(),
                time = state.time(),
                "no boarding available"
            );
            return Ok(None);
        };
        let trip_id = &self.trip_ids[index];

        let wait = self.departs[index] - offset;
        next.advance(wait, wait);
        transfer::board(
            &mut next,
            trip_id,
            options.transfer_penalty,
            SearchDirection::Forward,
        );
        next.stamp(EdgeType::TripBoard, Some(trip_id.clone()));
        Ok(Some(next))
    }
}

#[cfg(test)]
mod tests {
    use super::super::fixtures::*;
    use super::*;

    fn board() -> TripBoard {
        let mut board = TripBoard::new(service(0, 1, weekly_calendar(&[1])));
        board.add_boarding("A", 100).unwrap();
        board.add_boarding("B", 200).unwrap();
        board.add_boarding("C", 300).unwrap();
        board
    }

    #[test]
    fn add_boarding_requires_ascending_departs() {
        let mut board = board();
        assert_eq!(
            board.add_boarding("D", 300),
            Err(EdgeError::UnsortedSchedule {
                index: 3,
                previous: 300,
                depart: 300
            })
        );
        assert!(board.add_boarding("D", 250).is_err());
        assert_eq!(board.num_boardings(), 3);
        assert!(board.add_boarding("D", 301).is_ok());
    }

    #[test]
    fn accessors() {
        let board = board();
        assert_eq!(board.num_boardings(), 3);
        assert_eq!(board.boarding_trip_id(1), Some("B"));
        assert_eq!(board.boarding_depart(2), Some(300));
        assert_eq!(board.boarding_trip_id(3), None);
        assert_eq!(board.boarding_depart(3), None);
    }

    #[test]
    fn search_boardings_list() {
        let board = board();
        assert_eq!(board.search_boardings_list(0), Some(0));
        assert_eq!(board.search_boardings_list(100), Some(0));
        assert_eq!(board.search_boardings_list(101), Some(1));
        assert_eq!(board.search_boardings_list(300), Some(2));
        assert_eq!(board.search_boardings_list(301), None);
    }

    #[test]
    fn empty_board_finds_nothing() {
        let board = TripBoard::new(service(0, 1, weekly_calendar(&[1])));
        assert_eq!(board.search_boardings_list(0), None);
        assert!(
            board
                .walk(&State::new(1, at(0, 0)), &WalkOptions::default())
                .unwrap()
                .is_none()
        );
    }

    #[test]
    fn boards_next_departure() {
        let board = board();
        let options = WalkOptions::default().with_transfer_penalty(600);
        let state = State::new(1, at(0, 150));

        let next = board.walk(&state, &options).unwrap().unwrap();
        assert_eq!(next.time(), at(0, 200));
        assert_eq!(next.weight(), 50 + 600);
        assert_eq!(next.num_transfers(), 1);
        assert_eq!(next.prev_edge_type(), Some(EdgeType::TripBoard));
        assert_eq!(next.prev_edge_name(), Some("B"));
    }

    #[test]
    fn all_departures_gone() {
        let board = board();
        let state = State::new(1, at(0, 301));
        assert!(board.walk(&state, &WalkOptions::default()).unwrap().is_none());
    }

    #[test]
    fn next_boarding_index_populates_cache() {
        let board = board();
        let mut state = State::new(1, at(0, 150));
        assert_eq!(board.next_boarding_index(&mut state).unwrap(), Some(1));
        assert!(state.service_period(0).unwrap().is_some());
    }

    #[test]
    fn day_not_begun_is_not_found() {
        // No period on day 0; forward resolution lands on day 1
        let board = {
            let mut board = TripBoard::new(service(0, 1, calendar_days(&[(1, &[1])])));
            board.add_boarding("A", 100).unwrap();
            board
        };
        let mut state = State::new(1, at(0, 50_000));
        assert_eq!(board.next_boarding_index(&mut state).unwrap(), None);
    }

    #[test]
    fn service_not_running() {
        let mut board = TripBoard::new(service(0, 9, weekly_calendar(&[1])));
        board.add_boarding("A", 100).unwrap();
        let mut state = State::new(1, at(0, 50));
        assert_eq!(board.next_boarding_index(&mut state).unwrap(), None);
    }

    #[test]
    fn walk_back_not_reachable() {
        let board = board();
        let state = State::new(1, at(0, 250));
        assert!(
            board
                .walk_back(&state, &WalkOptions::default())
                .unwrap()
                .is_none()
        );
    }
}
