//! Frequency-based service: "every ten minutes between 07:00 and 19:00".

use std::sync::Arc;

use tracing::trace;

use crate::config::WalkOptions;
use crate::state::State;

use super::service::{ScheduleService, SearchDirection};
use super::{EdgeEffect, EdgeError, EdgeType, WalkResult, transfer};

/// A vehicle that leaves every `wait_period` seconds within a daily window
/// and takes `transit` seconds to reach the next stop.
///
/// `begin_time` and `end_time` are seconds since the service day's local
/// midnight; departures happen at `begin_time + k * wait_period` up to and
/// including `end_time`.
#[derive(Debug, Clone)]
pub struct Headway {
    begin_time: i64,
    end_time: i64,
    wait_period: i64,
    transit: i64,
    trip_id: Arc<str>,
    service: ScheduleService,
}

impl Headway {
    pub fn new(
        begin_time: i64,
        end_time: i64,
        wait_period: i64,
        transit: i64,
        trip_id: impl Into<Arc<str>>,
        service: ScheduleService,
    ) -> Result<Self, EdgeError> {
        if wait_period <= 0 {
            return Err(EdgeError::InvalidHeadway("wait period must be positive"));
        }
        if begin_time > end_time {
            return Err(EdgeError::InvalidHeadway("window begins after it ends"));
        }
        if transit < 0 {
            return Err(EdgeError::InvalidHeadway("transit time is negative"));
        }
        Ok(Self {
            begin_time,
            end_time,
            wait_period,
            transit,
            trip_id: trip_id.into(),
            service,
        })
    }

    pub fn begin_time(&self) -> i64 {
        self.begin_time
    }

    pub fn end_time(&self) -> i64 {
        self.end_time
    }

    pub fn wait_period(&self) -> i64 {
        self.wait_period
    }

    pub fn transit(&self) -> i64 {
        self.transit
    }

    pub fn trip_id(&self) -> &str {
        &self.trip_id
    }

    pub fn service(&self) -> &ScheduleService {
        &self.service
    }

    fn in_window(&self, offset: i64) -> bool {
        (self.begin_time..=self.end_time).contains(&offset)
    }

    /// Earliest departure at or after `offset`, if it is within the window.
    fn next_departure(&self, offset: i64) -> Option<i64> {
        let since_begin = offset - self.begin_time;
        let periods = (since_begin + self.wait_period - 1) / self.wait_period;
        let slot = self.begin_time + periods * self.wait_period;
        (slot <= self.end_time).then_some(slot)
    }

    /// Latest departure at or before `offset`.
    fn last_departure(&self, offset: i64) -> i64 {
        let periods = (offset - self.begin_time) / self.wait_period;
        self.begin_time + periods * self.wait_period
    }
}

impl EdgeEffect for Headway {
    fn walk(&self, state: &State, options: &WalkOptions) -> WalkResult {
        let mut next = state.clone();
        let Some(day) = self.service.service_day(&mut next, SearchDirection::Forward)? else {
            return Ok(None);
        };
        let offset = day.seconds_since_midnight(next.time());
        if !self.in_window(offset) {
            trace!(trip_id = %self.trip_id, offset, "outside headway window");
            return Ok(None);
        }
        let Some(departure) = self.next_departure(offset) else {
            trace!(trip_id = %self.trip_id, offset, "no departure left in window");
            return Ok(None);
        };

        let elapsed = departure - offset + self.transit;
        next.advance(elapsed, elapsed);
        transfer::board(
            &mut next,
            &self.trip_id,
            options.transfer_penalty,
            SearchDirection::Forward,
        );
        next.stamp(EdgeType::Headway, Some(self.trip_id.clone()));
        Ok(Some(next))
    }

    fn walk_back(&self, state: &State, options: &WalkOptions) -> WalkResult {
        let mut next = state.clone();
        let Some(day) = self.service.service_day(&mut next, SearchDirection::Backward)? else {
            return Ok(None);
        };
        let offset = day.seconds_since_midnight(next.time());
        let latest = offset - self.transit;
        if !self.in_window(latest) {
            trace!(trip_id = %self.trip_id, offset, "outside headway window");
            return Ok(None);
        }

        let elapsed = offset - self.last_departure(latest);
        next.regress(elapsed, elapsed);
        transfer::board(
            &mut next,
            &self.trip_id,
            options.transfer_penalty,
            SearchDirection::Backward,
        );
        next.stamp(EdgeType::Headway, Some(self.trip_id.clone()));
        Ok(Some(next))
    }
}
