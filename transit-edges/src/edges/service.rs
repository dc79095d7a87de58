//! Service-day resolution for schedule edges.
//!
//! Headways, trip boards and trip hops all ask the same question before
//! looking at their timetable: does my service run on the service day
//! containing the traveler's clock, and where does that day start? Finding
//! the period means a calendar search, so the answer is memoized per agency
//! in the traveler state and reused until the clock leaves the period.

use std::sync::Arc;

use tracing::trace;

use crate::calendar::{SECONDS_IN_WEEK, ServiceCalendar, ServiceId, ServicePeriod, Timezone};
use crate::state::State;

use super::EdgeError;

/// Which way a search moves through time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchDirection {
    /// Earliest-arrival search; time increases.
    Forward,
    /// Latest-departure search; time decreases.
    Backward,
}

/// The calendar binding shared by every schedule edge of one service.
#[derive(Debug, Clone)]
pub struct ScheduleService {
    service_id: ServiceId,
    calendar: Arc<ServiceCalendar>,
    timezone: Arc<dyn Timezone>,
    agency: usize,
}

impl ScheduleService {
    /// Bind `service_id` to its agency's calendar and timezone.
    ///
    /// `agency` indexes the traveler state's service cache; every service of
    /// one agency must share the same calendar.
    pub fn new(
        service_id: ServiceId,
        calendar: Arc<ServiceCalendar>,
        timezone: Arc<dyn Timezone>,
        agency: usize,
    ) -> Self {
        Self {
            service_id,
            calendar,
            timezone,
            agency,
        }
    }

    pub fn service_id(&self) -> ServiceId {
        self.service_id
    }

    pub fn calendar(&self) -> &Arc<ServiceCalendar> {
        &self.calendar
    }

    pub fn timezone(&self) -> &Arc<dyn Timezone> {
        &self.timezone
    }

    pub fn agency(&self) -> usize {
        self.agency
    }

    /// Resolve the service day for the state's current time.
    ///
    /// A cached period is trusted only while it still covers the clock;
    /// otherwise the calendar is searched (`period_of_or_after` forward,
    /// `period_of_or_before` backward) and the result replaces the cache
    /// slot. Returns `None` if there is no such period or the service does
    /// not run in it.
    pub fn service_day(
        &self,
        state: &mut State,
        direction: SearchDirection,
    ) -> Result<Option<ServiceDay>, EdgeError> {
        let time = state.time();
        let cached = state.service_cache().fresh(self.agency, time)?.cloned();
        let period = match cached {
            Some(period) => period,
            None => {
                let resolved = match direction {
                    SearchDirection::Forward => self.calendar.period_of_or_after(time),
                    SearchDirection::Backward => self.calendar.period_of_or_before(time),
                }
                .cloned();
                trace!(
                    agency = self.agency,
                    time,
                    found = resolved.is_some(),
                    "refreshed service period cache"
                );
                state.set_service_period(self.agency, resolved.clone())?;
                match resolved {
                    Some(period) => period,
                    None => return Ok(None),
                }
            }
        };

        if !period.has_service(self.service_id) {
            trace!(
                service_id = %self.service_id,
                begin = period.begin_time(),
                "service not running"
            );
            return Ok(None);
        }

        let midnight = self.timezone.local_midnight(period.begin_time());
        Ok(Some(ServiceDay { period, midnight }))
    }
}

/// A resolved service day: the running period and its local midnight.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceDay {
    period: Arc<ServicePeriod>,
    midnight: i64,
}

impl ServiceDay {
    /// Returns the service period.
    pub fn period(&self) -> &Arc<ServicePeriod> {
        &self.period
    }

    /// Absolute time of the local midnight that schedule offsets count from.
    pub fn midnight(&self) -> i64 {
        self.midnight
    }

    /// Seconds since this day's midnight at `time`, reduced modulo one week.
    ///
    /// Past midnight the offset keeps growing beyond one day, so an overnight
    /// trip's 25:30 stop compares correctly against the schedule. A negative
    /// result means the day has not begun yet and matches no schedule entry.
    pub fn seconds_since_midnight(&self, time: i64) -> i64 {
        let offset = time - self.midnight;
        if offset < 0 {
            offset
        } else {
            offset % SECONDS_IN_WEEK
        }
    }
}
