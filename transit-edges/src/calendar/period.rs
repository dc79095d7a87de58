//! Service periods and the calendar that orders them.

use std::fmt;
use std::sync::Arc;

use super::CalendarError;

/// Identifier of a scheduled service (a set of operating days).
///
/// # Examples
///
/// ```
/// use transit_edges::calendar::ServiceId;
///
/// let weekday = ServiceId(1);
/// assert_eq!(weekday.to_string(), "1");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ServiceId(pub u32);

impl fmt::Display for ServiceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for ServiceId {
    fn from(value: u32) -> Self {
        ServiceId(value)
    }
}

/// One service day: an absolute time span and the services running in it.
///
/// `begin_time` and `end_time` are seconds since the epoch. A period usually
/// spans a single day, but nothing requires it to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServicePeriod {
    begin_time: i64,
    end_time: i64,
    service_ids: Vec<ServiceId>,
}

impl ServicePeriod {
    /// Create a period covering `[begin_time, end_time)`.
    pub fn new(
        begin_time: i64,
        end_time: i64,
        service_ids: Vec<ServiceId>,
    ) -> Result<Self, CalendarError> {
        if end_time <= begin_time {
            return Err(CalendarError::EmptyPeriod {
                begin: begin_time,
                end: end_time,
            });
        }
        Ok(Self {
            begin_time,
            end_time,
            service_ids,
        })
    }

    /// Returns the first second of the period.
    pub fn begin_time(&self) -> i64 {
        self.begin_time
    }

    /// Returns the first second after the period.
    pub fn end_time(&self) -> i64 {
        self.end_time
    }

    /// Returns the services running during this period.
    pub fn service_ids(&self) -> &[ServiceId] {
        &self.service_ids
    }

    /// Does `time` fall inside this period?
    pub fn covers(&self, time: i64) -> bool {
        self.begin_time <= time && time < self.end_time
    }

    /// Does the given service run during this period?
    pub fn has_service(&self, service_id: ServiceId) -> bool {
        self.service_ids.contains(&service_id)
    }
}

/// An ordered, non-overlapping sequence of service periods.
///
/// Periods are stored behind `Arc` so that lookups hand out shared
/// snapshots: traveler states cache them without copying and without
/// borrowing from the calendar.
#[derive(Debug, Clone, Default)]
pub struct ServiceCalendar {
    periods: Vec<Arc<ServicePeriod>>,
}

impl ServiceCalendar {
    /// Create an empty calendar.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a period.
    ///
    /// Periods must be added in chronological order and must not overlap.
    pub fn add_period(&mut self, period: ServicePeriod) -> Result<(), CalendarError> {
        if let Some(last) = self.periods.last() {
            if period.begin_time < last.end_time {
                return Err(CalendarError::Overlap {
                    previous_end: last.end_time,
                    begin: period.begin_time,
                });
            }
        }
        self.periods.push(Arc::new(period));
        Ok(())
    }

    /// Builder-style variant of [`add_period`](Self::add_period).
    pub fn with_period(mut self, period: ServicePeriod) -> Result<Self, CalendarError> {
        self.add_period(period)?;
        Ok(self)
    }

    /// Returns the period covering `time`, or failing that the first period
    /// that begins after it.
    pub fn period_of_or_after(&self, time: i64) -> Option<&Arc<ServicePeriod>> {
        let idx = self.periods.partition_point(|p| p.end_time <= time);
        self.periods.get(idx)
    }

    /// Returns the period covering `time`, or failing that the last period
    /// that ended before it.
    pub fn period_of_or_before(&self, time: i64) -> Option<&Arc<ServicePeriod>> {
        let idx = self.periods.partition_point(|p| p.begin_time <= time);
        idx.checked_sub(1).map(|i| &self.periods[i])
    }

    /// Returns all periods in chronological order.
    pub fn periods(&self) -> &[Arc<ServicePeriod>] {
        &self.periods
    }

    /// Returns the number of periods.
    pub fn len(&self) -> usize {
        self.periods.len()
    }

    /// Returns true if the calendar has no periods.
    pub fn is_empty(&self) -> bool {
        self.periods.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::SECONDS_IN_DAY;

    fn day(n: i64, ids: &[u32]) -> ServicePeriod {
        ServicePeriod::new(
            n * SECONDS_IN_DAY,
            (n + 1) * SECONDS_IN_DAY,
            ids.iter().copied().map(ServiceId).collect(),
        )
        .unwrap()
    }

    fn three_days() -> ServiceCalendar {
        ServiceCalendar::new()
            .with_period(day(0, &[1]))
            .unwrap()
            .with_period(day(1, &[1, 2]))
            .unwrap()
            .with_period(day(3, &[2]))
            .unwrap()
    }

    #[test]
    fn period_rejects_empty_span() {
        assert!(ServicePeriod::new(100, 100, vec![]).is_err());
        assert!(ServicePeriod::new(100, 50, vec![]).is_err());
        assert!(ServicePeriod::new(100, 101, vec![]).is_ok());
    }

    #[test]
    fn period_covers_half_open() {
        let p = ServicePeriod::new(100, 200, vec![]).unwrap();
        assert!(!p.covers(99));
        assert!(p.covers(100));
        assert!(p.covers(199));
        assert!(!p.covers(200));
    }

    #[test]
    fn period_has_service() {
        let p = day(0, &[1, 4]);
        assert!(p.has_service(ServiceId(1)));
        assert!(p.has_service(ServiceId(4)));
        assert!(!p.has_service(ServiceId(2)));
    }

    #[test]
    fn calendar_rejects_overlap() {
        let mut cal = ServiceCalendar::new();
        cal.add_period(day(1, &[])).unwrap();

        assert!(matches!(
            cal.add_period(day(0, &[])),
            Err(CalendarError::Overlap { .. })
        ));
        assert_eq!(cal.len(), 1);

        // Touching periods are fine
        cal.add_period(day(2, &[])).unwrap();
        assert_eq!(cal.len(), 2);
    }

    #[test]
    fn period_of_or_after() {
        let cal = three_days();

        let p = cal.period_of_or_after(10).unwrap();
        assert_eq!(p.begin_time(), 0);

        let p = cal.period_of_or_after(SECONDS_IN_DAY).unwrap();
        assert_eq!(p.begin_time(), SECONDS_IN_DAY);

        // Gap on day 2 resolves to the following period
        let p = cal.period_of_or_after(2 * SECONDS_IN_DAY + 5).unwrap();
        assert_eq!(p.begin_time(), 3 * SECONDS_IN_DAY);

        // Before the calendar starts
        let p = cal.period_of_or_after(-500).unwrap();
        assert_eq!(p.begin_time(), 0);

        // Past the end
        assert!(cal.period_of_or_after(4 * SECONDS_IN_DAY).is_none());
    }

    #[test]
    fn period_of_or_before() {
        let cal = three_days();

        let p = cal.period_of_or_before(SECONDS_IN_DAY + 10).unwrap();
        assert_eq!(p.begin_time(), SECONDS_IN_DAY);

        // Gap on day 2 resolves to the preceding period
        let p = cal.period_of_or_before(2 * SECONDS_IN_DAY + 5).unwrap();
        assert_eq!(p.begin_time(), SECONDS_IN_DAY);

        let p = cal.period_of_or_before(10 * SECONDS_IN_DAY).unwrap();
        assert_eq!(p.begin_time(), 3 * SECONDS_IN_DAY);

        assert!(cal.period_of_or_before(-1).is_none());
    }

    #[test]
    fn lookups_share_snapshots() {
        let cal = three_days();
        let a = cal.period_of_or_after(10).unwrap();
        let b = cal.period_of_or_before(20).unwrap();
        assert!(Arc::ptr_eq(a, b));
    }

    #[test]
    fn empty_calendar() {
        let cal = ServiceCalendar::new();
        assert!(cal.is_empty());
        assert!(cal.period_of_or_after(0).is_none());
        assert!(cal.period_of_or_before(0).is_none());
    }
}
