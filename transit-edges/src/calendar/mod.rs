//! Service calendar types.
//!
//! Schedule edges only need three answers from the calendar: which service
//! period covers a given instant, whether that period runs a given service,
//! and where local midnight falls. This module provides the smallest
//! immutable implementation of those answers. Periods are handed out as
//! shared `Arc` snapshots so traveler states can cache them cheaply.

mod error;
mod period;
mod timezone;

pub use error::CalendarError;
pub use period::{ServiceCalendar, ServiceId, ServicePeriod};
pub use timezone::Timezone;

pub const SECONDS_IN_MINUTE: i64 = 60;
pub const SECONDS_IN_HOUR: i64 = 60 * SECONDS_IN_MINUTE;
pub const SECONDS_IN_DAY: i64 = 24 * SECONDS_IN_HOUR;
pub const DAYS_IN_WEEK: i64 = 7;
pub const SECONDS_IN_WEEK: i64 = DAYS_IN_WEEK * SECONDS_IN_DAY;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constants() {
        assert_eq!(SECONDS_IN_HOUR, 3600);
        assert_eq!(SECONDS_IN_DAY, 86_400);
        assert_eq!(SECONDS_IN_WEEK, 604_800);
    }
}
