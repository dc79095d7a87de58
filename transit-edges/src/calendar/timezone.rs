//! Timezone lookups for local-midnight arithmetic.

use std::fmt;

use chrono::{DateTime, FixedOffset, Offset, TimeZone};

use super::SECONDS_IN_DAY;

/// A timezone able to report its UTC offset at a given instant.
///
/// Implemented for `chrono::FixedOffset` and `chrono_tz::Tz`, so schedules
/// can be anchored either to a constant offset or to a named zone with
/// daylight-saving transitions.
pub trait Timezone: fmt::Debug + Send + Sync {
    /// Seconds to add to UTC to get local time at `time` (seconds since the epoch).
    fn utc_offset(&self, time: i64) -> i32;

    /// Seconds elapsed since local midnight at `time`.
    fn seconds_since_midnight(&self, time: i64) -> i64 {
        (time + i64::from(self.utc_offset(time))).rem_euclid(SECONDS_IN_DAY)
    }

    /// Absolute time of the local midnight starting the day containing `time`.
    fn local_midnight(&self, time: i64) -> i64 {
        time - self.seconds_since_midnight(time)
    }
}

impl Timezone for FixedOffset {
    fn utc_offset(&self, _time: i64) -> i32 {
        self.local_minus_utc()
    }
}

impl Timezone for chrono_tz::Tz {
    fn utc_offset(&self, time: i64) -> i32 {
        match DateTime::from_timestamp(time, 0) {
            Some(dt) => self
                .offset_from_utc_datetime(&dt.naive_utc())
                .fix()
                .local_minus_utc(),
            // Out of chrono's range; treat as UTC
            None => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::SECONDS_IN_HOUR;

    fn utc() -> FixedOffset {
        FixedOffset::east_opt(0).unwrap()
    }

    #[test]
    fn utc_seconds_since_midnight() {
        let tz = utc();
        assert_eq!(tz.seconds_since_midnight(0), 0);
        assert_eq!(tz.seconds_since_midnight(3_600), 3_600);
        assert_eq!(tz.seconds_since_midnight(SECONDS_IN_DAY + 5), 5);
        // Before the epoch still lands inside the day
        assert_eq!(tz.seconds_since_midnight(-1), SECONDS_IN_DAY - 1);
    }

    #[test]
    fn fixed_offset_shifts_midnight() {
        let tz = FixedOffset::west_opt(5 * 3600).unwrap();
        assert_eq!(tz.utc_offset(0), -5 * 3600);
        // 00:00 UTC is 19:00 the previous day at UTC-5
        assert_eq!(tz.seconds_since_midnight(0), 19 * SECONDS_IN_HOUR);
        assert_eq!(tz.local_midnight(0), -19 * SECONDS_IN_HOUR);
    }

    #[test]
    fn named_zone_follows_daylight_saving() {
        let tz = chrono_tz::Europe::London;
        // 2024-01-15T12:00:00Z, GMT
        assert_eq!(tz.utc_offset(1_705_320_000), 0);
        // 2024-07-15T12:00:00Z, BST
        assert_eq!(tz.utc_offset(1_721_044_800), 3600);
        assert_eq!(
            tz.seconds_since_midnight(1_721_044_800),
            13 * SECONDS_IN_HOUR
        );
    }

    #[test]
    fn usable_as_trait_object() {
        let tz: std::sync::Arc<dyn Timezone> = std::sync::Arc::new(utc());
        assert_eq!(tz.local_midnight(SECONDS_IN_DAY + 10), SECONDS_IN_DAY);
    }
}
