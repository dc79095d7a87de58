//! Shared builders for edge tests.

use std::sync::Arc;

use chrono::FixedOffset;
use tracing_subscriber::EnvFilter;

use crate::calendar::{SECONDS_IN_DAY, ServiceCalendar, ServiceId, ServicePeriod, Timezone};

use super::ScheduleService;

/// 2024-01-01T00:00:00Z, a Monday.
pub(crate) const MONDAY: i64 = 1_704_067_200;

/// Absolute time `offset` seconds after midnight UTC, `day` days after `MONDAY`.
pub(crate) fn at(day: i64, offset: i64) -> i64 {
    MONDAY + day * SECONDS_IN_DAY + offset
}

/// Route traces to the test harness, filtered by `RUST_LOG`.
pub(crate) fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub(crate) fn utc() -> Arc<dyn Timezone> {
    Arc::new(FixedOffset::east_opt(0).unwrap())
}

/// Seven consecutive one-day periods starting `MONDAY`, all running `ids`.
pub(crate) fn weekly_calendar(ids: &[u32]) -> Arc<ServiceCalendar> {
    calendar_days(&(0..7).map(|d| (d, ids)).collect::<Vec<_>>())
}

/// One-day periods on the given days (relative to `MONDAY`) with their services.
pub(crate) fn calendar_days(days: &[(i64, &[u32])]) -> Arc<ServiceCalendar> {
    let mut calendar = ServiceCalendar::new();
    for (day, ids) in days {
        calendar
            .add_period(
                ServicePeriod::new(
                    at(*day, 0),
                    at(*day + 1, 0),
                    ids.iter().copied().map(ServiceId).collect(),
                )
                .unwrap(),
            )
            .unwrap();
    }
    Arc::new(calendar)
}

pub(crate) fn service(
    agency: usize,
    service_id: u32,
    calendar: Arc<ServiceCalendar>,
) -> ScheduleService {
    ScheduleService::new(ServiceId(service_id), calendar, utc(), agency)
}
