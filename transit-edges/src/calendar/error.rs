//! Calendar construction errors.

/// Errors raised while building a service calendar.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CalendarError {
    /// A period must end strictly after it begins
    #[error("service period is empty: begins at {begin}, ends at {end}")]
    EmptyPeriod { begin: i64, end: i64 },

    /// Periods must be added in order and must not overlap
    #[error("service period beginning at {begin} overlaps previous period ending at {previous_end}")]
    Overlap { previous_end: i64, begin: i64 },
}
