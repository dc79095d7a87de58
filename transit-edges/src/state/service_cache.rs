//! Per-agency memo of resolved service periods.

use std::sync::Arc;

use crate::calendar::ServicePeriod;

use super::StateError;

/// One cached service period slot per agency.
///
/// The slot count is fixed at construction; there is no way to grow or
/// shrink it afterwards. Slots hold shared snapshots owned by the calendar,
/// so cloning the cache copies the slots but not the periods. A slot is
/// replaced wholesale when it goes stale, never mutated in place.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceCache {
    slots: Box<[Option<Arc<ServicePeriod>>]>,
}

impl ServiceCache {
    /// Create an empty cache with one slot per agency.
    pub fn new(n_agencies: usize) -> Self {
        Self {
            slots: vec![None; n_agencies].into_boxed_slice(),
        }
    }

    /// Returns the number of agency slots.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns true if there are no agency slots.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Returns whatever is cached for `agency`, stale or not.
    pub fn get(&self, agency: usize) -> Result<Option<&Arc<ServicePeriod>>, StateError> {
        self.slots
            .get(agency)
            .map(Option::as_ref)
            .ok_or(StateError::AgencyOutOfRange {
                agency,
                n_agencies: self.slots.len(),
            })
    }

    /// Returns the cached period for `agency` only if it still covers `time`.
    pub fn fresh(
        &self,
        agency: usize,
        time: i64,
    ) -> Result<Option<&Arc<ServicePeriod>>, StateError> {
        Ok(self.get(agency)?.filter(|p| p.covers(time)))
    }

    /// Replace the slot for `agency`.
    pub fn set(
        &mut self,
        agency: usize,
        period: Option<Arc<ServicePeriod>>,
    ) -> Result<(), StateError> {
        let n_agencies = self.slots.len();
        let slot = self
            .slots
            .get_mut(agency)
            .ok_or(StateError::AgencyOutOfRange { agency, n_agencies })?;
        *slot = period;
        Ok(())
    }
}
