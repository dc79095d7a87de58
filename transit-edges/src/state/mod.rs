//! Traveler state threaded through a search.
//!
//! A `State` is the record an edge traversal consumes and produces: clock
//! time, accumulated weight, walking distance, transfer count, the edge
//! most recently traversed, and a per-agency cache of resolved service
//! periods. Traversals never mutate their input; they clone it and mutate
//! the clone, so branches of a search never observe each other.

mod service_cache;

use std::sync::Arc;

use crate::calendar::ServicePeriod;
use crate::edges::EdgeType;

pub use service_cache::ServiceCache;

/// Errors from state bookkeeping.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StateError {
    /// An edge referred to an agency the state has no cache slot for
    #[error("agency {agency} out of range: state tracks {n_agencies} agencies")]
    AgencyOutOfRange { agency: usize, n_agencies: usize },
}

/// The mutable record of one branch of a search.
///
/// Duplicating a state is `Clone`: scalar fields and the cache slots are
/// copied, while the cached service periods are shared snapshots.
///
/// # Examples
///
/// ```
/// use transit_edges::State;
///
/// let state = State::new(2, 1_000);
/// let mut branch = state.clone();
/// branch.set_num_transfers(3);
///
/// assert_eq!(state.num_transfers(), 0);
/// assert_eq!(branch.num_transfers(), 3);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct State {
    time: i64,
    weight: i64,
    dist_walked: f64,
    num_transfers: u32,
    prev_edge_type: Option<EdgeType>,
    prev_edge_name: Option<Arc<str>>,
    service_periods: ServiceCache,
}

impl State {
    /// Create a fresh state at `time` with one empty cache slot per agency.
    pub fn new(n_agencies: usize, time: i64) -> Self {
        Self {
            time,
            weight: 0,
            dist_walked: 0.0,
            num_transfers: 0,
            prev_edge_type: None,
            prev_edge_name: None,
            service_periods: ServiceCache::new(n_agencies),
        }
    }

    /// Returns the clock time (seconds since the epoch).
    pub fn time(&self) -> i64 {
        self.time
    }

    pub fn set_time(&mut self, time: i64) {
        self.time = time;
    }

    /// Returns the accumulated generalized cost.
    pub fn weight(&self) -> i64 {
        self.weight
    }

    pub fn set_weight(&mut self, weight: i64) {
        self.weight = weight;
    }

    /// Returns the distance walked so far, in metres.
    pub fn dist_walked(&self) -> f64 {
        self.dist_walked
    }

    pub fn set_dist_walked(&mut self, dist: f64) {
        self.dist_walked = dist;
    }

    /// Returns the number of vehicles boarded so far.
    pub fn num_transfers(&self) -> u32 {
        self.num_transfers
    }

    pub fn set_num_transfers(&mut self, n: u32) {
        self.num_transfers = n;
    }

    /// Returns the type of the edge most recently traversed, if any.
    pub fn prev_edge_type(&self) -> Option<EdgeType> {
        self.prev_edge_type
    }

    pub fn set_prev_edge_type(&mut self, edge_type: Option<EdgeType>) {
        self.prev_edge_type = edge_type;
    }

    /// Returns the name (street name, trip id) of the edge most recently traversed.
    pub fn prev_edge_name(&self) -> Option<&str> {
        self.prev_edge_name.as_deref()
    }

    pub fn set_prev_edge_name(&mut self, name: Option<Arc<str>>) {
        self.prev_edge_name = name;
    }

    /// Returns the number of agencies this state caches service periods for.
    pub fn n_agencies(&self) -> usize {
        self.service_periods.len()
    }

    /// Returns the cached service period for `agency`, which may be stale.
    pub fn service_period(&self, agency: usize) -> Result<Option<&Arc<ServicePeriod>>, StateError> {
        self.service_periods.get(agency)
    }

    pub fn set_service_period(
        &mut self,
        agency: usize,
        period: Option<Arc<ServicePeriod>>,
    ) -> Result<(), StateError> {
        self.service_periods.set(agency, period)
    }

    /// Returns the whole service period cache.
    pub fn service_cache(&self) -> &ServiceCache {
        &self.service_periods
    }

    /// Move forward by `seconds`, charging `cost`.
    pub(crate) fn advance(&mut self, seconds: i64, cost: i64) {
        self.time += seconds;
        self.weight += cost;
    }

    /// Move backward by `seconds`, refunding `cost`.
    pub(crate) fn regress(&mut self, seconds: i64, cost: i64) {
        self.time -= seconds;
        self.weight -= cost;
    }

    /// Record the edge just traversed.
    pub(crate) fn stamp(&mut self, edge_type: EdgeType, name: Option<Arc<str>>) {
        self.prev_edge_type = Some(edge_type);
        self.prev_edge_name = name;
    }
}
