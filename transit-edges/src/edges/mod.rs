//! Edge payloads and their traversal rules.
//!
//! Every edge in the planner's graph carries an [`EdgePayload`]. The search
//! loop never looks inside a payload: it calls [`EdgePayload::walk`] (or
//! [`EdgePayload::walk_back`] for reverse searches) with the current
//! [`State`] and gets back the successor state, or `None` if the edge cannot
//! be used from there. After a path is found, [`EdgePayload::collapse`]
//! resolves schedule edges to the concrete hop that was ridden.
//!
//! New edge kinds can be added without touching the dispatcher through
//! [`CustomPayload`].

mod alight;
mod crossing;
mod custom;
mod error;
mod headway;
mod link;
mod service;
mod street;
mod transfer;
mod trip_board;
mod trip_hop;
mod wait;

#[cfg(test)]
mod fixtures;

use std::fmt;
use std::sync::Arc;

use crate::config::WalkOptions;
use crate::state::State;

pub use alight::Alight;
pub use crossing::Crossing;
pub use custom::{
    CustomPayload, PayloadMethods, PayloadTypeRegistry, Soul, define_custom_payload_type,
    undefine_custom_payload_type,
};
pub use error::EdgeError;
pub use headway::Headway;
pub use link::Link;
pub use service::{ScheduleService, SearchDirection, ServiceDay};
pub use street::Street;
pub use trip_board::TripBoard;
pub use trip_hop::{TripHop, TripHopSchedule};
pub use wait::Wait;

/// Outcome of traversing an edge.
///
/// `Ok(Some(state))` is the successor, `Ok(None)` means the edge cannot be
/// used from the given state (a normal result the search loop skips), and
/// `Err` means an invariant was broken.
pub type WalkResult = Result<Option<State>, EdgeError>;

/// The kind of an edge, as recorded in `State::prev_edge_type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EdgeType {
    Street,
    TripHopSchedule,
    TripHop,
    Link,
    Custom,
    Wait,
    Headway,
    TripBoard,
    Crossing,
    Alight,
}

impl EdgeType {
    /// Is this an edge travelled aboard a vehicle?
    ///
    /// Consecutive in-vehicle edges on the same trip are one ride; any other
    /// edge in between ends it.
    pub fn is_in_vehicle(self) -> bool {
        matches!(
            self,
            EdgeType::TripHopSchedule | EdgeType::TripHop | EdgeType::Headway | EdgeType::TripBoard
        )
    }
}

impl fmt::Display for EdgeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EdgeType::Street => "street",
            EdgeType::TripHopSchedule => "trip hop schedule",
            EdgeType::TripHop => "trip hop",
            EdgeType::Link => "link",
            EdgeType::Custom => "custom",
            EdgeType::Wait => "wait",
            EdgeType::Headway => "headway",
            EdgeType::TripBoard => "trip board",
            EdgeType::Crossing => "crossing",
            EdgeType::Alight => "alight",
        };
        f.write_str(name)
    }
}

/// State transition rules of one edge kind.
pub trait EdgeEffect {
    /// Traverse the edge forward (earliest-arrival search).
    fn walk(&self, state: &State, options: &WalkOptions) -> WalkResult;

    /// Traverse the edge backward (latest-departure search).
    ///
    /// Edges that only make sense forward keep this default and are never
    /// reachable in a reverse search.
    fn walk_back(&self, _state: &State, _options: &WalkOptions) -> WalkResult {
        Ok(None)
    }
}

/// The payload attached to a graph edge.
///
/// Each variant shares its immutable payload through `Arc`, so cloning a
/// payload and sharing it between concurrent searches is cheap.
#[derive(Debug, Clone)]
pub enum EdgePayload {
    Street(Arc<Street>),
    Wait(Arc<Wait>),
    Headway(Arc<Headway>),
    TripBoard(Arc<TripBoard>),
    TripHopSchedule(Arc<TripHopSchedule>),
    TripHop(Arc<TripHop>),
    Crossing(Arc<Crossing>),
    Alight(Arc<Alight>),
    Link(Arc<Link>),
    Custom(Arc<CustomPayload>),
}

impl EdgePayload {
    /// Returns the kind of this edge.
    pub fn edge_type(&self) -> EdgeType {
        match self {
            EdgePayload::Street(_) => EdgeType::Street,
            EdgePayload::Wait(_) => EdgeType::Wait,
            EdgePayload::Headway(_) => EdgeType::Headway,
            EdgePayload::TripBoard(_) => EdgeType::TripBoard,
            EdgePayload::TripHopSchedule(_) => EdgeType::TripHopSchedule,
            EdgePayload::TripHop(_) => EdgeType::TripHop,
            EdgePayload::Crossing(_) => EdgeType::Crossing,
            EdgePayload::Alight(_) => EdgeType::Alight,
            EdgePayload::Link(_) => EdgeType::Link,
            EdgePayload::Custom(_) => EdgeType::Custom,
        }
    }

    fn effect(&self) -> &dyn EdgeEffect {
        match self {
            EdgePayload::Street(edge) => &**edge,
            EdgePayload::Wait(edge) => &**edge,
            EdgePayload::Headway(edge) => &**edge,
            EdgePayload::TripBoard(edge) => &**edge,
            EdgePayload::TripHopSchedule(edge) => &**edge,
            EdgePayload::TripHop(edge) => &**edge,
            EdgePayload::Crossing(edge) => &**edge,
            EdgePayload::Alight(edge) => &**edge,
            EdgePayload::Link(edge) => &**edge,
            // Indirects through the kind's registered method table
            EdgePayload::Custom(edge) => &**edge,
        }
    }

    /// Traverse this edge forward from `state`.
    pub fn walk(&self, state: &State, options: &WalkOptions) -> WalkResult {
        self.effect().walk(state, options)
    }

    /// Traverse this edge backward from `state`.
    pub fn walk_back(&self, state: &State, options: &WalkOptions) -> WalkResult {
        self.effect().walk_back(state, options)
    }

    /// Resolve this edge to what a forward walk from `state` actually rides.
    ///
    /// Returns the payload itself for every kind except trip hop schedules,
    /// which resolve to the concrete [`TripHop`] (or `None` when no hop is
    /// catchable), and custom payloads, which defer to their method table.
    pub fn collapse(&self, state: &State) -> Result<Option<EdgePayload>, EdgeError> {
        match self {
            EdgePayload::TripHopSchedule(schedule) => {
                Ok(schedule.collapse(state)?.map(EdgePayload::TripHop))
            }
            EdgePayload::Custom(custom) => {
                Ok(Some(custom.collapse(state)?.unwrap_or_else(|| self.clone())))
            }
            _ => Ok(Some(self.clone())),
        }
    }

    /// Backward counterpart of [`collapse`](Self::collapse).
    pub fn collapse_back(&self, state: &State) -> Result<Option<EdgePayload>, EdgeError> {
        match self {
            EdgePayload::TripHopSchedule(schedule) => {
                Ok(schedule.collapse_back(state)?.map(EdgePayload::TripHop))
            }
            EdgePayload::Custom(custom) => Ok(Some(
                custom.collapse_back(state)?.unwrap_or_else(|| self.clone()),
            )),
            _ => Ok(Some(self.clone())),
        }
    }
}

macro_rules! payload_from {
    ($($variant:ident => $ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for EdgePayload {
                fn from(edge: $ty) -> Self {
                    EdgePayload::$variant(Arc::new(edge))
                }
            }

            impl From<Arc<$ty>> for EdgePayload {
                fn from(edge: Arc<$ty>) -> Self {
                    EdgePayload::$variant(edge)
                }
            }
        )*
    };
}

payload_from! {
    Street => Street,
    Wait => Wait,
    Headway => Headway,
    TripBoard => TripBoard,
    TripHopSchedule => TripHopSchedule,
    TripHop => TripHop,
    Crossing => Crossing,
    Alight => Alight,
    Link => Link,
    Custom => CustomPayload,
}
