//! Cost propagation for a multimodal trip planner.
//!
//! A search over the planner's graph carries a [`State`] (clock, weight,
//! walking distance, transfers) along edges. Each edge holds an
//! [`EdgePayload`] that knows how to turn the state on one side of the edge
//! into the state on the other: walking a street, waiting for a headway
//! service, boarding a scheduled trip, riding a hop. Schedule edges consult
//! a service [`calendar`] to decide whether they run on the traveler's day.
//!
//! The graph and the search algorithm live elsewhere; this crate only
//! answers "what does traversing this edge from this state cost?".

pub mod calendar;
pub mod config;
pub mod edges;
pub mod state;

pub use config::{ConfigError, WalkOptions};
pub use edges::{EdgeEffect, EdgeError, EdgePayload, EdgeType, WalkResult};
pub use state::{State, StateError};
