//! Core engine for shade-aware pedestrian routing.
//!
//! The engine loads a street graph document (nodes, edges, per-bucket shade
//! values), builds an indexed [`model::StreetNetwork`], and answers routing
//! and shade queries over it: shortest paths under a pluggable edge cost,
//! route length and shade aggregates, nearest-node snapping, and a spatial
//! shade estimate around an arbitrary point.

pub mod algo;
pub mod error;
pub mod loading;
pub mod model;
pub mod prelude;
pub mod routing;

pub use error::Error;
pub use model::{StreetNetwork, TimeBucket};
pub use routing::{Route, shortest_path};

/// Dense index of a node in the street network
pub type NodeId = usize;
/// Dense index of an edge in the street network edge arena
pub type EdgeId = usize;

/// Shade value assumed where no shade information is available
pub const NEUTRAL_SHADE: f64 = 0.5;
