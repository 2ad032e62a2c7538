//! Data model for the walkable street network
//!
//! Contains the node, edge and shade types plus the indexed network that
//! queries run against.

pub mod components;
pub mod network;

pub use components::{ShadeTable, StreetEdge, StreetNode, TimeBucket};
pub use network::StreetNetwork;
