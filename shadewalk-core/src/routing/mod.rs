//! Shortest-path search over the street network.
//!
//! [`shortest_path`] runs Dijkstra with a caller-supplied edge cost, so the
//! same search serves plain distance routing and shade-weighted routing.
//! [`costs`] provides the standard cost functions and [`metrics`] summarizes
//! a finished route.

pub mod costs;
mod dijkstra;
pub mod metrics;
mod to_geojson;

pub use costs::{DEFAULT_SHADE_PENALTY, length, shade_penalized};
pub use dijkstra::{Route, shortest_path};
pub use metrics::{shade_score, total_length};
pub use to_geojson::{route_to_feature, routes_to_geojson, routes_to_geojson_string};
