pub use crate::NEUTRAL_SHADE;

// Re-export key components
pub use crate::algo::{TrailMetrics, shade_at, shade_at_many, trail_metrics};
pub use crate::loading::{GraphDocument, build_street_network};
pub use crate::model::{ShadeTable, StreetEdge, StreetNetwork, StreetNode, TimeBucket};
pub use crate::routing::{
    DEFAULT_SHADE_PENALTY, Route, length, route_to_feature, routes_to_geojson,
    routes_to_geojson_string, shade_penalized, shade_score, shortest_path, total_length,
};

// Core identifier types for the street network
pub use crate::EdgeId;
pub use crate::NodeId;

pub use crate::error::Error;
