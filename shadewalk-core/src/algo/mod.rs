//! Spatial analysis over the loaded street network.

pub mod geometry;
pub mod shade;
pub mod trail;

pub use geometry::{point_polyline_distance_m, point_segment_distance_m};
pub use shade::{shade_at, shade_at_many};
pub use trail::{TrailMetrics, trail_metrics};
