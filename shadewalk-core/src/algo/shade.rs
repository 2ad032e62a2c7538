//! Spatial shade estimation for arbitrary coordinates.
//!
//! A walker is rarely standing exactly on a mapped edge, so the shade at a
//! free coordinate is interpolated from every stored edge within a sampling
//! radius, weighted by how close each edge runs. Reverse counterparts share
//! their source geometry and are excluded to avoid counting edges twice.

use geo::Point;
use rayon::prelude::*;

use super::geometry::point_polyline_distance_m;
use crate::model::{StreetNetwork, TimeBucket};

/// Estimates shade at `point` from stored edges within `radius_m` meters.
///
/// Each candidate edge contributes its shade value weighted by
/// `radius_m - distance`, so nearer edges dominate. Returns `None` when no
/// edge carries positive weight, which callers treat as "unknown" rather
/// than "sunny".
pub fn shade_at(
    network: &StreetNetwork,
    point: Point<f64>,
    radius_m: f64,
    bucket: TimeBucket,
) -> Option<f64> {
    let mut weighted = 0.0;
    let mut total_weight = 0.0;

    for edge in network.stored_edges() {
        let distance = point_polyline_distance_m(point, &edge.geometry);
        if distance > radius_m {
            continue;
        }
        let weight = radius_m - distance;
        weighted += edge.shade_for(bucket) * weight;
        total_weight += weight;
    }

    if total_weight > 0.0 {
        Some(weighted / total_weight)
    } else {
        None
    }
}

/// Estimates shade for a batch of points in parallel.
pub fn shade_at_many(
    network: &StreetNetwork,
    points: &[Point<f64>],
    radius_m: f64,
    bucket: TimeBucket,
) -> Vec<Option<f64>> {
    points
        .par_iter()
        .map(|&point| shade_at(network, point, radius_m, bucket))
        .collect()
}
