//! Great-circle distance helpers shared by the shade sampling code.

use geo::{Closest, Distance, Haversine, HaversineClosestPoint, Line, LineString, Point};

/// Haversine distance in meters from `point` to the nearest location
/// on `segment`, including its interior.
pub fn point_segment_distance_m(point: Point<f64>, segment: Line<f64>) -> f64 {
    match segment.haversine_closest_point(&point) {
        Closest::Intersection(closest) | Closest::SinglePoint(closest) => {
            Haversine.distance(point, closest)
        }
        Closest::Indeterminate => {
            let start = Haversine.distance(point, segment.start_point());
            let end = Haversine.distance(point, segment.end_point());
            start.min(end)
        }
    }
}

/// Haversine distance in meters from `point` to the nearest segment of
/// `polyline`. Infinite when the polyline has fewer than two points.
pub fn point_polyline_distance_m(point: Point<f64>, polyline: &LineString<f64>) -> f64 {
    polyline
        .lines()
        .fold(f64::INFINITY, |closest, segment| {
            closest.min(point_segment_distance_m(point, segment))
        })
}
