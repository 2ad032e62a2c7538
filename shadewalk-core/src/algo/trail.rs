//! Metrics for free-form walked trails.
//!
//! A trail is an ordered list of coordinates that need not follow network
//! edges. Each segment is measured with haversine distance and its shade is
//! sampled at the segment midpoint, falling back to [`NEUTRAL_SHADE`] where
//! the network has no estimate.

use geo::{Distance, Haversine, InterpolatePoint, Point};
use itertools::Itertools;

use super::shade::shade_at;
use crate::NEUTRAL_SHADE;
use crate::model::{StreetNetwork, TimeBucket};

/// Length and shade summary of a walked trail.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TrailMetrics {
    /// Total walked distance in meters.
    pub length_m: f64,
    /// Length-weighted mean shade, `None` when nothing was walked.
    pub shade: Option<f64>,
}

/// Measures a walked trail against the network's shade data.
///
/// Trails with fewer than two points have walked nowhere and score
/// `TrailMetrics::default()`. Zero-length segments are skipped.
pub fn trail_metrics(
    network: &StreetNetwork,
    trail: &[Point<f64>],
    bucket: TimeBucket,
    sample_radius_m: f64,
) -> TrailMetrics {
    if trail.len() < 2 {
        return TrailMetrics::default();
    }

    let mut total_length = 0.0;
    let mut weighted = 0.0;
    for (start, end) in trail.iter().tuple_windows() {
        let length = Haversine.distance(*start, *end);
        if length <= 0.0 {
            continue;
        }
        let midpoint = Haversine.point_at_ratio_between(*start, *end, 0.5);
        let shade =
            shade_at(network, midpoint, sample_radius_m, bucket).unwrap_or(NEUTRAL_SHADE);
        weighted += shade * length;
        total_length += length;
    }

    let shade = if total_length > 0.0 {
        Some(weighted / total_length)
    } else {
        None
    };
    TrailMetrics {
        length_m: total_length,
        shade,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loading::{GraphDocument, build_street_network};

    fn network() -> StreetNetwork {
        let document = GraphDocument::from_json_str(
            r#"{
                "nodes": [
                    {"id": "a", "coord": [0.0, 0.0]},
                    {"id": "b", "coord": [0.001, 0.0]}
                ],
                "edges": [
                    {"id": "ab", "from": "a", "to": "b", "length_m": 111.0,
                     "shade": {"afternoon": 0.73},
                     "geometry": [[0.0, 0.0], [0.001, 0.0]]}
                ]
            }"#,
        )
        .unwrap();
        build_street_network(document).unwrap()
    }

    #[test]
    fn short_trails_have_no_metrics() {
        let network = network();
        for trail in [vec![], vec![Point::new(0.0, 0.0)]] {
            let metrics = trail_metrics(&network, &trail, TimeBucket::Afternoon, 60.0);
            assert_eq!(metrics, TrailMetrics::default());
        }
    }

    #[test]
    fn coincident_points_walk_nowhere() {
        let network = network();
        let point = Point::new(0.0005, 0.0);
        let metrics = trail_metrics(&network, &[point, point], TimeBucket::Afternoon, 60.0);
        assert_eq!(metrics.length_m, 0.0);
        assert_eq!(metrics.shade, None);
    }

    #[test]
    fn walking_along_an_edge_takes_its_shade() {
        let network = network();
        let trail = [
            Point::new(0.0, 0.0),
            Point::new(0.0005, 0.0),
            Point::new(0.001, 0.0),
        ];
        let metrics = trail_metrics(&network, &trail, TimeBucket::Afternoon, 60.0);
        assert!((metrics.length_m - 111.19).abs() < 1.5, "got {}", metrics.length_m);
        let shade = metrics.shade.unwrap();
        assert!((shade - 0.73).abs() < 1e-9, "got {shade}");
    }

    #[test]
    fn off_network_walks_score_neutral() {
        let network = network();
        let trail = [
            Point::new(1.0, 1.0),
            Point::new(1.001, 1.0),
            Point::new(1.002, 1.0),
        ];
        let metrics = trail_metrics(&network, &trail, TimeBucket::Afternoon, 60.0);
        assert!(metrics.length_m > 0.0);
        assert_eq!(metrics.shade, Some(NEUTRAL_SHADE));
    }

    #[test]
    fn shade_is_weighted_by_segment_length() {
        let network = network();
        // One short segment on the edge, one long segment far off network.
        let trail = [
            Point::new(0.0, 0.0),
            Point::new(0.001, 0.0),
            Point::new(0.001, 0.01),
        ];
        let metrics = trail_metrics(&network, &trail, TimeBucket::Afternoon, 60.0);
        let shade = metrics.shade.unwrap();
        // Dominated by the long neutral segment, pulled up by the shaded one.
        assert!(shade > 0.5 && shade < 0.55, "got {shade}");
    }
}
