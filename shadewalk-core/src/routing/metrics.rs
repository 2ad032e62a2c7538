//! Aggregate metrics over a walked sequence of edges
//!
//! Pure reductions, usable both for machine-computed routes and for edge
//! walks assembled by hand.

use crate::model::{StreetEdge, TimeBucket};

/// Sum of edge lengths in meters. Zero for an empty path.
pub fn total_length<'a, I>(edges: I) -> f64
where
    I: IntoIterator<Item = &'a StreetEdge>,
{
    edges.into_iter().map(|edge| edge.length_m).sum()
}

/// Length-weighted mean shade of a path for the given bucket.
///
/// Zero for an empty or zero-length path.
pub fn shade_score<'a, I>(edges: I, bucket: TimeBucket) -> f64
where
    I: IntoIterator<Item = &'a StreetEdge>,
{
    let mut weighted = 0.0;
    let mut total = 0.0;
    for edge in edges {
        weighted += edge.shade_for(bucket) * edge.length_m;
        total += edge.length_m;
    }
    if total > 0.0 { weighted / total } else { 0.0 }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ShadeTable;
    use geo::LineString;

    fn edge(length_m: f64, shade: f64) -> StreetEdge {
        let mut table = ShadeTable::neutral();
        table.set(TimeBucket::Afternoon, shade);
        StreetEdge {
            id: String::new(),
            from: 0,
            to: 1,
            length_m,
            shade: table,
            geometry: LineString::new(vec![]),
        }
    }

    #[test]
    fn empty_path_has_zero_metrics() {
        assert_eq!(total_length([]), 0.0);
        assert_eq!(shade_score([], TimeBucket::Afternoon), 0.0);
    }

    #[test]
    fn shade_is_weighted_by_length() {
        let edges = [edge(300.0, 1.0), edge(100.0, 0.0)];
        assert_eq!(total_length(edges.iter()), 400.0);
        assert_eq!(shade_score(edges.iter(), TimeBucket::Afternoon), 0.75);
    }

    #[test]
    fn uniform_shade_is_preserved() {
        let edges = [edge(10.0, 0.8), edge(250.0, 0.8)];
        let score = shade_score(edges.iter(), TimeBucket::Afternoon);
        assert!((score - 0.8).abs() < 1e-12);
    }
}
