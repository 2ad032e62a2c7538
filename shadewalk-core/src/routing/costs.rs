//! Ready-made edge cost functions for [`shortest_path`](super::shortest_path)

use crate::model::{StreetEdge, TimeBucket};

/// Default weight of the shade penalty in [`shade_penalized`]
pub const DEFAULT_SHADE_PENALTY: f64 = 3.0;

/// Plain walking length in meters.
pub fn length(edge: &StreetEdge) -> f64 {
    edge.length_m
}

/// Length inflated for unshaded edges: `length_m * (1 + penalty * (1 - shade))`.
///
/// A fully shaded edge costs its raw length; a fully exposed edge costs
/// `1 + penalty` times that. Optimizing this prefers shadier streets while
/// still caring about distance.
pub fn shade_penalized(bucket: TimeBucket, penalty: f64) -> impl Fn(&StreetEdge) -> f64 {
    move |edge| edge.length_m * (1.0 + penalty * (1.0 - edge.shade_for(bucket)))
}
