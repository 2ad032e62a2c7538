//! Interactive walk session between two snapped endpoints.
//!
//! A session snaps the requested start and goal to network nodes, computes
//! two reference routes between them (shortest by distance and shadiest
//! under the configured penalty), then accepts one walked position at a
//! time, tracking the trail until the walker gets within the goal radius.

use geo::{Bearing, Distance, Haversine, LineString, Point};
use geojson::{Feature, Geometry, GeometryValue};
use log::debug;
use serde_json::json;

use shadewalk_core::algo::trail_metrics;
use shadewalk_core::model::{StreetEdge, StreetNetwork, TimeBucket};
use shadewalk_core::routing::{
    self, Route, shade_penalized, shade_score, total_length,
};
use shadewalk_core::{Error, NodeId};

use crate::config::SessionConfig;

/// Precomputed network route the walk is compared against.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceRoute {
    pub route: Route,
    pub length_m: f64,
    pub shade: f64,
}

/// Result of feeding one walked position to the session.
#[derive(Debug, Clone, PartialEq)]
pub enum StepOutcome {
    /// Step rejected: the position is farther from the walker than the
    /// configured maximum step. The trail is unchanged.
    TooFar { distance_m: f64 },
    Moved { distance_to_goal_m: f64 },
    GoalReached { summary: TrailSummary },
}

/// Accounting for the walked trail.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrailSummary {
    pub length_m: f64,
    /// Length-weighted mean shade, `None` before any distance is walked.
    pub shade: Option<f64>,
    /// Shortest network length over walked length, `None` until both
    /// lengths are positive.
    pub efficiency: Option<f64>,
}

pub struct WalkSession<'a> {
    network: &'a StreetNetwork,
    config: SessionConfig,
    start_node: NodeId,
    goal_node: NodeId,
    start_position: Point<f64>,
    goal_position: Point<f64>,
    shadiest: ReferenceRoute,
    shortest: ReferenceRoute,
    trail: Vec<Point<f64>>,
    finished: bool,
}

impl<'a> WalkSession<'a> {
    /// Snaps both endpoints, precomputes the reference routes and places
    /// the walker on the snapped start node.
    pub fn new(network: &'a StreetNetwork, config: SessionConfig) -> Result<Self, Error> {
        let start_node = network.nearest_node(config.start)?;
        let goal_node = network.nearest_node(config.end)?;
        debug!("session start snapped to node {start_node}, goal to node {goal_node}");

        let shadiest = reference(
            network,
            start_node,
            goal_node,
            config.bucket,
            shade_penalized(config.bucket, config.shade_penalty),
        )?;
        let shortest = reference(network, start_node, goal_node, config.bucket, routing::length)?;

        let start_position = network
            .node(start_node)
            .ok_or(Error::InvalidNodeIndex)?
            .geometry;
        let goal_position = network
            .node(goal_node)
            .ok_or(Error::InvalidNodeIndex)?
            .geometry;

        Ok(Self {
            network,
            config,
            start_node,
            goal_node,
            start_position,
            goal_position,
            shadiest,
            shortest,
            trail: vec![start_position],
            finished: false,
        })
    }

    /// Feeds one walked position to the session.
    ///
    /// Steps longer than `max_step_m` are rejected without extending the
    /// trail. Once within `goal_radius_m` of the snapped goal the session
    /// finishes and keeps answering [`StepOutcome::GoalReached`].
    pub fn step(&mut self, destination: Point<f64>) -> StepOutcome {
        if self.finished {
            return StepOutcome::GoalReached {
                summary: self.trail_summary(),
            };
        }

        let distance_m = Haversine.distance(self.position(), destination);
        if distance_m > self.config.max_step_m {
            return StepOutcome::TooFar { distance_m };
        }

        self.trail.push(destination);
        let distance_to_goal_m = Haversine.distance(destination, self.goal_position);
        if distance_to_goal_m <= self.config.goal_radius_m {
            self.finished = true;
            return StepOutcome::GoalReached {
                summary: self.trail_summary(),
            };
        }
        StepOutcome::Moved { distance_to_goal_m }
    }

    /// Measures the trail walked so far.
    pub fn trail_summary(&self) -> TrailSummary {
        let metrics = trail_metrics(
            self.network,
            &self.trail,
            self.config.bucket,
            self.config.shade_sample_radius_m,
        );
        let efficiency = if metrics.length_m > 0.0 && self.shortest.length_m > 0.0 {
            Some(self.shortest.length_m / metrics.length_m)
        } else {
            None
        };
        TrailSummary {
            length_m: metrics.length_m,
            shade: metrics.shade,
            efficiency,
        }
    }

    /// Current walker position, the snapped start before any step.
    pub fn position(&self) -> Point<f64> {
        self.trail.last().copied().unwrap_or(self.start_position)
    }

    pub fn distance_to_goal_m(&self) -> f64 {
        Haversine.distance(self.position(), self.goal_position)
    }

    /// Compass bearing from the walker to the goal, degrees clockwise
    /// from north.
    pub fn bearing_to_goal(&self) -> f64 {
        Haversine.bearing(self.position(), self.goal_position)
    }

    /// Discards the walked trail and places the walker back on the
    /// snapped start node. Reference routes are kept.
    pub fn reset(&mut self) {
        self.trail.clear();
        self.trail.push(self.start_position);
        self.finished = false;
    }

    pub fn trail(&self) -> &[Point<f64>] {
        &self.trail
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn start_node(&self) -> NodeId {
        self.start_node
    }

    pub fn goal_node(&self) -> NodeId {
        self.goal_node
    }

    pub fn shadiest_route(&self) -> &ReferenceRoute {
        &self.shadiest
    }

    pub fn shortest_route(&self) -> &ReferenceRoute {
        &self.shortest
    }

    /// Renders the walked trail as a `GeoJSON` `Feature` with its metrics
    /// attached as properties.
    ///
    /// A trail still on its start position has no line to draw and yields
    /// `None`.
    pub fn trail_feature(&self) -> Result<Option<Feature>, Error> {
        if self.trail.len() < 2 {
            return Ok(None);
        }

        let summary = self.trail_summary();
        let linestring = LineString::from(self.trail.clone());
        let value = json!({
            "type": "Feature",
            "geometry": Geometry::new(GeometryValue::from(&linestring)),
            "properties": {
                "length_m": summary.length_m,
                "shade": summary.shade,
            }
        });

        serde_json::from_value(value)
            .map(Some)
            .map_err(|e| Error::GeoJsonError(e.to_string()))
    }

    pub fn trail_feature_json(&self) -> Result<Option<String>, Error> {
        match self.trail_feature()? {
            Some(feature) => serde_json::to_string(&feature)
                .map(Some)
                .map_err(|e| Error::GeoJsonError(e.to_string())),
            None => Ok(None),
        }
    }
}

fn reference<F>(
    network: &StreetNetwork,
    start: NodeId,
    end: NodeId,
    bucket: TimeBucket,
    cost_fn: F,
) -> Result<ReferenceRoute, Error>
where
    F: FnMut(&StreetEdge) -> f64,
{
    let route = routing::shortest_path(network, start, end, cost_fn)?;
    let length_m = total_length(network.path_edges(&route.edges));
    let shade = shade_score(network.path_edges(&route.edges), bucket);
    Ok(ReferenceRoute {
        route,
        length_m,
        shade,
    })
}
