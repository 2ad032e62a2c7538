//! Engine facade owning the loaded street network.

use geo::Point;

use shadewalk_core::algo::shade_at;
use shadewalk_core::loading::{GraphDocument, build_street_network};
use shadewalk_core::model::{StreetEdge, StreetNetwork, TimeBucket};
use shadewalk_core::routing::{Route, shade_score, shortest_path, total_length};
use shadewalk_core::{Error, NodeId};

use crate::config::SessionConfig;
use crate::session::WalkSession;

/// Holds the street network and answers queries against it.
///
/// Every query fails with [`Error::NotLoaded`] until a graph document has
/// been loaded. Loading is all-or-nothing: a failed reload keeps the
/// previously installed network.
#[derive(Debug, Default)]
pub struct RouteEngine {
    network: Option<StreetNetwork>,
}

impl RouteEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a network from a parsed graph document and installs it,
    /// replacing any previously loaded one.
    pub fn load_graph(&mut self, document: GraphDocument) -> Result<(), Error> {
        self.network = Some(build_street_network(document)?);
        Ok(())
    }

    pub fn load_graph_str(&mut self, json: &str) -> Result<(), Error> {
        self.load_graph(GraphDocument::from_json_str(json)?)
    }

    pub fn network(&self) -> Result<&StreetNetwork, Error> {
        self.network.as_ref().ok_or(Error::NotLoaded)
    }

    pub fn is_loaded(&self) -> bool {
        self.network.is_some()
    }

    pub fn shortest_path<F>(&self, start: NodeId, end: NodeId, cost_fn: F) -> Result<Route, Error>
    where
        F: FnMut(&StreetEdge) -> f64,
    {
        shortest_path(self.network()?, start, end, cost_fn)
    }

    pub fn nearest_node(&self, point: Point<f64>) -> Result<NodeId, Error> {
        self.network()?.nearest_node(point)
    }

    pub fn route_length_m(&self, route: &Route) -> Result<f64, Error> {
        Ok(total_length(self.network()?.path_edges(&route.edges)))
    }

    pub fn route_shade(&self, route: &Route, bucket: TimeBucket) -> Result<f64, Error> {
        Ok(shade_score(self.network()?.path_edges(&route.edges), bucket))
    }

    pub fn shade_at(
        &self,
        point: Point<f64>,
        radius_m: f64,
        bucket: TimeBucket,
    ) -> Result<Option<f64>, Error> {
        Ok(shade_at(self.network()?, point, radius_m, bucket))
    }

    /// Starts an interactive walk session against the loaded network.
    pub fn start_session(&self, config: SessionConfig) -> Result<WalkSession<'_>, Error> {
        WalkSession::new(self.network()?, config)
    }
}
