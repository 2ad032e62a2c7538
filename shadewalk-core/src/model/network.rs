//! Indexed street network and lookups over it

use geo::{Distance, Euclidean, Point};
use hashbrown::HashMap;

use super::components::{StreetEdge, StreetNode};
use crate::{EdgeId, Error, NodeId};

/// Indexed street network, built once by the loader and read-only afterwards.
///
/// Edges live in a single arena: every stored edge in document order first,
/// followed by the synthesized reverse counterparts in the same order. Each
/// node's adjacency list therefore lists stored edges before reverse edges,
/// in a stable order.
#[derive(Debug, Clone)]
pub struct StreetNetwork {
    pub(crate) nodes: Vec<StreetNode>,
    pub(crate) node_ids: HashMap<String, NodeId>,
    pub(crate) edges: Vec<StreetEdge>,
    /// Number of stored (document) edges at the front of the arena
    pub(crate) stored: usize,
    pub(crate) adjacency: Vec<Vec<EdgeId>>,
}

impl StreetNetwork {
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of directed edges in the arena, reverse counterparts included.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn stored_edge_count(&self) -> usize {
        self.stored
    }

    pub fn node(&self, node: NodeId) -> Option<&StreetNode> {
        self.nodes.get(node)
    }

    pub fn edge(&self, edge: EdgeId) -> Option<&StreetEdge> {
        self.edges.get(edge)
    }

    /// Resolves a document node ID to its dense index.
    pub fn node_index(&self, id: &str) -> Option<NodeId> {
        self.node_ids.get(id).copied()
    }

    pub fn nodes(&self) -> &[StreetNode] {
        &self.nodes
    }

    /// Stored edges only, without the synthesized reverse counterparts.
    pub fn stored_edges(&self) -> &[StreetEdge] {
        &self.edges[..self.stored]
    }

    /// Whether an edge is a synthesized reverse counterpart.
    pub fn is_reversed(&self, edge: EdgeId) -> bool {
        edge >= self.stored
    }

    /// Outgoing edges of a node, stored edges before reverse counterparts.
    ///
    /// An out-of-range node yields an empty slice rather than an error so
    /// that callers can iterate defensively.
    pub fn adjacent_edges(&self, node: NodeId) -> &[EdgeId] {
        match self.adjacency.get(node) {
            Some(edges) => edges,
            None => &[],
        }
    }

    /// First outgoing edge connecting `from` to `to`, if any.
    pub fn edge_between(&self, from: NodeId, to: NodeId) -> Option<&StreetEdge> {
        self.adjacent_edges(from)
            .iter()
            .map(|&edge| &self.edges[edge])
            .find(|edge| edge.to == to)
    }

    /// Resolves a sequence of edge IDs to edges, quietly skipping any that
    /// are out of range.
    pub fn path_edges<'a>(
        &'a self,
        edges: &'a [EdgeId],
    ) -> impl Iterator<Item = &'a StreetEdge> {
        edges.iter().filter_map(|&edge| self.edges.get(edge))
    }

    /// Snaps a coordinate to the closest node by linear scan.
    ///
    /// Distance is Euclidean in coordinate-degree space, which is adequate
    /// only at the few-hundred-meter extents this engine targets; it skews
    /// at city scale and high latitudes. Ties resolve to the lowest node
    /// index.
    pub fn nearest_node(&self, point: Point<f64>) -> Result<NodeId, Error> {
        if self.nodes.is_empty() {
            return Err(Error::EmptyGraph);
        }

        let mut best = 0;
        let mut best_distance = f64::INFINITY;
        for (index, node) in self.nodes.iter().enumerate() {
            let distance = Euclidean.distance(point, node.geometry);
            if distance < best_distance {
                best = index;
                best_distance = distance;
            }
        }

        Ok(best)
    }
}
