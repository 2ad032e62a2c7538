use std::{cmp::Ordering, collections::BinaryHeap};

use fixedbitset::FixedBitSet;
use hashbrown::HashMap;

use crate::model::{StreetEdge, StreetNetwork};
use crate::{EdgeId, Error, NodeId};

/// Shortest-path result: accumulated cost plus the edge IDs walked in order.
///
/// An empty edge list with infinite cost means the end node is unreachable;
/// an empty list with zero cost is the trivial same-node route.
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    pub total_cost: f64,
    pub edges: Vec<EdgeId>,
}

impl Route {
    pub fn is_found(&self) -> bool {
        self.total_cost.is_finite()
    }

    fn unreachable() -> Self {
        Self {
            total_cost: f64::INFINITY,
            edges: Vec::new(),
        }
    }

    fn trivial() -> Self {
        Self {
            total_cost: 0.0,
            edges: Vec::new(),
        }
    }
}

// f64 ordered by total_cmp so tentative costs can live in the heap
#[derive(Copy, Clone, Debug, Default)]
struct FloatOrd(f64);

impl PartialEq for FloatOrd {
    fn eq(&self, other: &Self) -> bool {
        self.0.eq(&other.0)
    }
}

impl Eq for FloatOrd {}

impl PartialOrd for FloatOrd {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FloatOrd {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

#[derive(Copy, Clone, Eq, PartialEq)]
struct State {
    cost: FloatOrd,
    seq: u64,
    node: NodeId,
}

// Implement Ord for State to use in BinaryHeap
impl Ord for State {
    fn cmp(&self, other: &Self) -> Ordering {
        // Min-heap by cost (reversed from standard Rust BinaryHeap);
        // equal costs pop in discovery order.
        other
            .cost
            .cmp(&self.cost)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for State {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Dijkstra's algorithm over the street network with a caller-supplied
/// edge cost
///
/// The frontier is a binary heap keyed by tentative cost; equal costs pop
/// in discovery order, which keeps the returned edge sequence identical
/// across runs for a pure cost function. The search stops as soon as the
/// end node itself is popped, and an unreachable end is a normal result,
/// not an error.
///
/// # Errors
///
/// Fails with [`Error::InvalidNodeIndex`] for out-of-range endpoints and
/// with [`Error::InvalidCost`] as soon as the cost function returns a
/// negative or non-finite value.
pub fn shortest_path<F>(
    network: &StreetNetwork,
    start: NodeId,
    end: NodeId,
    mut cost_fn: F,
) -> Result<Route, Error>
where
    F: FnMut(&StreetEdge) -> f64,
{
    let node_count = network.node_count();
    if start >= node_count || end >= node_count {
        return Err(Error::InvalidNodeIndex);
    }
    if start == end {
        return Ok(Route::trivial());
    }

    let mut distances: HashMap<NodeId, f64> = HashMap::new();
    let mut predecessors: HashMap<NodeId, (NodeId, EdgeId)> = HashMap::new();
    let mut settled = FixedBitSet::with_capacity(node_count);
    let mut heap = BinaryHeap::new();
    let mut seq = 0_u64;

    distances.insert(start, 0.0);
    heap.push(State {
        cost: FloatOrd(0.0),
        seq,
        node: start,
    });

    while let Some(State { cost, node, .. }) = heap.pop() {
        // Stale frontier entries of already settled nodes are skipped here
        if settled.contains(node) {
            continue;
        }
        settled.insert(node);
        if node == end {
            break;
        }

        let cost = cost.0;
        for &edge_id in network.adjacent_edges(node) {
            let edge = &network.edges[edge_id];
            let next = edge.to;
            if settled.contains(next) {
                continue;
            }

            let step = cost_fn(edge);
            if !step.is_finite() || step < 0.0 {
                return Err(Error::InvalidCost(step));
            }
            let next_cost = cost + step;

            // Add or update distance if better using Entry API
            match distances.entry(next) {
                hashbrown::hash_map::Entry::Vacant(entry) => {
                    entry.insert(next_cost);
                    predecessors.insert(next, (node, edge_id));
                    seq += 1;
                    heap.push(State {
                        cost: FloatOrd(next_cost),
                        seq,
                        node: next,
                    });
                }
                hashbrown::hash_map::Entry::Occupied(mut entry) => {
                    if next_cost < *entry.get() {
                        *entry.get_mut() = next_cost;
                        predecessors.insert(next, (node, edge_id));
                        seq += 1;
                        heap.push(State {
                            cost: FloatOrd(next_cost),
                            seq,
                            node: next,
                        });
                    }
                }
            }
        }
    }

    let Some(&total_cost) = distances.get(&end) else {
        return Ok(Route::unreachable());
    };

    let mut edges = Vec::new();
    let mut current = end;
    while current != start {
        match predecessors.get(&current) {
            Some(&(previous, edge_id)) => {
                edges.push(edge_id);
                current = previous;
            }
            None => return Ok(Route::unreachable()),
        }
    }
    edges.reverse();

    Ok(Route { total_cost, edges })
}
