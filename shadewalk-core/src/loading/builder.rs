use geo::{Coord, Distance, Haversine, LineString, Point};
use hashbrown::HashMap;
use log::{debug, info, warn};
use petgraph::algo::connected_components;
use petgraph::graph::{NodeIndex, UnGraph};

use super::document::{EdgeRecord, GraphDocument};
use crate::model::{ShadeTable, StreetEdge, StreetNode, TimeBucket};
use crate::{EdgeId, Error, NodeId, StreetNetwork};

/// Tolerated drift between an edge geometry endpoint and its node coordinate
const ENDPOINT_TOLERANCE_M: f64 = 5.0;

/// Builds an indexed street network from a parsed graph document
///
/// # Errors
///
/// Returns an error if the document has no nodes, or if an edge references
/// an unknown node, connects a node to itself, has a non-positive length,
/// or carries a shade value outside `[0, 1]`.
pub fn build_street_network(document: GraphDocument) -> Result<StreetNetwork, Error> {
    if document.nodes.is_empty() {
        return Err(Error::EmptyGraph);
    }

    info!(
        "Building street network: {} nodes, {} edges in document",
        document.nodes.len(),
        document.edges.len()
    );

    let mut nodes: Vec<StreetNode> = Vec::with_capacity(document.nodes.len());
    let mut node_ids: HashMap<String, NodeId> = HashMap::with_capacity(document.nodes.len());
    for record in document.nodes {
        let index = nodes.len();
        if node_ids.insert(record.id.clone(), index).is_some() {
            return Err(Error::MalformedGraph(format!(
                "duplicate node id {:?}",
                record.id
            )));
        }
        nodes.push(StreetNode {
            id: record.id,
            geometry: Point::new(record.coord[0], record.coord[1]),
        });
    }

    let mut edges: Vec<StreetEdge> = Vec::with_capacity(document.edges.len() * 2);
    for record in document.edges {
        edges.push(convert_edge(record, &nodes, &node_ids)?);
    }

    // Materialize a reverse counterpart for every stored edge so the graph
    // is logically undirected. Geometry stays in the stored direction.
    let stored = edges.len();
    for index in 0..stored {
        let mut reversed = edges[index].clone();
        std::mem::swap(&mut reversed.from, &mut reversed.to);
        edges.push(reversed);
    }

    let mut adjacency: Vec<Vec<EdgeId>> = vec![Vec::new(); nodes.len()];
    for (edge_id, edge) in edges.iter().enumerate() {
        adjacency[edge.from].push(edge_id);
    }

    let network = StreetNetwork {
        nodes,
        node_ids,
        edges,
        stored,
        adjacency,
    };
    check_connectivity(&network);

    info!(
        "Street network ready: {} nodes, {} directed edges",
        network.node_count(),
        network.edge_count()
    );

    Ok(network)
}

fn convert_edge(
    record: EdgeRecord,
    nodes: &[StreetNode],
    node_ids: &HashMap<String, NodeId>,
) -> Result<StreetEdge, Error> {
    let from = *node_ids.get(&record.from).ok_or_else(|| {
        Error::MalformedGraph(format!(
            "edge {:?} references unknown node {:?}",
            record.id, record.from
        ))
    })?;
    let to = *node_ids.get(&record.to).ok_or_else(|| {
        Error::MalformedGraph(format!(
            "edge {:?} references unknown node {:?}",
            record.id, record.to
        ))
    })?;
    if from == to {
        return Err(Error::MalformedGraph(format!(
            "edge {:?} connects node {:?} to itself",
            record.id, record.from
        )));
    }
    if !record.length_m.is_finite() || record.length_m <= 0.0 {
        return Err(Error::MalformedGraph(format!(
            "edge {:?} has non-positive length {}",
            record.id, record.length_m
        )));
    }

    let shade = convert_shade(&record)?;
    let geometry = convert_geometry(&record, &nodes[from], &nodes[to]);

    Ok(StreetEdge {
        id: record.id,
        from,
        to,
        length_m: record.length_m,
        shade,
        geometry,
    })
}

fn convert_shade(record: &EdgeRecord) -> Result<ShadeTable, Error> {
    let mut shade = ShadeTable::neutral();
    for (name, &value) in &record.shade {
        let Some(bucket) = TimeBucket::parse(name) else {
            warn!(
                "edge {:?}: ignoring unknown shade bucket {:?}",
                record.id, name
            );
            continue;
        };
        if !(0.0..=1.0).contains(&value) {
            return Err(Error::MalformedGraph(format!(
                "edge {:?} has shade {} outside [0, 1] for bucket {:?}",
                record.id, value, name
            )));
        }
        shade.set(bucket, value);
    }
    Ok(shade)
}

fn convert_geometry(record: &EdgeRecord, from: &StreetNode, to: &StreetNode) -> LineString<f64> {
    if record.geometry.len() < 2 {
        debug!(
            "edge {:?}: no usable geometry, using a straight segment",
            record.id
        );
        return LineString::from(vec![from.geometry, to.geometry]);
    }

    let coords: Vec<Coord<f64>> = record
        .geometry
        .iter()
        .map(|coord| Coord {
            x: coord[0],
            y: coord[1],
        })
        .collect();
    let line = LineString::new(coords);

    let start_drift = Haversine.distance(Point::from(line.0[0]), from.geometry);
    let end_drift = Haversine.distance(Point::from(line.0[line.0.len() - 1]), to.geometry);
    if start_drift > ENDPOINT_TOLERANCE_M || end_drift > ENDPOINT_TOLERANCE_M {
        warn!(
            "edge {:?}: geometry endpoints drift from node coordinates \
             ({start_drift:.1} m / {end_drift:.1} m)",
            record.id
        );
    }

    line
}

fn check_connectivity(network: &StreetNetwork) {
    let mut graph: UnGraph<(), ()> =
        UnGraph::with_capacity(network.node_count(), network.stored_edge_count());
    for _ in 0..network.node_count() {
        graph.add_node(());
    }
    for edge in network.stored_edges() {
        graph.add_edge(NodeIndex::new(edge.from), NodeIndex::new(edge.to), ());
    }

    let components = connected_components(&graph);
    if components > 1 {
        warn!(
            "Street network splits into {components} disconnected fragments; \
             routes between fragments are unreachable"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn document(json: &str) -> GraphDocument {
        GraphDocument::from_json_str(json).unwrap()
    }

    #[test]
    fn empty_node_set_is_rejected() {
        let result = build_street_network(document(r#"{"nodes": [], "edges": []}"#));
        assert!(matches!(result, Err(Error::EmptyGraph)));
    }

    #[test]
    fn unknown_node_reference_is_rejected() {
        let result = build_street_network(document(
            r#"{
                "nodes": [{"id": "a", "coord": [0.0, 0.0]}],
                "edges": [{"id": "e", "from": "a", "to": "ghost", "length_m": 10.0,
                           "shade": {}, "geometry": []}]
            }"#,
        ));
        match result {
            Err(Error::MalformedGraph(message)) => assert!(message.contains("ghost")),
            other => panic!("expected MalformedGraph, got {other:?}"),
        }
    }

    #[test]
    fn self_loop_is_rejected() {
        let result = build_street_network(document(
            r#"{
                "nodes": [{"id": "a", "coord": [0.0, 0.0]}],
                "edges": [{"id": "e", "from": "a", "to": "a", "length_m": 10.0,
                           "shade": {}, "geometry": []}]
            }"#,
        ));
        assert!(matches!(result, Err(Error::MalformedGraph(_))));
    }

    #[test]
    fn non_positive_length_is_rejected() {
        for length in ["0.0", "-3.5", "null"] {
            let json = format!(
                r#"{{
                    "nodes": [{{"id": "a", "coord": [0.0, 0.0]}},
                              {{"id": "b", "coord": [0.001, 0.0]}}],
                    "edges": [{{"id": "e", "from": "a", "to": "b", "length_m": {length},
                               "shade": {{}}, "geometry": []}}]
                }}"#
            );
            let parsed = GraphDocument::from_json_str(&json);
            let Ok(parsed) = parsed else {
                // "null" fails deserialization before the builder sees it.
                continue;
            };
            assert!(
                matches!(build_street_network(parsed), Err(Error::MalformedGraph(_))),
                "length {length} should be rejected"
            );
        }
    }

    #[test]
    fn out_of_range_shade_is_rejected() {
        let result = build_street_network(document(
            r#"{
                "nodes": [{"id": "a", "coord": [0.0, 0.0]},
                          {"id": "b", "coord": [0.001, 0.0]}],
                "edges": [{"id": "e", "from": "a", "to": "b", "length_m": 100.0,
                           "shade": {"afternoon": 1.4}, "geometry": []}]
            }"#,
        ));
        assert!(matches!(result, Err(Error::MalformedGraph(_))));
    }

    #[test]
    fn unknown_buckets_are_ignored() {
        let network = build_street_network(document(
            r#"{
                "nodes": [{"id": "a", "coord": [0.0, 0.0]},
                          {"id": "b", "coord": [0.001, 0.0]}],
                "edges": [{"id": "e", "from": "a", "to": "b", "length_m": 100.0,
                           "shade": {"afternoon": 0.9, "midnight": 0.1},
                           "geometry": []}]
            }"#,
        ))
        .unwrap();

        let edge = &network.stored_edges()[0];
        assert_eq!(edge.shade_for(TimeBucket::Afternoon), 0.9);
        assert_eq!(edge.shade_for(TimeBucket::Evening), crate::NEUTRAL_SHADE);
    }

    #[test]
    fn missing_geometry_becomes_a_straight_segment() {
        let network = build_street_network(document(
            r#"{
                "nodes": [{"id": "a", "coord": [0.0, 0.0]},
                          {"id": "b", "coord": [0.001, 0.0]}],
                "edges": [{"id": "e", "from": "a", "to": "b", "length_m": 100.0,
                           "shade": {}, "geometry": []}]
            }"#,
        ))
        .unwrap();

        let edge = &network.stored_edges()[0];
        assert_eq!(edge.geometry.0.len(), 2);
        assert_eq!(edge.geometry.0[0], Coord { x: 0.0, y: 0.0 });
        assert_eq!(edge.geometry.0[1], Coord { x: 0.001, y: 0.0 });
    }

    #[test]
    fn duplicate_node_ids_are_rejected() {
        let result = build_street_network(document(
            r#"{
                "nodes": [{"id": "a", "coord": [0.0, 0.0]},
                          {"id": "a", "coord": [0.001, 0.0]}],
                "edges": []
            }"#,
        ));
        assert!(matches!(result, Err(Error::MalformedGraph(_))));
    }
}
