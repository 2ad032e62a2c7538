//! Raw graph document records, mirroring the JSON produced by the graph
//! extraction pipeline.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::Deserialize;

use crate::Error;

/// Parsed graph document, still in document terms (string IDs, raw shade
/// maps). [`build_street_network`](super::build_street_network) turns it
/// into an indexed [`StreetNetwork`](crate::StreetNetwork).
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct GraphDocument {
    pub nodes: Vec<NodeRecord>,
    pub edges: Vec<EdgeRecord>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct NodeRecord {
    pub id: String,
    /// `[longitude, latitude]` in degrees
    pub coord: [f64; 2],
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct EdgeRecord {
    pub id: String,
    pub from: String,
    pub to: String,
    pub length_m: f64,
    /// Bucket name to shade value; buckets may be missing
    pub shade: BTreeMap<String, f64>,
    /// `[longitude, latitude]` pairs tracing the segment
    pub geometry: Vec<[f64; 2]>,
}

impl GraphDocument {
    pub fn from_json_str(json: &str) -> Result<Self, Error> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_reader(reader: impl Read) -> Result<Self, Error> {
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, Error> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_minimal_document() {
        let document = GraphDocument::from_json_str(
            r#"{
                "nodes": [{"id": "0", "coord": [30.31, 59.93]}],
                "edges": [{"id": "('0', '1', 0)", "from": "0", "to": "1",
                           "length_m": 83.2, "shade": {"afternoon": 0.62},
                           "geometry": [[30.31, 59.93], [30.311, 59.931]]}]
            }"#,
        )
        .unwrap();

        assert_eq!(document.nodes.len(), 1);
        assert_eq!(document.edges.len(), 1);
        let edge = &document.edges[0];
        assert_eq!(edge.from, "0");
        assert_eq!(edge.shade.get("afternoon"), Some(&0.62));
        assert_eq!(edge.geometry.len(), 2);
    }

    #[test]
    fn missing_fields_default() {
        let document =
            GraphDocument::from_json_str(r#"{"nodes": [{"id": "n"}], "edges": []}"#).unwrap();
        assert_eq!(document.nodes[0].coord, [0.0, 0.0]);
    }

    #[test]
    fn rejects_invalid_json() {
        assert!(GraphDocument::from_json_str("{nodes: }").is_err());
    }
}
