use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Graph contains no nodes")]
    EmptyGraph,
    #[error("Malformed graph: {0}")]
    MalformedGraph(String),
    #[error("Invalid node index")]
    InvalidNodeIndex,
    #[error("Cost function returned an invalid value: {0}")]
    InvalidCost(f64),
    #[error("Graph is not loaded")]
    NotLoaded,
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Invalid graph document: {0}")]
    DocumentError(#[from] serde_json::Error),
    #[error("GeoJSON error: {0}")]
    GeoJsonError(String),
}
