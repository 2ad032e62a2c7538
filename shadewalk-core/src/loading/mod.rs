//! This module is responsible for parsing graph documents and building the
//! indexed street network from them.

mod builder;
mod document;

pub use builder::build_street_network;
pub use document::{EdgeRecord, GraphDocument, NodeRecord};
