use geo::{Coord, LineString};
use geojson::{Feature, FeatureCollection, Geometry, GeometryValue};
use serde_json::json;

use super::metrics::{shade_score, total_length};
use super::Route;
use crate::model::{StreetNetwork, TimeBucket};
use crate::Error;

/// Converts a computed route to a `GeoJSON` `Feature` for map rendering.
///
/// Edge geometries are joined into one line: reverse counterparts are
/// flipped back into walk direction and duplicate joint points dropped.
/// An empty route has no geometry and yields `None`.
pub fn route_to_feature(
    network: &StreetNetwork,
    route: &Route,
    bucket: TimeBucket,
) -> Result<Option<Feature>, Error> {
    if route.edges.is_empty() {
        return Ok(None);
    }

    let mut coords: Vec<Coord<f64>> = Vec::new();
    for &edge_id in &route.edges {
        let edge = network.edge(edge_id).ok_or_else(|| {
            Error::MalformedGraph(format!("route references unknown edge {edge_id}"))
        })?;

        let mut segment: Vec<Coord<f64>> = edge.geometry.0.clone();
        if network.is_reversed(edge_id) {
            segment.reverse();
        }
        for coord in segment {
            if coords.last() == Some(&coord) {
                continue;
            }
            coords.push(coord);
        }
    }

    let linestring = LineString::new(coords);
    let value = json!({
        "type": "Feature",
        "geometry": Geometry::new(GeometryValue::from(&linestring)),
        "properties": {
            "length_m": total_length(network.path_edges(&route.edges)),
            "shade": shade_score(network.path_edges(&route.edges), bucket),
            "edge_count": route.edges.len(),
        }
    });

    serde_json::from_value(value)
        .map(Some)
        .map_err(|e| Error::GeoJsonError(e.to_string()))
}

/// Converts routes to a `GeoJSON` `FeatureCollection`, skipping empty ones.
pub fn routes_to_geojson(
    network: &StreetNetwork,
    routes: &[Route],
    bucket: TimeBucket,
) -> Result<FeatureCollection, Error> {
    let mut features = Vec::new();
    for route in routes {
        if let Some(feature) = route_to_feature(network, route, bucket)? {
            features.push(feature);
        }
    }

    Ok(FeatureCollection {
        features,
        bbox: None,
        foreign_members: None,
    })
}

pub fn routes_to_geojson_string(
    network: &StreetNetwork,
    routes: &[Route],
    bucket: TimeBucket,
) -> Result<String, Error> {
    serde_json::to_string(&routes_to_geojson(network, routes, bucket)?)
        .map_err(|e| Error::GeoJsonError(e.to_string()))
}
