//! TopoJSON → GeoJSON conversion.

use std::borrow::Cow;

use geojson::FeatureCollection;
use serde_json::Value;
use topojson::{TopoJson, to_geojson};
use tracing::debug;

use crate::IngestError;

/// Object collection holding the 2021 California congressional boundaries.
pub const DEFAULT_TOPOLOGY_OBJECT: &str = "CD_Final 2021-12-20";

/// Turns a raw geometry document into renderable GeoJSON features.
pub trait GeometryConverter: Send + Sync {
    fn convert(&self, raw: &str) -> Result<FeatureCollection, IngestError>;
}

/// Extracts one named object collection from a TopoJSON topology.
#[derive(Clone, Debug)]
pub struct TopoJsonConverter {
    object: String,
}

impl TopoJsonConverter {
    pub fn new(object: impl Into<String>) -> Self {
        Self {
            object: object.into(),
        }
    }

    pub fn object(&self) -> &str {
        &self.object
    }
}

impl Default for TopoJsonConverter {
    fn default() -> Self {
        Self::new(DEFAULT_TOPOLOGY_OBJECT)
    }
}

impl GeometryConverter for TopoJsonConverter {
    fn convert(&self, raw: &str) -> Result<FeatureCollection, IngestError> {
        let document = prepare_document(raw, &self.object)?;

        let topology = match document.parse::<TopoJson>() {
            Ok(TopoJson::Topology(topology)) => topology,
            Ok(TopoJson::Geometry(_)) => return Err(IngestError::NotTopology),
            Err(err) => {
                return Err(IngestError::Parse {
                    message: err.to_string(),
                });
            }
        };

        to_geojson(&topology, &self.object).map_err(|err| IngestError::Convert {
            object: self.object.clone(),
            message: err.to_string(),
        })
    }
}

/// Reject documents that are not topologies or lack `object` before handing
/// them to the decoder, so the error names what is actually missing.
///
/// Null geometries (`"type": null`) have nothing to draw and the decoder
/// rejects them, so they are dropped from `object` here.
fn prepare_document<'a>(raw: &'a str, object: &str) -> Result<Cow<'a, str>, IngestError> {
    let mut document: Value = serde_json::from_str(raw).map_err(|err| IngestError::Parse {
        message: err.to_string(),
    })?;
    if document.get("type").and_then(Value::as_str) != Some("Topology") {
        return Err(IngestError::NotTopology);
    }
    let Some(target) = document
        .get_mut("objects")
        .and_then(Value::as_object_mut)
        .and_then(|objects| objects.get_mut(object))
    else {
        return Err(IngestError::Convert {
            object: object.to_string(),
            message: "object not found in topology".to_string(),
        });
    };

    let Some(geometries) = target.get_mut("geometries").and_then(Value::as_array_mut) else {
        return Ok(Cow::Borrowed(raw));
    };
    let before = geometries.len();
    geometries.retain(|geometry| !geometry.get("type").is_some_and(Value::is_null));
    let dropped = before - geometries.len();
    if dropped == 0 {
        return Ok(Cow::Borrowed(raw));
    }
    debug!("dropped {dropped} null geometries from {object}");
    Ok(Cow::Owned(document.to_string()))
}

#[cfg(test)]
mod tests {
    use geojson::Value as GeoValue;

    use super::*;

    const SQUARE_TOPOLOGY: &str = r#"{
        "type": "Topology",
        "objects": {
            "districts": {
                "type": "GeometryCollection",
                "geometries": [
                    { "type": "Polygon", "arcs": [[0]], "properties": { "DISTRICT": "12" } }
                ]
            }
        },
        "arcs": [[[-122.5, 37.7], [-122.3, 37.7], [-122.3, 37.8], [-122.5, 37.8], [-122.5, 37.7]]]
    }"#;

    #[test]
    fn extracts_named_object_with_properties() {
        let features = TopoJsonConverter::new("districts")
            .convert(SQUARE_TOPOLOGY)
            .unwrap();
        assert_eq!(features.features.len(), 1);

        let feature = &features.features[0];
        assert_eq!(
            feature.property("DISTRICT").and_then(Value::as_str),
            Some("12")
        );
        let geometry = feature.geometry.as_ref().unwrap();
        match &geometry.value {
            GeoValue::Polygon(rings) => {
                assert_eq!(rings.len(), 1);
                assert_eq!(rings[0].first(), rings[0].last());
                assert_eq!(rings[0].len(), 5);
            }
            other => panic!("expected polygon, got {other:?}"),
        }
    }

    #[test]
    fn quantized_multipolygon_is_decoded() {
        let raw = r#"{
            "type": "Topology",
            "transform": { "scale": [0.5, 0.5], "translate": [-124.0, 32.0] },
            "objects": {
                "districts": {
                    "type": "GeometryCollection",
                    "geometries": [
                        {
                            "type": "MultiPolygon",
                            "arcs": [[[0]], [[1]]],
                            "properties": { "DISTRICT": "2" }
                        }
                    ]
                }
            },
            "arcs": [
                [[0, 0], [2, 0], [0, 2], [-2, 0], [0, -2]],
                [[6, 4], [2, 0], [0, 2], [-2, 0], [0, -2]]
            ]
        }"#;
        let features = TopoJsonConverter::new("districts").convert(raw).unwrap();
        assert_eq!(features.features.len(), 1);

        let feature = &features.features[0];
        assert_eq!(feature.property("DISTRICT").and_then(Value::as_str), Some("2"));
        match &feature.geometry.as_ref().unwrap().value {
            GeoValue::MultiPolygon(polygons) => {
                assert_eq!(polygons.len(), 2);
                assert_eq!(polygons[0][0][0], vec![-124.0, 32.0]);
                assert_eq!(polygons[0][0][2], vec![-123.0, 33.0]);
                assert_eq!(polygons[1][0][0], vec![-121.0, 34.0]);
                assert_eq!(polygons[1][0][2], vec![-120.0, 35.0]);
            }
            other => panic!("expected multipolygon, got {other:?}"),
        }
    }

    #[test]
    fn null_geometries_are_skipped() {
        let raw = r#"{
            "type": "Topology",
            "objects": {
                "districts": {
                    "type": "GeometryCollection",
                    "geometries": [
                        { "type": null, "properties": { "DISTRICT": "7" } },
                        { "type": "Polygon", "arcs": [[0]], "properties": { "DISTRICT": "12" } }
                    ]
                }
            },
            "arcs": [[[-122.5, 37.7], [-122.3, 37.7], [-122.3, 37.8], [-122.5, 37.8], [-122.5, 37.7]]]
        }"#;
        let features = TopoJsonConverter::new("districts").convert(raw).unwrap();
        assert_eq!(features.features.len(), 1);
        assert_eq!(
            features.features[0].property("DISTRICT").and_then(Value::as_str),
            Some("12")
        );
    }

    #[test]
    fn missing_object_is_reported_by_name() {
        let err = TopoJsonConverter::default()
            .convert(SQUARE_TOPOLOGY)
            .unwrap_err();
        match err {
            IngestError::Convert { object, .. } => assert_eq!(object, DEFAULT_TOPOLOGY_OBJECT),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn geojson_document_is_not_a_topology() {
        let err = TopoJsonConverter::new("districts")
            .convert(r#"{"type":"FeatureCollection","features":[]}"#)
            .unwrap_err();
        assert!(matches!(err, IngestError::NotTopology));
    }

    #[test]
    fn truncated_document_fails_to_parse() {
        let err = TopoJsonConverter::new("districts")
            .convert("{\"type\": \"Topo")
            .unwrap_err();
        assert!(matches!(err, IngestError::Parse { .. }));
    }
}
