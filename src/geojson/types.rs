use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A longitude/latitude pair. Positions with altitude are not accepted.
pub type Position = [f64; 2];
/// A closed linear ring: first position equals the last, at least 4 entries.
pub type Ring = Vec<Position>;
/// The rings of one polygon: exterior first, holes after.
pub type PolygonRings = Vec<Ring>;

/// Geometry of a GeoJSON feature.
///
/// Only polygonal geometry participates in the pipeline. Other geometry
/// types (`Point`, `LineString`, ...) still parse, as `Unsupported`, so a
/// mixed input file does not abort the run; such features fail geometry
/// conversion and are skipped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Geometry {
    Polygon { coordinates: PolygonRings },
    MultiPolygon { coordinates: Vec<PolygonRings> },
    #[serde(other)]
    Unsupported,
}

impl Geometry {
    pub fn type_name(&self) -> &'static str {
        match self {
            Geometry::Polygon { .. } => "Polygon",
            Geometry::MultiPolygon { .. } => "MultiPolygon",
            Geometry::Unsupported => "Unsupported",
        }
    }
}

/// Feature ids may be strings or numbers per the GeoJSON spec.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FeatureId {
    String(String),
    Number(serde_json::Number),
}

fn feature_type() -> String {
    "Feature".to_string()
}

fn collection_type() -> String {
    "FeatureCollection".to_string()
}

/// A single GeoJSON feature. `geometry` and `properties` are nullable on
/// the wire; both are preserved verbatim through clipping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    #[serde(rename = "type", default = "feature_type")]
    pub type_: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<FeatureId>,
    #[serde(default)]
    pub geometry: Option<Geometry>,
    #[serde(default)]
    pub properties: Option<Map<String, Value>>,
}

impl Feature {
    pub fn new(geometry: Geometry, properties: Map<String, Value>) -> Self {
        Self {
            type_: feature_type(),
            id: None,
            geometry: Some(geometry),
            properties: Some(properties),
        }
    }

    /// A feature with the given geometry and empty `{}` properties, the
    /// shape the landmask builder emits.
    pub fn bare(geometry: Geometry) -> Self {
        Self::new(geometry, Map::new())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureCollection {
    #[serde(rename = "type", default = "collection_type")]
    pub type_: String,
    #[serde(default)]
    pub features: Vec<Feature>,
}

impl FeatureCollection {
    pub fn new(features: Vec<Feature>) -> Self {
        Self {
            type_: collection_type(),
            features,
        }
    }
}
