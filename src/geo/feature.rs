//! Feature builder
//!
//! Deterministic construction of a GeoJSON Point feature from a name and
//! coordinates. Coordinates are taken as-is; out-of-range values from the
//! completion output propagate unchecked into the document.

use serde_json::{Map, Value};

use crate::geo::types::{GeoFeature, PointGeometry};

/// Build a Point feature with `name`, a fresh ISO-8601 `timestamp`, and any
/// extra properties merged into the bag.
pub fn build_point_feature(
    city_name: &str,
    latitude: f64,
    longitude: f64,
    extra_properties: Option<Map<String, Value>>,
) -> GeoFeature {
    let mut properties = Map::new();
    properties.insert("name".to_string(), Value::String(city_name.to_string()));
    properties.insert(
        "timestamp".to_string(),
        Value::String(chrono::Utc::now().to_rfc3339()),
    );

    if let Some(extras) = extra_properties {
        for (key, value) in extras {
            properties.insert(key, value);
        }
    }

    GeoFeature {
        feature_type: "Feature".to_string(),
        properties,
        geometry: PointGeometry::new(latitude, longitude),
    }
}
