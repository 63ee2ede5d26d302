//! Geocoding and GeoJSON type definitions
//!
//! Wire types for the completion API plus the GeoJSON document model.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Structured city record parsed from the completion output.
///
/// All five fields are required; a reply missing any of them is rejected as a
/// parse failure rather than surfaced as a partial record. Coordinate values
/// are passed through unvalidated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityRecord {
    /// City name as the model reported it
    pub city_name: String,

    /// Latitude in decimal degrees
    pub latitude: f64,

    /// Longitude in decimal degrees
    pub longitude: f64,

    /// Country the city belongs to
    pub country: String,

    /// Short human-readable description
    pub description: String,
}

/// GeoJSON Point geometry.
///
/// Coordinates are `[longitude, latitude]` per the GeoJSON convention, the
/// reverse of [`CityRecord`]'s field order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointGeometry {
    /// Always "Point"
    #[serde(rename = "type")]
    pub geometry_type: String,

    /// `[longitude, latitude]`
    pub coordinates: [f64; 2],
}

impl PointGeometry {
    /// Create a Point geometry from latitude/longitude inputs
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            geometry_type: "Point".to_string(),
            coordinates: [longitude, latitude],
        }
    }
}

/// A single GeoJSON Feature with a free-form properties bag
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoFeature {
    /// Always "Feature"
    #[serde(rename = "type")]
    pub feature_type: String,

    /// Properties bag (`name`, `timestamp`, plus caller extras)
    pub properties: Map<String, Value>,

    /// Point geometry
    pub geometry: PointGeometry,
}

/// A GeoJSON FeatureCollection wrapping one or more features
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureCollection {
    /// Always "FeatureCollection"
    #[serde(rename = "type")]
    pub collection_type: String,

    /// Member features
    pub features: Vec<GeoFeature>,
}

impl FeatureCollection {
    /// Wrap a single feature into a collection
    pub fn single(feature: GeoFeature) -> Self {
        Self {
            collection_type: "FeatureCollection".to_string(),
            features: vec![feature],
        }
    }
}

// ==================== Completion API wire types ====================

/// A role-tagged chat message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    /// "system" or "user"
    pub role: String,

    /// Message text
    pub content: String,
}

impl ChatMessage {
    /// Create a system message
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    /// Create a user message
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// Chat completion request body
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    /// Model identifier
    pub model: String,

    /// Ordered conversation messages
    pub messages: Vec<ChatMessage>,

    /// Sampling temperature
    pub temperature: f64,

    /// Output token cap
    pub max_tokens: u32,
}

/// Chat completion response body
#[derive(Debug, Clone, Deserialize)]
pub struct ChatResponse {
    /// Completion choices; the first one carries the reply
    pub choices: Vec<ChatChoice>,
}

/// A single completion choice
#[derive(Debug, Clone, Deserialize)]
pub struct ChatChoice {
    /// The assistant message
    pub message: ChatMessage,
}
