//! MCP Tool definitions and handlers
//!
//! Declares the four callable tools and routes invocations to the geocoding
//! pipeline. Every tool answers with a uniform JSON envelope serialized as
//! text content: `{"success": true, ...}` or `{"success": false, "error": ...}`.

use serde::Deserialize;
use serde_json::{json, Map, Value};

use crate::config::DEFAULT_OUTPUT_FILE;
use crate::error::McpError;
use crate::geo::extractor::CoordinateExtractor;
use crate::geo::feature::build_point_feature;
use crate::geo::gateway::CompletionGateway;
use crate::geo::types::GeoFeature;
use crate::geo::writer::save_feature_collection;
use crate::mcp::types::{CallToolResult, Tool};

/// Arguments shared by the tools keyed on a city name
#[derive(Debug, Deserialize)]
pub struct CityNameArgs {
    pub city_name: String,
}

/// Arguments for `create_geojson_point`
#[derive(Debug, Deserialize)]
pub struct CreatePointArgs {
    pub city_name: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub properties: Option<Map<String, Value>>,
}

/// Arguments for `save_geojson_file`
#[derive(Debug, Deserialize)]
pub struct SaveFileArgs {
    pub geojson_data: GeoFeature,
    #[serde(default)]
    pub file_path: Option<String>,
}

/// A parsed tool invocation with typed arguments.
///
/// Parsing validates the argument shape up front, so handlers never poke at
/// loose JSON bags.
#[derive(Debug)]
pub enum ToolCall {
    GetCityCoordinates(CityNameArgs),
    CreateGeojsonPoint(CreatePointArgs),
    SaveGeojsonFile(SaveFileArgs),
    ProcessCityToGeojson(CityNameArgs),
}

impl ToolCall {
    /// Resolve a named invocation into a typed call
    pub fn parse(name: &str, args: Value) -> std::result::Result<Self, McpError> {
        fn typed<T: serde::de::DeserializeOwned>(
            name: &str,
            args: Value,
        ) -> std::result::Result<T, McpError> {
            serde_json::from_value(args).map_err(|e| McpError::InvalidArguments {
                name: name.to_string(),
                message: e.to_string(),
            })
        }

        match name {
            "get_city_coordinates" => Ok(Self::GetCityCoordinates(typed(name, args)?)),
            "create_geojson_point" => Ok(Self::CreateGeojsonPoint(typed(name, args)?)),
            "save_geojson_file" => Ok(Self::SaveGeojsonFile(typed(name, args)?)),
            "process_city_to_geojson" => Ok(Self::ProcessCityToGeojson(typed(name, args)?)),
            _ => Err(McpError::UnknownTool {
                name: name.to_string(),
            }),
        }
    }
}

/// Tool handler
pub struct ToolHandler<G: CompletionGateway> {
    extractor: CoordinateExtractor<G>,

    /// Descriptors, built once at construction
    tools: Vec<Tool>,
}

impl<G: CompletionGateway> ToolHandler<G> {
    /// Create a new tool handler
    pub fn new(extractor: CoordinateExtractor<G>) -> Self {
        Self {
            extractor,
            tools: tool_descriptors(),
        }
    }

    /// List all available tools
    pub fn list_tools(&self) -> Vec<Tool> {
        self.tools.clone()
    }

    /// Call a tool by name
    pub async fn call_tool(&self, name: &str, args: Value) -> CallToolResult {
        let call = match ToolCall::parse(name, args) {
            Ok(call) => call,
            Err(e) => return envelope_result(failure(&e.to_string())),
        };

        let envelope = match call {
            ToolCall::GetCityCoordinates(args) => {
                self.get_city_coordinates(&args.city_name).await
            }
            ToolCall::CreateGeojsonPoint(args) => self.create_geojson_point(args),
            ToolCall::SaveGeojsonFile(args) => {
                self.save_geojson_file(&args.geojson_data, args.file_path.as_deref())
            }
            ToolCall::ProcessCityToGeojson(args) => {
                self.process_city_to_geojson(&args.city_name).await
            }
        };

        envelope_result(envelope)
    }

    // ==================== Tool Handlers ====================

    async fn get_city_coordinates(&self, city_name: &str) -> Value {
        match self.extractor.extract(city_name).await {
            Ok(record) => json!({
                "success": true,
                "city_data": record,
                "model_used": self.extractor.model(),
            }),
            Err(e) => failure(&e.to_string()),
        }
    }

    fn create_geojson_point(&self, args: CreatePointArgs) -> Value {
        let feature = build_point_feature(
            &args.city_name,
            args.latitude,
            args.longitude,
            args.properties,
        );

        json!({
            "success": true,
            "geojson": feature,
        })
    }

    fn save_geojson_file(&self, feature: &GeoFeature, file_path: Option<&str>) -> Value {
        let path = file_path.unwrap_or(DEFAULT_OUTPUT_FILE);

        match save_feature_collection(feature, std::path::Path::new(path)) {
            Ok(absolute) => json!({
                "success": true,
                "message": format!("GeoJSON file saved successfully: {}", path),
                "file_path": absolute.display().to_string(),
            }),
            Err(e) => failure(&e.to_string()),
        }
    }

    /// Composite pipeline: city name -> coordinates -> feature -> file.
    ///
    /// Short-circuits when extraction fails. A save failure does not flip the
    /// outer result; it stays nested under `file_info`, matching the behavior
    /// callers of this tool already depend on.
    async fn process_city_to_geojson(&self, city_name: &str) -> Value {
        tracing::info!(city = city_name, "processing city to GeoJSON");

        let record = match self.extractor.extract(city_name).await {
            Ok(record) => record,
            Err(e) => return failure(&e.to_string()),
        };

        // Prefer the name the model reports, fall back to the caller's input
        let feature_name = if record.city_name.is_empty() {
            city_name
        } else {
            record.city_name.as_str()
        };

        let mut extras = Map::new();
        extras.insert("country".to_string(), Value::String(record.country.clone()));
        extras.insert(
            "description".to_string(),
            Value::String(record.description.clone()),
        );

        let feature =
            build_point_feature(feature_name, record.latitude, record.longitude, Some(extras));

        // File name derives from the caller's input, not the extracted name
        let file_name = format!("{}.geojson", city_name.replace(' ', "_"));
        let file_info = self.save_geojson_file(&feature, Some(&file_name));

        json!({
            "success": true,
            "city_data": record,
            "geojson": feature,
            "file_info": file_info,
        })
    }
}

fn failure(message: &str) -> Value {
    json!({
        "success": false,
        "error": message,
    })
}

fn envelope_result(envelope: Value) -> CallToolResult {
    match serde_json::to_string_pretty(&envelope) {
        Ok(text) => CallToolResult::text(text),
        Err(e) => CallToolResult::error(e.to_string()),
    }
}

// ==================== Schema Definitions ====================

fn tool_def(name: &str, description: &str, input_schema: Value) -> Tool {
    Tool {
        name: name.to_string(),
        description: Some(description.to_string()),
        input_schema,
    }
}

fn tool_descriptors() -> Vec<Tool> {
    vec![
        tool_def(
            "get_city_coordinates",
            "Looks up the geographic coordinates of a city via the completion model",
            city_name_schema(),
        ),
        tool_def(
            "create_geojson_point",
            "Builds a GeoJSON Point feature from coordinates",
            create_point_schema(),
        ),
        tool_def(
            "save_geojson_file",
            "Saves a GeoJSON feature to a file",
            save_file_schema(),
        ),
        tool_def(
            "process_city_to_geojson",
            "Full pipeline: from a city name to a saved GeoJSON file",
            city_name_schema(),
        ),
    ]
}

fn city_name_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "city_name": {
                "type": "string",
                "description": "Name of the city"
            }
        },
        "required": ["city_name"]
    })
}

fn create_point_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "city_name": {"type": "string"},
            "latitude": {"type": "number"},
            "longitude": {"type": "number"},
            "properties": {"type": "object"}
        },
        "required": ["city_name", "latitude", "longitude"]
    })
}

fn save_file_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "geojson_data": {"type": "object"},
            "file_path": {"type": "string"}
        },
        "required": ["geojson_data"]
    })
}
