//! Integration tests for GeoJSON MCP Server
//!
//! These tests drive the tool handler end-to-end with a stubbed completion
//! gateway - no real API calls are made.

use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{json, Value};

use geojson_mcp_server_rust::error::Result;
use geojson_mcp_server_rust::geo::extractor::CoordinateExtractor;
use geojson_mcp_server_rust::geo::gateway::CompletionGateway;
use geojson_mcp_server_rust::geo::types::{ChatMessage, FeatureCollection};
use geojson_mcp_server_rust::mcp::tools::ToolHandler;
use geojson_mcp_server_rust::mcp::types::{CallToolResult, ToolResultContent};

/// Serializes tests that change the process working directory
static CWD_LOCK: Mutex<()> = Mutex::new(());

struct StubGateway {
    reply: String,
}

#[async_trait]
impl CompletionGateway for StubGateway {
    fn model(&self) -> &str {
        "stub-model"
    }

    async fn complete(&self, _messages: Vec<ChatMessage>) -> Result<String> {
        Ok(self.reply.clone())
    }
}

fn handler(reply: &str) -> ToolHandler<StubGateway> {
    ToolHandler::new(CoordinateExtractor::new(StubGateway {
        reply: reply.to_string(),
    }))
}

fn envelope(result: &CallToolResult) -> Value {
    let ToolResultContent::Text { text } = &result.content[0];
    serde_json::from_str(text).expect("tool result text is not JSON")
}

const PARIS_REPLY: &str = r#"{"city_name":"Paris","latitude":48.8566,"longitude":2.3522,"country":"France","description":"Capital of France"}"#;

mod mcp_protocol_tests {
    use super::*;
    use geojson_mcp_server_rust::mcp::types::{JsonRpcRequest, JsonRpcResponse, RequestId};

    #[test]
    fn test_call_tool_request_format() {
        let json_str = r#"{"jsonrpc":"2.0","id":3,"method":"tools/call","params":{"name":"process_city_to_geojson","arguments":{"city_name":"Paris"}}}"#;
        let request: JsonRpcRequest = serde_json::from_str(json_str).unwrap();

        assert_eq!(request.method, "tools/call");
        assert_eq!(request.id, RequestId::Number(3));
        assert_eq!(
            request.params.unwrap()["arguments"]["city_name"],
            json!("Paris")
        );
    }

    #[test]
    fn test_jsonrpc_error_response_structure() {
        let json_str =
            r#"{"jsonrpc":"2.0","id":1,"error":{"code":-32601,"message":"Method not found: x"}}"#;
        let response: JsonRpcResponse = serde_json::from_str(json_str).unwrap();

        assert!(response.result.is_none());
        assert_eq!(response.error.unwrap().code, -32601);
    }
}

mod tool_listing_tests {
    use super::*;

    #[test]
    fn test_four_tools_in_declaration_order() {
        let tools = handler("{}").list_tools();
        let names: Vec<&str> = tools.iter().map(|t| t.name.as_str()).collect();

        assert_eq!(
            names,
            [
                "get_city_coordinates",
                "create_geojson_point",
                "save_geojson_file",
                "process_city_to_geojson",
            ]
        );
    }

    #[test]
    fn test_schemas_declare_required_fields() {
        let tools = handler("{}").list_tools();

        for tool in &tools {
            assert!(tool.description.is_some());
            assert_eq!(tool.input_schema["type"], json!("object"));
        }

        let save_tool = tools.iter().find(|t| t.name == "save_geojson_file").unwrap();
        assert_eq!(
            save_tool.input_schema["required"],
            json!(["geojson_data"])
        );
    }
}

mod dispatch_tests {
    use super::*;

    #[tokio::test]
    async fn test_unknown_tool_never_raises() {
        let result = handler("{}").call_tool("frobnicate", json!({})).await;
        let data = envelope(&result);

        assert_eq!(data["success"], json!(false));
        assert_eq!(data["error"], json!("tool 'frobnicate' not found"));
    }

    #[tokio::test]
    async fn test_get_city_coordinates_fenced_reply() {
        let reply = format!("```json\n{}\n```", PARIS_REPLY);
        let result = handler(&reply)
            .call_tool("get_city_coordinates", json!({"city_name": "Paris"}))
            .await;
        let data = envelope(&result);

        assert_eq!(data["success"], json!(true));
        assert_eq!(data["city_data"]["latitude"], json!(48.8566));
        assert_eq!(data["model_used"], json!("stub-model"));
    }

    #[tokio::test]
    async fn test_get_city_coordinates_failure_has_error_text() {
        let result = handler("sorry, no data")
            .call_tool("get_city_coordinates", json!({"city_name": "Atlantis"}))
            .await;
        let data = envelope(&result);

        assert_eq!(data["success"], json!(false));
        assert!(!data["error"].as_str().unwrap().is_empty());
        assert!(data.get("city_data").is_none());
    }

    #[tokio::test]
    async fn test_create_point_coordinate_order() {
        let result = handler("{}")
            .call_tool(
                "create_geojson_point",
                json!({
                    "city_name": "Tehran",
                    "latitude": 35.7,
                    "longitude": 51.4,
                    "properties": {"country": "Iran"}
                }),
            )
            .await;
        let data = envelope(&result);

        assert_eq!(data["success"], json!(true));
        assert_eq!(
            data["geojson"]["geometry"]["coordinates"],
            json!([51.4, 35.7])
        );
        assert_eq!(data["geojson"]["properties"]["country"], json!("Iran"));
        assert!(data["geojson"]["properties"]["timestamp"].is_string());
    }
}

mod save_tests {
    use super::*;

    #[tokio::test]
    async fn test_save_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tehran.geojson");
        let h = handler("{}");

        let created = envelope(
            &h.call_tool(
                "create_geojson_point",
                json!({"city_name": "Tehran", "latitude": 35.7, "longitude": 51.4}),
            )
            .await,
        );

        let saved = envelope(
            &h.call_tool(
                "save_geojson_file",
                json!({
                    "geojson_data": created["geojson"],
                    "file_path": path.to_str().unwrap()
                }),
            )
            .await,
        );

        assert_eq!(saved["success"], json!(true));
        assert!(saved["message"].as_str().unwrap().contains("saved"));

        let file_path = saved["file_path"].as_str().unwrap();
        let contents = std::fs::read_to_string(file_path).unwrap();
        let collection: FeatureCollection = serde_json::from_str(&contents).unwrap();

        assert_eq!(collection.features.len(), 1);
        let feature = serde_json::to_value(&collection.features[0]).unwrap();
        assert_eq!(feature["geometry"], created["geojson"]["geometry"]);
        assert_eq!(feature["properties"], created["geojson"]["properties"]);
    }

    #[tokio::test]
    async fn test_save_into_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope").join("x.geojson");
        let h = handler("{}");

        let created = envelope(
            &h.call_tool(
                "create_geojson_point",
                json!({"city_name": "Paris", "latitude": 48.8566, "longitude": 2.3522}),
            )
            .await,
        );

        let saved = envelope(
            &h.call_tool(
                "save_geojson_file",
                json!({
                    "geojson_data": created["geojson"],
                    "file_path": path.to_str().unwrap()
                }),
            )
            .await,
        );

        assert_eq!(saved["success"], json!(false));
        assert!(!saved["error"].as_str().unwrap().is_empty());
    }
}

mod pipeline_tests {
    use super::*;

    #[tokio::test]
    async fn test_process_paris_end_to_end() {
        let _guard = CWD_LOCK.lock().unwrap();
        let dir = tempfile::tempdir().unwrap();
        std::env::set_current_dir(dir.path()).unwrap();

        let result = handler(PARIS_REPLY)
            .call_tool("process_city_to_geojson", json!({"city_name": "Paris"}))
            .await;
        let data = envelope(&result);

        assert_eq!(data["success"], json!(true));
        assert_eq!(
            data["geojson"]["geometry"]["coordinates"],
            json!([2.3522, 48.8566])
        );
        assert_eq!(data["city_data"]["country"], json!("France"));
        assert_eq!(data["geojson"]["properties"]["country"], json!("France"));
        assert_eq!(data["file_info"]["success"], json!(true));

        let written = dir.path().join("Paris.geojson");
        assert!(written.exists());

        let collection: FeatureCollection =
            serde_json::from_str(&std::fs::read_to_string(written).unwrap()).unwrap();
        assert_eq!(collection.features[0].geometry.coordinates, [2.3522, 48.8566]);
    }

    #[tokio::test]
    async fn test_process_malformed_reply_writes_no_file() {
        let _guard = CWD_LOCK.lock().unwrap();
        let dir = tempfile::tempdir().unwrap();
        std::env::set_current_dir(dir.path()).unwrap();

        let result = handler("this is not JSON")
            .call_tool("process_city_to_geojson", json!({"city_name": "Paris"}))
            .await;
        let data = envelope(&result);

        assert_eq!(data["success"], json!(false));
        assert!(!data["error"].as_str().unwrap().is_empty());

        let entries = std::fs::read_dir(dir.path()).unwrap().count();
        assert_eq!(entries, 0);
    }

    #[tokio::test]
    async fn test_process_replaces_spaces_in_file_name() {
        let _guard = CWD_LOCK.lock().unwrap();
        let dir = tempfile::tempdir().unwrap();
        std::env::set_current_dir(dir.path()).unwrap();

        let reply = r#"{"city_name":"New York","latitude":40.7128,"longitude":-74.006,"country":"USA","description":"Largest US city"}"#;
        let result = handler(reply)
            .call_tool("process_city_to_geojson", json!({"city_name": "New York"}))
            .await;
        let data = envelope(&result);

        assert_eq!(data["success"], json!(true));
        assert!(dir.path().join("New_York.geojson").exists());
    }

    #[tokio::test]
    async fn test_process_falls_back_to_caller_name_when_extracted_is_empty() {
        let _guard = CWD_LOCK.lock().unwrap();
        let dir = tempfile::tempdir().unwrap();
        std::env::set_current_dir(dir.path()).unwrap();

        let reply = r#"{"city_name":"","latitude":48.8566,"longitude":2.3522,"country":"France","description":"Capital of France"}"#;
        let result = handler(reply)
            .call_tool("process_city_to_geojson", json!({"city_name": "Paris"}))
            .await;
        let data = envelope(&result);

        assert_eq!(data["success"], json!(true));
        assert_eq!(data["geojson"]["properties"]["name"], json!("Paris"));
        assert!(dir.path().join("Paris.geojson").exists());
    }

    #[tokio::test]
    async fn test_process_reports_outer_success_when_save_fails() {
        let _guard = CWD_LOCK.lock().unwrap();
        let dir = tempfile::tempdir().unwrap();
        std::env::set_current_dir(dir.path()).unwrap();

        // The derived file name lands in a directory that does not exist, so
        // extraction succeeds but the save step fails.
        let result = handler(PARIS_REPLY)
            .call_tool(
                "process_city_to_geojson",
                json!({"city_name": "missing-dir/Paris"}),
            )
            .await;
        let data = envelope(&result);

        assert_eq!(data["success"], json!(true));
        assert_eq!(data["file_info"]["success"], json!(false));
        assert!(!data["file_info"]["error"].as_str().unwrap().is_empty());
    }
}
