//! Error types for the GeoJSON MCP Server
//!
//! This module defines the error hierarchy for all operations in the server.

use thiserror::Error;

/// Main error type for the GeoJSON MCP Server
#[derive(Error, Debug)]
pub enum GeoJsonMcpError {
    /// Completion gateway errors
    #[error("Gateway error: {0}")]
    Gateway(#[from] GatewayError),

    /// Completion output parsing errors
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// MCP protocol errors
    #[error("MCP protocol error: {0}")]
    Mcp(#[from] McpError),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Completion gateway errors
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("completion request failed ({status}): {message}")]
    RequestFailed { status: u16, message: String },

    #[error("completion response contained no choices")]
    EmptyCompletion,

    #[error("completion transport error: {message}")]
    Transport { message: String },
}

/// Completion output parsing errors
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("completion output is not valid JSON: {message}")]
    InvalidJson { message: String },

    #[error("completion output is not a city record: {message}")]
    InvalidRecord { message: String },
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required environment variable: {var}")]
    MissingEnvVar { var: String },
}

/// MCP protocol errors
#[derive(Error, Debug)]
pub enum McpError {
    #[error("tool '{name}' not found")]
    UnknownTool { name: String },

    #[error("invalid arguments for '{name}': {message}")]
    InvalidArguments { name: String, message: String },

    #[error("Protocol error: {message}")]
    ProtocolError { message: String },
}

/// Result type alias for GeoJSON MCP operations
pub type Result<T> = std::result::Result<T, GeoJsonMcpError>;
