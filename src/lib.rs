//! GeoJSON MCP Server Library
//!
//! A Model Context Protocol (MCP) server that turns free-text city names into
//! geocoded GeoJSON documents. Coordinates come from a hosted chat-completion
//! API; results are persisted as FeatureCollection files.

pub mod config;
pub mod error;
pub mod geo;
pub mod mcp;

pub use config::Config;
pub use error::{GeoJsonMcpError, Result};
