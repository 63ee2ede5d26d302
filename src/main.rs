//! GeoJSON MCP Server - Rust Implementation
//!
//! A Model Context Protocol (MCP) server that geocodes city names through a
//! hosted completion model and persists the results as GeoJSON files.

use clap::Parser;

use geojson_mcp_server_rust::config::Config;
use geojson_mcp_server_rust::error::Result;
use geojson_mcp_server_rust::geo::gateway::OpenAiGateway;
use geojson_mcp_server_rust::mcp::server::McpServer;

/// GeoJSON MCP Server
#[derive(Parser)]
#[command(name = "geojson-mcp-server")]
#[command(author, version, about = "GeoJSON MCP Server - city names to GeoJSON over MCP")]
struct Cli {}

#[tokio::main]
async fn main() -> Result<()> {
    // Logging goes to stderr; stdout carries the protocol
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let _cli = Cli::parse();

    // Load configuration
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!("Set OPENAI_API_KEY (and optionally OPENAI_BASE_URL, OPENAI_MODEL).");
            std::process::exit(1);
        }
    };

    tracing::info!(model = %config.model, "starting GeoJSON MCP server");

    let gateway = OpenAiGateway::new(config);
    let mut server = McpServer::new(gateway);
    server.run_stdio().await?;

    Ok(())
}
