//! Interactive GeoJSON client
//!
//! Spawns the GeoJSON MCP server, establishes a session over its stdio,
//! prompts for a city name, runs the full pipeline tool, and renders the
//! result.

use std::io::Write as _;
use std::path::PathBuf;
use std::process::Stdio;

use clap::Parser;
use serde_json::{json, Value};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Lines};
use tokio::process::{Child, ChildStdin, ChildStdout, Command};

use geojson_mcp_server_rust::error::{GeoJsonMcpError, McpError, Result};

const CLIENT_NAME: &str = "geojson-mcp-client";
const CLIENT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Interactive client for the GeoJSON MCP server
#[derive(Parser)]
#[command(name = "geojson-mcp-client")]
#[command(author, version, about = "Interactive client for the GeoJSON MCP server")]
struct Cli {
    /// Path to the server binary (defaults to a sibling of this executable)
    #[arg(long)]
    server: Option<PathBuf>,
}

/// An MCP session over a spawned server's stdio
struct McpSession {
    child: Child,
    stdin: ChildStdin,
    lines: Lines<BufReader<ChildStdout>>,
    next_id: i64,
}

impl McpSession {
    /// Spawn the server and wire up its stdio
    async fn connect(server_path: &std::path::Path) -> Result<Self> {
        let mut child = Command::new(server_path)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .spawn()?;

        let stdin = child.stdin.take().ok_or_else(|| {
            GeoJsonMcpError::Mcp(McpError::ProtocolError {
                message: "failed to open server stdin".to_string(),
            })
        })?;

        let stdout = child.stdout.take().ok_or_else(|| {
            GeoJsonMcpError::Mcp(McpError::ProtocolError {
                message: "failed to open server stdout".to_string(),
            })
        })?;

        Ok(Self {
            child,
            stdin,
            lines: BufReader::new(stdout).lines(),
            next_id: 1,
        })
    }

    async fn send(&mut self, message: &Value) -> Result<()> {
        let line = serde_json::to_string(message)?;
        self.stdin.write_all(line.as_bytes()).await?;
        self.stdin.write_all(b"\n").await?;
        self.stdin.flush().await?;
        Ok(())
    }

    /// Send a request and await its response line
    async fn request(&mut self, method: &str, params: Value) -> Result<Value> {
        let id = self.next_id;
        self.next_id += 1;

        self.send(&json!({
            "jsonrpc": "2.0",
            "id": id,
            "method": method,
            "params": params,
        }))
        .await?;

        let line = self.lines.next_line().await?.ok_or_else(|| {
            GeoJsonMcpError::Mcp(McpError::ProtocolError {
                message: "server closed the connection".to_string(),
            })
        })?;

        let response: Value = serde_json::from_str(&line)?;
        if let Some(error) = response.get("error").filter(|e| !e.is_null()) {
            return Err(GeoJsonMcpError::Mcp(McpError::ProtocolError {
                message: error.to_string(),
            }));
        }

        Ok(response.get("result").cloned().unwrap_or(Value::Null))
    }

    /// Perform the initialize handshake
    async fn initialize(&mut self) -> Result<Value> {
        let result = self
            .request(
                "initialize",
                json!({
                    "protocolVersion": "2024-11-05",
                    "clientInfo": {
                        "name": CLIENT_NAME,
                        "version": CLIENT_VERSION,
                    },
                    "capabilities": {},
                }),
            )
            .await?;

        // The initialized notification gets no response line
        let id = self.next_id;
        self.next_id += 1;
        self.send(&json!({
            "jsonrpc": "2.0",
            "id": id,
            "method": "notifications/initialized",
        }))
        .await?;

        Ok(result)
    }

    /// Invoke a tool and parse the JSON envelope from its text content
    async fn call_tool(&mut self, name: &str, arguments: Value) -> Result<Value> {
        let result = self
            .request("tools/call", json!({"name": name, "arguments": arguments}))
            .await?;

        let text = result["content"][0]["text"].as_str().ok_or_else(|| {
            GeoJsonMcpError::Mcp(McpError::ProtocolError {
                message: "tool result carried no text content".to_string(),
            })
        })?;

        Ok(serde_json::from_str(text)?)
    }

    /// Close the server's stdin and wait for it to exit
    async fn shutdown(mut self) -> Result<()> {
        drop(self.stdin);
        self.child.wait().await?;
        Ok(())
    }
}

fn default_server_path() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join("geojson-mcp-server")))
        .unwrap_or_else(|| PathBuf::from("geojson-mcp-server"))
}

fn prompt_city_name() -> Result<String> {
    print!("City name: ");
    std::io::stdout().flush()?;

    let mut input = String::new();
    std::io::stdin().read_line(&mut input)?;
    Ok(input.trim().to_string())
}

fn render_result(data: &Value) -> Result<()> {
    if data["success"] != json!(true) {
        let message = data["error"].as_str().unwrap_or("unknown error");
        println!("\nError: {}", message);
        return Ok(());
    }

    println!("\nDone!\n");

    let city = &data["city_data"];
    println!("City:        {}", city["city_name"].as_str().unwrap_or(""));
    println!("Country:     {}", city["country"].as_str().unwrap_or(""));
    println!("Latitude:    {}", city["latitude"]);
    println!("Longitude:   {}", city["longitude"]);
    println!("Description: {}", city["description"].as_str().unwrap_or(""));

    println!("\nGenerated GeoJSON:");
    println!("{}", serde_json::to_string_pretty(&data["geojson"])?);

    let file_info = &data["file_info"];
    if file_info["success"] == json!(true) {
        println!(
            "\nFile saved to: {}",
            file_info["file_path"].as_str().unwrap_or("")
        );
    } else {
        println!(
            "\nFile was not saved: {}",
            file_info["error"].as_str().unwrap_or("unknown error")
        );
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let server_path = cli.server.unwrap_or_else(default_server_path);

    println!("==================================================");
    println!("GeoJSON generator: city name to GeoJSON file");
    println!("==================================================");

    let city_name = prompt_city_name()?;
    if city_name.is_empty() {
        eprintln!("City name cannot be empty.");
        std::process::exit(1);
    }

    println!("\nProcessing '{}'...", city_name);

    let mut session = McpSession::connect(&server_path).await?;
    session.initialize().await?;

    let data = session
        .call_tool("process_city_to_geojson", json!({"city_name": city_name}))
        .await?;

    render_result(&data)?;

    session.shutdown().await?;
    Ok(())
}
