#![deny(warnings)]

// Binary crate for file-ops-mcp - uses library crate

use clap::Parser;
use file_ops_mcp::error::Result;
use file_ops_mcp::logging;
use file_ops_mcp::server::McpServer;
use file_ops_mcp::transport::StdioTransport;
use tracing::info;

#[derive(Parser)]
#[command(name = "file-ops-mcp")]
#[command(about = "File operations MCP server")]
#[command(
    long_about = "file-ops-mcp exposes basic file operations (list, create, append, read, delete, search, rename) as MCP tools over stdin/stdout.\n\nSet RUST_LOG to control log verbosity; logs are written to stderr."
)]
#[command(version)]
struct Cli {}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let _cli = Cli::parse();
    logging::init();

    let server = McpServer::new();
    let mut transport = StdioTransport::new();

    info!(version = env!("CARGO_PKG_VERSION"), "file-ops-mcp serving on stdio");
    server.serve(&mut transport).await
}
