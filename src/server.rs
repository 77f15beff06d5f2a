#![deny(warnings)]

// MCP server implementation

use crate::error::{FileOpsMcpError, McpError, Result, TransportError};
use crate::resources;
use crate::tools::ToolRegistry;
use crate::transport::StdioTransport;
use serde_json::{json, Value};
use tokio::io::{AsyncBufRead, AsyncWrite};
use tokio::sync::RwLock;
use tracing::{debug, error, info, warn};

/// Protocol version assumed when the client does not send one
pub const DEFAULT_PROTOCOL_VERSION: &str = "2024-11-05";

/// Protocol versions this server accepts during `initialize`
pub const SUPPORTED_PROTOCOL_VERSIONS: &[&str] =
    &["2024-11-05", "2025-03-26", "2025-06-18", "2025-11-25"];

// JSON-RPC 2.0 error codes
const PARSE_ERROR: i32 = -32700;
const INVALID_REQUEST: i32 = -32600;
const METHOD_NOT_FOUND: i32 = -32601;
const INVALID_PARAMS: i32 = -32602;
const SERVER_ERROR: i32 = -32000;

/// MCP server state
pub struct McpServer {
    /// Tool registry, built once at construction
    tool_registry: ToolRegistry,
    /// Initialized flag
    initialized: RwLock<bool>,
}

impl McpServer {
    /// Create a new MCP server
    pub fn new() -> Self {
        Self {
            tool_registry: ToolRegistry::new(),
            initialized: RwLock::new(false),
        }
    }

    /// Handle initialize request
    pub async fn handle_initialize(
        &self,
        protocol_version: &str,
        _client_capabilities: &Value,
    ) -> Result<Value> {
        if !SUPPORTED_PROTOCOL_VERSIONS.contains(&protocol_version) {
            return Err(McpError::InvalidProtocolVersion(protocol_version.to_string()).into());
        }

        info!(protocol_version, "client initializing");

        Ok(json!({
            "protocolVersion": protocol_version,
            "serverInfo": {
                "name": env!("CARGO_PKG_NAME"),
                "version": env!("CARGO_PKG_VERSION"),
            },
            "capabilities": {
                "tools": {
                    "listChanged": false,
                },
                "resources": {
                    "subscribe": false,
                    "listChanged": false,
                },
            },
        }))
    }

    /// Handle initialized notification
    pub async fn handle_initialized(&self) -> Result<()> {
        *self.initialized.write().await = true;
        info!("session initialized");
        Ok(())
    }

    /// Handle tool call
    pub async fn handle_tool_call(&self, tool_name: &str, arguments: &Value) -> Result<Value> {
        self.tool_registry.execute_tool(tool_name, arguments)
    }

    /// Handle shutdown request
    pub async fn handle_shutdown(&self) -> Result<()> {
        *self.initialized.write().await = false;
        info!("session shut down");
        Ok(())
    }

    /// List tools in MCP schema format
    pub fn list_tools(&self) -> Value {
        self.tool_registry.list_tools()
    }

    /// Check if server is initialized
    pub async fn is_initialized(&self) -> bool {
        *self.initialized.read().await
    }

    /// Run the receive-dispatch-reply loop until the peer closes the stream.
    ///
    /// Each message is handled to completion before the next one is read.
    pub async fn serve<R, W>(&self, transport: &mut StdioTransport<R, W>) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        loop {
            let message_str = match transport.read_message().await {
                Ok(msg) => msg,
                Err(FileOpsMcpError::Transport(TransportError::ConnectionClosed)) => {
                    info!("input closed, stopping");
                    break;
                }
                Err(e) if is_undecodable_input(&e) => {
                    // The bad frame was consumed; answer it and keep serving.
                    warn!(error = %e, "undecodable message");
                    let response = jsonrpc_error_response(None, PARSE_ERROR, "Parse error", None);
                    if let Err(e) = self.write_response(transport, &response).await {
                        error!(error = %e, "error writing response");
                        break;
                    }
                    continue;
                }
                Err(e) => {
                    error!(error = %e, "error reading message");
                    break;
                }
            };

            if message_str.is_empty() {
                continue;
            }

            let response = match serde_json::from_str::<Value>(&message_str) {
                Ok(message) => self.handle_message(message).await,
                Err(e) => {
                    warn!(error = %e, "error parsing JSON-RPC message");
                    Some(jsonrpc_error_response(None, PARSE_ERROR, "Parse error", None))
                }
            };

            // Notifications don't have responses
            let Some(response) = response else {
                continue;
            };

            if let Err(e) = self.write_response(transport, &response).await {
                error!(error = %e, "error writing response");
                break;
            }
        }

        Ok(())
    }

    async fn write_response<R, W>(
        &self,
        transport: &mut StdioTransport<R, W>,
        response: &Value,
    ) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let response_str = serde_json::to_string(response)?;
        transport.write_message(&response_str).await
    }

    /// Dispatch one decoded JSON-RPC message. Returns `None` for
    /// notifications, which never receive a response.
    pub async fn handle_message(&self, message: Value) -> Option<Value> {
        let id = message.get("id").cloned();
        let is_notification = id.is_none();

        if let Some(jsonrpc_version) = message.get("jsonrpc").and_then(Value::as_str) {
            if jsonrpc_version != "2.0" {
                let error_msg = format!("Invalid JSON-RPC version: {}", jsonrpc_version);
                return Some(jsonrpc_error_response(id, INVALID_REQUEST, &error_msg, None));
            }
        }

        let method = message.get("method").and_then(Value::as_str);
        let params = message.get("params").cloned().unwrap_or(Value::Null);
        debug!(method = method.unwrap_or("(missing)"), notification = is_notification, "received message");

        let result = match method {
            Some("initialize") => {
                let protocol_version = params
                    .get("protocolVersion")
                    .and_then(Value::as_str)
                    .unwrap_or(DEFAULT_PROTOCOL_VERSION);
                let client_capabilities = params.get("capabilities").unwrap_or(&Value::Null);

                self.handle_initialize(protocol_version, client_capabilities)
                    .await
            }
            Some("initialized") | Some("notifications/initialized") => {
                self.handle_initialized().await.map(|_| Value::Null)
            }
            Some("ping") => Ok(json!({})),
            Some(
                method @ ("tools/list"
                | "tools/call"
                | "resources/list"
                | "resources/templates/list"
                | "resources/read"
                | "shutdown"),
            ) => {
                if !self.is_initialized().await {
                    if is_notification {
                        return None;
                    }
                    return Some(jsonrpc_error_response(
                        id,
                        SERVER_ERROR,
                        "Server not initialized. Call 'initialize' first.",
                        None,
                    ));
                }

                match method {
                    "tools/list" => Ok(json!({ "tools": self.list_tools() })),
                    "tools/call" => {
                        let Some(tool_name) = params.get("name").and_then(Value::as_str) else {
                            return Some(jsonrpc_error_response(
                                id,
                                INVALID_PARAMS,
                                "Invalid params: Missing tool name",
                                None,
                            ));
                        };
                        let arguments = params.get("arguments").unwrap_or(&Value::Null);
                        self.handle_tool_call(tool_name, arguments).await
                    }
                    "resources/list" => Ok(json!({ "resources": resources::list_resources() })),
                    "resources/templates/list" => Ok(json!({
                        "resourceTemplates": resources::list_resource_templates()
                    })),
                    "resources/read" => {
                        let Some(uri) = params.get("uri").and_then(Value::as_str) else {
                            return Some(jsonrpc_error_response(
                                id,
                                INVALID_PARAMS,
                                "Invalid params: Missing resource uri",
                                None,
                            ));
                        };
                        resources::read_resource(uri)
                    }
                    _ => self.handle_shutdown().await.map(|_| Value::Null),
                }
            }
            Some(_) | None => {
                if is_notification {
                    debug!(method = method.unwrap_or("(missing)"), "ignoring unknown notification");
                    return None;
                }
                return Some(jsonrpc_error_response(
                    id,
                    METHOD_NOT_FOUND,
                    &format!("Method not found: {:?}", method.unwrap_or("(missing)")),
                    None,
                ));
            }
        };

        if is_notification {
            // Notifications don't get responses, not even errors
            if let Err(e) = result {
                warn!(error = %e, "notification failed");
            }
            return None;
        }

        Some(match result {
            Ok(result_value) => json!({
                "jsonrpc": "2.0",
                "id": id,
                "result": result_value,
            }),
            Err(e) => {
                warn!(error = %e, "request failed");
                jsonrpc_error_response(id, error_code(&e), &e.to_string(), None)
            }
        })
    }
}

impl Default for McpServer {
    fn default() -> Self {
        Self::new()
    }
}

/// Whether a read failure rejected one frame rather than the stream itself
fn is_undecodable_input(err: &FileOpsMcpError) -> bool {
    match err {
        FileOpsMcpError::Transport(TransportError::InvalidMessage(_)) => true,
        FileOpsMcpError::Transport(TransportError::Io(e)) => {
            e.kind() == std::io::ErrorKind::InvalidData
        }
        _ => false,
    }
}

fn error_code(error: &FileOpsMcpError) -> i32 {
    match error {
        FileOpsMcpError::Mcp(McpError::InvalidToolParameters(_)) => INVALID_PARAMS,
        _ => SERVER_ERROR,
    }
}

fn jsonrpc_error_response(
    id: Option<Value>,
    code: i32,
    message: &str,
    data: Option<Value>,
) -> Value {
    json!({
        "jsonrpc": "2.0",
        "id": id,
        "error": {
            "code": code,
            "message": message,
            "data": data,
        },
    })
}
