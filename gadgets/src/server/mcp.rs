//! Model Context Protocol (JSON-RPC 2.0) over HTTP and stdio.
//!
//! Supported methods: `initialize`, `ping`, `tools/list`, `tools/call`.
//! Requests without an `id` are notifications and get no reply.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use gcommon::RequestId;
use gprovider::ToolCall;
use gtooling::{ToolErrorKind, ToolExecutionContext, ToolRuntime};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

pub const PROTOCOL_VERSION: &str = "2024-11-05";

pub const PARSE_ERROR: i32 = -32700;
pub const INVALID_REQUEST: i32 = -32600;
pub const METHOD_NOT_FOUND: i32 = -32601;
pub const INVALID_PARAMS: i32 = -32602;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct McpRequest {
    pub jsonrpc: String,
    #[serde(default)]
    pub id: Option<Value>,
    pub method: String,
    #[serde(default)]
    pub params: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct McpResponse {
    pub jsonrpc: String,
    pub id: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<McpError>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct McpError {
    pub code: i32,
    pub message: String,
}

impl McpResponse {
    pub fn success(id: Option<Value>, result: Value) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: Some(result),
            error: None,
        }
    }

    pub fn error(id: Option<Value>, code: i32, message: impl Into<String>) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: None,
            error: Some(McpError {
                code,
                message: message.into(),
            }),
        }
    }
}

#[derive(Debug, Deserialize)]
struct CallToolParams {
    name: String,
    #[serde(default)]
    arguments: Option<Value>,
}

/// Answers MCP requests from one tool runtime.
#[derive(Clone)]
pub struct McpHandler {
    server_name: String,
    runtime: Arc<dyn ToolRuntime>,
}

impl McpHandler {
    pub fn new(server_name: impl Into<String>, runtime: Arc<dyn ToolRuntime>) -> Self {
        Self {
            server_name: server_name.into(),
            runtime,
        }
    }

    pub fn server_name(&self) -> &str {
        &self.server_name
    }

    /// Parses one raw JSON-RPC message and answers it.
    pub async fn handle_message(&self, raw: &str) -> Option<McpResponse> {
        let value = match serde_json::from_str::<Value>(raw) {
            Ok(value) => value,
            Err(err) => {
                tracing::warn!(server = %self.server_name, error = %err, "unparsable mcp message");
                return Some(McpResponse::error(None, PARSE_ERROR, format!("Parse error: {err}")));
            }
        };

        let id = value.get("id").filter(|id| !id.is_null()).cloned();
        match serde_json::from_value::<McpRequest>(value) {
            Ok(request) => self.handle(request).await,
            Err(err) => Some(McpResponse::error(
                id,
                INVALID_REQUEST,
                format!("Invalid Request: {err}"),
            )),
        }
    }

    pub async fn handle(&self, request: McpRequest) -> Option<McpResponse> {
        if request.jsonrpc != "2.0" {
            return Some(McpResponse::error(
                request.id,
                INVALID_REQUEST,
                "Invalid Request: jsonrpc must be \"2.0\"",
            ));
        }

        let Some(id) = request.id.filter(|id| !id.is_null()) else {
            tracing::debug!(server = %self.server_name, method = %request.method, "mcp notification");
            return None;
        };
        let id = Some(id);

        tracing::debug!(server = %self.server_name, method = %request.method, "mcp request");
        let response = match request.method.as_str() {
            "initialize" => self.initialize(id),
            "ping" => McpResponse::success(id, json!({})),
            "tools/list" => self.list_tools(id),
            "tools/call" => self.call_tool(id, request.params).await,
            other => McpResponse::error(id, METHOD_NOT_FOUND, format!("Method not found: {other}")),
        };

        Some(response)
    }

    fn initialize(&self, id: Option<Value>) -> McpResponse {
        McpResponse::success(
            id,
            json!({
                "protocolVersion": PROTOCOL_VERSION,
                "capabilities": {
                    "tools": { "listChanged": false }
                },
                "serverInfo": {
                    "name": self.server_name,
                    "version": env!("CARGO_PKG_VERSION")
                }
            }),
        )
    }

    fn list_tools(&self, id: Option<Value>) -> McpResponse {
        let tools = self
            .runtime
            .definitions()
            .into_iter()
            .map(|definition| {
                json!({
                    "name": definition.name,
                    "description": definition.description,
                    "inputSchema": definition.input_schema(),
                })
            })
            .collect::<Vec<_>>();

        McpResponse::success(id, json!({ "tools": tools }))
    }

    async fn call_tool(&self, id: Option<Value>, params: Value) -> McpResponse {
        let params = match serde_json::from_value::<CallToolParams>(params) {
            Ok(params) => params,
            Err(err) => {
                return McpResponse::error(id, INVALID_PARAMS, format!("Invalid params: {err}"));
            }
        };

        let arguments = match params.arguments {
            None | Some(Value::Null) => "{}".to_string(),
            Some(value @ Value::Object(_)) => value.to_string(),
            Some(_) => {
                return McpResponse::error(
                    id,
                    INVALID_PARAMS,
                    "Invalid params: arguments must be an object",
                );
            }
        };

        let request_id = RequestId::next();
        let call = ToolCall {
            id: format!("mcp-{request_id}"),
            name: params.name.clone(),
            arguments,
        };
        let context =
            ToolExecutionContext::new(request_id).with_metadata("surface", self.server_name.clone());

        match self.runtime.execute(call, context).await {
            Ok(result) => McpResponse::success(id, tool_content(result.output, result.is_error)),
            Err(err) if err.kind == ToolErrorKind::NotFound => {
                McpResponse::error(id, INVALID_PARAMS, format!("Unknown tool: {}", params.name))
            }
            Err(err) => McpResponse::success(id, tool_content(err.inline_text(), true)),
        }
    }
}

fn tool_content(text: String, is_error: bool) -> Value {
    json!({
        "content": [{ "type": "text", "text": text }],
        "isError": is_error,
    })
}

pub fn mcp_router(handler: Arc<McpHandler>) -> Router {
    Router::new()
        .route("/mcp", post(mcp_endpoint))
        .with_state(handler)
}

/// POST /mcp
pub async fn mcp_endpoint(State(handler): State<Arc<McpHandler>>, body: String) -> Response {
    match handler.handle_message(&body).await {
        Some(response) => Json(response).into_response(),
        None => StatusCode::ACCEPTED.into_response(),
    }
}

/// Newline-delimited JSON-RPC: one request per input line, one response per
/// output line. Returns when `reader` reaches end of input.
pub async fn serve_stdio<R, W>(handler: &McpHandler, reader: R, mut writer: W) -> std::io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    tracing::info!(phase = "server", event = "stdio_ready", server = %handler.server_name);

    let mut lines = reader.lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }

        let Some(response) = handler.handle_message(&line).await else {
            continue;
        };

        let mut encoded = serde_json::to_string(&response).map_err(std::io::Error::other)?;
        encoded.push('\n');
        writer.write_all(encoded.as_bytes()).await?;
        writer.flush().await?;
    }

    tracing::info!(phase = "server", event = "stdio_closed", server = %handler.server_name);
    Ok(())
}
