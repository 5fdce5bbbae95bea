// crates/yamcs-mcp/src/server.rs
// ============================================================================
// Module: MCP Server
// Description: MCP server implementations for stdio, HTTP, and SSE transports.
// Purpose: Expose Yamcs bridge tools and resources via JSON-RPC 2.0.
// Dependencies: axum, tokio, yamcs-client, yamcs-contract
// ============================================================================

//! ## Overview
//! The MCP server answers JSON-RPC 2.0 requests over stdio, HTTP, or SSE and
//! routes every tool and resource call through the registries built at
//! startup. Tool failures travel as error envelopes inside *successful*
//! responses; JSON-RPC error codes are reserved for protocol violations such
//! as malformed requests, unknown methods, or oversized bodies. Startup
//! attempts one eager Yamcs connection and degrades instead of aborting when
//! the connection fails, so assistants can still list tools and read the
//! health check while Yamcs is down.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::convert::Infallible;
use std::io::BufRead;
use std::io::BufReader;
use std::io::Read;
use std::io::Write;
use std::sync::Arc;

use axum::Router;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Sse;
use axum::response::sse::Event;
use axum::routing::get;
use axum::routing::post;
use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;
use serde_json::json;
use tokio::sync::broadcast;
use tokio_stream::Stream;
use tokio_stream::StreamExt;
use tokio_stream::wrappers::BroadcastStream;
use yamcs_client::SessionManager;
use yamcs_contract::ResourceDefinition;
use yamcs_contract::ResourceName;
use yamcs_contract::ToolDefinition;
use yamcs_contract::ToolName;

use crate::audit;
use crate::audit::RequestAuditEvent;
use crate::audit::RequestAuditEventParams;
use crate::audit::RequestMethod;
use crate::audit::RequestOutcome;
use crate::audit::SessionAction;
use crate::audit::SessionAuditEvent;
use crate::audit::SessionAuditEventParams;
use crate::config::ServerTransport;
use crate::config::YamcsMcpConfig;
use crate::registry::ResourceRegistry;
use crate::registry::SessionContext;
use crate::registry::ToolRegistry;
use crate::subsystems;

/// MCP protocol revision advertised during the initialize handshake.
const MCP_PROTOCOL_VERSION: &str = "2024-11-05";

/// Queued responses an SSE stream may lag behind before dropping events.
const SSE_CHANNEL_CAPACITY: usize = 64;

/// Fallback JSON-RPC payload when response serialization fails.
const SERIALIZATION_FAILURE: &str =
    r#"{"jsonrpc":"2.0","id":null,"error":{"code":-32060,"message":"serialization failed"}}"#;

// ============================================================================
// SECTION: MCP Server
// ============================================================================

/// MCP server instance.
pub struct McpServer {
    /// Validated bridge configuration.
    config: YamcsMcpConfig,
    /// Shared transport handler state.
    state: Arc<ServerState>,
}

impl McpServer {
    /// Builds a new MCP server from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`McpServerError`] when validation or registration fails.
    pub fn from_config(config: YamcsMcpConfig) -> Result<Self, McpServerError> {
        config.validate().map_err(|err| McpServerError::Config(err.to_string()))?;
        let audit = audit::sink_from_config(&config.audit)
            .map_err(|err| McpServerError::Init(err.to_string()))?;
        let context = Arc::new(SessionContext {
            sessions: SessionManager::new(config.yamcs.client_config()),
            default_instance: config.yamcs.instance.clone(),
            server_name: config.server.name.clone(),
            url: config.yamcs.url.clone(),
            enabled_subsystems: config.subsystems.enabled_labels(),
            audit,
        });
        let mut tools = ToolRegistry::new();
        let mut resources = ResourceRegistry::new();
        subsystems::register_enabled(&config.subsystems, &mut tools, &mut resources, &context)
            .map_err(|err| McpServerError::Init(err.to_string()))?;
        let (sse_events, _) = broadcast::channel(SSE_CHANNEL_CAPACITY);
        let state = Arc::new(ServerState {
            context,
            tools,
            resources,
            transport: config.server.transport,
            max_body_bytes: config.server.max_body_bytes,
            sse_events,
        });
        Ok(Self {
            config,
            state,
        })
    }

    /// Lists the tool definitions registered for this configuration.
    #[must_use]
    pub fn tool_definitions(&self) -> Vec<ToolDefinition> {
        self.state.tools.definitions()
    }

    /// Lists the resource definitions registered for this configuration.
    #[must_use]
    pub fn resource_definitions(&self) -> Vec<ResourceDefinition> {
        self.state.resources.definitions()
    }

    /// Serves requests using the configured transport.
    ///
    /// # Errors
    ///
    /// Returns [`McpServerError`] when the transport fails.
    pub async fn serve(self) -> Result<(), McpServerError> {
        self.connect_eagerly().await;
        match self.config.server.transport {
            ServerTransport::Stdio => serve_stdio(&self.state).await,
            ServerTransport::Http => serve_http(&self.config, self.state).await,
            ServerTransport::Sse => serve_sse(&self.config, self.state).await,
        }
    }

    /// Attempts the startup Yamcs connection.
    ///
    /// A failure records a degraded start and the server continues; the next
    /// tool call retries through the session manager.
    async fn connect_eagerly(&self) {
        let context = &self.state.context;
        let (action, outcome, message) = match context.sessions.acquire().await {
            Ok(_) => (SessionAction::Connect, RequestOutcome::Ok, None),
            Err(err) => {
                (SessionAction::DegradedStart, RequestOutcome::Error, Some(err.to_string()))
            }
        };
        let event = SessionAuditEvent::new(SessionAuditEventParams {
            action,
            url: context.url.clone(),
            instance: context.default_instance.clone(),
            outcome,
            message,
        });
        context.audit.record_session(&event);
    }
}

/// Shared state for transport handlers.
struct ServerState {
    /// Session context shared with every registered handler.
    context: Arc<SessionContext>,
    /// Registered tool handlers.
    tools: ToolRegistry,
    /// Registered resource handlers.
    resources: ResourceRegistry,
    /// Transport the server was started with, for audit records.
    transport: ServerTransport,
    /// Maximum allowed request body size.
    max_body_bytes: usize,
    /// Broadcast channel feeding open SSE streams.
    sse_events: broadcast::Sender<String>,
}

// ============================================================================
// SECTION: Stdio Transport
// ============================================================================

/// Serves JSON-RPC requests over stdin/stdout.
///
/// Returns cleanly when stdin closes between frames; a mid-frame close is a
/// transport error.
async fn serve_stdio(state: &Arc<ServerState>) -> Result<(), McpServerError> {
    let mut reader = BufReader::new(std::io::stdin());
    let mut writer = std::io::stdout();
    loop {
        let Some(bytes) = read_framed(&mut reader, state.max_body_bytes)? else {
            return Ok(());
        };
        let Some((_, response)) = dispatch_bytes(state, &bytes).await else {
            continue;
        };
        let payload = serde_json::to_vec(&response)
            .map_err(|_| McpServerError::Transport("json-rpc serialization failed".to_string()))?;
        write_framed(&mut writer, &payload)?;
    }
}

// ============================================================================
// SECTION: HTTP and SSE Transports
// ============================================================================

/// Serves JSON-RPC requests over HTTP.
async fn serve_http(
    config: &YamcsMcpConfig,
    state: Arc<ServerState>,
) -> Result<(), McpServerError> {
    let addr = config.server.bind_addr().map_err(|err| McpServerError::Config(err.to_string()))?;
    let app = Router::new().route("/rpc", post(handle_rpc)).with_state(state);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|_| McpServerError::Transport("http bind failed".to_string()))?;
    axum::serve(listener, app)
        .await
        .map_err(|_| McpServerError::Transport("http server failed".to_string()))
}

/// Serves the SSE transport: POST `/rpc` for requests, GET `/sse` for the
/// response stream.
async fn serve_sse(
    config: &YamcsMcpConfig,
    state: Arc<ServerState>,
) -> Result<(), McpServerError> {
    let addr = config.server.bind_addr().map_err(|err| McpServerError::Config(err.to_string()))?;
    let app = Router::new()
        .route("/rpc", post(handle_sse_rpc))
        .route("/sse", get(handle_sse_stream))
        .with_state(state);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|_| McpServerError::Transport("sse bind failed".to_string()))?;
    axum::serve(listener, app)
        .await
        .map_err(|_| McpServerError::Transport("sse server failed".to_string()))
}

/// Handles HTTP JSON-RPC requests.
async fn handle_rpc(State(state): State<Arc<ServerState>>, bytes: Bytes) -> impl IntoResponse {
    match dispatch_bytes(&state, bytes.as_ref()).await {
        Some((status, response)) => {
            let value =
                serde_json::to_value(&response).unwrap_or_else(|_| serialization_failure());
            (status, axum::Json(value))
        }
        None => (StatusCode::ACCEPTED, axum::Json(Value::Null)),
    }
}

/// Accepts a JSON-RPC request and queues its response for the event stream.
///
/// The response is dropped when no stream is subscribed.
async fn handle_sse_rpc(State(state): State<Arc<ServerState>>, bytes: Bytes) -> impl IntoResponse {
    if let Some((_, response)) = dispatch_bytes(&state, bytes.as_ref()).await {
        let payload = serde_json::to_string(&response)
            .unwrap_or_else(|_| SERIALIZATION_FAILURE.to_string());
        let _ = state.sse_events.send(payload);
    }
    StatusCode::ACCEPTED
}

/// Opens the SSE response stream.
///
/// The first event names the request endpoint; response events follow. A
/// lagging subscriber skips the responses it missed.
async fn handle_sse_stream(
    State(state): State<Arc<ServerState>>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let receiver = state.sse_events.subscribe();
    let endpoint = tokio_stream::once(Ok(Event::default().event("endpoint").data("/rpc")));
    let responses = BroadcastStream::new(receiver)
        .filter_map(|message| message.ok())
        .map(|payload| Ok(Event::default().data(payload)));
    Sse::new(endpoint.chain(responses))
}

/// Builds the fallback response value for serialization failures.
fn serialization_failure() -> Value {
    serde_json::from_str(SERIALIZATION_FAILURE).unwrap_or(Value::Null)
}

// ============================================================================
// SECTION: JSON-RPC Handling
// ============================================================================

/// Incoming JSON-RPC request payload.
#[derive(Debug, Deserialize)]
struct JsonRpcRequest {
    /// JSON-RPC protocol version.
    jsonrpc: String,
    /// Request identifier; null for notifications.
    #[serde(default)]
    id: Value,
    /// Method name.
    method: String,
    /// Optional parameters payload.
    params: Option<Value>,
}

/// JSON-RPC response envelope.
#[derive(Debug, Serialize)]
struct JsonRpcResponse {
    /// JSON-RPC protocol version.
    jsonrpc: &'static str,
    /// Request identifier.
    id: Value,
    /// Successful result payload.
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<Value>,
    /// Error payload when the request fails.
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<JsonRpcError>,
}

/// JSON-RPC error payload.
#[derive(Debug, Serialize)]
struct JsonRpcError {
    /// Error code.
    code: i64,
    /// Human-readable error message.
    message: String,
}

/// Tool call parameters for JSON-RPC requests.
#[derive(Debug, Deserialize)]
struct ToolCallParams {
    /// Tool name.
    name: String,
    /// Raw JSON arguments; missing arguments decode as null.
    #[serde(default)]
    arguments: Value,
}

/// Resource read parameters for JSON-RPC requests.
#[derive(Debug, Deserialize)]
struct ResourceReadParams {
    /// Resource URI.
    uri: String,
}

/// Tool list response payload.
#[derive(Debug, Serialize)]
struct ToolListResult {
    /// Registered tool definitions.
    tools: Vec<ToolDefinition>,
}

/// Resource list response payload.
#[derive(Debug, Serialize)]
struct ResourceListResult {
    /// Registered resource definitions.
    resources: Vec<ResourceDefinition>,
}

/// Tool call response payload.
#[derive(Debug, Serialize)]
struct ToolCallResult {
    /// Tool output content.
    content: Vec<ToolContent>,
}

/// Tool output payloads for JSON-RPC responses.
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ToolContent {
    /// JSON tool output.
    Json {
        /// JSON payload.
        json: Value,
    },
}

/// Protocol-level failure with its JSON-RPC code and HTTP status.
struct RpcFailure {
    /// HTTP status paired with the code.
    status: StatusCode,
    /// JSON-RPC error code.
    code: i64,
    /// Human-readable message.
    message: String,
}

impl RpcFailure {
    /// Builds a protocol failure.
    fn new(status: StatusCode, code: i64, message: impl Into<String>) -> Self {
        Self {
            status,
            code,
            message: message.into(),
        }
    }
}

/// Parses a raw payload and dispatches it.
///
/// Returns `None` for notifications, which receive no response.
async fn dispatch_bytes(
    state: &Arc<ServerState>,
    bytes: &[u8],
) -> Option<(StatusCode, JsonRpcResponse)> {
    let request_bytes = bytes.len();
    if request_bytes > state.max_body_bytes {
        let response = error_response(Value::Null, -32070, "request body too large");
        record_request(state, RequestMethod::Invalid, None, None, request_bytes, &response);
        return Some((StatusCode::PAYLOAD_TOO_LARGE, response));
    }
    match serde_json::from_slice::<JsonRpcRequest>(bytes) {
        Ok(request) => handle_request(state, request, request_bytes).await,
        Err(_) => {
            let response = error_response(Value::Null, -32600, "invalid json-rpc request");
            record_request(state, RequestMethod::Invalid, None, None, request_bytes, &response);
            Some((StatusCode::BAD_REQUEST, response))
        }
    }
}

/// Dispatches one parsed JSON-RPC request.
async fn handle_request(
    state: &Arc<ServerState>,
    request: JsonRpcRequest,
    request_bytes: usize,
) -> Option<(StatusCode, JsonRpcResponse)> {
    let JsonRpcRequest {
        jsonrpc,
        id,
        method,
        params,
    } = request;
    if jsonrpc != "2.0" {
        let response = error_response(id, -32600, "invalid json-rpc version");
        record_request(state, RequestMethod::Invalid, None, None, request_bytes, &response);
        return Some((StatusCode::BAD_REQUEST, response));
    }
    if method.starts_with("notifications/") {
        return None;
    }
    let mut tool = None;
    let mut error_kind = None;
    let (request_method, result) = match method.as_str() {
        "initialize" => (RequestMethod::Initialize, Ok(initialize_result(state))),
        "ping" => (RequestMethod::Ping, Ok(json!({}))),
        "tools/list" => (RequestMethod::ToolsList, list_tools(state)),
        "tools/call" => {
            let (called, kind, result) = call_tool(state, params).await;
            tool = called;
            error_kind = kind;
            (RequestMethod::ToolsCall, result)
        }
        "resources/list" => (RequestMethod::ResourcesList, list_resources(state)),
        "resources/read" => (RequestMethod::ResourcesRead, read_resource(state, params).await),
        _ => (
            RequestMethod::Other,
            Err(RpcFailure::new(StatusCode::BAD_REQUEST, -32601, "method not found")),
        ),
    };
    let (status, response) = match result {
        Ok(value) => (StatusCode::OK, success_response(id, value)),
        Err(failure) => (failure.status, error_response(id, failure.code, failure.message)),
    };
    record_request(state, request_method, tool, error_kind, request_bytes, &response);
    Some((status, response))
}

/// Builds the MCP initialize result.
fn initialize_result(state: &ServerState) -> Value {
    json!({
        "protocolVersion": MCP_PROTOCOL_VERSION,
        "capabilities": {
            "tools": {},
            "resources": {},
        },
        "serverInfo": {
            "name": state.context.server_name,
            "version": env!("CARGO_PKG_VERSION"),
        },
    })
}

/// Builds the tools/list result.
fn list_tools(state: &ServerState) -> Result<Value, RpcFailure> {
    serde_json::to_value(ToolListResult {
        tools: state.tools.definitions(),
    })
    .map_err(|_| RpcFailure::new(StatusCode::OK, -32060, "serialization failed"))
}

/// Builds the resources/list result.
fn list_resources(state: &ServerState) -> Result<Value, RpcFailure> {
    serde_json::to_value(ResourceListResult {
        resources: state.resources.definitions(),
    })
    .map_err(|_| RpcFailure::new(StatusCode::OK, -32060, "serialization failed"))
}

/// Runs a tools/call request through the registry.
async fn call_tool(
    state: &Arc<ServerState>,
    params: Option<Value>,
) -> (Option<ToolName>, Option<&'static str>, Result<Value, RpcFailure>) {
    let params = params.unwrap_or(Value::Null);
    let Ok(call) = serde_json::from_value::<ToolCallParams>(params) else {
        let failure = RpcFailure::new(StatusCode::BAD_REQUEST, -32602, "invalid tool params");
        return (None, None, Err(failure));
    };
    let Some(tool) = ToolName::parse(&call.name) else {
        let failure = RpcFailure::new(StatusCode::BAD_REQUEST, -32601, "unknown tool");
        return (None, None, Err(failure));
    };
    let Some(handler) = state.tools.handler(tool) else {
        let failure = RpcFailure::new(StatusCode::BAD_REQUEST, -32601, "tool not enabled");
        return (Some(tool), None, Err(failure));
    };
    // MCP allows tools/call without arguments; handlers decode objects.
    let arguments = if call.arguments.is_null() {
        Value::Object(serde_json::Map::new())
    } else {
        call.arguments
    };
    let value = handler(arguments).await;
    let kind = failure_kind(&value);
    let result = serde_json::to_value(ToolCallResult {
        content: vec![ToolContent::Json {
            json: value,
        }],
    })
    .map_err(|_| RpcFailure::new(StatusCode::OK, -32060, "serialization failed"));
    (Some(tool), kind, result)
}

/// Runs a resources/read request through the registry.
async fn read_resource(
    state: &Arc<ServerState>,
    params: Option<Value>,
) -> Result<Value, RpcFailure> {
    let params = params.unwrap_or(Value::Null);
    let Ok(read) = serde_json::from_value::<ResourceReadParams>(params) else {
        return Err(RpcFailure::new(StatusCode::BAD_REQUEST, -32602, "invalid resource params"));
    };
    let Some(resource) = ResourceName::parse_uri(&read.uri) else {
        return Err(RpcFailure::new(StatusCode::BAD_REQUEST, -32601, "unknown resource"));
    };
    let Some(handler) = state.resources.handler(resource) else {
        return Err(RpcFailure::new(StatusCode::BAD_REQUEST, -32601, "resource not enabled"));
    };
    let text = handler().await;
    let mime_type = state
        .resources
        .definitions()
        .into_iter()
        .find(|definition| definition.uri == read.uri)
        .map_or_else(|| "text/plain".to_string(), |definition| definition.mime_type);
    Ok(json!({
        "contents": [{
            "uri": read.uri,
            "mimeType": mime_type,
            "text": text,
        }]
    }))
}

/// Extracts the envelope kind label from a tool result, when it is a failure.
fn failure_kind(value: &Value) -> Option<&'static str> {
    if value.get("error").and_then(Value::as_bool) != Some(true) {
        return None;
    }
    match value.get("kind").and_then(Value::as_str) {
        Some("connection") => Some("connection"),
        Some("not_found") => Some("not_found"),
        Some("validation") => Some("validation"),
        Some("operation") => Some("operation"),
        _ => None,
    }
}

/// Builds a successful JSON-RPC response.
fn success_response(id: Value, result: Value) -> JsonRpcResponse {
    JsonRpcResponse {
        jsonrpc: "2.0",
        id,
        result: Some(result),
        error: None,
    }
}

/// Builds a failed JSON-RPC response.
fn error_response(id: Value, code: i64, message: impl Into<String>) -> JsonRpcResponse {
    JsonRpcResponse {
        jsonrpc: "2.0",
        id,
        result: None,
        error: Some(JsonRpcError {
            code,
            message: message.into(),
        }),
    }
}

/// Emits the audit record for one dispatched request.
fn record_request(
    state: &ServerState,
    method: RequestMethod,
    tool: Option<ToolName>,
    error_kind: Option<&'static str>,
    request_bytes: usize,
    response: &JsonRpcResponse,
) {
    let error_code = response.error.as_ref().map(|error| error.code);
    let outcome = if error_code.is_some() || error_kind.is_some() {
        RequestOutcome::Error
    } else {
        RequestOutcome::Ok
    };
    let response_bytes = serde_json::to_vec(response).map_or(0, |payload| payload.len());
    let request_id = match &response.id {
        Value::Null => None,
        Value::String(id) => Some(id.clone()),
        other => Some(other.to_string()),
    };
    let event = RequestAuditEvent::new(RequestAuditEventParams {
        request_id,
        transport: state.transport,
        method,
        tool,
        outcome,
        error_code,
        error_kind,
        request_bytes,
        response_bytes,
    });
    state.context.audit.record(&event);
}

// ============================================================================
// SECTION: Framing Helpers
// ============================================================================

/// Reads a framed stdio payload using MCP Content-Length headers.
///
/// Returns `Ok(None)` when the stream closes cleanly between frames.
fn read_framed(
    reader: &mut BufReader<impl Read>,
    max_body_bytes: usize,
) -> Result<Option<Vec<u8>>, McpServerError> {
    let mut content_length: Option<usize> = None;
    let mut line = String::new();
    let mut mid_frame = false;
    loop {
        line.clear();
        let bytes = reader
            .read_line(&mut line)
            .map_err(|_| McpServerError::Transport("stdio read failed".to_string()))?;
        if bytes == 0 {
            if mid_frame {
                return Err(McpServerError::Transport("stdio closed mid-frame".to_string()));
            }
            return Ok(None);
        }
        mid_frame = true;
        if line.trim().is_empty() {
            break;
        }
        if let Some(value) = line.strip_prefix("Content-Length:") {
            let parsed = value
                .trim()
                .parse::<usize>()
                .map_err(|_| McpServerError::Transport("invalid content length".to_string()))?;
            content_length = Some(parsed);
        }
    }
    let len = content_length
        .ok_or_else(|| McpServerError::Transport("missing content length".to_string()))?;
    if len > max_body_bytes {
        return Err(McpServerError::Transport("payload too large".to_string()));
    }
    let mut buf = vec![0u8; len];
    reader
        .read_exact(&mut buf)
        .map_err(|_| McpServerError::Transport("stdio read failed".to_string()))?;
    Ok(Some(buf))
}

/// Writes a framed stdio payload using MCP Content-Length headers.
fn write_framed(writer: &mut impl Write, payload: &[u8]) -> Result<(), McpServerError> {
    let header = format!("Content-Length: {}\r\n\r\n", payload.len());
    writer
        .write_all(header.as_bytes())
        .map_err(|_| McpServerError::Transport("stdio write failed".to_string()))?;
    writer
        .write_all(payload)
        .map_err(|_| McpServerError::Transport("stdio write failed".to_string()))?;
    writer.flush().map_err(|_| McpServerError::Transport("stdio write failed".to_string()))
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// MCP server errors.
#[derive(Debug, thiserror::Error)]
pub enum McpServerError {
    /// Configuration errors.
    #[error("config error: {0}")]
    Config(String),
    /// Initialization errors.
    #[error("init error: {0}")]
    Init(String),
    /// Transport errors.
    #[error("transport error: {0}")]
    Transport(String),
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    #![allow(
        clippy::panic,
        clippy::unwrap_used,
        clippy::expect_used,
        reason = "Test fixtures use explicit asserts and unwraps for clarity."
    )]

    use std::io::Cursor;
    use std::time::Duration;

    use yamcs_client::ClientConfig;

    use super::*;
    use crate::audit::NoopAuditSink;
    use crate::config::SubsystemsConfig;

    fn test_state(max_body_bytes: usize) -> Arc<ServerState> {
        let config = ClientConfig {
            url: "http://127.0.0.1:9".to_string(),
            instance: "simulator".to_string(),
            username: None,
            password: None,
            timeout: Duration::from_secs(1),
        };
        let context = Arc::new(SessionContext {
            sessions: SessionManager::new(config),
            default_instance: "simulator".to_string(),
            server_name: "yamcs-mcp".to_string(),
            url: "http://127.0.0.1:9".to_string(),
            enabled_subsystems: SubsystemsConfig::default().enabled_labels(),
            audit: Arc::new(NoopAuditSink),
        });
        let mut tools = ToolRegistry::new();
        let mut resources = ResourceRegistry::new();
        subsystems::register_enabled(
            &SubsystemsConfig::default(),
            &mut tools,
            &mut resources,
            &context,
        )
        .unwrap();
        let (sse_events, _) = broadcast::channel(8);
        Arc::new(ServerState {
            context,
            tools,
            resources,
            transport: ServerTransport::Stdio,
            max_body_bytes,
            sse_events,
        })
    }

    async fn dispatch(state: &Arc<ServerState>, payload: Value) -> (StatusCode, Value) {
        let bytes = serde_json::to_vec(&payload).unwrap();
        let (status, response) = dispatch_bytes(state, &bytes).await.expect("response expected");
        (status, serde_json::to_value(&response).unwrap())
    }

    #[tokio::test]
    async fn initialize_advertises_protocol_and_server_info() {
        let state = test_state(1024 * 1024);
        let (status, response) = dispatch(
            &state,
            json!({ "jsonrpc": "2.0", "id": 1, "method": "initialize", "params": {} }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let result = &response["result"];
        assert_eq!(result["protocolVersion"], "2024-11-05");
        assert_eq!(result["serverInfo"]["name"], "yamcs-mcp");
        assert!(result["capabilities"]["tools"].is_object());
        assert!(result["capabilities"]["resources"].is_object());
    }

    #[tokio::test]
    async fn ping_returns_an_empty_result() {
        let state = test_state(1024 * 1024);
        let (status, response) =
            dispatch(&state, json!({ "jsonrpc": "2.0", "id": 7, "method": "ping" })).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(response["result"], json!({}));
        assert_eq!(response["id"], 7);
    }

    #[tokio::test]
    async fn notifications_receive_no_response() {
        let state = test_state(1024 * 1024);
        let payload =
            serde_json::to_vec(&json!({ "jsonrpc": "2.0", "method": "notifications/initialized" }))
                .unwrap();
        assert!(dispatch_bytes(&state, &payload).await.is_none());
    }

    #[tokio::test]
    async fn unknown_methods_map_to_method_not_found() {
        let state = test_state(1024 * 1024);
        let (status, response) =
            dispatch(&state, json!({ "jsonrpc": "2.0", "id": 2, "method": "prompts/list" })).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(response["error"]["code"], -32601);
    }

    #[tokio::test]
    async fn malformed_payloads_map_to_invalid_request() {
        let state = test_state(1024 * 1024);
        let (status, response) =
            dispatch_bytes(&state, b"{not json").await.expect("response expected");
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["error"]["code"], -32600);
        assert_eq!(value["id"], Value::Null);
    }

    #[tokio::test]
    async fn oversized_bodies_are_rejected() {
        let state = test_state(16);
        let (status, response) = dispatch(
            &state,
            json!({ "jsonrpc": "2.0", "id": 3, "method": "ping", "params": {} }),
        )
        .await;
        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(response["error"]["code"], -32070);
    }

    #[tokio::test]
    async fn wrong_jsonrpc_version_is_rejected() {
        let state = test_state(1024 * 1024);
        let (status, response) =
            dispatch(&state, json!({ "jsonrpc": "1.0", "id": 4, "method": "ping" })).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(response["error"]["code"], -32600);
    }

    #[tokio::test]
    async fn tools_list_returns_contract_definitions() {
        let state = test_state(1024 * 1024);
        let (status, response) =
            dispatch(&state, json!({ "jsonrpc": "2.0", "id": 5, "method": "tools/list" })).await;
        assert_eq!(status, StatusCode::OK);
        let tools = response["result"]["tools"].as_array().unwrap();
        assert_eq!(tools.len(), ToolName::all().len());
        assert_eq!(tools[0]["name"], "server_health_check");
        assert!(tools[0]["inputSchema"].is_object());
    }

    #[tokio::test]
    async fn tools_call_works_without_a_yamcs_connection() {
        let state = test_state(1024 * 1024);
        let (status, response) = dispatch(
            &state,
            json!({
                "jsonrpc": "2.0",
                "id": 6,
                "method": "tools/call",
                "params": { "name": "server_health_check" }
            }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let payload = &response["result"]["content"][0];
        assert_eq!(payload["type"], "json");
        assert_eq!(payload["json"]["status"], "degraded");
        assert_eq!(payload["json"]["server"], "yamcs-mcp");
    }

    #[tokio::test]
    async fn unknown_tools_are_protocol_errors() {
        let state = test_state(1024 * 1024);
        let (status, response) = dispatch(
            &state,
            json!({
                "jsonrpc": "2.0",
                "id": 8,
                "method": "tools/call",
                "params": { "name": "no_such_tool", "arguments": {} }
            }),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(response["error"]["code"], -32601);
    }

    #[tokio::test]
    async fn resources_list_returns_contract_definitions() {
        let state = test_state(1024 * 1024);
        let (status, response) =
            dispatch(&state, json!({ "jsonrpc": "2.0", "id": 9, "method": "resources/list" }))
                .await;
        assert_eq!(status, StatusCode::OK);
        let resources = response["result"]["resources"].as_array().unwrap();
        assert_eq!(resources.len(), ResourceName::all().len());
        assert_eq!(resources[0]["mimeType"], "text/plain");
    }

    #[tokio::test]
    async fn unknown_resource_uris_are_protocol_errors() {
        let state = test_state(1024 * 1024);
        let (status, response) = dispatch(
            &state,
            json!({
                "jsonrpc": "2.0",
                "id": 10,
                "method": "resources/read",
                "params": { "uri": "nope://missing" }
            }),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(response["error"]["code"], -32601);
    }

    #[test]
    fn read_framed_rejects_payload_over_limit() {
        let payload = br#"{"jsonrpc":"2.0","id":1,"method":"tools/list"}"#;
        let framed = format!(
            "Content-Length: {}\r\n\r\n{}",
            payload.len(),
            String::from_utf8_lossy(payload)
        );
        let mut reader = BufReader::new(Cursor::new(framed.into_bytes()));
        let result = read_framed(&mut reader, payload.len() - 1);
        assert!(result.is_err());
    }

    #[test]
    fn read_framed_accepts_payload_at_limit() {
        let payload = br#"{"jsonrpc":"2.0","id":1,"method":"tools/list"}"#;
        let framed = format!(
            "Content-Length: {}\r\n\r\n{}",
            payload.len(),
            String::from_utf8_lossy(payload)
        );
        let mut reader = BufReader::new(Cursor::new(framed.into_bytes()));
        let bytes = read_framed(&mut reader, payload.len()).expect("payload read");
        assert_eq!(bytes.as_deref(), Some(payload.as_slice()));
    }

    #[test]
    fn read_framed_reports_clean_close_between_frames() {
        let mut reader = BufReader::new(Cursor::new(Vec::new()));
        let result = read_framed(&mut reader, 1024).expect("clean close");
        assert!(result.is_none());
    }

    #[test]
    fn read_framed_rejects_close_mid_frame() {
        let mut reader = BufReader::new(Cursor::new(b"Content-Length: 10\r\n".to_vec()));
        assert!(read_framed(&mut reader, 1024).is_err());
    }
}
