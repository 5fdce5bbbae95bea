// crates/yamcs-mcp/tests/common/mod.rs
// ============================================================================
// Module: Common Test Fixtures
// Description: Fake Yamcs server and registry fixtures for bridge tests.
// Purpose: Drive registered tool and resource handlers end to end over HTTP.
// Dependencies: tiny_http, yamcs-client, yamcs-contract, yamcs-mcp
// ============================================================================

//! ## Overview
//! Tests here exercise the registered handlers exactly as the JSON-RPC layer
//! would invoke them: build a session context pointing at a local fake Yamcs,
//! register the subsystems, fetch a handler from the registry, and await it.
//! The fake server records everything it receives so tests can assert both
//! the projected output and the requests Yamcs would have seen.

#![allow(dead_code, reason = "Shared test helpers may be unused in some cases.")]

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use serde_json::Value;
use tiny_http::Header;
use tiny_http::Response;
use tiny_http::Server;
use yamcs_client::ClientConfig;
use yamcs_client::SessionManager;
use yamcs_contract::ResourceName;
use yamcs_contract::ToolName;
use yamcs_mcp::NoopAuditSink;
use yamcs_mcp::ResourceRegistry;
use yamcs_mcp::SessionContext;
use yamcs_mcp::ToolRegistry;
use yamcs_mcp::config::SubsystemsConfig;
use yamcs_mcp::subsystems;

// ============================================================================
// SECTION: Fake Yamcs Server
// ============================================================================

/// One canned response, matched on the request path without its query.
pub struct Route {
    /// Request path to match, e.g. `/api/instances`.
    pub path: &'static str,
    /// Status code to answer with.
    pub status: u16,
    /// JSON body to answer with.
    pub body: &'static str,
}

/// Request as received by the fake server.
pub struct ReceivedRequest {
    /// HTTP method, uppercase.
    pub method: String,
    /// Full request target including the query string.
    pub url: String,
    /// Request body.
    pub body: String,
}

/// Serves exactly `expected_requests` requests from the routing table and
/// returns the base URL plus a handle yielding the recorded requests.
#[must_use]
pub fn spawn_yamcs(
    routes: Vec<Route>,
    expected_requests: usize,
) -> (String, thread::JoinHandle<Vec<ReceivedRequest>>) {
    let server = Server::http("127.0.0.1:0").unwrap();
    let addr = server.server_addr().to_ip().unwrap();
    let url = format!("http://{addr}");

    let handle = thread::spawn(move || {
        let mut received = Vec::with_capacity(expected_requests);
        for _ in 0..expected_requests {
            let mut request = match server.recv() {
                Ok(request) => request,
                Err(_) => break,
            };
            let mut body = String::new();
            let _ = request.as_reader().read_to_string(&mut body);
            let path = request.url().split('?').next().unwrap_or_default().to_string();
            received.push(ReceivedRequest {
                method: request.method().to_string(),
                url: request.url().to_string(),
                body,
            });
            let route = routes.iter().find(|route| route.path == path);
            let (status, payload) = match route {
                Some(route) => (route.status, route.body),
                None => (500, r#"{"type":"InternalServerErrorException","msg":"unrouted"}"#),
            };
            let content_type =
                Header::from_bytes(&b"Content-Type"[..], &b"application/json"[..]).unwrap();
            let response =
                Response::from_string(payload).with_status_code(status).with_header(content_type);
            let _ = request.respond(response);
        }
        received
    });

    (url, handle)
}

/// Server info body answered on `/api` during connect.
pub const SERVER_INFO_BODY: &str = r#"{"serverId":"yamcs-test","yamcsVersion":"5.12.1"}"#;

/// Route answering the connect-time server info request.
#[must_use]
pub fn server_info_route() -> Route {
    Route { path: "/api", status: 200, body: SERVER_INFO_BODY }
}

/// Reserves a port with no listener behind it.
#[must_use]
pub fn unreachable_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

// ============================================================================
// SECTION: Bridge Fixtures
// ============================================================================

/// Builds a session context pointing at the given Yamcs URL.
#[must_use]
pub fn bridge_context(url: &str) -> Arc<SessionContext> {
    let config = ClientConfig {
        url: url.to_string(),
        instance: String::from("simulator"),
        username: None,
        password: None,
        timeout: Duration::from_secs(5),
    };
    Arc::new(SessionContext {
        sessions: SessionManager::new(config),
        default_instance: String::from("simulator"),
        server_name: String::from("yamcs-mcp"),
        url: url.to_string(),
        enabled_subsystems: SubsystemsConfig::default().enabled_labels(),
        audit: Arc::new(NoopAuditSink),
    })
}

/// Registers every subsystem against the context and returns the registries.
#[must_use]
pub fn bridge_registries(context: &Arc<SessionContext>) -> (ToolRegistry, ResourceRegistry) {
    let mut tools = ToolRegistry::new();
    let mut resources = ResourceRegistry::new();
    subsystems::register_enabled(&SubsystemsConfig::default(), &mut tools, &mut resources, context)
        .expect("registration is conflict-free");
    (tools, resources)
}

/// Invokes a registered tool handler with the given arguments.
pub async fn call_tool(tools: &ToolRegistry, tool: ToolName, arguments: Value) -> Value {
    let handler = tools.handler(tool).expect("tool registered");
    handler(arguments).await
}

/// Invokes a registered resource handler.
pub async fn read_resource(resources: &ResourceRegistry, resource: ResourceName) -> String {
    let handler = resources.handler(resource).expect("resource registered");
    handler().await
}

/// Returns the top-level keys of a JSON object in serialization order.
#[must_use]
pub fn object_keys(value: &Value) -> Vec<String> {
    value.as_object().map(|map| map.keys().cloned().collect()).unwrap_or_default()
}
