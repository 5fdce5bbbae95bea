// crates/yamcs-client/tests/common/mod.rs
// ============================================================================
// Module: Common Test Fixtures
// Description: Local fake Yamcs server and client configuration fixtures.
// Purpose: Exercise the client against real HTTP without a Yamcs install.
// Dependencies: tiny_http, yamcs-client
// ============================================================================

//! ## Overview
//! The fake server answers a fixed number of requests from a static routing
//! table and records everything it receives, so tests can assert both the
//! decoded results and the exact requests Yamcs would have seen.

#![allow(dead_code, reason = "Shared test helpers may be unused in some cases.")]

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::thread;
use std::time::Duration;

use tiny_http::Header;
use tiny_http::Response;
use tiny_http::Server;
use yamcs_client::ClientConfig;

// ============================================================================
// SECTION: Routing Table
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
    /// Authorization header value, when present.
    pub authorization: Option<String>,
    /// Request body.
    pub body: String,
}

// ============================================================================
// SECTION: Fake Yamcs Server
// ============================================================================

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
            let authorization = request
                .headers()
                .iter()
                .find(|header| header.field.equiv("Authorization"))
                .map(|header| header.value.as_str().to_string());
            let path = request.url().split('?').next().unwrap_or_default().to_string();
            received.push(ReceivedRequest {
                method: request.method().to_string(),
                url: request.url().to_string(),
                authorization,
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

// ============================================================================
// SECTION: Fixtures
// ============================================================================

/// Server info body answered on `/api` during connect.
pub const SERVER_INFO_BODY: &str = r#"{"serverId":"yamcs-test","yamcsVersion":"5.12.1"}"#;

/// Route answering the connect-time server info request.
#[must_use]
pub fn server_info_route() -> Route {
    Route { path: "/api", status: 200, body: SERVER_INFO_BODY }
}

/// Client configuration pointing at the fake server, without credentials.
#[must_use]
pub fn test_config(url: &str) -> ClientConfig {
    ClientConfig {
        url: url.to_string(),
        instance: String::from("simulator"),
        username: None,
        password: None,
        timeout: Duration::from_secs(5),
    }
}

/// Reserves a port with no listener behind it.
#[must_use]
pub fn unreachable_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}
