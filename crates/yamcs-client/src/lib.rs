// crates/yamcs-client/src/lib.rs
// ============================================================================
// Module: Yamcs Client
// Description: Async HTTP client for the Yamcs mission-control API.
// Purpose: Provide typed, authenticated access to Yamcs REST endpoints with
//          session caching for the MCP bridge.
// Dependencies: reqwest, serde, serde_json, thiserror, tokio, url
// ============================================================================

//! ## Overview
//! This crate wraps the Yamcs HTTP API behind typed async methods. The
//! [`YamcsClient`] handles authentication (password grant with bearer reuse),
//! error classification, and decoding of Yamcs protobuf-JSON payloads,
//! including string-encoded 64-bit integers and base64 binaries. The
//! [`SessionManager`] caches one live client and reconnects lazily, so a
//! bridge process can start while Yamcs is down and recover without a
//! restart.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod api;
pub mod client;
pub mod error;
pub mod session;
pub mod types;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use api::AlarmAction;
pub use api::IssueCommandRequest;
pub use client::ClientConfig;
pub use client::YamcsClient;
pub use error::YamcsError;
pub use session::SessionManager;
