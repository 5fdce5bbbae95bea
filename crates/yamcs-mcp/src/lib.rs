// crates/yamcs-mcp/src/lib.rs
// ============================================================================
// Module: Yamcs MCP
// Description: MCP server bridging AI assistants to the Yamcs HTTP API.
// Purpose: Expose mission database, telemetry, commanding, and lifecycle tools.
// Dependencies: yamcs-client, yamcs-contract, axum, tokio
// ============================================================================

//! ## Overview
//! Yamcs MCP exposes a running Yamcs mission control server through MCP tools
//! and resources. All tools are thin wrappers over [`yamcs_client::YamcsClient`]
//! calls; handlers validate arguments, resolve the target instance and
//! processor, and project Yamcs responses into stable assistant-facing shapes.
//! Tool failures are reported as structured envelopes inside successful MCP
//! responses so assistants can read and react to them.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod audit;
pub mod coerce;
pub mod config;
pub mod envelope;
pub mod projection;
pub mod registry;
pub mod server;
pub mod subsystems;
pub mod timearg;

#[cfg(test)]
mod tests {
    //! Test-only lint relaxations for panic-based assertions and debug output.
    #![allow(
        clippy::panic,
        clippy::print_stdout,
        clippy::print_stderr,
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::use_debug,
        clippy::dbg_macro,
        clippy::panic_in_result_fn,
        clippy::unwrap_in_result,
        reason = "Test-only output and panic-based assertions are permitted."
    )]
}

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use audit::AuditSink;
pub use audit::FileAuditSink;
pub use audit::NoopAuditSink;
pub use audit::StderrAuditSink;
pub use config::ServerTransport;
pub use config::YamcsMcpConfig;
pub use envelope::ErrorEnvelope;
pub use envelope::ErrorKind;
pub use registry::ResourceRegistry;
pub use registry::SessionContext;
pub use registry::ToolRegistry;
pub use server::McpServer;
pub use server::McpServerError;
