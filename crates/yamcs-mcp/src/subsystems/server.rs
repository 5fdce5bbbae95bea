// crates/yamcs-mcp/src/subsystems/server.rs
// ============================================================================
// Module: Server Subsystem
// Description: Bridge-level diagnostics tools.
// Purpose: Report bridge health and probe Yamcs connectivity on demand.
// Dependencies: yamcs-client, yamcs-contract
// ============================================================================

//! ## Overview
//! The server subsystem is always registered, even when every other
//! subsystem is switched off, so a deployment can be diagnosed over the same
//! channel it serves. `server_health_check` never touches the network;
//! `server_test_connection` always does, discarding any cached session
//! first.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;

use serde_json::Value;
use serde_json::json;
use yamcs_contract::ToolName;

use crate::envelope::ErrorEnvelope;
use crate::registry::RegistryError;
use crate::registry::ResourceRegistry;
use crate::registry::SessionContext;
use crate::registry::ToolRegistry;
use crate::subsystems::acquire;
use crate::subsystems::bind_tool;

// ============================================================================
// SECTION: Registration
// ============================================================================

/// Registers the server diagnostics tools.
///
/// # Errors
///
/// Returns [`RegistryError`] when a tool name is already registered.
pub fn register(
    tools: &mut ToolRegistry,
    _resources: &mut ResourceRegistry,
    context: &Arc<SessionContext>,
) -> Result<(), RegistryError> {
    bind_tool(tools, context, ToolName::ServerHealthCheck, health_check)?;
    bind_tool(tools, context, ToolName::ServerTestConnection, test_connection)?;
    Ok(())
}

// ============================================================================
// SECTION: Tool Handlers
// ============================================================================

/// Reports bridge health without contacting Yamcs.
async fn health_check(
    context: Arc<SessionContext>,
    _payload: Value,
) -> Result<Value, ErrorEnvelope> {
    let status = if context.sessions.peek().await.is_some() { "connected" } else { "degraded" };
    Ok(json!({
        "server": context.server_name,
        "version": env!("CARGO_PKG_VERSION"),
        "status": status,
        "yamcs_url": context.url,
        "yamcs_instance": context.default_instance,
        "subsystems": context.enabled_subsystems,
    }))
}

/// Connects to Yamcs and reports its identity and version.
///
/// Any cached session is discarded first, so the result reflects the server
/// as it is now rather than as it was at startup.
async fn test_connection(
    context: Arc<SessionContext>,
    _payload: Value,
) -> Result<Value, ErrorEnvelope> {
    context.sessions.reset().await;
    let client = acquire(ToolName::ServerTestConnection, &context).await?;
    let info = client.server_info();
    Ok(json!({
        "connected": true,
        "yamcs_url": context.url,
        "server_id": info.server_id,
        "yamcs_version": info.yamcs_version,
        "message": "Connection successful",
    }))
}
