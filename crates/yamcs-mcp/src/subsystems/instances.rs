// crates/yamcs-mcp/src/subsystems/instances.rs
// ============================================================================
// Module: Instances Subsystem
// Description: Yamcs instance listing, inspection, and lifecycle control.
// Purpose: Start and stop instances and report what each one is running.
// Dependencies: yamcs-client, yamcs-contract
// ============================================================================

//! ## Overview
//! Instances are the top-level deployment unit in Yamcs; everything else
//! hangs off one. Listing and describing never name an instance explicitly,
//! but the lifecycle tools do: starting or stopping the wrong instance takes
//! down a whole mission view, so those two refuse to fall back to the
//! configured default.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;

use serde::Deserialize;
use serde_json::Value;
use serde_json::json;
use yamcs_client::YamcsError;
use yamcs_client::types::InstanceInfo;
use yamcs_contract::ResourceName;
use yamcs_contract::ToolName;

use crate::envelope::ErrorEnvelope;
use crate::projection;
use crate::registry::RegistryError;
use crate::registry::ResourceRegistry;
use crate::registry::SessionContext;
use crate::registry::ToolRegistry;
use crate::subsystems::acquire;
use crate::subsystems::bind_resource;
use crate::subsystems::bind_tool;
use crate::subsystems::decode;
use crate::subsystems::yamcs_failure;

// ============================================================================
// SECTION: Registration
// ============================================================================

/// Registers the instance tools and resources.
///
/// # Errors
///
/// Returns [`RegistryError`] when a tool or resource is already registered.
pub fn register(
    tools: &mut ToolRegistry,
    resources: &mut ResourceRegistry,
    context: &Arc<SessionContext>,
) -> Result<(), RegistryError> {
    bind_tool(tools, context, ToolName::InstancesList, list)?;
    bind_tool(tools, context, ToolName::InstancesDescribe, describe)?;
    bind_tool(tools, context, ToolName::InstancesStart, start)?;
    bind_tool(tools, context, ToolName::InstancesStop, stop)?;
    bind_resource(resources, context, ResourceName::InstancesList, overview)?;
    Ok(())
}

// ============================================================================
// SECTION: Requests
// ============================================================================

/// Arguments for `instances_describe`.
#[derive(Debug, Deserialize)]
struct DescribeRequest {
    /// Instance override.
    #[serde(default)]
    instance: Option<String>,
}

/// Arguments for the lifecycle tools, which always name their target.
#[derive(Debug, Deserialize)]
struct TargetRequest {
    /// Instance to start or stop.
    instance: String,
}

// ============================================================================
// SECTION: Tool Handlers
// ============================================================================

/// Lists every instance on the server.
async fn list(context: Arc<SessionContext>, _payload: Value) -> Result<Value, ErrorEnvelope> {
    const TOOL: ToolName = ToolName::InstancesList;
    let client = acquire(TOOL, &context).await?;
    let instances = client.list_instances().await.map_err(yamcs_failure(TOOL))?;
    let entries: Vec<Value> = instances.iter().map(projection::instance_summary).collect();
    Ok(json!({
        "count": entries.len(),
        "instances": entries,
    }))
}

/// Describes one instance, including its processors and mission database.
async fn describe(context: Arc<SessionContext>, payload: Value) -> Result<Value, ErrorEnvelope> {
    const TOOL: ToolName = ToolName::InstancesDescribe;
    let request: DescribeRequest = decode(TOOL, payload)?;
    let client = acquire(TOOL, &context).await?;
    let instance = context.instance(request.instance.as_deref());
    let info = client.get_instance(instance).await.map_err(yamcs_failure(TOOL))?;
    Ok(projection::instance_detail(&info))
}

/// Starts an instance.
async fn start(context: Arc<SessionContext>, payload: Value) -> Result<Value, ErrorEnvelope> {
    const TOOL: ToolName = ToolName::InstancesStart;
    let request: TargetRequest = decode(TOOL, payload)?;
    let client = acquire(TOOL, &context).await?;
    client.start_instance(&request.instance).await.map_err(yamcs_failure(TOOL))?;
    Ok(json!({
        "success": true,
        "instance": request.instance,
        "message": format!("Instance '{}' started", request.instance),
    }))
}

/// Stops an instance.
async fn stop(context: Arc<SessionContext>, payload: Value) -> Result<Value, ErrorEnvelope> {
    const TOOL: ToolName = ToolName::InstancesStop;
    let request: TargetRequest = decode(TOOL, payload)?;
    let client = acquire(TOOL, &context).await?;
    client.stop_instance(&request.instance).await.map_err(yamcs_failure(TOOL))?;
    Ok(json!({
        "success": true,
        "instance": request.instance,
        "message": format!("Instance '{}' stopped", request.instance),
    }))
}

// ============================================================================
// SECTION: Resources
// ============================================================================

/// Renders a one-line summary per instance.
async fn overview(context: Arc<SessionContext>) -> Result<String, YamcsError> {
    let client = context.sessions.acquire().await?;
    let instances = client.list_instances().await?;
    Ok(render_overview(&instances))
}

/// Renders the instance listing text.
fn render_overview(instances: &[InstanceInfo]) -> String {
    let mut lines = vec!["Yamcs Instances:".to_string()];
    for instance in instances {
        let name = instance.name.as_deref().unwrap_or_default();
        let state = instance.state.as_deref().unwrap_or("UNKNOWN");
        let processors = instance.processors.len();
        let time_info = instance
            .mission_time
            .as_deref()
            .map(|time| format!(" @ {time}"))
            .unwrap_or_default();
        lines.push(format!("  - {name}: {state} [{processors} processors]{time_info}"));
    }
    lines.join("\n")
}

// ============================================================================
// SECTION: Tests
// ============================================================================
