// crates/yamcs-mcp/src/subsystems/mdb.rs
// ============================================================================
// Module: Mission Database Subsystem
// Description: Read-only views over parameters, commands, and space systems.
// Purpose: Let assistants browse the MDB without touching live telemetry.
// Dependencies: yamcs-client, yamcs-contract
// ============================================================================

//! ## Overview
//! Every MDB tool is read-only. List tools page through definitions with a
//! bounded limit; describe tools fetch one definition by qualified name. The
//! two overview resources count definitions per top-level space system so an
//! assistant can orient itself before searching.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::Deserialize;
use serde_json::Value;
use serde_json::json;
use yamcs_client::YamcsError;
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
use crate::subsystems::normalize_limit;
use crate::subsystems::yamcs_failure;

/// Fetch bound for overview resources that need the full definition set.
const OVERVIEW_FETCH_LIMIT: u32 = 10_000;

// ============================================================================
// SECTION: Registration
// ============================================================================

/// Registers the Mission Database tools and resources.
///
/// # Errors
///
/// Returns [`RegistryError`] when a tool or resource is already registered.
pub fn register(
    tools: &mut ToolRegistry,
    resources: &mut ResourceRegistry,
    context: &Arc<SessionContext>,
) -> Result<(), RegistryError> {
    bind_tool(tools, context, ToolName::MdbListParameters, list_parameters)?;
    bind_tool(tools, context, ToolName::MdbDescribeParameter, describe_parameter)?;
    bind_tool(tools, context, ToolName::MdbListCommands, list_commands)?;
    bind_tool(tools, context, ToolName::MdbDescribeCommand, describe_command)?;
    bind_tool(tools, context, ToolName::MdbListSpaceSystems, list_space_systems)?;
    bind_resource(resources, context, ResourceName::MdbParameters, parameters_overview)?;
    bind_resource(resources, context, ResourceName::MdbCommands, commands_overview)?;
    Ok(())
}

// ============================================================================
// SECTION: Requests
// ============================================================================

/// Arguments shared by the MDB list tools.
#[derive(Debug, Deserialize)]
struct ListRequest {
    /// Instance override; blank falls back to the configured default.
    #[serde(default)]
    instance: Option<String>,
    /// Space system filter, e.g. `/YSS/SIMULATOR`.
    #[serde(default)]
    system: Option<String>,
    /// Free-text search term.
    #[serde(default)]
    search: Option<String>,
    /// Page size.
    #[serde(default)]
    limit: Option<u32>,
}

/// Arguments for `mdb_describe_parameter`.
#[derive(Debug, Deserialize)]
struct DescribeParameterRequest {
    /// Qualified parameter name.
    parameter: String,
    /// Instance override.
    #[serde(default)]
    instance: Option<String>,
}

/// Arguments for `mdb_describe_command`.
#[derive(Debug, Deserialize)]
struct DescribeCommandRequest {
    /// Qualified command name.
    command: String,
    /// Instance override.
    #[serde(default)]
    instance: Option<String>,
}

/// Arguments for tools that only take an instance override.
#[derive(Debug, Deserialize)]
struct InstanceRequest {
    /// Instance override.
    #[serde(default)]
    instance: Option<String>,
}

// ============================================================================
// SECTION: Tool Handlers
// ============================================================================

/// Lists parameter definitions with optional system and search filters.
async fn list_parameters(
    context: Arc<SessionContext>,
    payload: Value,
) -> Result<Value, ErrorEnvelope> {
    const TOOL: ToolName = ToolName::MdbListParameters;
    let request: ListRequest = decode(TOOL, payload)?;
    let limit = normalize_limit(TOOL, request.limit)?;
    let client = acquire(TOOL, &context).await?;
    let instance = context.instance(request.instance.as_deref());
    let parameters = client
        .list_parameters(instance, request.system.as_deref(), request.search.as_deref(), limit)
        .await
        .map_err(yamcs_failure(TOOL))?;
    let entries: Vec<Value> = parameters.iter().map(projection::parameter_summary).collect();
    Ok(json!({
        "instance": instance,
        "count": entries.len(),
        "parameters": entries,
    }))
}

/// Fetches one parameter definition by qualified name.
async fn describe_parameter(
    context: Arc<SessionContext>,
    payload: Value,
) -> Result<Value, ErrorEnvelope> {
    const TOOL: ToolName = ToolName::MdbDescribeParameter;
    let request: DescribeParameterRequest = decode(TOOL, payload)?;
    let client = acquire(TOOL, &context).await?;
    let instance = context.instance(request.instance.as_deref());
    let parameter = client
        .get_parameter(instance, &request.parameter)
        .await
        .map_err(yamcs_failure(TOOL))?;
    Ok(projection::parameter_detail(&parameter))
}

/// Lists command definitions with optional system and search filters.
async fn list_commands(
    context: Arc<SessionContext>,
    payload: Value,
) -> Result<Value, ErrorEnvelope> {
    const TOOL: ToolName = ToolName::MdbListCommands;
    let request: ListRequest = decode(TOOL, payload)?;
    let limit = normalize_limit(TOOL, request.limit)?;
    let client = acquire(TOOL, &context).await?;
    let instance = context.instance(request.instance.as_deref());
    let commands = client
        .list_commands(instance, request.system.as_deref(), request.search.as_deref(), limit)
        .await
        .map_err(yamcs_failure(TOOL))?;
    let entries: Vec<Value> = commands.iter().map(projection::command_summary).collect();
    Ok(json!({
        "instance": instance,
        "count": entries.len(),
        "commands": entries,
    }))
}

/// Fetches one command definition by qualified name.
async fn describe_command(
    context: Arc<SessionContext>,
    payload: Value,
) -> Result<Value, ErrorEnvelope> {
    const TOOL: ToolName = ToolName::MdbDescribeCommand;
    let request: DescribeCommandRequest = decode(TOOL, payload)?;
    let client = acquire(TOOL, &context).await?;
    let instance = context.instance(request.instance.as_deref());
    let command = client
        .get_command(instance, &request.command)
        .await
        .map_err(yamcs_failure(TOOL))?;
    Ok(projection::command_detail(&command))
}

/// Lists the space system tree.
async fn list_space_systems(
    context: Arc<SessionContext>,
    payload: Value,
) -> Result<Value, ErrorEnvelope> {
    const TOOL: ToolName = ToolName::MdbListSpaceSystems;
    let request: InstanceRequest = decode(TOOL, payload)?;
    let client = acquire(TOOL, &context).await?;
    let instance = context.instance(request.instance.as_deref());
    let systems = client.list_space_systems(instance).await.map_err(yamcs_failure(TOOL))?;
    let entries: Vec<Value> = systems.iter().map(projection::space_system_summary).collect();
    Ok(json!({
        "instance": instance,
        "count": entries.len(),
        "space_systems": entries,
    }))
}

// ============================================================================
// SECTION: Resources
// ============================================================================

/// Renders the parameter overview for the default instance.
async fn parameters_overview(context: Arc<SessionContext>) -> Result<String, YamcsError> {
    let client = context.sessions.acquire().await?;
    let parameters = client
        .list_parameters(&context.default_instance, None, None, OVERVIEW_FETCH_LIMIT)
        .await?;
    let names: Vec<&str> =
        parameters.iter().filter_map(|parameter| parameter.qualified_name.as_deref()).collect();
    Ok(category_summary("Parameters", &context.default_instance, &names))
}

/// Renders the command overview for the default instance.
async fn commands_overview(context: Arc<SessionContext>) -> Result<String, YamcsError> {
    let client = context.sessions.acquire().await?;
    let commands = client
        .list_commands(&context.default_instance, None, None, OVERVIEW_FETCH_LIMIT)
        .await?;
    let names: Vec<&str> =
        commands.iter().filter_map(|command| command.qualified_name.as_deref()).collect();
    Ok(category_summary("Commands", &context.default_instance, &names))
}

/// Counts qualified names per top-level space system and renders the
/// overview text.
fn category_summary(category: &str, instance: &str, qualified_names: &[&str]) -> String {
    let mut systems: BTreeMap<&str, usize> = BTreeMap::new();
    for name in qualified_names {
        if let Some(system) = name.split('/').nth(1) {
            *systems.entry(system).or_insert(0) += 1;
        }
    }
    let mut lines = vec![
        format!("Mission Database {category} Summary ({instance}):"),
        format!("Total {category}: {}", qualified_names.len()),
        String::new(),
        format!("{category} by System:"),
    ];
    for (system, count) in &systems {
        lines.push(format!("  {system}: {count}"));
    }
    lines.join("\n")
}

// ============================================================================
// SECTION: Tests
// ============================================================================
