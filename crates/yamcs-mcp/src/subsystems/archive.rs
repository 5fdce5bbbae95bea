// crates/yamcs-mcp/src/subsystems/archive.rs
// ============================================================================
// Module: Archive Subsystem
// Description: Historical data retrieval.
// Purpose: Query archived packets, parameter values, commands, and events.
// Dependencies: yamcs-client, yamcs-contract
// ============================================================================

//! ## Overview
//! Archive queries return newest-first pages bounded by the shared limit
//! rules. Time bounds accept ISO-8601 timestamps or the relative keywords
//! `now`, `today`, and `yesterday`, which are resolved to UTC instants
//! before the request leaves the process.

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
use crate::subsystems::normalize_limit;
use crate::subsystems::resolve_time_range;
use crate::subsystems::yamcs_failure;

/// Packet window sampled for the overview resource.
const RECENT_PACKET_WINDOW: u32 = 1000;

// ============================================================================
// SECTION: Registration
// ============================================================================

/// Registers the archive tools and resources.
///
/// # Errors
///
/// Returns [`RegistryError`] when a tool or resource is already registered.
pub fn register(
    tools: &mut ToolRegistry,
    resources: &mut ResourceRegistry,
    context: &Arc<SessionContext>,
) -> Result<(), RegistryError> {
    bind_tool(tools, context, ToolName::ArchiveListPackets, list_packets)?;
    bind_tool(tools, context, ToolName::ArchiveParameterValues, parameter_values)?;
    bind_tool(tools, context, ToolName::ArchiveCommandHistory, command_history)?;
    bind_tool(tools, context, ToolName::ArchiveEvents, events)?;
    bind_resource(resources, context, ResourceName::ArchiveOverview, overview)?;
    Ok(())
}

// ============================================================================
// SECTION: Requests
// ============================================================================

/// Arguments for `archive_list_packets`.
#[derive(Debug, Deserialize)]
struct ListPacketsRequest {
    /// Start of the time range.
    #[serde(default)]
    start: Option<String>,
    /// End of the time range.
    #[serde(default)]
    stop: Option<String>,
    /// Packet name filter.
    #[serde(default)]
    name: Option<String>,
    /// Page size.
    #[serde(default)]
    limit: Option<u32>,
    /// Instance override.
    #[serde(default)]
    instance: Option<String>,
}

/// Arguments for `archive_parameter_values`.
#[derive(Debug, Deserialize)]
struct ParameterValuesRequest {
    /// Fully qualified parameter name.
    parameter: String,
    /// Start of the time range.
    #[serde(default)]
    start: Option<String>,
    /// End of the time range.
    #[serde(default)]
    stop: Option<String>,
    /// Page size.
    #[serde(default)]
    limit: Option<u32>,
    /// Instance override.
    #[serde(default)]
    instance: Option<String>,
}

/// Arguments for `archive_command_history`.
#[derive(Debug, Deserialize)]
struct CommandHistoryRequest {
    /// Substring filter on qualified command names.
    #[serde(default)]
    command: Option<String>,
    /// Start of the time range.
    #[serde(default)]
    start: Option<String>,
    /// End of the time range.
    #[serde(default)]
    stop: Option<String>,
    /// Page size.
    #[serde(default)]
    limit: Option<u32>,
    /// Instance override.
    #[serde(default)]
    instance: Option<String>,
}

/// Arguments for `archive_events`.
#[derive(Debug, Deserialize)]
struct EventsRequest {
    /// Minimum severity filter.
    #[serde(default)]
    severity: Option<String>,
    /// Event source filter.
    #[serde(default)]
    source: Option<String>,
    /// Start of the time range.
    #[serde(default)]
    start: Option<String>,
    /// End of the time range.
    #[serde(default)]
    stop: Option<String>,
    /// Page size.
    #[serde(default)]
    limit: Option<u32>,
    /// Instance override.
    #[serde(default)]
    instance: Option<String>,
}

// ============================================================================
// SECTION: Tool Handlers
// ============================================================================

/// Lists archived telemetry packets.
async fn list_packets(
    context: Arc<SessionContext>,
    payload: Value,
) -> Result<Value, ErrorEnvelope> {
    const TOOL: ToolName = ToolName::ArchiveListPackets;
    let request: ListPacketsRequest = decode(TOOL, payload)?;
    let limit = normalize_limit(TOOL, request.limit)?;
    let (start, stop) =
        resolve_time_range(TOOL, request.start.as_deref(), request.stop.as_deref())?;
    let client = acquire(TOOL, &context).await?;
    let instance = context.instance(request.instance.as_deref());
    let packets = client
        .list_packets(instance, start.as_deref(), stop.as_deref(), request.name.as_deref(), limit)
        .await
        .map_err(yamcs_failure(TOOL))?;
    let entries: Vec<Value> = packets.iter().map(projection::packet_summary).collect();
    Ok(json!({
        "instance": instance,
        "count": entries.len(),
        "packets": entries,
    }))
}

/// Reads archived values for one parameter.
async fn parameter_values(
    context: Arc<SessionContext>,
    payload: Value,
) -> Result<Value, ErrorEnvelope> {
    const TOOL: ToolName = ToolName::ArchiveParameterValues;
    let request: ParameterValuesRequest = decode(TOOL, payload)?;
    let limit = normalize_limit(TOOL, request.limit)?;
    let (start, stop) =
        resolve_time_range(TOOL, request.start.as_deref(), request.stop.as_deref())?;
    let client = acquire(TOOL, &context).await?;
    let instance = context.instance(request.instance.as_deref());
    let samples = client
        .list_parameter_history(
            instance,
            &request.parameter,
            start.as_deref(),
            stop.as_deref(),
            limit,
        )
        .await
        .map_err(yamcs_failure(TOOL))?;
    let values: Vec<Value> = samples.iter().map(projection::parameter_value_record).collect();
    Ok(json!({
        "parameter": request.parameter,
        "instance": instance,
        "count": values.len(),
        "values": values,
    }))
}

/// Queries archived command history.
async fn command_history(
    context: Arc<SessionContext>,
    payload: Value,
) -> Result<Value, ErrorEnvelope> {
    const TOOL: ToolName = ToolName::ArchiveCommandHistory;
    let request: CommandHistoryRequest = decode(TOOL, payload)?;
    let limit = normalize_limit(TOOL, request.limit)?;
    let (start, stop) =
        resolve_time_range(TOOL, request.start.as_deref(), request.stop.as_deref())?;
    let client = acquire(TOOL, &context).await?;
    let instance = context.instance(request.instance.as_deref());
    let entries = client
        .list_command_history(
            instance,
            request.command.as_deref(),
            start.as_deref(),
            stop.as_deref(),
            limit,
        )
        .await
        .map_err(yamcs_failure(TOOL))?;
    let records: Vec<Value> = entries.iter().map(projection::archive_command_record).collect();
    Ok(json!({
        "instance": instance,
        "count": records.len(),
        "commands": records,
    }))
}

/// Queries archived events with severity and source filters.
async fn events(context: Arc<SessionContext>, payload: Value) -> Result<Value, ErrorEnvelope> {
    const TOOL: ToolName = ToolName::ArchiveEvents;
    let request: EventsRequest = decode(TOOL, payload)?;
    let limit = normalize_limit(TOOL, request.limit)?;
    let (start, stop) =
        resolve_time_range(TOOL, request.start.as_deref(), request.stop.as_deref())?;
    let client = acquire(TOOL, &context).await?;
    let instance = context.instance(request.instance.as_deref());
    let events = client
        .list_events(
            instance,
            request.severity.as_deref(),
            request.source.as_deref(),
            start.as_deref(),
            stop.as_deref(),
            limit,
        )
        .await
        .map_err(yamcs_failure(TOOL))?;
    let records: Vec<Value> = events.iter().map(projection::event_record).collect();
    Ok(json!({
        "instance": instance,
        "count": records.len(),
        "events": records,
    }))
}

// ============================================================================
// SECTION: Resources
// ============================================================================

/// Renders the archive overview for the default instance.
///
/// The packet count is best effort; a failing archive query drops the
/// statistics line rather than the whole overview.
async fn overview(context: Arc<SessionContext>) -> Result<String, YamcsError> {
    let client = context.sessions.acquire().await?;
    let instance = client.get_instance(&context.default_instance).await?;
    let packet_count = client
        .list_packets(&context.default_instance, None, None, None, RECENT_PACKET_WINDOW)
        .await
        .ok()
        .map(|packets| packets.len());
    Ok(render_overview(&context.default_instance, &instance, packet_count))
}

/// Renders the overview text.
fn render_overview(name: &str, instance: &InstanceInfo, packet_count: Option<usize>) -> String {
    let mut lines = vec![
        format!("Archive Overview for {name}:"),
        format!("  State: {}", instance.state.as_deref().unwrap_or("UNKNOWN")),
    ];
    if let Some(mission_time) = instance.mission_time.as_deref() {
        lines.push(format!("  Mission Time: {mission_time}"));
    }
    if let Some(count) = packet_count {
        lines.push(format!("  Recent Packets: {count} (last {RECENT_PACKET_WINDOW})"));
    }
    lines.join("\n")
}

// ============================================================================
// SECTION: Tests
// ============================================================================
