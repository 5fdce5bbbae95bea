// crates/yamcs-mcp/src/subsystems/processors.rs
// ============================================================================
// Module: Processors Subsystem
// Description: Processor listing, inspection, and teardown.
// Purpose: Manage TM/TC processing pipelines across instances.
// Dependencies: yamcs-client, yamcs-contract
// ============================================================================

//! ## Overview
//! Processors are where telemetry and commanding actually run. Listing and
//! describing are read-only; deletion is the one mutating operation and only
//! works on non-protected processors, which Yamcs enforces server-side.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;

use serde::Deserialize;
use serde_json::Value;
use serde_json::json;
use yamcs_client::YamcsError;
use yamcs_client::types::ProcessorInfo;
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

/// Registers the processor tools and resources.
///
/// # Errors
///
/// Returns [`RegistryError`] when a tool or resource is already registered.
pub fn register(
    tools: &mut ToolRegistry,
    resources: &mut ResourceRegistry,
    context: &Arc<SessionContext>,
) -> Result<(), RegistryError> {
    bind_tool(tools, context, ToolName::ProcessorsList, list)?;
    bind_tool(tools, context, ToolName::ProcessorsDescribe, describe)?;
    bind_tool(tools, context, ToolName::ProcessorsDelete, delete)?;
    bind_resource(resources, context, ResourceName::ProcessorsList, overview)?;
    Ok(())
}

// ============================================================================
// SECTION: Requests
// ============================================================================

/// Arguments for `processors_list`.
#[derive(Debug, Deserialize)]
struct ListRequest {
    /// Instance override.
    #[serde(default)]
    instance: Option<String>,
}

/// Arguments for tools that target one processor.
#[derive(Debug, Deserialize)]
struct ProcessorRequest {
    /// Processor name, e.g. `realtime`.
    processor: String,
    /// Instance override.
    #[serde(default)]
    instance: Option<String>,
}

// ============================================================================
// SECTION: Tool Handlers
// ============================================================================

/// Lists processors on an instance.
async fn list(context: Arc<SessionContext>, payload: Value) -> Result<Value, ErrorEnvelope> {
    const TOOL: ToolName = ToolName::ProcessorsList;
    let request: ListRequest = decode(TOOL, payload)?;
    let client = acquire(TOOL, &context).await?;
    let instance = context.instance(request.instance.as_deref());
    let processors = client.list_processors(instance).await.map_err(yamcs_failure(TOOL))?;
    let entries: Vec<Value> = processors.iter().map(projection::processor_summary).collect();
    Ok(json!({
        "instance": instance,
        "count": entries.len(),
        "processors": entries,
    }))
}

/// Describes one processor, including its instance services.
async fn describe(context: Arc<SessionContext>, payload: Value) -> Result<Value, ErrorEnvelope> {
    const TOOL: ToolName = ToolName::ProcessorsDescribe;
    let request: ProcessorRequest = decode(TOOL, payload)?;
    let client = acquire(TOOL, &context).await?;
    let instance = context.instance(request.instance.as_deref());
    let processor = client
        .get_processor(instance, &request.processor)
        .await
        .map_err(yamcs_failure(TOOL))?;
    let services = client.list_services(instance).await.map_err(yamcs_failure(TOOL))?;
    Ok(projection::processor_detail(&processor, instance, &services))
}

/// Deletes one processor.
async fn delete(context: Arc<SessionContext>, payload: Value) -> Result<Value, ErrorEnvelope> {
    const TOOL: ToolName = ToolName::ProcessorsDelete;
    let request: ProcessorRequest = decode(TOOL, payload)?;
    let client = acquire(TOOL, &context).await?;
    let instance = context.instance(request.instance.as_deref());
    client.delete_processor(instance, &request.processor).await.map_err(yamcs_failure(TOOL))?;
    Ok(json!({
        "success": true,
        "processor": request.processor,
        "instance": instance,
        "message": format!("Processor '{}' deleted successfully", request.processor),
    }))
}

// ============================================================================
// SECTION: Resources
// ============================================================================

/// Renders processors grouped by instance across the whole server.
async fn overview(context: Arc<SessionContext>) -> Result<String, YamcsError> {
    let client = context.sessions.acquire().await?;
    let mut groups: Vec<(String, Vec<ProcessorInfo>)> = Vec::new();
    for instance in client.list_instances().await? {
        let Some(name) = instance.name else { continue };
        let processors = client.list_processors(&name).await?;
        if !processors.is_empty() {
            groups.push((name, processors));
        }
    }
    Ok(render_overview(&groups))
}

/// Renders the grouped processor listing.
fn render_overview(groups: &[(String, Vec<ProcessorInfo>)]) -> String {
    let mut lines = vec!["Yamcs Processors:".to_string()];
    for (instance, processors) in groups {
        lines.push(format!("\n  Instance: {instance}"));
        for processor in processors {
            let name = processor.name.as_deref().unwrap_or_default();
            let state = processor.state.as_deref().unwrap_or("UNKNOWN");
            let processor_type = processor.processor_type.as_deref().unwrap_or("realtime");
            let replay_info = if processor.replay { " (replay)" } else { "" };
            let time_info = processor
                .time
                .as_deref()
                .map(|time| format!(" @ {time}"))
                .unwrap_or_default();
            lines.push(format!(
                "    - {name}: {state} [{processor_type}{replay_info}]{time_info}"
            ));
        }
    }
    if groups.is_empty() {
        lines.push("  No processors found".to_string());
    }
    lines.join("\n")
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

    use super::*;

    #[test]
    fn overview_groups_processors_under_their_instance() {
        let groups = vec![(
            "simulator".to_string(),
            vec![
                ProcessorInfo {
                    name: Some("realtime".to_string()),
                    state: Some("RUNNING".to_string()),
                    processor_type: Some("realtime".to_string()),
                    time: Some("2025-03-14T12:00:00Z".to_string()),
                    ..ProcessorInfo::default()
                },
                ProcessorInfo {
                    name: Some("replay-1".to_string()),
                    state: Some("PAUSED".to_string()),
                    processor_type: Some("Archive".to_string()),
                    replay: true,
                    ..ProcessorInfo::default()
                },
            ],
        )];
        let text = render_overview(&groups);
        assert!(text.starts_with("Yamcs Processors:\n\n  Instance: simulator"));
        assert!(text.contains("    - realtime: RUNNING [realtime] @ 2025-03-14T12:00:00Z"));
        assert!(text.contains("    - replay-1: PAUSED [Archive (replay)]"));
    }

    #[test]
    fn overview_reports_when_nothing_runs() {
        assert_eq!(render_overview(&[]), "Yamcs Processors:\n  No processors found");
    }

    #[test]
    fn processor_requests_require_the_processor_name() {
        assert!(serde_json::from_value::<ProcessorRequest>(json!({})).is_err());
        let request: ProcessorRequest =
            serde_json::from_value(json!({ "processor": "realtime" })).unwrap();
        assert_eq!(request.processor, "realtime");
    }
}
