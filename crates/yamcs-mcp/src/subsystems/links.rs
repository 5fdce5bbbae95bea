// crates/yamcs-mcp/src/subsystems/links.rs
// ============================================================================
// Module: Links Subsystem
// Description: Data link monitoring and control.
// Purpose: Observe and toggle the TM/TC links of an instance.
// Dependencies: yamcs-client, yamcs-contract
// ============================================================================

//! ## Overview
//! Links carry frames between Yamcs and the ground segment. The toggle tools
//! are idempotent on the Yamcs side: enabling an enabled link or resetting an
//! idle counter succeeds without effect. Status text distinguishes an
//! operator-disabled link from a failed one, since both stop data flow for
//! very different reasons.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;

use serde::Deserialize;
use serde_json::Value;
use serde_json::json;
use yamcs_client::YamcsError;
use yamcs_client::types::LinkInfo;
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

/// Registers the link tools and resources.
///
/// # Errors
///
/// Returns [`RegistryError`] when a tool or resource is already registered.
pub fn register(
    tools: &mut ToolRegistry,
    resources: &mut ResourceRegistry,
    context: &Arc<SessionContext>,
) -> Result<(), RegistryError> {
    bind_tool(tools, context, ToolName::LinksList, list)?;
    bind_tool(tools, context, ToolName::LinksDescribe, describe)?;
    bind_tool(tools, context, ToolName::LinksEnable, enable)?;
    bind_tool(tools, context, ToolName::LinksDisable, disable)?;
    bind_tool(tools, context, ToolName::LinksReset, reset)?;
    bind_tool(tools, context, ToolName::LinksStatistics, statistics)?;
    bind_resource(resources, context, ResourceName::LinksStatus, status_overview)?;
    bind_resource(resources, context, ResourceName::LinksStatistics, statistics_overview)?;
    Ok(())
}

// ============================================================================
// SECTION: Requests
// ============================================================================

/// Arguments for tools that read the whole link table.
#[derive(Debug, Deserialize)]
struct ListRequest {
    /// Instance override.
    #[serde(default)]
    instance: Option<String>,
}

/// Arguments for tools that target one link.
#[derive(Debug, Deserialize)]
struct LinkRequest {
    /// Link name, e.g. `tm_realtime`.
    link: String,
    /// Instance override.
    #[serde(default)]
    instance: Option<String>,
}

// ============================================================================
// SECTION: Tool Handlers
// ============================================================================

/// Lists data links on an instance.
async fn list(context: Arc<SessionContext>, payload: Value) -> Result<Value, ErrorEnvelope> {
    const TOOL: ToolName = ToolName::LinksList;
    let request: ListRequest = decode(TOOL, payload)?;
    let client = acquire(TOOL, &context).await?;
    let instance = context.instance(request.instance.as_deref());
    let links = client.list_links(instance).await.map_err(yamcs_failure(TOOL))?;
    let entries: Vec<Value> = links.iter().map(projection::link_summary).collect();
    Ok(json!({
        "instance": instance,
        "count": entries.len(),
        "links": entries,
    }))
}

/// Describes one link, including counters and link-specific extras.
async fn describe(context: Arc<SessionContext>, payload: Value) -> Result<Value, ErrorEnvelope> {
    const TOOL: ToolName = ToolName::LinksDescribe;
    let request: LinkRequest = decode(TOOL, payload)?;
    let client = acquire(TOOL, &context).await?;
    let instance = context.instance(request.instance.as_deref());
    let link = client.get_link(instance, &request.link).await.map_err(yamcs_failure(TOOL))?;
    Ok(projection::link_detail(&link))
}

/// Enables a link.
async fn enable(context: Arc<SessionContext>, payload: Value) -> Result<Value, ErrorEnvelope> {
    const TOOL: ToolName = ToolName::LinksEnable;
    let request: LinkRequest = decode(TOOL, payload)?;
    let client = acquire(TOOL, &context).await?;
    let instance = context.instance(request.instance.as_deref());
    client.enable_link(instance, &request.link).await.map_err(yamcs_failure(TOOL))?;
    let message = format!("Link '{}' enabled successfully", request.link);
    Ok(action_result(&request.link, "enable", &message))
}

/// Disables a link.
async fn disable(context: Arc<SessionContext>, payload: Value) -> Result<Value, ErrorEnvelope> {
    const TOOL: ToolName = ToolName::LinksDisable;
    let request: LinkRequest = decode(TOOL, payload)?;
    let client = acquire(TOOL, &context).await?;
    let instance = context.instance(request.instance.as_deref());
    client.disable_link(instance, &request.link).await.map_err(yamcs_failure(TOOL))?;
    let message = format!("Link '{}' disabled successfully", request.link);
    Ok(action_result(&request.link, "disable", &message))
}

/// Resets a link's data counters.
async fn reset(context: Arc<SessionContext>, payload: Value) -> Result<Value, ErrorEnvelope> {
    const TOOL: ToolName = ToolName::LinksReset;
    let request: LinkRequest = decode(TOOL, payload)?;
    let client = acquire(TOOL, &context).await?;
    let instance = context.instance(request.instance.as_deref());
    client.reset_link(instance, &request.link).await.map_err(yamcs_failure(TOOL))?;
    let message = format!("Link '{}' counters reset successfully", request.link);
    Ok(action_result(&request.link, "reset", &message))
}

/// Aggregates counters across every link on an instance.
async fn statistics(context: Arc<SessionContext>, payload: Value) -> Result<Value, ErrorEnvelope> {
    const TOOL: ToolName = ToolName::LinksStatistics;
    let request: ListRequest = decode(TOOL, payload)?;
    let client = acquire(TOOL, &context).await?;
    let instance = context.instance(request.instance.as_deref());
    let links = client.list_links(instance).await.map_err(yamcs_failure(TOOL))?;
    Ok(json!({
        "instance": instance,
        "statistics": projection::link_statistics(&links),
    }))
}

/// Builds the shared toggle-result payload.
fn action_result(link: &str, operation: &str, message: &str) -> Value {
    json!({
        "success": true,
        "link": link,
        "operation": operation,
        "message": message,
    })
}

// ============================================================================
// SECTION: Resources
// ============================================================================

/// Renders the per-link status table for the default instance.
async fn status_overview(context: Arc<SessionContext>) -> Result<String, YamcsError> {
    let client = context.sessions.acquire().await?;
    let links = client.list_links(&context.default_instance).await?;
    Ok(render_status(&context.default_instance, &links))
}

/// Renders the aggregated counter summary for the default instance.
async fn statistics_overview(context: Arc<SessionContext>) -> Result<String, YamcsError> {
    let client = context.sessions.acquire().await?;
    let links = client.list_links(&context.default_instance).await?;
    Ok(render_statistics(&context.default_instance, &links))
}

/// Renders one status line per link.
fn render_status(instance: &str, links: &[LinkInfo]) -> String {
    let mut lines = vec![format!("Links in {instance} ({} total):", links.len())];
    for link in links {
        let name = link.name.as_deref().unwrap_or_default();
        let status = if link.disabled {
            "DISABLED"
        } else {
            link.status.as_deref().unwrap_or("UNKNOWN")
        };
        let type_info =
            link.link_type.as_deref().map(|class| format!(" ({class})")).unwrap_or_default();
        let data_in = link.data_in_count.unwrap_or(0);
        let data_out = link.data_out_count.unwrap_or(0);
        lines.push(format!("  - {name}{type_info}: {status} [in: {data_in}, out: {data_out}]"));
    }
    lines.join("\n")
}

/// Renders the counter summary text from the shared statistics projection.
fn render_statistics(instance: &str, links: &[LinkInfo]) -> String {
    let statistics = projection::link_statistics(links);
    let lines = [
        format!("Link Statistics for {instance}:"),
        format!("  Total Links: {}", statistics["total_links"]),
        format!("  Enabled: {}", statistics["enabled_links"]),
        format!("  Disabled: {}", statistics["disabled_links"]),
        format!("  OK: {}", statistics["ok_links"]),
        format!("  Failed: {}", statistics["failed_links"]),
        String::new(),
        format!("  Total Data In: {}", statistics["total_data_in"]),
        format!("  Total Data Out: {}", statistics["total_data_out"]),
    ];
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

    fn sample_links() -> Vec<LinkInfo> {
        vec![
            LinkInfo {
                name: Some("tm_realtime".to_string()),
                link_type: Some("TcpTmDataLink".to_string()),
                status: Some("OK".to_string()),
                data_in_count: Some(4821),
                data_out_count: Some(0),
                ..LinkInfo::default()
            },
            LinkInfo {
                name: Some("tc_uplink".to_string()),
                status: Some("FAILED".to_string()),
                disabled: true,
                data_in_count: None,
                data_out_count: Some(73),
                ..LinkInfo::default()
            },
        ]
    }

    #[test]
    fn status_lines_mark_disabled_links() {
        let text = render_status("simulator", &sample_links());
        assert!(text.starts_with("Links in simulator (2 total):"));
        assert!(text.contains("  - tm_realtime (TcpTmDataLink): OK [in: 4821, out: 0]"));
        assert!(
            text.contains("  - tc_uplink: DISABLED [in: 0, out: 73]"),
            "disabled wins over the raw status and the type suffix drops when unknown"
        );
    }

    #[test]
    fn statistics_text_matches_the_aggregate_projection() {
        let text = render_statistics("simulator", &sample_links());
        let expected = "Link Statistics for simulator:\n  \
                        Total Links: 2\n  \
                        Enabled: 1\n  \
                        Disabled: 1\n  \
                        OK: 1\n  \
                        Failed: 1\n\n  \
                        Total Data In: 4821\n  \
                        Total Data Out: 73";
        assert_eq!(text, expected);
    }

    #[test]
    fn action_results_echo_the_operation() {
        let result =
            action_result("tm_realtime", "reset", "Link 'tm_realtime' counters reset successfully");
        assert_eq!(result["success"], Value::Bool(true));
        assert_eq!(result["operation"], json!("reset"));
        assert_eq!(result["link"], json!("tm_realtime"));
    }

    #[test]
    fn link_requests_require_the_link_name() {
        assert!(serde_json::from_value::<LinkRequest>(json!({ "instance": "simulator" })).is_err());
    }
}
