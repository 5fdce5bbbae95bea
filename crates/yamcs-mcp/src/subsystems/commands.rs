// crates/yamcs-mcp/src/subsystems/commands.rs
// ============================================================================
// Module: Commands Subsystem
// Description: Command execution and history.
// Purpose: Issue telecommands and read back the execution log.
// Dependencies: yamcs-client, yamcs-contract
// ============================================================================

//! ## Overview
//! Commanding is the one write path that touches the spacecraft, so the run
//! tool validates its argument payload before any session is acquired. A
//! malformed `args` value is rejected locally and never reaches Yamcs.
//! Assistants sometimes serialize arguments as a JSON string instead of an
//! object; both spellings are accepted and coerced to the same map.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;

use serde::Deserialize;
use serde_json::Value;
use serde_json::json;
use yamcs_client::IssueCommandRequest;
use yamcs_contract::ToolName;

use crate::coerce::coerce_command_args;
use crate::envelope::ErrorEnvelope;
use crate::projection;
use crate::registry::RegistryError;
use crate::registry::ResourceRegistry;
use crate::registry::SessionContext;
use crate::registry::ToolRegistry;
use crate::subsystems::acquire;
use crate::subsystems::bind_tool;
use crate::subsystems::decode;
use crate::subsystems::normalize_limit;
use crate::subsystems::normalize_lines;
use crate::subsystems::processor_or_default;
use crate::subsystems::resolve_time_range;
use crate::subsystems::yamcs_failure;

// ============================================================================
// SECTION: Registration
// ============================================================================

/// Registers the command execution tools.
///
/// # Errors
///
/// Returns [`RegistryError`] when a tool is already registered.
pub fn register(
    tools: &mut ToolRegistry,
    _resources: &mut ResourceRegistry,
    context: &Arc<SessionContext>,
) -> Result<(), RegistryError> {
    bind_tool(tools, context, ToolName::CommandsList, list)?;
    bind_tool(tools, context, ToolName::CommandsDescribe, describe)?;
    bind_tool(tools, context, ToolName::CommandsRun, run)?;
    bind_tool(tools, context, ToolName::CommandsReadLog, read_log)?;
    Ok(())
}

// ============================================================================
// SECTION: Requests
// ============================================================================

/// Arguments for `commands_list`.
#[derive(Debug, Deserialize)]
struct ListRequest {
    /// Instance override.
    #[serde(default)]
    instance: Option<String>,
    /// Case-insensitive substring filter on qualified names.
    #[serde(default)]
    search: Option<String>,
    /// Page size.
    #[serde(default)]
    limit: Option<u32>,
}

/// Arguments for `commands_describe`.
#[derive(Debug, Deserialize)]
struct DescribeRequest {
    /// Fully qualified command name.
    command: String,
    /// Instance override.
    #[serde(default)]
    instance: Option<String>,
}

/// Arguments for `commands_run`.
#[derive(Debug, Deserialize)]
struct RunRequest {
    /// Fully qualified command name to issue.
    command: String,
    /// Raw argument payload; coerced by [`coerce_command_args`].
    #[serde(default)]
    args: Option<Value>,
    /// Processor override.
    #[serde(default)]
    processor: Option<String>,
    /// Validate without queueing the command.
    #[serde(default)]
    dry_run: bool,
    /// Client-assigned sequence number.
    #[serde(default)]
    sequence_number: Option<i64>,
    /// Comment recorded in command history.
    #[serde(default)]
    comment: Option<String>,
    /// Instance override.
    #[serde(default)]
    instance: Option<String>,
}

/// Arguments for `commands_read_log`.
#[derive(Debug, Deserialize)]
struct ReadLogRequest {
    /// Maximum number of history entries to return.
    #[serde(default)]
    lines: Option<u32>,
    /// Start of the time range.
    #[serde(default)]
    since: Option<String>,
    /// End of the time range.
    #[serde(default)]
    until: Option<String>,
    /// Substring filter on qualified command names.
    #[serde(default)]
    command: Option<String>,
    /// Instance override.
    #[serde(default)]
    instance: Option<String>,
}

// ============================================================================
// SECTION: Tool Handlers
// ============================================================================

/// Lists issuable commands, excluding abstract base commands.
async fn list(context: Arc<SessionContext>, payload: Value) -> Result<Value, ErrorEnvelope> {
    const TOOL: ToolName = ToolName::CommandsList;
    let request: ListRequest = decode(TOOL, payload)?;
    let limit = normalize_limit(TOOL, request.limit)?;
    let client = acquire(TOOL, &context).await?;
    let instance = context.instance(request.instance.as_deref());
    let commands = client
        .list_commands(instance, None, request.search.as_deref(), limit)
        .await
        .map_err(yamcs_failure(TOOL))?;
    let entries: Vec<Value> = commands
        .iter()
        .filter(|command| !command.is_abstract)
        .map(projection::executable_command_summary)
        .collect();
    Ok(json!({
        "instance": instance,
        "count": entries.len(),
        "commands": entries,
    }))
}

/// Describes a command's arguments, significance, and constraints.
async fn describe(context: Arc<SessionContext>, payload: Value) -> Result<Value, ErrorEnvelope> {
    const TOOL: ToolName = ToolName::CommandsDescribe;
    let request: DescribeRequest = decode(TOOL, payload)?;
    let client = acquire(TOOL, &context).await?;
    let instance = context.instance(request.instance.as_deref());
    let command =
        client.get_command(instance, &request.command).await.map_err(yamcs_failure(TOOL))?;
    Ok(projection::executable_command_detail(&command))
}

/// Issues a command, optionally as a dry run.
///
/// Argument coercion runs before the session is acquired so a malformed
/// payload costs zero Yamcs requests.
async fn run(context: Arc<SessionContext>, payload: Value) -> Result<Value, ErrorEnvelope> {
    const TOOL: ToolName = ToolName::CommandsRun;
    let request: RunRequest = decode(TOOL, payload)?;
    let args = coerce_command_args(request.args.as_ref())
        .map_err(|err| ErrorEnvelope::validation(TOOL.as_str(), err.to_string()))?;
    let client = acquire(TOOL, &context).await?;
    let instance = context.instance(request.instance.as_deref());
    let processor = processor_or_default(request.processor.as_deref());
    let issue = IssueCommandRequest {
        args,
        dry_run: request.dry_run,
        sequence_number: request.sequence_number,
        comment: request.comment.clone(),
    };
    let response = client
        .issue_command(instance, processor, &request.command, &issue)
        .await
        .map_err(yamcs_failure(TOOL))?;
    Ok(projection::issued_command(
        &request.command,
        processor,
        instance,
        request.dry_run,
        &response,
    ))
}

/// Reads recent command history entries, newest first.
async fn read_log(context: Arc<SessionContext>, payload: Value) -> Result<Value, ErrorEnvelope> {
    const TOOL: ToolName = ToolName::CommandsReadLog;
    let request: ReadLogRequest = decode(TOOL, payload)?;
    let lines = normalize_lines(TOOL, request.lines)?;
    let (start, stop) =
        resolve_time_range(TOOL, request.since.as_deref(), request.until.as_deref())?;
    let client = acquire(TOOL, &context).await?;
    let instance = context.instance(request.instance.as_deref());
    let entries = client
        .list_command_history(
            instance,
            request.command.as_deref(),
            start.as_deref(),
            stop.as_deref(),
            lines,
        )
        .await
        .map_err(yamcs_failure(TOOL))?;
    let records: Vec<Value> = entries.iter().map(projection::command_history_record).collect();
    Ok(json!({
        "instance": instance,
        "count": records.len(),
        "commands": records,
    }))
}

// ============================================================================
// SECTION: Tests
// ============================================================================
