// crates/yamcs-contract/src/tooling.rs
// ============================================================================
// Module: MCP Tool Contracts
// Description: Canonical MCP tool and resource definitions for the Yamcs bridge.
// Purpose: Provide tool contracts for docs generation and MCP listing.
// Dependencies: serde_json, std, yamcs-contract::names, yamcs-contract::types
// ============================================================================

//! ## Overview
//! This module defines the canonical MCP tool surface of the bridge. Tool
//! contracts drive `tools/list`, the generated tooling docs, and the router
//! tests that keep the two from drifting apart. Success payload schemas match
//! the projections produced by the subsystem handlers; failures always use
//! the uniform error envelope described by [`error_envelope_schema`].

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;

use serde_json::Value;
use serde_json::json;

use crate::names::ResourceName;
use crate::names::ToolName;
use crate::types::ResourceDefinition;
use crate::types::ToolAnnotations;
use crate::types::ToolContract;
use crate::types::ToolDefinition;

// ============================================================================
// SECTION: Tool Contracts
// ============================================================================

/// Returns the canonical MCP tool contracts.
///
/// The order is intentional: it matches [`ToolName::all`] and is preserved in
/// tool listings and generated docs to keep diffs stable. Append new tools at
/// the end of their subsystem group.
#[must_use]
pub fn tool_contracts() -> Vec<ToolContract> {
    vec![
        server_health_check_contract(),
        server_test_connection_contract(),
        mdb_list_parameters_contract(),
        mdb_describe_parameter_contract(),
        mdb_list_commands_contract(),
        mdb_describe_command_contract(),
        mdb_list_space_systems_contract(),
        processors_list_contract(),
        processors_describe_contract(),
        processors_delete_contract(),
        links_list_contract(),
        links_describe_contract(),
        links_enable_contract(),
        links_disable_contract(),
        links_reset_contract(),
        links_statistics_contract(),
        storage_list_buckets_contract(),
        storage_list_objects_contract(),
        storage_describe_object_contract(),
        storage_delete_object_contract(),
        storage_create_bucket_contract(),
        instances_list_contract(),
        instances_describe_contract(),
        instances_start_contract(),
        instances_stop_contract(),
        alarms_list_contract(),
        alarms_describe_contract(),
        alarms_acknowledge_contract(),
        alarms_shelve_contract(),
        alarms_unshelve_contract(),
        alarms_clear_contract(),
        alarms_read_log_contract(),
        commands_list_contract(),
        commands_describe_contract(),
        commands_run_contract(),
        commands_read_log_contract(),
        archive_list_packets_contract(),
        archive_parameter_values_contract(),
        archive_command_history_contract(),
        archive_events_contract(),
    ]
}

/// Builds the tool contract for `server_health_check`.
fn server_health_check_contract() -> ToolContract {
    build_tool_contract(
        ToolName::ServerHealthCheck,
        "Report bridge health, the configured Yamcs endpoint, and the enabled subsystems without \
         contacting Yamcs.",
        false,
        server_health_check_input_schema(),
        server_health_check_output_schema(),
        vec![
            "Reports degraded when no Yamcs session has been established yet.".to_string(),
            "Performs no network traffic; use server_test_connection to probe connectivity."
                .to_string(),
        ],
    )
}

/// Builds the tool contract for `server_test_connection`.
fn server_test_connection_contract() -> ToolContract {
    build_tool_contract(
        ToolName::ServerTestConnection,
        "Connect to the Yamcs server and report its identity and version.",
        false,
        server_test_connection_input_schema(),
        server_test_connection_output_schema(),
        vec![
            "Forces a fresh session acquisition even when one already exists.".to_string(),
            "Read-only, but performs a network round trip to Yamcs.".to_string(),
        ],
    )
}

/// Builds the tool contract for `mdb_list_parameters`.
fn mdb_list_parameters_contract() -> ToolContract {
    build_tool_contract(
        ToolName::MdbListParameters,
        "List parameters from the Mission Database with optional system and search filters.",
        false,
        mdb_list_parameters_input_schema(),
        mdb_list_parameters_output_schema(),
        vec![
            "system matches qualified-name prefixes; search matches substrings, case-insensitive."
                .to_string(),
            "At most 100 parameters are returned; count reflects the returned page.".to_string(),
        ],
    )
}

/// Builds the tool contract for `mdb_describe_parameter`.
fn mdb_describe_parameter_contract() -> ToolContract {
    build_tool_contract(
        ToolName::MdbDescribeParameter,
        "Get detailed information about a single Mission Database parameter.",
        false,
        mdb_describe_parameter_input_schema(),
        mdb_describe_parameter_output_schema(),
        vec![
            "parameter is the fully qualified name, e.g. /YSS/SIMULATOR/BatteryVoltage1."
                .to_string(),
            "Unknown parameters produce a not_found envelope.".to_string(),
        ],
    )
}

/// Builds the tool contract for `mdb_list_commands`.
fn mdb_list_commands_contract() -> ToolContract {
    build_tool_contract(
        ToolName::MdbListCommands,
        "List commands from the Mission Database with optional system and search filters.",
        false,
        mdb_list_commands_input_schema(),
        mdb_list_commands_output_schema(),
        vec![
            "Includes abstract commands; use commands_list for the executable view.".to_string(),
            "At most 100 commands are returned; count reflects the returned page.".to_string(),
        ],
    )
}

/// Builds the tool contract for `mdb_describe_command`.
fn mdb_describe_command_contract() -> ToolContract {
    build_tool_contract(
        ToolName::MdbDescribeCommand,
        "Get detailed information about a single command, including its argument descriptors.",
        false,
        mdb_describe_command_input_schema(),
        mdb_describe_command_output_schema(),
        vec![
            "Argument descriptors carry type, requiredness, defaults, and value ranges."
                .to_string(),
            "Unknown commands produce a not_found envelope.".to_string(),
        ],
    )
}

/// Builds the tool contract for `mdb_list_space_systems`.
fn mdb_list_space_systems_contract() -> ToolContract {
    build_tool_contract(
        ToolName::MdbListSpaceSystems,
        "List space systems defined in the Mission Database.",
        false,
        mdb_list_space_systems_input_schema(),
        mdb_list_space_systems_output_schema(),
        vec![
            "Space system qualified names are the prefixes accepted by the system filters."
                .to_string(),
        ],
    )
}

/// Builds the tool contract for `processors_list`.
fn processors_list_contract() -> ToolContract {
    build_tool_contract(
        ToolName::ProcessorsList,
        "List processors running in a Yamcs instance.",
        false,
        processors_list_input_schema(),
        processors_list_output_schema(),
        vec![
            "Replay processors report replay true and a non-realtime mission time.".to_string(),
        ],
    )
}

/// Builds the tool contract for `processors_describe`.
fn processors_describe_contract() -> ToolContract {
    build_tool_contract(
        ToolName::ProcessorsDescribe,
        "Get detailed state, configuration, and replay information for a processor.",
        false,
        processors_describe_input_schema(),
        processors_describe_output_schema(),
        vec![
            "replay_config is null for realtime processors.".to_string(),
            "Unknown processors produce a not_found envelope.".to_string(),
        ],
    )
}

/// Builds the tool contract for `processors_delete`.
fn processors_delete_contract() -> ToolContract {
    build_tool_contract(
        ToolName::ProcessorsDelete,
        "Delete a processor from a Yamcs instance.",
        true,
        processors_delete_input_schema(),
        processors_delete_output_schema(),
        vec![
            "Fails with an operation envelope when Yamcs refuses to delete a protected processor."
                .to_string(),
            "Deleting the realtime processor is almost never what you want.".to_string(),
        ],
    )
}

/// Builds the tool contract for `links_list`.
fn links_list_contract() -> ToolContract {
    build_tool_contract(
        ToolName::LinksList,
        "List data links and their current status.",
        false,
        links_list_input_schema(),
        links_list_output_schema(),
        vec![
            "disabled reflects operator intent; status reflects observed link health.".to_string(),
        ],
    )
}

/// Builds the tool contract for `links_describe`.
fn links_describe_contract() -> ToolContract {
    build_tool_contract(
        ToolName::LinksDescribe,
        "Get detailed status, counters, and available actions for a data link.",
        false,
        links_describe_input_schema(),
        links_describe_output_schema(),
        vec![
            "extra carries link-type specific fields as reported by Yamcs.".to_string(),
            "Unknown links produce a not_found envelope.".to_string(),
        ],
    )
}

/// Builds the tool contract for `links_enable`.
fn links_enable_contract() -> ToolContract {
    build_tool_contract(
        ToolName::LinksEnable,
        "Enable a data link.",
        true,
        links_enable_input_schema(),
        link_action_output_schema("enable"),
        vec![
            "Enabling an already enabled link succeeds without effect.".to_string(),
        ],
    )
}

/// Builds the tool contract for `links_disable`.
fn links_disable_contract() -> ToolContract {
    build_tool_contract(
        ToolName::LinksDisable,
        "Disable a data link.",
        true,
        links_disable_input_schema(),
        link_action_output_schema("disable"),
        vec![
            "Disabling stops data flow but keeps the link registered.".to_string(),
        ],
    )
}

/// Builds the tool contract for `links_reset`.
fn links_reset_contract() -> ToolContract {
    build_tool_contract(
        ToolName::LinksReset,
        "Reset the data counters of a data link.",
        true,
        links_reset_input_schema(),
        link_action_output_schema("reset"),
        vec![
            "Only counters are reset; link state and status are unchanged.".to_string(),
        ],
    )
}

/// Builds the tool contract for `links_statistics`.
fn links_statistics_contract() -> ToolContract {
    build_tool_contract(
        ToolName::LinksStatistics,
        "Summarize link health and data counters across all links of an instance.",
        false,
        links_statistics_input_schema(),
        links_statistics_output_schema(),
        vec![
            "ok_links and failed_links count observed status; other statuses are neither."
                .to_string(),
        ],
    )
}

/// Builds the tool contract for `storage_list_buckets`.
fn storage_list_buckets_contract() -> ToolContract {
    build_tool_contract(
        ToolName::StorageListBuckets,
        "List object storage buckets.",
        false,
        storage_list_buckets_input_schema(),
        storage_list_buckets_output_schema(),
        vec![
            "Sizes are reported in bytes.".to_string(),
        ],
    )
}

/// Builds the tool contract for `storage_list_objects`.
fn storage_list_objects_contract() -> ToolContract {
    build_tool_contract(
        ToolName::StorageListObjects,
        "List objects in a bucket with optional prefix filtering.",
        false,
        storage_list_objects_input_schema(),
        storage_list_objects_output_schema(),
        vec![
            "At most limit objects are returned; narrow with prefix for large buckets."
                .to_string(),
        ],
    )
}

/// Builds the tool contract for `storage_describe_object`.
fn storage_describe_object_contract() -> ToolContract {
    build_tool_contract(
        ToolName::StorageDescribeObject,
        "Get size, creation time, and metadata for a stored object.",
        false,
        storage_describe_object_input_schema(),
        storage_describe_object_output_schema(),
        vec![
            "Object contents are not returned; this is metadata only.".to_string(),
        ],
    )
}

/// Builds the tool contract for `storage_delete_object`.
fn storage_delete_object_contract() -> ToolContract {
    build_tool_contract(
        ToolName::StorageDeleteObject,
        "Delete an object from a storage bucket.",
        true,
        storage_delete_object_input_schema(),
        storage_delete_object_output_schema(),
        vec![
            "Deletion is immediate and not reversible through this interface.".to_string(),
        ],
    )
}

/// Builds the tool contract for `storage_create_bucket`.
fn storage_create_bucket_contract() -> ToolContract {
    build_tool_contract(
        ToolName::StorageCreateBucket,
        "Create a new object storage bucket.",
        true,
        storage_create_bucket_input_schema(),
        storage_create_bucket_output_schema(),
        vec![
            "Creating a bucket that already exists produces an operation envelope.".to_string(),
        ],
    )
}

/// Builds the tool contract for `instances_list`.
fn instances_list_contract() -> ToolContract {
    build_tool_contract(
        ToolName::InstancesList,
        "List Yamcs instances with their state and processor counts.",
        false,
        instances_list_input_schema(),
        instances_list_output_schema(),
        vec![
            "Includes stopped instances; check state before targeting one.".to_string(),
        ],
    )
}

/// Builds the tool contract for `instances_describe`.
fn instances_describe_contract() -> ToolContract {
    build_tool_contract(
        ToolName::InstancesDescribe,
        "Get detailed state, template, and component information for an instance.",
        false,
        instances_describe_input_schema(),
        instances_describe_output_schema(),
        vec![
            "template and failure_cause are null when not applicable.".to_string(),
            "Unknown instances produce a not_found envelope.".to_string(),
        ],
    )
}

/// Builds the tool contract for `instances_start`.
fn instances_start_contract() -> ToolContract {
    build_tool_contract(
        ToolName::InstancesStart,
        "Start a Yamcs instance.",
        true,
        instances_start_input_schema(),
        instance_action_output_schema("started"),
        vec![
            "instance is required here; lifecycle changes never fall back to the default \
             instance."
                .to_string(),
        ],
    )
}

/// Builds the tool contract for `instances_stop`.
fn instances_stop_contract() -> ToolContract {
    build_tool_contract(
        ToolName::InstancesStop,
        "Stop a Yamcs instance.",
        true,
        instances_stop_input_schema(),
        instance_action_output_schema("stopped"),
        vec![
            "instance is required here; lifecycle changes never fall back to the default \
             instance."
                .to_string(),
            "Stopping an instance terminates its processors and data links.".to_string(),
        ],
    )
}

/// Builds the tool contract for `alarms_list`.
fn alarms_list_contract() -> ToolContract {
    build_tool_contract(
        ToolName::AlarmsList,
        "List active alarms on a processor with a state summary.",
        false,
        alarms_list_input_schema(),
        alarms_list_output_schema(),
        vec![
            "Summary counts are independent: one alarm may be acknowledged, shelved, and ok at \
             once."
                .to_string(),
        ],
    )
}

/// Builds the tool contract for `alarms_describe`.
fn alarms_describe_contract() -> ToolContract {
    build_tool_contract(
        ToolName::AlarmsDescribe,
        "Get detailed information about a single active alarm.",
        false,
        alarms_describe_input_schema(),
        alarms_describe_output_schema(),
        vec![
            "Matches on alarm name; pass sequence_number to pin a specific activation."
                .to_string(),
            "Alarms not currently active produce a not_found envelope; use alarms_read_log for \
             history."
                .to_string(),
        ],
    )
}

/// Builds the tool contract for `alarms_acknowledge`.
fn alarms_acknowledge_contract() -> ToolContract {
    build_tool_contract(
        ToolName::AlarmsAcknowledge,
        "Acknowledge an active alarm.",
        true,
        alarm_action_input_schema("Comment recorded with the acknowledgment."),
        alarm_action_output_schema("acknowledged"),
        vec![
            "sequence_number pins the activation being acknowledged; stale numbers produce an \
             operation envelope."
                .to_string(),
        ],
    )
}

/// Builds the tool contract for `alarms_shelve`.
fn alarms_shelve_contract() -> ToolContract {
    build_tool_contract(
        ToolName::AlarmsShelve,
        "Shelve an active alarm, temporarily suppressing it.",
        true,
        alarm_action_input_schema("Comment recorded with the shelve request."),
        alarm_action_output_schema("shelved"),
        vec![
            "Shelved alarms stay active in Yamcs but are excluded from operator attention lists."
                .to_string(),
        ],
    )
}

/// Builds the tool contract for `alarms_unshelve`.
fn alarms_unshelve_contract() -> ToolContract {
    build_tool_contract(
        ToolName::AlarmsUnshelve,
        "Unshelve a previously shelved alarm.",
        true,
        alarm_action_input_schema("Comment recorded with the unshelve request."),
        alarm_action_output_schema("unshelved"),
        vec![
            "Unshelving an alarm that is not shelved succeeds without effect.".to_string(),
        ],
    )
}

/// Builds the tool contract for `alarms_clear`.
fn alarms_clear_contract() -> ToolContract {
    build_tool_contract(
        ToolName::AlarmsClear,
        "Clear an active alarm.",
        true,
        alarm_action_input_schema("Comment recorded with the clear request."),
        alarm_action_output_schema("cleared"),
        vec![
            "Clearing removes the alarm from the active list even if its condition persists."
                .to_string(),
        ],
    )
}

/// Builds the tool contract for `alarms_read_log`.
fn alarms_read_log_contract() -> ToolContract {
    build_tool_contract(
        ToolName::AlarmsReadLog,
        "Read archived alarm history, newest first.",
        false,
        alarms_read_log_input_schema(),
        alarms_read_log_output_schema(),
        vec![
            "start and stop accept ISO-8601 timestamps or the shorthands now, today, yesterday."
                .to_string(),
        ],
    )
}

/// Builds the tool contract for `commands_list`.
fn commands_list_contract() -> ToolContract {
    build_tool_contract(
        ToolName::CommandsList,
        "List executable commands with significance information.",
        false,
        commands_list_input_schema(),
        commands_list_output_schema(),
        vec![
            "Abstract commands are excluded; use mdb_list_commands for the full definition view."
                .to_string(),
        ],
    )
}

/// Builds the tool contract for `commands_describe`.
fn commands_describe_contract() -> ToolContract {
    build_tool_contract(
        ToolName::CommandsDescribe,
        "Get execution details for a command, including arguments, significance, and constraints.",
        false,
        commands_describe_input_schema(),
        commands_describe_output_schema(),
        vec![
            "Use before commands_run to learn required arguments and their ranges.".to_string(),
        ],
    )
}

/// Builds the tool contract for `commands_run`.
fn commands_run_contract() -> ToolContract {
    build_tool_contract(
        ToolName::CommandsRun,
        "Issue a command on a processor, or validate it without execution via dry_run.",
        true,
        commands_run_input_schema(),
        commands_run_output_schema(),
        vec![
            "args accepts a JSON object or a string encoding one; malformed payloads produce \
             a validation envelope before any Yamcs traffic."
                .to_string(),
            "Delivery is not at-most-once: a timed-out call may still have issued the command. \
             Check commands_read_log before retrying."
                .to_string(),
            "dry_run true validates arguments on the Yamcs side without queueing the command."
                .to_string(),
        ],
    )
}

/// Builds the tool contract for `commands_read_log`.
fn commands_read_log_contract() -> ToolContract {
    build_tool_contract(
        ToolName::CommandsReadLog,
        "Read recent command execution history with acknowledgment status.",
        false,
        commands_read_log_input_schema(),
        commands_read_log_output_schema(),
        vec![
            "Defaults to the 10 most recent commands; raise lines up to 100.".to_string(),
            "acknowledgments maps acknowledgment stage names to their status and time."
                .to_string(),
        ],
    )
}

/// Builds the tool contract for `archive_list_packets`.
fn archive_list_packets_contract() -> ToolContract {
    build_tool_contract(
        ToolName::ArchiveListPackets,
        "List telemetry packets from the archive.",
        false,
        archive_list_packets_input_schema(),
        archive_list_packets_output_schema(),
        vec![
            "Packet payloads are not returned; entries carry timing and size only.".to_string(),
        ],
    )
}

/// Builds the tool contract for `archive_parameter_values`.
fn archive_parameter_values_contract() -> ToolContract {
    build_tool_contract(
        ToolName::ArchiveParameterValues,
        "Read archived values for a parameter.",
        false,
        archive_parameter_values_input_schema(),
        archive_parameter_values_output_schema(),
        vec![
            "Engineering values are preferred; raw values are returned when no calibration \
             applies."
                .to_string(),
        ],
    )
}

/// Builds the tool contract for `archive_command_history`.
fn archive_command_history_contract() -> ToolContract {
    build_tool_contract(
        ToolName::ArchiveCommandHistory,
        "Read archived command history entries.",
        false,
        archive_command_history_input_schema(),
        archive_command_history_output_schema(),
        vec![
            "command filters by substring of the qualified name.".to_string(),
        ],
    )
}

/// Builds the tool contract for `archive_events`.
fn archive_events_contract() -> ToolContract {
    build_tool_contract(
        ToolName::ArchiveEvents,
        "Read archived events with optional severity and source filters.",
        false,
        archive_events_input_schema(),
        archive_events_output_schema(),
        vec![
            "severity is case-insensitive: info, watch, warning, distress, critical, or severe."
                .to_string(),
        ],
    )
}

// ============================================================================
// SECTION: Tool And Resource Definitions
// ============================================================================

/// Returns the MCP tool definitions for tool listing.
#[must_use]
pub fn tool_definitions() -> Vec<ToolDefinition> {
    let contracts = tool_contracts();
    let mut definitions = Vec::with_capacity(contracts.len());
    for contract in contracts {
        definitions.push(ToolDefinition {
            name: contract.name,
            description: contract.description,
            input_schema: contract.input_schema,
            annotations: ToolAnnotations { read_only_hint: !contract.mutates },
        });
    }
    definitions
}

/// Returns the MCP resource definitions for resource listing.
///
/// Order matches [`ResourceName::all`].
#[must_use]
pub fn resource_definitions() -> Vec<ResourceDefinition> {
    let descriptions: [(&str, &str); 9] = [
        ("Parameter summary", "Parameter counts grouped by space system."),
        ("Command summary", "Command counts grouped by space system."),
        ("Processor list", "Processors grouped by instance with state and mission time."),
        ("Link status", "Current status of every data link in the default instance."),
        ("Link statistics", "Aggregate link counters for the default instance."),
        ("Storage overview", "Bucket usage overview for the default instance."),
        ("Instance list", "All instances with state and processor counts."),
        ("Active alarms", "Active alarms across all processors with a state summary."),
        ("Archive overview", "Archive state summary for the default instance."),
    ];
    ResourceName::all()
        .iter()
        .zip(descriptions)
        .map(|(resource, (name, description))| ResourceDefinition {
            uri: resource.as_uri().to_string(),
            name: (*name).to_string(),
            description: (*description).to_string(),
            mime_type: String::from("text/plain"),
        })
        .collect()
}

// ============================================================================
// SECTION: Error Envelope
// ============================================================================

/// Returns the JSON schema for the uniform tool error envelope.
///
/// Every tool failure, from malformed arguments to Yamcs-side rejections, is
/// reported through this shape inside a successful JSON-RPC response.
#[must_use]
pub fn error_envelope_schema() -> Value {
    with_schema(object_schema(
        &json!({
            "error": {
                "type": "boolean",
                "const": true,
                "description": "Discriminator marking the payload as an error envelope."
            },
            "message": schema_for_string("Human-readable failure description."),
            "operation": schema_for_string("Tool name that produced the failure."),
            "kind": {
                "type": "string",
                "enum": ["connection", "not_found", "validation", "operation"],
                "description": "Failure category for programmatic handling."
            },
            "details": {
                "type": "object",
                "description": "Optional structured context, e.g. the HTTP status from Yamcs."
            }
        }),
        &["error", "message", "operation", "kind"],
    ))
}

// ============================================================================
// SECTION: Tooling Markdown
// ============================================================================

/// Builds markdown documentation for the tool contracts.
#[must_use]
pub fn tooling_markdown(contracts: &[ToolContract]) -> String {
    let mut out = String::new();
    out.push_str("# Yamcs MCP Tools\n\n");
    out.push_str("This document summarizes the MCP tool surface of the Yamcs bridge. ");
    out.push_str("Tools are grouped by subsystem; mutating tools are flagged in the ");
    out.push_str("table below and as readOnlyHint in MCP listings.\n\n");
    out.push_str("## Quickstart\n\n");
    out.push_str("- `server_health_check` reports bridge state without touching Yamcs.\n");
    out.push_str("- `mdb_list_parameters` and `mdb_list_commands` explore the Mission ");
    out.push_str("Database.\n");
    out.push_str("- `commands_describe` then `commands_run` issues a command; start with ");
    out.push_str("`dry_run: true`.\n");
    out.push_str("- `alarms_list` and `links_list` cover live monitoring; `archive_*` ");
    out.push_str("tools cover history.\n\n");
    out.push_str("| Tool | Mutates | Description |\n");
    out.push_str("| --- | --- | --- |\n");
    for contract in contracts {
        out.push_str("| ");
        out.push_str(contract.name.as_str());
        out.push_str(" | ");
        out.push_str(if contract.mutates { "yes" } else { "no" });
        out.push_str(" | ");
        out.push_str(&contract.description);
        out.push_str(" |\n");
    }
    out.push('\n');
    for contract in contracts {
        out.push_str("## ");
        out.push_str(contract.name.as_str());
        out.push('\n');
        out.push('\n');
        out.push_str(contract.description.as_str());
        out.push('\n');
        out.push('\n');
        out.push_str("### Inputs\n\n");
        render_schema_fields(&mut out, &contract.input_schema);
        out.push('\n');
        out.push_str("### Outputs\n\n");
        render_schema_fields(&mut out, &contract.output_schema);
        out.push('\n');
        if !contract.notes.is_empty() {
            out.push_str("### Notes\n\n");
            for note in &contract.notes {
                out.push_str("- ");
                out.push_str(note);
                out.push('\n');
            }
            out.push('\n');
        }
    }
    out.push_str("## Resources\n\n");
    out.push_str("Read-only text summaries, fetched with `resources/read`:\n\n");
    out.push_str("| URI | Description |\n");
    out.push_str("| --- | --- |\n");
    for resource in resource_definitions() {
        out.push_str("| ");
        out.push_str(&resource.uri);
        out.push_str(" | ");
        out.push_str(&resource.description);
        out.push_str(" |\n");
    }
    out.push('\n');
    out.push_str("## Error envelope\n\n");
    out.push_str("Tool failures return this shape instead of the success payload:\n\n");
    render_schema_fields(&mut out, &error_envelope_schema());
    out
}

// ============================================================================
// SECTION: Tooling Markdown Helpers
// ============================================================================

/// Render top-level schema fields as markdown bullet points.
fn render_schema_fields(out: &mut String, schema: &Value) {
    let Some(properties) = schema.get("properties").and_then(Value::as_object) else {
        out.push_str("_No fields._\n");
        return;
    };
    let required = required_field_set(schema);
    let mut keys: Vec<&String> = properties.keys().collect();
    keys.sort();
    for key in keys {
        let value = &properties[key];
        let required_label = if required.contains(key) { "required" } else { "optional" };
        let nullable_label = if schema_is_nullable(value) { "nullable" } else { "" };
        let mut qualifiers = vec![required_label.to_string()];
        if !nullable_label.is_empty() {
            qualifiers.push(nullable_label.to_string());
        }
        let qualifier_text = qualifiers.join(", ");
        let description = schema_description(value).unwrap_or_else(|| {
            schema_summary(value).unwrap_or_else(|| String::from("See schema for details."))
        });
        out.push_str("- `");
        out.push_str(key);
        out.push_str("` (");
        out.push_str(&qualifier_text);
        out.push_str("): ");
        out.push_str(&description);
        out.push('\n');
    }
}

/// Collect required field names from a JSON schema object.
fn required_field_set(schema: &Value) -> BTreeSet<String> {
    let mut required = BTreeSet::new();
    if let Some(items) = schema.get("required").and_then(Value::as_array) {
        for item in items {
            if let Some(field) = item.as_str() {
                required.insert(field.to_string());
            }
        }
    }
    required
}

/// Extract a description from a schema if present.
fn schema_description(schema: &Value) -> Option<String> {
    schema.get("description").and_then(Value::as_str).map(str::to_string)
}

/// Provide a short fallback summary when a schema lacks a description.
fn schema_summary(schema: &Value) -> Option<String> {
    if let Some(one_of) = schema.get("oneOf").and_then(Value::as_array) {
        let mut options = Vec::new();
        for option in one_of {
            if let Some(label) = option.get("type").and_then(Value::as_str) {
                options.push(label.to_string());
            }
        }
        if !options.is_empty() {
            return Some(format!("One of: {}.", options.join(", ")));
        }
    }
    schema.get("type").and_then(Value::as_str).map(|value| {
        let mut summary = String::from("Type: ");
        summary.push_str(value);
        summary.push('.');
        summary
    })
}

/// Determine whether a schema allows null values.
fn schema_is_nullable(schema: &Value) -> bool {
    schema.get("oneOf").and_then(Value::as_array).is_some_and(|options| {
        options.iter().any(|option| option.get("type").and_then(Value::as_str) == Some("null"))
    })
}

// ============================================================================
// SECTION: Input And Output Schemas
// ============================================================================

/// Builds the input schema for `server_health_check`.
#[must_use]
fn server_health_check_input_schema() -> Value {
    tool_input_schema(&json!({}), &[])
}

/// Builds the output schema for `server_health_check`.
#[must_use]
fn server_health_check_output_schema() -> Value {
    tool_output_schema(
        &json!({
            "server": schema_for_string("Bridge server name."),
            "version": schema_for_string("Bridge server version."),
            "status": {
                "type": "string",
                "enum": ["connected", "degraded"],
                "description": "connected when a Yamcs session exists, degraded otherwise."
            },
            "yamcs_url": schema_for_string("Configured Yamcs base URL."),
            "yamcs_instance": schema_for_string("Configured default instance."),
            "subsystems": schema_for_string_array("Enabled subsystem labels.")
        }),
        &["server", "version", "status", "yamcs_url", "yamcs_instance", "subsystems"],
    )
}

/// Builds the input schema for `server_test_connection`.
#[must_use]
fn server_test_connection_input_schema() -> Value {
    tool_input_schema(&json!({}), &[])
}

/// Builds the output schema for `server_test_connection`.
#[must_use]
fn server_test_connection_output_schema() -> Value {
    tool_output_schema(
        &json!({
            "connected": {
                "type": "boolean",
                "description": "Always true; connection failures return the error envelope."
            },
            "yamcs_url": schema_for_string("Configured Yamcs base URL."),
            "server_id": schema_nullable_string("Yamcs server identifier."),
            "yamcs_version": schema_nullable_string("Yamcs server version."),
            "message": schema_for_string("Human-readable connection summary.")
        }),
        &["connected", "yamcs_url", "server_id", "yamcs_version", "message"],
    )
}

/// Builds the input schema for `mdb_list_parameters`.
#[must_use]
fn mdb_list_parameters_input_schema() -> Value {
    tool_input_schema(
        &json!({
            "instance": schema_instance_argument(),
            "system": schema_for_string("Space system prefix filter, e.g. /YSS/SIMULATOR."),
            "search": schema_for_string("Case-insensitive substring filter on qualified names."),
            "limit": schema_limit("Maximum number of parameters to return.", 100)
        }),
        &[],
    )
}

/// Builds the output schema for `mdb_list_parameters`.
#[must_use]
fn mdb_list_parameters_output_schema() -> Value {
    tool_output_schema(
        &json!({
            "instance": schema_for_string("Instance the listing was read from."),
            "count": schema_count("Number of parameters returned."),
            "parameters": {
                "type": "array",
                "items": object_schema(
                    &json!({
                        "name": schema_for_string("Short parameter name."),
                        "qualified_name": schema_for_string("Fully qualified parameter name."),
                        "type": schema_nullable_string("Engineering type."),
                        "units": schema_nullable_string("Engineering units."),
                        "description": schema_nullable_string("Parameter description.")
                    }),
                    &["name", "qualified_name", "type", "units", "description"],
                )
            }
        }),
        &["instance", "count", "parameters"],
    )
}

/// Builds the input schema for `mdb_describe_parameter`.
#[must_use]
fn mdb_describe_parameter_input_schema() -> Value {
    tool_input_schema(
        &json!({
            "parameter": schema_for_string("Fully qualified parameter name."),
            "instance": schema_instance_argument()
        }),
        &["parameter"],
    )
}

/// Builds the output schema for `mdb_describe_parameter`.
#[must_use]
fn mdb_describe_parameter_output_schema() -> Value {
    tool_output_schema(
        &json!({
            "name": schema_for_string("Short parameter name."),
            "qualified_name": schema_for_string("Fully qualified parameter name."),
            "alias": schema_nullable_string("Alias in another naming namespace."),
            "type": schema_nullable_string("Engineering type."),
            "units": schema_nullable_string("Engineering units."),
            "description": schema_nullable_string("Parameter description."),
            "data_source": schema_nullable_string("Data source, e.g. TELEMETERED or DERIVED.")
        }),
        &["name", "qualified_name", "alias", "type", "units", "description", "data_source"],
    )
}

/// Builds the input schema for `mdb_list_commands`.
#[must_use]
fn mdb_list_commands_input_schema() -> Value {
    tool_input_schema(
        &json!({
            "instance": schema_instance_argument(),
            "system": schema_for_string("Space system prefix filter, e.g. /YSS/SIMULATOR."),
            "search": schema_for_string("Case-insensitive substring filter on qualified names."),
            "limit": schema_limit("Maximum number of commands to return.", 100)
        }),
        &[],
    )
}

/// Builds the output schema for `mdb_list_commands`.
#[must_use]
fn mdb_list_commands_output_schema() -> Value {
    tool_output_schema(
        &json!({
            "instance": schema_for_string("Instance the listing was read from."),
            "count": schema_count("Number of commands returned."),
            "commands": {
                "type": "array",
                "items": object_schema(
                    &json!({
                        "name": schema_for_string("Short command name."),
                        "qualified_name": schema_for_string("Fully qualified command name."),
                        "description": schema_nullable_string("Command description."),
                        "abstract": {
                            "type": "boolean",
                            "description": "True for abstract base commands that cannot be issued."
                        }
                    }),
                    &["name", "qualified_name", "description", "abstract"],
                )
            }
        }),
        &["instance", "count", "commands"],
    )
}

/// Builds the input schema for `mdb_describe_command`.
#[must_use]
fn mdb_describe_command_input_schema() -> Value {
    tool_input_schema(
        &json!({
            "command": schema_for_string("Fully qualified command name."),
            "instance": schema_instance_argument()
        }),
        &["command"],
    )
}

/// Builds the output schema for `mdb_describe_command`.
#[must_use]
fn mdb_describe_command_output_schema() -> Value {
    tool_output_schema(
        &json!({
            "name": schema_for_string("Short command name."),
            "qualified_name": schema_for_string("Fully qualified command name."),
            "description": schema_nullable_string("Command description."),
            "abstract": {
                "type": "boolean",
                "description": "True for abstract base commands that cannot be issued."
            },
            "significance": schema_nullable_significance(),
            "arguments": {
                "type": "array",
                "items": command_argument_schema(),
                "description": "Argument descriptors declared in the MDB."
            }
        }),
        &["name", "qualified_name", "description", "abstract", "significance", "arguments"],
    )
}

/// Builds the input schema for `mdb_list_space_systems`.
#[must_use]
fn mdb_list_space_systems_input_schema() -> Value {
    tool_input_schema(
        &json!({
            "instance": schema_instance_argument()
        }),
        &[],
    )
}

/// Builds the output schema for `mdb_list_space_systems`.
#[must_use]
fn mdb_list_space_systems_output_schema() -> Value {
    tool_output_schema(
        &json!({
            "instance": schema_for_string("Instance the listing was read from."),
            "count": schema_count("Number of space systems returned."),
            "space_systems": {
                "type": "array",
                "items": object_schema(
                    &json!({
                        "name": schema_for_string("Short space system name."),
                        "qualified_name": schema_for_string("Fully qualified space system name."),
                        "description": schema_nullable_string("Space system description.")
                    }),
                    &["name", "qualified_name", "description"],
                )
            }
        }),
        &["instance", "count", "space_systems"],
    )
}

/// Builds the input schema for `processors_list`.
#[must_use]
fn processors_list_input_schema() -> Value {
    tool_input_schema(
        &json!({
            "instance": schema_instance_argument()
        }),
        &[],
    )
}

/// Builds the output schema for `processors_list`.
#[must_use]
fn processors_list_output_schema() -> Value {
    tool_output_schema(
        &json!({
            "instance": schema_for_string("Instance the listing was read from."),
            "count": schema_count("Number of processors returned."),
            "processors": {
                "type": "array",
                "items": object_schema(
                    &json!({
                        "name": schema_for_string("Processor name."),
                        "state": schema_for_string("Processor state, e.g. RUNNING."),
                        "type": schema_for_string("Processor type, e.g. realtime or Archive."),
                        "mission_time": schema_nullable_string("Current mission time, ISO-8601."),
                        "replay": {
                            "type": "boolean",
                            "description": "True for replay processors."
                        },
                        "persistent": {
                            "type": "boolean",
                            "description": "True when the processor survives client disconnects."
                        }
                    }),
                    &["name", "state", "type", "mission_time", "replay", "persistent"],
                )
            }
        }),
        &["instance", "count", "processors"],
    )
}

/// Builds the input schema for `processors_describe`.
#[must_use]
fn processors_describe_input_schema() -> Value {
    tool_input_schema(
        &json!({
            "processor": schema_for_string("Processor name."),
            "instance": schema_instance_argument()
        }),
        &["processor"],
    )
}

/// Builds the output schema for `processors_describe`.
#[must_use]
fn processors_describe_output_schema() -> Value {
    tool_output_schema(
        &json!({
            "name": schema_for_string("Processor name."),
            "instance": schema_for_string("Owning instance."),
            "state": schema_for_string("Processor state, e.g. RUNNING."),
            "type": schema_for_string("Processor type, e.g. realtime or Archive."),
            "mission_time": schema_nullable_string("Current mission time, ISO-8601."),
            "owner": schema_nullable_string("User that created the processor."),
            "persistent": {
                "type": "boolean",
                "description": "True when the processor survives client disconnects."
            },
            "protected": {
                "type": "boolean",
                "description": "True when Yamcs refuses to delete the processor."
            },
            "replay": {
                "type": "boolean",
                "description": "True for replay processors."
            },
            "replay_config": {
                "oneOf": [
                    { "type": "null" },
                    object_schema(
                        &json!({
                            "start": schema_nullable_string("Replay range start, ISO-8601."),
                            "stop": schema_nullable_string("Replay range stop, ISO-8601."),
                            "speed": schema_nullable_string("Replay speed descriptor."),
                            "state": schema_nullable_string("Replay state, e.g. RUNNING or PAUSED.")
                        }),
                        &["start", "stop", "speed", "state"],
                    )
                ],
                "description": "Replay request details; null for realtime processors."
            },
            "services": schema_for_string_array("Processor service names.")
        }),
        &[
            "name",
            "instance",
            "state",
            "type",
            "mission_time",
            "owner",
            "persistent",
            "protected",
            "replay",
            "replay_config",
            "services",
        ],
    )
}

/// Builds the input schema for `processors_delete`.
#[must_use]
fn processors_delete_input_schema() -> Value {
    tool_input_schema(
        &json!({
            "processor": schema_for_string("Processor name to delete."),
            "instance": schema_instance_argument()
        }),
        &["processor"],
    )
}

/// Builds the output schema for `processors_delete`.
#[must_use]
fn processors_delete_output_schema() -> Value {
    tool_output_schema(
        &json!({
            "success": schema_success_flag(),
            "processor": schema_for_string("Deleted processor name."),
            "instance": schema_for_string("Owning instance."),
            "message": schema_for_string("Human-readable confirmation.")
        }),
        &["success", "processor", "instance", "message"],
    )
}

/// Builds the input schema for `links_list`.
#[must_use]
fn links_list_input_schema() -> Value {
    tool_input_schema(
        &json!({
            "instance": schema_instance_argument()
        }),
        &[],
    )
}

/// Builds the output schema for `links_list`.
#[must_use]
fn links_list_output_schema() -> Value {
    tool_output_schema(
        &json!({
            "instance": schema_for_string("Instance the listing was read from."),
            "count": schema_count("Number of links returned."),
            "links": {
                "type": "array",
                "items": object_schema(
                    &json!({
                        "name": schema_for_string("Link name."),
                        "type": schema_nullable_string("Link implementation class."),
                        "status": schema_for_string("Observed status, e.g. OK or FAILED."),
                        "disabled": {
                            "type": "boolean",
                            "description": "True when an operator disabled the link."
                        },
                        "parent": schema_nullable_string("Parent link for aggregated links."),
                        "data_in_count": schema_count("Frames or packets received."),
                        "data_out_count": schema_count("Frames or packets sent.")
                    }),
                    &[
                        "name",
                        "type",
                        "status",
                        "disabled",
                        "parent",
                        "data_in_count",
                        "data_out_count",
                    ],
                )
            }
        }),
        &["instance", "count", "links"],
    )
}

/// Builds the input schema for `links_describe`.
#[must_use]
fn links_describe_input_schema() -> Value {
    tool_input_schema(
        &json!({
            "link": schema_for_string("Link name."),
            "instance": schema_instance_argument()
        }),
        &["link"],
    )
}

/// Builds the output schema for `links_describe`.
#[must_use]
fn links_describe_output_schema() -> Value {
    tool_output_schema(
        &json!({
            "name": schema_for_string("Link name."),
            "type": schema_nullable_string("Link implementation class."),
            "status": schema_for_string("Observed status, e.g. OK or FAILED."),
            "disabled": {
                "type": "boolean",
                "description": "True when an operator disabled the link."
            },
            "statistics": object_schema(
                &json!({
                    "data_in_count": schema_count("Frames or packets received."),
                    "data_out_count": schema_count("Frames or packets sent."),
                    "last_data_in": schema_nullable_string("Last inbound data time, ISO-8601."),
                    "last_data_out": schema_nullable_string("Last outbound data time, ISO-8601.")
                }),
                &["data_in_count", "data_out_count", "last_data_in", "last_data_out"],
            ),
            "detail": schema_nullable_string("Detailed status text from the link."),
            "extra": {
                "type": "object",
                "description": "Link-type specific fields reported by Yamcs."
            },
            "actions": {
                "type": "array",
                "items": { "type": "object" },
                "description": "Custom actions the link exposes."
            }
        }),
        &["name", "type", "status", "disabled", "statistics", "detail", "extra", "actions"],
    )
}

/// Builds the input schema for `links_enable`.
#[must_use]
fn links_enable_input_schema() -> Value {
    link_action_input_schema()
}

/// Builds the input schema for `links_disable`.
#[must_use]
fn links_disable_input_schema() -> Value {
    link_action_input_schema()
}

/// Builds the input schema for `links_reset`.
#[must_use]
fn links_reset_input_schema() -> Value {
    link_action_input_schema()
}

/// Shared input schema for the link action tools.
#[must_use]
fn link_action_input_schema() -> Value {
    tool_input_schema(
        &json!({
            "link": schema_for_string("Link name."),
            "instance": schema_instance_argument()
        }),
        &["link"],
    )
}

/// Shared output schema for the link action tools.
#[must_use]
fn link_action_output_schema(operation: &str) -> Value {
    tool_output_schema(
        &json!({
            "success": schema_success_flag(),
            "link": schema_for_string("Link name."),
            "operation": {
                "type": "string",
                "const": operation,
                "description": "Action that was performed."
            },
            "message": schema_for_string("Human-readable confirmation.")
        }),
        &["success", "link", "operation", "message"],
    )
}

/// Builds the input schema for `links_statistics`.
#[must_use]
fn links_statistics_input_schema() -> Value {
    tool_input_schema(
        &json!({
            "instance": schema_instance_argument()
        }),
        &[],
    )
}

/// Builds the output schema for `links_statistics`.
#[must_use]
fn links_statistics_output_schema() -> Value {
    tool_output_schema(
        &json!({
            "instance": schema_for_string("Instance the statistics were read from."),
            "statistics": object_schema(
                &json!({
                    "total_links": schema_count("Total number of links."),
                    "enabled_links": schema_count("Links not disabled by an operator."),
                    "disabled_links": schema_count("Links disabled by an operator."),
                    "ok_links": schema_count("Links with observed status OK."),
                    "failed_links": schema_count("Links with observed status FAILED."),
                    "total_data_in": schema_count("Sum of inbound counters."),
                    "total_data_out": schema_count("Sum of outbound counters."),
                    "links": {
                        "type": "array",
                        "items": object_schema(
                            &json!({
                                "name": schema_for_string("Link name."),
                                "status": schema_for_string("Observed status."),
                                "data_in": schema_count("Frames or packets received."),
                                "data_out": schema_count("Frames or packets sent.")
                            }),
                            &["name", "status", "data_in", "data_out"],
                        )
                    }
                }),
                &[
                    "total_links",
                    "enabled_links",
                    "disabled_links",
                    "ok_links",
                    "failed_links",
                    "total_data_in",
                    "total_data_out",
                    "links",
                ],
            )
        }),
        &["instance", "statistics"],
    )
}

/// Builds the input schema for `storage_list_buckets`.
#[must_use]
fn storage_list_buckets_input_schema() -> Value {
    tool_input_schema(
        &json!({
            "instance": schema_instance_argument()
        }),
        &[],
    )
}

/// Builds the output schema for `storage_list_buckets`.
#[must_use]
fn storage_list_buckets_output_schema() -> Value {
    tool_output_schema(
        &json!({
            "instance": schema_for_string("Instance the buckets belong to."),
            "count": schema_count("Number of buckets returned."),
            "buckets": {
                "type": "array",
                "items": object_schema(
                    &json!({
                        "name": schema_for_string("Bucket name."),
                        "size": schema_count("Total stored bytes."),
                        "object_count": schema_count("Number of stored objects."),
                        "created": schema_nullable_string("Bucket creation time, ISO-8601.")
                    }),
                    &["name", "size", "object_count", "created"],
                )
            }
        }),
        &["instance", "count", "buckets"],
    )
}

/// Builds the input schema for `storage_list_objects`.
#[must_use]
fn storage_list_objects_input_schema() -> Value {
    tool_input_schema(
        &json!({
            "bucket": schema_for_string("Bucket name."),
            "prefix": schema_for_string("Only return objects whose name starts with this prefix."),
            "limit": schema_limit("Maximum number of objects to return.", 100),
            "instance": schema_instance_argument()
        }),
        &["bucket"],
    )
}

/// Builds the output schema for `storage_list_objects`.
#[must_use]
fn storage_list_objects_output_schema() -> Value {
    tool_output_schema(
        &json!({
            "bucket": schema_for_string("Bucket name."),
            "instance": schema_for_string("Instance the bucket belongs to."),
            "count": schema_count("Number of objects returned."),
            "objects": {
                "type": "array",
                "items": object_schema(
                    &json!({
                        "name": schema_for_string("Object name."),
                        "size": schema_count("Object size in bytes."),
                        "created": schema_nullable_string("Object creation time, ISO-8601."),
                        "metadata": {
                            "type": "object",
                            "description": "User metadata attached to the object."
                        }
                    }),
                    &["name", "size", "created", "metadata"],
                )
            }
        }),
        &["bucket", "instance", "count", "objects"],
    )
}

/// Builds the input schema for `storage_describe_object`.
#[must_use]
fn storage_describe_object_input_schema() -> Value {
    tool_input_schema(
        &json!({
            "bucket": schema_for_string("Bucket name."),
            "object": schema_for_string("Object name."),
            "instance": schema_instance_argument()
        }),
        &["bucket", "object"],
    )
}

/// Builds the output schema for `storage_describe_object`.
#[must_use]
fn storage_describe_object_output_schema() -> Value {
    tool_output_schema(
        &json!({
            "name": schema_for_string("Object name."),
            "bucket": schema_for_string("Bucket name."),
            "size": schema_count("Object size in bytes."),
            "created": schema_nullable_string("Object creation time, ISO-8601."),
            "metadata": {
                "type": "object",
                "description": "User metadata attached to the object."
            }
        }),
        &["name", "bucket", "size", "created", "metadata"],
    )
}

/// Builds the input schema for `storage_delete_object`.
#[must_use]
fn storage_delete_object_input_schema() -> Value {
    tool_input_schema(
        &json!({
            "bucket": schema_for_string("Bucket name."),
            "object": schema_for_string("Object name to delete."),
            "instance": schema_instance_argument()
        }),
        &["bucket", "object"],
    )
}

/// Builds the output schema for `storage_delete_object`.
#[must_use]
fn storage_delete_object_output_schema() -> Value {
    tool_output_schema(
        &json!({
            "success": schema_success_flag(),
            "bucket": schema_for_string("Bucket name."),
            "object": schema_for_string("Deleted object name."),
            "message": schema_for_string("Human-readable confirmation.")
        }),
        &["success", "bucket", "object", "message"],
    )
}

/// Builds the input schema for `storage_create_bucket`.
#[must_use]
fn storage_create_bucket_input_schema() -> Value {
    tool_input_schema(
        &json!({
            "name": schema_for_string("Name of the bucket to create."),
            "instance": schema_instance_argument()
        }),
        &["name"],
    )
}

/// Builds the output schema for `storage_create_bucket`.
#[must_use]
fn storage_create_bucket_output_schema() -> Value {
    tool_output_schema(
        &json!({
            "success": schema_success_flag(),
            "bucket": object_schema(
                &json!({
                    "name": schema_for_string("Bucket name."),
                    "created": schema_nullable_string("Bucket creation time, ISO-8601.")
                }),
                &["name", "created"],
            ),
            "message": schema_for_string("Human-readable confirmation.")
        }),
        &["success", "bucket", "message"],
    )
}

/// Builds the input schema for `instances_list`.
#[must_use]
fn instances_list_input_schema() -> Value {
    tool_input_schema(&json!({}), &[])
}

/// Builds the output schema for `instances_list`.
#[must_use]
fn instances_list_output_schema() -> Value {
    tool_output_schema(
        &json!({
            "count": schema_count("Number of instances returned."),
            "instances": {
                "type": "array",
                "items": object_schema(
                    &json!({
                        "name": schema_for_string("Instance name."),
                        "state": schema_for_string("Instance state, e.g. RUNNING or OFFLINE."),
                        "mission_time": schema_nullable_string("Current mission time, ISO-8601."),
                        "processors": schema_count("Number of processors in the instance.")
                    }),
                    &["name", "state", "mission_time", "processors"],
                )
            }
        }),
        &["count", "instances"],
    )
}

/// Builds the input schema for `instances_describe`.
#[must_use]
fn instances_describe_input_schema() -> Value {
    tool_input_schema(
        &json!({
            "instance": schema_instance_argument()
        }),
        &[],
    )
}

/// Builds the output schema for `instances_describe`.
#[must_use]
fn instances_describe_output_schema() -> Value {
    tool_output_schema(
        &json!({
            "name": schema_for_string("Instance name."),
            "state": schema_for_string("Instance state, e.g. RUNNING or OFFLINE."),
            "mission_time": schema_nullable_string("Current mission time, ISO-8601."),
            "labels": {
                "type": "object",
                "description": "Labels attached to the instance."
            },
            "capabilities": schema_for_string_array("Capabilities the instance advertises."),
            "template": schema_nullable_string("Template the instance was created from."),
            "template_args": {
                "type": "object",
                "description": "Arguments the template was instantiated with."
            },
            "failure_cause": schema_nullable_string("Failure description for FAILED instances."),
            "processors": object_schema(
                &json!({
                    "count": schema_count("Number of processors."),
                    "items": {
                        "type": "array",
                        "items": object_schema(
                            &json!({
                                "name": schema_for_string("Processor name."),
                                "state": schema_for_string("Processor state."),
                                "type": schema_for_string("Processor type."),
                                "persistent": {
                                    "type": "boolean",
                                    "description": "True when the processor survives disconnects."
                                },
                                "replay": {
                                    "type": "boolean",
                                    "description": "True for replay processors."
                                }
                            }),
                            &["name", "state", "type", "persistent", "replay"],
                        )
                    }
                }),
                &["count", "items"],
            ),
            "mission_database": {
                "oneOf": [
                    { "type": "null" },
                    object_schema(
                        &json!({
                            "name": schema_nullable_string("Mission database name."),
                            "version": schema_nullable_string("Mission database version.")
                        }),
                        &["name", "version"],
                    )
                ],
                "description": "Mission database identification, when reported."
            }
        }),
        &[
            "name",
            "state",
            "mission_time",
            "labels",
            "capabilities",
            "template",
            "template_args",
            "failure_cause",
            "processors",
            "mission_database",
        ],
    )
}

/// Builds the input schema for `instances_start`.
#[must_use]
fn instances_start_input_schema() -> Value {
    tool_input_schema(
        &json!({
            "instance": schema_for_string("Instance name to start.")
        }),
        &["instance"],
    )
}

/// Builds the input schema for `instances_stop`.
#[must_use]
fn instances_stop_input_schema() -> Value {
    tool_input_schema(
        &json!({
            "instance": schema_for_string("Instance name to stop.")
        }),
        &["instance"],
    )
}

/// Shared output schema for the instance lifecycle tools.
#[must_use]
fn instance_action_output_schema(past_tense: &str) -> Value {
    let message = format!("Confirmation that the instance was {past_tense}.");
    tool_output_schema(
        &json!({
            "success": schema_success_flag(),
            "instance": schema_for_string("Instance name."),
            "message": schema_for_string(&message)
        }),
        &["success", "instance", "message"],
    )
}

/// Builds the input schema for `alarms_list`.
#[must_use]
fn alarms_list_input_schema() -> Value {
    tool_input_schema(
        &json!({
            "processor": schema_processor_argument(),
            "instance": schema_instance_argument()
        }),
        &[],
    )
}

/// Builds the output schema for `alarms_list`.
#[must_use]
fn alarms_list_output_schema() -> Value {
    tool_output_schema(
        &json!({
            "instance": schema_for_string("Instance the alarms were read from."),
            "processor": schema_for_string("Processor the alarms were read from."),
            "summary": alarm_summary_schema(),
            "alarms": {
                "type": "array",
                "items": active_alarm_schema()
            }
        }),
        &["instance", "processor", "summary", "alarms"],
    )
}

/// Builds the input schema for `alarms_describe`.
#[must_use]
fn alarms_describe_input_schema() -> Value {
    tool_input_schema(
        &json!({
            "alarm": schema_for_string("Alarm name, i.e. the triggering parameter or event."),
            "sequence_number": {
                "type": "integer",
                "minimum": 0,
                "description": "Pin a specific activation; the latest one is used when omitted."
            },
            "processor": schema_processor_argument(),
            "instance": schema_instance_argument()
        }),
        &["alarm"],
    )
}

/// Builds the output schema for `alarms_describe`.
#[must_use]
fn alarms_describe_output_schema() -> Value {
    tool_output_schema(
        &json!({
            "instance": schema_for_string("Instance the alarm was read from."),
            "processor": schema_for_string("Processor the alarm was read from."),
            "alarm": detailed_alarm_schema()
        }),
        &["instance", "processor", "alarm"],
    )
}

/// Shared input schema for the alarm action tools.
#[must_use]
fn alarm_action_input_schema(comment_description: &str) -> Value {
    tool_input_schema(
        &json!({
            "alarm": schema_for_string("Alarm name, i.e. the triggering parameter or event."),
            "sequence_number": {
                "type": "integer",
                "minimum": 0,
                "description": "Sequence number of the activation to act on."
            },
            "comment": schema_for_string(comment_description),
            "processor": schema_processor_argument(),
            "instance": schema_instance_argument()
        }),
        &["alarm", "sequence_number"],
    )
}

/// Shared output schema for the alarm action tools.
#[must_use]
fn alarm_action_output_schema(past_tense: &str) -> Value {
    tool_output_schema(
        &json!({
            "success": schema_success_flag(),
            "alarm": schema_for_string("Alarm name."),
            "sequence_number": {
                "type": "integer",
                "minimum": 0,
                "description": "Sequence number that was acted on."
            },
            "processor": schema_for_string("Processor the alarm lives on."),
            "instance": schema_for_string("Owning instance."),
            "message": schema_for_string(&format!("Confirmation that the alarm was {past_tense}."))
        }),
        &["success", "alarm", "sequence_number", "processor", "instance", "message"],
    )
}

/// Builds the input schema for `alarms_read_log`.
#[must_use]
fn alarms_read_log_input_schema() -> Value {
    tool_input_schema(
        &json!({
            "start": schema_timearg("Start of the time range."),
            "stop": schema_timearg("End of the time range."),
            "limit": schema_limit("Maximum number of alarm records to return.", 100),
            "instance": schema_instance_argument()
        }),
        &[],
    )
}

/// Builds the output schema for `alarms_read_log`.
#[must_use]
fn alarms_read_log_output_schema() -> Value {
    tool_output_schema(
        &json!({
            "instance": schema_for_string("Instance the history was read from."),
            "count": schema_count("Number of alarm records returned."),
            "alarms": {
                "type": "array",
                "items": detailed_alarm_schema(),
                "description": "Archived alarm records, newest first."
            }
        }),
        &["instance", "count", "alarms"],
    )
}

/// Builds the input schema for `commands_list`.
#[must_use]
fn commands_list_input_schema() -> Value {
    tool_input_schema(
        &json!({
            "instance": schema_instance_argument(),
            "search": schema_for_string("Case-insensitive substring filter on qualified names."),
            "limit": schema_limit("Maximum number of commands to return.", 100)
        }),
        &[],
    )
}

/// Builds the output schema for `commands_list`.
#[must_use]
fn commands_list_output_schema() -> Value {
    tool_output_schema(
        &json!({
            "instance": schema_for_string("Instance the listing was read from."),
            "count": schema_count("Number of commands returned."),
            "commands": {
                "type": "array",
                "items": object_schema(
                    &json!({
                        "name": schema_for_string("Short command name."),
                        "qualified_name": schema_for_string("Fully qualified command name."),
                        "description": schema_nullable_string("Command description."),
                        "significance": schema_nullable_string(
                            "Consequence level, e.g. NORMAL or CRITICAL."
                        )
                    }),
                    &["name", "qualified_name", "description", "significance"],
                )
            }
        }),
        &["instance", "count", "commands"],
    )
}

/// Builds the input schema for `commands_describe`.
#[must_use]
fn commands_describe_input_schema() -> Value {
    tool_input_schema(
        &json!({
            "command": schema_for_string("Fully qualified command name."),
            "instance": schema_instance_argument()
        }),
        &["command"],
    )
}

/// Builds the output schema for `commands_describe`.
#[must_use]
fn commands_describe_output_schema() -> Value {
    tool_output_schema(
        &json!({
            "name": schema_for_string("Short command name."),
            "qualified_name": schema_for_string("Fully qualified command name."),
            "description": schema_nullable_string("Command description."),
            "abstract": {
                "type": "boolean",
                "description": "True for abstract base commands that cannot be issued."
            },
            "significance": schema_nullable_significance(),
            "arguments": {
                "type": "array",
                "items": command_argument_schema(),
                "description": "Argument descriptors declared in the MDB."
            },
            "constraints": {
                "type": "array",
                "items": { "type": "object" },
                "description": "Transmission constraints that gate execution."
            }
        }),
        &[
            "name",
            "qualified_name",
            "description",
            "abstract",
            "significance",
            "arguments",
            "constraints",
        ],
    )
}

/// Builds the input schema for `commands_run`.
#[must_use]
fn commands_run_input_schema() -> Value {
    tool_input_schema(
        &json!({
            "command": schema_for_string("Fully qualified command name to issue."),
            "args": {
                "type": ["object", "string"],
                "description": "Command arguments as name/value pairs, or a string containing \
                                their JSON encoding."
            },
            "processor": schema_processor_argument(),
            "dry_run": {
                "type": "boolean",
                "default": false,
                "description": "Validate without queueing the command."
            },
            "sequence_number": {
                "type": "integer",
                "minimum": 0,
                "description": "Client-assigned sequence number."
            },
            "comment": schema_for_string("Comment recorded in command history."),
            "instance": schema_instance_argument()
        }),
        &["command"],
    )
}

/// Builds the output schema for `commands_run`.
#[must_use]
fn commands_run_output_schema() -> Value {
    tool_output_schema(
        &json!({
            "success": schema_success_flag(),
            "dry_run": {
                "type": "boolean",
                "description": "Echoes the dry_run request flag."
            },
            "command": schema_for_string("Fully qualified command name."),
            "processor": schema_for_string("Processor the command was issued on."),
            "instance": schema_for_string("Owning instance."),
            "command_id": schema_nullable_string("Yamcs command identifier; null on dry runs."),
            "generation_time": schema_nullable_string("Command generation time, ISO-8601."),
            "origin": schema_nullable_string("Origin recorded in command history."),
            "sequence_number": {
                "oneOf": [
                    { "type": "null" },
                    { "type": "integer" }
                ],
                "description": "Sequence number assigned to the command."
            },
            "binary": schema_nullable_string("Encoded command bytes as hex."),
            "queue": schema_nullable_string("Command queue that accepted the command."),
            "significance": schema_nullable_string("Consequence level of the issued command."),
            "message": schema_for_string("Human-readable outcome summary.")
        }),
        &[
            "success",
            "dry_run",
            "command",
            "processor",
            "instance",
            "command_id",
            "generation_time",
            "origin",
            "sequence_number",
            "binary",
            "queue",
            "significance",
            "message",
        ],
    )
}

/// Builds the input schema for `commands_read_log`.
#[must_use]
fn commands_read_log_input_schema() -> Value {
    tool_input_schema(
        &json!({
            "lines": schema_limit("Maximum number of history entries to return.", 10),
            "since": schema_timearg("Start of the time range."),
            "until": schema_timearg("End of the time range."),
            "command": schema_for_string("Substring filter on qualified command names."),
            "instance": schema_instance_argument()
        }),
        &[],
    )
}

/// Builds the output schema for `commands_read_log`.
#[must_use]
fn commands_read_log_output_schema() -> Value {
    tool_output_schema(
        &json!({
            "instance": schema_for_string("Instance the history was read from."),
            "count": schema_count("Number of history entries returned."),
            "commands": {
                "type": "array",
                "items": object_schema(
                    &json!({
                        "name": schema_for_string("Fully qualified command name."),
                        "generation_time": schema_nullable_string(
                            "Command generation time, ISO-8601."
                        ),
                        "origin": schema_nullable_string("Origin recorded in command history."),
                        "sequence_number": {
                            "oneOf": [
                                { "type": "null" },
                                { "type": "integer" }
                            ],
                            "description": "Sequence number of the command."
                        },
                        "username": schema_nullable_string("User that issued the command."),
                        "queue": schema_nullable_string("Queue that processed the command."),
                        "binary": schema_nullable_string("Encoded command bytes as hex."),
                        "acknowledgments": {
                            "oneOf": [
                                { "type": "null" },
                                { "type": "object" }
                            ],
                            "description": "Acknowledgment stages keyed by name, each with \
                                            status, time, and message."
                        }
                    }),
                    &[
                        "name",
                        "generation_time",
                        "origin",
                        "sequence_number",
                        "username",
                        "queue",
                        "binary",
                        "acknowledgments",
                    ],
                )
            }
        }),
        &["instance", "count", "commands"],
    )
}

/// Builds the input schema for `archive_list_packets`.
#[must_use]
fn archive_list_packets_input_schema() -> Value {
    tool_input_schema(
        &json!({
            "start": schema_timearg("Start of the time range."),
            "stop": schema_timearg("End of the time range."),
            "name": schema_for_string("Packet name filter."),
            "limit": schema_limit("Maximum number of packets to return.", 100),
            "instance": schema_instance_argument()
        }),
        &[],
    )
}

/// Builds the output schema for `archive_list_packets`.
#[must_use]
fn archive_list_packets_output_schema() -> Value {
    tool_output_schema(
        &json!({
            "instance": schema_for_string("Instance the packets were read from."),
            "count": schema_count("Number of packets returned."),
            "packets": {
                "type": "array",
                "items": object_schema(
                    &json!({
                        "name": schema_for_string("Packet name."),
                        "generation_time": schema_nullable_string(
                            "Packet generation time, ISO-8601."
                        ),
                        "reception_time": schema_nullable_string(
                            "Ground reception time, ISO-8601."
                        ),
                        "size": schema_count("Packet size in bytes."),
                        "sequence_number": {
                            "oneOf": [
                                { "type": "null" },
                                { "type": "integer" }
                            ],
                            "description": "Packet sequence number."
                        }
                    }),
                    &["name", "generation_time", "reception_time", "size", "sequence_number"],
                )
            }
        }),
        &["instance", "count", "packets"],
    )
}

/// Builds the input schema for `archive_parameter_values`.
#[must_use]
fn archive_parameter_values_input_schema() -> Value {
    tool_input_schema(
        &json!({
            "parameter": schema_for_string("Fully qualified parameter name."),
            "start": schema_timearg("Start of the time range."),
            "stop": schema_timearg("End of the time range."),
            "limit": schema_limit("Maximum number of values to return.", 100),
            "instance": schema_instance_argument()
        }),
        &["parameter"],
    )
}

/// Builds the output schema for `archive_parameter_values`.
#[must_use]
fn archive_parameter_values_output_schema() -> Value {
    tool_output_schema(
        &json!({
            "parameter": schema_for_string("Fully qualified parameter name."),
            "instance": schema_for_string("Instance the values were read from."),
            "count": schema_count("Number of values returned."),
            "values": {
                "type": "array",
                "items": object_schema(
                    &json!({
                        "time": schema_nullable_string("Generation time, ISO-8601."),
                        "value": schema_for_json_value(
                            "Engineering value when calibrated, raw value otherwise."
                        ),
                        "status": schema_nullable_string(
                            "Monitoring result, e.g. IN_LIMITS or CRITICAL."
                        )
                    }),
                    &["time", "value", "status"],
                )
            }
        }),
        &["parameter", "instance", "count", "values"],
    )
}

/// Builds the input schema for `archive_command_history`.
#[must_use]
fn archive_command_history_input_schema() -> Value {
    tool_input_schema(
        &json!({
            "command": schema_for_string("Substring filter on qualified command names."),
            "start": schema_timearg("Start of the time range."),
            "stop": schema_timearg("End of the time range."),
            "limit": schema_limit("Maximum number of entries to return.", 100),
            "instance": schema_instance_argument()
        }),
        &[],
    )
}

/// Builds the output schema for `archive_command_history`.
#[must_use]
fn archive_command_history_output_schema() -> Value {
    tool_output_schema(
        &json!({
            "instance": schema_for_string("Instance the history was read from."),
            "count": schema_count("Number of entries returned."),
            "commands": {
                "type": "array",
                "items": object_schema(
                    &json!({
                        "id": schema_nullable_string("Yamcs command identifier."),
                        "name": schema_for_string("Fully qualified command name."),
                        "generation_time": schema_nullable_string(
                            "Command generation time, ISO-8601."
                        ),
                        "origin": schema_nullable_string("Origin recorded in command history."),
                        "username": schema_nullable_string("User that issued the command."),
                        "final_status": schema_nullable_string(
                            "Final acknowledgment status, when complete."
                        )
                    }),
                    &["id", "name", "generation_time", "origin", "username", "final_status"],
                )
            }
        }),
        &["instance", "count", "commands"],
    )
}

/// Builds the input schema for `archive_events`.
#[must_use]
fn archive_events_input_schema() -> Value {
    tool_input_schema(
        &json!({
            "severity": schema_for_string(
                "Minimum severity: info, watch, warning, distress, critical, or severe."
            ),
            "source": schema_for_string("Event source filter."),
            "start": schema_timearg("Start of the time range."),
            "stop": schema_timearg("End of the time range."),
            "limit": schema_limit("Maximum number of events to return.", 100),
            "instance": schema_instance_argument()
        }),
        &[],
    )
}

/// Builds the output schema for `archive_events`.
#[must_use]
fn archive_events_output_schema() -> Value {
    tool_output_schema(
        &json!({
            "instance": schema_for_string("Instance the events were read from."),
            "count": schema_count("Number of events returned."),
            "events": {
                "type": "array",
                "items": object_schema(
                    &json!({
                        "generation_time": schema_nullable_string(
                            "Event generation time, ISO-8601."
                        ),
                        "source": schema_nullable_string("Component that emitted the event."),
                        "type": schema_nullable_string("Event type label."),
                        "message": schema_for_string("Event message text."),
                        "severity": schema_for_string("Event severity, uppercase.")
                    }),
                    &["generation_time", "source", "type", "message", "severity"],
                )
            }
        }),
        &["instance", "count", "events"],
    )
}

// ============================================================================
// SECTION: Shared Schema Fragments
// ============================================================================

/// Returns the schema for a command argument descriptor.
#[must_use]
fn command_argument_schema() -> Value {
    object_schema(
        &json!({
            "name": schema_for_string("Argument name."),
            "type": schema_for_string("Argument engineering type."),
            "required": {
                "type": "boolean",
                "description": "True when the argument has no default value."
            },
            "description": schema_nullable_string("Argument description."),
            "default": schema_for_json_value("Default value when the argument is optional."),
            "range": {
                "oneOf": [
                    { "type": "null" },
                    object_schema(
                        &json!({
                            "min": {
                                "oneOf": [
                                    { "type": "null" },
                                    { "type": "number" }
                                ],
                                "description": "Minimum accepted value."
                            },
                            "max": {
                                "oneOf": [
                                    { "type": "null" },
                                    { "type": "number" }
                                ],
                                "description": "Maximum accepted value."
                            }
                        }),
                        &["min", "max"],
                    )
                ],
                "description": "Accepted value range for numeric arguments."
            }
        }),
        &["name", "type", "required", "description", "default", "range"],
    )
}

/// Returns the schema for command significance, nullable.
#[must_use]
fn schema_nullable_significance() -> Value {
    json!({
        "oneOf": [
            { "type": "null" },
            object_schema(
                &json!({
                    "consequence_level": schema_for_string(
                        "Consequence level, e.g. NORMAL, WARNING, or CRITICAL."
                    ),
                    "reason": schema_nullable_string("Why the command carries this level.")
                }),
                &["consequence_level", "reason"],
            )
        ],
        "description": "Operational significance declared in the MDB."
    })
}

/// Returns the schema for the alarm state summary block.
#[must_use]
fn alarm_summary_schema() -> Value {
    object_schema(
        &json!({
            "total": schema_count("Total active alarms."),
            "acknowledged": schema_count("Alarms acknowledged by an operator."),
            "unacknowledged": schema_count("Alarms awaiting acknowledgment."),
            "shelved": schema_count("Alarms currently shelved."),
            "ok": schema_count("Alarms whose triggering condition has returned to normal."),
            "latched": schema_count("Alarms latched until explicitly cleared.")
        }),
        &["total", "acknowledged", "unacknowledged", "shelved", "ok", "latched"],
    )
}

/// Returns the schema for an active alarm entry.
#[must_use]
fn active_alarm_schema() -> Value {
    object_schema(
        &json!({
            "name": schema_for_string("Alarm name, i.e. the triggering parameter or event."),
            "sequence_number": {
                "type": "integer",
                "minimum": 0,
                "description": "Activation sequence number."
            },
            "trigger_time": schema_nullable_string("Time the alarm triggered, ISO-8601."),
            "severity": schema_nullable_string("Alarm severity, e.g. WARNING or CRITICAL."),
            "violation_count": schema_count("Samples that violated the alarm condition."),
            "count": schema_count("Samples evaluated since the alarm triggered."),
            "is_acknowledged": {
                "type": "boolean",
                "description": "True once an operator acknowledged the alarm."
            },
            "is_ok": {
                "type": "boolean",
                "description": "True when the triggering condition has returned to normal."
            },
            "is_shelved": {
                "type": "boolean",
                "description": "True while the alarm is shelved."
            },
            "is_latched": {
                "type": "boolean",
                "description": "True when the alarm latches until cleared."
            }
        }),
        &[
            "name",
            "sequence_number",
            "trigger_time",
            "severity",
            "violation_count",
            "count",
            "is_acknowledged",
            "is_ok",
            "is_shelved",
            "is_latched",
        ],
    )
}

/// Returns the schema for a detailed alarm record with acknowledgment info.
#[must_use]
fn detailed_alarm_schema() -> Value {
    object_schema(
        &json!({
            "name": schema_for_string("Alarm name, i.e. the triggering parameter or event."),
            "sequence_number": {
                "type": "integer",
                "minimum": 0,
                "description": "Activation sequence number."
            },
            "trigger_time": schema_nullable_string("Time the alarm triggered, ISO-8601."),
            "update_time": schema_nullable_string("Time of the last state change, ISO-8601."),
            "severity": schema_nullable_string("Alarm severity, e.g. WARNING or CRITICAL."),
            "violation_count": schema_count("Samples that violated the alarm condition."),
            "count": schema_count("Samples evaluated since the alarm triggered."),
            "is_acknowledged": {
                "type": "boolean",
                "description": "True once an operator acknowledged the alarm."
            },
            "is_ok": {
                "type": "boolean",
                "description": "True when the triggering condition has returned to normal."
            },
            "is_shelved": {
                "type": "boolean",
                "description": "True while the alarm is shelved."
            },
            "is_latched": {
                "type": "boolean",
                "description": "True when the alarm latches until cleared."
            },
            "acknowledge_time": schema_nullable_string("Acknowledgment time, ISO-8601."),
            "acknowledged_by": schema_nullable_string("Operator that acknowledged the alarm."),
            "acknowledge_message": schema_nullable_string("Acknowledgment comment.")
        }),
        &[
            "name",
            "sequence_number",
            "trigger_time",
            "update_time",
            "severity",
            "violation_count",
            "count",
            "is_acknowledged",
            "is_ok",
            "is_shelved",
            "is_latched",
            "acknowledge_time",
            "acknowledged_by",
            "acknowledge_message",
        ],
    )
}

// ============================================================================
// SECTION: Contract Helpers
// ============================================================================

/// Builds a tool contract from the provided schema payloads.
///
/// Notes are surfaced in generated docs, so keep them user-facing and
/// implementation-agnostic.
#[must_use]
fn build_tool_contract(
    name: ToolName,
    description: &str,
    mutates: bool,
    input_schema: Value,
    output_schema: Value,
    notes: Vec<String>,
) -> ToolContract {
    ToolContract {
        name,
        description: description.to_string(),
        mutates,
        input_schema,
        output_schema,
        notes,
    }
}

/// Builds a standard tool input schema wrapper.
#[must_use]
fn tool_input_schema(properties: &Value, required: &[&str]) -> Value {
    with_schema(object_schema(properties, required))
}

/// Builds a standard tool output schema wrapper.
#[must_use]
fn tool_output_schema(properties: &Value, required: &[&str]) -> Value {
    with_schema(object_schema(properties, required))
}

/// Builds an object schema without the top-level `$schema` annotation.
#[must_use]
fn object_schema(properties: &Value, required: &[&str]) -> Value {
    let required_values: Vec<Value> =
        required.iter().map(|value| Value::String((*value).to_string())).collect();
    json!({
        "type": "object",
        "required": required_values,
        "properties": properties,
        "additionalProperties": false
    })
}

/// Adds a `$schema` header to a top-level JSON schema.
#[must_use]
fn with_schema(schema: Value) -> Value {
    let Value::Object(mut map) = schema else {
        return schema;
    };
    map.insert(
        String::from("$schema"),
        Value::String(String::from("https://json-schema.org/draft/2020-12/schema")),
    );
    Value::Object(map)
}

/// Returns a JSON schema for strings.
#[must_use]
fn schema_for_string(description: &str) -> Value {
    json!({
        "type": "string",
        "description": description
    })
}

/// Returns a JSON schema for nullable strings.
#[must_use]
fn schema_nullable_string(description: &str) -> Value {
    json!({
        "oneOf": [
            { "type": "null" },
            { "type": "string" }
        ],
        "description": description
    })
}

/// Returns a JSON schema for string arrays.
#[must_use]
fn schema_for_string_array(description: &str) -> Value {
    json!({
        "type": "array",
        "items": { "type": "string" },
        "description": description
    })
}

/// Returns a permissive JSON schema accepting any JSON value.
#[must_use]
fn schema_for_json_value(description: &str) -> Value {
    json!({
        "type": ["null", "boolean", "number", "string", "array", "object"],
        "description": description
    })
}

/// Returns a schema describing non-negative counters.
#[must_use]
fn schema_count(description: &str) -> Value {
    json!({
        "type": "integer",
        "minimum": 0,
        "description": description
    })
}

/// Returns a schema for listing limits, capped at 100.
#[must_use]
fn schema_limit(description: &str, default: u32) -> Value {
    json!({
        "type": "integer",
        "minimum": 1,
        "maximum": 100,
        "default": default,
        "description": description
    })
}

/// Returns the schema for the optional `instance` argument.
#[must_use]
fn schema_instance_argument() -> Value {
    schema_for_string("Yamcs instance; the configured default instance applies when omitted.")
}

/// Returns the schema for the optional `processor` argument.
#[must_use]
fn schema_processor_argument() -> Value {
    json!({
        "type": "string",
        "default": "realtime",
        "description": "Processor name."
    })
}

/// Returns the schema for time-valued arguments.
#[must_use]
fn schema_timearg(description: &str) -> Value {
    json!({
        "type": "string",
        "description": format!(
            "{description} ISO-8601 timestamp or one of: now, today, yesterday."
        )
    })
}

/// Returns the schema for the `success` discriminator on mutation results.
#[must_use]
fn schema_success_flag() -> Value {
    json!({
        "type": "boolean",
        "const": true,
        "description": "Always true; failures return the error envelope instead."
    })
}

#[cfg(test)]
mod tests;
