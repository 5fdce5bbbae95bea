// crates/yamcs-mcp/src/subsystems/alarms.rs
// ============================================================================
// Module: Alarms Subsystem
// Description: Alarm monitoring and lifecycle actions.
// Purpose: List, inspect, and work active alarms on a processor.
// Dependencies: yamcs-client, yamcs-contract
// ============================================================================

//! ## Overview
//! Alarms are keyed by the triggering parameter or event name plus a
//! sequence number that distinguishes re-activations. The lifecycle tools
//! (acknowledge, shelve, unshelve, clear) require the sequence number so an
//! operator action can never land on a newer activation than the one that
//! was inspected. `alarms_describe` accepts an optional sequence number and
//! falls back to the latest activation when it is omitted.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;

use serde::Deserialize;
use serde_json::Value;
use serde_json::json;
use yamcs_client::AlarmAction;
use yamcs_client::YamcsError;
use yamcs_client::types::AlarmData;
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
use crate::subsystems::processor_or_default;
use crate::subsystems::resolve_time_range;
use crate::subsystems::yamcs_failure;

// ============================================================================
// SECTION: Registration
// ============================================================================

/// Registers the alarm tools and resources.
///
/// # Errors
///
/// Returns [`RegistryError`] when a tool or resource is already registered.
pub fn register(
    tools: &mut ToolRegistry,
    resources: &mut ResourceRegistry,
    context: &Arc<SessionContext>,
) -> Result<(), RegistryError> {
    bind_tool(tools, context, ToolName::AlarmsList, list)?;
    bind_tool(tools, context, ToolName::AlarmsDescribe, describe)?;
    bind_tool(tools, context, ToolName::AlarmsAcknowledge, acknowledge)?;
    bind_tool(tools, context, ToolName::AlarmsShelve, shelve)?;
    bind_tool(tools, context, ToolName::AlarmsUnshelve, unshelve)?;
    bind_tool(tools, context, ToolName::AlarmsClear, clear)?;
    bind_tool(tools, context, ToolName::AlarmsReadLog, read_log)?;
    bind_resource(resources, context, ResourceName::AlarmsActive, active_overview)?;
    Ok(())
}

// ============================================================================
// SECTION: Requests
// ============================================================================

/// Arguments for `alarms_list`.
#[derive(Debug, Deserialize)]
struct ListRequest {
    /// Processor override.
    #[serde(default)]
    processor: Option<String>,
    /// Instance override.
    #[serde(default)]
    instance: Option<String>,
}

/// Arguments for `alarms_describe`.
#[derive(Debug, Deserialize)]
struct DescribeRequest {
    /// Alarm name, i.e. the triggering parameter or event.
    alarm: String,
    /// Activation to pin; the latest one is described when omitted.
    #[serde(default)]
    sequence_number: Option<u32>,
    /// Processor override.
    #[serde(default)]
    processor: Option<String>,
    /// Instance override.
    #[serde(default)]
    instance: Option<String>,
}

/// Arguments shared by the alarm lifecycle tools.
#[derive(Debug, Deserialize)]
struct ActionRequest {
    /// Alarm name, i.e. the triggering parameter or event.
    alarm: String,
    /// Activation to act on.
    sequence_number: u32,
    /// Operator comment recorded with the action.
    #[serde(default)]
    comment: Option<String>,
    /// Processor override.
    #[serde(default)]
    processor: Option<String>,
    /// Instance override.
    #[serde(default)]
    instance: Option<String>,
}

/// Arguments for `alarms_read_log`.
#[derive(Debug, Deserialize)]
struct ReadLogRequest {
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

/// Lists active alarms on a processor with the state summary.
async fn list(context: Arc<SessionContext>, payload: Value) -> Result<Value, ErrorEnvelope> {
    const TOOL: ToolName = ToolName::AlarmsList;
    let request: ListRequest = decode(TOOL, payload)?;
    let client = acquire(TOOL, &context).await?;
    let instance = context.instance(request.instance.as_deref());
    let processor = processor_or_default(request.processor.as_deref());
    let alarms = client.list_alarms(instance, processor).await.map_err(yamcs_failure(TOOL))?;
    let entries: Vec<Value> = alarms.iter().map(projection::active_alarm).collect();
    Ok(json!({
        "instance": instance,
        "processor": processor,
        "summary": projection::alarm_summary(&alarms),
        "alarms": entries,
    }))
}

/// Describes one activation of an alarm.
async fn describe(context: Arc<SessionContext>, payload: Value) -> Result<Value, ErrorEnvelope> {
    const TOOL: ToolName = ToolName::AlarmsDescribe;
    let request: DescribeRequest = decode(TOOL, payload)?;
    let client = acquire(TOOL, &context).await?;
    let instance = context.instance(request.instance.as_deref());
    let processor = processor_or_default(request.processor.as_deref());
    let alarms = client.list_alarms(instance, processor).await.map_err(yamcs_failure(TOOL))?;
    select_activation(&alarms, &request.alarm, request.sequence_number).map_or_else(
        || {
            Err(ErrorEnvelope::not_found(
                TOOL.as_str(),
                format!("Alarm '{}' not found on processor '{processor}'", request.alarm),
            ))
        },
        |alarm| {
            Ok(json!({
                "instance": instance,
                "processor": processor,
                "alarm": projection::detailed_alarm(alarm),
            }))
        },
    )
}

/// Acknowledges an alarm activation.
async fn acknowledge(context: Arc<SessionContext>, payload: Value) -> Result<Value, ErrorEnvelope> {
    alarm_action(&context, ToolName::AlarmsAcknowledge, AlarmAction::Acknowledge, payload).await
}

/// Shelves an alarm activation.
async fn shelve(context: Arc<SessionContext>, payload: Value) -> Result<Value, ErrorEnvelope> {
    alarm_action(&context, ToolName::AlarmsShelve, AlarmAction::Shelve, payload).await
}

/// Unshelves an alarm activation.
async fn unshelve(context: Arc<SessionContext>, payload: Value) -> Result<Value, ErrorEnvelope> {
    alarm_action(&context, ToolName::AlarmsUnshelve, AlarmAction::Unshelve, payload).await
}

/// Clears an alarm activation.
async fn clear(context: Arc<SessionContext>, payload: Value) -> Result<Value, ErrorEnvelope> {
    alarm_action(&context, ToolName::AlarmsClear, AlarmAction::Clear, payload).await
}

/// Reads the archived alarm log.
async fn read_log(context: Arc<SessionContext>, payload: Value) -> Result<Value, ErrorEnvelope> {
    const TOOL: ToolName = ToolName::AlarmsReadLog;
    let request: ReadLogRequest = decode(TOOL, payload)?;
    let limit = normalize_limit(TOOL, request.limit)?;
    let (start, stop) =
        resolve_time_range(TOOL, request.start.as_deref(), request.stop.as_deref())?;
    let client = acquire(TOOL, &context).await?;
    let instance = context.instance(request.instance.as_deref());
    let alarms = client
        .list_alarm_history(instance, start.as_deref(), stop.as_deref(), limit)
        .await
        .map_err(yamcs_failure(TOOL))?;
    let entries: Vec<Value> = alarms.iter().map(projection::detailed_alarm).collect();
    Ok(json!({
        "instance": instance,
        "count": entries.len(),
        "alarms": entries,
    }))
}

/// Runs one alarm lifecycle action and builds the confirmation payload.
async fn alarm_action(
    context: &SessionContext,
    tool: ToolName,
    action: AlarmAction,
    payload: Value,
) -> Result<Value, ErrorEnvelope> {
    let request: ActionRequest = decode(tool, payload)?;
    let client = acquire(tool, context).await?;
    let instance = context.instance(request.instance.as_deref());
    let processor = processor_or_default(request.processor.as_deref());
    client
        .edit_alarm(
            instance,
            processor,
            &request.alarm,
            request.sequence_number,
            action,
            request.comment.as_deref(),
        )
        .await
        .map_err(yamcs_failure(tool))?;
    let message = format!(
        "Alarm '{}' (seq: {}) {}",
        request.alarm,
        request.sequence_number,
        past_tense(action)
    );
    Ok(json!({
        "success": true,
        "alarm": request.alarm,
        "sequence_number": request.sequence_number,
        "processor": processor,
        "instance": instance,
        "message": message,
    }))
}

/// Picks the activation to describe: the exact sequence match when pinned,
/// otherwise the activation with the highest sequence number.
fn select_activation<'a>(
    alarms: &'a [AlarmData],
    name: &str,
    sequence: Option<u32>,
) -> Option<&'a AlarmData> {
    let mut matching = alarms.iter().filter(|alarm| alarm.qualified_name() == name);
    match sequence {
        Some(sequence) => matching.find(|alarm| alarm.seq_num == sequence),
        None => matching.max_by_key(|alarm| alarm.seq_num),
    }
}

/// Maps an action to the verb used in confirmation messages.
const fn past_tense(action: AlarmAction) -> &'static str {
    match action {
        AlarmAction::Acknowledge => "acknowledged",
        AlarmAction::Shelve => "shelved",
        AlarmAction::Unshelve => "unshelved",
        AlarmAction::Clear => "cleared",
    }
}

// ============================================================================
// SECTION: Resources
// ============================================================================

/// Renders active alarms across every instance and processor.
async fn active_overview(context: Arc<SessionContext>) -> Result<String, YamcsError> {
    let client = context.sessions.acquire().await?;
    let mut groups: Vec<(String, Vec<(String, Vec<AlarmData>)>)> = Vec::new();
    for instance in client.list_instances().await? {
        let Some(instance_name) = instance.name else { continue };
        let mut processors: Vec<(String, Vec<AlarmData>)> = Vec::new();
        for processor in client.list_processors(&instance_name).await? {
            let Some(processor_name) = processor.name else { continue };
            let alarms = client.list_alarms(&instance_name, &processor_name).await?;
            if !alarms.is_empty() {
                processors.push((processor_name, alarms));
            }
        }
        if !processors.is_empty() {
            groups.push((instance_name, processors));
        }
    }
    Ok(render_overview(&groups))
}

/// Renders the grouped alarm listing with the trailing state summary.
fn render_overview(groups: &[(String, Vec<(String, Vec<AlarmData>)>)]) -> String {
    let mut lines = vec!["Active Yamcs Alarms:".to_string()];
    let mut total = 0_usize;
    let mut acknowledged = 0_usize;
    let mut shelved = 0_usize;
    let mut ok = 0_usize;
    let mut latched = 0_usize;
    for (instance, processors) in groups {
        lines.push(format!("\n  Instance: {instance}"));
        for (processor, alarms) in processors {
            lines.push(format!("    Processor: {processor}"));
            for alarm in alarms {
                total += 1;
                if alarm.is_acknowledged() {
                    acknowledged += 1;
                }
                if alarm.is_shelved() {
                    shelved += 1;
                }
                if alarm.process_ok {
                    ok += 1;
                }
                if alarm.latching {
                    latched += 1;
                }
                let severity = alarm.severity.as_deref().unwrap_or("UNKNOWN");
                let ack_state = if alarm.is_acknowledged() { "ACK" } else { "UNACK" };
                let shelved_state = if alarm.is_shelved() { " [SHELVED]" } else { "" };
                let ok_state = if alarm.process_ok { " [OK]" } else { "" };
                lines.push(format!(
                    "      - {} (seq: {}) [{severity}] {ack_state}{shelved_state}{ok_state}",
                    alarm.qualified_name(),
                    alarm.seq_num
                ));
            }
        }
    }
    if total == 0 {
        lines.push("  No active alarms".to_string());
    } else {
        lines.push("\n  Summary:".to_string());
        lines.push(format!("    Total: {total}"));
        lines.push(format!("    Acknowledged: {acknowledged}"));
        lines.push(format!("    Unacknowledged: {}", total - acknowledged));
        lines.push(format!("    Shelved: {shelved}"));
        lines.push(format!("    OK: {ok}"));
        lines.push(format!("    Latched: {latched}"));
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

    use yamcs_client::types::NamedObjectId;

    use super::*;

    fn activation(name: &str, seq_num: u32) -> AlarmData {
        AlarmData {
            id: Some(NamedObjectId { name: Some(name.to_string()), namespace: None }),
            seq_num,
            ..AlarmData::default()
        }
    }

    #[test]
    fn every_action_has_a_past_tense_verb() {
        assert_eq!(past_tense(AlarmAction::Acknowledge), "acknowledged");
        assert_eq!(past_tense(AlarmAction::Shelve), "shelved");
        assert_eq!(past_tense(AlarmAction::Unshelve), "unshelved");
        assert_eq!(past_tense(AlarmAction::Clear), "cleared");
    }

    #[test]
    fn latest_activation_wins_when_no_sequence_is_pinned() {
        let alarms = vec![
            activation("/YSS/SIMULATOR/BatteryVoltage1", 3),
            activation("/YSS/SIMULATOR/BatteryVoltage1", 7),
            activation("/YSS/SIMULATOR/BatteryVoltage2", 9),
        ];

        let found = select_activation(&alarms, "/YSS/SIMULATOR/BatteryVoltage1", None).unwrap();
        assert_eq!(found.seq_num, 7);
    }

    #[test]
    fn pinned_sequence_must_match_exactly() {
        let alarms = vec![
            activation("/YSS/SIMULATOR/BatteryVoltage1", 3),
            activation("/YSS/SIMULATOR/BatteryVoltage1", 7),
        ];

        let found = select_activation(&alarms, "/YSS/SIMULATOR/BatteryVoltage1", Some(3)).unwrap();
        assert_eq!(found.seq_num, 3);
        assert!(select_activation(&alarms, "/YSS/SIMULATOR/BatteryVoltage1", Some(4)).is_none());
        assert!(select_activation(&alarms, "/YSS/SIMULATOR/Sensor", None).is_none());
    }

    #[test]
    fn overview_groups_alarms_and_counts_states() {
        let mut acknowledged = activation("/YSS/SIMULATOR/BatteryVoltage1", 4);
        acknowledged.acknowledged = true;
        acknowledged.severity = Some("CRITICAL".to_string());
        let mut pending = activation("/YSS/SIMULATOR/Altitude", 2);
        pending.severity = Some("WARNING".to_string());
        pending.process_ok = true;
        let groups = vec![(
            "simulator".to_string(),
            vec![("realtime".to_string(), vec![acknowledged, pending])],
        )];

        let text = render_overview(&groups);
        let expected = "Active Yamcs Alarms:\n\n  \
                        Instance: simulator\n    \
                        Processor: realtime\n      \
                        - /YSS/SIMULATOR/BatteryVoltage1 (seq: 4) [CRITICAL] ACK\n      \
                        - /YSS/SIMULATOR/Altitude (seq: 2) [WARNING] UNACK [OK]\n\n  \
                        Summary:\n    \
                        Total: 2\n    \
                        Acknowledged: 1\n    \
                        Unacknowledged: 1\n    \
                        Shelved: 0\n    \
                        OK: 1\n    \
                        Latched: 0";
        assert_eq!(text, expected);
    }

    #[test]
    fn overview_without_alarms_reports_none() {
        assert_eq!(render_overview(&[]), "Active Yamcs Alarms:\n  No active alarms");
    }
}
