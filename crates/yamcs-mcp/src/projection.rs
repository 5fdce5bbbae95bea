// crates/yamcs-mcp/src/projection.rs
// ============================================================================
// Module: Payload Projection
// Description: Maps Yamcs wire types onto tool result payloads.
// Purpose: Give every tool a stable, documented JSON shape independent of
//          which optional fields Yamcs chose to send.
// Dependencies: base64, serde_json, yamcs-client
// ============================================================================

//! ## Overview
//! Pure functions that turn decoded Yamcs payloads into the JSON mappings the
//! tools return. Every projection emits its full key set on every call.
//! Fields Yamcs omitted surface as null (or an empty object for metadata-like
//! fields), never as missing keys, so callers can index into results without
//! probing. Command binaries are re-encoded from base64 to hex, and archived
//! parameter samples prefer the calibrated engineering value over the raw one.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::fmt::Write as _;

use base64::Engine as _;
use serde_json::Map;
use serde_json::Value;
use serde_json::json;
use yamcs_client::types::AlarmData;
use yamcs_client::types::ArgumentInfo;
use yamcs_client::types::BucketInfo;
use yamcs_client::types::CommandHistoryEntry;
use yamcs_client::types::CommandInfo;
use yamcs_client::types::EventInfo;
use yamcs_client::types::InstanceInfo;
use yamcs_client::types::IssueCommandResponse;
use yamcs_client::types::LinkInfo;
use yamcs_client::types::NamedObjectId;
use yamcs_client::types::ObjectInfo;
use yamcs_client::types::PacketData;
use yamcs_client::types::ParameterInfo;
use yamcs_client::types::ParameterTypeInfo;
use yamcs_client::types::ParameterValueInfo;
use yamcs_client::types::ProcessorInfo;
use yamcs_client::types::ReplaySpeedInfo;
use yamcs_client::types::ServiceInfo;
use yamcs_client::types::SignificanceInfo;
use yamcs_client::types::SpaceSystemInfo;
use yamcs_client::types::YamcsValue;

// ============================================================================
// SECTION: Mission Database
// ============================================================================

/// Projects a parameter definition into a listing entry.
#[must_use]
pub fn parameter_summary(parameter: &ParameterInfo) -> Value {
    json!({
        "name": parameter.name.as_deref().unwrap_or_default(),
        "qualified_name": parameter.qualified_name.as_deref().unwrap_or_default(),
        "type": parameter.parameter_type.as_ref().and_then(|info| info.eng_type.as_deref()),
        "units": parameter.parameter_type.as_ref().and_then(ParameterTypeInfo::units),
        "description": parameter.short_description.as_deref(),
    })
}

/// Projects a parameter definition into the describe payload.
///
/// The alias prefers a namespace outside the XTCE tree, since path-rooted
/// aliases just repeat the qualified name.
#[must_use]
pub fn parameter_detail(parameter: &ParameterInfo) -> Value {
    json!({
        "name": parameter.name.as_deref().unwrap_or_default(),
        "qualified_name": parameter.qualified_name.as_deref().unwrap_or_default(),
        "alias": alias_label(&parameter.alias),
        "type": parameter.parameter_type.as_ref().and_then(|info| info.eng_type.as_deref()),
        "units": parameter.parameter_type.as_ref().and_then(ParameterTypeInfo::units),
        "description": parameter
            .short_description
            .as_deref()
            .or(parameter.long_description.as_deref()),
        "data_source": parameter.data_source.as_deref(),
    })
}

/// Projects a command definition into the Mission Database listing entry.
#[must_use]
pub fn command_summary(command: &CommandInfo) -> Value {
    json!({
        "name": command.name.as_deref().unwrap_or_default(),
        "qualified_name": command.qualified_name.as_deref().unwrap_or_default(),
        "description": command.short_description.as_deref(),
        "abstract": command.is_abstract,
    })
}

/// Projects a command definition into the Mission Database describe payload.
#[must_use]
pub fn command_detail(command: &CommandInfo) -> Value {
    let arguments: Vec<Value> = command.argument.iter().map(command_argument).collect();
    json!({
        "name": command.name.as_deref().unwrap_or_default(),
        "qualified_name": command.qualified_name.as_deref().unwrap_or_default(),
        "description": command.short_description.as_deref(),
        "abstract": command.is_abstract,
        "significance": significance_detail(command.significance.as_ref()),
        "arguments": arguments,
    })
}

/// Projects a space system into a listing entry.
#[must_use]
pub fn space_system_summary(system: &SpaceSystemInfo) -> Value {
    json!({
        "name": system.name.as_deref().unwrap_or_default(),
        "qualified_name": system.qualified_name.as_deref().unwrap_or_default(),
        "description": system.short_description.as_deref(),
    })
}

// ============================================================================
// SECTION: Processors
// ============================================================================

/// Projects a processor into a listing entry.
#[must_use]
pub fn processor_summary(processor: &ProcessorInfo) -> Value {
    json!({
        "name": processor.name.as_deref().unwrap_or_default(),
        "state": processor.state.as_deref().unwrap_or_default(),
        "type": processor.processor_type.as_deref().unwrap_or_default(),
        "mission_time": processor.time.as_deref(),
        "replay": processor.replay,
        "persistent": processor.persistent,
    })
}

/// Projects a processor and its instance services into the describe payload.
#[must_use]
pub fn processor_detail(
    processor: &ProcessorInfo,
    instance: &str,
    services: &[ServiceInfo],
) -> Value {
    let names: Vec<&str> = services.iter().filter_map(|service| service.name.as_deref()).collect();
    json!({
        "name": processor.name.as_deref().unwrap_or_default(),
        "instance": instance,
        "state": processor.state.as_deref().unwrap_or_default(),
        "type": processor.processor_type.as_deref().unwrap_or_default(),
        "mission_time": processor.time.as_deref(),
        "owner": processor.creator.as_deref(),
        "persistent": processor.persistent,
        "protected": processor.protected,
        "replay": processor.replay,
        "replay_config": replay_config(processor),
        "services": names,
    })
}

// ============================================================================
// SECTION: Links
// ============================================================================

/// Projects a data link into a listing entry.
#[must_use]
pub fn link_summary(link: &LinkInfo) -> Value {
    json!({
        "name": link.name.as_deref().unwrap_or_default(),
        "type": link.link_type.as_deref(),
        "status": link.status.as_deref().unwrap_or_default(),
        "disabled": link.disabled,
        "parent": link.parent_name.as_deref(),
        "data_in_count": link.data_in_count.unwrap_or(0),
        "data_out_count": link.data_out_count.unwrap_or(0),
    })
}

/// Projects a data link into the describe payload.
///
/// Yamcs does not report per-link last-data timestamps, so the statistics
/// block carries null placeholders for them.
#[must_use]
pub fn link_detail(link: &LinkInfo) -> Value {
    json!({
        "name": link.name.as_deref().unwrap_or_default(),
        "type": link.link_type.as_deref(),
        "status": link.status.as_deref().unwrap_or_default(),
        "disabled": link.disabled,
        "statistics": {
            "data_in_count": link.data_in_count.unwrap_or(0),
            "data_out_count": link.data_out_count.unwrap_or(0),
            "last_data_in": Value::Null,
            "last_data_out": Value::Null,
        },
        "detail": link.detailed_status.as_deref(),
        "extra": link.extra.clone().unwrap_or_else(|| json!({})),
        "actions": link.actions.clone(),
    })
}

/// Aggregates link counters into the statistics block.
#[must_use]
pub fn link_statistics(links: &[LinkInfo]) -> Value {
    let mut enabled: usize = 0;
    let mut disabled: usize = 0;
    let mut ok: usize = 0;
    let mut failed: usize = 0;
    let mut total_data_in: i64 = 0;
    let mut total_data_out: i64 = 0;
    let mut entries = Vec::with_capacity(links.len());
    for link in links {
        if link.disabled {
            disabled += 1;
        } else {
            enabled += 1;
        }
        match link.status.as_deref() {
            Some("OK") => ok += 1,
            Some("FAILED") => failed += 1,
            _ => {}
        }
        total_data_in += link.data_in_count.unwrap_or(0);
        total_data_out += link.data_out_count.unwrap_or(0);
        entries.push(json!({
            "name": link.name.as_deref().unwrap_or_default(),
            "status": link.status.as_deref().unwrap_or_default(),
            "data_in": link.data_in_count.unwrap_or(0),
            "data_out": link.data_out_count.unwrap_or(0),
        }));
    }
    json!({
        "total_links": links.len(),
        "enabled_links": enabled,
        "disabled_links": disabled,
        "ok_links": ok,
        "failed_links": failed,
        "total_data_in": total_data_in,
        "total_data_out": total_data_out,
        "links": entries,
    })
}

// ============================================================================
// SECTION: Storage
// ============================================================================

/// Projects a bucket into a listing entry.
#[must_use]
pub fn bucket_summary(bucket: &BucketInfo) -> Value {
    json!({
        "name": bucket.name.as_deref().unwrap_or_default(),
        "size": bucket.size.unwrap_or(0),
        "object_count": bucket.num_objects.unwrap_or(0),
        "created": bucket.created.as_deref(),
    })
}

/// Projects a stored object into a listing entry.
#[must_use]
pub fn object_summary(object: &ObjectInfo) -> Value {
    json!({
        "name": object.name.as_deref().unwrap_or_default(),
        "size": object.size.unwrap_or(0),
        "created": object.created.as_deref(),
        "metadata": string_map(object.metadata.as_ref()),
    })
}

/// Projects a stored object into the describe payload.
#[must_use]
pub fn object_detail(object: &ObjectInfo, bucket: &str) -> Value {
    json!({
        "name": object.name.as_deref().unwrap_or_default(),
        "bucket": bucket,
        "size": object.size.unwrap_or(0),
        "created": object.created.as_deref(),
        "metadata": string_map(object.metadata.as_ref()),
    })
}

// ============================================================================
// SECTION: Instances
// ============================================================================

/// Projects an instance into a listing entry.
#[must_use]
pub fn instance_summary(instance: &InstanceInfo) -> Value {
    json!({
        "name": instance.name.as_deref().unwrap_or_default(),
        "state": instance.state.as_deref().unwrap_or_default(),
        "mission_time": instance.mission_time.as_deref(),
        "processors": instance.processors.len(),
    })
}

/// Projects an instance into the describe payload.
#[must_use]
pub fn instance_detail(instance: &InstanceInfo) -> Value {
    let items: Vec<Value> = instance.processors.iter().map(instance_processor).collect();
    let mission_database = instance.mission_database.as_ref().map_or(Value::Null, |info| {
        json!({
            "name": info.name.as_deref(),
            "version": info.version.as_deref(),
        })
    });
    json!({
        "name": instance.name.as_deref().unwrap_or_default(),
        "state": instance.state.as_deref().unwrap_or_default(),
        "mission_time": instance.mission_time.as_deref(),
        "labels": string_map(instance.labels.as_ref()),
        "capabilities": instance.capabilities,
        "template": instance.template.as_deref(),
        "template_args": instance.template_args.clone().unwrap_or_else(|| json!({})),
        "failure_cause": instance.failure_cause.as_deref(),
        "processors": {
            "count": instance.processors.len(),
            "items": items,
        },
        "mission_database": mission_database,
    })
}

/// Projects a processor embedded in an instance description.
fn instance_processor(processor: &ProcessorInfo) -> Value {
    json!({
        "name": processor.name.as_deref().unwrap_or_default(),
        "state": processor.state.as_deref().unwrap_or_default(),
        "type": processor.processor_type.as_deref().unwrap_or_default(),
        "persistent": processor.persistent,
        "replay": processor.replay,
    })
}

// ============================================================================
// SECTION: Alarms
// ============================================================================

/// Counts alarm states into the summary block.
///
/// The counts are independent: one alarm can be acknowledged, shelved, and
/// latched at the same time.
#[must_use]
pub fn alarm_summary(alarms: &[AlarmData]) -> Value {
    let total = alarms.len();
    let acknowledged = alarms.iter().filter(|alarm| alarm.is_acknowledged()).count();
    let shelved = alarms.iter().filter(|alarm| alarm.is_shelved()).count();
    let ok = alarms.iter().filter(|alarm| alarm.process_ok).count();
    let latched = alarms.iter().filter(|alarm| alarm.latching).count();
    json!({
        "total": total,
        "acknowledged": acknowledged,
        "unacknowledged": total - acknowledged,
        "shelved": shelved,
        "ok": ok,
        "latched": latched,
    })
}

/// Projects an alarm into an active listing entry.
#[must_use]
pub fn active_alarm(alarm: &AlarmData) -> Value {
    json!({
        "name": alarm.qualified_name(),
        "sequence_number": alarm.seq_num,
        "trigger_time": alarm.trigger_time.as_deref(),
        "severity": alarm.severity.as_deref(),
        "violation_count": alarm.violations,
        "count": alarm.count,
        "is_acknowledged": alarm.is_acknowledged(),
        "is_ok": alarm.process_ok,
        "is_shelved": alarm.is_shelved(),
        "is_latched": alarm.latching,
    })
}

/// Projects an alarm into the detailed record with acknowledgment fields.
#[must_use]
pub fn detailed_alarm(alarm: &AlarmData) -> Value {
    let mut record = active_alarm(alarm);
    let acknowledge = alarm.acknowledge_info.as_ref();
    if let Value::Object(fields) = &mut record {
        fields.insert("update_time".to_owned(), json!(alarm.update_time.as_deref()));
        fields.insert(
            "acknowledge_time".to_owned(),
            json!(acknowledge.and_then(|info| info.acknowledge_time.as_deref())),
        );
        fields.insert(
            "acknowledged_by".to_owned(),
            json!(acknowledge.and_then(|info| info.acknowledged_by.as_deref())),
        );
        fields.insert(
            "acknowledge_message".to_owned(),
            json!(acknowledge.and_then(|info| info.acknowledge_message.as_deref())),
        );
    }
    record
}

// ============================================================================
// SECTION: Commanding
// ============================================================================

/// Projects a command definition into the execution listing entry.
#[must_use]
pub fn executable_command_summary(command: &CommandInfo) -> Value {
    json!({
        "name": command.name.as_deref().unwrap_or_default(),
        "qualified_name": command.qualified_name.as_deref().unwrap_or_default(),
        "description": command.short_description.as_deref(),
        "significance": command
            .significance
            .as_ref()
            .and_then(|info| info.consequence_level.as_deref()),
    })
}

/// Projects a command definition into the execution describe payload.
#[must_use]
pub fn executable_command_detail(command: &CommandInfo) -> Value {
    let mut detail = command_detail(command);
    if let Value::Object(fields) = &mut detail {
        fields.insert("constraints".to_owned(), Value::Array(command.constraint.clone()));
    }
    detail
}

/// Projects an issue-command response into the run result payload.
#[must_use]
pub fn issued_command(
    command: &str,
    processor: &str,
    instance: &str,
    dry_run: bool,
    response: &IssueCommandResponse,
) -> Value {
    let message = if dry_run {
        format!("Command '{command}' validated successfully")
    } else {
        format!("Command '{command}' issued successfully")
    };
    json!({
        "success": true,
        "dry_run": dry_run,
        "command": command,
        "processor": processor,
        "instance": instance,
        "command_id": response.id.as_deref(),
        "generation_time": response.generation_time.as_deref(),
        "origin": response.origin.as_deref(),
        "sequence_number": response.sequence_number,
        "binary": response.binary.as_deref().and_then(base64_to_hex),
        "queue": response.queue.as_deref(),
        "significance": response
            .significance
            .as_ref()
            .and_then(|info| info.consequence_level.as_deref()),
        "message": message,
    })
}

/// Projects a command history entry into the execution log record.
#[must_use]
pub fn command_history_record(entry: &CommandHistoryEntry) -> Value {
    let binary = entry.attribute("binary");
    json!({
        "name": entry.command_name.as_deref().unwrap_or_default(),
        "generation_time": entry.generation_time.as_deref(),
        "origin": entry.origin.as_deref(),
        "sequence_number": entry.sequence_number,
        "username": entry.attribute("username"),
        "queue": entry.attribute("queue"),
        "binary": binary.as_ref().and_then(Value::as_str).and_then(base64_to_hex),
        "acknowledgments": acknowledgment_stages(entry),
    })
}

/// Projects a command history entry into the archive listing record.
#[must_use]
pub fn archive_command_record(entry: &CommandHistoryEntry) -> Value {
    json!({
        "id": entry.id.as_deref(),
        "name": entry.command_name.as_deref().unwrap_or_default(),
        "generation_time": entry.generation_time.as_deref(),
        "origin": entry.origin.as_deref(),
        "username": entry.attribute("username"),
        "final_status": entry.attribute("CommandComplete_Status"),
    })
}

/// Groups `<stage>_Status/_Time/_Message` attributes by stage name.
fn acknowledgment_stages(entry: &CommandHistoryEntry) -> Value {
    let mut stages = Map::new();
    for attribute in &entry.attr {
        let Some(name) = attribute.name.as_deref() else {
            continue;
        };
        let Some(stage) = name.strip_suffix("_Status") else {
            continue;
        };
        let status = attribute.value.as_ref().map_or(Value::Null, YamcsValue::to_json);
        stages.insert(
            stage.to_owned(),
            json!({
                "status": status,
                "time": entry.attribute(&format!("{stage}_Time")),
                "message": entry.attribute(&format!("{stage}_Message")),
            }),
        );
    }
    if stages.is_empty() { Value::Null } else { Value::Object(stages) }
}

// ============================================================================
// SECTION: Archive
// ============================================================================

/// Projects an archived packet into a listing entry.
#[must_use]
pub fn packet_summary(packet: &PacketData) -> Value {
    json!({
        "name": packet.id.as_ref().map(NamedObjectId::qualified_name).unwrap_or_default(),
        "generation_time": packet.generation_time.as_deref(),
        "reception_time": packet.reception_time.as_deref(),
        "size": packet.size.unwrap_or(0),
        "sequence_number": packet.sequence_number,
    })
}

/// Projects an archived parameter sample into a value record.
///
/// The engineering value wins when calibration produced one; otherwise the
/// raw value is reported.
#[must_use]
pub fn parameter_value_record(sample: &ParameterValueInfo) -> Value {
    let value = sample
        .eng_value
        .as_ref()
        .map(YamcsValue::to_json)
        .filter(|value| !value.is_null())
        .or_else(|| sample.raw_value.as_ref().map(YamcsValue::to_json))
        .unwrap_or(Value::Null);
    json!({
        "time": sample.generation_time.as_deref(),
        "value": value,
        "status": sample.monitoring_result.as_deref(),
    })
}

/// Projects an archived event into a listing entry.
///
/// Yamcs omits the default INFO severity on the wire, so absence maps back
/// to INFO.
#[must_use]
pub fn event_record(event: &EventInfo) -> Value {
    json!({
        "generation_time": event.generation_time.as_deref(),
        "source": event.source.as_deref(),
        "type": event.event_type.as_deref(),
        "message": event.message.as_deref().unwrap_or_default(),
        "severity": event.severity.as_deref().unwrap_or("INFO"),
    })
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Projects command significance, defaulting the level to NORMAL.
fn significance_detail(significance: Option<&SignificanceInfo>) -> Value {
    significance.map_or(Value::Null, |info| {
        json!({
            "consequence_level": info.consequence_level.as_deref().unwrap_or("NORMAL"),
            "reason": info.reason_for_warning.as_deref(),
        })
    })
}

/// Projects a command argument descriptor.
fn command_argument(argument: &ArgumentInfo) -> Value {
    let argument_type = argument.argument_type.as_ref();
    let range = argument_type.map_or(Value::Null, |info| {
        if info.range_min.is_none() && info.range_max.is_none() {
            Value::Null
        } else {
            json!({ "min": info.range_min, "max": info.range_max })
        }
    });
    json!({
        "name": argument.name.as_deref().unwrap_or_default(),
        "type": argument_type.and_then(|info| info.eng_type.as_deref()).unwrap_or_default(),
        "required": argument.initial_value.is_none(),
        "description": argument.description.as_deref(),
        "default": argument.initial_value.as_deref(),
        "range": range,
    })
}

/// Picks a display alias, preferring namespaces outside the XTCE tree.
fn alias_label(aliases: &[NamedObjectId]) -> Option<String> {
    let alias = aliases
        .iter()
        .find(|id| id.namespace.as_deref().is_some_and(|namespace| !namespace.starts_with('/')))
        .or_else(|| aliases.first())?;
    let name = alias.name.clone().unwrap_or_default();
    match alias.namespace.as_deref() {
        Some(namespace) => Some(format!("{namespace}/{name}")),
        None => Some(name),
    }
}

/// Projects the replay block of a processor, null for realtime processors.
fn replay_config(processor: &ProcessorInfo) -> Value {
    if !processor.replay {
        return Value::Null;
    }
    let request = processor.replay_request.as_ref();
    json!({
        "start": request.and_then(|info| info.start.as_deref()),
        "stop": request.and_then(|info| info.stop.as_deref()),
        "speed": request.and_then(|info| info.speed.as_ref()).and_then(replay_speed),
        "state": processor.replay_state.as_deref(),
    })
}

/// Formats a replay speed descriptor such as `REALTIME x2`.
fn replay_speed(speed: &ReplaySpeedInfo) -> Option<String> {
    match (speed.speed_type.as_deref(), speed.param) {
        (Some(label), Some(param)) => Some(format!("{label} x{param}")),
        (Some(label), None) => Some(label.to_owned()),
        (None, Some(param)) => Some(format!("x{param}")),
        (None, None) => None,
    }
}

/// Converts a string map into a JSON object, empty when absent.
fn string_map(entries: Option<&BTreeMap<String, String>>) -> Value {
    entries.map_or_else(
        || json!({}),
        |entries| {
            Value::Object(
                entries
                    .iter()
                    .map(|(key, value)| (key.clone(), Value::String(value.clone())))
                    .collect(),
            )
        },
    )
}

/// Re-encodes a base64 payload as lowercase hex.
fn base64_to_hex(encoded: &str) -> Option<String> {
    let bytes = base64::engine::general_purpose::STANDARD.decode(encoded).ok()?;
    let mut text = String::with_capacity(bytes.len() * 2);
    for byte in bytes {
        let _ = write!(text, "{byte:02x}");
    }
    Some(text)
}

// ============================================================================
// SECTION: Tests
// ============================================================================
