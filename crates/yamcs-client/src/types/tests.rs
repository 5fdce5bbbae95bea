// crates/yamcs-client/src/types/tests.rs
// ============================================================================
// Module: Wire Type Unit Tests
// Description: Validates decoding of Yamcs protobuf-JSON payloads.
// Purpose: Keep the string-encoded int64, base64, and union-value handling
//          aligned with what Yamcs actually sends.
// Dependencies: serde_json, yamcs-client
// ============================================================================

//! ## Overview
//! Fixtures in this module are trimmed captures of real Yamcs responses. The
//! decoding rules under test are the ones that diverge from plain JSON:
//! int64 fields arrive as strings, value unions carry one populated variant,
//! and unknown fields must be ignored.

// ============================================================================
// SECTION: Lint Configuration
// ============================================================================

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::missing_docs_in_private_items,
    reason = "Test-only validation helpers use panic-based assertions for clarity."
)]

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde_json::json;

use super::AlarmData;
use super::CommandHistoryEntry;
use super::CommandInfo;
use super::InstanceInfo;
use super::LinkInfo;
use super::NamedObjectId;
use super::ParameterInfo;
use super::ParameterValueInfo;
use super::YamcsValue;

// ============================================================================
// SECTION: Protobuf JSON Quirks
// ============================================================================

#[test]
fn int64_fields_decode_from_strings_and_numbers() {
    let from_string: LinkInfo =
        serde_json::from_value(json!({ "name": "tm_realtime", "dataInCount": "152463" }))
            .expect("string-encoded count failed to decode");
    assert_eq!(from_string.data_in_count, Some(152_463));

    let from_number: LinkInfo =
        serde_json::from_value(json!({ "name": "tm_realtime", "dataInCount": 17 }))
            .expect("numeric count failed to decode");
    assert_eq!(from_number.data_in_count, Some(17));

    let absent: LinkInfo = serde_json::from_value(json!({ "name": "tm_realtime" }))
        .expect("absent count failed to decode");
    assert_eq!(absent.data_in_count, None);
}

#[test]
fn int64_fields_reject_non_numeric_strings() {
    let result: Result<LinkInfo, _> =
        serde_json::from_value(json!({ "name": "tm_realtime", "dataInCount": "plenty" }));
    assert!(result.is_err(), "non-numeric int64 string must not decode");
}

#[test]
fn unknown_fields_are_ignored() {
    let link: LinkInfo = serde_json::from_value(json!({
        "name": "tm_realtime",
        "status": "OK",
        "someFutureField": { "nested": true }
    }))
    .expect("unknown field broke decoding");
    assert_eq!(link.status.as_deref(), Some("OK"));
}

// ============================================================================
// SECTION: Value Union
// ============================================================================

#[test]
fn value_union_converts_each_variant_to_json() {
    let cases = [
        (json!({ "type": "STRING", "stringValue": "ENABLED" }), json!("ENABLED")),
        (json!({ "type": "BOOLEAN", "booleanValue": true }), json!(true)),
        (json!({ "type": "DOUBLE", "doubleValue": 3.5 }), json!(3.5)),
        (json!({ "type": "FLOAT", "floatValue": 1.25 }), json!(1.25)),
        (json!({ "type": "SINT32", "sint32Value": -40 }), json!(-40)),
        (json!({ "type": "UINT32", "uint32Value": 7 }), json!(7)),
        (json!({ "type": "SINT64", "sint64Value": "-9000000000" }), json!(-9_000_000_000_i64)),
        (json!({ "type": "UINT64", "uint64Value": "9000000000" }), json!(9_000_000_000_i64)),
        (
            json!({ "type": "TIMESTAMP", "timestampValue": "1714000000000" }),
            json!(1_714_000_000_000_i64),
        ),
        (json!({ "type": "BINARY", "binaryValue": "AAECAw==" }), json!("AAECAw==")),
    ];
    for (wire, expected) in cases {
        let value: YamcsValue =
            serde_json::from_value(wire.clone()).expect("value union failed to decode");
        assert_eq!(value.to_json(), expected, "conversion drifted for {wire}");
    }
}

#[test]
fn value_union_arrays_convert_element_wise() {
    let value: YamcsValue = serde_json::from_value(json!({
        "type": "ARRAY",
        "arrayValue": [
            { "type": "SINT32", "sint32Value": 1 },
            { "type": "SINT32", "sint32Value": 2 }
        ]
    }))
    .expect("array value failed to decode");
    assert_eq!(value.to_json(), json!([1, 2]));
}

#[test]
fn empty_value_union_collapses_to_null() {
    let value: YamcsValue =
        serde_json::from_value(json!({ "type": "AGGREGATE" })).expect("bare union failed");
    assert_eq!(value.to_json(), serde_json::Value::Null);
}

// ============================================================================
// SECTION: Identifiers
// ============================================================================

#[test]
fn qualified_name_joins_xtce_namespaces_only() {
    let xtce = NamedObjectId {
        name: Some(String::from("BatteryVoltage1")),
        namespace: Some(String::from("/YSS/SIMULATOR")),
    };
    assert_eq!(xtce.qualified_name(), "/YSS/SIMULATOR/BatteryVoltage1");

    let opaque = NamedObjectId {
        name: Some(String::from("/YSS/SIMULATOR/BatteryVoltage1")),
        namespace: None,
    };
    assert_eq!(opaque.qualified_name(), "/YSS/SIMULATOR/BatteryVoltage1");

    let alias = NamedObjectId {
        name: Some(String::from("SIMULATOR_BatteryVoltage1")),
        namespace: Some(String::from("MDB:OPS Name")),
    };
    assert_eq!(alias.qualified_name(), "SIMULATOR_BatteryVoltage1");
}

// ============================================================================
// SECTION: Mission Database Payloads
// ============================================================================

#[test]
fn parameter_decodes_type_and_units() {
    let parameter: ParameterInfo = serde_json::from_value(json!({
        "name": "BatteryVoltage1",
        "qualifiedName": "/YSS/SIMULATOR/BatteryVoltage1",
        "type": {
            "engType": "integer",
            "unitSet": [{ "unit": "V" }]
        },
        "dataSource": "TELEMETERED"
    }))
    .expect("parameter failed to decode");
    let parameter_type = parameter.parameter_type.expect("type missing");
    assert_eq!(parameter_type.eng_type.as_deref(), Some("integer"));
    assert_eq!(parameter_type.units().as_deref(), Some("V"));
    assert_eq!(parameter.data_source.as_deref(), Some("TELEMETERED"));
}

#[test]
fn command_decodes_significance_and_arguments() {
    let command: CommandInfo = serde_json::from_value(json!({
        "name": "SWITCH_VOLTAGE_ON",
        "qualifiedName": "/YSS/SIMULATOR/SWITCH_VOLTAGE_ON",
        "abstract": false,
        "significance": {
            "consequenceLevel": "CRITICAL",
            "reasonForWarning": "switches battery power"
        },
        "argument": [
            {
                "name": "voltage_num",
                "type": { "engType": "integer", "rangeMin": 1.0, "rangeMax": 4.0 }
            }
        ]
    }))
    .expect("command failed to decode");
    assert!(!command.is_abstract);
    let significance = command.significance.expect("significance missing");
    assert_eq!(significance.consequence_level.as_deref(), Some("CRITICAL"));
    let argument = command.argument.first().expect("argument missing");
    assert_eq!(argument.initial_value, None, "argument without default must stay required");
    let argument_type = argument.argument_type.as_ref().expect("argument type missing");
    assert_eq!(argument_type.range_min, Some(1.0));
    assert_eq!(argument_type.range_max, Some(4.0));
}

// ============================================================================
// SECTION: Instance Payloads
// ============================================================================

#[test]
fn instance_decodes_nested_processors_and_mdb() {
    let instance: InstanceInfo = serde_json::from_value(json!({
        "name": "simulator",
        "state": "RUNNING",
        "missionTime": "2026-08-26T12:00:00.000Z",
        "processors": [
            { "instance": "simulator", "name": "realtime", "state": "RUNNING", "persistent": true }
        ],
        "missionDatabase": { "name": "simulator", "version": "1.2" },
        "capabilities": ["mdb", "activities"]
    }))
    .expect("instance failed to decode");
    assert_eq!(instance.state.as_deref(), Some("RUNNING"));
    assert_eq!(instance.processors.len(), 1);
    assert!(instance.processors[0].persistent);
    let mdb = instance.mission_database.expect("mission database missing");
    assert_eq!(mdb.version.as_deref(), Some("1.2"));
}

// ============================================================================
// SECTION: Alarm Payloads
// ============================================================================

#[test]
fn alarm_decodes_process_ok_and_state_helpers() {
    let alarm: AlarmData = serde_json::from_value(json!({
        "id": { "namespace": "/YSS/SIMULATOR", "name": "BatteryVoltage2" },
        "seqNum": 5,
        "severity": "CRITICAL",
        "violations": 12,
        "count": 40,
        "acknowledged": false,
        "processOK": true,
        "latching": true,
        "shelveInfo": { "shelvedBy": "operator", "shelveTime": "2026-08-26T09:00:00Z" }
    }))
    .expect("alarm failed to decode");
    assert_eq!(alarm.qualified_name(), "/YSS/SIMULATOR/BatteryVoltage2");
    assert_eq!(alarm.seq_num, 5);
    assert!(alarm.process_ok, "processOK must map onto process_ok");
    assert!(alarm.is_shelved());
    assert!(!alarm.is_acknowledged());
    assert!(alarm.latching);
}

#[test]
fn alarm_acknowledgment_is_read_from_either_field() {
    let via_info: AlarmData = serde_json::from_value(json!({
        "seqNum": 1,
        "acknowledgeInfo": { "acknowledgedBy": "operator" }
    }))
    .expect("alarm failed to decode");
    assert!(via_info.is_acknowledged());

    let via_flag: AlarmData =
        serde_json::from_value(json!({ "seqNum": 1, "acknowledged": true }))
            .expect("alarm failed to decode");
    assert!(via_flag.is_acknowledged());
}

// ============================================================================
// SECTION: Command History Payloads
// ============================================================================

#[test]
fn command_history_attribute_lookup_converts_values() {
    let entry: CommandHistoryEntry = serde_json::from_value(json!({
        "id": "01J-command",
        "commandName": "/YSS/SIMULATOR/SWITCH_VOLTAGE_ON",
        "generationTime": "2026-08-26T12:00:00.000Z",
        "attr": [
            { "name": "username", "value": { "type": "STRING", "stringValue": "admin" } },
            { "name": "Acknowledge_Sent_Status",
              "value": { "type": "STRING", "stringValue": "ACK: OK" } }
        ]
    }))
    .expect("history entry failed to decode");
    assert_eq!(entry.attribute("username"), Some(json!("admin")));
    assert_eq!(entry.attribute("Acknowledge_Sent_Status"), Some(json!("ACK: OK")));
    assert_eq!(entry.attribute("no_such_attribute"), None);
}

// ============================================================================
// SECTION: Archive Payloads
// ============================================================================

#[test]
fn parameter_sample_decodes_raw_and_eng_values() {
    let sample: ParameterValueInfo = serde_json::from_value(json!({
        "id": { "name": "/YSS/SIMULATOR/BatteryVoltage1" },
        "rawValue": { "type": "UINT32", "uint32Value": 212 },
        "engValue": { "type": "FLOAT", "floatValue": 10.6 },
        "generationTime": "2026-08-26T12:00:00.000Z",
        "monitoringResult": "IN_LIMITS"
    }))
    .expect("sample failed to decode");
    assert_eq!(sample.raw_value.expect("raw value missing").to_json(), json!(212));
    assert_eq!(sample.eng_value.expect("eng value missing").to_json(), json!(10.6));
    assert_eq!(sample.monitoring_result.as_deref(), Some("IN_LIMITS"));
}
