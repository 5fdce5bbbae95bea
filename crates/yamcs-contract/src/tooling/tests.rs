// crates/yamcs-contract/src/tooling/tests.rs
// ============================================================================
// Module: Tooling Contract Unit Tests
// Description: Validates tool contracts, schemas, and generated docs.
// Purpose: Keep tool listings, schemas, and docs from drifting apart.
// Dependencies: jsonschema, serde_json, yamcs-contract
// ============================================================================

//! ## Overview
//! Compiles every tool schema as JSON Schema 2020-12, checks representative
//! payloads against them, and asserts the listing/docs projections stay in
//! sync with the contracts.

// ============================================================================
// SECTION: Lint Configuration
// ============================================================================

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    clippy::missing_docs_in_private_items,
    reason = "Test-only validation helpers use panic-based assertions for clarity."
)]

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;

use jsonschema::Draft;
use jsonschema::Validator;
use serde_json::Value;
use serde_json::json;

use super::error_envelope_schema;
use super::resource_definitions;
use super::tool_contracts;
use super::tool_definitions;
use super::tooling_markdown;
use crate::names::ResourceName;
use crate::names::ToolName;

// ============================================================================
// SECTION: Fixtures
// ============================================================================

fn compile_schema(schema: &Value, context: &str) -> Validator {
    jsonschema::options()
        .with_draft(Draft::Draft202012)
        .build(schema)
        .unwrap_or_else(|err| panic!("schema compilation failed for {context}: {err}"))
}

fn required_names(schema: &Value, context: &str) -> BTreeSet<String> {
    schema
        .get("required")
        .and_then(Value::as_array)
        .unwrap_or_else(|| panic!("required missing for {context}"))
        .iter()
        .filter_map(Value::as_str)
        .map(str::to_string)
        .collect()
}

fn property_names(schema: &Value, context: &str) -> BTreeSet<String> {
    schema
        .get("properties")
        .and_then(Value::as_object)
        .unwrap_or_else(|| panic!("properties missing for {context}"))
        .keys()
        .cloned()
        .collect()
}

// ============================================================================
// SECTION: Contract Inventory Tests
// ============================================================================

#[test]
fn tool_contracts_cover_every_tool_name_in_order() {
    let contracts = tool_contracts();
    let names: Vec<ToolName> = contracts.iter().map(|contract| contract.name).collect();
    assert_eq!(names, ToolName::all().to_vec(), "contract order drifted from ToolName::all");
}

#[test]
fn tool_contract_names_are_unique() {
    let contracts = tool_contracts();
    let unique: BTreeSet<ToolName> = contracts.iter().map(|contract| contract.name).collect();
    assert_eq!(unique.len(), contracts.len(), "duplicate tool contract detected");
}

#[test]
fn mutating_tools_match_expected_set() {
    let mutating: BTreeSet<ToolName> = tool_contracts()
        .into_iter()
        .filter(|contract| contract.mutates)
        .map(|contract| contract.name)
        .collect();
    let expected = BTreeSet::from([
        ToolName::ProcessorsDelete,
        ToolName::LinksEnable,
        ToolName::LinksDisable,
        ToolName::LinksReset,
        ToolName::StorageDeleteObject,
        ToolName::StorageCreateBucket,
        ToolName::InstancesStart,
        ToolName::InstancesStop,
        ToolName::AlarmsAcknowledge,
        ToolName::AlarmsShelve,
        ToolName::AlarmsUnshelve,
        ToolName::AlarmsClear,
        ToolName::CommandsRun,
    ]);
    assert_eq!(mutating, expected, "mutating tool set drifted");
}

#[test]
fn every_contract_carries_description_and_notes() {
    for contract in tool_contracts() {
        assert!(!contract.description.is_empty(), "description missing for {}", contract.name);
        assert!(!contract.notes.is_empty(), "notes missing for {}", contract.name);
        for note in &contract.notes {
            assert!(!note.is_empty(), "empty note for {}", contract.name);
        }
    }
}

// ============================================================================
// SECTION: Schema Validity Tests
// ============================================================================

#[test]
fn all_tool_schemas_compile_as_draft_2020_12() {
    for contract in tool_contracts() {
        compile_schema(&contract.input_schema, &format!("{} input", contract.name));
        compile_schema(&contract.output_schema, &format!("{} output", contract.name));
    }
}

#[test]
fn tool_schemas_declare_strict_objects() {
    for contract in tool_contracts() {
        for (label, schema) in
            [("input", &contract.input_schema), ("output", &contract.output_schema)]
        {
            let context = format!("{} {label}", contract.name);
            assert_eq!(
                schema.get("type").and_then(Value::as_str),
                Some("object"),
                "top-level type must be object for {context}"
            );
            assert_eq!(
                schema.get("additionalProperties").and_then(Value::as_bool),
                Some(false),
                "additionalProperties must be false for {context}"
            );
            assert_eq!(
                schema.get("$schema").and_then(Value::as_str),
                Some("https://json-schema.org/draft/2020-12/schema"),
                "$schema header missing for {context}"
            );
        }
    }
}

#[test]
fn required_fields_are_declared_properties() {
    for contract in tool_contracts() {
        for (label, schema) in
            [("input", &contract.input_schema), ("output", &contract.output_schema)]
        {
            let context = format!("{} {label}", contract.name);
            let required = required_names(schema, &context);
            let properties = property_names(schema, &context);
            for field in &required {
                assert!(
                    properties.contains(field),
                    "required field {field} missing from properties for {context}"
                );
            }
        }
    }
}

#[test]
fn every_input_property_is_documented() {
    for contract in tool_contracts() {
        let properties = contract
            .input_schema
            .get("properties")
            .and_then(Value::as_object)
            .unwrap_or_else(|| panic!("properties missing for {} input", contract.name));
        for (field, schema) in properties {
            let description = schema.get("description").and_then(Value::as_str);
            assert!(
                description.is_some_and(|text| !text.is_empty()),
                "input field {field} undocumented for {}",
                contract.name
            );
        }
    }
}

#[test]
fn commands_run_input_requires_only_command() {
    let contracts = tool_contracts();
    let contract = contracts
        .iter()
        .find(|contract| contract.name == ToolName::CommandsRun)
        .expect("commands_run contract missing");
    let required = required_names(&contract.input_schema, "commands_run input");
    assert_eq!(required, BTreeSet::from([String::from("command")]));
}

#[test]
fn alarm_actions_require_alarm_and_sequence_number() {
    let expected = BTreeSet::from([String::from("alarm"), String::from("sequence_number")]);
    for name in [
        ToolName::AlarmsAcknowledge,
        ToolName::AlarmsShelve,
        ToolName::AlarmsUnshelve,
        ToolName::AlarmsClear,
    ] {
        let contracts = tool_contracts();
        let contract = contracts
            .iter()
            .find(|contract| contract.name == name)
            .unwrap_or_else(|| panic!("contract missing for {name}"));
        let required = required_names(&contract.input_schema, &format!("{name} input"));
        assert_eq!(required, expected, "required fields drifted for {name}");
    }
}

#[test]
fn instance_lifecycle_tools_require_explicit_instance() {
    let expected = BTreeSet::from([String::from("instance")]);
    for name in [ToolName::InstancesStart, ToolName::InstancesStop] {
        let contracts = tool_contracts();
        let contract = contracts
            .iter()
            .find(|contract| contract.name == name)
            .unwrap_or_else(|| panic!("contract missing for {name}"));
        let required = required_names(&contract.input_schema, &format!("{name} input"));
        assert_eq!(required, expected, "required fields drifted for {name}");
    }
}

// ============================================================================
// SECTION: Payload Validation Tests
// ============================================================================

#[test]
fn health_check_payload_matches_output_schema() {
    let contracts = tool_contracts();
    let contract = contracts
        .iter()
        .find(|contract| contract.name == ToolName::ServerHealthCheck)
        .expect("server_health_check contract missing");
    let validator = compile_schema(&contract.output_schema, "server_health_check output");
    let payload = json!({
        "server": "yamcs-mcp",
        "version": "0.1.0",
        "status": "degraded",
        "yamcs_url": "http://localhost:8090",
        "yamcs_instance": "simulator",
        "subsystems": ["mdb", "processors", "links", "storage", "instances", "alarms",
                       "commands", "archive"]
    });
    assert!(validator.is_valid(&payload), "health check payload rejected");
    let bad = json!({
        "server": "yamcs-mcp",
        "version": "0.1.0",
        "status": "offline",
        "yamcs_url": "http://localhost:8090",
        "yamcs_instance": "simulator",
        "subsystems": []
    });
    assert!(!validator.is_valid(&bad), "unknown status value accepted");
}

#[test]
fn link_action_payload_matches_output_schema() {
    let contracts = tool_contracts();
    let contract = contracts
        .iter()
        .find(|contract| contract.name == ToolName::LinksEnable)
        .expect("links_enable contract missing");
    let validator = compile_schema(&contract.output_schema, "links_enable output");
    let payload = json!({
        "success": true,
        "link": "tm_realtime",
        "operation": "enable",
        "message": "Link 'tm_realtime' enabled successfully"
    });
    assert!(validator.is_valid(&payload), "link action payload rejected");
    let wrong_operation = json!({
        "success": true,
        "link": "tm_realtime",
        "operation": "disable",
        "message": "Link 'tm_realtime' enabled successfully"
    });
    assert!(!validator.is_valid(&wrong_operation), "operation const not enforced");
}

#[test]
fn commands_run_payload_matches_output_schema() {
    let contracts = tool_contracts();
    let contract = contracts
        .iter()
        .find(|contract| contract.name == ToolName::CommandsRun)
        .expect("commands_run contract missing");
    let validator = compile_schema(&contract.output_schema, "commands_run output");
    let issued = json!({
        "success": true,
        "dry_run": false,
        "command": "/YSS/SIMULATOR/SWITCH_VOLTAGE_ON",
        "processor": "realtime",
        "instance": "simulator",
        "command_id": "simulator-realtime-0001",
        "generation_time": "2026-02-11T09:30:00Z",
        "origin": "yamcs-mcp",
        "sequence_number": 7,
        "binary": "1a2b3c",
        "queue": "default",
        "significance": "NORMAL",
        "message": "Command '/YSS/SIMULATOR/SWITCH_VOLTAGE_ON' issued successfully"
    });
    assert!(validator.is_valid(&issued), "issued command payload rejected");
    let dry_run = json!({
        "success": true,
        "dry_run": true,
        "command": "/YSS/SIMULATOR/SWITCH_VOLTAGE_ON",
        "processor": "realtime",
        "instance": "simulator",
        "command_id": null,
        "generation_time": null,
        "origin": null,
        "sequence_number": null,
        "binary": null,
        "queue": null,
        "significance": null,
        "message": "Command validated"
    });
    assert!(validator.is_valid(&dry_run), "dry-run payload rejected");
}

#[test]
fn error_envelope_schema_accepts_canonical_envelope() {
    let schema = error_envelope_schema();
    let validator = compile_schema(&schema, "error envelope");
    let envelope = json!({
        "error": true,
        "message": "Parameter '/YSS/NOPE' not found",
        "operation": "mdb_describe_parameter",
        "kind": "not_found",
        "details": { "status": 404 }
    });
    assert!(validator.is_valid(&envelope), "canonical envelope rejected");
    let missing_kind = json!({
        "error": true,
        "message": "Parameter '/YSS/NOPE' not found",
        "operation": "mdb_describe_parameter"
    });
    assert!(!validator.is_valid(&missing_kind), "envelope without kind accepted");
    let false_discriminator = json!({
        "error": false,
        "message": "ok",
        "operation": "mdb_describe_parameter",
        "kind": "operation"
    });
    assert!(!validator.is_valid(&false_discriminator), "error=false accepted");
}

// ============================================================================
// SECTION: Projection Tests
// ============================================================================

#[test]
fn tool_definitions_mirror_contracts() {
    let contracts = tool_contracts();
    let definitions = tool_definitions();
    assert_eq!(definitions.len(), contracts.len());
    for (definition, contract) in definitions.iter().zip(&contracts) {
        assert_eq!(definition.name, contract.name);
        assert_eq!(definition.description, contract.description);
        assert_eq!(definition.input_schema, contract.input_schema);
        assert_eq!(
            definition.annotations.read_only_hint, !contract.mutates,
            "readOnlyHint drifted for {}",
            contract.name
        );
    }
}

#[test]
fn resource_definitions_cover_every_resource_name() {
    let definitions = resource_definitions();
    let uris: Vec<&str> = definitions.iter().map(|definition| definition.uri.as_str()).collect();
    let expected: Vec<&str> =
        ResourceName::all().iter().map(|resource| resource.as_uri()).collect();
    assert_eq!(uris, expected, "resource order drifted from ResourceName::all");
    let unique: BTreeSet<&str> = uris.iter().copied().collect();
    assert_eq!(unique.len(), uris.len(), "duplicate resource URI detected");
    for definition in &definitions {
        assert_eq!(definition.mime_type, "text/plain", "unexpected mime for {}", definition.uri);
        assert!(!definition.description.is_empty(), "description missing for {}", definition.uri);
    }
}

// ============================================================================
// SECTION: Docs Tests
// ============================================================================

#[test]
fn tooling_markdown_documents_every_tool_and_resource() {
    let contracts = tool_contracts();
    let markdown = tooling_markdown(&contracts);
    assert!(markdown.starts_with("# Yamcs MCP Tools"), "docs title drifted");
    assert!(markdown.contains("| Tool | Mutates | Description |"), "summary table missing");
    for contract in &contracts {
        let heading = format!("## {}", contract.name.as_str());
        assert!(markdown.contains(&heading), "docs section missing for {}", contract.name);
    }
    for definition in resource_definitions() {
        assert!(markdown.contains(&definition.uri), "docs missing resource {}", definition.uri);
    }
    assert!(markdown.contains("## Error envelope"), "error envelope section missing");
}
