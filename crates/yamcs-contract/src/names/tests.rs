// crates/yamcs-contract/src/names/tests.rs
// ============================================================================
// Module: Contract Identifier Unit Tests
// Description: Validates tool name, resource URI, and subsystem invariants.
// Purpose: Keep serde names, string names, and subsystem labels agreeing.
// Dependencies: serde_json, yamcs-contract
// ============================================================================

//! ## Overview
//! The runtime dispatches on serialized tool names and resource URIs, so the
//! serde representation, `as_str`/`as_uri`, and `parse` must agree exactly.

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

use std::collections::BTreeSet;

use serde_json::Value;

use super::ResourceName;
use super::Subsystem;
use super::ToolName;

// ============================================================================
// SECTION: Tests
// ============================================================================

#[test]
fn tool_serde_names_match_string_names() {
    for tool in ToolName::all() {
        let serialized = serde_json::to_value(tool).expect("tool name serialization failed");
        assert_eq!(
            serialized,
            Value::String(tool.as_str().to_string()),
            "serde name drifted for {tool:?}"
        );
        let parsed: ToolName =
            serde_json::from_value(serialized).expect("tool name deserialization failed");
        assert_eq!(parsed, *tool);
    }
}

#[test]
fn tool_parse_round_trips_every_name() {
    for tool in ToolName::all() {
        assert_eq!(ToolName::parse(tool.as_str()), Some(*tool));
    }
    assert_eq!(ToolName::parse("no_such_tool"), None);
}

#[test]
fn tool_names_are_unique() {
    let names: BTreeSet<&str> = ToolName::all().iter().map(|tool| tool.as_str()).collect();
    assert_eq!(names.len(), ToolName::all().len(), "duplicate tool name detected");
}

#[test]
fn tool_names_carry_their_subsystem_prefix() {
    for tool in ToolName::all() {
        let prefix = tool.subsystem().as_str();
        assert!(
            tool.as_str().starts_with(prefix),
            "tool {tool} does not start with subsystem label {prefix}"
        );
    }
}

#[test]
fn resource_uri_scheme_matches_subsystem_label() {
    for resource in ResourceName::all() {
        let scheme = format!("{}://", resource.subsystem().as_str());
        assert!(
            resource.as_uri().starts_with(&scheme),
            "resource {resource} does not use scheme {scheme}"
        );
    }
}

#[test]
fn resource_parse_round_trips_every_uri() {
    for resource in ResourceName::all() {
        assert_eq!(ResourceName::parse_uri(resource.as_uri()), Some(*resource));
    }
    assert_eq!(ResourceName::parse_uri("mdb://unknown"), None);
}

#[test]
fn every_subsystem_owns_at_least_one_tool() {
    let owned: BTreeSet<Subsystem> =
        ToolName::all().iter().map(|tool| tool.subsystem()).collect();
    let expected = BTreeSet::from([
        Subsystem::Server,
        Subsystem::Mdb,
        Subsystem::Processors,
        Subsystem::Links,
        Subsystem::Storage,
        Subsystem::Instances,
        Subsystem::Alarms,
        Subsystem::Commands,
        Subsystem::Archive,
    ]);
    assert_eq!(owned, expected, "subsystem coverage drifted");
}
