// crates/yamcs-contract/src/types.rs
// ============================================================================
// Module: Contract Types
// Description: Shared data models for the Yamcs MCP contract surface.
// Purpose: Provide canonical shapes for tool and resource listings.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! Typed contract shapes served over MCP discovery methods. The listing
//! structs serialize with the field names the MCP protocol expects
//! (`inputSchema`, `mimeType`, `readOnlyHint`); the fuller [`ToolContract`]
//! shape feeds documentation generation and tests.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

use crate::names::ToolName;

// ============================================================================
// SECTION: Tooling Contracts
// ============================================================================

/// Tool definition used by MCP tool listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// MCP tool name.
    pub name: ToolName,
    /// Tool description for clients.
    pub description: String,
    /// JSON schema for tool input.
    #[serde(rename = "inputSchema")]
    pub input_schema: Value,
    /// Behavior hints for clients.
    pub annotations: ToolAnnotations,
}

/// Behavior hints surfaced in tool listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolAnnotations {
    /// True when the tool performs no state mutation on the Yamcs side.
    #[serde(rename = "readOnlyHint")]
    pub read_only_hint: bool,
}

/// Tool contract with full request and response schemas.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolContract {
    /// Tool name.
    pub name: ToolName,
    /// Tool description.
    pub description: String,
    /// True when invoking the tool mutates state in Yamcs.
    pub mutates: bool,
    /// JSON schema for tool input payload.
    pub input_schema: Value,
    /// JSON schema for the success payload. Failures return the uniform
    /// error envelope instead; see [`crate::tooling::error_envelope_schema`].
    pub output_schema: Value,
    /// Notes describing tool usage and operational caveats.
    pub notes: Vec<String>,
}

// ============================================================================
// SECTION: Resource Contracts
// ============================================================================

/// Resource definition used by MCP resource listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceDefinition {
    /// Resource URI (scheme equals the owning subsystem label).
    pub uri: String,
    /// Short display name.
    pub name: String,
    /// Resource description for clients.
    pub description: String,
    /// MIME type of the produced body.
    #[serde(rename = "mimeType")]
    pub mime_type: String,
}
