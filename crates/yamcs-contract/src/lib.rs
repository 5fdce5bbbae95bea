// crates/yamcs-contract/src/lib.rs
// ============================================================================
// Module: Yamcs MCP Contract
// Description: Canonical tool and resource contracts for the Yamcs MCP bridge.
// Purpose: Single source of truth for tool names, schemas, and listings.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! This crate defines the external contract surface of the Yamcs MCP bridge:
//! canonical tool names, per-tool input/output schemas, resource URIs, and
//! the listing shapes served over `tools/list` and `resources/list`. The
//! server routes calls by [`ToolName`] so the advertised surface and the
//! dispatch table cannot drift apart.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod names;
pub mod tooling;
pub mod types;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use names::ResourceName;
pub use names::Subsystem;
pub use names::ToolName;
pub use tooling::error_envelope_schema;
pub use tooling::resource_definitions;
pub use tooling::tool_contracts;
pub use tooling::tool_definitions;
pub use tooling::tooling_markdown;
pub use types::ResourceDefinition;
pub use types::ToolAnnotations;
pub use types::ToolContract;
pub use types::ToolDefinition;
