// crates/yamcs-mcp/src/coerce.rs
// ============================================================================
// Module: Argument Coercion
// Description: Normalization of command argument payloads.
// Purpose: Accept object or JSON-string args and reject everything else.
// Dependencies: serde_json, thiserror
// ============================================================================

//! ## Overview
//! Assistants send command arguments either as a JSON object or as a string
//! containing JSON. Both forms normalize to the same map before a command is
//! issued; absent and null both mean "no arguments". Anything else is
//! rejected here, before a Yamcs request exists to fail.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde_json::Map;
use serde_json::Value;
use thiserror::Error;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Rejection of a command argument payload.
#[derive(Debug, Error)]
pub enum CoercionError {
    /// The string form did not contain valid JSON.
    #[error("args string is not valid JSON: {0}")]
    Parse(String),
    /// The payload was valid JSON but not an object.
    #[error("args must be a JSON object, got {0}")]
    NotAnObject(&'static str),
}

// ============================================================================
// SECTION: Coercion
// ============================================================================

/// Normalizes a command `args` payload into an argument map.
///
/// # Errors
///
/// Returns [`CoercionError`] when the payload is neither an object, a string
/// containing a JSON object, null, nor absent.
pub fn coerce_command_args(raw: Option<&Value>) -> Result<Map<String, Value>, CoercionError> {
    match raw {
        None | Some(Value::Null) => Ok(Map::new()),
        Some(Value::Object(map)) => Ok(map.clone()),
        Some(Value::String(text)) => {
            let parsed: Value =
                serde_json::from_str(text).map_err(|err| CoercionError::Parse(err.to_string()))?;
            match parsed {
                Value::Object(map) => Ok(map),
                other => Err(CoercionError::NotAnObject(type_label(&other))),
            }
        }
        Some(other) => Err(CoercionError::NotAnObject(type_label(other))),
    }
}

/// Returns the JSON type label used in rejection messages.
const fn type_label(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
