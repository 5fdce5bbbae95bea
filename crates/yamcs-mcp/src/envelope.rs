// crates/yamcs-mcp/src/envelope.rs
// ============================================================================
// Module: Failure Envelopes
// Description: Structured error payloads returned inside tool results.
// Purpose: Report Yamcs failures as data instead of protocol errors.
// Dependencies: serde, serde_json, yamcs-client
// ============================================================================

//! ## Overview
//! A failed tool call still produces a successful JSON-RPC response; the
//! failure travels as an envelope in the result payload so assistants can
//! read it like any other mapping. Protocol errors are reserved for requests
//! the server could not route at all. Envelope construction is total: every
//! [`YamcsError`] maps to an envelope, and serialization cannot fail.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Serialize;
use serde_json::Value;
use serde_json::json;
use yamcs_client::YamcsError;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Failure categories surfaced to MCP clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Yamcs was unreachable or rejected the session.
    Connection,
    /// The requested entity does not exist.
    NotFound,
    /// The request parameters were rejected before or by Yamcs.
    Validation,
    /// Yamcs accepted the request but the operation failed.
    Operation,
}

impl ErrorKind {
    /// Returns the stable label used in envelopes and audit records.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Connection => "connection",
            Self::NotFound => "not_found",
            Self::Validation => "validation",
            Self::Operation => "operation",
        }
    }
}

/// Failure envelope carried inside a successful tool result.
///
/// # Invariants
/// - `error` is always `true`.
/// - `message` is never empty.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorEnvelope {
    /// Failure marker; always true.
    pub error: bool,
    /// Human-readable failure message.
    pub message: String,
    /// Operation name the failure belongs to.
    pub operation: String,
    /// Failure category.
    pub kind: ErrorKind,
    /// Optional structured details (HTTP status, Yamcs exception type).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl ErrorEnvelope {
    /// Builds an envelope from a client failure.
    #[must_use]
    pub fn from_yamcs(operation: &str, err: &YamcsError) -> Self {
        let (kind, details) = classify(err);
        let message = err.to_string();
        Self {
            error: true,
            message: if message.is_empty() { "unspecified failure".to_string() } else { message },
            operation: operation.to_string(),
            kind,
            details,
        }
    }

    /// Builds a validation envelope for input rejected before any Yamcs call.
    #[must_use]
    pub fn validation(operation: &str, message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            error: true,
            message: if message.is_empty() { "invalid input".to_string() } else { message },
            operation: operation.to_string(),
            kind: ErrorKind::Validation,
            details: None,
        }
    }

    /// Builds a not-found envelope for lookups that miss without a Yamcs error.
    #[must_use]
    pub fn not_found(operation: &str, message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            error: true,
            message: if message.is_empty() { "entity not found".to_string() } else { message },
            operation: operation.to_string(),
            kind: ErrorKind::NotFound,
            details: None,
        }
    }

    /// Serializes the envelope into a JSON value.
    ///
    /// Serialization of this shape cannot fail; the fallback exists so the
    /// conversion stays total without panicking paths.
    #[must_use]
    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or_else(|_| {
            json!({
                "error": true,
                "message": self.message,
                "operation": self.operation,
                "kind": self.kind.as_str(),
            })
        })
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Maps a client failure onto an envelope kind and optional details.
fn classify(err: &YamcsError) -> (ErrorKind, Option<Value>) {
    match err {
        YamcsError::Connection(_) | YamcsError::Authentication(_) => (ErrorKind::Connection, None),
        YamcsError::NotFound(_) => (ErrorKind::NotFound, None),
        YamcsError::Validation(_) => (ErrorKind::Validation, None),
        YamcsError::Operation {
            status,
            yamcs_type,
            ..
        } => {
            let details = yamcs_type.as_ref().map_or_else(
                || json!({ "status": status }),
                |exception| json!({ "status": status, "yamcs_type": exception }),
            );
            (ErrorKind::Operation, Some(details))
        }
        YamcsError::Decode(_) => (ErrorKind::Operation, None),
    }
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

    use super::*;

    fn all_errors() -> Vec<YamcsError> {
        vec![
            YamcsError::Connection("connect refused".to_string()),
            YamcsError::Authentication("invalid credentials".to_string()),
            YamcsError::NotFound("no such parameter".to_string()),
            YamcsError::Validation("bad limit".to_string()),
            YamcsError::Operation {
                status: 500,
                message: "stream crashed".to_string(),
                yamcs_type: Some("InternalServerErrorException".to_string()),
            },
            YamcsError::Decode("truncated body".to_string()),
        ]
    }

    #[test]
    fn every_error_maps_to_a_complete_envelope() {
        for err in all_errors() {
            let envelope = ErrorEnvelope::from_yamcs("links_enable", &err);
            assert!(envelope.error, "error marker must be set for {err}");
            assert!(!envelope.message.is_empty(), "message must be non-empty for {err}");
            assert_eq!(envelope.operation, "links_enable");
            let value = envelope.to_value();
            assert_eq!(value["error"], Value::Bool(true));
            assert!(value["kind"].is_string(), "kind must serialize as a string");
        }
    }

    #[test]
    fn kinds_follow_the_classification_table() {
        let cases: Vec<(YamcsError, ErrorKind)> = vec![
            (YamcsError::Connection("x".to_string()), ErrorKind::Connection),
            (YamcsError::Authentication("x".to_string()), ErrorKind::Connection),
            (YamcsError::NotFound("x".to_string()), ErrorKind::NotFound),
            (YamcsError::Validation("x".to_string()), ErrorKind::Validation),
            (
                YamcsError::Operation {
                    status: 409,
                    message: "x".to_string(),
                    yamcs_type: None,
                },
                ErrorKind::Operation,
            ),
            (YamcsError::Decode("x".to_string()), ErrorKind::Operation),
        ];
        for (err, expected) in cases {
            let envelope = ErrorEnvelope::from_yamcs("processors_delete", &err);
            assert_eq!(envelope.kind, expected, "wrong kind for {err}");
        }
    }

    #[test]
    fn operation_details_carry_status_and_exception_type() {
        let err = YamcsError::Operation {
            status: 500,
            message: "stream crashed".to_string(),
            yamcs_type: Some("InternalServerErrorException".to_string()),
        };
        let value = ErrorEnvelope::from_yamcs("instances_start", &err).to_value();
        assert_eq!(value["details"]["status"], json!(500));
        assert_eq!(value["details"]["yamcs_type"], json!("InternalServerErrorException"));
    }

    #[test]
    fn details_are_omitted_when_absent() {
        let err = YamcsError::Connection("refused".to_string());
        let value = ErrorEnvelope::from_yamcs("server_test_connection", &err).to_value();
        assert!(value.get("details").is_none(), "connection envelopes have no details");
    }

    #[test]
    fn validation_envelopes_never_need_a_yamcs_error() {
        let envelope = ErrorEnvelope::validation("archive_events", "start is not a timestamp");
        assert_eq!(envelope.kind, ErrorKind::Validation);
        assert_eq!(envelope.message, "start is not a timestamp");
        let value = envelope.to_value();
        assert_eq!(value["kind"], json!("validation"));
        assert_eq!(value["operation"], json!("archive_events"));
    }

    #[test]
    fn empty_messages_are_replaced() {
        let envelope = ErrorEnvelope::validation("commands_run", "");
        assert!(!envelope.message.is_empty());
    }

    #[test]
    fn not_found_envelopes_carry_the_lookup_message() {
        let envelope = ErrorEnvelope::not_found(
            "alarms_describe",
            "Alarm '/A/volts' not found on processor 'realtime'",
        );
        assert_eq!(envelope.kind, ErrorKind::NotFound);
        let value = envelope.to_value();
        assert_eq!(value["kind"], json!("not_found"));
        assert_eq!(value["error"], Value::Bool(true));
    }

    #[test]
    fn kind_labels_match_serialized_form() {
        for kind in [
            ErrorKind::Connection,
            ErrorKind::NotFound,
            ErrorKind::Validation,
            ErrorKind::Operation,
        ] {
            let serialized = serde_json::to_value(kind).unwrap();
            assert_eq!(serialized, json!(kind.as_str()));
        }
    }
}
