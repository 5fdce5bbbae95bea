// crates/yamcs-client/src/error.rs
// ============================================================================
// Module: Client Errors
// Description: Error classification for Yamcs HTTP API access.
// Purpose: Give callers stable failure categories for envelope mapping.
// Dependencies: thiserror
// ============================================================================

//! ## Overview
//! All client operations fail with [`YamcsError`]. The variants are a stable
//! classification surface: transport failures, authentication rejections,
//! missing entities, parameter rejections, and everything else Yamcs refuses
//! at the HTTP layer. Callers map these onto user-facing error envelopes.

use thiserror::Error;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Failures reported by the Yamcs HTTP client.
///
/// # Invariants
/// - Variants are stable for error classification.
/// - Messages never contain credentials.
#[derive(Debug, Error)]
pub enum YamcsError {
    /// Yamcs was unreachable or the request timed out.
    #[error("yamcs unreachable: {0}")]
    Connection(String),
    /// Yamcs rejected the configured credentials or the session token.
    #[error("yamcs authentication failed: {0}")]
    Authentication(String),
    /// The requested entity does not exist on the Yamcs side.
    #[error("{0}")]
    NotFound(String),
    /// Yamcs rejected the request parameters.
    #[error("{0}")]
    Validation(String),
    /// Yamcs reported an operational failure.
    #[error("yamcs operation failed: {message}")]
    Operation {
        /// HTTP status code reported by Yamcs.
        status: u16,
        /// Failure message extracted from the response body.
        message: String,
        /// Yamcs exception type when the body carried one.
        yamcs_type: Option<String>,
    },
    /// The response body could not be decoded.
    #[error("yamcs response decode failed: {0}")]
    Decode(String),
}

impl YamcsError {
    /// Returns true when the failure indicates an unusable session.
    ///
    /// Connection and authentication failures invalidate the cached session;
    /// entity-level failures do not.
    #[must_use]
    pub const fn invalidates_session(&self) -> bool {
        matches!(self, Self::Connection(_) | Self::Authentication(_))
    }
}
