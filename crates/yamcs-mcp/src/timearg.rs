// crates/yamcs-mcp/src/timearg.rs
// ============================================================================
// Module: Time Arguments
// Description: Parsing for user-supplied archive window boundaries.
// Purpose: Normalize shorthand and ISO-8601 times before any Yamcs call.
// Dependencies: thiserror, time
// ============================================================================

//! ## Overview
//! Archive tools accept `start`/`stop`/`since`/`until` arguments as ISO-8601
//! timestamps or the shorthands `now`, `today`, and `yesterday`; a trailing
//! ` UTC` suffix is tolerated. Everything normalizes to an RFC3339 UTC string
//! before it reaches the outbound client, and unparsable input is rejected
//! here so no Yamcs request is ever issued for it.

// ============================================================================
// SECTION: Imports
// ============================================================================

use thiserror::Error;
use time::Date;
use time::Duration;
use time::OffsetDateTime;
use time::PrimitiveDateTime;
use time::Time;
use time::UtcOffset;
use time::format_description::well_known::Iso8601;
use time::format_description::well_known::Rfc3339;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Rejection of a time-valued tool argument.
#[derive(Debug, Error)]
#[error("invalid time argument {raw:?}: expected ISO-8601 or one of now, today, yesterday")]
pub struct TimeArgError {
    /// The rejected input as supplied.
    raw: String,
}

impl TimeArgError {
    fn new(raw: &str) -> Self {
        Self { raw: raw.to_string() }
    }
}

// ============================================================================
// SECTION: Parsing
// ============================================================================

/// Resolves one time argument into an RFC3339 UTC string.
///
/// # Errors
///
/// Returns [`TimeArgError`] when the value matches neither a shorthand nor
/// an ISO-8601 timestamp.
pub fn resolve_time(raw: &str) -> Result<String, TimeArgError> {
    let mut value = raw.trim();
    if let Some(stripped) = value.strip_suffix("UTC") {
        value = stripped.trim_end();
    }
    let now = OffsetDateTime::now_utc();
    let resolved = match value {
        "" => return Err(TimeArgError::new(raw)),
        "now" => now,
        "today" => now.replace_time(Time::MIDNIGHT),
        "yesterday" => (now - Duration::days(1)).replace_time(Time::MIDNIGHT),
        _ => parse_iso(value).ok_or_else(|| TimeArgError::new(raw))?,
    };
    resolved
        .to_offset(UtcOffset::UTC)
        .format(&Rfc3339)
        .map_err(|_| TimeArgError::new(raw))
}

/// Resolves an optional time argument; absent or blank input means no bound.
///
/// # Errors
///
/// Returns [`TimeArgError`] when a present value does not parse.
pub fn resolve_optional(raw: Option<&str>) -> Result<Option<String>, TimeArgError> {
    match raw {
        None => Ok(None),
        Some(value) if value.trim().is_empty() => Ok(None),
        Some(value) => resolve_time(value).map(Some),
    }
}

/// Parses an ISO-8601 timestamp, naive datetime, or plain date.
///
/// Naive values are taken as UTC; plain dates resolve to midnight.
fn parse_iso(value: &str) -> Option<OffsetDateTime> {
    if let Ok(parsed) = OffsetDateTime::parse(value, &Rfc3339) {
        return Some(parsed);
    }
    if let Ok(parsed) = PrimitiveDateTime::parse(value, &Iso8601::DEFAULT) {
        return Some(parsed.assume_utc());
    }
    if let Ok(parsed) = Date::parse(value, &Iso8601::DEFAULT) {
        return Some(parsed.midnight().assume_utc());
    }
    None
}

// ============================================================================
// SECTION: Tests
// ============================================================================
