// crates/yamcs-mcp/src/subsystems.rs
// ============================================================================
// Module: Subsystem Registration
// Description: Explicit tool and resource registration for Yamcs subsystems.
// Purpose: Bind subsystem handlers to the shared session context at
//          registration time.
// Dependencies: yamcs-client, yamcs-contract
// ============================================================================

//! ## Overview
//! Each subsystem module exposes a `register` function that inserts its tool
//! and resource handlers into the shared registries. The session context is
//! bound explicitly when a handler is registered; handlers never reach for
//! process-wide state. Disabled subsystems register nothing, so `tools/list`
//! and `tools/call` agree on what exists.
//!
//! ## Invariants
//! - The server subsystem is always registered.
//! - Tool handlers are total: every failure becomes an error envelope.
//! - Resource handlers are total: every failure becomes an `Error:` line.
//! - Input rejected before a Yamcs call produces a validation envelope and
//!   no session traffic.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::future::Future;
use std::sync::Arc;

use serde::Deserialize;
use serde_json::Value;
use yamcs_client::YamcsClient;
use yamcs_client::YamcsError;
use yamcs_contract::ResourceName;
use yamcs_contract::Subsystem;
use yamcs_contract::ToolName;

use crate::config::SubsystemsConfig;
use crate::envelope::ErrorEnvelope;
use crate::registry::RegistryError;
use crate::registry::ResourceRegistry;
use crate::registry::SessionContext;
use crate::registry::ToolRegistry;
use crate::timearg;

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod alarms;
pub mod archive;
pub mod commands;
pub mod instances;
pub mod links;
pub mod mdb;
pub mod processors;
pub mod server;
pub mod storage;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default page size for list-style tools.
const DEFAULT_LIST_LIMIT: u32 = 100;
/// Default line count for log-style tools.
const DEFAULT_LOG_LINES: u32 = 10;
/// Maximum page size for list-style tools.
const MAX_LIST_LIMIT: u32 = 100;
/// Processor used by alarm and commanding tools when none is named.
const DEFAULT_PROCESSOR: &str = "realtime";

// ============================================================================
// SECTION: Registration
// ============================================================================

/// Registers every enabled subsystem into the shared registries.
///
/// The server subsystem ignores the toggle table and always registers, so a
/// reachable deployment can still be diagnosed when everything else is
/// switched off.
///
/// # Errors
///
/// Returns [`RegistryError`] when two subsystems claim the same name, which
/// indicates a wiring bug rather than a runtime condition.
pub fn register_enabled(
    subsystems: &SubsystemsConfig,
    tools: &mut ToolRegistry,
    resources: &mut ResourceRegistry,
    context: &Arc<SessionContext>,
) -> Result<(), RegistryError> {
    server::register(tools, resources, context)?;
    if subsystems.enabled(Subsystem::Mdb) {
        mdb::register(tools, resources, context)?;
    }
    if subsystems.enabled(Subsystem::Processors) {
        processors::register(tools, resources, context)?;
    }
    if subsystems.enabled(Subsystem::Links) {
        links::register(tools, resources, context)?;
    }
    if subsystems.enabled(Subsystem::Storage) {
        storage::register(tools, resources, context)?;
    }
    if subsystems.enabled(Subsystem::Instances) {
        instances::register(tools, resources, context)?;
    }
    if subsystems.enabled(Subsystem::Alarms) {
        alarms::register(tools, resources, context)?;
    }
    if subsystems.enabled(Subsystem::Commands) {
        commands::register(tools, resources, context)?;
    }
    if subsystems.enabled(Subsystem::Archive) {
        archive::register(tools, resources, context)?;
    }
    Ok(())
}

// ============================================================================
// SECTION: Handler Binding
// ============================================================================

/// Binds a tool handler to the session context and registers it.
///
/// The handler receives the context as an explicit argument; failures are
/// folded into the result payload so the registered closure is total.
pub(crate) fn bind_tool<F, Fut>(
    tools: &mut ToolRegistry,
    context: &Arc<SessionContext>,
    tool: ToolName,
    handler: F,
) -> Result<(), RegistryError>
where
    F: Fn(Arc<SessionContext>, Value) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Value, ErrorEnvelope>> + Send + 'static,
{
    let context = Arc::clone(context);
    tools.register(tool, move |payload| {
        let call = handler(Arc::clone(&context), payload);
        async move { call.await.unwrap_or_else(|envelope| envelope.to_value()) }
    })
}

/// Binds a resource handler to the session context and registers it.
///
/// Failed renders degrade to a plain `Error:` line instead of a protocol
/// error, matching how tool failures stay inside the result payload.
pub(crate) fn bind_resource<F, Fut>(
    resources: &mut ResourceRegistry,
    context: &Arc<SessionContext>,
    resource: ResourceName,
    handler: F,
) -> Result<(), RegistryError>
where
    F: Fn(Arc<SessionContext>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<String, YamcsError>> + Send + 'static,
{
    let context = Arc::clone(context);
    resources.register(resource, move || {
        let render = handler(Arc::clone(&context));
        async move { render.await.unwrap_or_else(|err| format!("Error: {err}")) }
    })
}

// ============================================================================
// SECTION: Handler Helpers
// ============================================================================

/// Decodes a JSON payload into a typed request.
pub(crate) fn decode<T>(tool: ToolName, payload: Value) -> Result<T, ErrorEnvelope>
where
    T: for<'de> Deserialize<'de>,
{
    serde_json::from_value(payload)
        .map_err(|err| ErrorEnvelope::validation(tool.as_str(), err.to_string()))
}

/// Acquires the shared Yamcs session for a tool call.
pub(crate) async fn acquire(
    tool: ToolName,
    context: &SessionContext,
) -> Result<Arc<YamcsClient>, ErrorEnvelope> {
    context
        .sessions
        .acquire()
        .await
        .map_err(|err| ErrorEnvelope::from_yamcs(tool.as_str(), &err))
}

/// Returns a closure mapping client failures onto the tool's envelope.
pub(crate) fn yamcs_failure(tool: ToolName) -> impl Fn(YamcsError) -> ErrorEnvelope {
    move |err| ErrorEnvelope::from_yamcs(tool.as_str(), &err)
}

/// Resolves the effective processor for a call.
///
/// Blank or missing values fall back to the realtime processor, mirroring
/// how instance overrides fall back to the configured default.
pub(crate) fn processor_or_default(requested: Option<&str>) -> &str {
    match requested {
        Some(processor) if !processor.trim().is_empty() => processor,
        _ => DEFAULT_PROCESSOR,
    }
}

/// Normalizes a list limit against the default and bound.
pub(crate) fn normalize_limit(tool: ToolName, limit: Option<u32>) -> Result<u32, ErrorEnvelope> {
    let limit = limit.unwrap_or(DEFAULT_LIST_LIMIT);
    if limit == 0 || limit > MAX_LIST_LIMIT {
        return Err(ErrorEnvelope::validation(
            tool.as_str(),
            format!("limit must be between 1 and {MAX_LIST_LIMIT}"),
        ));
    }
    Ok(limit)
}

/// Normalizes a log line count against the default and bound.
pub(crate) fn normalize_lines(tool: ToolName, lines: Option<u32>) -> Result<u32, ErrorEnvelope> {
    let lines = lines.unwrap_or(DEFAULT_LOG_LINES);
    if lines == 0 || lines > MAX_LIST_LIMIT {
        return Err(ErrorEnvelope::validation(
            tool.as_str(),
            format!("lines must be between 1 and {MAX_LIST_LIMIT}"),
        ));
    }
    Ok(lines)
}

/// Resolves optional start/stop arguments into UTC timestamps.
pub(crate) fn resolve_time_range(
    tool: ToolName,
    start: Option<&str>,
    stop: Option<&str>,
) -> Result<(Option<String>, Option<String>), ErrorEnvelope> {
    let start = timearg::resolve_optional(start)
        .map_err(|err| ErrorEnvelope::validation(tool.as_str(), err.to_string()))?;
    let stop = timearg::resolve_optional(stop)
        .map_err(|err| ErrorEnvelope::validation(tool.as_str(), err.to_string()))?;
    Ok((start, stop))
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

    use std::time::Duration;

    use yamcs_client::ClientConfig;
    use yamcs_client::SessionManager;

    use super::*;
    use crate::audit::NoopAuditSink;

    fn test_context() -> Arc<SessionContext> {
        let config = ClientConfig {
            url: "http://localhost:8090".to_string(),
            instance: "simulator".to_string(),
            username: None,
            password: None,
            timeout: Duration::from_secs(5),
        };
        Arc::new(SessionContext {
            sessions: SessionManager::new(config),
            default_instance: "simulator".to_string(),
            server_name: "yamcs-mcp".to_string(),
            url: "http://localhost:8090".to_string(),
            enabled_subsystems: vec!["server"],
            audit: Arc::new(NoopAuditSink),
        })
    }

    fn full_config() -> SubsystemsConfig {
        SubsystemsConfig::default()
    }

    fn empty_config() -> SubsystemsConfig {
        SubsystemsConfig {
            mdb: false,
            processors: false,
            links: false,
            storage: false,
            instances: false,
            alarms: false,
            commands: false,
            archive: false,
        }
    }

    #[test]
    fn full_registration_covers_every_tool_and_resource() {
        let context = test_context();
        let mut tools = ToolRegistry::new();
        let mut resources = ResourceRegistry::new();
        register_enabled(&full_config(), &mut tools, &mut resources, &context).unwrap();
        assert_eq!(tools.len(), ToolName::all().len());
        assert_eq!(resources.len(), ResourceName::all().len());
    }

    #[test]
    fn disabled_subsystems_keep_only_server_tools() {
        let context = test_context();
        let mut tools = ToolRegistry::new();
        let mut resources = ResourceRegistry::new();
        register_enabled(&empty_config(), &mut tools, &mut resources, &context).unwrap();
        assert!(tools.contains(ToolName::ServerHealthCheck));
        assert!(tools.contains(ToolName::ServerTestConnection));
        assert_eq!(tools.len(), 2, "only server tools survive an empty toggle table");
        assert!(resources.is_empty(), "no resources without their subsystems");
    }

    #[test]
    fn tool_definitions_follow_contract_order_after_registration() {
        let context = test_context();
        let mut tools = ToolRegistry::new();
        let mut resources = ResourceRegistry::new();
        register_enabled(&full_config(), &mut tools, &mut resources, &context).unwrap();
        let names: Vec<&str> = tools
            .definitions()
            .iter()
            .map(|definition| definition.name.as_str())
            .collect();
        let expected: Vec<&str> = ToolName::all().iter().map(|tool| tool.as_str()).collect();
        assert_eq!(names, expected);
    }

    #[test]
    fn limits_are_bounded() {
        assert_eq!(normalize_limit(ToolName::MdbListParameters, None).unwrap(), 100);
        assert_eq!(normalize_limit(ToolName::MdbListParameters, Some(25)).unwrap(), 25);
        let over = normalize_limit(ToolName::MdbListParameters, Some(101)).unwrap_err();
        assert_eq!(over.operation, "mdb_list_parameters");
        let zero = normalize_limit(ToolName::MdbListParameters, Some(0)).unwrap_err();
        assert!(zero.message.contains("between 1 and 100"));
    }

    #[test]
    fn lines_default_lower_than_limits() {
        assert_eq!(normalize_lines(ToolName::CommandsReadLog, None).unwrap(), 10);
        let err = normalize_lines(ToolName::CommandsReadLog, Some(0)).unwrap_err();
        assert!(err.message.contains("lines must be between"));
    }

    #[test]
    fn bad_time_arguments_become_validation_envelopes() {
        let err =
            resolve_time_range(ToolName::ArchiveEvents, Some("not-a-time"), None).unwrap_err();
        assert_eq!(err.operation, "archive_events");
        assert_eq!(err.kind, crate::envelope::ErrorKind::Validation);
    }

    #[test]
    fn blank_processor_arguments_fall_back_to_realtime() {
        assert_eq!(processor_or_default(None), "realtime");
        assert_eq!(processor_or_default(Some("")), "realtime");
        assert_eq!(processor_or_default(Some("   ")), "realtime");
        assert_eq!(processor_or_default(Some("replay-1")), "replay-1");
    }
}
