// crates/yamcs-mcp/src/registry.rs
// ============================================================================
// Module: Tool and Resource Registry
// Description: Explicit registration tables for tools and resources.
// Purpose: Bind contract-declared names to handlers without global state.
// Dependencies: serde_json, thiserror, yamcs-client, yamcs-contract
// ============================================================================

//! ## Overview
//! Subsystem modules register their handlers into these tables at startup;
//! nothing registers itself through module-load side effects. Each
//! `register()` receives the shared [`SessionContext`] as an explicit
//! argument and binds it into the handlers it inserts, so two servers with
//! different contexts can coexist in one process. Definitions served by
//! `tools/list` and `resources/list` come from `yamcs-contract` filtered to
//! the registered set, which keeps listing and routing from drifting apart.
//!
//! ## Invariants
//! - A tool name or resource URI binds to at most one handler.
//! - Listing order always follows the contract declaration order.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use serde_json::Value;
use thiserror::Error;
use yamcs_client::SessionManager;
use yamcs_contract::ResourceDefinition;
use yamcs_contract::ResourceName;
use yamcs_contract::ToolDefinition;
use yamcs_contract::ToolName;

use crate::audit::AuditSink;

// ============================================================================
// SECTION: Session Context
// ============================================================================

/// Shared dependencies passed explicitly to every subsystem `register()`.
pub struct SessionContext {
    /// Session manager owning the upstream Yamcs connection.
    pub sessions: SessionManager,
    /// Instance used when a call does not name one.
    pub default_instance: String,
    /// Server name advertised in diagnostics.
    pub server_name: String,
    /// Yamcs base URL, reported by diagnostics tools.
    pub url: String,
    /// Enabled subsystem labels in canonical order.
    pub enabled_subsystems: Vec<&'static str>,
    /// Audit sink shared with the transport layer.
    pub audit: Arc<dyn AuditSink>,
}

impl SessionContext {
    /// Resolves the effective instance for a call.
    ///
    /// Blank or missing values fall back to the configured default.
    #[must_use]
    pub fn instance<'a>(&'a self, requested: Option<&'a str>) -> &'a str {
        match requested {
            Some(name) if !name.trim().is_empty() => name,
            _ => &self.default_instance,
        }
    }
}

// ============================================================================
// SECTION: Handler Types
// ============================================================================

/// Boxed future produced by a tool handler.
pub type ToolFuture = Pin<Box<dyn Future<Output = Value> + Send>>;

/// Tool handler invoked with the raw call arguments.
pub type ToolHandler = Arc<dyn Fn(Value) -> ToolFuture + Send + Sync>;

/// Boxed future produced by a resource handler.
pub type ResourceFuture = Pin<Box<dyn Future<Output = String> + Send>>;

/// Resource handler producing the text body.
pub type ResourceHandler = Arc<dyn Fn() -> ResourceFuture + Send + Sync>;

// ============================================================================
// SECTION: Tool Registry
// ============================================================================

/// Registration table for MCP tools.
#[derive(Default)]
pub struct ToolRegistry {
    /// Registered handlers keyed by tool name.
    handlers: BTreeMap<ToolName, ToolHandler>,
}

impl ToolRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            handlers: BTreeMap::new(),
        }
    }

    /// Registers a handler for a tool.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::DuplicateTool`] when the tool already has a
    /// handler.
    pub fn register<F, Fut>(&mut self, tool: ToolName, handler: F) -> Result<(), RegistryError>
    where
        F: Fn(Value) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Value> + Send + 'static,
    {
        if self.handlers.contains_key(&tool) {
            return Err(RegistryError::DuplicateTool(tool));
        }
        let boxed: ToolHandler = Arc::new(move |payload| Box::pin(handler(payload)));
        self.handlers.insert(tool, boxed);
        Ok(())
    }

    /// Returns the handler bound to a tool.
    #[must_use]
    pub fn handler(&self, tool: ToolName) -> Option<ToolHandler> {
        self.handlers.get(&tool).cloned()
    }

    /// Returns whether a tool has a handler.
    #[must_use]
    pub fn contains(&self, tool: ToolName) -> bool {
        self.handlers.contains_key(&tool)
    }

    /// Returns the number of registered tools.
    #[must_use]
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Returns whether no tools are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Lists contract definitions for the registered tools.
    #[must_use]
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        yamcs_contract::tool_definitions()
            .into_iter()
            .filter(|definition| self.handlers.contains_key(&definition.name))
            .collect()
    }
}

// ============================================================================
// SECTION: Resource Registry
// ============================================================================

/// Registration table for MCP resources.
#[derive(Default)]
pub struct ResourceRegistry {
    /// Registered handlers keyed by resource name.
    handlers: BTreeMap<ResourceName, ResourceHandler>,
}

impl ResourceRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            handlers: BTreeMap::new(),
        }
    }

    /// Registers a handler for a resource.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::DuplicateResource`] when the resource already
    /// has a handler.
    pub fn register<F, Fut>(
        &mut self,
        resource: ResourceName,
        handler: F,
    ) -> Result<(), RegistryError>
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = String> + Send + 'static,
    {
        if self.handlers.contains_key(&resource) {
            return Err(RegistryError::DuplicateResource(resource));
        }
        let boxed: ResourceHandler = Arc::new(move || Box::pin(handler()));
        self.handlers.insert(resource, boxed);
        Ok(())
    }

    /// Returns the handler bound to a resource.
    #[must_use]
    pub fn handler(&self, resource: ResourceName) -> Option<ResourceHandler> {
        self.handlers.get(&resource).cloned()
    }

    /// Returns whether a resource has a handler.
    #[must_use]
    pub fn contains(&self, resource: ResourceName) -> bool {
        self.handlers.contains_key(&resource)
    }

    /// Returns the number of registered resources.
    #[must_use]
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Returns whether no resources are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Lists contract definitions for the registered resources.
    #[must_use]
    pub fn definitions(&self) -> Vec<ResourceDefinition> {
        yamcs_contract::resource_definitions()
            .into_iter()
            .filter(|definition| {
                ResourceName::parse_uri(&definition.uri)
                    .is_some_and(|resource| self.handlers.contains_key(&resource))
            })
            .collect()
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Registration failures.
///
/// Duplicates indicate a wiring bug, so startup treats them as fatal.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    /// A tool name was bound twice.
    #[error("duplicate tool registration: {}", .0.as_str())]
    DuplicateTool(ToolName),
    /// A resource URI was bound twice.
    #[error("duplicate resource registration: {}", .0.as_uri())]
    DuplicateResource(ResourceName),
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

    use serde_json::json;
    use yamcs_client::ClientConfig;

    use super::*;
    use crate::audit::NoopAuditSink;

    fn test_context(instance: &str) -> Arc<SessionContext> {
        let config = ClientConfig {
            url: "http://127.0.0.1:8090".to_string(),
            instance: instance.to_string(),
            username: None,
            password: None,
            timeout: Duration::from_secs(5),
        };
        Arc::new(SessionContext {
            sessions: SessionManager::new(config),
            default_instance: instance.to_string(),
            server_name: "yamcs-mcp".to_string(),
            url: "http://127.0.0.1:8090".to_string(),
            enabled_subsystems: vec!["server", "mdb"],
            audit: Arc::new(NoopAuditSink),
        })
    }

    fn bind_echo(registry: &mut ToolRegistry, context: &Arc<SessionContext>) {
        let context = Arc::clone(context);
        registry
            .register(ToolName::MdbListParameters, move |payload| {
                let context = Arc::clone(&context);
                async move {
                    json!({
                        "instance": context.instance(payload["instance"].as_str()),
                        "echo": payload["limit"],
                    })
                }
            })
            .unwrap();
    }

    #[test]
    fn duplicate_tool_registration_is_rejected() {
        let mut registry = ToolRegistry::new();
        registry.register(ToolName::ServerHealthCheck, |_payload| async { json!({}) }).unwrap();
        let err = registry
            .register(ToolName::ServerHealthCheck, |_payload| async { json!({}) })
            .unwrap_err();
        assert_eq!(err, RegistryError::DuplicateTool(ToolName::ServerHealthCheck));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn duplicate_resource_registration_is_rejected() {
        let mut registry = ResourceRegistry::new();
        registry.register(ResourceName::LinksStatus, || async { String::new() }).unwrap();
        let err = registry
            .register(ResourceName::LinksStatus, || async { String::new() })
            .unwrap_err();
        assert_eq!(err, RegistryError::DuplicateResource(ResourceName::LinksStatus));
    }

    #[test]
    fn definitions_follow_contract_order_for_registered_tools() {
        let mut registry = ToolRegistry::new();
        registry.register(ToolName::ArchiveEvents, |_payload| async { json!({}) }).unwrap();
        registry.register(ToolName::ServerHealthCheck, |_payload| async { json!({}) }).unwrap();
        let definitions = registry.definitions();
        let names: Vec<ToolName> = definitions.iter().map(|definition| definition.name).collect();
        assert_eq!(names, vec![ToolName::ServerHealthCheck, ToolName::ArchiveEvents]);
    }

    #[test]
    fn resource_definitions_filter_to_registered_uris() {
        let mut registry = ResourceRegistry::new();
        registry.register(ResourceName::MdbParameters, || async { String::new() }).unwrap();
        let definitions = registry.definitions();
        assert_eq!(definitions.len(), 1);
        assert_eq!(definitions[0].uri, "mdb://parameters");
    }

    #[test]
    fn unregistered_names_have_no_handler() {
        let tools = ToolRegistry::new();
        assert!(tools.handler(ToolName::CommandsRun).is_none());
        assert!(tools.is_empty());
        let resources = ResourceRegistry::new();
        assert!(resources.handler(ResourceName::StorageOverview).is_none());
        assert!(resources.is_empty());
    }

    #[tokio::test]
    async fn handlers_use_their_bound_context() {
        let mut registry = ToolRegistry::new();
        bind_echo(&mut registry, &test_context("simulator"));
        let handler = registry.handler(ToolName::MdbListParameters).unwrap();
        let result = handler(json!({ "limit": 10 })).await;
        assert_eq!(result["instance"], "simulator");
        assert_eq!(result["echo"], 10);
        let explicit = handler(json!({ "instance": "ops", "limit": 1 })).await;
        assert_eq!(explicit["instance"], "ops");
    }

    #[tokio::test]
    async fn two_registries_with_different_contexts_do_not_interfere() {
        let mut first = ToolRegistry::new();
        bind_echo(&mut first, &test_context("simulator"));
        let mut second = ToolRegistry::new();
        bind_echo(&mut second, &test_context("ops"));
        let from_first = first.handler(ToolName::MdbListParameters).unwrap()(json!({})).await;
        let from_second = second.handler(ToolName::MdbListParameters).unwrap()(json!({})).await;
        assert_eq!(from_first["instance"], "simulator");
        assert_eq!(from_second["instance"], "ops");
    }

    #[test]
    fn blank_instance_falls_back_to_default() {
        let context = test_context("simulator");
        assert_eq!(context.instance(None), "simulator");
        assert_eq!(context.instance(Some("")), "simulator");
        assert_eq!(context.instance(Some("   ")), "simulator");
        assert_eq!(context.instance(Some("ops")), "ops");
    }
}
