// crates/yamcs-client/src/api.rs
// ============================================================================
// Module: API Endpoints
// Description: Typed endpoint wrappers over the Yamcs HTTP API.
// Purpose: One method per REST operation the bridge consumes.
// Dependencies: serde_json, yamcs-client::client, yamcs-client::types
// ============================================================================

//! ## Overview
//! Endpoint wrappers grouped by Yamcs subsystem. Each method builds the
//! documented REST path, passes filters as query parameters, and decodes into
//! the typed payloads from [`crate::types`]. Qualified names (parameters,
//! commands, alarms) start with `/` and are appended to the collection
//! segment directly, matching the Yamcs routing convention. History listings
//! request descending order so the newest records come first.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde_json::Map;
use serde_json::Value;

use crate::client::YamcsClient;
use crate::error::YamcsError;
use crate::types::AlarmData;
use crate::types::BucketInfo;
use crate::types::CommandHistoryEntry;
use crate::types::CommandInfo;
use crate::types::EventInfo;
use crate::types::InstanceInfo;
use crate::types::IssueCommandResponse;
use crate::types::LinkInfo;
use crate::types::ListAlarmsResponse;
use crate::types::ListBucketsResponse;
use crate::types::ListCommandHistoryResponse;
use crate::types::ListCommandsResponse;
use crate::types::ListEventsResponse;
use crate::types::ListInstancesResponse;
use crate::types::ListLinksResponse;
use crate::types::ListObjectsResponse;
use crate::types::ListPacketsResponse;
use crate::types::ListParameterHistoryResponse;
use crate::types::ListParametersResponse;
use crate::types::ListProcessorsResponse;
use crate::types::ListServicesResponse;
use crate::types::ListSpaceSystemsResponse;
use crate::types::ObjectInfo;
use crate::types::PacketData;
use crate::types::ParameterInfo;
use crate::types::ParameterValueInfo;
use crate::types::ProcessorInfo;
use crate::types::ServiceInfo;
use crate::types::SpaceSystemInfo;

// ============================================================================
// SECTION: Requests
// ============================================================================

/// Alarm lifecycle actions accepted by the alarm edit endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlarmAction {
    /// Acknowledge the activation.
    Acknowledge,
    /// Shelve the activation.
    Shelve,
    /// Unshelve the activation.
    Unshelve,
    /// Clear the activation.
    Clear,
}

impl AlarmAction {
    /// Returns the wire state value for the action.
    #[must_use]
    pub const fn as_state(self) -> &'static str {
        match self {
            Self::Acknowledge => "acknowledged",
            Self::Shelve => "shelved",
            Self::Unshelve => "unshelved",
            Self::Clear => "cleared",
        }
    }
}

/// Options for issuing a command.
#[derive(Debug, Clone, Default)]
pub struct IssueCommandRequest {
    /// Argument assignments forwarded verbatim as name/value pairs.
    pub args: Map<String, Value>,
    /// Validate without queueing the command.
    pub dry_run: bool,
    /// Client-assigned sequence number.
    pub sequence_number: Option<i64>,
    /// Comment recorded in command history.
    pub comment: Option<String>,
}

// ============================================================================
// SECTION: Mission Database
// ============================================================================

impl YamcsClient {
    /// Lists Mission Database parameters with optional system and search
    /// filters.
    ///
    /// # Errors
    ///
    /// Returns [`YamcsError`] when the request fails.
    pub async fn list_parameters(
        &self,
        instance: &str,
        system: Option<&str>,
        search: Option<&str>,
        limit: u32,
    ) -> Result<Vec<ParameterInfo>, YamcsError> {
        let mut query = vec![("limit", limit.to_string())];
        if let Some(system) = system {
            query.push(("system", system.to_string()));
        }
        if let Some(search) = search {
            query.push(("q", search.to_string()));
        }
        let response: ListParametersResponse =
            self.get_json(&format!("/api/mdb/{instance}/parameters"), &query).await?;
        Ok(response.parameters)
    }

    /// Fetches one Mission Database parameter by qualified name.
    ///
    /// # Errors
    ///
    /// Returns [`YamcsError::NotFound`] for unknown parameters.
    pub async fn get_parameter(
        &self,
        instance: &str,
        qualified_name: &str,
    ) -> Result<ParameterInfo, YamcsError> {
        let path = join_qualified(&format!("/api/mdb/{instance}/parameters"), qualified_name);
        self.get_json(&path, &[]).await
    }

    /// Lists Mission Database commands with optional system and search
    /// filters.
    ///
    /// # Errors
    ///
    /// Returns [`YamcsError`] when the request fails.
    pub async fn list_commands(
        &self,
        instance: &str,
        system: Option<&str>,
        search: Option<&str>,
        limit: u32,
    ) -> Result<Vec<CommandInfo>, YamcsError> {
        let mut query = vec![("limit", limit.to_string())];
        if let Some(system) = system {
            query.push(("system", system.to_string()));
        }
        if let Some(search) = search {
            query.push(("q", search.to_string()));
        }
        let response: ListCommandsResponse =
            self.get_json(&format!("/api/mdb/{instance}/commands"), &query).await?;
        Ok(response.commands)
    }

    /// Fetches one Mission Database command by qualified name.
    ///
    /// # Errors
    ///
    /// Returns [`YamcsError::NotFound`] for unknown commands.
    pub async fn get_command(
        &self,
        instance: &str,
        qualified_name: &str,
    ) -> Result<CommandInfo, YamcsError> {
        let path = join_qualified(&format!("/api/mdb/{instance}/commands"), qualified_name);
        self.get_json(&path, &[]).await
    }

    /// Lists Mission Database space systems.
    ///
    /// # Errors
    ///
    /// Returns [`YamcsError`] when the request fails.
    pub async fn list_space_systems(
        &self,
        instance: &str,
    ) -> Result<Vec<SpaceSystemInfo>, YamcsError> {
        let response: ListSpaceSystemsResponse =
            self.get_json(&format!("/api/mdb/{instance}/space-systems"), &[]).await?;
        Ok(response.space_systems)
    }
}

// ============================================================================
// SECTION: Processors
// ============================================================================

impl YamcsClient {
    /// Lists processors running in an instance.
    ///
    /// # Errors
    ///
    /// Returns [`YamcsError`] when the request fails.
    pub async fn list_processors(&self, instance: &str) -> Result<Vec<ProcessorInfo>, YamcsError> {
        let response: ListProcessorsResponse =
            self.get_json(&format!("/api/processors/{instance}"), &[]).await?;
        Ok(response.processors)
    }

    /// Fetches one processor by name.
    ///
    /// # Errors
    ///
    /// Returns [`YamcsError::NotFound`] for unknown processors.
    pub async fn get_processor(
        &self,
        instance: &str,
        processor: &str,
    ) -> Result<ProcessorInfo, YamcsError> {
        self.get_json(&format!("/api/processors/{instance}/{processor}"), &[]).await
    }

    /// Deletes a processor.
    ///
    /// # Errors
    ///
    /// Returns [`YamcsError`] when Yamcs refuses the deletion.
    pub async fn delete_processor(
        &self,
        instance: &str,
        processor: &str,
    ) -> Result<(), YamcsError> {
        self.delete_empty(&format!("/api/processors/{instance}/{processor}")).await
    }

    /// Lists services configured on an instance.
    ///
    /// # Errors
    ///
    /// Returns [`YamcsError`] when the request fails.
    pub async fn list_services(&self, instance: &str) -> Result<Vec<ServiceInfo>, YamcsError> {
        let response: ListServicesResponse =
            self.get_json(&format!("/api/services/{instance}"), &[]).await?;
        Ok(response.services)
    }
}

// ============================================================================
// SECTION: Links
// ============================================================================

impl YamcsClient {
    /// Lists data links registered on an instance.
    ///
    /// # Errors
    ///
    /// Returns [`YamcsError`] when the request fails.
    pub async fn list_links(&self, instance: &str) -> Result<Vec<LinkInfo>, YamcsError> {
        let response: ListLinksResponse =
            self.get_json(&format!("/api/links/{instance}"), &[]).await?;
        Ok(response.links)
    }

    /// Fetches one data link by name.
    ///
    /// # Errors
    ///
    /// Returns [`YamcsError::NotFound`] for unknown links.
    pub async fn get_link(&self, instance: &str, link: &str) -> Result<LinkInfo, YamcsError> {
        self.get_json(&format!("/api/links/{instance}/{link}"), &[]).await
    }

    /// Enables a data link.
    ///
    /// # Errors
    ///
    /// Returns [`YamcsError`] when the action fails.
    pub async fn enable_link(&self, instance: &str, link: &str) -> Result<(), YamcsError> {
        self.post_empty(&format!("/api/links/{instance}/{link}:enable")).await
    }

    /// Disables a data link.
    ///
    /// # Errors
    ///
    /// Returns [`YamcsError`] when the action fails.
    pub async fn disable_link(&self, instance: &str, link: &str) -> Result<(), YamcsError> {
        self.post_empty(&format!("/api/links/{instance}/{link}:disable")).await
    }

    /// Resets the data counters of a link.
    ///
    /// # Errors
    ///
    /// Returns [`YamcsError`] when the action fails.
    pub async fn reset_link(&self, instance: &str, link: &str) -> Result<(), YamcsError> {
        self.post_empty(&format!("/api/links/{instance}/{link}:resetCounters")).await
    }
}

// ============================================================================
// SECTION: Storage
// ============================================================================

impl YamcsClient {
    /// Lists storage buckets on an instance.
    ///
    /// # Errors
    ///
    /// Returns [`YamcsError`] when the request fails.
    pub async fn list_buckets(&self, instance: &str) -> Result<Vec<BucketInfo>, YamcsError> {
        let response: ListBucketsResponse =
            self.get_json(&format!("/api/storage/buckets/{instance}"), &[]).await?;
        Ok(response.buckets)
    }

    /// Lists objects in a bucket with an optional name prefix.
    ///
    /// # Errors
    ///
    /// Returns [`YamcsError::NotFound`] for unknown buckets.
    pub async fn list_objects(
        &self,
        instance: &str,
        bucket: &str,
        prefix: Option<&str>,
    ) -> Result<Vec<ObjectInfo>, YamcsError> {
        let mut query = Vec::new();
        if let Some(prefix) = prefix {
            query.push(("prefix", prefix.to_string()));
        }
        let response: ListObjectsResponse = self
            .get_json(&format!("/api/storage/buckets/{instance}/{bucket}/objects"), &query)
            .await?;
        Ok(response.objects)
    }

    /// Deletes an object from a bucket.
    ///
    /// # Errors
    ///
    /// Returns [`YamcsError`] when the deletion fails.
    pub async fn delete_object(
        &self,
        instance: &str,
        bucket: &str,
        object: &str,
    ) -> Result<(), YamcsError> {
        self.delete_empty(&format!("/api/storage/buckets/{instance}/{bucket}/objects/{object}"))
            .await
    }

    /// Creates a storage bucket.
    ///
    /// # Errors
    ///
    /// Returns [`YamcsError`] when Yamcs refuses the creation.
    pub async fn create_bucket(
        &self,
        instance: &str,
        name: &str,
    ) -> Result<BucketInfo, YamcsError> {
        let body = Value::Object(Map::from_iter([(
            String::from("name"),
            Value::String(name.to_string()),
        )]));
        self.post_json(&format!("/api/storage/buckets/{instance}"), Some(&body)).await
    }
}

// ============================================================================
// SECTION: Instances
// ============================================================================

impl YamcsClient {
    /// Lists all Yamcs instances.
    ///
    /// # Errors
    ///
    /// Returns [`YamcsError`] when the request fails.
    pub async fn list_instances(&self) -> Result<Vec<InstanceInfo>, YamcsError> {
        let response: ListInstancesResponse = self.get_json("/api/instances", &[]).await?;
        Ok(response.instances)
    }

    /// Fetches one instance by name.
    ///
    /// # Errors
    ///
    /// Returns [`YamcsError::NotFound`] for unknown instances.
    pub async fn get_instance(&self, instance: &str) -> Result<InstanceInfo, YamcsError> {
        self.get_json(&format!("/api/instances/{instance}"), &[]).await
    }

    /// Starts an instance.
    ///
    /// # Errors
    ///
    /// Returns [`YamcsError`] when the lifecycle change fails.
    pub async fn start_instance(&self, instance: &str) -> Result<(), YamcsError> {
        self.post_empty(&format!("/api/instances/{instance}:start")).await
    }

    /// Stops an instance.
    ///
    /// # Errors
    ///
    /// Returns [`YamcsError`] when the lifecycle change fails.
    pub async fn stop_instance(&self, instance: &str) -> Result<(), YamcsError> {
        self.post_empty(&format!("/api/instances/{instance}:stop")).await
    }
}

// ============================================================================
// SECTION: Alarms
// ============================================================================

impl YamcsClient {
    /// Lists active alarms on a processor.
    ///
    /// # Errors
    ///
    /// Returns [`YamcsError`] when the request fails.
    pub async fn list_alarms(
        &self,
        instance: &str,
        processor: &str,
    ) -> Result<Vec<AlarmData>, YamcsError> {
        let response: ListAlarmsResponse = self
            .get_json(&format!("/api/processors/{instance}/{processor}/alarms"), &[])
            .await?;
        Ok(response.alarms)
    }

    /// Applies a lifecycle action to an alarm activation.
    ///
    /// # Errors
    ///
    /// Returns [`YamcsError`] when Yamcs refuses the action.
    pub async fn edit_alarm(
        &self,
        instance: &str,
        processor: &str,
        alarm: &str,
        sequence_number: u32,
        action: AlarmAction,
        comment: Option<&str>,
    ) -> Result<(), YamcsError> {
        let mut body = Map::new();
        body.insert(String::from("state"), Value::String(action.as_state().to_string()));
        if let Some(comment) = comment {
            body.insert(String::from("comment"), Value::String(comment.to_string()));
        }
        let prefix = format!("/api/processors/{instance}/{processor}/alarms");
        let path = format!("{}/{sequence_number}", join_qualified(&prefix, alarm));
        self.patch_empty(&path, &Value::Object(body)).await
    }

    /// Reads archived alarm history, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`YamcsError`] when the request fails.
    pub async fn list_alarm_history(
        &self,
        instance: &str,
        start: Option<&str>,
        stop: Option<&str>,
        limit: u32,
    ) -> Result<Vec<AlarmData>, YamcsError> {
        let mut query = vec![("limit", limit.to_string()), ("order", String::from("desc"))];
        push_range(&mut query, start, stop);
        let response: ListAlarmsResponse =
            self.get_json(&format!("/api/archive/{instance}/alarms"), &query).await?;
        Ok(response.alarms)
    }
}

// ============================================================================
// SECTION: Commanding
// ============================================================================

impl YamcsClient {
    /// Issues or validates a command on a processor.
    ///
    /// # Errors
    ///
    /// Returns [`YamcsError::Validation`] when Yamcs rejects the arguments
    /// and other variants for transport or queue failures.
    pub async fn issue_command(
        &self,
        instance: &str,
        processor: &str,
        command: &str,
        request: &IssueCommandRequest,
    ) -> Result<IssueCommandResponse, YamcsError> {
        let mut body = Map::new();
        if !request.args.is_empty() {
            body.insert(String::from("args"), Value::Object(request.args.clone()));
        }
        body.insert(String::from("dryRun"), Value::Bool(request.dry_run));
        if let Some(sequence_number) = request.sequence_number {
            body.insert(String::from("sequenceNumber"), Value::from(sequence_number));
        }
        if let Some(comment) = &request.comment {
            body.insert(String::from("comment"), Value::String(comment.clone()));
        }
        let prefix = format!("/api/processors/{instance}/{processor}/commands");
        let path = join_qualified(&prefix, command);
        self.post_json(&path, Some(&Value::Object(body))).await
    }

    /// Reads archived command history, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`YamcsError`] when the request fails.
    pub async fn list_command_history(
        &self,
        instance: &str,
        command: Option<&str>,
        start: Option<&str>,
        stop: Option<&str>,
        limit: u32,
    ) -> Result<Vec<CommandHistoryEntry>, YamcsError> {
        let mut query = vec![("limit", limit.to_string()), ("order", String::from("desc"))];
        if let Some(command) = command {
            query.push(("q", command.to_string()));
        }
        push_range(&mut query, start, stop);
        let response: ListCommandHistoryResponse =
            self.get_json(&format!("/api/archive/{instance}/commands"), &query).await?;
        Ok(response.commands)
    }
}

// ============================================================================
// SECTION: Archive
// ============================================================================

impl YamcsClient {
    /// Lists archived telemetry packets, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`YamcsError`] when the request fails.
    pub async fn list_packets(
        &self,
        instance: &str,
        start: Option<&str>,
        stop: Option<&str>,
        name: Option<&str>,
        limit: u32,
    ) -> Result<Vec<PacketData>, YamcsError> {
        let mut query = vec![("limit", limit.to_string()), ("order", String::from("desc"))];
        if let Some(name) = name {
            query.push(("name", name.to_string()));
        }
        push_range(&mut query, start, stop);
        let response: ListPacketsResponse =
            self.get_json(&format!("/api/archive/{instance}/packets"), &query).await?;
        Ok(response.packets)
    }

    /// Reads archived values for a parameter, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`YamcsError::NotFound`] for unknown parameters.
    pub async fn list_parameter_history(
        &self,
        instance: &str,
        parameter: &str,
        start: Option<&str>,
        stop: Option<&str>,
        limit: u32,
    ) -> Result<Vec<ParameterValueInfo>, YamcsError> {
        let mut query = vec![("limit", limit.to_string()), ("order", String::from("desc"))];
        push_range(&mut query, start, stop);
        let path = join_qualified(&format!("/api/archive/{instance}/parameters"), parameter);
        let response: ListParameterHistoryResponse = self.get_json(&path, &query).await?;
        Ok(response.parameter)
    }

    /// Reads archived events, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`YamcsError`] when the request fails.
    pub async fn list_events(
        &self,
        instance: &str,
        severity: Option<&str>,
        source: Option<&str>,
        start: Option<&str>,
        stop: Option<&str>,
        limit: u32,
    ) -> Result<Vec<EventInfo>, YamcsError> {
        let mut query = vec![("limit", limit.to_string()), ("order", String::from("desc"))];
        if let Some(severity) = severity {
            query.push(("severity", severity.to_string()));
        }
        if let Some(source) = source {
            query.push(("source", source.to_string()));
        }
        push_range(&mut query, start, stop);
        let response: ListEventsResponse =
            self.get_json(&format!("/api/archive/{instance}/events"), &query).await?;
        Ok(response.events)
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Appends a qualified name to a collection path segment.
fn join_qualified(prefix: &str, qualified_name: &str) -> String {
    if qualified_name.starts_with('/') {
        format!("{prefix}{qualified_name}")
    } else {
        format!("{prefix}/{qualified_name}")
    }
}

/// Pushes optional start/stop bounds onto a query list.
fn push_range(query: &mut Vec<(&str, String)>, start: Option<&str>, stop: Option<&str>) {
    if let Some(start) = start {
        query.push(("start", start.to_string()));
    }
    if let Some(stop) = stop {
        query.push(("stop", stop.to_string()));
    }
}
