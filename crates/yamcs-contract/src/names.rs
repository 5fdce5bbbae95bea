// crates/yamcs-contract/src/names.rs
// ============================================================================
// Module: Contract Identifiers
// Description: Canonical tool names, resource URIs, and subsystem labels.
// Purpose: Shared naming across contracts, runtime registration, and config.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Canonical identifiers for the Yamcs MCP bridge. Tool names are
//! subsystem-prefixed so that every subsystem can be mounted into one MCP
//! runtime without collisions; resource URIs use the subsystem label as the
//! URI scheme. These names are part of the external contract surface.

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Subsystems
// ============================================================================

/// Subsystem labels used for tool prefixes, resource schemes, and enable
/// flags in configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Subsystem {
    /// Server-level diagnostics (always registered).
    Server,
    /// Mission Database views (parameters, commands, space systems).
    Mdb,
    /// Processor management.
    Processors,
    /// Data link management.
    Links,
    /// Bucket/object storage.
    Storage,
    /// Instance lifecycle.
    Instances,
    /// Alarm monitoring and lifecycle actions.
    Alarms,
    /// Command execution and history.
    Commands,
    /// Archived telemetry, events, and command history.
    Archive,
}

impl Subsystem {
    /// Returns the stable subsystem label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Server => "server",
            Self::Mdb => "mdb",
            Self::Processors => "processors",
            Self::Links => "links",
            Self::Storage => "storage",
            Self::Instances => "instances",
            Self::Alarms => "alarms",
            Self::Commands => "commands",
            Self::Archive => "archive",
        }
    }

    /// Returns all subsystems in canonical listing order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Server,
            Self::Mdb,
            Self::Processors,
            Self::Links,
            Self::Storage,
            Self::Instances,
            Self::Alarms,
            Self::Commands,
            Self::Archive,
        ]
    }
}

impl fmt::Display for Subsystem {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

// ============================================================================
// SECTION: Tool Names
// ============================================================================

/// Canonical tool names for the Yamcs MCP bridge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolName {
    /// Report bridge health and connection state.
    ServerHealthCheck,
    /// Force a Yamcs round trip and report the outcome.
    ServerTestConnection,
    /// List Mission Database parameters.
    MdbListParameters,
    /// Fetch one parameter definition.
    MdbDescribeParameter,
    /// List Mission Database commands.
    MdbListCommands,
    /// Fetch one command definition with argument descriptors.
    MdbDescribeCommand,
    /// List Mission Database space systems.
    MdbListSpaceSystems,
    /// List processors on an instance.
    ProcessorsList,
    /// Fetch one processor with configuration and statistics.
    ProcessorsDescribe,
    /// Delete a processor.
    ProcessorsDelete,
    /// List data links on an instance.
    LinksList,
    /// Fetch one data link with counters and detail status.
    LinksDescribe,
    /// Enable a data link.
    LinksEnable,
    /// Disable a data link.
    LinksDisable,
    /// Reset data link counters.
    LinksReset,
    /// Aggregate link counters across an instance.
    LinksStatistics,
    /// List storage buckets.
    StorageListBuckets,
    /// List objects within a bucket.
    StorageListObjects,
    /// Fetch object metadata.
    StorageDescribeObject,
    /// Delete an object from a bucket.
    StorageDeleteObject,
    /// Create a storage bucket.
    StorageCreateBucket,
    /// List Yamcs instances.
    InstancesList,
    /// Fetch one instance with processors and services.
    InstancesDescribe,
    /// Start an instance.
    InstancesStart,
    /// Stop an instance.
    InstancesStop,
    /// List active alarms on a processor.
    AlarmsList,
    /// Fetch one active alarm by name.
    AlarmsDescribe,
    /// Acknowledge an alarm.
    AlarmsAcknowledge,
    /// Shelve an alarm.
    AlarmsShelve,
    /// Unshelve an alarm.
    AlarmsUnshelve,
    /// Clear an alarm.
    AlarmsClear,
    /// Read archived alarm history.
    AlarmsReadLog,
    /// List executable commands.
    CommandsList,
    /// Fetch one command with argument constraints and significance.
    CommandsDescribe,
    /// Issue a command on a processor.
    CommandsRun,
    /// Read command execution history.
    CommandsReadLog,
    /// List archived packets.
    ArchiveListPackets,
    /// Read archived parameter values.
    ArchiveParameterValues,
    /// Read archived command history.
    ArchiveCommandHistory,
    /// Read archived events.
    ArchiveEvents,
}

impl ToolName {
    /// Returns the canonical string name for the tool.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ServerHealthCheck => "server_health_check",
            Self::ServerTestConnection => "server_test_connection",
            Self::MdbListParameters => "mdb_list_parameters",
            Self::MdbDescribeParameter => "mdb_describe_parameter",
            Self::MdbListCommands => "mdb_list_commands",
            Self::MdbDescribeCommand => "mdb_describe_command",
            Self::MdbListSpaceSystems => "mdb_list_space_systems",
            Self::ProcessorsList => "processors_list",
            Self::ProcessorsDescribe => "processors_describe",
            Self::ProcessorsDelete => "processors_delete",
            Self::LinksList => "links_list",
            Self::LinksDescribe => "links_describe",
            Self::LinksEnable => "links_enable",
            Self::LinksDisable => "links_disable",
            Self::LinksReset => "links_reset",
            Self::LinksStatistics => "links_statistics",
            Self::StorageListBuckets => "storage_list_buckets",
            Self::StorageListObjects => "storage_list_objects",
            Self::StorageDescribeObject => "storage_describe_object",
            Self::StorageDeleteObject => "storage_delete_object",
            Self::StorageCreateBucket => "storage_create_bucket",
            Self::InstancesList => "instances_list",
            Self::InstancesDescribe => "instances_describe",
            Self::InstancesStart => "instances_start",
            Self::InstancesStop => "instances_stop",
            Self::AlarmsList => "alarms_list",
            Self::AlarmsDescribe => "alarms_describe",
            Self::AlarmsAcknowledge => "alarms_acknowledge",
            Self::AlarmsShelve => "alarms_shelve",
            Self::AlarmsUnshelve => "alarms_unshelve",
            Self::AlarmsClear => "alarms_clear",
            Self::AlarmsReadLog => "alarms_read_log",
            Self::CommandsList => "commands_list",
            Self::CommandsDescribe => "commands_describe",
            Self::CommandsRun => "commands_run",
            Self::CommandsReadLog => "commands_read_log",
            Self::ArchiveListPackets => "archive_list_packets",
            Self::ArchiveParameterValues => "archive_parameter_values",
            Self::ArchiveCommandHistory => "archive_command_history",
            Self::ArchiveEvents => "archive_events",
        }
    }

    /// Returns the subsystem that owns the tool.
    #[must_use]
    pub const fn subsystem(self) -> Subsystem {
        match self {
            Self::ServerHealthCheck | Self::ServerTestConnection => Subsystem::Server,
            Self::MdbListParameters
            | Self::MdbDescribeParameter
            | Self::MdbListCommands
            | Self::MdbDescribeCommand
            | Self::MdbListSpaceSystems => Subsystem::Mdb,
            Self::ProcessorsList | Self::ProcessorsDescribe | Self::ProcessorsDelete => {
                Subsystem::Processors
            }
            Self::LinksList
            | Self::LinksDescribe
            | Self::LinksEnable
            | Self::LinksDisable
            | Self::LinksReset
            | Self::LinksStatistics => Subsystem::Links,
            Self::StorageListBuckets
            | Self::StorageListObjects
            | Self::StorageDescribeObject
            | Self::StorageDeleteObject
            | Self::StorageCreateBucket => Subsystem::Storage,
            Self::InstancesList
            | Self::InstancesDescribe
            | Self::InstancesStart
            | Self::InstancesStop => Subsystem::Instances,
            Self::AlarmsList
            | Self::AlarmsDescribe
            | Self::AlarmsAcknowledge
            | Self::AlarmsShelve
            | Self::AlarmsUnshelve
            | Self::AlarmsClear
            | Self::AlarmsReadLog => Subsystem::Alarms,
            Self::CommandsList
            | Self::CommandsDescribe
            | Self::CommandsRun
            | Self::CommandsReadLog => Subsystem::Commands,
            Self::ArchiveListPackets
            | Self::ArchiveParameterValues
            | Self::ArchiveCommandHistory
            | Self::ArchiveEvents => Subsystem::Archive,
        }
    }

    /// Returns all tool names in canonical listing order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::ServerHealthCheck,
            Self::ServerTestConnection,
            Self::MdbListParameters,
            Self::MdbDescribeParameter,
            Self::MdbListCommands,
            Self::MdbDescribeCommand,
            Self::MdbListSpaceSystems,
            Self::ProcessorsList,
            Self::ProcessorsDescribe,
            Self::ProcessorsDelete,
            Self::LinksList,
            Self::LinksDescribe,
            Self::LinksEnable,
            Self::LinksDisable,
            Self::LinksReset,
            Self::LinksStatistics,
            Self::StorageListBuckets,
            Self::StorageListObjects,
            Self::StorageDescribeObject,
            Self::StorageDeleteObject,
            Self::StorageCreateBucket,
            Self::InstancesList,
            Self::InstancesDescribe,
            Self::InstancesStart,
            Self::InstancesStop,
            Self::AlarmsList,
            Self::AlarmsDescribe,
            Self::AlarmsAcknowledge,
            Self::AlarmsShelve,
            Self::AlarmsUnshelve,
            Self::AlarmsClear,
            Self::AlarmsReadLog,
            Self::CommandsList,
            Self::CommandsDescribe,
            Self::CommandsRun,
            Self::CommandsReadLog,
            Self::ArchiveListPackets,
            Self::ArchiveParameterValues,
            Self::ArchiveCommandHistory,
            Self::ArchiveEvents,
        ]
    }

    /// Parses a tool name from its string representation.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        Self::all().iter().copied().find(|tool| tool.as_str() == name)
    }
}

impl fmt::Display for ToolName {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

// ============================================================================
// SECTION: Resource Names
// ============================================================================

/// Canonical resource URIs for the Yamcs MCP bridge.
///
/// # Invariants
/// - The URI scheme always equals the owning subsystem label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceName {
    /// Parameter counts grouped by space system.
    MdbParameters,
    /// Command counts grouped by space system.
    MdbCommands,
    /// Processor states grouped by instance.
    ProcessorsList,
    /// Per-link status table.
    LinksStatus,
    /// Aggregate link counters.
    LinksStatistics,
    /// Bucket usage table.
    StorageOverview,
    /// Instance states with processor counts.
    InstancesList,
    /// Active alarms grouped by instance and processor.
    AlarmsActive,
    /// Archive state for the configured instance.
    ArchiveOverview,
}

impl ResourceName {
    /// Returns the canonical resource URI.
    #[must_use]
    pub const fn as_uri(self) -> &'static str {
        match self {
            Self::MdbParameters => "mdb://parameters",
            Self::MdbCommands => "mdb://commands",
            Self::ProcessorsList => "processors://list",
            Self::LinksStatus => "links://status",
            Self::LinksStatistics => "links://statistics",
            Self::StorageOverview => "storage://overview",
            Self::InstancesList => "instances://list",
            Self::AlarmsActive => "alarms://active",
            Self::ArchiveOverview => "archive://overview",
        }
    }

    /// Returns the subsystem that owns the resource.
    #[must_use]
    pub const fn subsystem(self) -> Subsystem {
        match self {
            Self::MdbParameters | Self::MdbCommands => Subsystem::Mdb,
            Self::ProcessorsList => Subsystem::Processors,
            Self::LinksStatus | Self::LinksStatistics => Subsystem::Links,
            Self::StorageOverview => Subsystem::Storage,
            Self::InstancesList => Subsystem::Instances,
            Self::AlarmsActive => Subsystem::Alarms,
            Self::ArchiveOverview => Subsystem::Archive,
        }
    }

    /// Returns all resource names in canonical listing order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::MdbParameters,
            Self::MdbCommands,
            Self::ProcessorsList,
            Self::LinksStatus,
            Self::LinksStatistics,
            Self::StorageOverview,
            Self::InstancesList,
            Self::AlarmsActive,
            Self::ArchiveOverview,
        ]
    }

    /// Parses a resource name from its URI.
    #[must_use]
    pub fn parse_uri(uri: &str) -> Option<Self> {
        Self::all().iter().copied().find(|resource| resource.as_uri() == uri)
    }
}

impl fmt::Display for ResourceName {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_uri())
    }
}

#[cfg(test)]
mod tests;
