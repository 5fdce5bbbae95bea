// crates/yamcs-client/src/types.rs
// ============================================================================
// Module: Wire Types
// Description: Typed payloads for the Yamcs HTTP API.
// Purpose: Decode Yamcs REST responses without losing tolerated fields.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! Typed views of the Yamcs HTTP API payloads this crate consumes. Yamcs
//! serializes protobuf messages to JSON, which brings two quirks these types
//! absorb: 64-bit integers arrive as JSON strings, and binary fields arrive
//! base64-encoded. Unknown fields are ignored so newer Yamcs releases do not
//! break decoding.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::Number;
use serde_json::Value;

// ============================================================================
// SECTION: Protobuf JSON Helpers
// ============================================================================

/// Deserializers for protobuf JSON int64 fields, which arrive as strings.
pub(crate) mod flex {
    use serde::Deserialize;
    use serde::Deserializer;
    use serde::de::Error;
    use serde_json::Value;

    /// Accepts an optional int64 encoded as a JSON number or string.
    ///
    /// # Errors
    ///
    /// Returns a deserialization error when the value is not an int64.
    pub fn opt_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Value::deserialize(deserializer)? {
            Value::Null => Ok(None),
            Value::Number(number) => number
                .as_i64()
                .map(Some)
                .ok_or_else(|| D::Error::custom("integer out of i64 range")),
            Value::String(text) => text
                .parse::<i64>()
                .map(Some)
                .map_err(|_| D::Error::custom("string is not an int64")),
            _ => Err(D::Error::custom("expected int64 as number or string")),
        }
    }
}

// ============================================================================
// SECTION: Common
// ============================================================================

/// Namespaced object identifier used throughout the Yamcs API.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NamedObjectId {
    /// Object name, possibly relative to `namespace`.
    #[serde(default)]
    pub name: Option<String>,
    /// Namespace qualifying the name.
    #[serde(default)]
    pub namespace: Option<String>,
}

impl NamedObjectId {
    /// Returns the fully qualified name, joining namespace and name.
    #[must_use]
    pub fn qualified_name(&self) -> String {
        let name = self.name.clone().unwrap_or_default();
        match &self.namespace {
            Some(namespace) if namespace.starts_with('/') => format!("{namespace}/{name}"),
            _ => name,
        }
    }
}

/// Yamcs value union, one variant field populated per value type.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YamcsValue {
    /// Value type discriminator, e.g. FLOAT or ENUMERATED.
    #[serde(default, rename = "type")]
    pub value_type: Option<String>,
    /// String and enumerated values.
    #[serde(default)]
    pub string_value: Option<String>,
    /// Boolean values.
    #[serde(default)]
    pub boolean_value: Option<bool>,
    /// 64-bit float values.
    #[serde(default)]
    pub double_value: Option<f64>,
    /// 32-bit float values.
    #[serde(default)]
    pub float_value: Option<f64>,
    /// Signed 32-bit integers.
    #[serde(default)]
    pub sint32_value: Option<i32>,
    /// Unsigned 32-bit integers.
    #[serde(default)]
    pub uint32_value: Option<u32>,
    /// Signed 64-bit integers, string-encoded on the wire.
    #[serde(default, deserialize_with = "flex::opt_i64")]
    pub sint64_value: Option<i64>,
    /// Unsigned 64-bit integers, string-encoded on the wire.
    #[serde(default, deserialize_with = "flex::opt_i64")]
    pub uint64_value: Option<i64>,
    /// Timestamps in milliseconds, string-encoded on the wire.
    #[serde(default, deserialize_with = "flex::opt_i64")]
    pub timestamp_value: Option<i64>,
    /// Binary values, base64-encoded on the wire.
    #[serde(default)]
    pub binary_value: Option<String>,
    /// Array element values.
    #[serde(default)]
    pub array_value: Option<Vec<YamcsValue>>,
    /// Aggregate member values, passed through untyped.
    #[serde(default)]
    pub aggregate_value: Option<Value>,
}

impl YamcsValue {
    /// Converts the populated variant into a plain JSON value.
    ///
    /// Non-finite floats and empty unions collapse to null.
    #[must_use]
    pub fn to_json(&self) -> Value {
        if let Some(text) = &self.string_value {
            return Value::String(text.clone());
        }
        if let Some(flag) = self.boolean_value {
            return Value::Bool(flag);
        }
        if let Some(number) = self.double_value.or(self.float_value) {
            return Number::from_f64(number).map_or(Value::Null, Value::Number);
        }
        if let Some(number) = self.sint32_value {
            return Value::Number(Number::from(number));
        }
        if let Some(number) = self.uint32_value {
            return Value::Number(Number::from(number));
        }
        if let Some(number) = self.sint64_value.or(self.uint64_value) {
            return Value::Number(Number::from(number));
        }
        if let Some(millis) = self.timestamp_value {
            return Value::Number(Number::from(millis));
        }
        if let Some(encoded) = &self.binary_value {
            return Value::String(encoded.clone());
        }
        if let Some(elements) = &self.array_value {
            return Value::Array(elements.iter().map(Self::to_json).collect());
        }
        if let Some(aggregate) = &self.aggregate_value {
            return aggregate.clone();
        }
        Value::Null
    }
}

// ============================================================================
// SECTION: Server
// ============================================================================

/// Response payload of the server info endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerInfo {
    /// Yamcs server identifier.
    #[serde(default)]
    pub server_id: Option<String>,
    /// Yamcs release version.
    #[serde(default)]
    pub yamcs_version: Option<String>,
}

/// Response payload of the token endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenResponse {
    /// Bearer token for subsequent requests.
    pub access_token: String,
}

/// Error payload Yamcs attaches to failed requests.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Yamcs exception type, e.g. NotFoundException.
    #[serde(rename = "type", default)]
    pub exception_type: Option<String>,
    /// Human-readable failure message.
    #[serde(default)]
    pub msg: Option<String>,
}

// ============================================================================
// SECTION: Mission Database
// ============================================================================

/// Engineering unit attached to a parameter type.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnitInfo {
    /// Unit symbol, e.g. V or degC.
    #[serde(default)]
    pub unit: Option<String>,
}

/// Parameter type information.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterTypeInfo {
    /// Engineering type, e.g. float or enumeration.
    #[serde(default)]
    pub eng_type: Option<String>,
    /// Engineering units.
    #[serde(default)]
    pub unit_set: Vec<UnitInfo>,
}

impl ParameterTypeInfo {
    /// Joins the unit set into a display string, if any units exist.
    #[must_use]
    pub fn units(&self) -> Option<String> {
        let units: Vec<&str> =
            self.unit_set.iter().filter_map(|unit| unit.unit.as_deref()).collect();
        if units.is_empty() { None } else { Some(units.join(" ")) }
    }
}

/// Mission Database parameter definition.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterInfo {
    /// Short parameter name.
    #[serde(default)]
    pub name: Option<String>,
    /// Fully qualified parameter name.
    #[serde(default)]
    pub qualified_name: Option<String>,
    /// Aliases in other naming namespaces.
    #[serde(default)]
    pub alias: Vec<NamedObjectId>,
    /// Parameter type details.
    #[serde(default, rename = "type")]
    pub parameter_type: Option<ParameterTypeInfo>,
    /// Short description.
    #[serde(default)]
    pub short_description: Option<String>,
    /// Long description.
    #[serde(default)]
    pub long_description: Option<String>,
    /// Data source, e.g. TELEMETERED or DERIVED.
    #[serde(default)]
    pub data_source: Option<String>,
}

/// Response payload of the parameter listing endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListParametersResponse {
    /// Matched parameter definitions.
    #[serde(default)]
    pub parameters: Vec<ParameterInfo>,
}

/// Argument type details for command arguments.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArgumentTypeInfo {
    /// Engineering type, e.g. integer or enumeration.
    #[serde(default)]
    pub eng_type: Option<String>,
    /// Minimum accepted value for numeric arguments.
    #[serde(default)]
    pub range_min: Option<f64>,
    /// Maximum accepted value for numeric arguments.
    #[serde(default)]
    pub range_max: Option<f64>,
}

/// Command argument descriptor.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArgumentInfo {
    /// Argument name.
    #[serde(default)]
    pub name: Option<String>,
    /// Argument description.
    #[serde(default)]
    pub description: Option<String>,
    /// Default value; absence makes the argument required.
    #[serde(default)]
    pub initial_value: Option<String>,
    /// Argument type details.
    #[serde(default, rename = "type")]
    pub argument_type: Option<ArgumentTypeInfo>,
}

/// Operational significance declared for a command.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignificanceInfo {
    /// Consequence level, e.g. NORMAL or CRITICAL.
    #[serde(default)]
    pub consequence_level: Option<String>,
    /// Reason the command carries this level.
    #[serde(default)]
    pub reason_for_warning: Option<String>,
}

/// Mission Database command definition.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandInfo {
    /// Short command name.
    #[serde(default)]
    pub name: Option<String>,
    /// Fully qualified command name.
    #[serde(default)]
    pub qualified_name: Option<String>,
    /// Short description.
    #[serde(default)]
    pub short_description: Option<String>,
    /// True for abstract base commands.
    #[serde(default, rename = "abstract")]
    pub is_abstract: bool,
    /// Operational significance.
    #[serde(default)]
    pub significance: Option<SignificanceInfo>,
    /// Argument descriptors.
    #[serde(default)]
    pub argument: Vec<ArgumentInfo>,
    /// Transmission constraints, passed through untyped.
    #[serde(default)]
    pub constraint: Vec<Value>,
}

/// Response payload of the command listing endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListCommandsResponse {
    /// Matched command definitions.
    #[serde(default)]
    pub commands: Vec<CommandInfo>,
}

/// Mission Database space system definition.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpaceSystemInfo {
    /// Short space system name.
    #[serde(default)]
    pub name: Option<String>,
    /// Fully qualified space system name.
    #[serde(default)]
    pub qualified_name: Option<String>,
    /// Short description.
    #[serde(default)]
    pub short_description: Option<String>,
}

/// Response payload of the space system listing endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListSpaceSystemsResponse {
    /// Space systems defined in the Mission Database.
    #[serde(default)]
    pub space_systems: Vec<SpaceSystemInfo>,
}

// ============================================================================
// SECTION: Processors
// ============================================================================

/// Replay speed descriptor.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplaySpeedInfo {
    /// Speed type, e.g. REALTIME or FIXED_DELAY.
    #[serde(default, rename = "type")]
    pub speed_type: Option<String>,
    /// Speed multiplier or delay parameter.
    #[serde(default)]
    pub param: Option<f64>,
}

/// Replay request attached to replay processors.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplayRequestInfo {
    /// Replay range start.
    #[serde(default)]
    pub start: Option<String>,
    /// Replay range stop.
    #[serde(default)]
    pub stop: Option<String>,
    /// Replay speed.
    #[serde(default)]
    pub speed: Option<ReplaySpeedInfo>,
}

/// Processor state reported by Yamcs.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessorInfo {
    /// Owning instance.
    #[serde(default)]
    pub instance: Option<String>,
    /// Processor name.
    #[serde(default)]
    pub name: Option<String>,
    /// Processor type, e.g. realtime or Archive.
    #[serde(default, rename = "type")]
    pub processor_type: Option<String>,
    /// User that created the processor.
    #[serde(default)]
    pub creator: Option<String>,
    /// Processor state, e.g. RUNNING.
    #[serde(default)]
    pub state: Option<String>,
    /// Current mission time.
    #[serde(default)]
    pub time: Option<String>,
    /// True when the processor survives client disconnects.
    #[serde(default)]
    pub persistent: bool,
    /// True when Yamcs refuses to delete the processor.
    #[serde(default)]
    pub protected: bool,
    /// True for replay processors.
    #[serde(default)]
    pub replay: bool,
    /// Replay state, e.g. RUNNING or PAUSED, for replay processors.
    #[serde(default)]
    pub replay_state: Option<String>,
    /// Replay details for replay processors.
    #[serde(default)]
    pub replay_request: Option<ReplayRequestInfo>,
}

/// Response payload of the processor listing endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListProcessorsResponse {
    /// Processors running in the instance.
    #[serde(default)]
    pub processors: Vec<ProcessorInfo>,
}

/// Service state reported by Yamcs.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceInfo {
    /// Service name.
    #[serde(default)]
    pub name: Option<String>,
    /// Service state, e.g. RUNNING.
    #[serde(default)]
    pub state: Option<String>,
}

/// Response payload of the service listing endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListServicesResponse {
    /// Services configured on the instance.
    #[serde(default)]
    pub services: Vec<ServiceInfo>,
}

// ============================================================================
// SECTION: Links
// ============================================================================

/// Data link state reported by Yamcs.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkInfo {
    /// Link name.
    #[serde(default)]
    pub name: Option<String>,
    /// Link implementation class.
    #[serde(default, rename = "type")]
    pub link_type: Option<String>,
    /// Observed status, e.g. OK or FAILED.
    #[serde(default)]
    pub status: Option<String>,
    /// True when an operator disabled the link.
    #[serde(default)]
    pub disabled: bool,
    /// Parent link for aggregated links.
    #[serde(default)]
    pub parent_name: Option<String>,
    /// Frames or packets received, int64 on the wire.
    #[serde(default, deserialize_with = "flex::opt_i64")]
    pub data_in_count: Option<i64>,
    /// Frames or packets sent, int64 on the wire.
    #[serde(default, deserialize_with = "flex::opt_i64")]
    pub data_out_count: Option<i64>,
    /// Detailed status text from the link.
    #[serde(default)]
    pub detailed_status: Option<String>,
    /// Link-type specific fields, passed through untyped.
    #[serde(default)]
    pub extra: Option<Value>,
    /// Custom actions the link exposes.
    #[serde(default)]
    pub actions: Vec<Value>,
}

/// Response payload of the link listing endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListLinksResponse {
    /// Data links registered on the instance.
    #[serde(default)]
    pub links: Vec<LinkInfo>,
}

// ============================================================================
// SECTION: Storage
// ============================================================================

/// Bucket metadata reported by Yamcs.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BucketInfo {
    /// Bucket name.
    #[serde(default)]
    pub name: Option<String>,
    /// Total stored bytes, int64 on the wire.
    #[serde(default, deserialize_with = "flex::opt_i64")]
    pub size: Option<i64>,
    /// Number of stored objects, int64 on the wire.
    #[serde(default, deserialize_with = "flex::opt_i64")]
    pub num_objects: Option<i64>,
    /// Bucket creation time.
    #[serde(default)]
    pub created: Option<String>,
}

/// Response payload of the bucket listing endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListBucketsResponse {
    /// Buckets available on the instance.
    #[serde(default)]
    pub buckets: Vec<BucketInfo>,
}

/// Stored object metadata.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectInfo {
    /// Object name.
    #[serde(default)]
    pub name: Option<String>,
    /// Object creation time.
    #[serde(default)]
    pub created: Option<String>,
    /// Object size in bytes, int64 on the wire.
    #[serde(default, deserialize_with = "flex::opt_i64")]
    pub size: Option<i64>,
    /// User metadata attached to the object.
    #[serde(default)]
    pub metadata: Option<BTreeMap<String, String>>,
}

/// Response payload of the object listing endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListObjectsResponse {
    /// Objects matching the listing request.
    #[serde(default)]
    pub objects: Vec<ObjectInfo>,
}

// ============================================================================
// SECTION: Instances
// ============================================================================

/// Mission database identification attached to an instance.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MissionDatabaseInfo {
    /// Mission database name.
    #[serde(default)]
    pub name: Option<String>,
    /// Mission database version.
    #[serde(default)]
    pub version: Option<String>,
}

/// Yamcs instance state.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstanceInfo {
    /// Instance name.
    #[serde(default)]
    pub name: Option<String>,
    /// Instance state, e.g. RUNNING or OFFLINE.
    #[serde(default)]
    pub state: Option<String>,
    /// Current mission time.
    #[serde(default)]
    pub mission_time: Option<String>,
    /// Labels attached to the instance.
    #[serde(default)]
    pub labels: Option<BTreeMap<String, String>>,
    /// Capabilities the instance advertises.
    #[serde(default)]
    pub capabilities: Vec<String>,
    /// Template the instance was created from.
    #[serde(default)]
    pub template: Option<String>,
    /// Arguments the template was instantiated with.
    #[serde(default)]
    pub template_args: Option<Value>,
    /// Failure description for FAILED instances.
    #[serde(default)]
    pub failure_cause: Option<String>,
    /// Processors running in the instance.
    #[serde(default)]
    pub processors: Vec<ProcessorInfo>,
    /// Mission database identification.
    #[serde(default)]
    pub mission_database: Option<MissionDatabaseInfo>,
}

/// Response payload of the instance listing endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListInstancesResponse {
    /// Known Yamcs instances.
    #[serde(default)]
    pub instances: Vec<InstanceInfo>,
}

// ============================================================================
// SECTION: Alarms
// ============================================================================

/// Acknowledgment details attached to an alarm.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AcknowledgeInfo {
    /// Operator that acknowledged the alarm.
    #[serde(default)]
    pub acknowledged_by: Option<String>,
    /// Acknowledgment time.
    #[serde(default)]
    pub acknowledge_time: Option<String>,
    /// Acknowledgment comment.
    #[serde(default)]
    pub acknowledge_message: Option<String>,
}

/// Shelving details attached to an alarm.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShelveInfo {
    /// Operator that shelved the alarm.
    #[serde(default)]
    pub shelved_by: Option<String>,
    /// Shelve time.
    #[serde(default)]
    pub shelve_time: Option<String>,
}

/// Alarm state reported by Yamcs.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlarmData {
    /// Triggering parameter or event identifier.
    #[serde(default)]
    pub id: Option<NamedObjectId>,
    /// Activation sequence number.
    #[serde(default)]
    pub seq_num: u32,
    /// Time the alarm triggered.
    #[serde(default)]
    pub trigger_time: Option<String>,
    /// Time of the last state change.
    #[serde(default)]
    pub update_time: Option<String>,
    /// Alarm severity, e.g. WARNING or CRITICAL.
    #[serde(default)]
    pub severity: Option<String>,
    /// Samples that violated the alarm condition.
    #[serde(default)]
    pub violations: u32,
    /// Samples evaluated since the alarm triggered.
    #[serde(default)]
    pub count: u32,
    /// True once an operator acknowledged the alarm.
    #[serde(default)]
    pub acknowledged: bool,
    /// True when the triggering condition has returned to normal.
    #[serde(default, rename = "processOK")]
    pub process_ok: bool,
    /// True when the alarm latches until cleared.
    #[serde(default)]
    pub latching: bool,
    /// Acknowledgment details, when acknowledged.
    #[serde(default)]
    pub acknowledge_info: Option<AcknowledgeInfo>,
    /// Shelving details, when shelved.
    #[serde(default)]
    pub shelve_info: Option<ShelveInfo>,
}

impl AlarmData {
    /// Returns the fully qualified alarm name.
    #[must_use]
    pub fn qualified_name(&self) -> String {
        self.id.as_ref().map(NamedObjectId::qualified_name).unwrap_or_default()
    }

    /// Returns true while the alarm is shelved.
    #[must_use]
    pub const fn is_shelved(&self) -> bool {
        self.shelve_info.is_some()
    }

    /// Returns true once the alarm has been acknowledged.
    #[must_use]
    pub const fn is_acknowledged(&self) -> bool {
        self.acknowledged || self.acknowledge_info.is_some()
    }
}

/// Response payload of the alarm listing endpoints.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListAlarmsResponse {
    /// Alarms matching the listing request.
    #[serde(default)]
    pub alarms: Vec<AlarmData>,
}

// ============================================================================
// SECTION: Commanding
// ============================================================================

/// Response payload of the command issue endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueCommandResponse {
    /// Yamcs command identifier.
    #[serde(default)]
    pub id: Option<String>,
    /// Command generation time.
    #[serde(default)]
    pub generation_time: Option<String>,
    /// Origin recorded in command history.
    #[serde(default)]
    pub origin: Option<String>,
    /// Sequence number assigned to the command.
    #[serde(default)]
    pub sequence_number: Option<i32>,
    /// Fully qualified command name.
    #[serde(default)]
    pub command_name: Option<String>,
    /// Encoded command bytes, base64 on the wire.
    #[serde(default)]
    pub binary: Option<String>,
    /// Queue that accepted the command.
    #[serde(default)]
    pub queue: Option<String>,
    /// Significance of the issued command.
    #[serde(default)]
    pub significance: Option<SignificanceInfo>,
}

/// Single attribute of a command history entry.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandHistoryAttribute {
    /// Attribute name, e.g. username or Acknowledge_Sent_Status.
    #[serde(default)]
    pub name: Option<String>,
    /// Attribute value.
    #[serde(default)]
    pub value: Option<YamcsValue>,
}

/// Command history entry from the archive.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandHistoryEntry {
    /// Yamcs command identifier.
    #[serde(default)]
    pub id: Option<String>,
    /// Fully qualified command name.
    #[serde(default)]
    pub command_name: Option<String>,
    /// Command generation time.
    #[serde(default)]
    pub generation_time: Option<String>,
    /// Origin recorded in command history.
    #[serde(default)]
    pub origin: Option<String>,
    /// Sequence number of the command.
    #[serde(default)]
    pub sequence_number: Option<i32>,
    /// History attributes such as username, queue, and acknowledgments.
    #[serde(default)]
    pub attr: Vec<CommandHistoryAttribute>,
}

impl CommandHistoryEntry {
    /// Looks up a history attribute by name and converts it to JSON.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<Value> {
        self.attr
            .iter()
            .find(|attribute| attribute.name.as_deref() == Some(name))
            .and_then(|attribute| attribute.value.as_ref())
            .map(YamcsValue::to_json)
    }
}

/// Response payload of the command history endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListCommandHistoryResponse {
    /// Command history entries, newest first.
    #[serde(default)]
    pub commands: Vec<CommandHistoryEntry>,
}

// ============================================================================
// SECTION: Archive
// ============================================================================

/// Archived telemetry packet metadata.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PacketData {
    /// Packet identifier.
    #[serde(default)]
    pub id: Option<NamedObjectId>,
    /// Packet payload, base64 on the wire.
    #[serde(default)]
    pub packet: Option<String>,
    /// Packet sequence number.
    #[serde(default)]
    pub sequence_number: Option<i32>,
    /// Packet generation time.
    #[serde(default)]
    pub generation_time: Option<String>,
    /// Ground reception time.
    #[serde(default)]
    pub reception_time: Option<String>,
    /// Packet size in bytes, int64 on the wire.
    #[serde(default, deserialize_with = "flex::opt_i64")]
    pub size: Option<i64>,
}

/// Response payload of the packet listing endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListPacketsResponse {
    /// Packets matching the listing request.
    #[serde(default)]
    pub packets: Vec<PacketData>,
}

/// Archived parameter value sample.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterValueInfo {
    /// Parameter identifier.
    #[serde(default)]
    pub id: Option<NamedObjectId>,
    /// Raw value before calibration.
    #[serde(default)]
    pub raw_value: Option<YamcsValue>,
    /// Engineering value after calibration.
    #[serde(default)]
    pub eng_value: Option<YamcsValue>,
    /// Generation time of the sample.
    #[serde(default)]
    pub generation_time: Option<String>,
    /// Monitoring result, e.g. IN_LIMITS or CRITICAL.
    #[serde(default)]
    pub monitoring_result: Option<String>,
}

/// Response payload of the parameter history endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListParameterHistoryResponse {
    /// Value samples, newest first.
    #[serde(default)]
    pub parameter: Vec<ParameterValueInfo>,
}

/// Archived event record.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventInfo {
    /// Component that emitted the event.
    #[serde(default)]
    pub source: Option<String>,
    /// Event generation time.
    #[serde(default)]
    pub generation_time: Option<String>,
    /// Event type label.
    #[serde(default, rename = "type")]
    pub event_type: Option<String>,
    /// Event message text.
    #[serde(default)]
    pub message: Option<String>,
    /// Event severity.
    #[serde(default)]
    pub severity: Option<String>,
}

/// Response payload of the event listing endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListEventsResponse {
    /// Events matching the listing request.
    #[serde(default)]
    pub events: Vec<EventInfo>,
}

#[cfg(test)]
mod tests;
