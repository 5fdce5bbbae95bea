// crates/yamcs-mcp/src/subsystems/storage.rs
// ============================================================================
// Module: Storage Subsystem
// Description: Bucket and object storage management.
// Purpose: Browse buckets, inspect objects, and manage their lifecycle.
// Dependencies: yamcs-client, yamcs-contract
// ============================================================================

//! ## Overview
//! Yamcs buckets hold payload files, displays, and other mission artifacts.
//! Object listings are truncated client-side because the bucket API returns
//! the full listing; description works the same way, filtering the listing by
//! the object name. Deleting an object and creating a bucket are the two
//! mutating operations.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;

use serde::Deserialize;
use serde_json::Value;
use serde_json::json;
use yamcs_client::YamcsError;
use yamcs_client::types::BucketInfo;
use yamcs_contract::ResourceName;
use yamcs_contract::ToolName;

use crate::envelope::ErrorEnvelope;
use crate::projection;
use crate::registry::RegistryError;
use crate::registry::ResourceRegistry;
use crate::registry::SessionContext;
use crate::registry::ToolRegistry;
use crate::subsystems::acquire;
use crate::subsystems::bind_resource;
use crate::subsystems::bind_tool;
use crate::subsystems::decode;
use crate::subsystems::normalize_limit;
use crate::subsystems::yamcs_failure;

// ============================================================================
// SECTION: Registration
// ============================================================================

/// Registers the storage tools and resources.
///
/// # Errors
///
/// Returns [`RegistryError`] when a tool or resource is already registered.
pub fn register(
    tools: &mut ToolRegistry,
    resources: &mut ResourceRegistry,
    context: &Arc<SessionContext>,
) -> Result<(), RegistryError> {
    bind_tool(tools, context, ToolName::StorageListBuckets, list_buckets)?;
    bind_tool(tools, context, ToolName::StorageListObjects, list_objects)?;
    bind_tool(tools, context, ToolName::StorageDescribeObject, describe_object)?;
    bind_tool(tools, context, ToolName::StorageDeleteObject, delete_object)?;
    bind_tool(tools, context, ToolName::StorageCreateBucket, create_bucket)?;
    bind_resource(resources, context, ResourceName::StorageOverview, overview)?;
    Ok(())
}

// ============================================================================
// SECTION: Requests
// ============================================================================

/// Arguments for `storage_list_buckets`.
#[derive(Debug, Deserialize)]
struct ListBucketsRequest {
    /// Instance override.
    #[serde(default)]
    instance: Option<String>,
}

/// Arguments for `storage_list_objects`.
#[derive(Debug, Deserialize)]
struct ListObjectsRequest {
    /// Bucket name.
    bucket: String,
    /// Object name prefix filter.
    #[serde(default)]
    prefix: Option<String>,
    /// Page size.
    #[serde(default)]
    limit: Option<u32>,
    /// Instance override.
    #[serde(default)]
    instance: Option<String>,
}

/// Arguments for tools that target one object.
#[derive(Debug, Deserialize)]
struct ObjectRequest {
    /// Bucket name.
    bucket: String,
    /// Object name.
    object: String,
    /// Instance override.
    #[serde(default)]
    instance: Option<String>,
}

/// Arguments for `storage_create_bucket`.
#[derive(Debug, Deserialize)]
struct CreateBucketRequest {
    /// Bucket name to create.
    name: String,
    /// Instance override.
    #[serde(default)]
    instance: Option<String>,
}

// ============================================================================
// SECTION: Tool Handlers
// ============================================================================

/// Lists buckets on an instance.
async fn list_buckets(
    context: Arc<SessionContext>,
    payload: Value,
) -> Result<Value, ErrorEnvelope> {
    const TOOL: ToolName = ToolName::StorageListBuckets;
    let request: ListBucketsRequest = decode(TOOL, payload)?;
    let client = acquire(TOOL, &context).await?;
    let instance = context.instance(request.instance.as_deref());
    let buckets = client.list_buckets(instance).await.map_err(yamcs_failure(TOOL))?;
    let entries: Vec<Value> = buckets.iter().map(projection::bucket_summary).collect();
    Ok(json!({
        "instance": instance,
        "count": entries.len(),
        "buckets": entries,
    }))
}

/// Lists objects in a bucket, truncated to the requested limit.
async fn list_objects(
    context: Arc<SessionContext>,
    payload: Value,
) -> Result<Value, ErrorEnvelope> {
    const TOOL: ToolName = ToolName::StorageListObjects;
    let request: ListObjectsRequest = decode(TOOL, payload)?;
    let limit = normalize_limit(TOOL, request.limit)?;
    let client = acquire(TOOL, &context).await?;
    let instance = context.instance(request.instance.as_deref());
    let mut objects = client
        .list_objects(instance, &request.bucket, request.prefix.as_deref())
        .await
        .map_err(yamcs_failure(TOOL))?;
    objects.truncate(usize::try_from(limit).unwrap_or(usize::MAX));
    let entries: Vec<Value> = objects.iter().map(projection::object_summary).collect();
    Ok(json!({
        "bucket": request.bucket,
        "instance": instance,
        "count": entries.len(),
        "objects": entries,
    }))
}

/// Describes one object by exact name.
async fn describe_object(
    context: Arc<SessionContext>,
    payload: Value,
) -> Result<Value, ErrorEnvelope> {
    const TOOL: ToolName = ToolName::StorageDescribeObject;
    let request: ObjectRequest = decode(TOOL, payload)?;
    let client = acquire(TOOL, &context).await?;
    let instance = context.instance(request.instance.as_deref());
    let objects = client
        .list_objects(instance, &request.bucket, Some(&request.object))
        .await
        .map_err(yamcs_failure(TOOL))?;
    let found = objects
        .iter()
        .find(|object| object.name.as_deref() == Some(request.object.as_str()));
    match found {
        Some(object) => Ok(projection::object_detail(object, &request.bucket)),
        None => Err(ErrorEnvelope::not_found(
            TOOL.as_str(),
            format!("Object '{}' not found in bucket '{}'", request.object, request.bucket),
        )),
    }
}

/// Deletes one object.
async fn delete_object(
    context: Arc<SessionContext>,
    payload: Value,
) -> Result<Value, ErrorEnvelope> {
    const TOOL: ToolName = ToolName::StorageDeleteObject;
    let request: ObjectRequest = decode(TOOL, payload)?;
    let client = acquire(TOOL, &context).await?;
    let instance = context.instance(request.instance.as_deref());
    client
        .delete_object(instance, &request.bucket, &request.object)
        .await
        .map_err(yamcs_failure(TOOL))?;
    Ok(json!({
        "success": true,
        "bucket": request.bucket,
        "object": request.object,
        "message": format!("Object '{}' deleted from bucket '{}'", request.object, request.bucket),
    }))
}

/// Creates a bucket.
async fn create_bucket(
    context: Arc<SessionContext>,
    payload: Value,
) -> Result<Value, ErrorEnvelope> {
    const TOOL: ToolName = ToolName::StorageCreateBucket;
    let request: CreateBucketRequest = decode(TOOL, payload)?;
    let client = acquire(TOOL, &context).await?;
    let instance = context.instance(request.instance.as_deref());
    let bucket = client.create_bucket(instance, &request.name).await.map_err(yamcs_failure(TOOL))?;
    Ok(json!({
        "success": true,
        "bucket": {
            "name": bucket.name.as_deref().unwrap_or(request.name.as_str()),
            "created": bucket.created,
        },
        "message": format!("Bucket '{}' created successfully", request.name),
    }))
}

// ============================================================================
// SECTION: Resources
// ============================================================================

/// Renders per-bucket usage for the default instance.
async fn overview(context: Arc<SessionContext>) -> Result<String, YamcsError> {
    let client = context.sessions.acquire().await?;
    let buckets = client.list_buckets(&context.default_instance).await?;
    Ok(render_overview(&context.default_instance, &buckets))
}

/// Renders the bucket usage text.
fn render_overview(instance: &str, buckets: &[BucketInfo]) -> String {
    let mut lines = vec![format!("Storage Overview for {instance}:")];
    let mut total_size: i64 = 0;
    let mut total_objects: i64 = 0;
    for bucket in buckets {
        let name = bucket.name.as_deref().unwrap_or_default();
        let size = bucket.size.unwrap_or(0);
        let count = bucket.num_objects.unwrap_or(0);
        total_size += size;
        total_objects += count;
        lines.push(format!("  - {name}: {count} objects ({:.1} MB)", megabytes(size)));
    }
    lines.push(String::new());
    lines.push(format!("Total: {total_objects} objects ({:.1} MB)", megabytes(total_size)));
    lines.join("\n")
}

/// Converts a byte count to megabytes for display.
#[allow(clippy::cast_precision_loss, reason = "Display-only conversion of bucket sizes.")]
fn megabytes(bytes: i64) -> f64 {
    bytes as f64 / (1024.0 * 1024.0)
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

    #[test]
    fn overview_totals_follow_bucket_counters() {
        let buckets = vec![
            BucketInfo {
                name: Some("displays".to_string()),
                size: Some(5 * 1024 * 1024),
                num_objects: Some(12),
                ..BucketInfo::default()
            },
            BucketInfo {
                name: Some("cfdp".to_string()),
                size: Some(1_572_864),
                num_objects: Some(3),
                ..BucketInfo::default()
            },
        ];
        let text = render_overview("simulator", &buckets);
        let expected = "Storage Overview for simulator:\n  \
                        - displays: 12 objects (5.0 MB)\n  \
                        - cfdp: 3 objects (1.5 MB)\n\
                        \n\
                        Total: 15 objects (6.5 MB)";
        assert_eq!(text, expected);
    }

    #[test]
    fn overview_handles_an_empty_instance() {
        let text = render_overview("simulator", &[]);
        assert_eq!(text, "Storage Overview for simulator:\n\nTotal: 0 objects (0.0 MB)");
    }

    #[test]
    fn object_requests_require_bucket_and_object() {
        assert!(serde_json::from_value::<ObjectRequest>(json!({ "bucket": "displays" })).is_err());
        let request: ObjectRequest =
            serde_json::from_value(json!({ "bucket": "displays", "object": "ops.par" })).unwrap();
        assert_eq!(request.object, "ops.par");
    }
}
