// crates/yamcs-mcp/tests/config_validation.rs
// ============================================================================
// Module: Configuration Loading Tests
// Description: Tests for config file loading, limits, and validation.
// Purpose: Verify the bridge refuses unusable configuration at startup.
// Dependencies: tempfile, yamcs-mcp
// ============================================================================

//! ## Overview
//! Exercises [`YamcsMcpConfig::load`] against real files: value merging,
//! size and encoding limits, and the validation rules that make a config
//! fatal before any transport starts. In-memory validation rules are covered
//! by the unit tests next to the config module; everything here goes through
//! the file path.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

use std::path::Path;
use std::path::PathBuf;

use tempfile::TempDir;
use yamcs_mcp::YamcsMcpConfig;
use yamcs_mcp::config::AuditMode;
use yamcs_mcp::config::ServerTransport;

/// Writes `content` to a fresh config file and returns its path.
fn write_config(dir: &TempDir, content: &str) -> PathBuf {
    let path = dir.path().join("yamcs-mcp.toml");
    std::fs::write(&path, content.as_bytes()).unwrap();
    path
}

// ============================================================================
// SECTION: Load and Merge Tests
// ============================================================================

/// Verifies a complete config file loads with every section applied.
#[test]
fn load_accepts_a_complete_config_file() {
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        r#"
[yamcs]
url = "http://yamcs.example.com:8090"
instance = "ops"
username = "operator"
password = "secret"
timeout_secs = 45

[server]
name = "ops-bridge"
transport = "http"
bind = "127.0.0.1:8091"
max_body_bytes = 65536

[subsystems]
commands = false

[audit]
mode = "off"
"#,
    );
    let config = YamcsMcpConfig::load(Some(&path)).unwrap();
    assert_eq!(config.yamcs.url, "http://yamcs.example.com:8090");
    assert_eq!(config.yamcs.instance, "ops");
    assert_eq!(config.yamcs.username.as_deref(), Some("operator"));
    assert_eq!(config.yamcs.timeout_secs, 45);
    assert_eq!(config.server.name, "ops-bridge");
    assert_eq!(config.server.transport, ServerTransport::Http);
    assert_eq!(config.server.max_body_bytes, 65536);
    assert!(!config.subsystems.commands);
    assert!(config.subsystems.mdb, "unset subsystem flags stay on");
    assert_eq!(config.audit.mode, AuditMode::Off);
}

/// Verifies an explicit path must exist.
#[test]
fn load_rejects_a_missing_explicit_path() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("does-not-exist.toml");
    let err = YamcsMcpConfig::load(Some(&path)).unwrap_err();
    assert!(err.to_string().contains("config io error"), "got: {err}");
}

/// Verifies TOML syntax errors are reported as parse failures.
#[test]
fn load_rejects_invalid_toml_syntax() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "not = [toml");
    let err = YamcsMcpConfig::load(Some(&path)).unwrap_err();
    assert!(err.to_string().contains("parse error"), "got: {err}");
}

/// Verifies oversized config files are rejected before parsing.
#[test]
fn load_rejects_files_over_the_size_limit() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("yamcs-mcp.toml");
    std::fs::write(&path, vec![b' '; 1024 * 1024 + 1]).unwrap();
    let err = YamcsMcpConfig::load(Some(path.as_path())).unwrap_err();
    assert!(err.to_string().contains("size limit"), "got: {err}");
}

/// Verifies non-UTF-8 config files are rejected.
#[test]
fn load_rejects_non_utf8_files() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("yamcs-mcp.toml");
    std::fs::write(&path, [0xFF, 0xFE, 0x00, 0x41]).unwrap();
    let err = YamcsMcpConfig::load(Some(path.as_path())).unwrap_err();
    assert!(err.to_string().contains("utf-8"), "got: {err}");
}

// ============================================================================
// SECTION: Validation Through Load Tests
// ============================================================================

/// Verifies a non-HTTP Yamcs URL in the file fails validation.
#[test]
fn load_rejects_invalid_yamcs_url_scheme() {
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        r#"
[yamcs]
url = "ftp://yamcs.example.com"
"#,
    );
    let err = YamcsMcpConfig::load(Some(&path)).unwrap_err();
    assert!(err.to_string().contains("http or https"), "got: {err}");
}

/// Verifies the HTTP transport cannot start without a bind address.
#[test]
fn load_rejects_http_transport_without_bind() {
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        r#"
[server]
transport = "http"
"#,
    );
    let err = YamcsMcpConfig::load(Some(&path)).unwrap_err();
    assert!(err.to_string().contains("requires bind"), "got: {err}");
}

/// Verifies unknown transport names fail at parse time.
#[test]
fn load_rejects_unknown_transport_values() {
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        r#"
[server]
transport = "pigeon"
"#,
    );
    let err = YamcsMcpConfig::load(Some(&path)).unwrap_err();
    assert!(err.to_string().contains("parse error"), "got: {err}");
}

/// Verifies the file audit sink cannot be selected without a path.
#[test]
fn load_rejects_file_audit_without_path() {
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        r#"
[audit]
mode = "file"
"#,
    );
    let err = YamcsMcpConfig::load(Some(&path)).unwrap_err();
    assert!(err.to_string().contains("audit.path"), "got: {err}");
}

/// Verifies credentials must be configured as a pair.
#[test]
fn load_rejects_username_without_password() {
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        r#"
[yamcs]
username = "operator"
"#,
    );
    let err = YamcsMcpConfig::load(Some(&path)).unwrap_err();
    assert!(err.to_string().contains("together"), "got: {err}");
}

/// Verifies path component length limits apply to explicit paths.
#[test]
fn load_rejects_path_components_over_the_limit() {
    let component = "x".repeat(300);
    let path = Path::new(&component).join("yamcs-mcp.toml");
    let err = YamcsMcpConfig::load(Some(&path)).unwrap_err();
    assert!(err.to_string().contains("component too long"), "got: {err}");
}
