// crates/yamcs-mcp/src/config.rs
// ============================================================================
// Module: Bridge Configuration
// Description: Configuration loading and validation for the Yamcs MCP bridge.
// Purpose: Provide strict config parsing with env overrides and hard limits.
// Dependencies: serde, thiserror, toml, url, yamcs-client, yamcs-contract
// ============================================================================

//! ## Overview
//! Configuration is loaded from a TOML file (an explicit `--config` path, the
//! `YAMCS_MCP_CONFIG` environment variable, or `yamcs-mcp.toml` in the working
//! directory), then environment overrides are applied, then the merged result
//! is validated. Validation failures are fatal at startup; an unreachable
//! Yamcs is not. A missing file is an error only when the path was requested
//! explicitly, so the bridge can run from environment variables alone.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::env;
use std::fs;
use std::net::SocketAddr;
use std::path::Path;
use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;
use url::Url;
use yamcs_client::ClientConfig;
use yamcs_contract::Subsystem;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default configuration filename when no path is specified.
const DEFAULT_CONFIG_NAME: &str = "yamcs-mcp.toml";
/// Environment variable used to override the config path.
pub(crate) const CONFIG_ENV_VAR: &str = "YAMCS_MCP_CONFIG";
/// Maximum configuration file size in bytes.
pub(crate) const MAX_CONFIG_FILE_SIZE: usize = 1024 * 1024;
/// Maximum length of a single path component.
pub(crate) const MAX_PATH_COMPONENT_LENGTH: usize = 255;
/// Maximum total path length.
pub(crate) const MAX_TOTAL_PATH_LENGTH: usize = 4096;
/// Minimum accepted Yamcs request timeout in seconds.
pub(crate) const MIN_TIMEOUT_SECS: u64 = 1;
/// Maximum accepted Yamcs request timeout in seconds.
pub(crate) const MAX_TIMEOUT_SECS: u64 = 300;
/// Lowest port accepted for HTTP/SSE binds.
pub(crate) const MIN_UNPRIVILEGED_PORT: u16 = 1024;

// ============================================================================
// SECTION: Configuration Types
// ============================================================================

/// Yamcs MCP bridge configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct YamcsMcpConfig {
    /// Yamcs connection configuration.
    #[serde(default)]
    pub yamcs: YamcsConfig,
    /// MCP server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Per-subsystem enable flags.
    #[serde(default)]
    pub subsystems: SubsystemsConfig,
    /// Audit logging configuration.
    #[serde(default)]
    pub audit: AuditConfig,
}

impl YamcsMcpConfig {
    /// Loads configuration from disk using the default resolution rules,
    /// applies environment overrides, and validates the result.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when loading or validation fails.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let (resolved, explicit) = resolve_path(path)?;
        validate_path(&resolved)?;
        let mut config = if explicit || resolved.exists() {
            let bytes = fs::read(&resolved).map_err(|err| ConfigError::Io(err.to_string()))?;
            if bytes.len() > MAX_CONFIG_FILE_SIZE {
                return Err(ConfigError::Invalid("config file exceeds size limit".to_string()));
            }
            let content = std::str::from_utf8(&bytes)
                .map_err(|_| ConfigError::Invalid("config file must be utf-8".to_string()))?;
            toml::from_str::<Self>(content).map_err(|err| ConfigError::Parse(err.to_string()))?
        } else {
            Self::default()
        };
        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Applies environment overrides on top of the file values.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when an override does not parse.
    pub fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Ok(url) = env::var("YAMCS_URL") {
            self.yamcs.url = url;
        }
        if let Ok(instance) = env::var("YAMCS_INSTANCE") {
            self.yamcs.instance = instance;
        }
        if let Ok(username) = env::var("YAMCS_USERNAME") {
            self.yamcs.username = Some(username);
        }
        if let Ok(password) = env::var("YAMCS_PASSWORD") {
            self.yamcs.password = Some(password);
        }
        if let Ok(timeout) = env::var("YAMCS_TIMEOUT_SECS") {
            self.yamcs.timeout_secs = timeout.trim().parse().map_err(|_| {
                ConfigError::Invalid(
                    "YAMCS_TIMEOUT_SECS must be a whole number of seconds".to_string(),
                )
            })?;
        }
        if let Ok(transport) = env::var("YAMCS_MCP_TRANSPORT") {
            self.server.transport = transport.parse()?;
        }
        Ok(())
    }

    /// Validates the configuration for internal consistency.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when configuration is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.yamcs.validate()?;
        self.server.validate()?;
        self.audit.validate()?;
        Ok(())
    }
}

/// Yamcs connection configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct YamcsConfig {
    /// Yamcs HTTP base URL.
    #[serde(default = "default_yamcs_url")]
    pub url: String,
    /// Instance used when a tool call does not name one.
    #[serde(default = "default_yamcs_instance")]
    pub instance: String,
    /// Username for the password grant, when Yamcs requires login.
    #[serde(default)]
    pub username: Option<String>,
    /// Password for the password grant.
    #[serde(default)]
    pub password: Option<String>,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for YamcsConfig {
    fn default() -> Self {
        Self {
            url: default_yamcs_url(),
            instance: default_yamcs_instance(),
            username: None,
            password: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl YamcsConfig {
    /// Validates Yamcs connection settings.
    fn validate(&self) -> Result<(), ConfigError> {
        let url = self.url.trim();
        if url.is_empty() {
            return Err(ConfigError::Invalid("yamcs.url must be non-empty".to_string()));
        }
        let parsed =
            Url::parse(url).map_err(|_| ConfigError::Invalid(format!("invalid yamcs.url: {url}")))?;
        match parsed.scheme() {
            "http" | "https" => {}
            scheme => {
                return Err(ConfigError::Invalid(format!(
                    "yamcs.url must use http or https, got {scheme}"
                )));
            }
        }
        if self.instance.trim().is_empty() {
            return Err(ConfigError::Invalid("yamcs.instance must be non-empty".to_string()));
        }
        match (&self.username, &self.password) {
            (Some(username), Some(_)) => {
                if username.trim().is_empty() {
                    return Err(ConfigError::Invalid(
                        "yamcs.username must be non-empty".to_string(),
                    ));
                }
            }
            (None, None) => {}
            _ => {
                return Err(ConfigError::Invalid(
                    "yamcs.username and yamcs.password must be set together".to_string(),
                ));
            }
        }
        if self.timeout_secs < MIN_TIMEOUT_SECS || self.timeout_secs > MAX_TIMEOUT_SECS {
            return Err(ConfigError::Invalid(format!(
                "yamcs.timeout_secs must be within {MIN_TIMEOUT_SECS}..={MAX_TIMEOUT_SECS}"
            )));
        }
        Ok(())
    }

    /// Builds the outbound client settings from this section.
    #[must_use]
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            url: self.url.trim().to_string(),
            instance: self.instance.clone(),
            username: self.username.clone(),
            password: self.password.clone(),
            timeout: Duration::from_secs(self.timeout_secs),
        }
    }
}

/// Server configuration for MCP transports.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Server name advertised during the MCP handshake.
    #[serde(default = "default_server_name")]
    pub name: String,
    /// Transport type for MCP.
    #[serde(default)]
    pub transport: ServerTransport,
    /// Bind address for HTTP or SSE transports.
    #[serde(default)]
    pub bind: Option<String>,
    /// Maximum request body size in bytes.
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            name: default_server_name(),
            transport: ServerTransport::Stdio,
            bind: None,
            max_body_bytes: default_max_body_bytes(),
        }
    }
}

impl ServerConfig {
    /// Validates server transport configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.name.trim().is_empty() {
            return Err(ConfigError::Invalid("server.name must be non-empty".to_string()));
        }
        if self.max_body_bytes == 0 {
            return Err(ConfigError::Invalid(
                "max_body_bytes must be greater than zero".to_string(),
            ));
        }
        match self.transport {
            ServerTransport::Http | ServerTransport::Sse => {
                let addr = self.bind_addr()?;
                if addr.port() < MIN_UNPRIVILEGED_PORT {
                    return Err(ConfigError::Invalid(format!(
                        "bind port must be {MIN_UNPRIVILEGED_PORT} or higher"
                    )));
                }
            }
            ServerTransport::Stdio => {}
        }
        Ok(())
    }

    /// Returns the parsed bind address for HTTP/SSE transports.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when the bind address is missing or
    /// does not parse as a socket address.
    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        let bind = self.bind.as_deref().unwrap_or_default().trim();
        if bind.is_empty() {
            return Err(ConfigError::Invalid(
                "http/sse transport requires bind address".to_string(),
            ));
        }
        bind.parse().map_err(|_| ConfigError::Invalid("invalid bind address".to_string()))
    }
}

/// Transport types for the MCP server.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum ServerTransport {
    /// Use stdin/stdout transport.
    #[default]
    Stdio,
    /// Use HTTP JSON-RPC transport.
    Http,
    /// Use SSE transport for responses.
    Sse,
}

impl ServerTransport {
    /// Returns the lowercase label used in config files and audit records.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Stdio => "stdio",
            Self::Http => "http",
            Self::Sse => "sse",
        }
    }
}

impl std::str::FromStr for ServerTransport {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "stdio" => Ok(Self::Stdio),
            "http" => Ok(Self::Http),
            "sse" => Ok(Self::Sse),
            other => Err(ConfigError::Invalid(format!(
                "unknown transport {other:?} (expected stdio, http, or sse)"
            ))),
        }
    }
}

/// Per-subsystem enable flags.
///
/// Every flag defaults to on. The server subsystem has no flag; its
/// diagnostics tools are always registered.
#[derive(Debug, Clone, Deserialize)]
pub struct SubsystemsConfig {
    /// Mission Database tools and resources.
    #[serde(default = "default_subsystem_enabled")]
    pub mdb: bool,
    /// Processor tools and resources.
    #[serde(default = "default_subsystem_enabled")]
    pub processors: bool,
    /// Data link tools and resources.
    #[serde(default = "default_subsystem_enabled")]
    pub links: bool,
    /// Bucket storage tools and resources.
    #[serde(default = "default_subsystem_enabled")]
    pub storage: bool,
    /// Instance lifecycle tools and resources.
    #[serde(default = "default_subsystem_enabled")]
    pub instances: bool,
    /// Alarm tools and resources.
    #[serde(default = "default_subsystem_enabled")]
    pub alarms: bool,
    /// Commanding tools.
    #[serde(default = "default_subsystem_enabled")]
    pub commands: bool,
    /// Archive tools and resources.
    #[serde(default = "default_subsystem_enabled")]
    pub archive: bool,
}

impl Default for SubsystemsConfig {
    fn default() -> Self {
        Self {
            mdb: true,
            processors: true,
            links: true,
            storage: true,
            instances: true,
            alarms: true,
            commands: true,
            archive: true,
        }
    }
}

impl SubsystemsConfig {
    /// Returns whether a subsystem's tools should be registered.
    #[must_use]
    pub const fn enabled(&self, subsystem: Subsystem) -> bool {
        match subsystem {
            Subsystem::Server => true,
            Subsystem::Mdb => self.mdb,
            Subsystem::Processors => self.processors,
            Subsystem::Links => self.links,
            Subsystem::Storage => self.storage,
            Subsystem::Instances => self.instances,
            Subsystem::Alarms => self.alarms,
            Subsystem::Commands => self.commands,
            Subsystem::Archive => self.archive,
        }
    }

    /// Returns the labels of all enabled subsystems in canonical order.
    #[must_use]
    pub fn enabled_labels(&self) -> Vec<&'static str> {
        Subsystem::all()
            .iter()
            .copied()
            .filter(|subsystem| self.enabled(*subsystem))
            .map(Subsystem::as_str)
            .collect()
    }
}

/// Audit logging configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuditConfig {
    /// Audit sink selection.
    #[serde(default)]
    pub mode: AuditMode,
    /// Log file path for the file sink.
    #[serde(default)]
    pub path: Option<String>,
}

impl AuditConfig {
    /// Validates audit configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        match self.mode {
            AuditMode::File => {
                let path = self.path.as_deref().unwrap_or_default().trim();
                if path.is_empty() {
                    return Err(ConfigError::Invalid(
                        "file audit mode requires audit.path".to_string(),
                    ));
                }
                validate_path(Path::new(path))?;
            }
            AuditMode::Stderr | AuditMode::Off => {}
        }
        Ok(())
    }
}

/// Audit sink selection.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum AuditMode {
    /// JSON lines on stderr.
    #[default]
    Stderr,
    /// JSON lines appended to a file.
    File,
    /// No audit output.
    Off,
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration loading or validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O failure while reading configuration.
    #[error("config io error: {0}")]
    Io(String),
    /// TOML parsing error.
    #[error("config parse error: {0}")]
    Parse(String),
    /// Invalid configuration data.
    #[error("invalid config: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Resolves the config path from CLI or environment defaults.
///
/// The flag reports whether the path was requested explicitly; only explicit
/// paths turn a missing file into an error.
fn resolve_path(path: Option<&Path>) -> Result<(PathBuf, bool), ConfigError> {
    if let Some(path) = path {
        return Ok((path.to_path_buf(), true));
    }
    if let Ok(env_path) = env::var(CONFIG_ENV_VAR) {
        if env_path.len() > MAX_TOTAL_PATH_LENGTH {
            return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
        }
        return Ok((PathBuf::from(env_path), true));
    }
    Ok((PathBuf::from(DEFAULT_CONFIG_NAME), false))
}

/// Validates the resolved path against length limits.
fn validate_path(path: &Path) -> Result<(), ConfigError> {
    let text = path.to_string_lossy();
    if text.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
    }
    for component in path.components() {
        let value = component.as_os_str().to_string_lossy();
        if value.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid("config path component too long".to_string()));
        }
    }
    Ok(())
}

/// Default Yamcs base URL.
pub(crate) fn default_yamcs_url() -> String {
    "http://localhost:8090".to_string()
}

/// Default Yamcs instance.
pub(crate) fn default_yamcs_instance() -> String {
    "simulator".to_string()
}

/// Default Yamcs request timeout in seconds.
pub(crate) const fn default_timeout_secs() -> u64 {
    30
}

/// Default server name for the MCP handshake.
pub(crate) fn default_server_name() -> String {
    "yamcs-mcp".to_string()
}

/// Default maximum request body size in bytes.
pub(crate) const fn default_max_body_bytes() -> usize {
    1024 * 1024
}

/// Default enable flag for subsystem sections.
pub(crate) const fn default_subsystem_enabled() -> bool {
    true
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
    fn default_config_passes_validation() {
        let config = YamcsMcpConfig::default();
        assert!(config.validate().is_ok(), "defaults should validate");
        assert_eq!(config.yamcs.url, "http://localhost:8090");
        assert_eq!(config.yamcs.instance, "simulator");
        assert_eq!(config.yamcs.timeout_secs, 30);
        assert_eq!(config.server.name, "yamcs-mcp");
        assert_eq!(config.server.transport, ServerTransport::Stdio);
        assert_eq!(config.server.max_body_bytes, 1024 * 1024);
        assert_eq!(config.audit.mode, AuditMode::Stderr);
    }

    #[test]
    fn empty_toml_matches_defaults() {
        let config: YamcsMcpConfig = toml::from_str("").unwrap();
        assert!(config.validate().is_ok(), "empty file should produce defaults");
        assert!(config.subsystems.mdb, "subsystems default on");
        assert!(config.subsystems.archive, "subsystems default on");
    }

    #[test]
    fn partial_section_keeps_remaining_defaults() {
        let config: YamcsMcpConfig = toml::from_str(
            r#"
            [yamcs]
            url = "http://yamcs.example.com:8090"

            [subsystems]
            commands = false
            "#,
        )
        .unwrap();
        assert_eq!(config.yamcs.url, "http://yamcs.example.com:8090");
        assert_eq!(config.yamcs.instance, "simulator", "unset fields keep defaults");
        assert!(!config.subsystems.commands);
        assert!(config.subsystems.alarms, "unset flags stay on");
    }

    #[test]
    fn yamcs_url_rejects_non_http_schemes() {
        let config =
            YamcsConfig { url: "ftp://yamcs.example.com".to_string(), ..YamcsConfig::default() };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("http or https"), "got: {err}");
    }

    #[test]
    fn yamcs_url_rejects_garbage() {
        let config = YamcsConfig { url: "not a url".to_string(), ..YamcsConfig::default() };
        assert!(config.validate().is_err());
    }

    #[test]
    fn lone_username_is_rejected() {
        let config = YamcsConfig { username: Some("admin".to_string()), ..YamcsConfig::default() };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("together"), "got: {err}");
    }

    #[test]
    fn timeout_bounds_are_enforced() {
        let low = YamcsConfig { timeout_secs: 0, ..YamcsConfig::default() };
        assert!(low.validate().is_err(), "zero timeout must fail");
        let high = YamcsConfig { timeout_secs: 301, ..YamcsConfig::default() };
        assert!(high.validate().is_err(), "timeout above cap must fail");
        let edge = YamcsConfig { timeout_secs: 300, ..YamcsConfig::default() };
        assert!(edge.validate().is_ok(), "cap itself is accepted");
    }

    #[test]
    fn client_config_carries_connection_settings() {
        let config = YamcsConfig {
            url: " http://yamcs.example.com:8090 ".to_string(),
            instance: "ops".to_string(),
            username: Some("admin".to_string()),
            password: Some("secret".to_string()),
            timeout_secs: 45,
        };
        let client = config.client_config();
        assert_eq!(client.url, "http://yamcs.example.com:8090");
        assert_eq!(client.instance, "ops");
        assert_eq!(client.username.as_deref(), Some("admin"));
        assert_eq!(client.timeout, Duration::from_secs(45));
    }

    #[test]
    fn http_transport_requires_bind() {
        let config = ServerConfig {
            transport: ServerTransport::Http,
            bind: None,
            ..ServerConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("requires bind"), "got: {err}");
    }

    #[test]
    fn sse_transport_rejects_unparsable_bind() {
        let config = ServerConfig {
            transport: ServerTransport::Sse,
            bind: Some("nowhere".to_string()),
            ..ServerConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("invalid bind address"), "got: {err}");
    }

    #[test]
    fn privileged_bind_ports_are_rejected() {
        let config = ServerConfig {
            transport: ServerTransport::Http,
            bind: Some("127.0.0.1:80".to_string()),
            ..ServerConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("1024"), "got: {err}");
        let ok = ServerConfig {
            transport: ServerTransport::Http,
            bind: Some("127.0.0.1:8091".to_string()),
            ..ServerConfig::default()
        };
        assert!(ok.validate().is_ok());
    }

    #[test]
    fn stdio_transport_ignores_bind() {
        let config = ServerConfig {
            transport: ServerTransport::Stdio,
            bind: None,
            ..ServerConfig::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_body_limit_is_rejected() {
        let config = ServerConfig { max_body_bytes: 0, ..ServerConfig::default() };
        assert!(config.validate().is_err());
    }

    #[test]
    fn transport_parses_case_insensitively() {
        assert_eq!("stdio".parse::<ServerTransport>().unwrap(), ServerTransport::Stdio);
        assert_eq!("HTTP".parse::<ServerTransport>().unwrap(), ServerTransport::Http);
        assert_eq!(" sse ".parse::<ServerTransport>().unwrap(), ServerTransport::Sse);
        assert!("websocket".parse::<ServerTransport>().is_err());
    }

    #[test]
    fn file_audit_mode_requires_path() {
        let config = AuditConfig { mode: AuditMode::File, path: None };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("audit.path"), "got: {err}");
        let ok = AuditConfig { mode: AuditMode::File, path: Some("audit.log".to_string()) };
        assert!(ok.validate().is_ok());
    }

    #[test]
    fn off_audit_mode_needs_no_path() {
        let config = AuditConfig { mode: AuditMode::Off, path: None };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn server_subsystem_cannot_be_disabled() {
        let config = SubsystemsConfig {
            mdb: false,
            processors: false,
            links: false,
            storage: false,
            instances: false,
            alarms: false,
            commands: false,
            archive: false,
        };
        assert!(config.enabled(Subsystem::Server), "server tools are always on");
        assert!(!config.enabled(Subsystem::Commands));
        assert_eq!(config.enabled_labels(), vec!["server"]);
    }

    #[test]
    fn enabled_labels_follow_canonical_order() {
        let config = SubsystemsConfig { processors: false, ..SubsystemsConfig::default() };
        let labels = config.enabled_labels();
        assert_eq!(
            labels,
            vec!["server", "mdb", "links", "storage", "instances", "alarms", "commands", "archive"]
        );
    }

    #[test]
    fn unknown_transport_in_toml_fails_to_parse() {
        let result = toml::from_str::<YamcsMcpConfig>(
            r#"
            [server]
            transport = "pigeon"
            "#,
        );
        assert!(result.is_err(), "unknown enum variants must be rejected");
    }
}
