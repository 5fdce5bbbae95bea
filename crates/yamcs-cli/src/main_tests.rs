// crates/yamcs-cli/src/main_tests.rs
// ============================================================================
// Module: CLI Main Helpers Tests
// Description: Unit tests for argument parsing and exit code mapping.
// Purpose: Ensure the CLI surface parses cleanly and reports correct codes.
// Dependencies: yamcs-cli main helpers
// ============================================================================

//! ## Overview
//! Validates the clap definition, transport overrides, and the split between
//! usage errors (exit code 2) and runtime failures (exit code 1).

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

// ============================================================================
// SECTION: Imports
// ============================================================================

use clap::CommandFactory;
use clap::Parser;
use yamcs_mcp::McpServer;
use yamcs_mcp::McpServerError;
use yamcs_mcp::ServerTransport;
use yamcs_mcp::YamcsMcpConfig;
use yamcs_mcp::config::SubsystemsConfig;

use super::Cli;
use super::Commands;
use super::ToolsCommand;
use super::TransportArg;
use super::init_error;

// ============================================================================
// SECTION: Tests
// ============================================================================

#[test]
fn cli_definition_is_valid() {
    Cli::command().debug_assert();
}

#[test]
fn serve_accepts_a_transport_override() {
    let cli =
        Cli::try_parse_from(["yamcs-mcp", "serve", "--transport", "http"]).expect("parse serve");
    match cli.command {
        Some(Commands::Serve(command)) => {
            assert!(matches!(command.transport, Some(TransportArg::Http)));
            assert!(command.config.is_none());
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn tools_list_accepts_the_json_flag() {
    let cli = Cli::try_parse_from(["yamcs-mcp", "tools", "list", "--json"]).expect("parse tools");
    match cli.command {
        Some(Commands::Tools {
            command: ToolsCommand::List(command),
        }) => {
            assert!(command.json);
            assert!(command.config.is_none());
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn version_flag_parses_without_a_subcommand() {
    let cli = Cli::try_parse_from(["yamcs-mcp", "--version"]).expect("parse version");
    assert!(cli.show_version);
    assert!(cli.command.is_none());
}

#[test]
fn unknown_subcommands_are_usage_errors() {
    let err = Cli::try_parse_from(["yamcs-mcp", "telemetry"]).expect_err("unknown subcommand");
    assert_eq!(err.exit_code(), 2);
}

#[test]
fn transport_args_map_to_server_transports() {
    assert_eq!(ServerTransport::from(TransportArg::Stdio), ServerTransport::Stdio);
    assert_eq!(ServerTransport::from(TransportArg::Http), ServerTransport::Http);
    assert_eq!(ServerTransport::from(TransportArg::Sse), ServerTransport::Sse);
}

#[test]
fn init_errors_separate_usage_from_runtime_failures() {
    assert_eq!(init_error(McpServerError::Config("bad".to_string())).code, 2);
    assert_eq!(init_error(McpServerError::Init("bad".to_string())).code, 2);
    assert_eq!(init_error(McpServerError::Transport("bad".to_string())).code, 1);
}

#[test]
fn default_config_registers_the_full_tool_surface() {
    let server = McpServer::from_config(YamcsMcpConfig::default()).expect("default config");
    assert_eq!(server.tool_definitions().len(), yamcs_contract::tool_definitions().len());
    assert_eq!(server.resource_definitions().len(), yamcs_contract::resource_definitions().len());
}

#[test]
fn disabled_subsystems_drop_out_of_tool_listings() {
    let config = YamcsMcpConfig {
        subsystems: SubsystemsConfig {
            mdb: false,
            ..SubsystemsConfig::default()
        },
        ..YamcsMcpConfig::default()
    };
    let server = McpServer::from_config(config).expect("config without mdb");
    let names: Vec<&str> =
        server.tool_definitions().iter().map(|tool| tool.name.as_str()).collect();
    assert!(!names.is_empty());
    assert!(names.iter().all(|name| !name.starts_with("mdb_")));
}
