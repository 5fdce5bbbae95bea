// crates/yamcs-cli/src/main.rs
// ============================================================================
// Module: Yamcs CLI Entry Point
// Description: Command dispatcher for the Yamcs MCP bridge binary.
// Purpose: Run the MCP server and inspect its contract surface offline.
// Dependencies: clap, serde_json, tokio, yamcs-contract, yamcs-mcp.
// ============================================================================

//! ## Overview
//! The `yamcs-mcp` binary wraps the MCP bridge library behind a small set of
//! commands: `serve` runs the server on the configured transport, `config
//! validate` checks a configuration file without starting anything, and the
//! `tools`/`resources`/`docs` commands render the advertised contract surface
//! for operators wiring up an assistant. Exit codes: 0 on success, 1 on
//! runtime failures, 2 on usage or configuration errors.

// ============================================================================
// SECTION: Modules
// ============================================================================

#[cfg(test)]
mod main_tests;

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::ArgAction;
use clap::Args;
use clap::CommandFactory;
use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;
use serde_json::Value;
use thiserror::Error;
use yamcs_contract::tool_contracts;
use yamcs_contract::tooling_markdown;
use yamcs_mcp::McpServer;
use yamcs_mcp::McpServerError;
use yamcs_mcp::ServerTransport;
use yamcs_mcp::YamcsMcpConfig;

// ============================================================================
// SECTION: CLI Types
// ============================================================================

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(name = "yamcs-mcp", disable_help_subcommand = true, disable_version_flag = true)]
struct Cli {
    /// Print version information and exit.
    #[arg(long = "version", action = ArgAction::SetTrue, global = true)]
    show_version: bool,
    /// Selected subcommand to execute.
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Supported CLI subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the Yamcs MCP bridge server.
    Serve(ServeCommand),
    /// Configuration utilities.
    Config {
        /// Selected config subcommand.
        #[command(subcommand)]
        command: ConfigCommand,
    },
    /// Tool contract utilities.
    Tools {
        /// Selected tools subcommand.
        #[command(subcommand)]
        command: ToolsCommand,
    },
    /// Resource contract utilities.
    Resources {
        /// Selected resources subcommand.
        #[command(subcommand)]
        command: ResourcesCommand,
    },
    /// Print the full tool contract reference as markdown.
    Docs,
}

/// Configuration for the `serve` command.
#[derive(Args, Debug)]
struct ServeCommand {
    /// Optional config file path (defaults to yamcs-mcp.toml or env override).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Transport override applied on top of the loaded configuration.
    #[arg(long, value_enum, value_name = "TRANSPORT")]
    transport: Option<TransportArg>,
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Validate a Yamcs MCP configuration file.
    Validate(ConfigValidateCommand),
}

/// Arguments for `config validate`.
#[derive(Args, Debug)]
struct ConfigValidateCommand {
    /// Optional config file path (defaults to yamcs-mcp.toml or env override).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

/// Tools subcommands.
#[derive(Subcommand, Debug)]
enum ToolsCommand {
    /// List the tools registered for a configuration.
    List(ToolsListCommand),
}

/// Arguments for `tools list`.
#[derive(Args, Debug)]
struct ToolsListCommand {
    /// Optional config file path (defaults to yamcs-mcp.toml or env override).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Emit the listing as JSON instead of text.
    #[arg(long, action = ArgAction::SetTrue)]
    json: bool,
}

/// Resources subcommands.
#[derive(Subcommand, Debug)]
enum ResourcesCommand {
    /// List the resources registered for a configuration.
    List(ResourcesListCommand),
}

/// Arguments for `resources list`.
#[derive(Args, Debug)]
struct ResourcesListCommand {
    /// Optional config file path (defaults to yamcs-mcp.toml or env override).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Emit the listing as JSON instead of text.
    #[arg(long, action = ArgAction::SetTrue)]
    json: bool,
}

/// Transport selection for the `serve` command.
#[derive(ValueEnum, Copy, Clone, Debug)]
enum TransportArg {
    /// Stdin/stdout transport with Content-Length framing.
    Stdio,
    /// HTTP JSON-RPC transport.
    Http,
    /// SSE transport for responses.
    Sse,
}

/// Converts CLI transport selections into server transport variants.
impl From<TransportArg> for ServerTransport {
    fn from(value: TransportArg) -> Self {
        match value {
            TransportArg::Stdio => Self::Stdio,
            TransportArg::Http => Self::Http,
            TransportArg::Sse => Self::Sse,
        }
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// CLI error carrying a message and the process exit code to report.
#[derive(Debug, Error)]
#[error("{message}")]
struct CliError {
    /// Human-readable error message.
    message: String,
    /// Exit code reported when this error terminates the process.
    code: u8,
}

impl CliError {
    /// Constructs a runtime failure reported with exit code 1.
    const fn runtime(message: String) -> Self {
        Self {
            message,
            code: 1,
        }
    }

    /// Constructs a usage or configuration failure reported with exit code 2.
    const fn config(message: String) -> Self {
        Self {
            message,
            code: 2,
        }
    }
}

/// CLI result alias for fallible operations.
type CliResult<T> = Result<T, CliError>;

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// CLI entry point returning an exit code.
#[tokio::main(flavor = "multi_thread")]
async fn main() -> ExitCode {
    match run().await {
        Ok(code) => code,
        Err(err) => emit_error(&err),
    }
}

/// Executes the CLI command dispatcher.
async fn run() -> CliResult<ExitCode> {
    let cli = Cli::parse();

    if cli.show_version {
        let version = env!("CARGO_PKG_VERSION");
        write_stdout_line(&format!("yamcs-mcp {version}"))
            .map_err(|err| CliError::runtime(output_error("stdout", &err)))?;
        return Ok(ExitCode::SUCCESS);
    }

    let Some(command) = cli.command else {
        show_help()?;
        return Ok(ExitCode::SUCCESS);
    };

    match command {
        Commands::Serve(command) => command_serve(command).await,
        Commands::Config {
            command,
        } => command_config(command),
        Commands::Tools {
            command,
        } => command_tools(command),
        Commands::Resources {
            command,
        } => command_resources(command),
        Commands::Docs => command_docs(),
    }
}

/// Emits the top-level help message for the CLI.
fn show_help() -> CliResult<()> {
    let mut command = Cli::command();
    command
        .print_help()
        .map_err(|err| CliError::runtime(output_error("stdout", &err)))?;
    write_stdout_line("").map_err(|err| CliError::runtime(output_error("stdout", &err)))?;
    Ok(())
}

// ============================================================================
// SECTION: Serve Command
// ============================================================================

/// Executes the `serve` command.
async fn command_serve(command: ServeCommand) -> CliResult<ExitCode> {
    let mut config = YamcsMcpConfig::load(command.config.as_deref())
        .map_err(|err| CliError::config(format!("failed to load config: {err}")))?;
    if let Some(transport) = command.transport {
        config.server.transport = transport.into();
    }
    warn_network_exposure(&config)?;

    let server = tokio::task::spawn_blocking(move || McpServer::from_config(config))
        .await
        .map_err(|err| CliError::runtime(format!("server init failed: {err}")))?
        .map_err(init_error)?;
    server
        .serve()
        .await
        .map_err(|err| CliError::runtime(format!("server failed: {err}")))?;

    Ok(ExitCode::SUCCESS)
}

/// Warns on stderr when an HTTP or SSE transport binds beyond loopback.
///
/// The bridge performs no request authentication of its own, so a reachable
/// port accepts command issuance from the whole network segment.
fn warn_network_exposure(config: &YamcsMcpConfig) -> CliResult<()> {
    if !matches!(config.server.transport, ServerTransport::Http | ServerTransport::Sse) {
        return Ok(());
    }
    let addr = config.server.bind_addr().map_err(|err| CliError::config(err.to_string()))?;
    if addr.ip().is_loopback() {
        return Ok(());
    }
    write_stderr_line(&format!(
        "warning: {} transport bound to non-loopback address {addr}",
        config.server.transport.as_str()
    ))
    .map_err(|err| CliError::runtime(output_error("stderr", &err)))?;
    Ok(())
}

/// Maps server construction failures to CLI errors.
fn init_error(error: McpServerError) -> CliError {
    let message = format!("server init failed: {error}");
    match error {
        McpServerError::Config(_) | McpServerError::Init(_) => CliError::config(message),
        McpServerError::Transport(_) => CliError::runtime(message),
    }
}

// ============================================================================
// SECTION: Config Commands
// ============================================================================

/// Dispatches config subcommands.
fn command_config(command: ConfigCommand) -> CliResult<ExitCode> {
    match command {
        ConfigCommand::Validate(command) => command_config_validate(&command),
    }
}

/// Executes the config validation command.
fn command_config_validate(command: &ConfigValidateCommand) -> CliResult<ExitCode> {
    let config = YamcsMcpConfig::load(command.config.as_deref())
        .map_err(|err| CliError::config(format!("failed to load config: {err}")))?;
    write_stdout_line(&format!(
        "configuration valid: {} transport, instance {}",
        config.server.transport.as_str(),
        config.yamcs.instance
    ))
    .map_err(|err| CliError::runtime(output_error("stdout", &err)))?;
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Tools Commands
// ============================================================================

/// Dispatches tools subcommands.
fn command_tools(command: ToolsCommand) -> CliResult<ExitCode> {
    match command {
        ToolsCommand::List(command) => command_tools_list(&command),
    }
}

/// Executes `tools list`.
fn command_tools_list(command: &ToolsListCommand) -> CliResult<ExitCode> {
    let definitions = load_server(command.config.as_deref())?.tool_definitions();
    if command.json {
        write_json_value(&serde_json::json!({ "tools": definitions }))?;
        return Ok(ExitCode::SUCCESS);
    }
    for definition in &definitions {
        let access = if definition.annotations.read_only_hint { "read-only" } else { "mutating" };
        write_stdout_line(&format!(
            "{} [{access}] {}",
            definition.name.as_str(),
            definition.description
        ))
        .map_err(|err| CliError::runtime(output_error("stdout", &err)))?;
    }
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Resources Commands
// ============================================================================

/// Dispatches resources subcommands.
fn command_resources(command: ResourcesCommand) -> CliResult<ExitCode> {
    match command {
        ResourcesCommand::List(command) => command_resources_list(&command),
    }
}

/// Executes `resources list`.
fn command_resources_list(command: &ResourcesListCommand) -> CliResult<ExitCode> {
    let definitions = load_server(command.config.as_deref())?.resource_definitions();
    if command.json {
        write_json_value(&serde_json::json!({ "resources": definitions }))?;
        return Ok(ExitCode::SUCCESS);
    }
    for definition in &definitions {
        write_stdout_line(&format!(
            "{} ({}) {}",
            definition.uri, definition.mime_type, definition.description
        ))
        .map_err(|err| CliError::runtime(output_error("stdout", &err)))?;
    }
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Docs Command
// ============================================================================

/// Executes the `docs` command.
fn command_docs() -> CliResult<ExitCode> {
    let markdown = tooling_markdown(&tool_contracts());
    write_stdout_bytes(markdown.as_bytes())
        .map_err(|err| CliError::runtime(output_error("stdout", &err)))?;
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Shared Helpers
// ============================================================================

/// Builds an MCP server from configuration for offline contract inspection.
///
/// Registration respects subsystem toggles, so the listing matches what the
/// same configuration would advertise over `tools/list`.
fn load_server(path: Option<&Path>) -> CliResult<McpServer> {
    let config = YamcsMcpConfig::load(path)
        .map_err(|err| CliError::config(format!("failed to load config: {err}")))?;
    McpServer::from_config(config).map_err(init_error)
}

// ============================================================================
// SECTION: Output Helpers
// ============================================================================

/// Writes a single line to stdout.
fn write_stdout_line(message: &str) -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    writeln!(&mut stdout, "{message}")
}

/// Writes raw bytes to stdout without adding a newline.
fn write_stdout_bytes(bytes: &[u8]) -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    stdout.write_all(bytes)
}

/// Writes a pretty-printed JSON value to stdout.
fn write_json_value(value: &Value) -> CliResult<()> {
    let rendered = serde_json::to_string_pretty(value)
        .map_err(|err| CliError::runtime(format!("failed to render json: {err}")))?;
    write_stdout_line(&rendered).map_err(|err| CliError::runtime(output_error("stdout", &err)))
}

/// Writes a single line to stderr.
fn write_stderr_line(message: &str) -> std::io::Result<()> {
    let mut stderr = std::io::stderr();
    writeln!(&mut stderr, "{message}")
}

/// Formats a write failure for one of the standard output streams.
fn output_error(stream: &str, error: &std::io::Error) -> String {
    format!("failed to write to {stream}: {error}")
}

/// Emits an error message to stderr and returns the mapped exit code.
fn emit_error(error: &CliError) -> ExitCode {
    let _ = write_stderr_line(&error.message);
    ExitCode::from(error.code)
}
