//! Argument parsing and command dispatch.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use fleetdeck_api_models::{NodeAction, NodeStatus, ServerAction, ServerStatus};
use fleetdeck_console::AppContext;
use fleetdeck_telemetry::{
    DEFAULT_LOG_LEVEL, LogFormat, LoggingConfig, SessionGuard, build_sha, init_logging,
    log_format_from_str,
};
use uuid::Uuid;

use crate::client::{CliResult, build_context};
use crate::commands::dashboard::handle_dashboard;
use crate::commands::explore::handle_explore;
use crate::commands::files::handle_files;
use crate::commands::game_types::handle_game_types;
use crate::commands::health::handle_health;
use crate::commands::nodes::handle_nodes;
use crate::commands::servers::handle_servers;
use crate::commands::settings::handle_settings;

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Parses CLI arguments, executes the requested command, and returns the
/// process exit code.
pub async fn run() -> i32 {
    let cli = Cli::parse();
    let trace_id = Uuid::new_v4().to_string();

    let logging = LoggingConfig {
        level: cli.log_level.as_deref().unwrap_or(DEFAULT_LOG_LEVEL),
        format: log_format_from_str(cli.log_format.as_deref()).unwrap_or_else(LogFormat::infer),
        build_sha: build_sha(),
    };
    if let Err(err) = init_logging(&logging) {
        eprintln!("warning: {err:#}");
    }
    let _session = SessionGuard::enter(&trace_id, command_label(&cli.command));

    let result = match build_context(&cli, &trace_id) {
        Ok(mut context) => dispatch(cli.command, &mut context, cli.output).await,
        Err(err) => Err(err),
    };

    match result {
        Ok(()) => 0,
        Err(err) => {
            let message = err.display_message();
            tracing::debug!(exit_code = err.exit_code(), error = %message, "command failed");
            eprintln!("error: {message}");
            err.exit_code()
        }
    }
}

async fn dispatch(command: Command, ctx: &mut AppContext, output: OutputFormat) -> CliResult<()> {
    match command {
        Command::Dashboard => handle_dashboard(ctx, output).await,
        Command::Nodes(command) => handle_nodes(ctx, command, output).await,
        Command::Servers(command) => handle_servers(ctx, command, output).await,
        Command::GameTypes => handle_game_types(ctx, output).await,
        Command::Health => handle_health(ctx, output).await,
        Command::Files(args) => handle_files(ctx, args, output).await,
        Command::Explore(args) => handle_explore(ctx, args).await,
        Command::Settings(command) => handle_settings(ctx, command, output),
    }
}

const fn command_label(command: &Command) -> &'static str {
    match command {
        Command::Dashboard => "dashboard",
        Command::Nodes(_) => "nodes",
        Command::Servers(_) => "servers",
        Command::GameTypes => "game-types",
        Command::Health => "health",
        Command::Files(_) => "files",
        Command::Explore(_) => "explore",
        Command::Settings(_) => "settings",
    }
}

#[derive(Parser)]
#[command(name = "fleetdeck", about = "Console for a Fleetdeck game-server fleet")]
pub(crate) struct Cli {
    #[arg(
        long,
        global = true,
        env = "FLEETDECK_API_URL",
        help = "Backend URL for this invocation (the saved setting is left unchanged)"
    )]
    pub(crate) api_url: Option<String>,
    #[arg(long, global = true, env = "FLEETDECK_CONFIG_DIR")]
    pub(crate) config_dir: Option<PathBuf>,
    #[arg(
        long,
        global = true,
        env = "FLEETDECK_HTTP_TIMEOUT_SECS",
        default_value_t = DEFAULT_TIMEOUT_SECS
    )]
    pub(crate) timeout: u64,
    #[arg(
        long = "output",
        alias = "format",
        global = true,
        value_enum,
        default_value_t = OutputFormat::Table,
        help = "Select output format for commands that render structured data"
    )]
    pub(crate) output: OutputFormat,
    #[arg(long, global = true, help = "Log format: json or pretty")]
    pub(crate) log_format: Option<String>,
    #[arg(long, global = true, help = "Log level directive when RUST_LOG is unset")]
    pub(crate) log_level: Option<String>,
    #[command(subcommand)]
    pub(crate) command: Command,
}

#[derive(Subcommand)]
pub(crate) enum Command {
    /// Fleet overview.
    Dashboard,
    /// Node management.
    #[command(subcommand)]
    Nodes(NodesCommand),
    /// Game-server management.
    #[command(subcommand)]
    Servers(ServersCommand),
    /// Supported game types.
    GameTypes,
    /// Backend health and readiness.
    Health,
    /// One-shot file operations on a node.
    Files(FilesArgs),
    /// Interactive file explorer on a node.
    Explore(ExploreArgs),
    /// Local console settings.
    #[command(subcommand)]
    Settings(SettingsCommand),
}

#[derive(Subcommand)]
pub(crate) enum NodesCommand {
    Ls(NodeListArgs),
    Show(IdArgs),
    Create(NodeCreateArgs),
    Update(NodeUpdateArgs),
    Rm(IdArgs),
    Action(NodeActionArgs),
    Metrics(IdArgs),
}

#[derive(Subcommand)]
pub(crate) enum ServersCommand {
    Ls(ServerListArgs),
    Show(IdArgs),
    Create(ServerCreateArgs),
    Rm(ServerRemoveArgs),
    Action(ServerActionArgs),
    Logs(ServerLogsArgs),
    Metrics(IdArgs),
}

#[derive(Subcommand)]
pub(crate) enum SettingsCommand {
    Show,
    Set(SettingsSetArgs),
    Reset,
}

#[derive(Args)]
pub(crate) struct IdArgs {
    pub(crate) id: String,
}

#[derive(Args)]
pub(crate) struct NodeListArgs {
    #[arg(long, value_enum)]
    pub(crate) status: Option<NodeStatusArg>,
}

#[derive(Args)]
pub(crate) struct NodeCreateArgs {
    #[arg(long)]
    pub(crate) name: String,
    #[arg(long)]
    pub(crate) hostname: String,
    #[arg(long = "ip")]
    pub(crate) ip_address: String,
    #[arg(long, default_value_t = 50051)]
    pub(crate) port: u16,
    #[arg(long = "game-type", value_delimiter = ',')]
    pub(crate) game_types: Vec<String>,
    #[arg(long = "cpu", default_value_t = 4)]
    pub(crate) total_cpu_cores: u32,
    #[arg(long = "memory-mb", default_value_t = 8192)]
    pub(crate) total_memory_mb: u64,
    #[arg(long = "storage-mb", default_value_t = 102_400)]
    pub(crate) total_storage_mb: u64,
    #[arg(long)]
    pub(crate) os_version: Option<String>,
}

#[derive(Args)]
pub(crate) struct NodeUpdateArgs {
    pub(crate) id: String,
    #[arg(long)]
    pub(crate) name: Option<String>,
    #[arg(long)]
    pub(crate) hostname: Option<String>,
    #[arg(long = "ip")]
    pub(crate) ip_address: Option<String>,
    #[arg(long)]
    pub(crate) port: Option<u16>,
    #[arg(long = "game-type", value_delimiter = ',')]
    pub(crate) game_types: Option<Vec<String>>,
    #[arg(long = "cpu")]
    pub(crate) total_cpu_cores: Option<u32>,
    #[arg(long = "memory-mb")]
    pub(crate) total_memory_mb: Option<u64>,
    #[arg(long = "storage-mb")]
    pub(crate) total_storage_mb: Option<u64>,
    #[arg(long)]
    pub(crate) os_version: Option<String>,
    #[arg(long, value_enum)]
    pub(crate) status: Option<NodeStatusArg>,
}

#[derive(Args)]
pub(crate) struct NodeActionArgs {
    pub(crate) id: String,
    #[arg(value_enum)]
    pub(crate) action: NodeActionArg,
}

#[derive(Args)]
pub(crate) struct ServerListArgs {
    #[arg(long, value_enum)]
    pub(crate) status: Option<ServerStatusArg>,
    #[arg(long = "node")]
    pub(crate) node_id: Option<String>,
    #[arg(long)]
    pub(crate) game_type: Option<String>,
}

#[derive(Args)]
pub(crate) struct ServerCreateArgs {
    #[arg(long = "node")]
    pub(crate) node_id: String,
    #[arg(long)]
    pub(crate) game_type: String,
    #[arg(long)]
    pub(crate) name: String,
    #[arg(long, default_value = "latest")]
    pub(crate) version: String,
    #[arg(long, default_value_t = 20)]
    pub(crate) max_players: u32,
    #[arg(long = "set", value_parser = parse_key_value, help = "Game setting as KEY=VALUE")]
    pub(crate) settings: Vec<(String, String)>,
    #[arg(long = "min-cpu", default_value_t = 1)]
    pub(crate) min_cpu_cores: u32,
    #[arg(long = "min-memory-mb", default_value_t = 2048)]
    pub(crate) min_memory_mb: u64,
    #[arg(long = "min-storage-mb", default_value_t = 10_240)]
    pub(crate) min_storage_mb: u64,
}

#[derive(Args)]
pub(crate) struct ServerRemoveArgs {
    pub(crate) id: String,
    #[arg(long, help = "Archive world data before removing")]
    pub(crate) backup: bool,
}

#[derive(Args)]
pub(crate) struct ServerActionArgs {
    pub(crate) id: String,
    #[arg(value_enum)]
    pub(crate) action: ServerActionArg,
}

#[derive(Args)]
pub(crate) struct ServerLogsArgs {
    pub(crate) id: String,
    #[arg(long, default_value_t = fleetdeck_console::api::servers::DEFAULT_LOG_TAIL)]
    pub(crate) tail: u32,
}

#[derive(Args)]
pub(crate) struct FilesArgs {
    pub(crate) node: String,
    #[command(subcommand)]
    pub(crate) op: FilesOp,
}

#[derive(Subcommand)]
pub(crate) enum FilesOp {
    Ls {
        #[arg(default_value = "/")]
        path: String,
        #[arg(long)]
        recursive: bool,
    },
    Mkdir {
        path: String,
        #[arg(long, short = 'p')]
        parents: bool,
    },
    Touch {
        path: String,
    },
    Rm {
        path: String,
        #[arg(long, short = 'r')]
        recursive: bool,
    },
    Mv {
        source: String,
        dest: String,
    },
    Cp {
        source: String,
        dest: String,
        #[arg(long, short = 'r')]
        recursive: bool,
    },
    Rename {
        path: String,
        new_name: String,
    },
    Cat {
        path: String,
    },
    Write {
        path: String,
        #[arg(long, conflicts_with = "from_file")]
        content: Option<String>,
        #[arg(long = "from-file")]
        from_file: Option<PathBuf>,
        #[arg(long)]
        append: bool,
    },
    Exists {
        path: String,
    },
    Zip {
        source: String,
        dest: String,
        #[arg(long, short = 'r')]
        recursive: bool,
    },
    Unzip {
        source: String,
        dest: String,
    },
    Download {
        path: String,
        #[arg(long = "out")]
        out: Option<PathBuf>,
    },
    Upload {
        file: PathBuf,
        #[arg(long = "dest", default_value = "/")]
        dest: String,
    },
}

#[derive(Args)]
pub(crate) struct ExploreArgs {
    pub(crate) node: String,
    #[arg(long, default_value = ".", help = "Directory downloaded archives are saved to")]
    pub(crate) download_dir: PathBuf,
}

#[derive(Args)]
pub(crate) struct SettingsSetArgs {
    #[arg(long)]
    pub(crate) api_url: Option<String>,
    #[arg(long)]
    pub(crate) refresh_interval: Option<u32>,
    #[arg(long)]
    pub(crate) notifications: Option<bool>,
    #[arg(long)]
    pub(crate) dark_mode: Option<bool>,
}

#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub(crate) enum OutputFormat {
    Table,
    Json,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
pub(crate) enum NodeStatusArg {
    Online,
    Offline,
    Maintenance,
}

impl From<NodeStatusArg> for NodeStatus {
    fn from(value: NodeStatusArg) -> Self {
        match value {
            NodeStatusArg::Online => Self::Online,
            NodeStatusArg::Offline => Self::Offline,
            NodeStatusArg::Maintenance => Self::Maintenance,
        }
    }
}

#[derive(Copy, Clone, Debug, ValueEnum)]
pub(crate) enum NodeActionArg {
    Restart,
    UpdateImage,
    Initialize,
}

impl From<NodeActionArg> for NodeAction {
    fn from(value: NodeActionArg) -> Self {
        match value {
            NodeActionArg::Restart => Self::Restart,
            NodeActionArg::UpdateImage => Self::UpdateImage,
            NodeActionArg::Initialize => Self::Initialize,
        }
    }
}

#[derive(Copy, Clone, Debug, ValueEnum)]
pub(crate) enum ServerStatusArg {
    Installing,
    Stopped,
    Running,
    Error,
    Updating,
    Starting,
    Stopping,
    BackingUp,
}

impl From<ServerStatusArg> for ServerStatus {
    fn from(value: ServerStatusArg) -> Self {
        match value {
            ServerStatusArg::Installing => Self::Installing,
            ServerStatusArg::Stopped => Self::Stopped,
            ServerStatusArg::Running => Self::Running,
            ServerStatusArg::Error => Self::Error,
            ServerStatusArg::Updating => Self::Updating,
            ServerStatusArg::Starting => Self::Starting,
            ServerStatusArg::Stopping => Self::Stopping,
            ServerStatusArg::BackingUp => Self::BackingUp,
        }
    }
}

#[derive(Copy, Clone, Debug, ValueEnum)]
pub(crate) enum ServerActionArg {
    Start,
    Stop,
    Restart,
    Reinstall,
    Backup,
}

impl From<ServerActionArg> for ServerAction {
    fn from(value: ServerActionArg) -> Self {
        match value {
            ServerActionArg::Start => Self::Start,
            ServerActionArg::Stop => Self::Stop,
            ServerActionArg::Restart => Self::Restart,
            ServerActionArg::Reinstall => Self::Reinstall,
            ServerActionArg::Backup => Self::Backup,
        }
    }
}

pub(crate) fn parse_key_value(input: &str) -> Result<(String, String), String> {
    let (key, value) = input
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{input}'"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err("setting key cannot be empty".to_string());
    }
    Ok((key.to_string(), value.trim().to_string()))
}
