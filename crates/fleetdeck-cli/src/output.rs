//! Output renderers and formatting helpers for CLI commands.

use anyhow::anyhow;
use chrono::Utc;
use fleetdeck_api_models::{
    CreateServerResponse, FileExistence, FileInfo, GameType, HealthStatus, Node, NodeMetrics,
    Server, ServerMetrics,
};
use fleetdeck_config::AppSettings;
use fleetdeck_console::dashboard::DashboardSummary;
use fleetdeck_console::format::{format_relative_time, format_size, format_timestamp, or_na};
use fleetdeck_console::store::Toast;
use serde::Serialize;
use serde_json::json;

use crate::cli::OutputFormat;
use crate::client::{CliError, CliResult};

fn print_json<T: Serialize + ?Sized>(value: &T) -> CliResult<()> {
    let text = serde_json::to_string_pretty(value)
        .map_err(|err| CliError::failure(anyhow!("failed to format JSON: {err}")))?;
    println!("{text}");
    Ok(())
}

pub(crate) fn render_nodes(nodes: &[Node], format: OutputFormat) -> CliResult<()> {
    match format {
        OutputFormat::Json => print_json(nodes)?,
        OutputFormat::Table => {
            println!(
                "{:<36} {:<20} {:<12} {:<21} {:>5} HEARTBEAT",
                "ID", "NAME", "STATUS", "ADDRESS", "CPU"
            );
            let now = Utc::now();
            for node in nodes {
                println!(
                    "{:<36} {:<20} {:<12} {:<21} {:>5} {}",
                    node.id,
                    node.name,
                    node.status.as_str(),
                    node_address(node),
                    node.total_cpu_cores,
                    format_relative_time(node.last_heartbeat.as_deref(), now)
                );
            }
        }
    }
    Ok(())
}

pub(crate) fn render_node(node: &Node, format: OutputFormat) -> CliResult<()> {
    match format {
        OutputFormat::Json => print_json(node)?,
        OutputFormat::Table => {
            println!("id: {}", node.id);
            println!("name: {}", node.name);
            println!("hostname: {}", node.hostname);
            println!("address: {}", node_address(node));
            println!("status: {}", node.status.as_str());
            if !node.game_types.is_empty() {
                println!("game types: {}", node.game_types.join(", "));
            }
            println!(
                "cpu: {}/{} cores free",
                node.available_cpu_cores, node.total_cpu_cores
            );
            println!(
                "memory: {}/{} MB free",
                node.available_memory_mb, node.total_memory_mb
            );
            println!(
                "storage: {}/{} MB free",
                node.available_storage_mb, node.total_storage_mb
            );
            println!("os: {}", or_na(non_empty(&node.os_version)));
            println!("agent: {}", or_na(non_empty(&node.agent_version)));
            println!("initialized: {}", node.initialized);
            println!(
                "last heartbeat: {}",
                format_relative_time(node.last_heartbeat.as_deref(), Utc::now())
            );
            println!("created: {}", or_na(node.created_at.as_deref()));
        }
    }
    Ok(())
}

pub(crate) fn render_node_metrics(metrics: &NodeMetrics, format: OutputFormat) -> CliResult<()> {
    match format {
        OutputFormat::Json => print_json(metrics)?,
        OutputFormat::Table => {
            println!("cpu: {:.1}%", metrics.cpu_usage_percent);
            println!("memory: {:.1}%", metrics.memory_usage_percent);
            println!("storage: {:.1}%", metrics.storage_usage_percent);
            println!("load: {:.2}", metrics.load_average);
            println!("connections: {}", metrics.active_connections);
            println!(
                "network: in {} / out {}",
                format_size(metrics.network_in_bytes),
                format_size(metrics.network_out_bytes)
            );
            println!("sampled: {}", or_na(non_empty(&metrics.timestamp)));
        }
    }
    Ok(())
}

pub(crate) fn render_servers(servers: &[Server], format: OutputFormat) -> CliResult<()> {
    match format {
        OutputFormat::Json => print_json(servers)?,
        OutputFormat::Table => {
            println!(
                "{:<36} {:<20} {:<12} {:<12} {:>9} NODE",
                "ID", "NAME", "GAME", "STATUS", "PLAYERS"
            );
            for server in servers {
                let players = format!("{}/{}", server.player_count, server.max_players);
                println!(
                    "{:<36} {:<20} {:<12} {:<12} {:>9} {}",
                    server.id,
                    server.name,
                    server.game_type,
                    server.status.as_str(),
                    players,
                    server.node_id
                );
            }
        }
    }
    Ok(())
}

pub(crate) fn render_server(server: &Server, format: OutputFormat) -> CliResult<()> {
    match format {
        OutputFormat::Json => print_json(server)?,
        OutputFormat::Table => {
            println!("id: {}", server.id);
            println!("name: {}", server.name);
            println!("game: {}", GameType::from_id(&server.game_type).name);
            println!("status: {}", server.status.as_str());
            println!("node: {}", server.node_id);
            println!("address: {}:{}", server.ip_address, server.port);
            println!("version: {}", or_na(non_empty(&server.version)));
            println!("players: {}/{}", server.player_count, server.max_players);
            println!("cpu: {:.1}%", server.cpu_usage);
            println!("memory: {:.0} MB", server.memory_usage);
            println!("uptime: {}", format_uptime(server.uptime_seconds));
            println!("created: {}", or_na(non_empty(&server.created_at)));
        }
    }
    Ok(())
}

pub(crate) fn render_server_created(
    response: &CreateServerResponse,
    format: OutputFormat,
) -> CliResult<()> {
    match format {
        OutputFormat::Json => print_json(response)?,
        OutputFormat::Table => {
            println!("server: {}", response.server_id);
            if !response.message.is_empty() {
                println!("{}", response.message);
            }
            let placement = &response.server_info;
            if !placement.node_id.is_empty() {
                println!(
                    "placed on {} at {}:{}",
                    placement.node_id, placement.ip_address, placement.port
                );
            }
        }
    }
    Ok(())
}

pub(crate) fn render_server_metrics(
    metrics: &ServerMetrics,
    format: OutputFormat,
) -> CliResult<()> {
    match format {
        OutputFormat::Json => print_json(metrics)?,
        OutputFormat::Table => {
            println!("players: {}", metrics.player_count);
            if !metrics.online_players.is_empty() {
                println!("online: {}", metrics.online_players.join(", "));
            }
            println!("cpu: {:.1}%", metrics.cpu_usage_percent);
            println!("memory: {:.0} MB", metrics.memory_usage_mb);
            println!(
                "tick: {:.1} tps ({:.1} ms)",
                metrics.ticks_per_second, metrics.ms_per_tick
            );
            println!("ping: {:.0} ms", metrics.average_ping_ms);
            println!(
                "network: in {} / out {}",
                format_size(metrics.network_bytes_in),
                format_size(metrics.network_bytes_out)
            );
            println!("uptime: {}", format_uptime(metrics.uptime_seconds));
        }
    }
    Ok(())
}

pub(crate) fn render_logs(lines: &[String], format: OutputFormat) -> CliResult<()> {
    match format {
        OutputFormat::Json => print_json(&json!({ "logs": lines }))?,
        OutputFormat::Table => {
            for line in lines {
                println!("{line}");
            }
        }
    }
    Ok(())
}

pub(crate) fn render_game_types(games: &[GameType], format: OutputFormat) -> CliResult<()> {
    match format {
        OutputFormat::Json => print_json(games)?,
        OutputFormat::Table => {
            println!("{:<14} {:>6} NAME", "ID", "PORT");
            for game in games {
                let port = game
                    .default_port
                    .map_or_else(|| "-".to_string(), |port| port.to_string());
                println!("{:<14} {:>6} {}", game.id, port, game.name);
            }
        }
    }
    Ok(())
}

pub(crate) fn render_health(
    health: &HealthStatus,
    ready: &HealthStatus,
    format: OutputFormat,
) -> CliResult<()> {
    match format {
        OutputFormat::Json => print_json(&json!({
            "health": health.status,
            "ready": ready.status,
        }))?,
        OutputFormat::Table => {
            println!("health: {}", health.status);
            println!("ready: {}", ready.status);
        }
    }
    Ok(())
}

pub(crate) fn render_listing(
    current_path: &str,
    files: &[FileInfo],
    format: OutputFormat,
) -> CliResult<()> {
    match format {
        OutputFormat::Json => print_json(&json!({
            "current_path": current_path,
            "files": files,
        }))?,
        OutputFormat::Table => {
            println!("{current_path}");
            for line in listing_lines(files) {
                println!("{line}");
            }
        }
    }
    Ok(())
}

pub(crate) fn listing_lines(files: &[FileInfo]) -> Vec<String> {
    files
        .iter()
        .map(|file| {
            let size = if file.is_directory {
                "-".to_string()
            } else {
                format_size(file.size)
            };
            let name = if file.is_directory {
                format!("{}/", file.name)
            } else {
                file.name.clone()
            };
            format!(
                "{:<10} {:>10} {:<19} {}",
                or_na(non_empty(&file.permissions)),
                size,
                format_timestamp(file.modified_time),
                name
            )
        })
        .collect()
}

pub(crate) fn render_existence(
    path: &str,
    existence: FileExistence,
    format: OutputFormat,
) -> CliResult<()> {
    match format {
        OutputFormat::Json => print_json(&existence)?,
        OutputFormat::Table => {
            let kind = if !existence.exists {
                "missing"
            } else if existence.is_directory {
                "directory"
            } else {
                "file"
            };
            println!("{path}: {kind}");
        }
    }
    Ok(())
}

pub(crate) fn render_dashboard(summary: &DashboardSummary, format: OutputFormat) -> CliResult<()> {
    let cards = summary.cards();
    match format {
        OutputFormat::Json => {
            let cards: Vec<_> = cards
                .iter()
                .map(|card| {
                    json!({
                        "title": card.title,
                        "value": card.value,
                        "detail": card.detail,
                    })
                })
                .collect();
            print_json(&json!({
                "cards": cards,
                "recent_nodes": summary.recent_nodes,
                "recent_servers": summary.recent_servers,
            }))?;
        }
        OutputFormat::Table => {
            for card in &cards {
                println!("{:<14} {:>8}  {}", card.title, card.value, card.detail);
            }
            if !summary.recent_nodes.is_empty() {
                println!();
                println!("recent nodes:");
                for node in &summary.recent_nodes {
                    println!("  {:<20} {}", node.name, node.status.as_str());
                }
            }
            if !summary.recent_servers.is_empty() {
                println!();
                println!("recent servers:");
                for server in &summary.recent_servers {
                    println!(
                        "  {:<20} {:<12} {}",
                        server.name,
                        server.game_type,
                        server.status.as_str()
                    );
                }
            }
        }
    }
    Ok(())
}

pub(crate) fn render_settings(settings: &AppSettings, format: OutputFormat) -> CliResult<()> {
    match format {
        OutputFormat::Json => print_json(settings)?,
        OutputFormat::Table => {
            println!("api url: {}", settings.api_url);
            println!("refresh interval: {}s", settings.refresh_interval);
            println!("notifications: {}", on_off(settings.notifications));
            println!("dark mode: {}", on_off(settings.dark_mode));
        }
    }
    Ok(())
}

/// Toasts go to stderr so JSON on stdout stays parseable.
pub(crate) fn print_toasts(toasts: &[Toast]) {
    for toast in toasts {
        eprintln!("[{}] {}", toast.kind.label(), toast.message);
    }
}

pub(crate) fn format_uptime(seconds: u64) -> String {
    let days = seconds / 86_400;
    let hours = (seconds % 86_400) / 3_600;
    let minutes = (seconds % 3_600) / 60;
    if days > 0 {
        format!("{days}d {hours}h {minutes}m")
    } else if hours > 0 {
        format!("{hours}h {minutes}m")
    } else {
        format!("{minutes}m")
    }
}

fn node_address(node: &Node) -> String {
    format!("{}:{}", node.ip_address, node.port)
}

fn non_empty(value: &str) -> Option<&str> {
    Some(value).filter(|value| !value.is_empty())
}

const fn on_off(value: bool) -> &'static str {
    if value { "on" } else { "off" }
}
