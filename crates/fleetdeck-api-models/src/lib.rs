#![forbid(unsafe_code)]
#![deny(unused_must_use, rustdoc::broken_intra_doc_links, rustdoc::bare_urls)]
#![warn(
    missing_docs,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::nursery
)]
//! Shared HTTP DTOs for the Fleetdeck backend API.
//!
//! The console core and the CLI both encode requests and decode responses
//! through these types so the wire contract lives in one place. Response
//! structs default every field the backend may omit; the backend is the
//! source of truth and older agents report a subset of the fields.

pub mod files;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub use files::{
    Ack, CopyRequest, Envelope, FileContent, FileExistence, FileInfo, FileListing, MkdirRequest,
    MoveRequest, PathRequest, RenameRequest, WriteFileRequest, ZipRequest,
};

/// Coarse node availability reported by the backend.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum NodeStatus {
    /// Agent is reachable and heartbeating.
    Online,
    /// Agent missed its heartbeat window.
    Offline,
    /// Node was drained by an operator.
    Maintenance,
    /// Status was not reported or is not recognised.
    #[default]
    #[serde(other)]
    Unknown,
}

impl NodeStatus {
    /// Wire label for the status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Online => "online",
            Self::Offline => "offline",
            Self::Maintenance => "maintenance",
            Self::Unknown => "unknown",
        }
    }
}

/// Registered host capable of running game-server instances.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Node {
    /// Backend-assigned identifier.
    pub id: String,
    /// Operator-facing display name.
    pub name: String,
    /// DNS name of the host.
    pub hostname: String,
    /// Address the agent listens on.
    pub ip_address: String,
    /// Agent port.
    pub port: u16,
    /// Availability status.
    pub status: NodeStatus,
    /// Game types this node may host.
    pub game_types: Vec<String>,
    /// Primary game type for single-purpose nodes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub game_type: Option<String>,
    /// Total CPU cores.
    pub total_cpu_cores: u32,
    /// Total memory in MiB.
    pub total_memory_mb: u64,
    /// Total storage in MiB.
    pub total_storage_mb: u64,
    /// Unallocated CPU cores.
    pub available_cpu_cores: u32,
    /// Unallocated memory in MiB.
    pub available_memory_mb: u64,
    /// Unallocated storage in MiB.
    pub available_storage_mb: u64,
    /// Host operating system version.
    pub os_version: String,
    /// Agent build version.
    pub agent_version: String,
    /// Game image version deployed on the node.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// Heartbeat interval in seconds.
    pub heartbeat_interval: u32,
    /// RFC 3339 timestamp of the last heartbeat.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_heartbeat: Option<String>,
    /// Whether the node finished its first-time initialization.
    pub initialized: bool,
    /// RFC 3339 creation timestamp.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    /// RFC 3339 last-update timestamp.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    /// RFC 3339 timestamp of the last agent start.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub started_at: Option<String>,
}

/// Payload for registering a node.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreateNodeRequest {
    /// Display name.
    pub name: String,
    /// DNS name of the host.
    pub hostname: String,
    /// Address the agent listens on.
    pub ip_address: String,
    /// Agent port.
    pub port: u16,
    /// Game types this node may host.
    pub game_types: Vec<String>,
    /// Total CPU cores.
    pub total_cpu_cores: u32,
    /// Total memory in MiB.
    pub total_memory_mb: u64,
    /// Total storage in MiB.
    pub total_storage_mb: u64,
    /// Host operating system version.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub os_version: Option<String>,
}

impl Default for CreateNodeRequest {
    fn default() -> Self {
        Self {
            name: String::new(),
            hostname: String::new(),
            ip_address: String::new(),
            port: 50051,
            game_types: Vec::new(),
            total_cpu_cores: 4,
            total_memory_mb: 8192,
            total_storage_mb: 102_400,
            os_version: None,
        }
    }
}

/// Partial update for an existing node; unset fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct UpdateNodeRequest {
    /// New display name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New hostname.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hostname: Option<String>,
    /// New agent address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip_address: Option<String>,
    /// New agent port.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
    /// Replacement game type list.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub game_types: Option<Vec<String>>,
    /// New CPU core total.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_cpu_cores: Option<u32>,
    /// New memory total in MiB.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_memory_mb: Option<u64>,
    /// New storage total in MiB.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_storage_mb: Option<u64>,
    /// New operating system version.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub os_version: Option<String>,
    /// New maintenance/availability status.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<NodeStatus>,
}

impl UpdateNodeRequest {
    /// Returns `true` when no field would be changed.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.hostname.is_none()
            && self.ip_address.is_none()
            && self.port.is_none()
            && self.game_types.is_none()
            && self.total_cpu_cores.is_none()
            && self.total_memory_mb.is_none()
            && self.total_storage_mb.is_none()
            && self.os_version.is_none()
            && self.status.is_none()
    }
}

/// Operational actions accepted by `/api/v1/nodes/{id}/action`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum NodeAction {
    /// Restart the agent.
    Restart,
    /// Pull and roll out the latest game image.
    UpdateImage,
    /// Run first-time node initialization.
    Initialize,
}

impl NodeAction {
    /// Wire label for the action.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Restart => "restart",
            Self::UpdateImage => "update-image",
            Self::Initialize => "initialize",
        }
    }
}

/// Body wrapper shared by node and server action endpoints.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ActionRequest<A> {
    /// Requested action.
    pub action: A,
}

/// `GET /api/v1/nodes` response.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct NodeList {
    /// Nodes matching the query.
    pub nodes: Vec<Node>,
}

/// `POST`/`PUT` node response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NodeEnvelope {
    /// The created or updated node.
    pub node: Node,
}

/// Point-in-time resource usage for a node.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct NodeMetrics {
    /// Node the sample belongs to.
    pub node_id: String,
    /// CPU utilisation in percent.
    pub cpu_usage_percent: f64,
    /// Memory utilisation in percent.
    pub memory_usage_percent: f64,
    /// Storage utilisation in percent.
    pub storage_usage_percent: f64,
    /// Bytes received since agent start.
    pub network_in_bytes: u64,
    /// Bytes sent since agent start.
    pub network_out_bytes: u64,
    /// Open player connections.
    pub active_connections: u32,
    /// One-minute load average.
    pub load_average: f64,
    /// RFC 3339 sample timestamp.
    pub timestamp: String,
}

/// `GET /api/v1/nodes/{id}/metrics` response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NodeMetricsEnvelope {
    /// Latest metrics sample.
    pub metrics: NodeMetrics,
}

/// Lifecycle state of a game-server instance.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ServerStatus {
    /// Game files are being installed.
    Installing,
    /// Process is not running.
    Stopped,
    /// Process is up and accepting players.
    Running,
    /// Last operation failed.
    Error,
    /// Game files are being updated.
    Updating,
    /// Process is booting.
    Starting,
    /// Process is shutting down.
    Stopping,
    /// World data is being archived.
    BackingUp,
    /// Status was not reported or is not recognised.
    #[default]
    #[serde(other)]
    Unknown,
}

impl ServerStatus {
    /// Wire label for the status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Installing => "installing",
            Self::Stopped => "stopped",
            Self::Running => "running",
            Self::Error => "error",
            Self::Updating => "updating",
            Self::Starting => "starting",
            Self::Stopping => "stopping",
            Self::BackingUp => "backing_up",
            Self::Unknown => "unknown",
        }
    }
}

/// Game-server instance hosted on a node.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Server {
    /// Backend-assigned identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Hosting node.
    pub node_id: String,
    /// Game type identifier (for example `minecraft`).
    pub game_type: String,
    /// Agent-local instance identifier.
    pub instance_id: String,
    /// Lifecycle state.
    pub status: ServerStatus,
    /// Game version.
    pub version: String,
    /// Player slot count.
    pub max_players: u32,
    /// Game port.
    pub port: u16,
    /// Public address.
    pub ip_address: String,
    /// Connected players.
    pub player_count: u32,
    /// CPU usage in percent.
    pub cpu_usage: f64,
    /// Memory usage in MiB.
    pub memory_usage: f64,
    /// Seconds since the process started.
    pub uptime_seconds: u64,
    /// RFC 3339 creation timestamp.
    pub created_at: String,
    /// RFC 3339 last-update timestamp.
    pub updated_at: String,
}

/// `GET /api/v1/servers` response.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ServerList {
    /// Servers matching the query.
    pub servers: Vec<Server>,
}

/// `PUT /api/v1/servers/{id}` response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServerEnvelope {
    /// The updated server.
    pub server: Server,
}

/// Game configuration supplied when provisioning a server.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ServerConfig {
    /// Display name.
    pub name: String,
    /// Game version (`latest` by default).
    pub version: String,
    /// Player slot count.
    pub max_players: u32,
    /// Free-form game settings.
    #[serde(default)]
    pub settings: BTreeMap<String, String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            name: String::new(),
            version: "latest".to_string(),
            max_players: 20,
            settings: BTreeMap::new(),
        }
    }
}

/// Minimum resources a node must offer to host the server.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ServerRequirements {
    /// Minimum CPU cores.
    pub min_cpu_cores: u32,
    /// Minimum memory in MiB.
    pub min_memory_mb: u64,
    /// Minimum storage in MiB.
    pub min_storage_mb: u64,
}

impl Default for ServerRequirements {
    fn default() -> Self {
        Self {
            min_cpu_cores: 1,
            min_memory_mb: 2048,
            min_storage_mb: 10_240,
        }
    }
}

/// Payload for provisioning a server.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreateServerRequest {
    /// Target node.
    pub node_id: String,
    /// Game type identifier.
    pub game_type: String,
    /// Game configuration.
    pub config: ServerConfig,
    /// Resource requirements.
    pub requirements: ServerRequirements,
}

/// Placement details returned after provisioning.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ServerPlacement {
    /// New server identifier.
    pub server_id: String,
    /// Node the server landed on.
    pub node_id: String,
    /// Assigned game port.
    pub port: u16,
    /// Public address.
    pub ip_address: String,
}

/// `POST /api/v1/servers` response.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CreateServerResponse {
    /// Whether provisioning was accepted.
    pub success: bool,
    /// New server identifier.
    pub server_id: String,
    /// Human-readable outcome.
    pub message: String,
    /// Placement details.
    pub server_info: ServerPlacement,
}

/// Lifecycle actions accepted by `/api/v1/servers/{id}/action`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ServerAction {
    /// Start the process.
    Start,
    /// Stop the process.
    Stop,
    /// Restart the process.
    Restart,
    /// Wipe and reinstall game files.
    Reinstall,
    /// Archive world data.
    Backup,
}

impl ServerAction {
    /// Wire label for the action.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Stop => "stop",
            Self::Restart => "restart",
            Self::Reinstall => "reinstall",
            Self::Backup => "backup",
        }
    }
}

/// Point-in-time game metrics for a server.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ServerMetrics {
    /// Server the sample belongs to.
    pub server_id: String,
    /// Connected players.
    pub player_count: u32,
    /// Names of connected players.
    pub online_players: Vec<String>,
    /// CPU utilisation in percent.
    pub cpu_usage_percent: f64,
    /// Resident memory in MiB.
    pub memory_usage_mb: f64,
    /// Simulation ticks per second.
    pub ticks_per_second: f64,
    /// Milliseconds spent per tick.
    pub ms_per_tick: f64,
    /// Bytes received.
    pub network_bytes_in: u64,
    /// Bytes sent.
    pub network_bytes_out: u64,
    /// Seconds since the process started.
    pub uptime_seconds: u64,
    /// Mean player ping.
    pub average_ping_ms: f64,
    /// RFC 3339 sample timestamp.
    pub timestamp: String,
}

/// `GET /api/v1/servers/{id}/metrics` response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServerMetricsEnvelope {
    /// Latest metrics sample.
    pub metrics: ServerMetrics,
}

/// `GET /api/v1/servers/{id}/logs` response.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ServerLogs {
    /// Log lines, oldest first.
    pub logs: Vec<String>,
}

/// Aggregate node capacity across the cluster.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ClusterMetrics {
    /// Registered nodes.
    pub total_nodes: u32,
    /// Nodes currently online.
    pub online_nodes: u32,
    /// Nodes currently offline.
    pub offline_nodes: u32,
    /// CPU cores across all nodes.
    pub total_cpu_cores: u32,
    /// CPU usage reported by the backend.
    pub used_cpu_cores: f64,
    /// Memory across all nodes in MiB.
    pub total_memory_mb: u64,
    /// Memory usage reported by the backend.
    pub used_memory_mb: f64,
}

/// Server counts grouped by lifecycle state.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ServerCounts {
    /// Running servers.
    pub running: u32,
    /// Stopped servers.
    pub stopped: u32,
    /// Installing servers.
    pub installing: u32,
    /// Servers in an error state.
    pub error: u32,
    /// All servers.
    pub total: u32,
}

/// `GET /api/v1/metrics` response.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ClusterSnapshot {
    /// Node aggregates.
    pub nodes: ClusterMetrics,
    /// Server aggregates.
    pub servers: ServerCounts,
}

/// Game type supported by the fleet.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GameType {
    /// Stable identifier (`minecraft`, `valheim`, ...).
    pub id: String,
    /// Display name.
    pub name: String,
    /// Conventional game port.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_port: Option<u16>,
}

impl GameType {
    fn known(id: &str, name: &str, default_port: u16) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            default_port: Some(default_port),
        }
    }

    /// Catalog used as form defaults when the backend has not been queried.
    #[must_use]
    pub fn builtin() -> Vec<Self> {
        vec![
            Self::known("minecraft", "Minecraft", 25565),
            Self::known("rust", "Rust", 28015),
            Self::known("csgo", "CS:GO", 27015),
            Self::known("ark", "ARK: Survival Evolved", 7777),
            Self::known("valheim", "Valheim", 2456),
            Self::known("terraria", "Terraria", 7777),
            Self::known("seven_days", "7 Days to Die", 26900),
            Self::known("unturned", "Unturned", 27015),
        ]
    }

    /// Resolve a bare identifier, borrowing the display name and port from
    /// the built-in catalog when it is a known game.
    #[must_use]
    pub fn from_id(id: &str) -> Self {
        Self::builtin()
            .into_iter()
            .find(|known| known.id == id)
            .unwrap_or_else(|| Self {
                id: id.to_string(),
                name: id.to_string(),
                default_port: None,
            })
    }
}

/// One entry of the game type listing; agents report either bare ids or
/// full objects.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum GameTypeEntry {
    /// Full description.
    Detailed(GameType),
    /// Bare identifier.
    Id(String),
}

impl From<GameTypeEntry> for GameType {
    fn from(value: GameTypeEntry) -> Self {
        match value {
            GameTypeEntry::Detailed(game) => game,
            GameTypeEntry::Id(id) => Self::from_id(&id),
        }
    }
}

/// `GET /api/v1/game-types` response, wrapped or bare.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum GameTypeList {
    /// `{ "game_types": [...] }`
    Wrapped {
        /// Listed game types.
        game_types: Vec<GameTypeEntry>,
    },
    /// `[...]`
    Bare(Vec<GameTypeEntry>),
}

impl GameTypeList {
    /// Flatten into resolved game types.
    #[must_use]
    pub fn into_game_types(self) -> Vec<GameType> {
        let entries = match self {
            Self::Wrapped { game_types } => game_types,
            Self::Bare(entries) => entries,
        };
        entries.into_iter().map(GameType::from).collect()
    }
}

/// `GET /health` and `GET /ready` response.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct HealthStatus {
    /// Backend-reported status label.
    pub status: String,
}
