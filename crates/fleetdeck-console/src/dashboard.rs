//! Dashboard stat cards derived from the collection stores.

use fleetdeck_api_models::{ClusterMetrics, Node, Server};

use crate::format::NOT_AVAILABLE;
use crate::store::{NodesStore, ServersStore};

/// Number of nodes/servers listed under "recent".
pub const RECENT_LIMIT: usize = 5;

/// One headline figure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatCard {
    /// Card heading.
    pub title: &'static str,
    /// Headline value.
    pub value: String,
    /// Secondary line.
    pub detail: String,
}

/// Everything the dashboard view renders.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSummary {
    /// Registered nodes.
    pub total_nodes: usize,
    /// Nodes reporting `online`.
    pub online_nodes: usize,
    /// Known servers.
    pub total_servers: usize,
    /// Servers reporting `running`.
    pub running_servers: usize,
    /// Cluster CPU usage, rounded, or `N/A`.
    pub cpu_usage: String,
    /// Cluster memory usage, rounded, or `N/A`.
    pub memory_usage: String,
    /// First nodes of the listing.
    pub recent_nodes: Vec<Node>,
    /// First servers of the listing.
    pub recent_servers: Vec<Server>,
}

fn percent(value: Option<f64>) -> String {
    value.map_or_else(|| NOT_AVAILABLE.to_string(), |usage| format!("{usage:.0}%"))
}

impl DashboardSummary {
    /// Summarize the stores plus optional cluster aggregates.
    #[must_use]
    pub fn from_stores(
        nodes: &NodesStore,
        servers: &ServersStore,
        cluster: Option<&ClusterMetrics>,
    ) -> Self {
        Self {
            total_nodes: nodes.nodes().len(),
            online_nodes: nodes.online_count(),
            total_servers: servers.servers().len(),
            running_servers: servers.running_count(),
            cpu_usage: percent(cluster.map(|metrics| metrics.used_cpu_cores.round())),
            memory_usage: percent(cluster.map(|metrics| metrics.used_memory_mb.round())),
            recent_nodes: nodes.nodes().iter().take(RECENT_LIMIT).cloned().collect(),
            recent_servers: servers.servers().iter().take(RECENT_LIMIT).cloned().collect(),
        }
    }

    /// The four headline cards in display order.
    #[must_use]
    pub fn cards(&self) -> Vec<StatCard> {
        vec![
            StatCard {
                title: "Total Nodes",
                value: self.total_nodes.to_string(),
                detail: format!("{} online", self.online_nodes),
            },
            StatCard {
                title: "Total Servers",
                value: self.total_servers.to_string(),
                detail: format!("{} running", self.running_servers),
            },
            StatCard {
                title: "CPU Usage",
                value: self.cpu_usage.clone(),
                detail: "Cluster average".to_string(),
            },
            StatCard {
                title: "Memory Usage",
                value: self.memory_usage.clone(),
                detail: "Cluster average".to_string(),
            },
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_rounds_or_falls_back() {
        assert_eq!(percent(Some(42.6_f64.round())), "43%");
        assert_eq!(percent(None), "N/A");
    }
}
