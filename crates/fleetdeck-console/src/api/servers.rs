//! Client for `/api/v1/servers`.

use fleetdeck_api_models::{
    ActionRequest, CreateServerRequest, CreateServerResponse, Server, ServerAction, ServerList,
    ServerLogs, ServerMetrics, ServerMetricsEnvelope, ServerStatus,
};
use serde_json::Value;

use super::{flag, with_query};
use crate::error::ApiResult;
use crate::facade::Facade;

const SERVERS: &str = "/api/v1/servers";

/// Number of log lines requested when the caller does not choose.
pub const DEFAULT_LOG_TAIL: u32 = 100;

/// Filters accepted by the server listing; also applied locally by the store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServerFilters {
    /// Only servers in this state.
    pub status: Option<ServerStatus>,
    /// Only servers hosted on this node.
    pub node_id: Option<String>,
    /// Only servers of this game type.
    pub game_type: Option<String>,
}

impl ServerFilters {
    /// Whether `server` passes every filter that is set.
    #[must_use]
    pub fn matches(&self, server: &Server) -> bool {
        self.status.is_none_or(|status| server.status == status)
            && self
                .node_id
                .as_deref()
                .is_none_or(|node_id| server.node_id == node_id)
            && self
                .game_type
                .as_deref()
                .is_none_or(|game_type| server.game_type == game_type)
    }

    fn query_pairs(&self) -> Vec<(&str, &str)> {
        let mut pairs = Vec::new();
        if let Some(status) = self.status {
            pairs.push(("status", status.as_str()));
        }
        if let Some(node_id) = &self.node_id {
            pairs.push(("node_id", node_id.as_str()));
        }
        if let Some(game_type) = &self.game_type {
            pairs.push(("game_type", game_type.as_str()));
        }
        pairs
    }
}

/// Game-server instance client.
#[derive(Debug, Clone)]
pub struct ServersApi {
    facade: Facade,
}

impl ServersApi {
    /// Client over `facade`.
    #[must_use]
    pub const fn new(facade: Facade) -> Self {
        Self { facade }
    }

    /// List servers matching `filters`.
    ///
    /// # Errors
    /// Returns bridge or decode failures.
    pub async fn list(&self, filters: &ServerFilters) -> ApiResult<Vec<Server>> {
        let endpoint = with_query(SERVERS, &filters.query_pairs());
        let list: ServerList = self.facade.get_json(&endpoint).await?;
        Ok(list.servers)
    }

    /// Fetch one server.
    ///
    /// # Errors
    /// Returns bridge or decode failures.
    pub async fn get(&self, id: &str) -> ApiResult<Server> {
        self.facade.get_json(&format!("{SERVERS}/{id}")).await
    }

    /// Provision a server.
    ///
    /// # Errors
    /// Returns bridge or decode failures.
    pub async fn create(&self, request: &CreateServerRequest) -> ApiResult<CreateServerResponse> {
        self.facade.post_json(SERVERS, request).await
    }

    /// Remove a server, optionally archiving its data first.
    ///
    /// # Errors
    /// Returns bridge failures.
    pub async fn delete(&self, id: &str, backup: bool) -> ApiResult<()> {
        let endpoint = with_query(&format!("{SERVERS}/{id}"), &[("backup", flag(backup))]);
        self.facade.delete(&endpoint).await?;
        Ok(())
    }

    /// Trigger a lifecycle action.
    ///
    /// # Errors
    /// Returns bridge failures.
    pub async fn action(&self, id: &str, action: ServerAction) -> ApiResult<()> {
        let _: Value = self
            .facade
            .post_json(&format!("{SERVERS}/{id}/action"), &ActionRequest { action })
            .await?;
        Ok(())
    }

    /// Last `tail` log lines.
    ///
    /// # Errors
    /// Returns bridge or decode failures.
    pub async fn logs(&self, id: &str, tail: u32) -> ApiResult<Vec<String>> {
        let tail = tail.to_string();
        let endpoint = with_query(&format!("{SERVERS}/{id}/logs"), &[("tail", tail.as_str())]);
        let logs: ServerLogs = self.facade.get_json(&endpoint).await?;
        Ok(logs.logs)
    }

    /// Latest game metrics sample.
    ///
    /// # Errors
    /// Returns bridge or decode failures.
    pub async fn metrics(&self, id: &str) -> ApiResult<ServerMetrics> {
        let envelope: ServerMetricsEnvelope = self
            .facade
            .get_json(&format!("{SERVERS}/{id}/metrics"))
            .await?;
        Ok(envelope.metrics)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn server(node_id: &str, status: ServerStatus) -> Server {
        Server {
            node_id: node_id.into(),
            status,
            game_type: "valheim".into(),
            ..Server::default()
        }
    }

    #[test]
    fn filters_match_every_set_field() {
        let filters = ServerFilters {
            status: Some(ServerStatus::Running),
            node_id: Some("n1".into()),
            game_type: None,
        };
        assert!(filters.matches(&server("n1", ServerStatus::Running)));
        assert!(!filters.matches(&server("n2", ServerStatus::Running)));
        assert!(!filters.matches(&server("n1", ServerStatus::Stopped)));
        assert!(ServerFilters::default().matches(&server("n2", ServerStatus::Error)));
    }

    #[test]
    fn query_pairs_skip_unset_filters() {
        let filters = ServerFilters {
            game_type: Some("rust".into()),
            ..ServerFilters::default()
        };
        assert_eq!(filters.query_pairs(), vec![("game_type", "rust")]);
    }
}
