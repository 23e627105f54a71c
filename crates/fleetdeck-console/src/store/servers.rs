//! Game-server collection store.

use std::collections::HashMap;

use fleetdeck_api_models::{
    CreateServerRequest, CreateServerResponse, Server, ServerAction, ServerMetrics, ServerStatus,
};

use super::RequestState;
use crate::api::{ServerFilters, ServersApi};
use crate::error::ApiResult;

/// Last fetched servers, selection, metrics, and log tails.
#[derive(Debug)]
pub struct ServersStore {
    api: ServersApi,
    servers: Vec<Server>,
    selected: Option<String>,
    metrics: HashMap<String, ServerMetrics>,
    logs: HashMap<String, Vec<String>>,
    request: RequestState,
}

impl ServersStore {
    /// Empty store backed by `api`.
    #[must_use]
    pub fn new(api: ServersApi) -> Self {
        Self {
            api,
            servers: Vec::new(),
            selected: None,
            metrics: HashMap::new(),
            logs: HashMap::new(),
            request: RequestState::default(),
        }
    }

    /// Servers from the last successful fetch plus local edits.
    #[must_use]
    pub fn servers(&self) -> &[Server] {
        &self.servers
    }

    /// Look up a server by id.
    #[must_use]
    pub fn server(&self, id: &str) -> Option<&Server> {
        self.servers.iter().find(|server| server.id == id)
    }

    /// Currently selected server id.
    #[must_use]
    pub fn selected_id(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Cached metrics for `id`.
    #[must_use]
    pub fn metrics(&self, id: &str) -> Option<&ServerMetrics> {
        self.metrics.get(id)
    }

    /// Cached log tail for `id`.
    #[must_use]
    pub fn logs(&self, id: &str) -> Option<&[String]> {
        self.logs.get(id).map(Vec::as_slice)
    }

    /// Whether a remote call is in flight.
    #[must_use]
    pub const fn loading(&self) -> bool {
        self.request.loading
    }

    /// Message from the last failed call.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.request.error.as_deref()
    }

    /// Replace the collection with the backend's listing.
    ///
    /// # Errors
    /// Returns the API failure after recording it.
    pub async fn fetch_servers(&mut self, filters: &ServerFilters) -> ApiResult<()> {
        self.request.begin();
        let result = self.api.list(filters).await;
        self.request.finish("servers", &result);
        self.servers = result?;
        Ok(())
    }

    /// Refresh cached metrics for one server. Failures are only logged.
    pub async fn fetch_server_metrics(&mut self, id: &str) {
        match self.api.metrics(id).await {
            Ok(metrics) => {
                self.metrics.insert(id.to_string(), metrics);
            }
            Err(err) => {
                tracing::warn!(server_id = id, error = %err.user_message(), "server metrics unavailable");
            }
        }
    }

    /// Refresh the cached log tail for one server. Failures are only logged.
    pub async fn fetch_server_logs(&mut self, id: &str, tail: u32) {
        match self.api.logs(id, tail).await {
            Ok(lines) => {
                self.logs.insert(id.to_string(), lines);
            }
            Err(err) => {
                tracing::warn!(server_id = id, error = %err.user_message(), "server logs unavailable");
            }
        }
    }

    /// Provision a server. The new instance appears on the next fetch.
    ///
    /// # Errors
    /// Returns the API failure after recording it.
    pub async fn create_server(
        &mut self,
        request: &CreateServerRequest,
    ) -> ApiResult<CreateServerResponse> {
        self.request.begin();
        let result = self.api.create(request).await;
        self.request.finish("servers", &result);
        let response = result?;
        tracing::info!(
            server_id = %response.server_id,
            node_id = %request.node_id,
            game_type = %request.game_type,
            "server provisioning requested"
        );
        Ok(response)
    }

    /// Remove a server and drop it locally.
    ///
    /// # Errors
    /// Returns the API failure after recording it.
    pub async fn delete_server(&mut self, id: &str, backup: bool) -> ApiResult<()> {
        self.request.begin();
        let result = self.api.delete(id, backup).await;
        self.request.finish("servers", &result);
        result?;
        tracing::info!(server_id = id, backup, "server deleted");
        self.remove_server(id);
        Ok(())
    }

    /// Trigger a lifecycle action.
    ///
    /// # Errors
    /// Returns the API failure after recording it.
    pub async fn run_action(&mut self, id: &str, action: ServerAction) -> ApiResult<()> {
        self.request.begin();
        let result = self.api.action(id, action).await;
        self.request.finish("servers", &result);
        result?;
        tracing::info!(server_id = id, action = action.as_str(), "server action requested");
        Ok(())
    }

    /// Select a server (or clear the selection).
    pub fn select_server(&mut self, id: Option<&str>) {
        self.selected = id.map(str::to_string);
    }

    /// Append a server without a remote call.
    pub fn add_server(&mut self, server: Server) {
        self.servers.push(server);
    }

    /// Replace the server with the same id, if present.
    pub fn replace_server(&mut self, server: Server) {
        if let Some(existing) = self
            .servers
            .iter_mut()
            .find(|existing| existing.id == server.id)
        {
            *existing = server;
        }
    }

    /// Drop a server, clearing the selection when it pointed at it.
    pub fn remove_server(&mut self, id: &str) {
        self.servers.retain(|server| server.id != id);
        self.metrics.remove(id);
        self.logs.remove(id);
        if self.selected.as_deref() == Some(id) {
            self.selected = None;
        }
    }

    /// Forget the last error.
    pub fn clear_error(&mut self) {
        self.request.clear_error();
    }

    /// Servers passing `filters`.
    #[must_use]
    pub fn filtered(&self, filters: &ServerFilters) -> Vec<&Server> {
        self.servers
            .iter()
            .filter(|server| filters.matches(server))
            .collect()
    }

    /// Number of running servers.
    #[must_use]
    pub fn running_count(&self) -> usize {
        self.servers
            .iter()
            .filter(|server| server.status == ServerStatus::Running)
            .count()
    }
}
