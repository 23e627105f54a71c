//! Node collection store.

use std::collections::HashMap;

use fleetdeck_api_models::{
    CreateNodeRequest, Node, NodeAction, NodeMetrics, NodeStatus, UpdateNodeRequest,
};

use super::RequestState;
use crate::api::NodesApi;
use crate::error::ApiResult;

/// Last fetched nodes, selection, and per-node metrics.
#[derive(Debug)]
pub struct NodesStore {
    api: NodesApi,
    nodes: Vec<Node>,
    selected: Option<String>,
    metrics: HashMap<String, NodeMetrics>,
    request: RequestState,
}

impl NodesStore {
    /// Empty store backed by `api`.
    #[must_use]
    pub fn new(api: NodesApi) -> Self {
        Self {
            api,
            nodes: Vec::new(),
            selected: None,
            metrics: HashMap::new(),
            request: RequestState::default(),
        }
    }

    /// Nodes from the last successful fetch plus local edits.
    #[must_use]
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Look up a node by id.
    #[must_use]
    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|node| node.id == id)
    }

    /// Currently selected node id.
    #[must_use]
    pub fn selected_id(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Currently selected node.
    #[must_use]
    pub fn selected(&self) -> Option<&Node> {
        self.selected.as_deref().and_then(|id| self.node(id))
    }

    /// Cached metrics for `id`.
    #[must_use]
    pub fn metrics(&self, id: &str) -> Option<&NodeMetrics> {
        self.metrics.get(id)
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
    pub async fn fetch_nodes(&mut self, status: Option<NodeStatus>) -> ApiResult<()> {
        self.request.begin();
        let result = self.api.list(status).await;
        self.request.finish("nodes", &result);
        self.nodes = result?;
        Ok(())
    }

    /// Refresh the cached metrics for one node. Failures are only logged.
    pub async fn fetch_node_metrics(&mut self, id: &str) {
        match self.api.metrics(id).await {
            Ok(metrics) => {
                self.metrics.insert(id.to_string(), metrics);
            }
            Err(err) => {
                tracing::warn!(node_id = id, error = %err.user_message(), "node metrics unavailable");
            }
        }
    }

    /// Register a node and append it.
    ///
    /// # Errors
    /// Returns the API failure after recording it.
    pub async fn create_node(&mut self, request: &CreateNodeRequest) -> ApiResult<Node> {
        self.request.begin();
        let result = self.api.create(request).await;
        self.request.finish("nodes", &result);
        let node = result?;
        tracing::info!(node_id = %node.id, name = %node.name, "node registered");
        self.add_node(node.clone());
        Ok(node)
    }

    /// Update a node and replace the local copy.
    ///
    /// # Errors
    /// Returns the API failure after recording it.
    pub async fn update_node(&mut self, id: &str, request: &UpdateNodeRequest) -> ApiResult<Node> {
        self.request.begin();
        let result = self.api.update(id, request).await;
        self.request.finish("nodes", &result);
        let node = result?;
        tracing::info!(node_id = %node.id, "node updated");
        self.replace_node(node.clone());
        Ok(node)
    }

    /// Deregister a node and drop it locally.
    ///
    /// # Errors
    /// Returns the API failure after recording it.
    pub async fn delete_node(&mut self, id: &str) -> ApiResult<()> {
        self.request.begin();
        let result = self.api.delete(id).await;
        self.request.finish("nodes", &result);
        result?;
        tracing::info!(node_id = id, "node deleted");
        self.remove_node(id);
        Ok(())
    }

    /// Trigger an agent action.
    ///
    /// # Errors
    /// Returns the API failure after recording it.
    pub async fn run_action(&mut self, id: &str, action: NodeAction) -> ApiResult<()> {
        self.request.begin();
        let result = self.api.action(id, action).await;
        self.request.finish("nodes", &result);
        result?;
        tracing::info!(node_id = id, action = action.as_str(), "node action requested");
        Ok(())
    }

    /// Select a node (or clear the selection).
    pub fn select_node(&mut self, id: Option<&str>) {
        self.selected = id.map(str::to_string);
    }

    /// Append a node without a remote call.
    pub fn add_node(&mut self, node: Node) {
        self.nodes.push(node);
    }

    /// Replace the node with the same id, if present.
    pub fn replace_node(&mut self, node: Node) {
        if let Some(existing) = self.nodes.iter_mut().find(|existing| existing.id == node.id) {
            *existing = node;
        }
    }

    /// Drop a node, clearing the selection when it pointed at it.
    pub fn remove_node(&mut self, id: &str) {
        self.nodes.retain(|node| node.id != id);
        self.metrics.remove(id);
        if self.selected.as_deref() == Some(id) {
            self.selected = None;
        }
    }

    /// Forget the last error.
    pub fn clear_error(&mut self) {
        self.request.clear_error();
    }

    /// Nodes with `status`, or all nodes when `None`.
    #[must_use]
    pub fn filtered(&self, status: Option<NodeStatus>) -> Vec<&Node> {
        self.nodes
            .iter()
            .filter(|node| status.is_none_or(|status| node.status == status))
            .collect()
    }

    /// Number of online nodes.
    #[must_use]
    pub fn online_count(&self) -> usize {
        self.nodes
            .iter()
            .filter(|node| node.status == NodeStatus::Online)
            .count()
    }
}
