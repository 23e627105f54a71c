//! Client for `/api/v1/nodes`.

use fleetdeck_api_models::{
    ActionRequest, CreateNodeRequest, Node, NodeAction, NodeEnvelope, NodeList, NodeMetrics,
    NodeMetricsEnvelope, NodeStatus, UpdateNodeRequest,
};
use serde_json::Value;

use super::with_query;
use crate::error::ApiResult;
use crate::facade::Facade;

const NODES: &str = "/api/v1/nodes";

/// Node registry client.
#[derive(Debug, Clone)]
pub struct NodesApi {
    facade: Facade,
}

impl NodesApi {
    /// Client over `facade`.
    #[must_use]
    pub const fn new(facade: Facade) -> Self {
        Self { facade }
    }

    /// List nodes, optionally filtered by status.
    ///
    /// # Errors
    /// Returns bridge or decode failures.
    pub async fn list(&self, status: Option<NodeStatus>) -> ApiResult<Vec<Node>> {
        let endpoint = match status {
            Some(status) => with_query(NODES, &[("status", status.as_str())]),
            None => NODES.to_string(),
        };
        let list: NodeList = self.facade.get_json(&endpoint).await?;
        Ok(list.nodes)
    }

    /// Fetch one node.
    ///
    /// # Errors
    /// Returns bridge or decode failures.
    pub async fn get(&self, id: &str) -> ApiResult<Node> {
        self.facade.get_json(&format!("{NODES}/{id}")).await
    }

    /// Register a node.
    ///
    /// # Errors
    /// Returns bridge or decode failures.
    pub async fn create(&self, request: &CreateNodeRequest) -> ApiResult<Node> {
        let envelope: NodeEnvelope = self.facade.post_json(NODES, request).await?;
        Ok(envelope.node)
    }

    /// Apply a partial update.
    ///
    /// # Errors
    /// Returns bridge or decode failures.
    pub async fn update(&self, id: &str, request: &UpdateNodeRequest) -> ApiResult<Node> {
        let envelope: NodeEnvelope = self
            .facade
            .put_json(&format!("{NODES}/{id}"), request)
            .await?;
        Ok(envelope.node)
    }

    /// Deregister a node.
    ///
    /// # Errors
    /// Returns bridge failures.
    pub async fn delete(&self, id: &str) -> ApiResult<()> {
        self.facade.delete(&format!("{NODES}/{id}")).await?;
        Ok(())
    }

    /// Trigger an operational action on the node agent.
    ///
    /// # Errors
    /// Returns bridge failures.
    pub async fn action(&self, id: &str, action: NodeAction) -> ApiResult<()> {
        let _: Value = self
            .facade
            .post_json(&format!("{NODES}/{id}/action"), &ActionRequest { action })
            .await?;
        Ok(())
    }

    /// Latest resource usage sample.
    ///
    /// # Errors
    /// Returns bridge or decode failures.
    pub async fn metrics(&self, id: &str) -> ApiResult<NodeMetrics> {
        let envelope: NodeMetricsEnvelope =
            self.facade.get_json(&format!("{NODES}/{id}/metrics")).await?;
        Ok(envelope.metrics)
    }
}
