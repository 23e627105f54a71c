//! Client for cluster-wide aggregates.

use fleetdeck_api_models::ClusterSnapshot;

use crate::error::ApiResult;
use crate::facade::Facade;

/// Cluster metrics client.
#[derive(Debug, Clone)]
pub struct ClusterApi {
    facade: Facade,
}

impl ClusterApi {
    /// Client over `facade`.
    #[must_use]
    pub const fn new(facade: Facade) -> Self {
        Self { facade }
    }

    /// Node and server aggregates from `GET /api/v1/metrics`.
    ///
    /// # Errors
    /// Returns bridge or decode failures.
    pub async fn metrics(&self) -> ApiResult<ClusterSnapshot> {
        self.facade.get_json("/api/v1/metrics").await
    }
}
