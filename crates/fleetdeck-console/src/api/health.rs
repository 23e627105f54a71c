//! Client for the liveness and readiness probes.

use fleetdeck_api_models::HealthStatus;

use crate::error::ApiResult;
use crate::facade::Facade;

/// Health probe client.
#[derive(Debug, Clone)]
pub struct HealthApi {
    facade: Facade,
}

impl HealthApi {
    /// Client over `facade`.
    #[must_use]
    pub const fn new(facade: Facade) -> Self {
        Self { facade }
    }

    /// `GET /health`.
    ///
    /// # Errors
    /// Returns bridge or decode failures.
    pub async fn check(&self) -> ApiResult<HealthStatus> {
        self.facade.get_json("/health").await
    }

    /// `GET /ready`.
    ///
    /// # Errors
    /// Returns bridge or decode failures.
    pub async fn ready(&self) -> ApiResult<HealthStatus> {
        self.facade.get_json("/ready").await
    }
}
