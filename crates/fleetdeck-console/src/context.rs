//! Application context passed to every presentation handler.

use std::sync::Arc;

use fleetdeck_config::{DEFAULT_API_URL, SettingsStore, validate::parse_api_url};

use crate::api::{
    ClusterApi, FilesApi, GameTypesApi, HealthApi, NodesApi, ServerFilters, ServersApi,
};
use crate::bridge::{Bridge, BridgeOptions, HttpBridge};
use crate::dashboard::DashboardSummary;
use crate::error::ApiResult;
use crate::explorer::FileExplorer;
use crate::facade::Facade;
use crate::store::{NodesStore, ServersStore, SettingsState, ToastStore};

/// Façade, API clients, and stores for one console session.
#[derive(Debug)]
pub struct AppContext {
    /// Shared façade; every client below clones it.
    pub facade: Facade,
    /// Cluster aggregates.
    pub cluster: ClusterApi,
    /// Game-type catalog.
    pub game_types: GameTypesApi,
    /// Health probes.
    pub health: HealthApi,
    /// Node collection.
    pub nodes: NodesStore,
    /// Server collection.
    pub servers: ServersStore,
    /// Persisted settings.
    pub settings: SettingsState,
    /// Session-level notifications.
    pub toasts: ToastStore,
}

impl AppContext {
    /// Wire every client over `bridge`. Settings are not loaded yet.
    #[must_use]
    pub fn with_bridge(bridge: Arc<dyn Bridge>, store: Arc<dyn SettingsStore>) -> Self {
        let facade = Facade::new(bridge);
        Self {
            cluster: ClusterApi::new(facade.clone()),
            game_types: GameTypesApi::new(facade.clone()),
            health: HealthApi::new(facade.clone()),
            nodes: NodesStore::new(NodesApi::new(facade.clone())),
            servers: ServersStore::new(ServersApi::new(facade.clone())),
            settings: SettingsState::new(store, facade.clone()),
            toasts: ToastStore::default(),
            facade,
        }
    }

    /// Build the HTTP bridge and load settings before any API call.
    ///
    /// # Errors
    /// Returns an error when the HTTP client cannot be constructed. Settings
    /// failures are recorded on [`SettingsState`] and the defaults used.
    pub fn bootstrap(store: Arc<dyn SettingsStore>, options: &BridgeOptions) -> ApiResult<Self> {
        let base_url = parse_api_url(DEFAULT_API_URL)?;
        let bridge = HttpBridge::new(base_url, options)?;
        let mut context = Self::with_bridge(Arc::new(bridge), store);
        context.settings.fetch();
        if let Some(error) = context.settings.error() {
            context.toasts.warning(format!("Using default settings: {error}"));
        }
        tracing::debug!(api_url = %context.settings.settings().api_url, "console context ready");
        Ok(context)
    }

    /// Point this session at `raw` without persisting it.
    ///
    /// # Errors
    /// Returns an error when `raw` is not an absolute http(s) URL.
    pub fn override_api_url(&self, raw: &str) -> ApiResult<()> {
        let url = parse_api_url(raw)?;
        tracing::debug!(api_url = %url, "api url overridden for this session");
        self.facade.retarget(url)
    }

    /// Files client for ad-hoc operations.
    #[must_use]
    pub fn files(&self) -> FilesApi {
        FilesApi::new(self.facade.clone())
    }

    /// Explorer rooted at `/` on `node_id`.
    #[must_use]
    pub fn explorer(&self, node_id: &str) -> FileExplorer {
        FileExplorer::new(self.files(), node_id)
    }

    /// Refresh nodes, servers, and cluster metrics and summarize them.
    ///
    /// # Errors
    /// Returns the first node or server listing failure. Cluster metrics
    /// are optional; their failure renders as `N/A`.
    pub async fn load_dashboard(&mut self) -> ApiResult<DashboardSummary> {
        self.nodes.fetch_nodes(None).await?;
        self.servers.fetch_servers(&ServerFilters::default()).await?;
        let cluster = match self.cluster.metrics().await {
            Ok(snapshot) => Some(snapshot.nodes),
            Err(err) => {
                tracing::warn!(error = %err.user_message(), "cluster metrics unavailable");
                None
            }
        };
        Ok(DashboardSummary::from_stores(
            &self.nodes,
            &self.servers,
            cluster.as_ref(),
        ))
    }
}
