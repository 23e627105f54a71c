//! Command handlers grouped by resource.

pub(crate) mod dashboard;
pub(crate) mod explore;
pub(crate) mod files;
pub(crate) mod game_types;
pub(crate) mod health;
pub(crate) mod nodes;
pub(crate) mod servers;
pub(crate) mod settings;

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;

    use fleetdeck_config::MemorySettingsStore;
    use fleetdeck_config::validate::parse_api_url;
    use fleetdeck_console::{AppContext, BridgeOptions, HttpBridge};
    use httpmock::MockServer;

    /// Console wired to `server` with in-memory settings.
    pub(crate) fn context_for(server: &MockServer) -> AppContext {
        let base = parse_api_url(&server.base_url()).expect("mock server URL");
        let bridge = HttpBridge::new(base, &BridgeOptions::default()).expect("bridge");
        AppContext::with_bridge(Arc::new(bridge), Arc::new(MemorySettingsStore::default()))
    }
}
