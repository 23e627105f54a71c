mod support;

use std::sync::Arc;

use anyhow::Result;
use fleetdeck_api_models::{NodeStatus, ServerStatus};
use fleetdeck_config::{AppSettings, ConfigError, ConfigResult, MemorySettingsStore, SettingsStore};
use fleetdeck_console::api::{NodesApi, ServerFilters, ServersApi};
use fleetdeck_console::store::{NodesStore, ServersStore, SettingField, SettingsState};
use fleetdeck_console::{AppContext, Bridge};
use serde_json::{Value, json};
use support::{RecordingBridge, Reply, facade};

fn node(id: &str, status: &str) -> Value {
    json!({ "id": id, "name": format!("node {id}"), "hostname": format!("{id}.lan"), "status": status })
}

fn server(id: &str, node_id: &str, status: &str) -> Value {
    json!({ "id": id, "name": id, "node_id": node_id, "game_type": "minecraft", "status": status })
}

#[tokio::test]
async fn fetch_nodes_replaces_collection() -> Result<()> {
    let bridge = RecordingBridge::new();
    bridge.json(
        "GET",
        "/api/v1/nodes",
        json!({ "nodes": [node("n1", "online"), node("n2", "offline"), node("n3", "rebooting")] }),
    );
    let mut store = NodesStore::new(NodesApi::new(facade(&bridge)));

    store.fetch_nodes(None).await?;
    assert_eq!(store.nodes().len(), 3);
    assert_eq!(store.online_count(), 1);
    assert_eq!(store.node("n3").map(|node| node.status), Some(NodeStatus::Unknown));
    assert_eq!(store.filtered(Some(NodeStatus::Offline)).len(), 1);
    assert!(!store.loading());
    assert!(store.error().is_none());
    Ok(())
}

#[tokio::test]
async fn failed_fetch_keeps_prior_nodes_and_records_error() -> Result<()> {
    let bridge = RecordingBridge::new();
    bridge.json("GET", "/api/v1/nodes", json!({ "nodes": [node("n1", "online")] }));
    let mut store = NodesStore::new(NodesApi::new(facade(&bridge)));
    store.fetch_nodes(None).await?;

    bridge.route("GET", "/api/v1/nodes", Reply::Status(500, "database down".into()));
    let err = store.fetch_nodes(None).await.expect_err("fetch fails");

    assert_eq!(err.status(), Some(500));
    assert_eq!(store.nodes().len(), 1);
    assert_eq!(store.error(), Some("API error (500): database down"));
    assert!(!store.loading());

    store.clear_error();
    assert!(store.error().is_none());
    Ok(())
}

#[tokio::test]
async fn status_filter_is_sent_as_query() -> Result<()> {
    let bridge = RecordingBridge::new();
    bridge.json("GET", "/api/v1/nodes", json!({ "nodes": [] }));
    let mut store = NodesStore::new(NodesApi::new(facade(&bridge)));

    store.fetch_nodes(Some(NodeStatus::Maintenance)).await?;
    assert_eq!(
        bridge.calls()[0].endpoint,
        "/api/v1/nodes?status=maintenance"
    );
    Ok(())
}

#[tokio::test]
async fn deleting_selected_node_clears_selection() -> Result<()> {
    let bridge = RecordingBridge::new();
    bridge.json(
        "GET",
        "/api/v1/nodes",
        json!({ "nodes": [node("n1", "online"), node("n2", "online")] }),
    );
    bridge.json("DELETE", "/api/v1/nodes/n1", json!({}));
    let mut store = NodesStore::new(NodesApi::new(facade(&bridge)));
    store.fetch_nodes(None).await?;

    store.select_node(Some("n1"));
    assert_eq!(store.selected().map(|node| node.id.as_str()), Some("n1"));
    store.delete_node("n1").await?;

    assert!(store.selected_id().is_none());
    assert_eq!(store.nodes().len(), 1);
    Ok(())
}

#[tokio::test]
async fn metrics_failures_are_not_recorded_as_errors() {
    let bridge = RecordingBridge::new();
    let mut store = NodesStore::new(NodesApi::new(facade(&bridge)));

    store.fetch_node_metrics("missing").await;
    assert!(store.metrics("missing").is_none());
    assert!(store.error().is_none());

    bridge.json(
        "GET",
        "/api/v1/nodes/n1/metrics",
        json!({ "metrics": { "node_id": "n1", "cpu_usage_percent": 12.5 } }),
    );
    store.fetch_node_metrics("n1").await;
    let metrics = store.metrics("n1").expect("cached");
    assert!((metrics.cpu_usage_percent - 12.5).abs() < f64::EPSILON);
}

#[tokio::test]
async fn servers_store_filters_and_counts() -> Result<()> {
    let bridge = RecordingBridge::new();
    bridge.json(
        "GET",
        "/api/v1/servers",
        json!({ "servers": [
            server("s1", "n1", "running"),
            server("s2", "n1", "stopped"),
            server("s3", "n2", "running"),
        ] }),
    );
    let mut store = ServersStore::new(ServersApi::new(facade(&bridge)));
    store.fetch_servers(&ServerFilters::default()).await?;

    assert_eq!(store.running_count(), 2);
    let on_n1 = ServerFilters {
        node_id: Some("n1".into()),
        ..ServerFilters::default()
    };
    assert_eq!(store.filtered(&on_n1).len(), 2);
    let running_on_n1 = ServerFilters {
        status: Some(ServerStatus::Running),
        ..on_n1
    };
    assert_eq!(store.filtered(&running_on_n1).len(), 1);
    Ok(())
}

#[tokio::test]
async fn server_logs_and_backup_delete() -> Result<()> {
    let bridge = RecordingBridge::new();
    bridge.json("GET", "/api/v1/servers", json!({ "servers": [server("s1", "n1", "running")] }));
    bridge.json("GET", "/api/v1/servers/s1/logs", json!({ "logs": ["booted", "ready"] }));
    bridge.json("DELETE", "/api/v1/servers/s1", json!({}));
    let mut store = ServersStore::new(ServersApi::new(facade(&bridge)));
    store.fetch_servers(&ServerFilters::default()).await?;

    store.fetch_server_logs("s1", 100).await;
    assert_eq!(store.logs("s1"), Some(&["booted".to_string(), "ready".to_string()][..]));
    assert_eq!(bridge.calls_to("GET", "/logs")[0].endpoint, "/api/v1/servers/s1/logs?tail=100");

    store.select_server(Some("s1"));
    store.delete_server("s1", true).await?;
    assert!(store.servers().is_empty());
    assert!(store.selected_id().is_none());
    assert!(store.logs("s1").is_none());
    assert_eq!(
        bridge.calls_to("DELETE", "/servers/s1")[0].endpoint,
        "/api/v1/servers/s1?backup=true"
    );
    Ok(())
}

#[tokio::test]
async fn settings_fetch_retargets_bridge() -> Result<()> {
    let bridge = RecordingBridge::new();
    let saved = AppSettings {
        api_url: "http://fleet.lan:9000".into(),
        ..AppSettings::default()
    };
    let store = Arc::new(MemorySettingsStore::with_settings(saved));
    let mut state = SettingsState::new(store.clone(), facade(&bridge));

    state.fetch();
    assert!(state.initialized());
    assert!(state.error().is_none());
    assert_eq!(bridge.current_target().as_str(), "http://fleet.lan:9000/");

    state.update(SettingField::ApiUrl("http://other.lan:8080".into()));
    assert!(!state.saved());
    state.save_current()?;
    assert!(state.saved());
    assert_eq!(bridge.current_target().as_str(), "http://other.lan:8080/");
    assert_eq!(store.load()?.api_url, "http://other.lan:8080");
    Ok(())
}

#[tokio::test]
async fn invalid_settings_are_rejected_without_retarget() -> Result<()> {
    let bridge = RecordingBridge::new();
    let store = Arc::new(MemorySettingsStore::default());
    let mut state = SettingsState::new(store, facade(&bridge));
    state.fetch();
    let before = bridge.current_target();

    state.update(SettingField::RefreshInterval(1));
    assert!(state.save_current().is_err());
    assert!(state.error().is_some());
    assert!(!state.saved());
    assert_eq!(bridge.current_target(), before);

    state.reset()?;
    assert_eq!(state.settings(), &AppSettings::default());
    Ok(())
}

/// Store that loads defaults but refuses every write.
struct ReadOnlyStore;

impl SettingsStore for ReadOnlyStore {
    fn load(&self) -> ConfigResult<AppSettings> {
        Ok(AppSettings::default())
    }

    fn save(&self, _settings: &AppSettings) -> ConfigResult<()> {
        Err(ConfigError::LockPoisoned)
    }
}

#[tokio::test]
async fn failed_write_restores_previous_target() {
    let bridge = RecordingBridge::new();
    let mut state = SettingsState::new(Arc::new(ReadOnlyStore), facade(&bridge));
    state.fetch();
    let before = bridge.current_target();

    let edited = AppSettings {
        api_url: "http://other.lan:8080".into(),
        ..AppSettings::default()
    };
    assert!(state.save(edited).is_err());
    assert!(state.error().is_some());
    assert!(!state.saved());
    assert_eq!(state.settings(), &AppSettings::default());
    assert_eq!(bridge.current_target(), before);
}

#[tokio::test]
async fn dashboard_summarizes_stores() -> Result<()> {
    let bridge = RecordingBridge::new();
    let nodes: Vec<Value> = (1..=7)
        .map(|index| node(&format!("n{index}"), if index % 2 == 0 { "online" } else { "offline" }))
        .collect();
    bridge.json("GET", "/api/v1/nodes", json!({ "nodes": nodes }));
    bridge.json("GET", "/api/v1/servers", json!({ "servers": [server("s1", "n2", "running")] }));
    bridge.json(
        "GET",
        "/api/v1/metrics",
        json!({ "nodes": { "used_cpu_cores": 41.6, "used_memory_mb": 70.2 }, "servers": {} }),
    );
    let settings = Arc::new(MemorySettingsStore::default());
    let mut context = AppContext::with_bridge(bridge.clone() as Arc<dyn Bridge>, settings);

    let summary = context.load_dashboard().await?;
    assert_eq!(summary.total_nodes, 7);
    assert_eq!(summary.online_nodes, 3);
    assert_eq!(summary.running_servers, 1);
    assert_eq!(summary.cpu_usage, "42%");
    assert_eq!(summary.memory_usage, "70%");
    assert_eq!(summary.recent_nodes.len(), 5);
    assert_eq!(summary.cards()[0].detail, "3 online");

    bridge.route("GET", "/api/v1/metrics", Reply::Status(503, String::new()));
    let summary = context.load_dashboard().await?;
    assert_eq!(summary.cpu_usage, "N/A");
    Ok(())
}
