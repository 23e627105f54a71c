use fleetdeck_console::AppContext;

use crate::cli::OutputFormat;
use crate::client::{CliError, CliResult};
use crate::output::{print_toasts, render_dashboard};

pub(crate) async fn handle_dashboard(ctx: &mut AppContext, format: OutputFormat) -> CliResult<()> {
    let summary = ctx.load_dashboard().await.map_err(CliError::from_api)?;
    print_toasts(&ctx.toasts.drain());
    render_dashboard(&summary, format)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::context_for;
    use anyhow::Result;
    use httpmock::prelude::*;
    use serde_json::json;

    #[tokio::test]
    async fn dashboard_tolerates_missing_cluster_metrics() -> Result<()> {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(GET).path("/api/v1/nodes");
            then.status(200).json_body(json!({
                "nodes": [
                    { "id": "n1", "name": "alpha", "status": "online" },
                    { "id": "n2", "name": "beta", "status": "offline" }
                ]
            }));
        });
        server.mock(|when, then| {
            when.method(GET).path("/api/v1/servers");
            then.status(200).json_body(json!({
                "servers": [{ "id": "s1", "name": "survival", "status": "running" }]
            }));
        });
        let metrics = server.mock(|when, then| {
            when.method(GET).path("/api/v1/metrics");
            then.status(503);
        });

        let mut ctx = context_for(&server);
        handle_dashboard(&mut ctx, OutputFormat::Json)
            .await
            .map_err(|err| anyhow::anyhow!(err.display_message()))?;
        metrics.assert();
        assert_eq!(ctx.nodes.online_count(), 1);
        assert_eq!(ctx.servers.running_count(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn node_listing_failure_is_reported() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(GET).path("/api/v1/nodes");
            then.status(500).body("database down");
        });

        let mut ctx = context_for(&server);
        let err = handle_dashboard(&mut ctx, OutputFormat::Table)
            .await
            .expect_err("listing failure");
        assert_eq!(err.exit_code(), 3);
        assert_eq!(err.display_message(), "API error (500): database down");
    }
}
