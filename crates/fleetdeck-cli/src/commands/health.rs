use fleetdeck_console::AppContext;

use crate::cli::OutputFormat;
use crate::client::{CliError, CliResult};
use crate::output::render_health;

pub(crate) async fn handle_health(ctx: &AppContext, format: OutputFormat) -> CliResult<()> {
    let health = ctx.health.check().await.map_err(CliError::from_api)?;
    let ready = ctx.health.ready().await.map_err(CliError::from_api)?;
    render_health(&health, &ready, format)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::context_for;
    use anyhow::{Result, anyhow};
    use httpmock::prelude::*;
    use serde_json::json;

    #[tokio::test]
    async fn probes_health_then_ready() -> Result<()> {
        let server = MockServer::start_async().await;
        let health = server.mock(|when, then| {
            when.method(GET).path("/health");
            then.status(200).json_body(json!({ "status": "healthy" }));
        });
        let ready = server.mock(|when, then| {
            when.method(GET).path("/ready");
            then.status(200).json_body(json!({ "status": "ready" }));
        });

        let ctx = context_for(&server);
        handle_health(&ctx, OutputFormat::Table)
            .await
            .map_err(|err| anyhow!(err.display_message()))?;
        health.assert();
        ready.assert();
        Ok(())
    }

    #[tokio::test]
    async fn not_ready_is_a_failure() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(GET).path("/health");
            then.status(200).json_body(json!({ "status": "healthy" }));
        });
        server.mock(|when, then| {
            when.method(GET).path("/ready");
            then.status(503).body("database unavailable");
        });

        let ctx = context_for(&server);
        let err = handle_health(&ctx, OutputFormat::Table)
            .await
            .expect_err("not ready");
        assert_eq!(err.exit_code(), 3);
    }
}
