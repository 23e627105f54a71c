use std::collections::BTreeMap;

use fleetdeck_api_models::{CreateServerRequest, ServerAction, ServerConfig, ServerRequirements};
use fleetdeck_console::AppContext;
use fleetdeck_console::api::{ServerFilters, ServersApi};

use crate::cli::{OutputFormat, ServerCreateArgs, ServersCommand};
use crate::client::{CliError, CliResult};
use crate::output::{
    render_logs, render_server, render_server_created, render_server_metrics, render_servers,
};

pub(crate) async fn handle_servers(
    ctx: &mut AppContext,
    command: ServersCommand,
    format: OutputFormat,
) -> CliResult<()> {
    let api = ServersApi::new(ctx.facade.clone());
    match command {
        ServersCommand::Ls(args) => {
            let filters = ServerFilters {
                status: args.status.map(Into::into),
                node_id: args.node_id,
                game_type: args.game_type,
            };
            ctx.servers
                .fetch_servers(&filters)
                .await
                .map_err(CliError::from_api)?;
            let servers: Vec<_> = ctx.servers.filtered(&filters).into_iter().cloned().collect();
            render_servers(&servers, format)
        }
        ServersCommand::Show(args) => {
            let server = api.get(&args.id).await.map_err(CliError::from_api)?;
            render_server(&server, format)
        }
        ServersCommand::Create(args) => {
            let request = create_request(args)?;
            let response = ctx
                .servers
                .create_server(&request)
                .await
                .map_err(CliError::from_api)?;
            render_server_created(&response, format)
        }
        ServersCommand::Rm(args) => {
            ctx.servers
                .delete_server(&args.id, args.backup)
                .await
                .map_err(CliError::from_api)?;
            if args.backup {
                println!("Server {} deleted (backup requested).", args.id);
            } else {
                println!("Server {} deleted.", args.id);
            }
            Ok(())
        }
        ServersCommand::Action(args) => {
            let action = ServerAction::from(args.action);
            ctx.servers
                .run_action(&args.id, action)
                .await
                .map_err(CliError::from_api)?;
            println!("Action '{}' sent to server {}.", action.as_str(), args.id);
            Ok(())
        }
        ServersCommand::Logs(args) => {
            if args.tail == 0 {
                return Err(CliError::validation("--tail must be at least 1"));
            }
            let lines = api
                .logs(&args.id, args.tail)
                .await
                .map_err(CliError::from_api)?;
            render_logs(&lines, format)
        }
        ServersCommand::Metrics(args) => {
            let metrics = api.metrics(&args.id).await.map_err(CliError::from_api)?;
            render_server_metrics(&metrics, format)
        }
    }
}

fn create_request(args: ServerCreateArgs) -> CliResult<CreateServerRequest> {
    let name = args.name.trim();
    if name.is_empty() {
        return Err(CliError::validation("name must not be empty"));
    }
    if args.node_id.trim().is_empty() {
        return Err(CliError::validation("--node must not be empty"));
    }
    if args.game_type.trim().is_empty() {
        return Err(CliError::validation("--game-type must not be empty"));
    }
    let settings: BTreeMap<String, String> = args.settings.into_iter().collect();
    Ok(CreateServerRequest {
        node_id: args.node_id.trim().to_string(),
        game_type: args.game_type.trim().to_string(),
        config: ServerConfig {
            name: name.to_string(),
            version: args.version,
            max_players: args.max_players,
            settings,
        },
        requirements: ServerRequirements {
            min_cpu_cores: args.min_cpu_cores,
            min_memory_mb: args.min_memory_mb,
            min_storage_mb: args.min_storage_mb,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{ServerListArgs, ServerLogsArgs, ServerRemoveArgs, ServerStatusArg};
    use crate::commands::test_support::context_for;
    use anyhow::{Result, anyhow};
    use httpmock::prelude::*;
    use serde_json::json;

    fn create_args() -> ServerCreateArgs {
        ServerCreateArgs {
            node_id: "n1".into(),
            game_type: "minecraft".into(),
            name: "survival".into(),
            version: "latest".into(),
            max_players: 20,
            settings: vec![
                ("difficulty".into(), "hard".into()),
                ("motd".into(), "welcome".into()),
            ],
            min_cpu_cores: 1,
            min_memory_mb: 2048,
            min_storage_mb: 10_240,
        }
    }

    #[tokio::test]
    async fn create_nests_config_and_requirements() -> Result<()> {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(POST).path("/api/v1/servers").json_body(json!({
                "node_id": "n1",
                "game_type": "minecraft",
                "config": {
                    "name": "survival",
                    "version": "latest",
                    "max_players": 20,
                    "settings": { "difficulty": "hard", "motd": "welcome" }
                },
                "requirements": {
                    "min_cpu_cores": 1,
                    "min_memory_mb": 2048,
                    "min_storage_mb": 10240
                }
            }));
            then.status(201).json_body(json!({
                "success": true,
                "server_id": "s1",
                "message": "provisioning",
                "server_info": { "server_id": "s1", "node_id": "n1", "port": 25565, "ip_address": "10.0.0.5" }
            }));
        });

        let mut ctx = context_for(&server);
        handle_servers(&mut ctx, ServersCommand::Create(create_args()), OutputFormat::Table)
            .await
            .map_err(|err| anyhow!(err.display_message()))?;
        mock.assert();
        Ok(())
    }

    #[tokio::test]
    async fn ls_sends_filters_as_query() -> Result<()> {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/api/v1/servers")
                .query_param("status", "backing_up")
                .query_param("node_id", "n1");
            then.status(200).json_body(json!({
                "servers": [
                    { "id": "s1", "node_id": "n1", "status": "backing_up" },
                    { "id": "s2", "node_id": "n2", "status": "backing_up" }
                ]
            }));
        });

        let mut ctx = context_for(&server);
        handle_servers(
            &mut ctx,
            ServersCommand::Ls(ServerListArgs {
                status: Some(ServerStatusArg::BackingUp),
                node_id: Some("n1".into()),
                game_type: None,
            }),
            OutputFormat::Json,
        )
        .await
        .map_err(|err| anyhow!(err.display_message()))?;
        mock.assert();
        Ok(())
    }

    #[tokio::test]
    async fn rm_with_backup_sets_query_flag() -> Result<()> {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(DELETE)
                .path("/api/v1/servers/s1")
                .query_param("backup", "true");
            then.status(204);
        });

        let mut ctx = context_for(&server);
        handle_servers(
            &mut ctx,
            ServersCommand::Rm(ServerRemoveArgs {
                id: "s1".into(),
                backup: true,
            }),
            OutputFormat::Table,
        )
        .await
        .map_err(|err| anyhow!(err.display_message()))?;
        mock.assert();
        Ok(())
    }

    #[tokio::test]
    async fn logs_request_tail() -> Result<()> {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/api/v1/servers/s1/logs")
                .query_param("tail", "25");
            then.status(200)
                .json_body(json!({ "logs": ["[INFO] Done (3.2s)!"] }));
        });

        let mut ctx = context_for(&server);
        handle_servers(
            &mut ctx,
            ServersCommand::Logs(ServerLogsArgs {
                id: "s1".into(),
                tail: 25,
            }),
            OutputFormat::Table,
        )
        .await
        .map_err(|err| anyhow!(err.display_message()))?;
        mock.assert();
        Ok(())
    }

    #[tokio::test]
    async fn zero_tail_is_rejected_locally() {
        let server = MockServer::start_async().await;
        let mut ctx = context_for(&server);
        let err = handle_servers(
            &mut ctx,
            ServersCommand::Logs(ServerLogsArgs {
                id: "s1".into(),
                tail: 0,
            }),
            OutputFormat::Table,
        )
        .await
        .expect_err("zero tail");
        assert_eq!(err.exit_code(), 2);
    }

    #[tokio::test]
    async fn conflict_on_create_is_validation() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(POST).path("/api/v1/servers");
            then.status(409).body("no node has capacity");
        });

        let mut ctx = context_for(&server);
        let err = handle_servers(&mut ctx, ServersCommand::Create(create_args()), OutputFormat::Table)
            .await
            .expect_err("conflict");
        assert_eq!(err.exit_code(), 2);
        assert_eq!(err.display_message(), "API error (409): no node has capacity");
    }
}
