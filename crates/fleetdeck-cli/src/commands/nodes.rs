use fleetdeck_api_models::{CreateNodeRequest, NodeAction, UpdateNodeRequest};
use fleetdeck_console::AppContext;
use fleetdeck_console::api::NodesApi;

use crate::cli::{NodeCreateArgs, NodeUpdateArgs, NodesCommand, OutputFormat};
use crate::client::{CliError, CliResult};
use crate::output::{render_node, render_node_metrics, render_nodes};

pub(crate) async fn handle_nodes(
    ctx: &mut AppContext,
    command: NodesCommand,
    format: OutputFormat,
) -> CliResult<()> {
    let api = NodesApi::new(ctx.facade.clone());
    match command {
        NodesCommand::Ls(args) => {
            let status = args.status.map(Into::into);
            ctx.nodes
                .fetch_nodes(status)
                .await
                .map_err(CliError::from_api)?;
            render_nodes(ctx.nodes.nodes(), format)
        }
        NodesCommand::Show(args) => {
            let node = api.get(&args.id).await.map_err(CliError::from_api)?;
            render_node(&node, format)
        }
        NodesCommand::Create(args) => {
            let request = create_request(args)?;
            let node = ctx
                .nodes
                .create_node(&request)
                .await
                .map_err(CliError::from_api)?;
            render_node(&node, format)
        }
        NodesCommand::Update(args) => {
            let (id, request) = update_request(args);
            if request.is_empty() {
                return Err(CliError::validation(
                    "nothing to update; pass at least one field flag",
                ));
            }
            let node = ctx
                .nodes
                .update_node(&id, &request)
                .await
                .map_err(CliError::from_api)?;
            render_node(&node, format)
        }
        NodesCommand::Rm(args) => {
            ctx.nodes
                .delete_node(&args.id)
                .await
                .map_err(CliError::from_api)?;
            println!("Node {} deleted.", args.id);
            Ok(())
        }
        NodesCommand::Action(args) => {
            let action = NodeAction::from(args.action);
            ctx.nodes
                .run_action(&args.id, action)
                .await
                .map_err(CliError::from_api)?;
            println!("Action '{}' sent to node {}.", action.as_str(), args.id);
            Ok(())
        }
        NodesCommand::Metrics(args) => {
            let metrics = api.metrics(&args.id).await.map_err(CliError::from_api)?;
            render_node_metrics(&metrics, format)
        }
    }
}

fn create_request(args: NodeCreateArgs) -> CliResult<CreateNodeRequest> {
    for (field, value) in [
        ("name", &args.name),
        ("hostname", &args.hostname),
        ("ip", &args.ip_address),
    ] {
        if value.trim().is_empty() {
            return Err(CliError::validation(format!("{field} must not be empty")));
        }
    }
    Ok(CreateNodeRequest {
        name: args.name.trim().to_string(),
        hostname: args.hostname.trim().to_string(),
        ip_address: args.ip_address.trim().to_string(),
        port: args.port,
        game_types: args.game_types,
        total_cpu_cores: args.total_cpu_cores,
        total_memory_mb: args.total_memory_mb,
        total_storage_mb: args.total_storage_mb,
        os_version: args.os_version,
    })
}

fn update_request(args: NodeUpdateArgs) -> (String, UpdateNodeRequest) {
    let request = UpdateNodeRequest {
        name: args.name,
        hostname: args.hostname,
        ip_address: args.ip_address,
        port: args.port,
        game_types: args.game_types,
        total_cpu_cores: args.total_cpu_cores,
        total_memory_mb: args.total_memory_mb,
        total_storage_mb: args.total_storage_mb,
        os_version: args.os_version,
        status: args.status.map(Into::into),
    };
    (args.id, request)
}
