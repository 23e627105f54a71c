use fleetdeck_api_models::GameType;
use fleetdeck_console::AppContext;

use crate::cli::OutputFormat;
use crate::client::CliResult;
use crate::output::{print_toasts, render_game_types};

/// Lists the backend catalog, falling back to the built-in one when the
/// backend cannot be reached.
pub(crate) async fn handle_game_types(ctx: &mut AppContext, format: OutputFormat) -> CliResult<()> {
    let games = match ctx.game_types.list().await {
        Ok(games) => games,
        Err(err) => {
            let message = err.user_message();
            tracing::warn!(error = %message, "game type catalog unavailable");
            ctx.toasts
                .warning(format!("Showing built-in game types: {message}"));
            GameType::builtin()
        }
    };
    print_toasts(&ctx.toasts.drain());
    render_game_types(&games, format)
}
