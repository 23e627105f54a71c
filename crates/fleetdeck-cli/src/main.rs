//! `fleetdeck` binary entrypoint.

#[tokio::main]
async fn main() {
    let code = fleetdeck_cli::run().await;
    std::process::exit(code);
}
