use anyhow::Context;
use campus::logging::init_tracing;
use campus::router::init_router;
use campus::state::init_app_state;
use campus_config::ServerConfig;
use dotenvy::dotenv;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    init_tracing()?;

    let state = init_app_state()
        .await
        .context("Failed to connect to the database")?;
    let app = init_router(state);

    let server = ServerConfig::from_env();
    let address = server.bind_address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {address}"))?;

    info!(address = %address, "Server running");
    info!("Swagger UI available at http://{address}/swagger-ui");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
}
