mod config;
mod error;
mod routes;

use chrono::Utc;
use clap::Parser;
use config::Cli;
use documind_core::{ChatCoordinator, GeminiClient, Generator, IngestionOptions};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let app_version = env!("CARGO_PKG_VERSION");

    dotenv::dotenv().ok();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(fmt::layer())
        .init();

    let cli = Cli::parse();

    let generator: Arc<dyn Generator> = Arc::new(GeminiClient::new(cli.gemini_config()));
    let upload_dir = cli.upload_dir();
    let coordinator = ChatCoordinator::new(generator, &IngestionOptions::default())
        .map_err(|error| anyhow::anyhow!(error.to_string()))?
        .with_upload_dir(&upload_dir);

    let app = routes::create_app(Arc::new(coordinator), cli.max_upload_bytes);

    let listener = tokio::net::TcpListener::bind((cli.host.as_str(), cli.port)).await?;
    info!(
        version = app_version,
        started_at = %Utc::now().to_rfc3339(),
        address = %listener.local_addr()?,
        model = %cli.model,
        upload_dir = %upload_dir.display(),
        "documind-server boot"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("documind-server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %error, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
