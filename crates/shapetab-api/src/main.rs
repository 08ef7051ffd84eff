use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use shapetab_api::{create_router, ApiConfig, AppState};
use shapetab_pipeline::ArchivePipeline;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "shapetab_api=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cwd = std::env::current_dir().context("Failed to resolve working directory")?;
    let config = ApiConfig::from_env(&cwd).context("Failed to load configuration")?;
    let pipeline =
        ArchivePipeline::from_config(&config.conversion).context("Failed to build pipeline")?;

    tracing::info!(
        port = config.port,
        output_dir = %config.output_dir().display(),
        tolerance = pipeline.tolerance(),
        max_upload_bytes = config.max_upload_bytes,
        "Starting shapetab API server"
    );

    std::fs::create_dir_all(config.output_dir()).with_context(|| {
        format!("Failed to create output directory {}", config.output_dir().display())
    })?;

    let state = Arc::new(AppState::new(pipeline, config.output_dir(), config.max_upload_bytes));
    let app = create_router(state);

    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    tracing::info!("Listening on {}", addr);

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
