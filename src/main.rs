use anyhow::Result;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use task_prioritizer::api::build_router;
use task_prioritizer::config::AppConfig;
use task_prioritizer::prioritizer::{GeminiClient, PrioritizerService, PrioritizerState};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::load()?;

    let client = GeminiClient::new(config.gemini.clone())
        .map_err(|e| anyhow::anyhow!("failed to build model client: {e}"))?;
    let service = Arc::new(PrioritizerService::new(Arc::new(client)));
    let state = PrioritizerState { service };

    let app = build_router(state, &config.server);

    let listener = tokio::net::TcpListener::bind(config.bind_addr()).await?;
    info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}
