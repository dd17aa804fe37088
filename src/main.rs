use std::error::Error;

use ai_llm_service::telemetry::{self, is_pipeline_target};
use tracing::info;
use tracing_subscriber::{
    EnvFilter, Layer, filter::filter_fn, fmt, layer::SubscriberExt, util::SubscriberInitExt,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // A missing .env is fine; the process environment and defaults apply.
    let dotenv = dotenvy::dotenv().ok();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    // Pipeline crates go through the RFC3339 telemetry layer, everything else
    // (axum, hyper, qdrant client) through the plain fmt layer.
    tracing_subscriber::registry()
        .with(filter)
        .with(telemetry::layer())
        .with(
            fmt::layer()
                .with_target(true)
                .with_filter(filter_fn(|meta| !is_pipeline_target(meta.target()))),
        )
        .try_init()?;

    if let Some(path) = dotenv {
        info!("loaded environment from {}", path.display());
    }

    api::start().await?;

    Ok(())
}
