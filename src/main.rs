use std::sync::Arc;

use ai_llm_service::telemetry;
use answer_engine::AnswerEngine;
use tracing::{Level, info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file if present.
    let dotenv = dotenvy::dotenv();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| telemetry::env_filter_with_level("warn", Level::INFO));

    tracing_subscriber::registry()
        .with(filter)
        .with(telemetry::layer())
        .try_init()?;

    if let Err(e) = dotenv {
        if !e.not_found() {
            warn!(error = %e, ".env could not be loaded");
        }
    }

    let engine = Arc::new(AnswerEngine::bootstrap_from_env().await);
    info!(
        ready = engine.is_ready(),
        questions = engine.corpus_len(),
        "EUEE AI backend starting"
    );

    api::start(engine).await?;

    Ok(())
}
