//! Web front end for the legislation checker.
//!
//! Upload a PDF and get the cleaned text, the summary, the extracted sections
//! and the rule checks rendered back; JSON endpoints expose the same pipeline
//! and the LLM refinement.
mod config;
mod error;
mod render;
mod routes;

use std::sync::Arc;

use legis_analysis::Refiner;
use legis_common::anthropic::AnthropicClient;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use config::Config;
use routes::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    info!("starting legis-web");

    let config = Config::from_env()?;
    info!(
        listen_addr = %config.listen_addr,
        max_upload_bytes = config.max_upload_bytes,
        base_url = %config.anthropic.base_url,
        model = %config.refine.model,
        api_key = config.refine.api_key.is_some(),
        "configuration loaded"
    );

    let client = AnthropicClient::new(config.anthropic.clone())?;
    let state = AppState {
        refiner: Arc::new(Refiner::new(client, config.refine.clone())),
    };
    let app = routes::router(state, config.max_upload_bytes);

    let listener = TcpListener::bind(config.listen_addr).await?;
    info!(listen_addr = %config.listen_addr, "listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("legis-web shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
    }
}
