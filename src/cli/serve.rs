//! `begrepsbro serve`: run the HTTP API.

use anyhow::{Context, Result};
use tracing::info;

use begrepsbro::api::server::{start_server, AppState};
use begrepsbro::config::Config;
use begrepsbro::providers::build_provider;
use begrepsbro::Gateway;

pub(crate) async fn cmd_serve(mut config: Config, port: Option<u16>) -> Result<()> {
    if let Some(port) = port {
        config.api.port = port;
    }

    let provider =
        build_provider(&config.providers).with_context(|| "Failed to set up LLM provider")?;
    info!(
        provider = provider.name(),
        model = provider.model(),
        "Serving explanations"
    );

    let state = AppState::new(Gateway::new(provider));
    start_server(&config.api, state)
        .await
        .map_err(|e| anyhow::anyhow!("API server failed: {e}"))
}
