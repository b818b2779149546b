use anyhow::{Context, Result};
use dotenv::dotenv;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

mod api;
mod config;
mod error;
mod models;
mod tokens;
mod web;

use crate::api::helius::HeliusClient;
use crate::config::Config;
use crate::tokens::TokenInfoService;
use crate::web::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables before the filter reads RUST_LOG
    dotenv().ok();

    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    // Load configuration and wrap in Arc
    let config = Arc::new(Config::load()?);
    info!("Configuration loaded successfully");

    // Initialize Helius RPC client
    let helius_client = HeliusClient::new(
        &config.helius_api_key,
        &config.helius_rpc_url,
        Duration::from_secs(config.http_timeout_secs),
    )
    .context("Failed to create Helius HTTP client")?;
    info!("Helius client initialized for {}", config.helius_rpc_url);

    // Holder/metadata core over one shared cache
    let tokens = Arc::new(TokenInfoService::from_config(Arc::new(helius_client), &config));

    web::server::start_server(AppState::new(tokens, config)).await
}
