//! Web API module for the token dashboard
//!
//! Exposes the token data core over REST and optionally serves the built
//! dashboard.

pub mod handlers;
pub mod models;
pub mod routes;
pub mod server;

use std::sync::Arc;

use crate::config::Config;
use crate::tokens::TokenInfoService;

/// Shared application state for all API handlers
#[derive(Clone)]
pub struct AppState {
    /// Holder/metadata facade backed by the shared cache
    pub tokens: Arc<TokenInfoService>,
    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(tokens: Arc<TokenInfoService>, config: Arc<Config>) -> Self {
        Self { tokens, config }
    }
}
