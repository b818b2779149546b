//! API route definitions

use axum::{routing::get, Router};

use super::handlers;
use super::AppState;

/// Create all API routes
pub fn create_routes(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/api/health", get(handlers::health_check))

        // Tokens
        .route("/api/token-info/:mint_address", get(handlers::get_token_info))
        .route(
            "/api/token-compare/:mint_address1/:mint_address2",
            get(handlers::compare_tokens),
        )
        .route("/api/token-accounts/:mint_address", get(handlers::get_token_accounts))

        // Add state to all routes
        .with_state(state)
}
