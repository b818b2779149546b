//! Request handlers for all API endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use tracing::{error, info};

use super::models::*;
use super::AppState;
use crate::error::TokenDataError;

type ApiError = (StatusCode, Json<ErrorResponse>);

fn internal_error(summary: &str, err: TokenDataError) -> ApiError {
    error!("{}: {}", summary, err);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse {
            error: summary.to_string(),
            details: err.to_string(),
        }),
    )
}

// ============================================================================
// Health Check
// ============================================================================

pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: Utc::now(),
    })
}

// ============================================================================
// Tokens
// ============================================================================

pub async fn get_token_info(
    State(state): State<AppState>,
    Path(mint_address): Path<String>,
) -> Result<Json<TokenInfoResponse>, ApiError> {
    info!("Fetching info for address: {}", mint_address);

    let token_info = state
        .tokens
        .get_token_info(&mint_address)
        .await
        .map_err(|e| internal_error("An error occurred while fetching token information", e))?;

    Ok(Json(TokenInfoResponse::new(&mint_address, &token_info)))
}

pub async fn compare_tokens(
    State(state): State<AppState>,
    Path((mint_address1, mint_address2)): Path<(String, String)>,
) -> Result<Json<TokenCompareResponse>, ApiError> {
    info!("Comparing tokens: {} and {}", mint_address1, mint_address2);

    let comparison = state
        .tokens
        .compare_tokens(&mint_address1, &mint_address2)
        .await
        .map_err(|e| internal_error("An error occurred while comparing tokens", e))?;

    Ok(Json(TokenCompareResponse {
        token1: TokenInfoResponse::new(&mint_address1, &comparison.token1),
        token2: TokenInfoResponse::new(&mint_address2, &comparison.token2),
        common_holders_count: comparison.common_holders_count,
    }))
}

pub async fn get_token_accounts(
    State(state): State<AppState>,
    Path(mint_address): Path<String>,
) -> Result<Json<TokenAccountsResponse>, ApiError> {
    info!("Fetching token accounts for: {}", mint_address);

    let holders = state
        .tokens
        .get_holders(&mint_address)
        .await
        .map_err(|e| internal_error("An error occurred while fetching token accounts", e))?;

    Ok(Json(TokenAccountsResponse {
        mint_address,
        owners: holders.holders.clone(),
        total_owners: holders.holder_count,
    }))
}
