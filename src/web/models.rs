//! Response DTOs for the Web API

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::{TokenInfo, TokenMetadata};

// ============================================================================
// Health
// ============================================================================

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: DateTime<Utc>,
}

// ============================================================================
// Tokens
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenInfoResponse {
    pub mint_address: String,
    pub holder_count: usize,
    pub metadata: TokenMetadata,
}

impl TokenInfoResponse {
    pub fn new(mint_address: &str, info: &TokenInfo) -> Self {
        Self {
            mint_address: mint_address.to_string(),
            holder_count: info.holder_count(),
            metadata: (*info.metadata).clone(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenCompareResponse {
    pub token1: TokenInfoResponse,
    pub token2: TokenInfoResponse,
    pub common_holders_count: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenAccountsResponse {
    pub mint_address: String,
    pub owners: Vec<String>,
    pub total_owners: usize,
}

// ============================================================================
// Errors
// ============================================================================

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub details: String,
}
