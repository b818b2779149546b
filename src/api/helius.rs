use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, error};

use super::{JsonRpcRequest, JsonRpcResponse, RpcTransport};
use crate::error::RpcError;

const REQUEST_ID: &str = "token-lens";

#[derive(Debug, Clone)]
pub struct HeliusClient {
    api_key: String,
    rpc_url: String,
    client: Client,
}

// --- DAS / token-account payloads ---

/// `getTokenAccounts` page
#[derive(Debug, Deserialize)]
pub struct TokenAccountsPage {
    #[serde(default)]
    pub cursor: Option<String>,
    #[serde(default)]
    pub token_accounts: Vec<DasTokenAccount>,
}

#[derive(Debug, Deserialize)]
pub struct DasTokenAccount {
    pub owner: String,
    pub amount: u64, // Raw units, not decimal-adjusted
}

/// `getTokenSupply` result, only the part we use
#[derive(Debug, Deserialize)]
pub struct TokenSupplyResult {
    pub value: TokenSupplyValue,
}

#[derive(Debug, Deserialize)]
pub struct TokenSupplyValue {
    pub decimals: u8,
}

/// `getAsset` result, trimmed to the fields token metadata needs
#[derive(Debug, Deserialize)]
pub struct DasAsset {
    pub id: String, // Token mint address
    pub content: Option<DasAssetContent>,
    pub token_info: Option<DasTokenInfo>,
}

#[derive(Debug, Deserialize)]
pub struct DasAssetContent {
    pub files: Option<Vec<DasFile>>,
    pub metadata: Option<DasMetadata>,
    pub links: Option<DasLinks>,
}

#[derive(Debug, Deserialize)]
pub struct DasFile {
    pub uri: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct DasMetadata {
    pub name: Option<String>,
    pub symbol: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct DasLinks {
    pub image: Option<String>,
    pub external_url: Option<String>,
    pub twitter: Option<String>,
    pub discord: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct DasTokenInfo {
    pub decimals: Option<u8>,
    pub supply: Option<u64>,
    pub price_info: Option<DasPriceInfo>,
}

#[derive(Debug, Deserialize)]
pub struct DasPriceInfo {
    pub price_per_token: Option<f64>,
    pub currency: Option<String>,
}

impl HeliusClient {
    pub fn new(api_key: &str, rpc_url: &str, timeout: Duration) -> Result<Self, RpcError> {
        Ok(Self {
            api_key: api_key.to_string(),
            rpc_url: rpc_url.trim_end_matches('/').to_string(),
            client: Client::builder().timeout(timeout).build()?,
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/", self.rpc_url)
    }
}

#[async_trait]
impl RpcTransport for HeliusClient {
    async fn call(&self, method: &str, params: Value) -> Result<Value, RpcError> {
        let rpc_request = JsonRpcRequest::new(REQUEST_ID, method, params);

        debug!("Helius RPC call: {}", method);

        let response = self
            .client
            .post(self.endpoint())
            .query(&[("api-key", self.api_key.as_str())])
            .json(&rpc_request)
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            let error_text = response.text().await.unwrap_or_default();
            return Err(RpcError::RateLimited(error_text));
        }
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            error!("Helius {} error: {} - {}", method, status, error_text);
            return Err(RpcError::HttpStatus {
                status: status.as_u16(),
                body: error_text,
            });
        }

        let envelope: JsonRpcResponse = response.json().await.map_err(|e| {
            if e.is_decode() {
                RpcError::IncompleteData(format!("{} response is not a JSON-RPC envelope: {}", method, e))
            } else {
                RpcError::Transport(e)
            }
        })?;
        envelope.into_result()
    }
}
