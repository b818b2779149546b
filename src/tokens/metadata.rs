//! Token metadata lookup via the DAS `getAsset` method.

use serde_json::json;
use std::sync::Arc;
use tracing::{debug, info};

use super::cache::TokenCache;
use super::retry::RetryPolicy;
use crate::api::helius::DasAsset;
use crate::api::RpcTransport;
use crate::error::{RpcError, TokenDataError};
use crate::models::{MarketCap, PricePerToken, TokenLinks, TokenMetadata};

const DEFAULT_CURRENCY: &str = "USD";

pub struct MetadataFetcher {
    rpc: Arc<dyn RpcTransport>,
    cache: TokenCache,
    retry: RetryPolicy,
    ipfs_gateway: String,
}

impl MetadataFetcher {
    pub fn new(
        rpc: Arc<dyn RpcTransport>,
        cache: TokenCache,
        retry: RetryPolicy,
        ipfs_gateway: &str,
    ) -> Self {
        Self {
            rpc,
            cache,
            retry,
            ipfs_gateway: ipfs_gateway.to_string(),
        }
    }

    pub async fn fetch_metadata(&self, mint: &str) -> Result<Arc<TokenMetadata>, TokenDataError> {
        if let Some(cached) = self.cache.get_metadata(mint).await {
            return Ok(cached);
        }

        let result = self
            .retry
            .call(self.rpc.as_ref(), "getAsset", json!({ "id": mint }))
            .await
            .map_err(TokenDataError::Metadata)?;

        let asset: DasAsset = serde_json::from_value(result).map_err(|e| {
            TokenDataError::Metadata(RpcError::IncompleteData(format!("getAsset for {}: {}", mint, e)))
        })?;

        let metadata = Arc::new(
            token_metadata_from_asset(asset, &self.ipfs_gateway).map_err(TokenDataError::Metadata)?,
        );
        debug!(
            "Metadata for {}: supply {}, price {:?}",
            mint,
            metadata.supply,
            metadata.price_per_token.price()
        );

        self.cache.set_metadata(mint, metadata.clone()).await;
        info!("[Cache Set] Metadata for {}", mint);

        Ok(metadata)
    }
}

/// Normalises a DAS asset into dashboard metadata.
pub fn token_metadata_from_asset(asset: DasAsset, ipfs_gateway: &str) -> Result<TokenMetadata, RpcError> {
    let token_info = asset
        .token_info
        .ok_or_else(|| RpcError::IncompleteData(format!("asset {} has no token_info", asset.id)))?;
    let raw_supply = token_info
        .supply
        .ok_or_else(|| RpcError::IncompleteData(format!("asset {} has no supply", asset.id)))?;
    let decimals = token_info.decimals.unwrap_or(0);
    let supply = raw_supply as f64 / 10f64.powi(i32::from(decimals));

    let price_per_token = match token_info.price_info {
        Some(info) => match info.price_per_token {
            Some(price) if price > 0.0 => PricePerToken::Available {
                price,
                currency: info.currency.unwrap_or_else(|| DEFAULT_CURRENCY.to_string()),
            },
            _ => PricePerToken::Unavailable,
        },
        None => PricePerToken::Unavailable,
    };
    let market_cap = match price_per_token.price() {
        Some(price) => MarketCap::Value(price * supply),
        None => MarketCap::Unavailable,
    };

    let content = asset.content;
    let (metadata, links, files) = match content {
        Some(c) => (c.metadata, c.links, c.files.unwrap_or_default()),
        None => (None, None, Vec::new()),
    };

    let image = links
        .as_ref()
        .and_then(|l| l.image.clone())
        .or_else(|| files.into_iter().find_map(|f| f.uri))
        .map(|uri| normalize_ipfs_uri(&uri, ipfs_gateway))
        .unwrap_or_else(|| "No Image".to_string());

    let (name, symbol, description) = match metadata {
        Some(m) => (m.name, m.symbol, m.description),
        None => (None, None, None),
    };

    Ok(TokenMetadata {
        name: non_empty(name).unwrap_or_else(|| "Unknown".to_string()),
        symbol: non_empty(symbol).unwrap_or_else(|| "Unknown".to_string()),
        description: non_empty(description).unwrap_or_else(|| "No Description".to_string()),
        image,
        supply,
        price_per_token,
        market_cap,
        links: links
            .map(|l| TokenLinks {
                website: l.external_url,
                twitter: l.twitter,
                discord: l.discord,
            })
            .unwrap_or_default(),
    })
}

/// Rewrites `ipfs://<cid>` to `<gateway><cid>`; other URIs pass through.
pub fn normalize_ipfs_uri(uri: &str, gateway: &str) -> String {
    match uri.strip_prefix("ipfs://") {
        Some(path) => format!("{}/{}", gateway.trim_end_matches('/'), path.trim_start_matches("ipfs/")),
        None => uri.to_string(),
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokens::testing::ScriptedRpc;
    use serde_json::Value;
    use std::time::Duration;

    const GATEWAY: &str = "https://ipfs.io/ipfs/";

    fn fetcher(rpc: Arc<ScriptedRpc>) -> MetadataFetcher {
        let retry = RetryPolicy {
            max_retries: 3,
            initial_delay: Duration::from_millis(1),
        };
        MetadataFetcher::new(rpc, TokenCache::new(100, Duration::from_secs(3600)), retry, GATEWAY)
    }

    fn asset_json() -> Value {
        json!({
            "interface": "FungibleToken",
            "id": "Mint111",
            "content": {
                "metadata": { "name": "Test Token", "symbol": "TEST", "description": "A token" },
                "links": {
                    "image": "ipfs://QmImageCid",
                    "external_url": "https://test.example",
                    "twitter": "https://x.com/test"
                },
                "files": [{ "uri": "https://cdn.example/fallback.png" }]
            },
            "token_info": {
                "decimals": 6,
                "supply": 2_000_000_000u64,
                "price_info": { "price_per_token": 0.25, "currency": "USDC" }
            }
        })
    }

    #[tokio::test]
    async fn test_metadata_normalized_from_asset() {
        let rpc = Arc::new(ScriptedRpc::new());
        rpc.push("getAsset", Ok(asset_json()));

        let metadata = fetcher(rpc.clone()).fetch_metadata("Mint111").await.unwrap();

        assert_eq!(metadata.name, "Test Token");
        assert_eq!(metadata.symbol, "TEST");
        assert_eq!(metadata.description, "A token");
        assert_eq!(metadata.image, "https://ipfs.io/ipfs/QmImageCid");
        assert_eq!(metadata.supply, 2000.0);
        assert_eq!(
            metadata.price_per_token,
            PricePerToken::Available { price: 0.25, currency: "USDC".into() }
        );
        assert_eq!(metadata.market_cap, MarketCap::Value(500.0));
        assert_eq!(metadata.links.website.as_deref(), Some("https://test.example"));
        assert_eq!(metadata.links.discord, None);
        assert_eq!(rpc.params("getAsset")[0]["id"], "Mint111");
    }

    #[tokio::test]
    async fn test_missing_fields_fall_back() {
        let rpc = Arc::new(ScriptedRpc::new());
        rpc.push(
            "getAsset",
            Ok(json!({
                "id": "Mint111",
                "content": { "metadata": { "name": "" } },
                "token_info": { "supply": 1000 }
            })),
        );

        let metadata = fetcher(rpc).fetch_metadata("Mint111").await.unwrap();

        assert_eq!(metadata.name, "Unknown");
        assert_eq!(metadata.symbol, "Unknown");
        assert_eq!(metadata.description, "No Description");
        assert_eq!(metadata.image, "No Image");
        assert_eq!(metadata.supply, 1000.0);
        assert_eq!(metadata.price_per_token, PricePerToken::Unavailable);
        assert_eq!(metadata.market_cap, MarketCap::Unavailable);
    }

    #[tokio::test]
    async fn test_missing_token_info_is_incomplete() {
        let rpc = Arc::new(ScriptedRpc::new());
        rpc.push("getAsset", Ok(json!({ "id": "Mint111", "content": null })));

        let err = fetcher(rpc).fetch_metadata("Mint111").await.unwrap_err();
        assert!(matches!(err, TokenDataError::Metadata(RpcError::IncompleteData(_))));
    }

    #[tokio::test]
    async fn test_missing_supply_is_incomplete() {
        let rpc = Arc::new(ScriptedRpc::new());
        rpc.push(
            "getAsset",
            Ok(json!({ "id": "Mint111", "token_info": { "decimals": 6 } })),
        );

        let err = fetcher(rpc.clone()).fetch_metadata("Mint111").await.unwrap_err();
        assert!(matches!(err, TokenDataError::Metadata(RpcError::IncompleteData(_))));
    }

    #[tokio::test]
    async fn test_upstream_error_propagates_and_is_not_cached() {
        let rpc = Arc::new(ScriptedRpc::new());
        rpc.push(
            "getAsset",
            Err(RpcError::Upstream { code: -32000, message: "Asset not found".into() }),
        );
        rpc.push("getAsset", Ok(asset_json()));
        let fetcher = fetcher(rpc.clone());

        let err = fetcher.fetch_metadata("Mint111").await.unwrap_err();
        assert!(err.to_string().contains("Asset not found"));

        assert!(fetcher.fetch_metadata("Mint111").await.is_ok());
        assert_eq!(rpc.calls("getAsset"), 2);
    }

    #[tokio::test]
    async fn test_cached_metadata_is_reused() {
        let rpc = Arc::new(ScriptedRpc::new());
        rpc.push("getAsset", Ok(asset_json()));
        let fetcher = fetcher(rpc.clone());

        let first = fetcher.fetch_metadata("Mint111").await.unwrap();
        let second = fetcher.fetch_metadata("Mint111").await.unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(rpc.calls("getAsset"), 1);
    }

    #[test]
    fn test_normalize_ipfs_uri() {
        assert_eq!(normalize_ipfs_uri("ipfs://QmCid/1.png", GATEWAY), "https://ipfs.io/ipfs/QmCid/1.png");
        assert_eq!(normalize_ipfs_uri("ipfs://ipfs/QmCid", GATEWAY), "https://ipfs.io/ipfs/QmCid");
        assert_eq!(normalize_ipfs_uri("https://arweave.net/x", GATEWAY), "https://arweave.net/x");
    }
}
