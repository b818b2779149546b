//! Token data core: holder aggregation, metadata lookup, the shared cache and
//! the facade the web layer calls into.

pub mod cache;
pub mod holders;
pub mod metadata;
pub mod retry;

#[cfg(test)]
pub mod testing;

use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use crate::api::RpcTransport;
use crate::config::Config;
use crate::error::TokenDataError;
use crate::models::{TokenComparison, TokenHolderSet, TokenInfo};

use self::cache::TokenCache;
use self::holders::HolderAggregator;
use self::metadata::MetadataFetcher;
use self::retry::RetryPolicy;

/// Composes holder and metadata fetches over one shared cache.
pub struct TokenInfoService {
    holders: HolderAggregator,
    metadata: MetadataFetcher,
}

impl TokenInfoService {
    pub fn new(holders: HolderAggregator, metadata: MetadataFetcher) -> Self {
        Self { holders, metadata }
    }

    /// Wires both fetchers to `rpc` and a fresh cache sized from `config`.
    pub fn from_config(rpc: Arc<dyn RpcTransport>, config: &Config) -> Self {
        let cache = TokenCache::new(
            config.cache_max_entries,
            Duration::from_secs(config.cache_ttl_secs),
        );
        let retry = RetryPolicy {
            max_retries: config.rpc_max_retries,
            initial_delay: Duration::from_millis(config.rpc_retry_delay_ms),
        };
        info!(
            "Token cache: {} entries, ttl {}s",
            config.cache_max_entries, config.cache_ttl_secs
        );

        Self::new(
            HolderAggregator::new(
                rpc.clone(),
                cache.clone(),
                retry,
                config.holders_page_size,
                config.top_holders_limit,
            ),
            MetadataFetcher::new(rpc, cache, retry, &config.ipfs_gateway),
        )
    }

    pub async fn get_holders(&self, mint: &str) -> Result<Arc<TokenHolderSet>, TokenDataError> {
        self.holders.fetch_holders(mint).await
    }

    /// Fetches holders and metadata concurrently; the first failure wins.
    pub async fn get_token_info(&self, mint: &str) -> Result<TokenInfo, TokenDataError> {
        let (holders, metadata) = futures::try_join!(
            self.holders.fetch_holders(mint),
            self.metadata.fetch_metadata(mint),
        )?;

        Ok(TokenInfo { holders, metadata })
    }

    pub async fn compare_tokens(
        &self,
        mint1: &str,
        mint2: &str,
    ) -> Result<TokenComparison, TokenDataError> {
        let (token1, token2) =
            futures::try_join!(self.get_token_info(mint1), self.get_token_info(mint2))?;
        let common_holders_count = token1.common_holders_count(&token2);

        Ok(TokenComparison {
            token1,
            token2,
            common_holders_count,
        })
    }
}
