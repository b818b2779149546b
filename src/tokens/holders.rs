//! Holder aggregation over the paginated token-account index.

use serde_json::json;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info};

use super::cache::TokenCache;
use super::retry::RetryPolicy;
use crate::api::helius::{TokenAccountsPage, TokenSupplyResult};
use crate::api::RpcTransport;
use crate::error::{RpcError, TokenDataError};
use crate::models::{HolderRecord, TokenHolderSet, TopHolder};

/// Per-owner raw balances in first-encounter order.
#[derive(Debug, Default)]
pub struct OwnerBalances {
    index: HashMap<String, usize>,
    entries: Vec<(String, u128)>,
    accounts_seen: usize,
}

impl OwnerBalances {
    /// Adds one token account. Empty accounts are counted but not recorded.
    pub fn add(&mut self, owner: &str, raw_amount: u64) {
        self.accounts_seen += 1;
        if raw_amount == 0 {
            return;
        }
        match self.index.get(owner) {
            Some(&i) => self.entries[i].1 += u128::from(raw_amount),
            None => {
                self.index.insert(owner.to_string(), self.entries.len());
                self.entries.push((owner.to_string(), u128::from(raw_amount)));
            }
        }
    }

    pub fn accounts_seen(&self) -> usize {
        self.accounts_seen
    }

    pub fn owner_count(&self) -> usize {
        self.entries.len()
    }

    /// Decimal-adjusted records, one per owner.
    pub fn into_records(self, decimals: u8) -> Vec<HolderRecord> {
        let scale = 10f64.powi(i32::from(decimals));
        self.entries
            .into_iter()
            .map(|(owner, raw)| HolderRecord {
                owner,
                amount: raw as f64 / scale,
            })
            .collect()
    }
}

/// Ranks aggregated records into a `TokenHolderSet`.
pub fn build_holder_set(records: Vec<HolderRecord>, top_limit: usize) -> TokenHolderSet {
    let total_supply: f64 = records.iter().map(|r| r.amount).sum();
    let holders: Vec<String> = records.iter().map(|r| r.owner.clone()).collect();

    // Stable sort keeps encounter order for equal balances
    let mut ranked = records;
    ranked.sort_by(|a, b| b.amount.total_cmp(&a.amount));

    let top_holders = ranked
        .into_iter()
        .take(top_limit)
        .enumerate()
        .map(|(i, record)| TopHolder {
            rank: i + 1,
            percentage: format_percentage(record.amount, total_supply),
            owner: record.owner,
            amount: record.amount,
        })
        .collect();

    TokenHolderSet {
        holder_count: holders.len(),
        holders,
        top_holders,
        total_supply,
    }
}

fn format_percentage(amount: f64, total: f64) -> String {
    if total <= 0.0 {
        return "0.00".to_string();
    }
    // Exact ties round half away from zero, not to even
    let pct = amount / total * 100.0;
    format!("{:.2}", (pct * 100.0).round() / 100.0)
}

pub struct HolderAggregator {
    rpc: Arc<dyn RpcTransport>,
    cache: TokenCache,
    retry: RetryPolicy,
    page_size: u32,
    top_limit: usize,
}

impl HolderAggregator {
    pub fn new(
        rpc: Arc<dyn RpcTransport>,
        cache: TokenCache,
        retry: RetryPolicy,
        page_size: u32,
        top_limit: usize,
    ) -> Self {
        Self {
            rpc,
            cache,
            retry,
            page_size,
            top_limit,
        }
    }

    /// Returns the aggregated holders of `mint`, from cache when fresh.
    pub async fn fetch_holders(&self, mint: &str) -> Result<Arc<TokenHolderSet>, TokenDataError> {
        if let Some(cached) = self.cache.get_holders(mint).await {
            return Ok(cached);
        }

        let decimals = self.fetch_decimals(mint).await.map_err(TokenDataError::Holders)?;
        let balances = self.fetch_balances(mint).await.map_err(TokenDataError::Holders)?;
        debug!(
            "Aggregated {} accounts into {} owners for {}",
            balances.accounts_seen(),
            balances.owner_count(),
            mint
        );

        let holder_set = Arc::new(build_holder_set(
            balances.into_records(decimals),
            self.top_limit,
        ));

        self.cache.set_holders(mint, holder_set.clone()).await;
        info!("[Cache Set] Holders for {}", mint);

        Ok(holder_set)
    }

    async fn fetch_decimals(&self, mint: &str) -> Result<u8, RpcError> {
        let result = self
            .retry
            .call(self.rpc.as_ref(), "getTokenSupply", json!([mint]))
            .await?;
        let supply: TokenSupplyResult = serde_json::from_value(result)
            .map_err(|e| RpcError::IncompleteData(format!("getTokenSupply for {}: {}", mint, e)))?;
        Ok(supply.value.decimals)
    }

    /// Walks the account index page by page; each request depends on the
    /// previous page's cursor.
    async fn fetch_balances(&self, mint: &str) -> Result<OwnerBalances, RpcError> {
        let mut balances = OwnerBalances::default();
        let mut cursor: Option<String> = None;
        let mut page_number = 0usize;

        loop {
            let mut params = json!({ "mint": mint, "limit": self.page_size });
            if let Some(cursor) = &cursor {
                params["cursor"] = json!(cursor);
            }

            let result = self
                .retry
                .call(self.rpc.as_ref(), "getTokenAccounts", params)
                .await?;
            page_number += 1;

            if result.is_null() {
                debug!("No more results for {} after {} pages", mint, page_number);
                break;
            }

            let page: TokenAccountsPage = serde_json::from_value(result).map_err(|e| {
                RpcError::IncompleteData(format!("getTokenAccounts page {} for {}: {}", page_number, mint, e))
            })?;

            if page.token_accounts.is_empty() {
                debug!("No more results for {} after {} pages", mint, page_number);
                break;
            }

            debug!(
                "Page {} for {}: {} accounts",
                page_number,
                mint,
                page.token_accounts.len()
            );
            for account in &page.token_accounts {
                balances.add(&account.owner, account.amount);
            }

            match page.cursor {
                Some(next) => cursor = Some(next),
                None => break,
            }
        }

        Ok(balances)
    }
}
