use serde::{Serialize, Serializer};
use std::collections::HashSet;
use std::sync::Arc;

use super::holder::TokenHolderSet;

/// Token description as shown on the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenMetadata {
    pub name: String,
    pub symbol: String,
    pub description: String,
    pub image: String,           // HTTP URL, ipfs:// already rewritten
    pub supply: f64,             // Decimal-adjusted supply
    pub price_per_token: PricePerToken,
    pub market_cap: MarketCap,
    pub links: TokenLinks,
}

/// Serialized as `"<price> <currency>"` or `"N/A"`.
#[derive(Debug, Clone, PartialEq)]
pub enum PricePerToken {
    Available { price: f64, currency: String },
    Unavailable,
}

impl PricePerToken {
    pub fn price(&self) -> Option<f64> {
        match self {
            PricePerToken::Available { price, .. } => Some(*price),
            PricePerToken::Unavailable => None,
        }
    }
}

impl Serialize for PricePerToken {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            PricePerToken::Available { price, currency } => {
                serializer.serialize_str(&format!("{} {}", price, currency))
            }
            PricePerToken::Unavailable => serializer.serialize_str("N/A"),
        }
    }
}

/// Serialized as a number or `"N/A"`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MarketCap {
    Value(f64),
    Unavailable,
}

impl Serialize for MarketCap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            MarketCap::Value(value) => serializer.serialize_f64(*value),
            MarketCap::Unavailable => serializer.serialize_str("N/A"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TokenLinks {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub twitter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discord: Option<String>,
}

/// Holder and metadata views of one mint, fetched together.
#[derive(Debug, Clone)]
pub struct TokenInfo {
    pub holders: Arc<TokenHolderSet>,
    pub metadata: Arc<TokenMetadata>,
}

impl TokenInfo {
    pub fn holder_count(&self) -> usize {
        self.holders.holder_count
    }

    /// Number of owners present in both holder sets.
    pub fn common_holders_count(&self, other: &TokenInfo) -> usize {
        let (small, large) = if self.holders.holders.len() <= other.holders.holders.len() {
            (&self.holders.holders, &other.holders.holders)
        } else {
            (&other.holders.holders, &self.holders.holders)
        };
        let lookup: HashSet<&str> = large.iter().map(String::as_str).collect();
        small
            .iter()
            .map(String::as_str)
            .collect::<HashSet<_>>()
            .into_iter()
            .filter(|owner| lookup.contains(owner))
            .count()
    }
}

#[derive(Debug, Clone)]
pub struct TokenComparison {
    pub token1: TokenInfo,
    pub token2: TokenInfo,
    pub common_holders_count: usize,
}
