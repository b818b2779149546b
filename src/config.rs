use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Config {
    pub helius_api_key: String,
    pub helius_rpc_url: String,

    pub api_host: String,
    pub api_port: u16,
    pub cors_origin: Option<String>, // Single allowed dashboard origin, any when unset
    pub static_dir: Option<String>,  // Built dashboard to serve, if any

    pub cache_ttl_secs: u64,
    pub cache_max_entries: u64,

    pub holders_page_size: u32,
    pub top_holders_limit: usize,
    pub rpc_max_retries: u32,
    pub rpc_retry_delay_ms: u64,
    pub http_timeout_secs: u64,

    pub ipfs_gateway: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            helius_api_key: String::new(),
            helius_rpc_url: "https://mainnet.helius-rpc.com".to_string(),
            api_host: "0.0.0.0".to_string(),
            api_port: 5000,
            cors_origin: None,
            static_dir: None,
            cache_ttl_secs: 60 * 60,
            cache_max_entries: 500,
            holders_page_size: 1000,
            top_holders_limit: 10,
            rpc_max_retries: 3,
            rpc_retry_delay_ms: 1000,
            http_timeout_secs: 30,
            ipfs_gateway: "https://ipfs.io/ipfs/".to_string(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let defaults = Self::default();

        Ok(Self {
            helius_api_key: env::var("HELIUS_API_KEY")
                .context("HELIUS_API_KEY not set in environment")?,
            helius_rpc_url: env::var("HELIUS_RPC_URL").unwrap_or(defaults.helius_rpc_url),

            api_host: env::var("API_HOST").unwrap_or(defaults.api_host),
            api_port: parse_var("PORT", defaults.api_port)?,
            cors_origin: env::var("CORS_ORIGIN").ok(),
            static_dir: env::var("STATIC_DIR").ok(),

            cache_ttl_secs: parse_var("CACHE_TTL_SECS", defaults.cache_ttl_secs)?,
            cache_max_entries: parse_var("CACHE_MAX_ENTRIES", defaults.cache_max_entries)?,

            holders_page_size: parse_var("HOLDERS_PAGE_SIZE", defaults.holders_page_size)?,
            top_holders_limit: defaults.top_holders_limit,
            rpc_max_retries: parse_var("RPC_MAX_RETRIES", defaults.rpc_max_retries)?,
            rpc_retry_delay_ms: parse_var("RPC_RETRY_DELAY_MS", defaults.rpc_retry_delay_ms)?,
            http_timeout_secs: parse_var("HTTP_TIMEOUT_SECS", defaults.http_timeout_secs)?,

            ipfs_gateway: env::var("IPFS_GATEWAY").unwrap_or(defaults.ipfs_gateway),
        })
    }
}

/// Reads an optional variable, falling back to `default` when unset.
/// A value that is present but malformed is an error.
fn parse_var<T>(name: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("Failed to parse {}", name)),
        Err(_) => Ok(default),
    }
}
