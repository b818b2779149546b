//! In-memory `RpcTransport` that replays queued responses per method.

use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use crate::api::RpcTransport;
use crate::error::RpcError;

#[derive(Default)]
pub struct ScriptedRpc {
    responses: Mutex<HashMap<String, VecDeque<Result<Value, RpcError>>>>,
    requests: Mutex<Vec<(String, Value)>>,
}

impl ScriptedRpc {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, method: &str, response: Result<Value, RpcError>) {
        self.responses
            .lock()
            .unwrap()
            .entry(method.to_string())
            .or_default()
            .push_back(response);
    }

    /// Queues a `getTokenAccounts` page of `(owner, raw amount)` pairs.
    pub fn push_page(&self, accounts: &[(&str, u64)], cursor: Option<&str>) {
        let token_accounts: Vec<Value> = accounts
            .iter()
            .map(|(owner, amount)| json!({ "owner": owner, "amount": amount }))
            .collect();
        let mut page = json!({ "token_accounts": token_accounts });
        if let Some(cursor) = cursor {
            page["cursor"] = json!(cursor);
        }
        self.push("getTokenAccounts", Ok(page));
    }

    pub fn push_decimals(&self, decimals: u8) {
        self.push(
            "getTokenSupply",
            Ok(json!({ "context": { "slot": 1 }, "value": { "decimals": decimals } })),
        );
    }

    /// Scripts a full single-page holder fetch.
    pub fn push_holders(&self, accounts: &[(&str, u64)], decimals: u8) {
        self.push_decimals(decimals);
        self.push_page(accounts, None);
    }

    /// Queues a minimal fungible `getAsset` result named after the mint.
    pub fn push_asset(&self, mint: &str) {
        self.push(
            "getAsset",
            Ok(json!({
                "id": mint,
                "content": { "metadata": { "name": mint, "symbol": "TKN" } },
                "token_info": { "decimals": 0, "supply": 100 }
            })),
        );
    }

    pub fn calls(&self, method: &str) -> usize {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|(m, _)| m == method)
            .count()
    }

    pub fn params(&self, method: &str) -> Vec<Value> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|(m, _)| m == method)
            .map(|(_, p)| p.clone())
            .collect()
    }
}

#[async_trait]
impl RpcTransport for ScriptedRpc {
    async fn call(&self, method: &str, params: Value) -> Result<Value, RpcError> {
        self.requests
            .lock()
            .unwrap()
            .push((method.to_string(), params));

        self.responses
            .lock()
            .unwrap()
            .get_mut(method)
            .and_then(VecDeque::pop_front)
            .unwrap_or_else(|| {
                Err(RpcError::IncompleteData(format!("no scripted response for {}", method)))
            })
    }
}
