//! Upstream RPC access.
//!
//! The token data core talks to the chain only through [`RpcTransport`], so the
//! Helius client can be swapped for a scripted transport in tests.

pub mod helius;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::RpcError;

/// A single JSON-RPC endpoint. Implementations perform no retry.
#[async_trait]
pub trait RpcTransport: Send + Sync {
    async fn call(&self, method: &str, params: Value) -> Result<Value, RpcError>;
}

/// JSON-RPC 2.0 request wrapper
#[derive(Debug, Serialize)]
pub struct JsonRpcRequest<'a, T> {
    pub jsonrpc: &'static str,
    pub id: &'a str,
    pub method: &'a str,
    pub params: T,
}

impl<'a, T> JsonRpcRequest<'a, T> {
    pub fn new(id: &'a str, method: &'a str, params: T) -> Self {
        Self {
            jsonrpc: "2.0",
            id,
            method,
            params,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct JsonRpcErrorObject {
    #[serde(default)]
    pub code: i64,
    pub message: String,
}

/// JSON-RPC response envelope: `{ result, error }`.
#[derive(Debug, Deserialize)]
pub struct JsonRpcResponse {
    #[serde(default)]
    pub result: Option<Value>,
    #[serde(default)]
    pub error: Option<JsonRpcErrorObject>,
}

impl JsonRpcResponse {
    /// Unwraps the envelope. An `error` field wins over any `result`; a missing
    /// result comes back as `Value::Null` and callers decide what that means.
    pub fn into_result(self) -> Result<Value, RpcError> {
        if let Some(err) = self.error {
            return Err(RpcError::from_envelope(err.code, err.message));
        }
        Ok(self.result.unwrap_or(Value::Null))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_envelope_with_error() {
        let response: JsonRpcResponse = serde_json::from_value(json!({
            "jsonrpc": "2.0",
            "id": "1",
            "error": { "code": -32429, "message": "Rate limit exceeded" }
        }))
        .unwrap();

        let err = response.into_result().unwrap_err();
        assert!(err.is_rate_limited());
    }

    #[test]
    fn test_envelope_without_result() {
        let response: JsonRpcResponse =
            serde_json::from_value(json!({ "jsonrpc": "2.0", "id": "1" })).unwrap();

        assert_eq!(response.into_result().unwrap(), Value::Null);
    }

    #[test]
    fn test_request_serialization() {
        let request = JsonRpcRequest::new("token-lens", "getAsset", json!({ "id": "Mint111" }));
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["jsonrpc"], "2.0");
        assert_eq!(value["method"], "getAsset");
        assert_eq!(value["params"]["id"], "Mint111");
    }
}
