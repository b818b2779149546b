use serde_json::Value;
use std::time::Duration;
use tracing::warn;

use crate::api::RpcTransport;
use crate::error::RpcError;

/// Bounded retry for rate-limited upstream calls, doubling the delay each time.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub initial_delay: Duration,
}

impl RetryPolicy {
    /// Issues `method` until it succeeds, fails with a non-rate-limit error,
    /// or has been retried `max_retries` times.
    pub async fn call(
        &self,
        rpc: &dyn RpcTransport,
        method: &str,
        params: Value,
    ) -> Result<Value, RpcError> {
        let mut delay = self.initial_delay;
        let mut retries_left = self.max_retries;

        loop {
            match rpc.call(method, params.clone()).await {
                Err(e) if e.is_rate_limited() && retries_left > 0 => {
                    warn!(
                        "Rate limit exceeded on {}. Retrying in {:?} ({} retries left)",
                        method, delay, retries_left
                    );
                    tokio::time::sleep(delay).await;
                    delay *= 2;
                    retries_left -= 1;
                }
                other => return other,
            }
        }
    }
}
