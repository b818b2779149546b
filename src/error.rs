use thiserror::Error;

/// Failures talking to the upstream JSON-RPC endpoint.
#[derive(Debug, Error)]
pub enum RpcError {
    #[error("RPC Error: {message} (code {code})")]
    Upstream { code: i64, message: String },

    #[error("Rate limit exceeded: {0}")]
    RateLimited(String),

    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("HTTP error! status: {status}, message: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("Incomplete data: {0}")]
    IncompleteData(String),
}

impl RpcError {
    /// Builds the error for a JSON-RPC `error` object, promoting rate-limit
    /// responses to `RateLimited`.
    pub fn from_envelope(code: i64, message: String) -> Self {
        let lowered = message.to_lowercase();
        if code == 429 || code == -32429 || lowered.contains("rate limit") {
            RpcError::RateLimited(message)
        } else {
            RpcError::Upstream { code, message }
        }
    }

    pub fn is_rate_limited(&self) -> bool {
        matches!(self, RpcError::RateLimited(_))
    }
}

/// Errors surfaced by the token data core to the route layer.
#[derive(Debug, Error)]
pub enum TokenDataError {
    #[error("Error fetching token holders: {0}")]
    Holders(#[source] RpcError),

    #[error("Error fetching metadata: {0}")]
    Metadata(#[source] RpcError),
}
