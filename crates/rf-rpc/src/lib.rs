//! # rf-rpc
//!
//! JSON-RPC balance query client for redflag.
//!
//! Speaks the Solana-style `getBalance` method against whatever endpoint the
//! wallet provider's session config reports (devnet by default). Balances are
//! returned in base units (lamports); see [`units`] for display conversion.

mod error;
mod http;
pub mod units;

pub use error::RpcError;
pub use units::{LAMPORTS_PER_SOL, lamports_to_sol};

use serde::Deserialize;

// ── Envelope types ─────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct RpcResponse<T> {
    result: Option<T>,
    error: Option<RpcErrorObject>,
}

#[derive(Debug, Deserialize)]
struct RpcErrorObject {
    code: i64,
    message: String,
}

/// `getBalance` returns the value wrapped in a slot context.
#[derive(Debug, Deserialize)]
struct BalanceResult {
    value: u64,
}

// ── Client ─────────────────────────────────────────────────────────

/// HTTP client for querying an account balance over JSON-RPC.
pub struct RpcClient {
    http: reqwest::Client,
    endpoint: String,
}

impl RpcClient {
    /// Create a client for `endpoint` with the default 10 s request timeout.
    ///
    /// # Panics
    ///
    /// Panics if the underlying `reqwest::Client` fails to build.
    #[must_use]
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self::with_timeout(endpoint, std::time::Duration::from_secs(10))
    }

    /// Create a client for `endpoint` with an explicit request timeout.
    ///
    /// # Panics
    ///
    /// Panics if the underlying `reqwest::Client` fails to build.
    #[must_use]
    pub fn with_timeout(endpoint: impl Into<String>, timeout: std::time::Duration) -> Self {
        Self {
            http: reqwest::Client::builder()
                .user_agent("redflag/0.1")
                .timeout(timeout)
                .build()
                .expect("reqwest client should build"),
            endpoint: endpoint.into(),
        }
    }

    /// The endpoint this client queries.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Query the balance for `address`, in base units.
    ///
    /// # Errors
    ///
    /// Returns [`RpcError`] if the HTTP request fails, the endpoint returns a
    /// non-success status, the JSON-RPC envelope carries an error object, or
    /// the response cannot be parsed.
    pub async fn get_balance(&self, address: &str) -> Result<u64, RpcError> {
        let request = serde_json::json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": "getBalance",
            "params": [address],
        });

        let resp = self.http.post(&self.endpoint).json(&request).send().await?;
        let resp = http::check_response(resp).await?;
        let body = resp.text().await?;
        parse_balance(&body)
    }
}

/// Decode a `getBalance` response body.
fn parse_balance(body: &str) -> Result<u64, RpcError> {
    let envelope: RpcResponse<BalanceResult> =
        serde_json::from_str(body).map_err(|e| RpcError::Parse(e.to_string()))?;

    if let Some(error) = envelope.error {
        return Err(RpcError::Rpc {
            code: error.code,
            message: error.message,
        });
    }

    envelope
        .result
        .map(|r| r.value)
        .ok_or_else(|| RpcError::Parse("getBalance response carried neither result nor error".into()))
}
