//! Balance query error types.

use thiserror::Error;

/// Errors that can occur when querying a balance endpoint.
#[derive(Debug, Error)]
pub enum RpcError {
    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Endpoint returned a non-success status code.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code returned by the endpoint.
        status: u16,
        /// Error message or response body.
        message: String,
    },

    /// The JSON-RPC envelope carried an error object.
    #[error("RPC error {code}: {message}")]
    Rpc {
        /// JSON-RPC error code (e.g., -32602 invalid params).
        code: i64,
        /// JSON-RPC error message.
        message: String,
    },

    /// Failed to parse an endpoint response.
    #[error("parse error: {0}")]
    Parse(String),

    /// The endpoint returned a 429 Too Many Requests response.
    #[error("rate limited — retry after {retry_after_secs}s")]
    RateLimited {
        /// Seconds to wait before retrying.
        retry_after_secs: u64,
    },
}
