//! Balance query endpoint configuration.

use serde::{Deserialize, Serialize};

/// Default balance endpoint when the provider reports none.
fn default_url() -> String {
    "https://api.devnet.solana.com".to_string()
}

/// Default per-request timeout in seconds.
const fn default_timeout_secs() -> u64 {
    10
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RpcConfig {
    /// Fallback JSON-RPC endpoint. The endpoint reported by the provider's
    /// session config takes precedence at fetch time.
    #[serde(default = "default_url")]
    pub url: String,

    /// Per-request timeout, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for RpcConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_devnet() {
        let config = RpcConfig::default();
        assert_eq!(config.url, "https://api.devnet.solana.com");
        assert_eq!(config.timeout_secs, 10);
    }
}
