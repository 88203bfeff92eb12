use std::time::Duration;

use crate::error::WalletError;

/// Balance query collaborator: the one call the bootstrap needs from the
/// network endpoint the provider reported.
#[allow(async_fn_in_trait)]
pub trait BalanceQuery {
    /// Query the base-unit balance for `address` against `rpc_target`.
    ///
    /// # Errors
    ///
    /// Returns `WalletError::SessionQuery` when the query fails; the
    /// bootstrap keeps the session connected with balance unknown.
    async fn get_balance(&self, rpc_target: &str, address: &str) -> Result<u64, WalletError>;
}

/// Production [`BalanceQuery`] over the JSON-RPC client.
///
/// The endpoint comes from the provider's session config at fetch time, so
/// a client is built per query rather than held for one fixed endpoint.
pub struct RpcBalance {
    timeout: Duration,
}

impl RpcBalance {
    #[must_use]
    pub const fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

impl Default for RpcBalance {
    fn default() -> Self {
        Self::new(Duration::from_secs(10))
    }
}

impl BalanceQuery for RpcBalance {
    async fn get_balance(&self, rpc_target: &str, address: &str) -> Result<u64, WalletError> {
        let client = rf_rpc::RpcClient::with_timeout(rpc_target, self.timeout);
        client
            .get_balance(address)
            .await
            .map_err(|e| WalletError::SessionQuery(format!("balance query against {rpc_target}: {e}")))
    }
}
