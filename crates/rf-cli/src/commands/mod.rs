pub mod auth;
pub mod directory;
pub mod wallet;

use std::time::Duration;

use serde::Serialize;

use rf_core::WalletSession;
use rf_wallet::{HostedProvider, HostedProviderOptions, RpcBalance, SessionBootstrap};

/// Build the session bootstrap at the composition root: hosted provider and
/// balance client wired from config, injected rather than reached globally.
pub(crate) fn build_bootstrap(
    config: &rf_config::RedflagConfig,
) -> SessionBootstrap<HostedProvider, RpcBalance> {
    let provider = HostedProvider::new(HostedProviderOptions {
        auth_url: config.wallet.auth_url.clone(),
        client_id: config.wallet.client_id.clone(),
        chain_id: config.wallet.chain_id.clone(),
        fallback_rpc_url: config.rpc.url.clone(),
        request_timeout: Duration::from_secs(config.rpc.timeout_secs),
        login_timeout: Duration::from_secs(config.wallet.login_timeout_secs),
    });
    let balance = RpcBalance::new(Duration::from_secs(config.rpc.timeout_secs));
    SessionBootstrap::new(provider, balance)
}

/// Session snapshot as rendered by auth/wallet commands.
#[derive(Serialize)]
pub(crate) struct SessionResponse {
    authenticated: bool,
    status: String,
    address: Option<String>,
    balance_lamports: Option<u64>,
    balance_sol: Option<f64>,
}

impl SessionResponse {
    pub(crate) fn from_session(session: &WalletSession) -> Self {
        Self {
            authenticated: session.is_authenticated(),
            status: session.status().to_string(),
            address: session.address().map(ToString::to_string),
            balance_lamports: session.balance(),
            balance_sol: session.balance().map(rf_rpc::lamports_to_sol),
        }
    }
}
