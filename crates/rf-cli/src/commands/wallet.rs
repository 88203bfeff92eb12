use crate::cli::GlobalFlags;
use crate::cli::commands::WalletCommands;
use crate::output::output;

use super::SessionResponse;

/// Handle `rfl wallet <subcommand>`.
///
/// Each invocation is a fresh view load: attach to the provider, resolve the
/// session, render it. `refresh` additionally re-runs the fetch sequence,
/// which is how a connected-but-balance-unknown session recovers.
pub async fn handle(
    action: &WalletCommands,
    flags: &GlobalFlags,
    config: &rf_config::RedflagConfig,
) -> anyhow::Result<()> {
    config.wallet.require_configured()?;

    let mut bootstrap = super::build_bootstrap(config);
    let session = bootstrap.initialize().await;

    let session = match action {
        WalletCommands::Address | WalletCommands::Balance => session,
        WalletCommands::Refresh => bootstrap.refresh().await,
    };

    output(&SessionResponse::from_session(&session), flags.format)
}
