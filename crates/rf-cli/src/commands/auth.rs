use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::commands::AuthCommands;
use crate::output::output;

use super::SessionResponse;

/// Handle `rfl auth <subcommand>`.
pub async fn handle(
    action: &AuthCommands,
    flags: &GlobalFlags,
    config: &rf_config::RedflagConfig,
) -> anyhow::Result<()> {
    match action {
        AuthCommands::Login => login(flags, config).await,
        AuthCommands::Logout => logout(flags, config).await,
        AuthCommands::Status => status(flags, config).await,
    }
}

async fn login(flags: &GlobalFlags, config: &rf_config::RedflagConfig) -> anyhow::Result<()> {
    config.wallet.require_configured()?;

    let mut bootstrap = super::build_bootstrap(config);
    let session = bootstrap.initialize().await;
    let session = if session.is_authenticated() {
        tracing::debug!("existing provider session found; skipping interactive login");
        session
    } else {
        bootstrap.login().await
    };

    output(&SessionResponse::from_session(&session), flags.format)
}

#[derive(Serialize)]
struct AuthLogoutResponse {
    cleared: bool,
}

async fn logout(flags: &GlobalFlags, config: &rf_config::RedflagConfig) -> anyhow::Result<()> {
    let mut bootstrap = super::build_bootstrap(config);
    bootstrap.initialize().await;
    bootstrap.logout().await;
    output(&AuthLogoutResponse { cleared: true }, flags.format)
}

#[derive(Serialize)]
struct AuthStatusResponse {
    #[serde(flatten)]
    session: SessionResponse,
    session_source: Option<String>,
    session_since: Option<String>,
    note: Option<String>,
}

async fn status(flags: &GlobalFlags, config: &rf_config::RedflagConfig) -> anyhow::Result<()> {
    let response = if config.wallet.is_configured() {
        let mut bootstrap = super::build_bootstrap(config);
        let session = bootstrap.initialize().await;
        let stored = rf_wallet::session_store::load();
        AuthStatusResponse {
            session: SessionResponse::from_session(&session),
            session_source: rf_wallet::session_store::detect_source(),
            session_since: stored.map(|record| record.created_at.to_rfc3339()),
            note: None,
        }
    } else {
        AuthStatusResponse {
            session: SessionResponse::from_session(&rf_core::WalletSession::disconnected()),
            session_source: None,
            session_since: None,
            note: Some(
                "wallet section not configured; set REDFLAG_WALLET__CLIENT_ID and REDFLAG_WALLET__AUTH_URL"
                    .into(),
            ),
        }
    };

    output(&response, flags.format)
}
