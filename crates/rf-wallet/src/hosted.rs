//! Hosted wallet-auth provider.
//!
//! Production [`WalletProvider`] over a hosted wallet-auth service:
//!
//! 1. `initialize` replays the stored session token against `/v1/session`
//! 2. `connect` runs the interactive flow: `tiny_http` on `127.0.0.1:0`,
//!    browser to the service's authorize page, callback carries the token
//! 3. `request_accounts` / `provider_config` query the live session
//! 4. `disconnect` revokes server-side (best effort) and clears local state

use std::time::Duration;

use serde::Deserialize;

use crate::error::WalletError;
use crate::provider::{ProviderConfig, WalletProvider};
use crate::session_store;

/// Connection settings for the hosted service, mapped from config at the
/// composition root.
#[derive(Debug, Clone)]
pub struct HostedProviderOptions {
    /// Base URL of the wallet-auth service.
    pub auth_url: String,
    /// Client id issued by the service.
    pub client_id: String,
    /// Chain to request sessions for.
    pub chain_id: String,
    /// Balance endpoint to fall back to when the session config omits one.
    pub fallback_rpc_url: String,
    /// Per-request HTTP timeout.
    pub request_timeout: Duration,
    /// How long to wait for the interactive login callback.
    pub login_timeout: Duration,
}

pub struct HostedProvider {
    http: reqwest::Client,
    options: HostedProviderOptions,
    token: Option<String>,
    connected: bool,
    config: Option<ProviderConfig>,
}

#[derive(Debug, Deserialize)]
struct SessionResponse {
    #[serde(default)]
    chain_id: Option<String>,
    #[serde(default)]
    rpc_target: Option<String>,
    #[serde(default)]
    display_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AccountsResponse {
    accounts: Vec<String>,
}

impl HostedProvider {
    /// # Panics
    ///
    /// Panics if the underlying `reqwest::Client` fails to build.
    #[must_use]
    pub fn new(options: HostedProviderOptions) -> Self {
        let http = reqwest::Client::builder()
            .user_agent("redflag/0.1")
            .timeout(options.request_timeout)
            .build()
            .expect("reqwest client should build");
        Self {
            http,
            options,
            token: None,
            connected: false,
            config: None,
        }
    }

    /// Verify a session token with the service and map its network config.
    async fn verify_session(&self, token: &str) -> Result<ProviderConfig, WalletError> {
        let url = format!(
            "{}/v1/session?client_id={}",
            self.options.auth_url,
            urlencoding::encode(&self.options.client_id)
        );
        let resp = self.http.get(&url).bearer_auth(token).send().await?;
        let resp = error_for_status(resp).await?;
        let session: SessionResponse = resp
            .json()
            .await
            .map_err(|e| WalletError::SessionQuery(format!("parse session: {e}")))?;

        Ok(ProviderConfig {
            rpc_target: session
                .rpc_target
                .unwrap_or_else(|| self.options.fallback_rpc_url.clone()),
            chain_id: session
                .chain_id
                .unwrap_or_else(|| self.options.chain_id.clone()),
            display_name: session.display_name.unwrap_or_default(),
        })
    }
}

impl WalletProvider for HostedProvider {
    async fn initialize(&mut self) -> Result<(), WalletError> {
        self.connected = false;
        let Some(stored) = session_store::load() else {
            return Ok(());
        };

        match self.verify_session(&stored.token).await {
            Ok(config) => {
                self.config = Some(config);
                self.token = Some(stored.token);
                self.connected = true;
                Ok(())
            }
            Err(WalletError::Api {
                status: 401 | 403, ..
            }) => {
                tracing::info!("stored wallet session rejected by provider; clearing credentials");
                if let Err(error) = session_store::delete() {
                    tracing::warn!(%error, "failed to clear rejected session");
                }
                Ok(())
            }
            Err(error) => Err(WalletError::ProviderInit(error.to_string())),
        }
    }

    fn is_connected(&self) -> bool {
        self.connected
    }

    async fn connect(&mut self) -> Result<(), WalletError> {
        let token = browser_login(&self.options).await?;
        let config = self
            .verify_session(&token)
            .await
            .map_err(|e| WalletError::Login(format!("session verify after login: {e}")))?;

        session_store::store(&token)?;
        self.config = Some(config);
        self.token = Some(token);
        self.connected = true;
        Ok(())
    }

    async fn disconnect(&mut self) -> Result<(), WalletError> {
        if let Some(token) = self.token.take() {
            // Best-effort server-side revocation; local teardown happens regardless.
            let url = format!("{}/v1/logout", self.options.auth_url);
            match self.http.post(&url).bearer_auth(&token).send().await {
                Ok(resp) if !resp.status().is_success() => {
                    tracing::warn!(status = %resp.status(), "provider logout returned non-success");
                }
                Ok(_) => {}
                Err(error) => {
                    tracing::warn!(%error, "provider logout request failed");
                }
            }
        }
        self.connected = false;
        self.config = None;
        session_store::delete()
    }

    async fn request_accounts(&self) -> Result<Vec<String>, WalletError> {
        let token = self
            .token
            .as_deref()
            .ok_or_else(|| WalletError::SessionQuery("no active provider session".into()))?;
        let url = format!("{}/v1/accounts", self.options.auth_url);
        let resp = self.http.get(&url).bearer_auth(token).send().await?;
        let resp = error_for_status(resp).await?;
        let accounts: AccountsResponse = resp
            .json()
            .await
            .map_err(|e| WalletError::SessionQuery(format!("parse accounts: {e}")))?;
        Ok(accounts.accounts)
    }

    async fn provider_config(&self) -> Result<ProviderConfig, WalletError> {
        if let Some(config) = &self.config {
            return Ok(config.clone());
        }
        let token = self
            .token
            .as_deref()
            .ok_or_else(|| WalletError::SessionQuery("no active provider session".into()))?;
        self.verify_session(token).await
    }
}

/// Map a non-success response to `WalletError::Api`.
async fn error_for_status(resp: reqwest::Response) -> Result<reqwest::Response, WalletError> {
    if resp.status().is_success() {
        return Ok(resp);
    }
    let status = resp.status().as_u16();
    let message = resp.text().await.unwrap_or_default();
    Err(WalletError::Api { status, message })
}

/// Execute the browser-based login flow.
///
/// 1. Start `tiny_http` on `127.0.0.1:0` (random port)
/// 2. Open browser to the service's authorize page with a localhost redirect
/// 3. Wait for the callback carrying the session token (in `spawn_blocking`
///    — `tiny_http::recv` blocks)
///
/// # Errors
///
/// Returns `WalletError::Login` if the server cannot bind, the callback
/// times out, or the state nonce does not match.
async fn browser_login(options: &HostedProviderOptions) -> Result<String, WalletError> {
    let server = tiny_http::Server::http("127.0.0.1:0")
        .map_err(|e| WalletError::Login(format!("failed to bind callback server: {e}")))?;
    let port = server
        .server_addr()
        .to_ip()
        .map(|a| a.port())
        .ok_or_else(|| WalletError::Login("callback server has no port".into()))?;

    // Random 16-byte hex state nonce for CSRF protection
    let mut nonce = [0u8; 16];
    getrandom::fill(&mut nonce)
        .map_err(|e| WalletError::Login(format!("failed to generate state nonce: {e}")))?;
    let state: String = nonce.iter().map(|b| format!("{b:02x}")).collect();

    let redirect_url = format!("http://127.0.0.1:{port}/callback");
    let authorize_url = build_authorize_url(options, &redirect_url, &state);

    eprintln!("Opening browser to: {authorize_url}");
    if let Err(error) = open::that(&authorize_url) {
        eprintln!("Failed to open browser: {error}");
        eprintln!("Open the URL above manually, then return here.");
    }

    let timeout = options.login_timeout;
    tokio::task::spawn_blocking(move || wait_for_callback(&server, timeout, &state))
        .await
        .map_err(|e| WalletError::Login(format!("callback task join: {e}")))?
}

fn build_authorize_url(options: &HostedProviderOptions, redirect_url: &str, state: &str) -> String {
    format!(
        "{}/authorize?client_id={}&chain_id={}&redirect_uri={}&state={}",
        options.auth_url,
        urlencoding::encode(&options.client_id),
        urlencoding::encode(&options.chain_id),
        urlencoding::encode(redirect_url),
        state,
    )
}

/// Block until the callback server receives a request carrying the token.
///
/// Loops on `recv_timeout()`, ignoring requests that aren't the callback
/// (favicon, preflight) and intermediate redirects without a token, so a
/// browser refresh doesn't cause a false failure.
fn wait_for_callback(
    server: &tiny_http::Server,
    timeout: Duration,
    expected_state: &str,
) -> Result<String, WalletError> {
    let deadline = std::time::Instant::now() + timeout;

    loop {
        let remaining = deadline.saturating_duration_since(std::time::Instant::now());
        if remaining.is_zero() {
            return Err(WalletError::Login(format!(
                "login callback timed out after {}s",
                timeout.as_secs()
            )));
        }

        let request = match server.recv_timeout(remaining) {
            Ok(Some(req)) => req,
            Ok(None) => {
                return Err(WalletError::Login(format!(
                    "login callback timed out after {}s",
                    timeout.as_secs()
                )));
            }
            Err(e) => {
                return Err(WalletError::Login(format!("callback recv error: {e}")));
            }
        };

        let url = request.url().to_string();

        if !url.starts_with("/callback") {
            let response = tiny_http::Response::from_string("").with_status_code(204);
            let _ = request.respond(response);
            continue;
        }

        let Some(query) = url.split_once('?').map(|(_, q)| q.to_string()) else {
            respond_html(request, "Sign-in failed", "Missing callback parameters.");
            return Err(WalletError::Login("no query string in callback".into()));
        };

        match parse_callback_query(&query, expected_state) {
            CallbackOutcome::Token(token) => {
                respond_html(request, "Signed in", "You can close this tab.");
                return Ok(token);
            }
            CallbackOutcome::StateMismatch => {
                respond_html(request, "Sign-in failed", "State mismatch. Check CLI output.");
                return Err(WalletError::Login("state mismatch in login callback".into()));
            }
            CallbackOutcome::Pending => {
                // Intermediate redirect without a token; keep waiting.
                respond_html(request, "Waiting for sign-in", "Redirecting, please wait.");
            }
        }
    }
}

enum CallbackOutcome {
    Token(String),
    StateMismatch,
    Pending,
}

/// Extract the session token from the callback query string.
///
/// The service may redirect with `session_token=` (hosted pages) or
/// `token=` (custom redirect pages); both are accepted. A token only counts
/// when the `state` nonce matches.
fn parse_callback_query(query: &str, expected_state: &str) -> CallbackOutcome {
    let mut token = None;
    let mut state = None;
    for pair in query.split('&') {
        if let Some((key, value)) = pair.split_once('=') {
            let Ok(value) = urlencoding::decode(value) else {
                continue;
            };
            match key {
                "session_token" | "token" => token = Some(value.into_owned()),
                "state" => state = Some(value.into_owned()),
                _ => {}
            }
        }
    }

    match token {
        Some(token) if state.as_deref() == Some(expected_state) => CallbackOutcome::Token(token),
        Some(_) => CallbackOutcome::StateMismatch,
        None => CallbackOutcome::Pending,
    }
}

fn respond_html(request: tiny_http::Request, title: &str, detail: &str) {
    let response = tiny_http::Response::from_string(format!(
        "<html><body><h1>{title}</h1><p>{detail}</p></body></html>"
    ))
    .with_header(tiny_http::Header::from_bytes("Content-Type", "text/html").unwrap());
    let _ = request.respond(response);
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn options() -> HostedProviderOptions {
        HostedProviderOptions {
            auth_url: "https://auth.redflag.test".into(),
            client_id: "rf client".into(),
            chain_id: "0x3".into(),
            fallback_rpc_url: "https://api.devnet.solana.com".into(),
            request_timeout: Duration::from_secs(10),
            login_timeout: Duration::from_secs(120),
        }
    }

    #[test]
    fn authorize_url_encodes_parameters() {
        let url = build_authorize_url(&options(), "http://127.0.0.1:9999/callback", "abc123");
        assert_eq!(
            url,
            "https://auth.redflag.test/authorize?client_id=rf%20client&chain_id=0x3\
             &redirect_uri=http%3A%2F%2F127.0.0.1%3A9999%2Fcallback&state=abc123"
        );
    }

    #[test]
    fn callback_accepts_session_token_with_matching_state() {
        let outcome = parse_callback_query("session_token=sess_abc&state=nonce1", "nonce1");
        assert!(matches!(outcome, CallbackOutcome::Token(t) if t == "sess_abc"));
    }

    #[test]
    fn callback_accepts_token_param_alias() {
        let outcome = parse_callback_query("token=sess_abc&state=nonce1", "nonce1");
        assert!(matches!(outcome, CallbackOutcome::Token(t) if t == "sess_abc"));
    }

    #[test]
    fn callback_decodes_url_encoded_token() {
        let outcome = parse_callback_query("session_token=sess%2Babc&state=nonce1", "nonce1");
        assert!(matches!(outcome, CallbackOutcome::Token(t) if t == "sess+abc"));
    }

    #[test]
    fn callback_rejects_state_mismatch() {
        let outcome = parse_callback_query("session_token=sess_abc&state=other", "nonce1");
        assert!(matches!(outcome, CallbackOutcome::StateMismatch));
    }

    #[test]
    fn callback_without_token_keeps_waiting() {
        let outcome = parse_callback_query("state=nonce1&foo=bar", "nonce1");
        assert!(matches!(outcome, CallbackOutcome::Pending));
    }

    #[test]
    fn session_response_fills_missing_fields_from_options() {
        let provider = HostedProvider::new(options());
        let session: SessionResponse = serde_json::from_str("{}").unwrap();
        // mirror the mapping in verify_session
        let config = ProviderConfig {
            rpc_target: session
                .rpc_target
                .unwrap_or_else(|| provider.options.fallback_rpc_url.clone()),
            chain_id: session
                .chain_id
                .unwrap_or_else(|| provider.options.chain_id.clone()),
            display_name: session.display_name.unwrap_or_default(),
        };
        assert_eq!(config.rpc_target, "https://api.devnet.solana.com");
        assert_eq!(config.chain_id, "0x3");
    }

    #[test]
    fn session_response_parses_full_payload() {
        let session: SessionResponse = serde_json::from_str(
            r#"{"chain_id":"0x3","rpc_target":"https://api.devnet.solana.com","display_name":"Solana Devnet"}"#,
        )
        .unwrap();
        assert_eq!(session.rpc_target.as_deref(), Some("https://api.devnet.solana.com"));
        assert_eq!(session.display_name.as_deref(), Some("Solana Devnet"));
    }

    #[tokio::test]
    async fn error_for_status_maps_api_errors() {
        let resp = reqwest::Response::from(
            ::http::Response::builder()
                .status(401)
                .body("unauthorized")
                .unwrap(),
        );
        let err = error_for_status(resp).await.unwrap_err();
        assert!(matches!(err, WalletError::Api { status: 401, .. }));
    }

    #[tokio::test]
    async fn error_for_status_passes_success_through() {
        let resp =
            reqwest::Response::from(::http::Response::builder().status(200).body("ok").unwrap());
        assert!(error_for_status(resp).await.is_ok());
    }
}
