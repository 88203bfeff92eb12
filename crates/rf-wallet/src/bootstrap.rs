//! Session bootstrap: the init → branch → fetch coordination over the
//! wallet identity provider.
//!
//! All provider errors are contained here. Public operations return the
//! resulting [`WalletSession`] snapshot; callers never see a raw provider
//! error, only state transitions. Every session update is a whole-value
//! assignment, so address and balance can never tear apart.

use rf_core::{SessionStatus, WalletSession};

use crate::balance::BalanceQuery;
use crate::error::WalletError;
use crate::provider::WalletProvider;

/// Coordinates the wallet session lifecycle against an injected provider
/// and balance collaborator.
///
/// Operations take `&mut self`, so one handle admits at most one in-flight
/// session-mutating operation; the `Authenticating` transition guard makes
/// a re-entrant `login` a snapshot-returning no-op.
pub struct SessionBootstrap<P, B> {
    provider: P,
    balance: B,
    session: WalletSession,
}

impl<P: WalletProvider, B: BalanceQuery> SessionBootstrap<P, B> {
    #[must_use]
    pub const fn new(provider: P, balance: B) -> Self {
        Self {
            provider,
            balance,
            session: WalletSession::uninitialized(),
        }
    }

    /// Current session snapshot.
    #[must_use]
    pub const fn session(&self) -> &WalletSession {
        &self.session
    }

    /// Attach to the provider and resolve the starting session state.
    ///
    /// Fail-closed: any provider error is logged and the session becomes
    /// unauthenticated, never ambiguous.
    pub async fn initialize(&mut self) -> WalletSession {
        match self.provider.initialize().await {
            Ok(()) if self.provider.is_connected() => {
                self.session = self.fetch_session().await;
            }
            Ok(()) => {
                self.session = WalletSession::disconnected();
            }
            Err(error) => {
                tracing::warn!(%error, "provider initialization failed; treating session as unauthenticated");
                self.session = WalletSession::disconnected();
            }
        }
        self.session.clone()
    }

    /// Run the provider's interactive authentication flow.
    ///
    /// No-op returning the current snapshot unless the state machine allows
    /// entering `Authenticating` (so a pending login is never doubled, an
    /// authenticated session is left alone, and an uninitialized bootstrap
    /// must `initialize` first). Failure or cancellation reverts to
    /// unauthenticated with no partial address.
    pub async fn login(&mut self) -> WalletSession {
        if !self
            .session
            .status()
            .can_transition_to(SessionStatus::Authenticating)
        {
            tracing::debug!(status = %self.session.status(), "login not available from current session state");
            return self.session.clone();
        }

        self.session = WalletSession::authenticating();
        match self.provider.connect().await {
            Ok(()) if self.provider.is_connected() => {
                self.session = self.fetch_session().await;
            }
            Ok(()) => {
                tracing::warn!("provider connect finished without a session; reverting to unauthenticated");
                self.session = WalletSession::disconnected();
            }
            Err(error) => {
                tracing::warn!(%error, "interactive login failed or was cancelled");
                self.session = WalletSession::disconnected();
            }
        }
        self.session.clone()
    }

    /// Tear down the provider session unconditionally. Idempotent.
    pub async fn logout(&mut self) -> WalletSession {
        if let Err(error) = self.provider.disconnect().await {
            tracing::warn!(%error, "provider disconnect failed; clearing local session anyway");
        }
        self.session = WalletSession::disconnected();
        self.session.clone()
    }

    /// Re-run the account → config → balance sequence.
    ///
    /// The single explicit refetch entry point; a no-op unless the session
    /// is authenticated. Also recovers a connected-but-balance-unknown
    /// session once the balance endpoint responds again.
    pub async fn refresh(&mut self) -> WalletSession {
        if self.session.status() == SessionStatus::Authenticated {
            self.session = self.fetch_session().await;
        }
        self.session.clone()
    }

    /// The fetch sequence. Commits address and balance together, or falls
    /// back per the partial-failure policy: no address → disconnected
    /// (never a placeholder), address without balance → connected with
    /// balance unknown.
    async fn fetch_session(&mut self) -> WalletSession {
        let address = match self.fetch_address().await {
            Ok(address) => address,
            Err(error) => {
                tracing::warn!(%error, "no usable account for the live session; failing closed");
                return WalletSession::disconnected();
            }
        };

        match self.fetch_balance(&address).await {
            Ok(balance) => WalletSession::connected(address, balance),
            Err(error) => {
                tracing::warn!(%error, %address, "balance unavailable; session stays connected");
                WalletSession::connected_balance_unknown(address)
            }
        }
    }

    async fn fetch_address(&self) -> Result<String, WalletError> {
        let accounts = self.provider.request_accounts().await?;
        accounts
            .into_iter()
            .next()
            .ok_or_else(|| WalletError::SessionQuery("provider returned no accounts".into()))
    }

    async fn fetch_balance(&self, address: &str) -> Result<u64, WalletError> {
        let config = self.provider.provider_config().await?;
        self.balance.get_balance(&config.rpc_target, address).await
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::provider::ProviderConfig;

    #[derive(Default)]
    struct MockProvider {
        fail_init: bool,
        connected_after_init: bool,
        fail_connect: bool,
        connected_after_connect: bool,
        accounts: Vec<String>,
        fail_accounts: bool,
        rpc_target: String,
        fail_config: bool,
        connected: bool,
        disconnects: Rc<RefCell<usize>>,
    }

    impl WalletProvider for MockProvider {
        async fn initialize(&mut self) -> Result<(), WalletError> {
            if self.fail_init {
                return Err(WalletError::ProviderInit("mock init failure".into()));
            }
            self.connected = self.connected_after_init;
            Ok(())
        }

        fn is_connected(&self) -> bool {
            self.connected
        }

        async fn connect(&mut self) -> Result<(), WalletError> {
            if self.fail_connect {
                return Err(WalletError::Login("user closed the auth window".into()));
            }
            self.connected = self.connected_after_connect;
            Ok(())
        }

        async fn disconnect(&mut self) -> Result<(), WalletError> {
            *self.disconnects.borrow_mut() += 1;
            self.connected = false;
            Ok(())
        }

        async fn request_accounts(&self) -> Result<Vec<String>, WalletError> {
            if self.fail_accounts {
                return Err(WalletError::SessionQuery("mock accounts failure".into()));
            }
            Ok(self.accounts.clone())
        }

        async fn provider_config(&self) -> Result<ProviderConfig, WalletError> {
            if self.fail_config {
                return Err(WalletError::SessionQuery("mock config failure".into()));
            }
            Ok(ProviderConfig {
                rpc_target: self.rpc_target.clone(),
                chain_id: "0x3".into(),
                display_name: "Mock Devnet".into(),
            })
        }
    }

    struct MockBalance {
        lamports: Option<u64>,
        calls: Rc<RefCell<Vec<(String, String)>>>,
    }

    impl MockBalance {
        fn ok(lamports: u64) -> (Self, Rc<RefCell<Vec<(String, String)>>>) {
            let calls = Rc::new(RefCell::new(Vec::new()));
            (
                Self {
                    lamports: Some(lamports),
                    calls: Rc::clone(&calls),
                },
                calls,
            )
        }

        fn failing() -> Self {
            Self {
                lamports: None,
                calls: Rc::new(RefCell::new(Vec::new())),
            }
        }
    }

    impl BalanceQuery for MockBalance {
        async fn get_balance(&self, rpc_target: &str, address: &str) -> Result<u64, WalletError> {
            self.calls
                .borrow_mut()
                .push((rpc_target.to_string(), address.to_string()));
            self.lamports
                .ok_or_else(|| WalletError::SessionQuery("mock balance failure".into()))
        }
    }

    fn assert_invariant(session: &WalletSession) {
        assert_eq!(
            session.address().is_some(),
            session.status() == SessionStatus::Authenticated,
        );
    }

    #[tokio::test]
    async fn initialize_without_prior_session_is_unauthenticated() {
        let provider = MockProvider::default();
        let (balance, _) = MockBalance::ok(0);
        let mut bootstrap = SessionBootstrap::new(provider, balance);

        let session = bootstrap.initialize().await;
        assert_eq!(session.status(), SessionStatus::Unauthenticated);
        assert_eq!(session.address(), None);
        assert_invariant(&session);
    }

    #[tokio::test]
    async fn initialize_failure_fails_closed() {
        let provider = MockProvider {
            fail_init: true,
            ..Default::default()
        };
        let (balance, _) = MockBalance::ok(0);
        let mut bootstrap = SessionBootstrap::new(provider, balance);

        let session = bootstrap.initialize().await;
        assert_eq!(session.status(), SessionStatus::Unauthenticated);
        assert_invariant(&session);
    }

    #[tokio::test]
    async fn initialize_with_live_session_commits_address_and_balance_together() {
        let provider = MockProvider {
            connected_after_init: true,
            accounts: vec!["ABC123".into()],
            rpc_target: "https://api.devnet.solana.com".into(),
            ..Default::default()
        };
        let (balance, calls) = MockBalance::ok(5_000_000_000);
        let mut bootstrap = SessionBootstrap::new(provider, balance);

        let session = bootstrap.initialize().await;
        assert_eq!(session.status(), SessionStatus::Authenticated);
        assert_eq!(session.address(), Some("ABC123"));
        assert_eq!(session.balance(), Some(5_000_000_000));
        assert_invariant(&session);

        // balance queried against the provider-reported endpoint
        let recorded = calls.borrow();
        assert_eq!(
            recorded.as_slice(),
            [(
                "https://api.devnet.solana.com".to_string(),
                "ABC123".to_string()
            )]
        );
    }

    #[tokio::test]
    async fn empty_account_list_leaves_no_address() {
        let provider = MockProvider {
            connected_after_init: true,
            accounts: vec![],
            rpc_target: "https://api.devnet.solana.com".into(),
            ..Default::default()
        };
        let (balance, calls) = MockBalance::ok(1);
        let mut bootstrap = SessionBootstrap::new(provider, balance);

        let session = bootstrap.initialize().await;
        assert_eq!(session.status(), SessionStatus::Unauthenticated);
        assert_eq!(session.address(), None, "no placeholder address");
        assert!(calls.borrow().is_empty(), "no balance query without an address");
        assert_invariant(&session);
    }

    #[tokio::test]
    async fn account_query_failure_fails_closed() {
        let provider = MockProvider {
            connected_after_init: true,
            fail_accounts: true,
            ..Default::default()
        };
        let (balance, _) = MockBalance::ok(1);
        let mut bootstrap = SessionBootstrap::new(provider, balance);

        let session = bootstrap.initialize().await;
        assert_eq!(session.status(), SessionStatus::Unauthenticated);
        assert_invariant(&session);
    }

    #[tokio::test]
    async fn balance_failure_keeps_session_connected_with_unknown_balance() {
        let provider = MockProvider {
            connected_after_init: true,
            accounts: vec!["ABC123".into()],
            rpc_target: "https://api.devnet.solana.com".into(),
            ..Default::default()
        };
        let mut bootstrap = SessionBootstrap::new(provider, MockBalance::failing());

        let session = bootstrap.initialize().await;
        assert_eq!(session.status(), SessionStatus::Authenticated);
        assert_eq!(session.address(), Some("ABC123"));
        assert_eq!(session.balance(), None);
        assert_invariant(&session);
    }

    #[tokio::test]
    async fn refresh_recovers_unknown_balance() {
        let provider = MockProvider {
            connected_after_init: true,
            accounts: vec!["ABC123".into()],
            rpc_target: "https://api.devnet.solana.com".into(),
            ..Default::default()
        };
        let mut bootstrap = SessionBootstrap::new(provider, MockBalance::failing());
        let session = bootstrap.initialize().await;
        assert_eq!(session.balance(), None);

        bootstrap.balance = {
            let (balance, _) = MockBalance::ok(7_500);
            balance
        };
        let session = bootstrap.refresh().await;
        assert_eq!(session.status(), SessionStatus::Authenticated);
        assert_eq!(session.balance(), Some(7_500));
        assert_invariant(&session);
    }

    #[tokio::test]
    async fn refresh_is_a_no_op_when_unauthenticated() {
        let provider = MockProvider::default();
        let (balance, calls) = MockBalance::ok(1);
        let mut bootstrap = SessionBootstrap::new(provider, balance);
        bootstrap.initialize().await;

        let session = bootstrap.refresh().await;
        assert_eq!(session.status(), SessionStatus::Unauthenticated);
        assert!(calls.borrow().is_empty());
    }

    #[tokio::test]
    async fn login_success_runs_fetch_sequence() {
        let provider = MockProvider {
            connected_after_connect: true,
            accounts: vec!["DEF456".into()],
            rpc_target: "https://api.devnet.solana.com".into(),
            ..Default::default()
        };
        let (balance, _) = MockBalance::ok(123);
        let mut bootstrap = SessionBootstrap::new(provider, balance);
        bootstrap.initialize().await;

        let session = bootstrap.login().await;
        assert_eq!(session.status(), SessionStatus::Authenticated);
        assert_eq!(session.address(), Some("DEF456"));
        assert_eq!(session.balance(), Some(123));
        assert_invariant(&session);
    }

    #[tokio::test]
    async fn login_failure_reverts_to_unauthenticated() {
        let provider = MockProvider {
            fail_connect: true,
            ..Default::default()
        };
        let (balance, _) = MockBalance::ok(1);
        let mut bootstrap = SessionBootstrap::new(provider, balance);
        bootstrap.initialize().await;

        let session = bootstrap.login().await;
        assert_eq!(session.status(), SessionStatus::Unauthenticated);
        assert_eq!(session.address(), None, "no partial address from a half-completed flow");
        assert_invariant(&session);
    }

    #[tokio::test]
    async fn login_before_initialize_is_a_no_op() {
        let provider = MockProvider {
            connected_after_connect: true,
            accounts: vec!["DEF456".into()],
            ..Default::default()
        };
        let (balance, _) = MockBalance::ok(1);
        let mut bootstrap = SessionBootstrap::new(provider, balance);

        let session = bootstrap.login().await;
        assert_eq!(session.status(), SessionStatus::Uninitialized);
    }

    #[tokio::test]
    async fn login_when_already_authenticated_is_a_no_op() {
        let provider = MockProvider {
            connected_after_init: true,
            accounts: vec!["ABC123".into()],
            rpc_target: "https://api.devnet.solana.com".into(),
            ..Default::default()
        };
        let (balance, calls) = MockBalance::ok(9);
        let mut bootstrap = SessionBootstrap::new(provider, balance);
        bootstrap.initialize().await;
        assert_eq!(calls.borrow().len(), 1);

        let session = bootstrap.login().await;
        assert_eq!(session.status(), SessionStatus::Authenticated);
        assert_eq!(calls.borrow().len(), 1, "no second fetch sequence");
    }

    #[tokio::test]
    async fn logout_is_idempotent() {
        let disconnects = Rc::new(RefCell::new(0));
        let provider = MockProvider {
            connected_after_init: true,
            accounts: vec!["ABC123".into()],
            rpc_target: "https://api.devnet.solana.com".into(),
            disconnects: Rc::clone(&disconnects),
            ..Default::default()
        };
        let (balance, _) = MockBalance::ok(1);
        let mut bootstrap = SessionBootstrap::new(provider, balance);
        bootstrap.initialize().await;

        let first = bootstrap.logout().await;
        assert_eq!(first.status(), SessionStatus::Unauthenticated);
        let second = bootstrap.logout().await;
        assert_eq!(second.status(), SessionStatus::Unauthenticated);
        assert_eq!(*disconnects.borrow(), 2, "teardown is unconditional");
        assert_invariant(&second);
    }
}
