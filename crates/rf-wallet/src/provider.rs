use crate::error::WalletError;

/// Network configuration the provider reports for the active session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderConfig {
    /// JSON-RPC endpoint balance queries should target.
    pub rpc_target: String,
    /// Chain identifier (`0x1` mainnet, `0x2` testnet, `0x3` devnet).
    pub chain_id: String,
    /// Human-readable network name.
    pub display_name: String,
}

/// Capability set the session bootstrap requires from a wallet identity
/// provider.
///
/// The bootstrap depends only on this trait, never on a concrete vendor
/// client. [`crate::hosted::HostedProvider`] is the production
/// implementation; tests script their own.
#[allow(async_fn_in_trait)]
pub trait WalletProvider {
    /// Attach to the provider and discover whether a session already exists.
    ///
    /// # Errors
    ///
    /// Returns `WalletError::ProviderInit` when the provider cannot be
    /// reached or rejects the attachment. Callers must treat that as
    /// unauthenticated, not as fatal.
    async fn initialize(&mut self) -> Result<(), WalletError>;

    /// Whether the provider currently holds a live session.
    fn is_connected(&self) -> bool;

    /// Run the provider's interactive authentication flow.
    ///
    /// # Errors
    ///
    /// Returns `WalletError::Login` on failure or user cancellation.
    async fn connect(&mut self) -> Result<(), WalletError>;

    /// Tear down the provider session. Must be idempotent.
    ///
    /// # Errors
    ///
    /// Returns `WalletError::SessionStore` when local credentials cannot be
    /// cleared.
    async fn disconnect(&mut self) -> Result<(), WalletError>;

    /// Account addresses visible to the active session.
    ///
    /// # Errors
    ///
    /// Returns `WalletError::SessionQuery` when there is no active session
    /// or the query fails. An empty list is NOT an error at this layer; the
    /// bootstrap decides what it means.
    async fn request_accounts(&self) -> Result<Vec<String>, WalletError>;

    /// Network configuration for the active session.
    ///
    /// # Errors
    ///
    /// Returns `WalletError::SessionQuery` when there is no active session
    /// or the query fails.
    async fn provider_config(&self) -> Result<ProviderConfig, WalletError>;
}
