//! # rf-wallet
//!
//! Wallet session bootstrap for redflag.
//!
//! Provides the provider capability seam ([`WalletProvider`]), the balance
//! collaborator seam ([`BalanceQuery`]), the coordination core
//! ([`SessionBootstrap`]) that owns the [`rf_core::WalletSession`] lifecycle,
//! the production hosted-service provider ([`HostedProvider`]: browser login
//! via `tiny_http` + `open`, session queries over `reqwest`), and OS keychain
//! session persistence with env/file fallbacks ([`session_store`]).

pub mod balance;
pub mod bootstrap;
pub mod error;
pub mod hosted;
pub mod provider;
pub mod session_store;

pub use balance::{BalanceQuery, RpcBalance};
pub use bootstrap::SessionBootstrap;
pub use error::WalletError;
pub use hosted::{HostedProvider, HostedProviderOptions};
pub use provider::{ProviderConfig, WalletProvider};
