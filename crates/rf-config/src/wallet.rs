//! Wallet identity provider configuration.

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Default interactive login timeout in seconds.
const fn default_login_timeout_secs() -> u64 {
    120
}

/// Default chain identifier (devnet).
fn default_chain_id() -> String {
    "0x3".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WalletConfig {
    /// Client id issued by the wallet-auth service.
    #[serde(default)]
    pub client_id: String,

    /// Base URL of the hosted wallet-auth service.
    #[serde(default)]
    pub auth_url: String,

    /// Chain identifier passed to the provider (`0x1` mainnet, `0x2` testnet,
    /// `0x3` devnet).
    #[serde(default = "default_chain_id")]
    pub chain_id: String,

    /// How long to wait for the interactive login callback, in seconds.
    #[serde(default = "default_login_timeout_secs")]
    pub login_timeout_secs: u64,
}

impl Default for WalletConfig {
    fn default() -> Self {
        Self {
            client_id: String::new(),
            auth_url: String::new(),
            chain_id: default_chain_id(),
            login_timeout_secs: default_login_timeout_secs(),
        }
    }
}

impl WalletConfig {
    /// Check if the wallet config has the minimum required fields.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.client_id.is_empty() && !self.auth_url.is_empty()
    }

    /// Error unless the section is configured. Used by commands that talk to
    /// the provider.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotConfigured` when `client_id` or `auth_url`
    /// is missing.
    pub fn require_configured(&self) -> Result<(), ConfigError> {
        if self.is_configured() {
            Ok(())
        } else {
            Err(ConfigError::NotConfigured {
                section: "wallet".to_string(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_not_configured() {
        let config = WalletConfig::default();
        assert!(!config.is_configured());
        assert_eq!(config.chain_id, "0x3");
        assert_eq!(config.login_timeout_secs, 120);
    }

    #[test]
    fn configured_when_id_and_url_set() {
        let config = WalletConfig {
            client_id: "rf_client_123".into(),
            auth_url: "https://auth.example.test".into(),
            ..Default::default()
        };
        assert!(config.is_configured());
        assert!(config.require_configured().is_ok());
    }

    #[test]
    fn require_configured_names_the_section() {
        let err = WalletConfig::default().require_configured().unwrap_err();
        assert!(err.to_string().contains("'wallet'"));
    }
}
