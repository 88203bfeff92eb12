//! # rf-config
//!
//! Layered configuration loading for redflag using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`REDFLAG_*` prefix, `__` as separator)
//! 2. Project-level `.redflag/config.toml`
//! 3. User-level `~/.config/redflag/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `REDFLAG_WALLET__CLIENT_ID` -> `wallet.client_id`,
//! `REDFLAG_RPC__URL` -> `rpc.url`, etc. The `__` (double underscore)
//! separates nested config sections.
//!
//! # Usage
//!
//! ```no_run
//! use rf_config::RedflagConfig;
//!
//! // Load from all sources (dotenvy + TOML + env):
//! let config = RedflagConfig::load_with_dotenv().expect("config");
//!
//! if config.wallet.is_configured() {
//!     println!("auth service: {}", config.wallet.auth_url);
//! }
//! ```

mod error;
mod general;
mod rpc;
mod wallet;

pub use error::ConfigError;
pub use general::GeneralConfig;
pub use rpc::RpcConfig;
pub use wallet::WalletConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RedflagConfig {
    #[serde(default)]
    pub wallet: WalletConfig,
    #[serde(default)]
    pub rpc: RpcConfig,
    #[serde(default)]
    pub general: GeneralConfig,
}

impl RedflagConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] if you need
    /// `.env` file loading.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Figment` when extraction fails.
    pub fn load() -> Result<Self, ConfigError> {
        Self::figment().extract().map_err(ConfigError::from)
    }

    /// Load configuration with `.env` file support.
    ///
    /// Calls `dotenvy` before building the figment. This is the typical
    /// entry point for the CLI and tests.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Figment` when extraction fails.
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        Self::load_dotenv_from_workspace();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment directly or add additional
    /// providers on top.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from(".redflag/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Environment variables (highest priority)
        figment = figment.merge(Env::prefixed("REDFLAG_").split("__"));

        figment
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("redflag").join("config.toml"))
    }

    /// Load `.env` from the workspace root.
    ///
    /// Walks up from `CARGO_MANIFEST_DIR` (if available) or current dir
    /// looking for a `.env` file. Silently does nothing if none is found.
    fn load_dotenv_from_workspace() {
        if let Ok(manifest_dir) = std::env::var("CARGO_MANIFEST_DIR") {
            let mut dir = PathBuf::from(manifest_dir);
            // Walk up at most 3 levels (crate -> crates/ -> workspace root)
            for _ in 0..3 {
                let env_path = dir.join(".env");
                if env_path.exists() {
                    let _ = dotenvy::from_path(&env_path);
                    return;
                }
                if !dir.pop() {
                    break;
                }
            }
        }

        let _ = dotenvy::dotenv();
    }
}
