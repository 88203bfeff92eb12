use clap::{Args, Subcommand};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Wallet authentication.
    Auth {
        #[command(subcommand)]
        action: AuthCommands,
    },
    /// Wallet session info.
    Wallet {
        #[command(subcommand)]
        action: WalletCommands,
    },
    /// Flagged-entity directory.
    Directory {
        #[command(subcommand)]
        action: DirectoryCommands,
    },
}

/// Authentication commands.
#[derive(Clone, Debug, Subcommand)]
pub enum AuthCommands {
    /// Log in via the provider's browser flow.
    Login,
    /// Clear the stored wallet session.
    Logout,
    /// Show current session status.
    Status,
}

/// Wallet session commands.
#[derive(Clone, Debug, Subcommand)]
pub enum WalletCommands {
    /// Show the session's public address.
    Address,
    /// Show the session balance.
    Balance,
    /// Re-run the address/balance fetch sequence.
    Refresh,
}

/// Directory commands.
#[derive(Clone, Debug, Subcommand)]
pub enum DirectoryCommands {
    /// List flagged people.
    People,
    /// List flagged companies.
    Companies,
    /// Filter the directory by name, title, or industry.
    Search(SearchArgs),
}

#[derive(Clone, Debug, Args)]
pub struct SearchArgs {
    /// Query matched against names and titles/industries.
    pub query: String,
}
