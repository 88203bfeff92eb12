use serde::Serialize;

use crate::enums::SessionStatus;

/// Snapshot of the wallet session exposed to the presentation layer.
///
/// Invariant: `address` is present iff `status == Authenticated`. The fields
/// are private and every constructor upholds the invariant, so a session can
/// only be replaced wholesale, never torn field-by-field. `balance` is in the
/// provider's base units (lamports) and is only meaningful when an address is
/// present; `None` under `Authenticated` means "connected, balance unknown".
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WalletSession {
    status: SessionStatus,
    address: Option<String>,
    balance: Option<u64>,
}

impl WalletSession {
    /// Session before `initialize()` has run.
    #[must_use]
    pub const fn uninitialized() -> Self {
        Self {
            status: SessionStatus::Uninitialized,
            address: None,
            balance: None,
        }
    }

    /// No live provider session. Also the fail-closed state for any
    /// initialization or login failure.
    #[must_use]
    pub const fn disconnected() -> Self {
        Self {
            status: SessionStatus::Unauthenticated,
            address: None,
            balance: None,
        }
    }

    /// Interactive login in flight. No address until the flow completes.
    #[must_use]
    pub const fn authenticating() -> Self {
        Self {
            status: SessionStatus::Authenticating,
            address: None,
            balance: None,
        }
    }

    /// Live session with address and balance committed together.
    #[must_use]
    pub const fn connected(address: String, balance: u64) -> Self {
        Self {
            status: SessionStatus::Authenticated,
            address: Some(address),
            balance: Some(balance),
        }
    }

    /// Live session whose balance query failed; retryable via refresh.
    #[must_use]
    pub const fn connected_balance_unknown(address: String) -> Self {
        Self {
            status: SessionStatus::Authenticated,
            address: Some(address),
            balance: None,
        }
    }

    #[must_use]
    pub const fn status(&self) -> SessionStatus {
        self.status
    }

    #[must_use]
    pub fn address(&self) -> Option<&str> {
        self.address.as_deref()
    }

    #[must_use]
    pub const fn balance(&self) -> Option<u64> {
        self.balance
    }

    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        matches!(self.status, SessionStatus::Authenticated)
    }
}
