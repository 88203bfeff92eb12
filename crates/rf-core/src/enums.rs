//! Status enums for redflag.
//!
//! All enums use `snake_case` serialization via `#[serde(rename_all = "snake_case")]`.
//! `SessionStatus` carries a state machine and provides `allowed_next_states()`
//! to enforce valid transitions at the application layer.

use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// SessionStatus
// ---------------------------------------------------------------------------

/// Status of the wallet session against the external identity provider.
///
/// ```text
/// uninitialized → unauthenticated   (no prior session, or init failure)
///               → authenticated     (provider reports a live session)
/// unauthenticated → authenticating  (interactive login starts)
/// authenticating → authenticated    (login success)
///                → unauthenticated  (login failure or cancel)
/// authenticated → unauthenticated   (logout or provider disconnect)
/// ```
///
/// There is no terminal state; the machine is re-entrant for the lifetime
/// of the view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    Uninitialized,
    Unauthenticated,
    Authenticating,
    Authenticated,
}

impl SessionStatus {
    /// Valid next states from the current state.
    #[must_use]
    pub const fn allowed_next_states(self) -> &'static [Self] {
        match self {
            Self::Uninitialized => &[Self::Unauthenticated, Self::Authenticated],
            Self::Unauthenticated => &[Self::Authenticating],
            Self::Authenticating => &[Self::Authenticated, Self::Unauthenticated],
            Self::Authenticated => &[Self::Unauthenticated],
        }
    }

    /// Check whether transitioning to `next` is allowed.
    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        self.allowed_next_states().contains(&next)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Uninitialized => "uninitialized",
            Self::Unauthenticated => "unauthenticated",
            Self::Authenticating => "authenticating",
            Self::Authenticated => "authenticated",
        }
    }
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[test]
    fn serde_roundtrip_snake_case() {
        for (status, expected) in [
            (SessionStatus::Uninitialized, "\"uninitialized\""),
            (SessionStatus::Unauthenticated, "\"unauthenticated\""),
            (SessionStatus::Authenticating, "\"authenticating\""),
            (SessionStatus::Authenticated, "\"authenticated\""),
        ] {
            let json = serde_json::to_string(&status).unwrap();
            assert_eq!(json, expected);
            let recovered: SessionStatus = serde_json::from_str(&json).unwrap();
            assert_eq!(recovered, status);
        }
    }

    #[rstest]
    #[case(SessionStatus::Uninitialized, SessionStatus::Unauthenticated)]
    #[case(SessionStatus::Uninitialized, SessionStatus::Authenticated)]
    #[case(SessionStatus::Unauthenticated, SessionStatus::Authenticating)]
    #[case(SessionStatus::Authenticating, SessionStatus::Authenticated)]
    #[case(SessionStatus::Authenticating, SessionStatus::Unauthenticated)]
    #[case(SessionStatus::Authenticated, SessionStatus::Unauthenticated)]
    fn valid_transitions(#[case] from: SessionStatus, #[case] to: SessionStatus) {
        assert!(from.can_transition_to(to));
    }

    #[rstest]
    #[case(SessionStatus::Uninitialized, SessionStatus::Authenticating)]
    #[case(SessionStatus::Unauthenticated, SessionStatus::Authenticated)]
    #[case(SessionStatus::Unauthenticated, SessionStatus::Unauthenticated)]
    #[case(SessionStatus::Authenticating, SessionStatus::Authenticating)]
    #[case(SessionStatus::Authenticated, SessionStatus::Authenticating)]
    #[case(SessionStatus::Authenticated, SessionStatus::Authenticated)]
    fn invalid_transitions(#[case] from: SessionStatus, #[case] to: SessionStatus) {
        assert!(!from.can_transition_to(to));
    }

    #[test]
    fn machine_is_re_entrant() {
        // logout lands in a state from which login is possible again
        assert!(SessionStatus::Authenticated.can_transition_to(SessionStatus::Unauthenticated));
        assert!(SessionStatus::Unauthenticated.can_transition_to(SessionStatus::Authenticating));
    }

    #[test]
    fn display_matches_as_str() {
        assert_eq!(format!("{}", SessionStatus::Uninitialized), "uninitialized");
        assert_eq!(format!("{}", SessionStatus::Authenticating), "authenticating");
        assert_eq!(format!("{}", SessionStatus::Authenticated), "authenticated");
    }
}
