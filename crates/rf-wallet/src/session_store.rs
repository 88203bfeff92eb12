use std::fs;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::WalletError;

const DEFAULT_KEYRING_SERVICE: &str = "redflag-cli";
const KEYRING_USER: &str = "wallet-session";
const SESSION_FILE_NAME: &str = "session.json";

/// Persisted provider session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredSession {
    /// Opaque session token issued by the wallet-auth service.
    pub token: String,
    /// When the token was stored.
    pub created_at: DateTime<Utc>,
}

/// Returns the keyring service name.
///
/// Defaults to `"redflag-cli"`. Override via `REDFLAG_KEYRING_SERVICE` for
/// testing to avoid touching real credentials.
fn keyring_service() -> String {
    std::env::var("REDFLAG_KEYRING_SERVICE").unwrap_or_else(|_| DEFAULT_KEYRING_SERVICE.to_string())
}

/// Store a session token in the OS keychain. Falls back to file if keyring
/// is unavailable.
///
/// # Errors
///
/// Returns `WalletError::SessionStore` if both keyring and file storage fail.
pub fn store(token: &str) -> Result<(), WalletError> {
    let record = StoredSession {
        token: token.to_string(),
        created_at: Utc::now(),
    };
    let payload = serde_json::to_string(&record)
        .map_err(|e| WalletError::SessionStore(format!("encode session record: {e}")))?;

    match keyring::Entry::new(&keyring_service(), KEYRING_USER) {
        Ok(entry) => match entry.set_password(&payload) {
            Ok(()) => Ok(()),
            Err(error) => {
                tracing::warn!(%error, "keyring store failed; falling back to file");
                store_file(&payload)
            }
        },
        Err(error) => {
            tracing::warn!(%error, "keyring unavailable; falling back to file");
            store_file(&payload)
        }
    }
}

/// Load the stored session. Priority: keyring → `REDFLAG_WALLET__SESSION_TOKEN`
/// env → file (`~/.redflag/session.json`).
#[must_use]
pub fn load() -> Option<StoredSession> {
    if let Ok(entry) = keyring::Entry::new(&keyring_service(), KEYRING_USER)
        && let Ok(payload) = entry.get_password()
        && let Some(record) = decode(&payload)
    {
        return Some(record);
    }

    // Env var carries a bare token (CI/headless); stamp it as fresh.
    if let Ok(token) = std::env::var("REDFLAG_WALLET__SESSION_TOKEN") {
        if !token.is_empty() {
            return Some(StoredSession {
                token,
                created_at: Utc::now(),
            });
        }
    }

    load_file().as_deref().and_then(decode)
}

/// Delete the stored session from keyring and file.
///
/// Idempotent: deleting when nothing is stored is not an error.
///
/// # Errors
///
/// Returns `WalletError::SessionStore` if the session file exists but cannot
/// be removed.
pub fn delete() -> Result<(), WalletError> {
    if let Ok(entry) = keyring::Entry::new(&keyring_service(), KEYRING_USER) {
        let _ = entry.delete_credential();
    }

    let path = session_path()?;
    if path.exists() {
        fs::remove_file(&path).map_err(|e| {
            WalletError::SessionStore(format!("failed to delete {}: {e}", path.display()))
        })?;
    }

    Ok(())
}

/// Detect which tier the current session came from (for status display).
#[must_use]
pub fn detect_source() -> Option<String> {
    if let Ok(entry) = keyring::Entry::new(&keyring_service(), KEYRING_USER)
        && entry.get_password().is_ok_and(|p| decode(&p).is_some())
    {
        return Some("keyring".into());
    }
    if std::env::var("REDFLAG_WALLET__SESSION_TOKEN").is_ok_and(|t| !t.is_empty()) {
        return Some("env".into());
    }
    if load_file().as_deref().and_then(decode).is_some() {
        return Some("file".into());
    }
    None
}

/// Parse a stored payload, rejecting records with an empty token.
fn decode(payload: &str) -> Option<StoredSession> {
    serde_json::from_str::<StoredSession>(payload)
        .ok()
        .filter(|record| !record.token.trim().is_empty())
}

// --- Private file helpers ---

fn session_path() -> Result<PathBuf, WalletError> {
    dirs::home_dir()
        .map(|h| h.join(".redflag").join(SESSION_FILE_NAME))
        .ok_or_else(|| {
            WalletError::SessionStore("home directory not found — cannot store session".into())
        })
}

fn store_file(payload: &str) -> Result<(), WalletError> {
    let path = session_path()?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(|e| WalletError::SessionStore(format!("mkdir {}: {e}", parent.display())))?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            if let Err(e) = fs::set_permissions(parent, fs::Permissions::from_mode(0o700)) {
                tracing::warn!("failed to chmod 0700 {}: {e}", parent.display());
            }
        }
    }
    fs::write(&path, payload)
        .map_err(|e| WalletError::SessionStore(format!("write {}: {e}", path.display())))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(&path, fs::Permissions::from_mode(0o600))
            .map_err(|e| WalletError::SessionStore(format!("chmod {}: {e}", path.display())))?;
    }

    Ok(())
}

fn load_file() -> Option<String> {
    let path = session_path().ok()?;
    fs::read_to_string(&path)
        .ok()
        .filter(|s| !s.trim().is_empty())
}
