use thiserror::Error;

#[derive(Debug, Error)]
pub enum WalletError {
    #[error("provider initialization failed: {0}")]
    ProviderInit(String),

    #[error("session query failed: {0}")]
    SessionQuery(String),

    #[error("login failed: {0}")]
    Login(String),

    #[error("session store error: {0}")]
    SessionStore(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("wallet service error ({status}): {message}")]
    Api { status: u16, message: String },
}
