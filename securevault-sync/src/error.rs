//! Sync engine error types.

use securevault_crypto::CryptoError;
use securevault_session::SessionError;
use thiserror::Error;

/// Result type for sync operations.
pub type SyncResult<T> = Result<T, SyncError>;

/// Errors surfaced by the sync engine.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error("vault session is locked (unlock required)")]
    Locked,

    /// A record's envelope failed to decrypt during a batch load. Not split
    /// into finer causes: a universal failure almost always means a wrong
    /// master passphrase, and a per-record cause would be an oracle.
    #[error("vault decryption failed (wrong master passphrase or corrupted data)")]
    Decryption,

    /// A second batch load was attempted while one was in flight.
    #[error("a vault reload is already in progress")]
    LoadInProgress,

    #[error(transparent)]
    Crypto(#[from] CryptoError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<SessionError> for SyncError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::Locked => SyncError::Locked,
            SessionError::Crypto(e) => SyncError::Crypto(e),
            // First-use validation errors are surfaced by the session
            // directly and never cross the engine boundary.
            SessionError::PassphraseMismatch | SessionError::PassphraseTooShort { .. } => {
                SyncError::Locked
            }
        }
    }
}

/// Errors from the record store collaborator.
///
/// `Unavailable` propagates to the caller without retry — retry policy
/// belongs to the transport layer — and always leaves the working set
/// unchanged so the caller can safely re-offer the same action.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("record not found: {0}")]
    NotFound(String),

    #[error("record store unavailable: {0}")]
    Unavailable(String),
}
