//! Crypto error types.

use thiserror::Error;

/// Result type for crypto operations.
pub type CryptoResult<T> = Result<T, CryptoError>;

/// Errors that can occur in key derivation and envelope operations.
///
/// `DecryptionFailed` is a single kind on purpose: a wrong passphrase,
/// a corrupted envelope, and tampered ciphertext are indistinguishable to
/// the caller, so the error must not act as an oracle between them.
#[derive(Debug, Error)]
pub enum CryptoError {
    #[error("invalid input: {0}")]
    InvalidInput(&'static str),

    #[error("decryption failed (wrong master passphrase or corrupted data)")]
    DecryptionFailed,
}
