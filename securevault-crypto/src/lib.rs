//! Envelope encryption layer for SecureVault.
//!
//! Provides per-secret encryption using:
//! - PBKDF2-HMAC-SHA256 for key derivation from the master passphrase
//! - ChaCha20-Poly1305 for authenticated encryption
//! - Secure key handling with zeroization
//!
//! # Architecture
//!
//! There is no key registry. Each envelope carries its own random salt and
//! nonce, so a stored secret is decryptable from the envelope plus the
//! master passphrase alone:
//!
//! 1. **Derived key**: computed from (passphrase, per-envelope salt).
//!    Never stored — it exists only for the duration of one seal or open.
//!
//! 2. **Envelope**: `base64( salt ‖ nonce ‖ ciphertext+tag )`, opaque to
//!    every layer above this crate.
//!
//! This keeps the storage backend zero-knowledge: without the passphrase,
//! an envelope is indistinguishable from random bytes, and the only way to
//! test a passphrase is an authenticated decryption.

mod envelope;
mod error;
pub mod generator;
mod key;

pub use envelope::{
    decrypt_secret, decrypt_secret_with, encrypt_secret, encrypt_secret_with, TAG_SIZE,
};
pub use error::{CryptoError, CryptoResult};
pub use generator::{generate_password, GeneratorOptions};
pub use key::{derive_key, DerivedKey, KdfParams, Salt, KEY_SIZE, NONCE_SIZE, SALT_SIZE};
