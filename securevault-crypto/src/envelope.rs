//! The envelope codec: passphrase in, opaque envelope out.
//!
//! Every encryption derives a one-off key from (passphrase, fresh salt) and
//! seals the plaintext with ChaCha20-Poly1305 under a fresh nonce. Salt and
//! nonce are bundled with the ciphertext so the passphrase is the only input
//! needed for decryption:
//!
//! ```text
//! base64( salt(16) ‖ nonce(12) ‖ ciphertext+tag )
//! ```
//!
//! Regenerating the salt per call costs 28 extra stored bytes and a KDF run
//! per envelope, and buys immunity to salt reuse across records.

use crate::error::{CryptoError, CryptoResult};
use crate::key::{derive_key, KdfParams, Salt, NONCE_SIZE, SALT_SIZE};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use chacha20poly1305::aead::{Aead, KeyInit};
use chacha20poly1305::{ChaCha20Poly1305, Key, Nonce};
use rand::{rngs::OsRng, RngCore};
use securevault_types::CipherEnvelope;

/// Poly1305 tag length, appended to the ciphertext by the AEAD.
pub const TAG_SIZE: usize = 16;

/// Encrypts a secret under the master passphrase, returning a self-describing
/// envelope. Fresh salt and nonce are drawn for every call, so encrypting the
/// same plaintext twice never yields the same envelope.
pub fn encrypt_secret(plaintext: &str, passphrase: &str) -> CryptoResult<CipherEnvelope> {
    encrypt_secret_with(plaintext, passphrase, &KdfParams::default())
}

/// As [`encrypt_secret`], with explicit KDF parameters.
pub fn encrypt_secret_with(
    plaintext: &str,
    passphrase: &str,
    params: &KdfParams,
) -> CryptoResult<CipherEnvelope> {
    let salt = Salt::random();
    let mut nonce_bytes = [0u8; NONCE_SIZE];
    OsRng.fill_bytes(&mut nonce_bytes);

    let key = derive_key(passphrase, &salt, params)?;
    let cipher = ChaCha20Poly1305::new(Key::from_slice(key.as_bytes()));
    let ciphertext = cipher
        .encrypt(Nonce::from_slice(&nonce_bytes), plaintext.as_bytes())
        .map_err(|_| CryptoError::InvalidInput("plaintext too large"))?;

    let mut combined = Vec::with_capacity(SALT_SIZE + NONCE_SIZE + ciphertext.len());
    combined.extend_from_slice(salt.as_bytes());
    combined.extend_from_slice(&nonce_bytes);
    combined.extend_from_slice(&ciphertext);

    Ok(CipherEnvelope::new(BASE64.encode(combined)))
}

/// Decrypts an envelope under the master passphrase.
///
/// Fails with `DecryptionFailed` for undecodable base64, an envelope too
/// short to contain salt and nonce, an authentication-tag mismatch (wrong
/// passphrase, corruption, or tampering), or non-UTF-8 plaintext. The cause
/// is never narrowed further.
pub fn decrypt_secret(envelope: &CipherEnvelope, passphrase: &str) -> CryptoResult<String> {
    decrypt_secret_with(envelope, passphrase, &KdfParams::default())
}

/// As [`decrypt_secret`], with explicit KDF parameters.
pub fn decrypt_secret_with(
    envelope: &CipherEnvelope,
    passphrase: &str,
    params: &KdfParams,
) -> CryptoResult<String> {
    let combined = BASE64
        .decode(envelope.as_str())
        .map_err(|_| CryptoError::DecryptionFailed)?;

    if combined.len() < SALT_SIZE + NONCE_SIZE {
        return Err(CryptoError::DecryptionFailed);
    }

    // Fixed-offset layout: 0..16 salt, 16..28 nonce, 28.. ciphertext+tag.
    let salt = Salt::try_from_slice(&combined[..SALT_SIZE])?;
    let nonce = Nonce::from_slice(&combined[SALT_SIZE..SALT_SIZE + NONCE_SIZE]);
    let ciphertext = &combined[SALT_SIZE + NONCE_SIZE..];

    let key = derive_key(passphrase, &salt, params)?;
    let cipher = ChaCha20Poly1305::new(Key::from_slice(key.as_bytes()));
    let plaintext = cipher
        .decrypt(nonce, ciphertext)
        .map_err(|_| CryptoError::DecryptionFailed)?;

    String::from_utf8(plaintext).map_err(|_| CryptoError::DecryptionFailed)
}
