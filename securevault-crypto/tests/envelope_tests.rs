use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use securevault_crypto::{
    decrypt_secret, decrypt_secret_with, encrypt_secret, encrypt_secret_with, CryptoError,
    KdfParams, NONCE_SIZE, SALT_SIZE, TAG_SIZE,
};
use securevault_types::CipherEnvelope;

/// Reduced iteration count so the sweep/property tests stay fast. The
/// default-parameter path is still covered by the scenario tests below.
const FAST: KdfParams = KdfParams { iterations: 1_000 };

// ── Round-trip ───────────────────────────────────────────────────

#[test]
fn roundtrip_returns_original_plaintext() {
    let envelope = encrypt_secret("hunter2", "Tr0ub4dor&3").unwrap();
    let plaintext = decrypt_secret(&envelope, "Tr0ub4dor&3").unwrap();
    assert_eq!(plaintext, "hunter2");
}

#[test]
fn roundtrip_empty_string() {
    let envelope = encrypt_secret_with("", "some-passphrase", &FAST).unwrap();
    assert_eq!(decrypt_secret_with(&envelope, "some-passphrase", &FAST).unwrap(), "");
}

#[test]
fn roundtrip_multibyte_plaintext_and_passphrase() {
    let plaintext = "pässwörd-秘密-🔐";
    let passphrase = "mästerpässphräse-鍵";
    let envelope = encrypt_secret_with(plaintext, passphrase, &FAST).unwrap();
    assert_eq!(
        decrypt_secret_with(&envelope, passphrase, &FAST).unwrap(),
        plaintext
    );
}

// ── Non-recovery ─────────────────────────────────────────────────

#[test]
fn wrong_passphrase_fails() {
    let envelope = encrypt_secret("hunter2", "Tr0ub4dor&3").unwrap();
    let err = decrypt_secret(&envelope, "wrong-pass").unwrap_err();
    assert!(matches!(err, CryptoError::DecryptionFailed));
}

#[test]
fn near_miss_passphrase_fails() {
    let envelope = encrypt_secret_with("secret", "passphrase", &FAST).unwrap();
    assert!(decrypt_secret_with(&envelope, "passphrase ", &FAST).is_err());
    assert!(decrypt_secret_with(&envelope, "Passphrase", &FAST).is_err());
}

// ── Uniqueness ───────────────────────────────────────────────────

#[test]
fn same_inputs_produce_different_envelopes() {
    let a = encrypt_secret_with("same-plaintext", "same-pass", &FAST).unwrap();
    let b = encrypt_secret_with("same-plaintext", "same-pass", &FAST).unwrap();
    // Fresh salt and nonce every call
    assert_ne!(a, b);

    assert_eq!(decrypt_secret_with(&a, "same-pass", &FAST).unwrap(), "same-plaintext");
    assert_eq!(decrypt_secret_with(&b, "same-pass", &FAST).unwrap(), "same-plaintext");
}

// ── Wire format ──────────────────────────────────────────────────

#[test]
fn envelope_layout_is_salt_nonce_ciphertext_tag() {
    let plaintext = "layout-check";
    let envelope = encrypt_secret_with(plaintext, "pass", &FAST).unwrap();

    let raw = BASE64.decode(envelope.as_str()).unwrap();
    assert_eq!(
        raw.len(),
        SALT_SIZE + NONCE_SIZE + plaintext.len() + TAG_SIZE
    );
}

#[test]
fn envelopes_decode_as_standard_base64() {
    let envelope = encrypt_secret_with("x", "pass", &FAST).unwrap();
    assert!(BASE64.decode(envelope.as_str()).is_ok());
}

// ── Malformed envelopes ──────────────────────────────────────────

#[test]
fn garbage_envelope_fails() {
    let envelope = CipherEnvelope::new("not-valid-base64!!!".into());
    assert!(matches!(
        decrypt_secret_with(&envelope, "pass", &FAST).unwrap_err(),
        CryptoError::DecryptionFailed
    ));
}

#[test]
fn too_short_envelope_fails() {
    // Valid base64, but fewer bytes than salt + nonce
    let envelope = CipherEnvelope::new(BASE64.encode([0u8; SALT_SIZE + NONCE_SIZE - 1]));
    assert!(matches!(
        decrypt_secret_with(&envelope, "pass", &FAST).unwrap_err(),
        CryptoError::DecryptionFailed
    ));
}

#[test]
fn empty_envelope_fails() {
    let envelope = CipherEnvelope::new(String::new());
    assert!(decrypt_secret_with(&envelope, "pass", &FAST).is_err());
}

// ── Tamper detection ─────────────────────────────────────────────

#[test]
fn flipping_any_ciphertext_byte_fails() {
    let envelope = encrypt_secret_with("tamper-me", "pass", &FAST).unwrap();
    let raw = BASE64.decode(envelope.as_str()).unwrap();

    for i in SALT_SIZE + NONCE_SIZE..raw.len() {
        let mut tampered = raw.clone();
        tampered[i] ^= 0x01;
        let tampered = CipherEnvelope::new(BASE64.encode(&tampered));
        assert!(
            decrypt_secret_with(&tampered, "pass", &FAST).is_err(),
            "flip at ciphertext byte {i} was not detected"
        );
    }
}

#[test]
fn tampered_salt_fails() {
    let envelope = encrypt_secret_with("tamper-me", "pass", &FAST).unwrap();
    let mut raw = BASE64.decode(envelope.as_str()).unwrap();
    raw[0] ^= 0xFF;
    let tampered = CipherEnvelope::new(BASE64.encode(&raw));
    assert!(decrypt_secret_with(&tampered, "pass", &FAST).is_err());
}

#[test]
fn tampered_nonce_fails() {
    let envelope = encrypt_secret_with("tamper-me", "pass", &FAST).unwrap();
    let mut raw = BASE64.decode(envelope.as_str()).unwrap();
    raw[SALT_SIZE] ^= 0xFF;
    let tampered = CipherEnvelope::new(BASE64.encode(&raw));
    assert!(decrypt_secret_with(&tampered, "pass", &FAST).is_err());
}

// ── Error hygiene ────────────────────────────────────────────────

#[test]
fn decryption_error_reveals_nothing() {
    let envelope = encrypt_secret_with("top-secret-plaintext", "real-pass", &FAST).unwrap();
    let err = decrypt_secret_with(&envelope, "guess", &FAST).unwrap_err();
    let message = err.to_string();
    assert!(!message.contains("top-secret-plaintext"));
    assert!(!message.contains("real-pass"));
    assert!(!message.contains("guess"));
}

// Property-based tests
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn roundtrip_always_holds(
            plaintext in ".*",
            passphrase in ".+",
        ) {
            let envelope = encrypt_secret_with(&plaintext, &passphrase, &FAST).unwrap();
            let recovered = decrypt_secret_with(&envelope, &passphrase, &FAST).unwrap();
            prop_assert_eq!(recovered, plaintext);
        }

        #[test]
        fn different_passphrase_never_decrypts(
            plaintext in ".*",
            passphrase in "[a-z]{4,16}",
            other in "[A-Z]{4,16}",
        ) {
            let envelope = encrypt_secret_with(&plaintext, &passphrase, &FAST).unwrap();
            prop_assert!(decrypt_secret_with(&envelope, &other, &FAST).is_err());
        }
    }
}
