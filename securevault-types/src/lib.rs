//! Shared types for the SecureVault core.
//!
//! The central distinction in this crate is between the *encrypted* item
//! shape ([`VaultItem`], [`EncryptedItemDraft`]) that travels to and from the
//! record store, and the *decrypted* shapes ([`DecryptedVaultItem`],
//! [`ItemDraft`]) that exist only in process memory while a session is
//! unlocked. The decrypted shapes deliberately do not implement
//! `Serialize` and zeroize their password field on drop.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use zeroize::Zeroize;

/// Opaque id of the authenticated owner, supplied by the authentication
/// boundary. The core never interprets it.
pub type OwnerId = String;

/// Opaque record id assigned by the record store.
pub type ItemId = String;

/// An encrypted secret at rest: base64 of `salt(16) ‖ nonce(12) ‖ ciphertext+tag`.
///
/// Self-describing — decryption needs only the envelope and the master
/// passphrase, no external key registry. Envelopes are immutable once
/// created; an edit produces a brand-new envelope.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CipherEnvelope(String);

impl CipherEnvelope {
    pub fn new(encoded: String) -> Self {
        Self(encoded)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl std::fmt::Display for CipherEnvelope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A vault record as stored remotely. Only the password field is encrypted;
/// title/username/url/notes stay plaintext so the store can search and sort
/// over them.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VaultItem {
    pub id: ItemId,
    pub owner_id: OwnerId,
    pub title: String,
    pub username: String,
    pub password: CipherEnvelope,
    pub url: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The create/update payload sent to the record store. Id and timestamps are
/// assigned by the store.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncryptedItemDraft {
    pub title: String,
    pub username: String,
    pub password: CipherEnvelope,
    pub url: Option<String>,
    pub notes: Option<String>,
}

/// A vault record with its password decrypted.
///
/// Exists only in process memory while the session is unlocked. Not
/// serializable; the password is wiped on drop and redacted in `Debug`.
#[derive(Clone, PartialEq, Eq)]
pub struct DecryptedVaultItem {
    pub id: ItemId,
    pub owner_id: OwnerId,
    pub title: String,
    pub username: String,
    pub password: String,
    pub url: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl DecryptedVaultItem {
    /// Pairs a stored record with an already-known plaintext password.
    pub fn from_record(record: VaultItem, password: String) -> Self {
        Self {
            id: record.id,
            owner_id: record.owner_id,
            title: record.title,
            username: record.username,
            password,
            url: record.url,
            notes: record.notes,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

impl Drop for DecryptedVaultItem {
    fn drop(&mut self) {
        self.password.zeroize();
    }
}

impl std::fmt::Debug for DecryptedVaultItem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DecryptedVaultItem")
            .field("id", &self.id)
            .field("owner_id", &self.owner_id)
            .field("title", &self.title)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("url", &self.url)
            .field("notes", &self.notes)
            .field("created_at", &self.created_at)
            .field("updated_at", &self.updated_at)
            .finish()
    }
}

/// User input for saving an item. The password is plaintext here; it is
/// encrypted before anything leaves the process.
#[derive(Clone, PartialEq, Eq)]
pub struct ItemDraft {
    pub title: String,
    pub username: String,
    pub password: String,
    pub url: Option<String>,
    pub notes: Option<String>,
}

impl Drop for ItemDraft {
    fn drop(&mut self) {
        self.password.zeroize();
    }
}

impl std::fmt::Debug for ItemDraft {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ItemDraft")
            .field("title", &self.title)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("url", &self.url)
            .field("notes", &self.notes)
            .finish()
    }
}
