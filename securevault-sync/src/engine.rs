//! The sync engine — reconciles decrypted state with the encrypted store.
//!
//! On read, every record's password envelope is decrypted into the working
//! set; on write, the plaintext is sealed into a fresh envelope before
//! anything is dispatched. The store only ever sees ciphertext.
//!
//! Working-set mutations happen on the single control thread, always as one
//! synchronous step after the last await, so an abandoned future can never
//! leave the set partially applied. External consumers get cloned snapshots.

use crate::error::{SyncError, SyncResult};
use crate::store::RecordStore;
use securevault_crypto::decrypt_secret;
use securevault_session::VaultSession;
use securevault_types::{
    DecryptedVaultItem, EncryptedItemDraft, ItemDraft, ItemId, OwnerId, VaultItem,
};
use std::sync::{Arc, RwLock};
use tracing::{debug, warn};

/// Reconciles an in-memory decrypted working set with the remote encrypted
/// record store, on behalf of one owner and one session.
pub struct SyncEngine {
    session: Arc<VaultSession>,
    store: Arc<dyn RecordStore>,
    owner: OwnerId,
    /// Decrypted working set, newest first. Shared with the session's lock
    /// hook so locking wipes it synchronously.
    items: Arc<RwLock<Vec<DecryptedVaultItem>>>,
    /// Held for the duration of a batch load; a second concurrent load is
    /// rejected rather than interleaved.
    load_guard: tokio::sync::Mutex<()>,
}

impl SyncEngine {
    /// Creates an engine bound to a session, a store, and an owner.
    ///
    /// Registers a lock hook on the session: the decrypted working set is
    /// discarded the moment the session locks, not at the next engine call.
    pub fn new(session: Arc<VaultSession>, store: Arc<dyn RecordStore>, owner: OwnerId) -> Self {
        let items: Arc<RwLock<Vec<DecryptedVaultItem>>> = Arc::new(RwLock::new(Vec::new()));

        let weak = Arc::downgrade(&items);
        session.on_lock(move || {
            if let Some(items) = weak.upgrade() {
                items.write().unwrap().clear();
            }
        });

        Self {
            session,
            store,
            owner,
            items,
            load_guard: tokio::sync::Mutex::new(()),
        }
    }

    /// First-use detection: true when the store holds no records for this
    /// owner, in which case the session's `create_master_key` entry applies
    /// instead of `unlock`. Needs no decryption, so it works while locked.
    pub async fn is_first_use(&self) -> SyncResult<bool> {
        Ok(self.store.list(&self.owner).await?.is_empty())
    }

    /// Loads and decrypts every record for the owner.
    ///
    /// Fail-fast: if any single envelope fails to decrypt, the whole batch
    /// fails and the working set is cleared — a universal failure almost
    /// always means a wrong passphrase, not one corrupt record.
    ///
    /// At most one load is in flight at a time; a concurrent call fails with
    /// `LoadInProgress`. The passphrase is captured once at entry, so a
    /// `lock()` during the batch does not corrupt it mid-decrypt — but the
    /// decrypted result is only retained if the session is still unlocked.
    pub async fn load_all(&self) -> SyncResult<Vec<DecryptedVaultItem>> {
        let _guard = self
            .load_guard
            .try_lock()
            .map_err(|_| SyncError::LoadInProgress)?;
        let passphrase = self.session.capture_passphrase()?;

        let records = self.store.list(&self.owner).await?;
        let count = records.len();

        let mut decrypted = Vec::with_capacity(count);
        for record in records {
            match decrypt_secret(&record.password, passphrase.expose()) {
                Ok(password) => decrypted.push(DecryptedVaultItem::from_record(record, password)),
                Err(_) => {
                    self.items.write().unwrap().clear();
                    warn!("batch decrypt failed, working set cleared");
                    return Err(SyncError::Decryption);
                }
            }
        }

        if !self.session.is_unlocked() {
            // Locked while the batch was in flight — don't retain plaintext.
            return Err(SyncError::Locked);
        }

        let mut items = self.items.write().unwrap();
        *items = decrypted;
        debug!(count, "working set loaded");
        Ok(items.clone())
    }

    /// Encrypts and saves a draft, then applies the result locally.
    ///
    /// `existing = None` creates a record (prepended to the working set,
    /// preserving newest-first order); `Some(id)` updates it in place. Every
    /// save seals a brand-new envelope with fresh salt and nonce — stored
    /// envelopes are never re-encrypted in place. The local update reuses
    /// the draft's plaintext instead of re-decrypting the store's response.
    pub async fn save(
        &self,
        draft: ItemDraft,
        existing: Option<&ItemId>,
    ) -> SyncResult<DecryptedVaultItem> {
        let envelope = self.session.encrypt_secret(&draft.password)?;
        let payload = EncryptedItemDraft {
            title: draft.title.clone(),
            username: draft.username.clone(),
            password: envelope,
            url: draft.url.clone(),
            notes: draft.notes.clone(),
        };

        let record: VaultItem = match existing {
            None => self.store.create(&self.owner, payload).await?,
            Some(id) => self.store.update(&self.owner, id, payload).await?,
        };

        let item = DecryptedVaultItem::from_record(record, draft.password.clone());

        if self.session.is_unlocked() {
            let mut items = self.items.write().unwrap();
            match existing {
                None => items.insert(0, item.clone()),
                Some(id) => {
                    if let Some(slot) = items.iter_mut().find(|candidate| &candidate.id == id) {
                        *slot = item.clone();
                    }
                }
            }
        }

        debug!(update = existing.is_some(), "item saved");
        Ok(item)
    }

    /// Deletes a record, removing it from the working set only once the
    /// store confirms.
    pub async fn remove(&self, id: &ItemId) -> SyncResult<()> {
        self.store.delete(&self.owner, id).await?;
        self.items.write().unwrap().retain(|item| &item.id != id);
        debug!("item removed");
        Ok(())
    }

    /// Case-insensitive substring search over title, username, url and
    /// notes. The password is never searched.
    pub fn search(&self, query: &str) -> Vec<DecryptedVaultItem> {
        let query = query.to_lowercase();
        self.items
            .read()
            .unwrap()
            .iter()
            .filter(|item| {
                item.title.to_lowercase().contains(&query)
                    || item.username.to_lowercase().contains(&query)
                    || item
                        .url
                        .as_deref()
                        .is_some_and(|url| url.to_lowercase().contains(&query))
                    || item
                        .notes
                        .as_deref()
                        .is_some_and(|notes| notes.to_lowercase().contains(&query))
            })
            .cloned()
            .collect()
    }

    /// Immutable snapshot of the working set, newest first.
    pub fn snapshot(&self) -> Vec<DecryptedVaultItem> {
        self.items.read().unwrap().clone()
    }
}
