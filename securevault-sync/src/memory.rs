//! In-memory record store.
//!
//! Reference implementation of [`RecordStore`] for tests and local-only
//! embeddings. Records are kept newest-first per owner, matching the listing
//! order a remote store would return. A fault-injection switch simulates an
//! unreachable backend.

use crate::error::StoreError;
use crate::store::{RecordStore, StoreResult};
use async_trait::async_trait;
use chrono::Utc;
use securevault_types::{EncryptedItemDraft, ItemId, OwnerId, VaultItem};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::Mutex;
use uuid::Uuid;

#[derive(Default)]
pub struct InMemoryRecordStore {
    /// Per-owner records, newest first.
    records: Mutex<HashMap<OwnerId, Vec<VaultItem>>>,
    offline: AtomicBool,
}

impl InMemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulates the backend becoming unreachable; every operation fails
    /// with `Unavailable` until switched back.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    fn check_online(&self) -> StoreResult<()> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("store is offline".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl RecordStore for InMemoryRecordStore {
    async fn list(&self, owner: &OwnerId) -> StoreResult<Vec<VaultItem>> {
        self.check_online()?;
        let records = self.records.lock().await;
        Ok(records.get(owner).cloned().unwrap_or_default())
    }

    async fn create(&self, owner: &OwnerId, draft: EncryptedItemDraft) -> StoreResult<VaultItem> {
        self.check_online()?;
        let now = Utc::now();
        let item = VaultItem {
            id: Uuid::new_v4().to_string(),
            owner_id: owner.clone(),
            title: draft.title,
            username: draft.username,
            password: draft.password,
            url: draft.url,
            notes: draft.notes,
            created_at: now,
            updated_at: now,
        };

        let mut records = self.records.lock().await;
        records.entry(owner.clone()).or_default().insert(0, item.clone());
        Ok(item)
    }

    async fn update(
        &self,
        owner: &OwnerId,
        id: &ItemId,
        draft: EncryptedItemDraft,
    ) -> StoreResult<VaultItem> {
        self.check_online()?;
        let mut records = self.records.lock().await;
        let items = records
            .get_mut(owner)
            .ok_or_else(|| StoreError::NotFound(id.clone()))?;
        let item = items
            .iter_mut()
            .find(|item| &item.id == id)
            .ok_or_else(|| StoreError::NotFound(id.clone()))?;

        item.title = draft.title;
        item.username = draft.username;
        item.password = draft.password;
        item.url = draft.url;
        item.notes = draft.notes;
        item.updated_at = Utc::now();
        Ok(item.clone())
    }

    async fn delete(&self, owner: &OwnerId, id: &ItemId) -> StoreResult<()> {
        self.check_online()?;
        let mut records = self.records.lock().await;
        let items = records
            .get_mut(owner)
            .ok_or_else(|| StoreError::NotFound(id.clone()))?;
        let before = items.len();
        items.retain(|item| &item.id != id);
        if items.len() == before {
            return Err(StoreError::NotFound(id.clone()));
        }
        Ok(())
    }
}
