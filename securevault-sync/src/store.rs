//! The record store collaborator boundary.
//!
//! The store holds encrypted records only — it never sees a passphrase, a
//! key, or a plaintext password. All operations are scoped to the
//! authenticated owner supplied by the authentication boundary.

use crate::error::StoreError;
use async_trait::async_trait;
use securevault_types::{EncryptedItemDraft, ItemId, OwnerId, VaultItem};

pub type StoreResult<T> = Result<T, StoreError>;

/// Remote persistence for encrypted vault records.
///
/// `list` returns records most-recently-created first; the engine preserves
/// that order in its working set.
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn list(&self, owner: &OwnerId) -> StoreResult<Vec<VaultItem>>;

    /// Creates a record, assigning its id and timestamps.
    async fn create(&self, owner: &OwnerId, draft: EncryptedItemDraft) -> StoreResult<VaultItem>;

    /// Replaces a record's fields, refreshing `updated_at`.
    async fn update(
        &self,
        owner: &OwnerId,
        id: &ItemId,
        draft: EncryptedItemDraft,
    ) -> StoreResult<VaultItem>;

    async fn delete(&self, owner: &OwnerId, id: &ItemId) -> StoreResult<()>;
}
