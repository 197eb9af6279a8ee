//! Sync engine for SecureVault.
//!
//! Reconciles an in-memory decrypted working set with a remote encrypted
//! record store:
//!
//! - **read path**: `list` → decrypt every password envelope → working set
//! - **write path**: encrypt → dispatch create/update/delete → optimistic
//!   local update with the already-known plaintext
//!
//! The store collaborator ([`RecordStore`]) is a narrow async trait; the
//! store itself is zero-knowledge and only ever handles ciphertext. The
//! engine depends on `securevault-session` for the active passphrase and
//! discards all plaintext the moment the session locks.

mod engine;
mod error;
mod memory;
mod store;

pub use engine::SyncEngine;
pub use error::{StoreError, SyncError, SyncResult};
pub use memory::InMemoryRecordStore;
pub use store::{RecordStore, StoreResult};
