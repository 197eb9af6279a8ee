//! Master-passphrase session for SecureVault.
//!
//! Governs when decrypted plaintext may exist in process memory. The session
//! is either `Locked` or `Unlocked`; encrypt/decrypt are only reachable while
//! unlocked, and locking zeroizes the held passphrase and notifies registered
//! hooks so dependent layers discard their plaintext immediately.
//!
//! The session holds the passphrase, never a cached key: every envelope
//! carries its own salt, so the key is re-derived per operation anyway.
//!
//! Unlocking is unconditional by design. There is no stored verification
//! token — the remote store holds only self-describing envelopes — so the
//! only way to prove a passphrase correct is a later authenticated
//! decryption. There is likewise no recovery path: re-creating the master
//! key leaves every prior envelope permanently undecryptable.

pub mod clipboard;

use securevault_crypto::{decrypt_secret, encrypt_secret, CryptoError};
use securevault_types::CipherEnvelope;
use std::sync::{Mutex, RwLock};
use std::time::Duration;
use tokio::sync::broadcast;
use tracing::debug;
use zeroize::{Zeroize, ZeroizeOnDrop};

// ============================================================================
// Error types
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("vault session is locked (unlock required)")]
    Locked,
    #[error("passphrases do not match")]
    PassphraseMismatch,
    #[error("master passphrase too short (min {min} characters)")]
    PassphraseTooShort { min: usize },
    #[error(transparent)]
    Crypto(#[from] CryptoError),
}

pub type SessionResult<T> = Result<T, SessionError>;

// ============================================================================
// Configuration
// ============================================================================

/// Session policy knobs.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Minimum master passphrase length for first-time setup.
    pub min_passphrase_len: usize,
    /// How long a secret may sit on the system clipboard before the
    /// scheduled clear fires.
    pub clipboard_clear_delay: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            min_passphrase_len: 8,
            clipboard_clear_delay: Duration::from_secs(15),
        }
    }
}

// ============================================================================
// Master passphrase
// ============================================================================

/// The user's master passphrase. Never persisted, never logged; zeroized on
/// drop and redacted in `Debug`.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct MasterPassphrase(String);

impl MasterPassphrase {
    pub fn new(passphrase: impl Into<String>) -> Self {
        Self(passphrase.into())
    }

    /// Grants access to the raw passphrase for a key-derivation call.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for MasterPassphrase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("MasterPassphrase(<redacted>)")
    }
}

// ============================================================================
// VaultSession — Locked | Unlocked state machine
// ============================================================================

/// Session state. The passphrase only exists in the `Unlocked` arm, so
/// "operate while locked" is unrepresentable.
enum SessionState {
    Locked,
    Unlocked { passphrase: MasterPassphrase },
}

/// A single vault session.
///
/// Explicitly constructed — no ambient globals — so multiple sessions can
/// coexist (e.g. under test) without interference. `lock()` is synchronous:
/// once it returns, the passphrase is gone and every lock hook has run.
pub struct VaultSession {
    state: RwLock<SessionState>,
    lock_hooks: Mutex<Vec<Box<dyn Fn() + Send + Sync>>>,
    config: SessionConfig,
}

impl Default for VaultSession {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}

impl VaultSession {
    pub fn new(config: SessionConfig) -> Self {
        Self {
            state: RwLock::new(SessionState::Locked),
            lock_hooks: Mutex::new(Vec::new()),
            config,
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Transitions to `Unlocked`, unconditionally.
    ///
    /// The session cannot validate the passphrase here; a wrong passphrase
    /// surfaces later as `DecryptionFailed` on the first decryption attempt.
    pub fn unlock(&self, passphrase: impl Into<String>) {
        let mut state = self.state.write().unwrap();
        *state = SessionState::Unlocked {
            passphrase: MasterPassphrase::new(passphrase),
        };
        debug!("vault session unlocked");
    }

    /// First-time setup: validates and then behaves as [`unlock`].
    ///
    /// Only meaningful when the record store reports zero existing records
    /// for the account — with no envelopes to decrypt, this is the one place
    /// the passphrase can be validated at all.
    ///
    /// [`unlock`]: VaultSession::unlock
    pub fn create_master_key(&self, passphrase: &str, confirm: &str) -> SessionResult<()> {
        if passphrase.chars().count() < self.config.min_passphrase_len {
            return Err(SessionError::PassphraseTooShort {
                min: self.config.min_passphrase_len,
            });
        }
        if passphrase != confirm {
            return Err(SessionError::PassphraseMismatch);
        }
        self.unlock(passphrase);
        Ok(())
    }

    /// Transitions to `Locked`, zeroizing the held passphrase, then runs
    /// every registered lock hook so dependent plaintext is discarded
    /// immediately. Operations that captured the passphrase before this
    /// call still complete with their captured value; operations started
    /// afterwards fail with `Locked`.
    pub fn lock(&self) {
        {
            let mut state = self.state.write().unwrap();
            *state = SessionState::Locked;
        }
        let hooks = self.lock_hooks.lock().unwrap();
        for hook in hooks.iter() {
            hook();
        }
        debug!("vault session locked");
    }

    pub fn is_unlocked(&self) -> bool {
        matches!(*self.state.read().unwrap(), SessionState::Unlocked { .. })
    }

    /// Registers a hook that runs synchronously inside every [`lock`] call.
    ///
    /// [`lock`]: VaultSession::lock
    pub fn on_lock(&self, hook: impl Fn() + Send + Sync + 'static) {
        self.lock_hooks.lock().unwrap().push(Box::new(hook));
    }

    /// Snapshots the passphrase for an operation that is about to start.
    ///
    /// A batch operation captures once and keeps working with the captured
    /// value even if the session is locked mid-flight; whether its *result*
    /// may be retained is decided against the session state afterwards.
    pub fn capture_passphrase(&self) -> SessionResult<MasterPassphrase> {
        match *self.state.read().unwrap() {
            SessionState::Unlocked { ref passphrase } => Ok(passphrase.clone()),
            SessionState::Locked => Err(SessionError::Locked),
        }
    }

    /// Encrypts one secret under the session passphrase.
    pub fn encrypt_secret(&self, plaintext: &str) -> SessionResult<CipherEnvelope> {
        let passphrase = self.capture_passphrase()?;
        Ok(encrypt_secret(plaintext, passphrase.expose())?)
    }

    /// Decrypts one envelope under the session passphrase.
    pub fn decrypt_secret(&self, envelope: &CipherEnvelope) -> SessionResult<String> {
        let passphrase = self.capture_passphrase()?;
        Ok(decrypt_secret(envelope, passphrase.expose())?)
    }

    /// Locks the session whenever the authentication boundary signals
    /// logout. Cooperative: the caller awaits this alongside its other
    /// tasks; it returns when the logout channel closes.
    pub async fn listen_for_logout(&self, mut logout_rx: broadcast::Receiver<()>) {
        loop {
            match logout_rx.recv().await {
                // A lagged receiver still means at least one logout fired.
                Ok(()) | Err(broadcast::error::RecvError::Lagged(_)) => self.lock(),
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    }
}
