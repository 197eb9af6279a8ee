//! Clipboard hygiene for copied secrets.
//!
//! Any plaintext the surrounding application places on the system clipboard
//! is proactively overwritten after a fixed delay. Best-effort only: the
//! operating clipboard cannot be made unreadable retroactively, so this is a
//! mitigation, not a security boundary.
//!
//! The pending clear is a real handle, not a fire-and-forget timer, so tests
//! can assert deterministically that it fired or was cancelled.

use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::debug;

/// Abstraction over the platform clipboard, supplied by the embedding
/// application.
pub trait Clipboard: Send + Sync {
    fn set_text(&self, text: &str);
    fn clear(&self);
}

/// Handle to a pending clipboard clear.
///
/// Dropping the handle does NOT cancel the clear — wiping the clipboard is
/// the safe default. Cancellation must be explicit.
pub struct ScheduledClear {
    handle: JoinHandle<()>,
}

impl ScheduledClear {
    /// Cancels the pending clear, leaving the clipboard contents alone.
    pub fn cancel(self) {
        self.handle.abort();
        debug!("scheduled clipboard clear cancelled");
    }

    /// Whether the clear has already fired.
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

/// Copies a secret to the clipboard and schedules a clear after `delay`.
///
/// Must be called from within a tokio runtime.
pub fn copy_secret(
    clipboard: Arc<dyn Clipboard>,
    secret: &str,
    delay: Duration,
) -> ScheduledClear {
    clipboard.set_text(secret);
    debug!(delay_secs = delay.as_secs(), "secret copied, clear scheduled");

    let handle = tokio::spawn(async move {
        tokio::time::sleep(delay).await;
        clipboard.clear();
        debug!("clipboard cleared");
    });

    ScheduledClear { handle }
}
