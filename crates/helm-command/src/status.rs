//! Single-slot, expiring status line.
//!
//! Every write replaces the previous entry. Expiry is checked lazily on
//! read, so an expired entry is never observable. Each write returns a
//! [`StatusStamp`] that a delayed cleaner can use to clear the slot only if
//! nobody has written since.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::time::Instant;

/// Identifies one write to the channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StatusStamp(u64);

/// The current status message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusEntry {
    pub text: String,
    /// `None` for persistent entries.
    pub expires_at: Option<Instant>,
    stamp: StatusStamp,
}

impl StatusEntry {
    fn is_expired(&self, now: Instant) -> bool {
        self.expires_at.is_some_and(|at| now >= at)
    }
}

#[derive(Debug, Default)]
struct Slot {
    entry: Option<StatusEntry>,
    next_stamp: u64,
}

/// Shared handle to the status line. Clones refer to the same slot.
#[derive(Debug, Clone, Default)]
pub struct StatusChannel {
    slot: Arc<Mutex<Slot>>,
}

impl StatusChannel {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Slot> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self, text: String, expires_at: Option<Instant>) -> StatusStamp {
        let mut slot = self.lock();
        let stamp = StatusStamp(slot.next_stamp);
        slot.next_stamp += 1;
        slot.entry = Some(StatusEntry {
            text,
            expires_at,
            stamp,
        });
        stamp
    }

    /// Overwrite the entry; it expires `ttl` from now.
    pub fn set(&self, text: impl Into<String>, ttl: Duration) -> StatusStamp {
        self.write(text.into(), Some(Instant::now() + ttl))
    }

    /// Overwrite the entry with one that never expires.
    pub fn set_persistent(&self, text: impl Into<String>) -> StatusStamp {
        self.write(text.into(), None)
    }

    /// Empty the slot.
    pub fn clear(&self) {
        self.lock().entry = None;
    }

    /// Clear only if the current entry is the one written with `stamp`.
    ///
    /// Returns `true` if the slot was cleared.
    pub fn clear_if(&self, stamp: StatusStamp) -> bool {
        let mut slot = self.lock();
        if slot.entry.as_ref().is_some_and(|e| e.stamp == stamp) {
            slot.entry = None;
            true
        } else {
            false
        }
    }

    /// Current text, or `None` if empty or expired.
    pub fn read(&self) -> Option<String> {
        self.read_entry().map(|e| e.text)
    }

    /// Current entry, or `None` if empty or expired.
    pub fn read_entry(&self) -> Option<StatusEntry> {
        let mut slot = self.lock();
        if slot
            .entry
            .as_ref()
            .is_some_and(|e| e.is_expired(Instant::now()))
        {
            slot.entry = None;
        }
        slot.entry.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TTL: Duration = Duration::from_secs(3);

    #[test]
    fn empty_by_default() {
        assert!(StatusChannel::new().read().is_none());
    }

    #[test]
    fn last_writer_wins() {
        let status = StatusChannel::new();
        status.set("first", TTL);
        status.set("second", TTL);
        assert_eq!(status.read().as_deref(), Some("second"));
    }

    #[test]
    fn clones_share_the_slot() {
        let a = StatusChannel::new();
        let b = a.clone();
        a.set_persistent("hello");
        assert_eq!(b.read().as_deref(), Some("hello"));
        b.clear();
        assert!(a.read().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn expires_after_ttl() {
        let status = StatusChannel::new();
        status.set("Clear executed", TTL);
        tokio::time::advance(Duration::from_millis(2999)).await;
        assert_eq!(status.read().as_deref(), Some("Clear executed"));
        tokio::time::advance(Duration::from_millis(1)).await;
        assert!(status.read().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn persistent_never_expires() {
        let status = StatusChannel::new();
        status.set_persistent("Executing Kill...");
        tokio::time::advance(Duration::from_secs(3600)).await;
        assert_eq!(status.read().as_deref(), Some("Executing Kill..."));
        assert!(status.read_entry().unwrap().expires_at.is_none());
    }

    #[test]
    fn clear_if_only_clears_own_write() {
        let status = StatusChannel::new();
        let old = status.set("old", TTL);
        let new = status.set("new", TTL);
        assert_ne!(old, new);
        assert!(!status.clear_if(old));
        assert_eq!(status.read().as_deref(), Some("new"));
        assert!(status.clear_if(new));
        assert!(status.read().is_none());
    }

    #[test]
    fn clear_if_same_text_different_write() {
        let status = StatusChannel::new();
        let first = status.set("Heal executed", TTL);
        status.set("Heal executed", TTL);
        assert!(!status.clear_if(first));
        assert!(status.read().is_some());
    }
}
