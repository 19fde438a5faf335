//! User-facing notifications.
//!
//! Controllers report outcomes through the [`Notify`] capability instead of
//! touching UI state directly; the TUI hands them its toast queue, tests hand
//! them a recorder.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Sink for transient user-facing messages.
pub trait Notify {
    fn success(&mut self, message: &str);
    fn error(&mut self, message: &str);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

#[derive(Clone, Debug)]
pub struct Toast {
    pub kind: ToastKind,
    pub message: String,
    pub shown_at: Instant,
}

/// Bounded queue of transient notifications rendered above the status bar.
/// Entries expire after a few seconds; errors linger a little longer.
#[derive(Debug)]
pub struct Toasts {
    entries: VecDeque<Toast>,
    capacity: usize,
    success_ttl: Duration,
    error_ttl: Duration,
}

impl Toasts {
    pub fn new() -> Self {
        Self {
            entries: VecDeque::new(),
            capacity: 4,
            success_ttl: Duration::from_secs(4),
            error_ttl: Duration::from_secs(8),
        }
    }

    fn push(&mut self, kind: ToastKind, message: &str) {
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(Toast {
            kind,
            message: message.to_string(),
            shown_at: Instant::now(),
        });
    }

    /// Drop entries older than their time-to-live.
    pub fn prune(&mut self, now: Instant) {
        let success_ttl = self.success_ttl;
        let error_ttl = self.error_ttl;
        self.entries.retain(|t| {
            let ttl = match t.kind {
                ToastKind::Success => success_ttl,
                ToastKind::Error => error_ttl,
            };
            now.duration_since(t.shown_at) < ttl
        });
    }

    pub fn visible(&self) -> impl Iterator<Item = &Toast> {
        self.entries.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for Toasts {
    fn default() -> Self {
        Self::new()
    }
}

impl Notify for Toasts {
    fn success(&mut self, message: &str) {
        self.push(ToastKind::Success, message);
    }

    fn error(&mut self, message: &str) {
        tracing::warn!(message, "surfaced error");
        self.push(ToastKind::Error, message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn queue_is_bounded_and_drops_oldest() {
        let mut toasts = Toasts::new();
        for i in 0..6 {
            toasts.success(&format!("message {i}"));
        }
        let messages: Vec<_> = toasts.visible().map(|t| t.message.clone()).collect();
        assert_eq!(messages.len(), 4);
        assert_eq!(messages[0], "message 2");
        assert_eq!(messages[3], "message 5");
    }

    #[test]
    fn prune_expires_old_entries() {
        let mut toasts = Toasts::new();
        toasts.error("stale");
        let later = Instant::now() + Duration::from_secs(60);
        toasts.prune(later);
        assert!(toasts.is_empty());
    }
}
