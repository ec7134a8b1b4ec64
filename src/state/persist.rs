//! Throttled persistence of the settled view.
//!
//! The view is written to the URL and localStorage at most once per
//! [`PERSIST_INTERVAL`]. A change that arrives inside the window is held
//! back, and the caller is told how long to wait before trying again so the
//! final view is written even if nothing else triggers a repaint.

use std::time::Duration;
use web_time::Instant;

/// Minimum interval between URL and settings writes.
pub const PERSIST_INTERVAL: Duration = Duration::from_secs(1);

/// What to do with the current view this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersistAction {
    /// Already written; nothing to do.
    Unchanged,
    /// Write now.
    Write,
    /// Changed, but written too recently. Retry after the duration.
    Defer(Duration),
}

/// Tracks the last written value and when it was written.
#[derive(Debug)]
pub struct PersistGate<T> {
    last_write: Instant,
    last_value: Option<T>,
}

impl<T: PartialEq> PersistGate<T> {
    pub fn new(now: Instant) -> Self {
        Self {
            last_write: now,
            last_value: None,
        }
    }

    /// Decides whether `value` should be written at `now`. A `Write`
    /// decision records `value` as written.
    pub fn check(&mut self, value: T, now: Instant) -> PersistAction {
        if self.last_value.as_ref() == Some(&value) {
            return PersistAction::Unchanged;
        }

        let elapsed = now.saturating_duration_since(self.last_write);
        if elapsed < PERSIST_INTERVAL {
            return PersistAction::Defer(PERSIST_INTERVAL - elapsed);
        }

        self.last_write = now;
        self.last_value = Some(value);
        PersistAction::Write
    }
}
