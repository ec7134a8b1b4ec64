//! Debounced layout recomputation after container resizes.
//!
//! A container can change size without the map being told (a side panel
//! opens, the window is resized). The box size may still be settling when
//! the change is first observed, so recomputation waits [`SETTLE_DELAY`].
//! Bursts of changes share one pending recomputation: each change pushes
//! the deadline back, but never past [`MAX_SETTLE`] after the first change
//! of the burst.

use eframe::egui::Vec2;
use std::time::Duration;
use web_time::Instant;

/// Time to wait after a size change before recomputing.
pub const SETTLE_DELAY: Duration = Duration::from_millis(50);

/// Longest a burst of size changes may postpone recomputation.
pub const MAX_SETTLE: Duration = Duration::from_millis(250);

#[derive(Debug, Clone, Copy)]
struct PendingRecompute {
    first_change: Instant,
    due: Instant,
    size: Vec2,
}

/// Watches the container size and schedules layout recomputation.
#[derive(Debug, Default)]
pub struct ResizeCoordinator {
    observed: Option<Vec2>,
    pending: Option<PendingRecompute>,
}

impl ResizeCoordinator {
    /// Records the container size seen this frame.
    ///
    /// The first observation is the baseline and schedules nothing. Returns
    /// true if the observation scheduled (or rescheduled) a recomputation.
    pub fn observe(&mut self, size: Vec2, now: Instant) -> bool {
        let previous = self.observed.replace(size);
        match previous {
            None => false,
            Some(previous) if previous == size => false,
            Some(_) => {
                self.schedule(size, now);
                true
            }
        }
    }

    /// Sets the baseline size without scheduling anything.
    pub fn reset(&mut self, size: Vec2) {
        self.observed = Some(size);
        self.pending = None;
    }

    /// Returns the size to apply if a recomputation is due.
    pub fn poll(&mut self, now: Instant) -> Option<Vec2> {
        let pending = self.pending?;
        if now < pending.due {
            return None;
        }
        self.pending = None;
        Some(pending.size)
    }

    /// Drops any pending recomputation. Returns true if one was pending.
    pub fn cancel(&mut self) -> bool {
        self.pending.take().is_some()
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Time left until the pending recomputation is due.
    pub fn time_until_due(&self, now: Instant) -> Option<Duration> {
        self.pending
            .map(|pending| pending.due.saturating_duration_since(now))
    }

    fn schedule(&mut self, size: Vec2, now: Instant) {
        let pending = match self.pending {
            Some(pending) => PendingRecompute {
                first_change: pending.first_change,
                due: (now + SETTLE_DELAY).min(pending.first_change + MAX_SETTLE),
                size,
            },
            None => PendingRecompute {
                first_change: now,
                due: now + SETTLE_DELAY,
                size,
            },
        };
        self.pending = Some(pending);
    }
}
