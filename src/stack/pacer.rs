//! Recompute pacing — a single-slot pending-work queue.
//!
//! Scroll events can arrive at native rate (hundreds per second); transforms
//! must be recomputed at most once per frame, always from the *latest*
//! scroll offset.  Events therefore never carry work: they only set a dirty
//! flag, and the frame loop drains it.  A new event either finds the flag
//! already set (no-op) or sets it — the classic trailing debounce to the
//! next frame.
//!
//! A minimum interval between runs is layered on top as a guard against
//! pathological tick rates.  It delays a run to a later frame but never
//! drops one: the flag stays set until the run actually happens, so the
//! recompute still sees the final offset of the burst.

use std::time::{Duration, Instant};

/// Default floor between recomputes (~30fps).  The frame tick normally
/// paces runs; this only matters if ticks arrive faster than expected.
pub const DEFAULT_MIN_INTERVAL: Duration = Duration::from_millis(32);

#[derive(Debug, Clone)]
pub struct FramePacer {
    dirty: bool,
    last_run: Option<Instant>,
    min_interval: Duration,
}

impl Default for FramePacer {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_INTERVAL)
    }
}

impl FramePacer {
    pub fn new(min_interval: Duration) -> Self {
        Self {
            dirty: false,
            last_run: None,
            min_interval,
        }
    }

    /// Note that the scroll state changed.  Idempotent — a burst of calls
    /// collapses into one pending run.
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Ask whether a recompute should run now.  Returns `true` at most once
    /// per pending burst; the caller must then run the recompute using the
    /// current (latest) scroll offset.
    pub fn take_due(&mut self, now: Instant) -> bool {
        if !self.dirty {
            return false;
        }
        if let Some(last) = self.last_run {
            if now.duration_since(last) < self.min_interval {
                // Too soon — stay dirty, run on a later frame.
                return false;
            }
        }
        self.dirty = false;
        self.last_run = Some(now);
        true
    }

    /// Record an out-of-band run (e.g. the synchronous recompute right
    /// after a measure) so the throttle window starts from it.
    pub fn note_run(&mut self, now: Instant) {
        self.dirty = false;
        self.last_run = Some(now);
    }
}
