//! Pin-then-release transform engine.
//!
//! The engine holds an immutable [`StackConfig`] plus the latest layout
//! measurement, and re-projects a scroll offset into a `(translate_y, scale)`
//! pair per card on every [`StackEngine::recompute`].  Transforms are
//! snapshots, never eased — rapid scrolling must stay visually coherent, so
//! there is no interpolation between frames.
//!
//! Everything here is a pure function of `(snapshot, config, scroll_top)`;
//! the only state carried across frames is the last-applied transform (to
//! let the caller skip redundant redraws) and the stack-complete latch.

use crate::stack::config::StackConfig;

/// Below this delta a transform is considered unchanged and the caller is
/// not asked to redraw.  Matches sub-row precision in the terminal — a
/// half-pixel wiggle never moves a glyph.
const TRANSLATE_EPSILON: f64 = 0.5;
const SCALE_EPSILON: f64 = 0.005;

// ───────────────────────────────────────── measurement ───────

/// Static layout measurement, captured on mount and on every resize.
///
/// Offsets are document offsets within the scroll container, in virtual
/// pixels, untransformed.  Card order = layout order = stacking order;
/// the last card is the anchor whose pin window drives stack completion.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayoutSnapshot {
    /// Top offset of each card.
    pub card_tops: Vec<f64>,
    /// Offset of the trailing sentinel marker.  `None` when the layout has
    /// no sentinel — the pin window then never ends.
    pub sentinel_top: Option<f64>,
    /// Height of the scroll viewport.
    pub viewport_height: f64,
}

// ───────────────────────────────────────── transforms ────────

/// The transform applied to one card for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardTransform {
    /// Vertical offset from the card's natural position.
    pub translate_y: f64,
    /// Uniform scale, `(0, 1]`, origin at the card's top edge.
    pub scale: f64,
}

impl CardTransform {
    pub const IDENTITY: CardTransform = CardTransform {
        translate_y: 0.0,
        scale: 1.0,
    };

    /// Whether the difference from `other` is big enough to repaint.
    fn differs_visibly(self, other: CardTransform) -> bool {
        (self.translate_y - other.translate_y).abs() > TRANSLATE_EPSILON
            || (self.scale - other.scale).abs() > SCALE_EPSILON
    }
}

/// Where a card sits in its pin lifecycle for a given scroll offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinPhase {
    /// Above the pin window — natural position, full scale.
    AtRest,
    /// Inside the pin window, scale still ramping toward target.
    Pinning,
    /// Inside the pin window, scale fully resolved.
    Pinned,
    /// Past the shared release point — transform frozen.
    Released,
}

/// What a `recompute` pass did.
#[derive(Debug, Clone, Copy, Default)]
pub struct RecomputeOutcome {
    /// At least one card's transform changed enough to warrant a repaint.
    pub changed: bool,
    /// The last card entered its pinned window on this pass.
    pub stack_completed: bool,
}

// ───────────────────────────────────────── engine ────────────

/// Converts a scroll offset into independent per-card transforms.
pub struct StackEngine {
    config: StackConfig,
    snapshot: LayoutSnapshot,
    /// Last-applied transform per card.  Kept to let callers skip redundant
    /// repaints — never consulted when computing fresh values.
    applied: Vec<CardTransform>,
    /// One-shot latch for the completion signal.  Re-armed when the last
    /// card leaves its pinned window.
    completed: bool,
    on_stack_complete: Option<Box<dyn FnMut()>>,
}

impl std::fmt::Debug for StackEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StackEngine")
            .field("config", &self.config)
            .field("snapshot", &self.snapshot)
            .field("completed", &self.completed)
            .finish_non_exhaustive()
    }
}

impl StackEngine {
    pub fn new(config: StackConfig) -> Self {
        Self {
            config: config.sanitized(),
            snapshot: LayoutSnapshot::default(),
            applied: Vec::new(),
            completed: false,
            on_stack_complete: None,
        }
    }

    /// Register the completion callback.  Fires once each time the last
    /// card enters its pinned window; re-arms when it leaves.
    pub fn on_stack_complete(mut self, callback: impl FnMut() + 'static) -> Self {
        self.on_stack_complete = Some(Box::new(callback));
        self
    }

    pub fn config(&self) -> &StackConfig {
        &self.config
    }

    /// Install a fresh layout measurement.
    ///
    /// Must be called before the first `recompute` and again after every
    /// resize — offsets are captured from live layout, never trusted across
    /// viewport changes.  Resets the applied-transform cache so the next
    /// pass repaints everything; the completion latch survives (a resize
    /// mid-pin must not re-fire the callback).
    pub fn measure(&mut self, snapshot: LayoutSnapshot) {
        self.applied = vec![CardTransform::IDENTITY; snapshot.card_tops.len()];
        self.snapshot = snapshot;
    }

    /// With no cards the engine is a no-op.
    pub fn is_empty(&self) -> bool {
        self.snapshot.card_tops.is_empty()
    }

    pub fn card_count(&self) -> usize {
        self.snapshot.card_tops.len()
    }

    /// Last-applied transforms, one per card, in stack order.
    pub fn transforms(&self) -> &[CardTransform] {
        &self.applied
    }

    // ── pin geometry ───────────────────────────────────────────

    fn trigger_px(&self) -> f64 {
        self.config
            .trigger_offset
            .resolve(self.snapshot.viewport_height)
    }

    fn scale_complete_px(&self) -> f64 {
        self.config
            .scale_complete_offset
            .resolve(self.snapshot.viewport_height)
    }

    /// Scroll offset at which card `i` starts pinning.
    pub fn pin_start(&self, i: usize) -> f64 {
        let top = self.snapshot.card_tops.get(i).copied().unwrap_or(0.0);
        top - self.trigger_px() - self.config.item_stack_offset * i as f64
    }

    /// Shared release point: the whole stack lets go once the sentinel
    /// reaches mid-viewport.  Without a sentinel the window never ends.
    pub fn pin_end(&self) -> f64 {
        match self.snapshot.sentinel_top {
            Some(top) => top - self.snapshot.viewport_height / 2.0,
            None => f64::INFINITY,
        }
    }

    /// Which lifecycle phase card `i` is in at `scroll_top`.
    pub fn phase(&self, i: usize, scroll_top: f64) -> PinPhase {
        if scroll_top < self.pin_start(i) {
            PinPhase::AtRest
        } else if scroll_top > self.pin_end() {
            PinPhase::Released
        } else {
            let top = self.snapshot.card_tops.get(i).copied().unwrap_or(0.0);
            if scroll_top < top - self.scale_complete_px() {
                PinPhase::Pinning
            } else {
                PinPhase::Pinned
            }
        }
    }

    // ── transform math ─────────────────────────────────────────

    /// Pure per-card transform for a given scroll offset.
    pub fn compute(&self, i: usize, scroll_top: f64) -> CardTransform {
        let Some(&top) = self.snapshot.card_tops.get(i) else {
            return CardTransform::IDENTITY;
        };
        let trigger = self.trigger_px();
        let stagger = self.config.item_stack_offset * i as f64;
        let pin_start = top - trigger - stagger;
        let pin_end = self.pin_end();
        let scale_end = top - self.scale_complete_px();

        // Scale progress: 0 before the pin window, 1 once the card top has
        // scrolled within the scale-complete distance, linear in between.
        // Coinciding bounds mean "fully scaled", never NaN.
        let progress = if scroll_top < pin_start {
            0.0
        } else if scroll_top >= scale_end {
            1.0
        } else {
            let span = scale_end - pin_start;
            if span <= 0.0 {
                1.0
            } else {
                (scroll_top - pin_start) / span
            }
        };

        let target_scale = (self.config.base_scale
            + i as f64 * self.config.item_scale_step)
            .min(1.0);
        let scale = 1.0 - progress * (1.0 - target_scale);

        // Vertical offset: natural position above the window, 1:1 scroll
        // tracking inside it, frozen at the release value beyond.
        let translate_y = if scroll_top < pin_start {
            0.0
        } else if scroll_top <= pin_end {
            scroll_top - top + trigger + stagger
        } else {
            pin_end - top + trigger + stagger
        };

        CardTransform { translate_y, scale }
    }

    /// Recompute and apply transforms for every card.
    ///
    /// Always reads geometry fresh — the previous frame's transforms only
    /// feed the `changed` flag.  Handles the completion latch for the last
    /// card as a side effect.
    pub fn recompute(&mut self, scroll_top: f64) -> RecomputeOutcome {
        let mut outcome = RecomputeOutcome::default();
        if self.is_empty() {
            return outcome;
        }

        for i in 0..self.snapshot.card_tops.len() {
            let fresh = self.compute(i, scroll_top);
            if fresh.differs_visibly(self.applied[i]) {
                outcome.changed = true;
            }
            self.applied[i] = fresh;
        }

        // Completion: the anchor (last) card entering its pinned window
        // fires the signal once; leaving re-arms it.
        let last = self.snapshot.card_tops.len() - 1;
        let in_window =
            scroll_top >= self.pin_start(last) && scroll_top <= self.pin_end();
        if in_window && !self.completed {
            self.completed = true;
            outcome.stack_completed = true;
            if let Some(ref mut cb) = self.on_stack_complete {
                cb();
            }
        } else if !in_window && self.completed {
            self.completed = false;
        }

        outcome
    }

    /// Maximum useful scroll offset for this layout (the caller clamps
    /// scroll input against this).
    pub fn max_scroll(&self) -> f64 {
        self.snapshot.sentinel_top.unwrap_or(0.0)
    }
}

// ───────────────────────────────────────── tests ─────────────
