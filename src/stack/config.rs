//! Stack tuning parameters.
//!
//! All distances are in virtual pixels (the engine's unit; the UI decides
//! how many pixels one terminal row is worth).  Offsets that scale with the
//! viewport are expressed as [`Offset::ViewportFraction`] so a resize
//! changes them automatically on the next measure.

/// A vertical distance — either absolute or relative to viewport height.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Offset {
    /// Absolute distance in virtual pixels.
    Px(f64),
    /// Fraction of the viewport height (0.2 = 20%).
    ViewportFraction(f64),
}

impl Offset {
    /// Resolve to pixels for a concrete viewport height.
    pub fn resolve(self, viewport_height: f64) -> f64 {
        match self {
            Offset::Px(px) => px,
            Offset::ViewportFraction(f) => f * viewport_height,
        }
    }
}

/// Immutable stack configuration, supplied once per engine lifetime.
#[derive(Debug, Clone, PartialEq)]
pub struct StackConfig {
    /// Vertical space after each non-last card.
    pub item_gap: f64,
    /// Incremental scale delta per stack index — deeper cards shrink further.
    pub item_scale_step: f64,
    /// Per-index vertical stagger applied to the pin trigger point.
    pub item_stack_offset: f64,
    /// Scroll distance before a card begins pinning.
    pub trigger_offset: Offset,
    /// Scroll distance at which a card's scale is fully resolved.
    pub scale_complete_offset: Offset,
    /// The minimum (most-shrunk) scale a card can reach.
    pub base_scale: f64,
}

impl Default for StackConfig {
    fn default() -> Self {
        Self {
            item_gap: 100.0,
            item_scale_step: 0.03,
            item_stack_offset: 30.0,
            trigger_offset: Offset::ViewportFraction(0.20),
            scale_complete_offset: Offset::ViewportFraction(0.10),
            base_scale: 0.85,
        }
    }
}

impl StackConfig {
    /// Clamp the scale parameters into sane ranges.  A degenerate config
    /// degrades to identity behaviour rather than producing garbage — this
    /// is a cosmetic effect, a glitch beats a crash.
    pub fn sanitized(mut self) -> Self {
        self.base_scale = self.base_scale.clamp(0.05, 1.0);
        self.item_scale_step = self.item_scale_step.clamp(0.0, 1.0);
        self.item_gap = self.item_gap.max(0.0);
        self.item_stack_offset = self.item_stack_offset.max(0.0);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_resolution() {
        assert_eq!(Offset::Px(42.0).resolve(800.0), 42.0);
        assert_eq!(Offset::ViewportFraction(0.20).resolve(800.0), 160.0);
        assert_eq!(Offset::ViewportFraction(0.10).resolve(800.0), 80.0);
    }

    #[test]
    fn defaults_match_documented_values() {
        let c = StackConfig::default();
        assert_eq!(c.item_gap, 100.0);
        assert_eq!(c.item_scale_step, 0.03);
        assert_eq!(c.item_stack_offset, 30.0);
        assert_eq!(c.base_scale, 0.85);
        assert_eq!(c.trigger_offset, Offset::ViewportFraction(0.20));
        assert_eq!(c.scale_complete_offset, Offset::ViewportFraction(0.10));
    }

    #[test]
    fn sanitize_clamps_degenerate_values() {
        let c = StackConfig {
            base_scale: -3.0,
            item_scale_step: 9.0,
            item_gap: -10.0,
            item_stack_offset: -1.0,
            ..StackConfig::default()
        }
        .sanitized();
        assert_eq!(c.base_scale, 0.05);
        assert_eq!(c.item_scale_step, 1.0);
        assert_eq!(c.item_gap, 0.0);
        assert_eq!(c.item_stack_offset, 0.0);
    }
}
