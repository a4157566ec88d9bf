//! Deck viewport rendering — cards drawn at their engine-computed
//! transforms — plus the layout measurement the engine consumes.
//!
//! The widget is dumb on purpose: it never decides where a card goes, it
//! only maps `(translate_y, scale)` pairs into rows and columns.  Scale
//! shrinks both the card's box and its width, origin at the top edge,
//! horizontally centred (matching a transform-origin of "top center").

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Widget},
};

use crate::core::deck::Deck;
use crate::stack::config::StackConfig;
use crate::stack::engine::{CardTransform, LayoutSnapshot};
use crate::ui::theme::Theme;
use crate::ui::PX_PER_ROW;

// ───────────────────────────────────────── measurement ───────

/// Card height as a fraction of the viewport, so a resize genuinely moves
/// every offset and the remeasure path earns its keep.
const CARD_HEIGHT_FRACTION: f64 = 0.45;
/// Top padding before the first card, fraction of the viewport.  Larger
/// than the default trigger distance so the first card starts at rest.
const TOP_PADDING_FRACTION: f64 = 0.25;
const MIN_CARD_ROWS: f64 = 3.0;

/// Static geometry of the deck's scrollable document, in virtual pixels.
/// Captured from the live terminal size; stale after any resize.
#[derive(Debug, Clone, Default)]
pub struct DeckLayout {
    pub viewport_rows: u16,
    pub viewport_px: f64,
    pub card_height_px: f64,
    pub card_tops: Vec<f64>,
    /// Zero-height end marker after the last card.
    pub sentinel_top: f64,
    pub content_height_px: f64,
}

impl DeckLayout {
    /// The measurement slice the engine consumes.
    pub fn to_snapshot(&self) -> LayoutSnapshot {
        LayoutSnapshot {
            card_tops: self.card_tops.clone(),
            sentinel_top: Some(self.sentinel_top),
            viewport_height: self.viewport_px,
        }
    }
}

/// Measure the deck document for a viewport of `viewport_rows` rows.
pub fn measure_deck(card_count: usize, viewport_rows: u16, config: &StackConfig) -> DeckLayout {
    let viewport_px = f64::from(viewport_rows) * PX_PER_ROW;
    let card_height_px = (viewport_px * CARD_HEIGHT_FRACTION).max(MIN_CARD_ROWS * PX_PER_ROW);
    let padding_top = viewport_px * TOP_PADDING_FRACTION;

    let mut card_tops = Vec::with_capacity(card_count);
    for i in 0..card_count {
        card_tops.push(padding_top + i as f64 * (card_height_px + config.item_gap));
    }

    // The sentinel sits one gap below the last card; scrolling is allowed
    // a full viewport past it so the release point is always reachable.
    let sentinel_top = card_tops
        .last()
        .map(|&top| top + card_height_px + config.item_gap)
        .unwrap_or(padding_top);
    let content_height_px = sentinel_top + viewport_px;

    DeckLayout {
        viewport_rows,
        viewport_px,
        card_height_px,
        card_tops,
        sentinel_top,
        content_height_px,
    }
}

// ───────────────────────────────────────── widget ────────────

/// Renders the deck at a given scroll offset — created fresh each frame.
pub struct DeckWidget<'a> {
    deck: &'a Deck,
    layout: &'a DeckLayout,
    transforms: &'a [CardTransform],
    scroll_top: f64,
    /// Rows of the viewport hidden above the given area (the page has
    /// scrolled the deck partially off-screen).
    clip_top_rows: u16,
    /// Card whose border gets the active highlight (topmost pinned card).
    active: Option<usize>,
}

impl<'a> DeckWidget<'a> {
    pub fn new(
        deck: &'a Deck,
        layout: &'a DeckLayout,
        transforms: &'a [CardTransform],
        scroll_top: f64,
    ) -> Self {
        Self {
            deck,
            layout,
            transforms,
            scroll_top,
            clip_top_rows: 0,
            active: None,
        }
    }

    pub fn clip_top(mut self, rows: u16) -> Self {
        self.clip_top_rows = rows;
        self
    }

    pub fn active_card(mut self, active: Option<usize>) -> Self {
        self.active = active;
        self
    }
}

impl<'a> Widget for DeckWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < 8 || area.height == 0 {
            return;
        }

        // Ascending order: later cards paint over earlier ones, so the
        // card sliding in covers the one shrinking beneath it.
        for (i, card) in self.deck.cards.iter().enumerate() {
            let Some(&top) = self.layout.card_tops.get(i) else {
                continue;
            };
            let t = self
                .transforms
                .get(i)
                .copied()
                .unwrap_or(CardTransform::IDENTITY);

            let y_px = top - self.scroll_top + t.translate_y;
            let card_rows = ((self.layout.card_height_px * t.scale) / PX_PER_ROW)
                .round()
                .max(MIN_CARD_ROWS) as i32;
            let y_row =
                (y_px / PX_PER_ROW).round() as i32 - i32::from(self.clip_top_rows);

            let full_width = f64::from(area.width.saturating_sub(4));
            let width = ((full_width * t.scale).round() as u16)
                .clamp(6, area.width.saturating_sub(2));
            let x = area.x + (area.width - width) / 2;

            // Vertical clip against the viewport area.
            let screen_top = i32::from(area.y) + y_row;
            let visible_top = screen_top.max(i32::from(area.y));
            let visible_bottom =
                (screen_top + card_rows).min(i32::from(area.y) + i32::from(area.height));
            if visible_bottom <= visible_top {
                continue;
            }
            let rect = Rect::new(
                x,
                visible_top as u16,
                width,
                (visible_bottom - visible_top) as u16,
            );

            // Cards overlap while stacking — wipe the box before drawing.
            Clear.render(rect, buf);

            let border_style = if self.active == Some(i) {
                Theme::card_border_active_style()
            } else {
                Theme::card_border_style()
            };
            let block = Block::default()
                .borders(Borders::ALL)
                .border_style(border_style)
                .title(Span::styled(
                    format!(" {} ", card.title),
                    Theme::card_title_style(),
                ));
            let inner = block.inner(rect);
            block.render(rect, buf);

            // Body lines, offset by however much of the card is clipped
            // above the viewport.  Row 0 of the unclipped card is its
            // border, so line j lives at unclipped row j + 1.
            for k in 0..inner.height {
                let unclipped_row = i32::from(inner.y + k) - screen_top;
                let line_idx = unclipped_row - 1;
                if line_idx < 0 {
                    continue;
                }
                let Some(text) = card.body.get(line_idx as usize) else {
                    continue;
                };
                let line = Line::from(Span::styled(text.as_str(), Theme::card_body_style()));
                buf.set_line(inner.x + 1, inner.y + k, &line, inner.width.saturating_sub(1));
            }
        }
    }
}

// ───────────────────────────────────────── tests ─────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stack::engine::StackEngine;

    #[test]
    fn measure_spaces_cards_by_height_plus_gap() {
        let config = StackConfig::default();
        let layout = measure_deck(3, 40, &config);
        assert_eq!(layout.viewport_px, 640.0);
        assert_eq!(layout.card_tops.len(), 3);
        let step = layout.card_height_px + config.item_gap;
        for pair in layout.card_tops.windows(2) {
            assert!((pair[1] - pair[0] - step).abs() < 1e-9);
        }
        assert!(layout.sentinel_top > *layout.card_tops.last().unwrap());
        assert_eq!(layout.content_height_px, layout.sentinel_top + 640.0);
    }

    #[test]
    fn first_card_is_at_rest_at_scroll_zero() {
        let config = StackConfig::default();
        let layout = measure_deck(4, 40, &config);
        let mut engine = StackEngine::new(config);
        engine.measure(layout.to_snapshot());
        assert!(engine.pin_start(0) > 0.0);
        engine.recompute(0.0);
        for t in engine.transforms() {
            assert_eq!(*t, CardTransform::IDENTITY);
        }
    }

    #[test]
    fn release_point_is_reachable() {
        let config = StackConfig::default();
        let layout = measure_deck(5, 40, &config);
        let mut engine = StackEngine::new(config);
        engine.measure(layout.to_snapshot());
        assert!(engine.max_scroll() > engine.pin_end());
        assert!(engine.pin_end() > engine.pin_start(4));
    }

    #[test]
    fn empty_deck_measures_to_no_cards() {
        let layout = measure_deck(0, 40, &StackConfig::default());
        assert!(layout.card_tops.is_empty());
        assert!(layout.sentinel_top > 0.0);
    }

    #[test]
    fn resize_moves_every_offset() {
        let config = StackConfig::default();
        let tall = measure_deck(3, 50, &config);
        let short = measure_deck(3, 25, &config);
        for (a, b) in tall.card_tops.iter().zip(&short.card_tops) {
            assert_ne!(a, b);
        }
        assert_ne!(tall.sentinel_top, short.sentinel_top);
    }
}
