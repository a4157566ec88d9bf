//! The outer page the deck viewport nests in.
//!
//! A virtual column of three sections — intro panel, deck viewport, outro
//! panel — scrolled by a row offset.  The deck viewport is exactly one
//! screen tall, so its engine viewport height never depends on how far the
//! page has scrolled.  This nesting is what makes the wheel-passthrough
//! policy observable: wheel input over the deck only reaches the page when
//! the deck is at a scroll extreme.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::Widget,
};

use crate::core::deck::Deck;
use crate::stack::engine::CardTransform;
use crate::ui::deck_widget::{DeckLayout, DeckWidget};
use crate::ui::theme::Theme;

/// Rows of intro content above the deck viewport.
pub const INTRO_ROWS: u16 = 8;
/// Rows of outro content below it.
pub const OUTRO_ROWS: u16 = 6;

/// Furthest the page can scroll: intro fully off-screen plus outro fully on.
pub fn max_page_scroll() -> u16 {
    INTRO_ROWS + OUTRO_ROWS
}

/// Where the deck viewport lands on screen for a given page offset.
/// Returns the visible rect plus how many viewport rows are hidden above
/// it, or `None` when it is scrolled entirely off-screen.
pub fn deck_rect(page_area: Rect, page_scroll: u16) -> Option<(Rect, u16)> {
    let deck_top = i32::from(INTRO_ROWS) - i32::from(page_scroll);
    let clip_top = (-deck_top).max(0) as u16;
    let screen_top = deck_top.max(0) as u16;
    if screen_top >= page_area.height {
        return None;
    }
    let visible = page_area
        .height
        .saturating_sub(clip_top)
        .min(page_area.height - screen_top);
    if visible == 0 {
        return None;
    }
    Some((
        Rect::new(
            page_area.x,
            page_area.y + screen_top,
            page_area.width,
            visible,
        ),
        clip_top,
    ))
}

/// Renders the whole page — created fresh each frame.
pub struct PageView<'a> {
    deck: &'a Deck,
    layout: &'a DeckLayout,
    transforms: &'a [CardTransform],
    deck_scroll: f64,
    page_scroll: u16,
    active: Option<usize>,
}

impl<'a> PageView<'a> {
    pub fn new(
        deck: &'a Deck,
        layout: &'a DeckLayout,
        transforms: &'a [CardTransform],
        deck_scroll: f64,
        page_scroll: u16,
    ) -> Self {
        Self {
            deck,
            layout,
            transforms,
            deck_scroll,
            page_scroll,
            active: None,
        }
    }

    pub fn active_card(mut self, active: Option<usize>) -> Self {
        self.active = active;
        self
    }

    fn intro_lines(&self) -> Vec<Line<'static>> {
        let source = match self.deck.source {
            Some(ref path) => format!("deck: {}", path.display()),
            None => "deck: built-in demo".to_string(),
        };
        vec![
            Line::default(),
            Line::from(Span::styled("  card-stack", Theme::page_heading_style())),
            Line::from(Span::styled(
                format!("  {source} — {} cards", self.deck.len()),
                Theme::page_text_style(),
            )),
            Line::default(),
            Line::from(Span::styled(
                "  Wheel or j/k scrolls the deck below.  At the deck's edges the",
                Theme::page_text_style(),
            )),
            Line::from(Span::styled(
                "  wheel falls through to this page, like any nested scroller.",
                Theme::page_text_style(),
            )),
            Line::from(Span::styled(
                "  PgUp/PgDn scroll the page directly.  q quits.",
                Theme::page_text_style(),
            )),
            Line::default(),
        ]
    }

    fn outro_lines(&self) -> Vec<Line<'static>> {
        vec![
            Line::default(),
            Line::from(Span::styled(
                "  That's the whole deck.",
                Theme::page_heading_style(),
            )),
            Line::from(Span::styled(
                "  Scroll the deck back up to run the stack again.",
                Theme::page_text_style(),
            )),
            Line::default(),
            Line::default(),
            Line::default(),
        ]
    }
}

impl<'a> Widget for PageView<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 {
            return;
        }

        // Intro: virtual rows [0, INTRO_ROWS).
        for (i, line) in self.intro_lines().iter().enumerate().take(INTRO_ROWS as usize) {
            let virt = i as i32 - i32::from(self.page_scroll);
            if virt < 0 || virt >= i32::from(area.height) {
                continue;
            }
            buf.set_line(area.x, area.y + virt as u16, line, area.width);
        }

        // Deck viewport: virtual rows [INTRO_ROWS, INTRO_ROWS + height).
        if let Some((rect, clip_top)) = deck_rect(area, self.page_scroll) {
            DeckWidget::new(self.deck, self.layout, self.transforms, self.deck_scroll)
                .clip_top(clip_top)
                .active_card(self.active)
                .render(rect, buf);
        }

        // Outro: virtual rows [INTRO_ROWS + height, ...).
        let outro_base = i32::from(INTRO_ROWS) + i32::from(area.height);
        for (i, line) in self.outro_lines().iter().enumerate().take(OUTRO_ROWS as usize) {
            let virt = outro_base + i as i32 - i32::from(self.page_scroll);
            if virt < 0 || virt >= i32::from(area.height) {
                continue;
            }
            buf.set_line(area.x, area.y + virt as u16, line, area.width);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deck_fills_screen_when_intro_scrolled_away() {
        let area = Rect::new(0, 0, 80, 40);
        let (rect, clip) = deck_rect(area, INTRO_ROWS).unwrap();
        assert_eq!(clip, 0);
        assert_eq!(rect, area);
    }

    #[test]
    fn deck_starts_below_intro_at_page_top() {
        let area = Rect::new(0, 1, 80, 40);
        let (rect, clip) = deck_rect(area, 0).unwrap();
        assert_eq!(clip, 0);
        assert_eq!(rect.y, 1 + INTRO_ROWS);
        assert_eq!(rect.height, 40 - INTRO_ROWS);
    }

    #[test]
    fn deck_clips_when_page_scrolls_past_it() {
        let area = Rect::new(0, 0, 80, 40);
        let (rect, clip) = deck_rect(area, INTRO_ROWS + 3).unwrap();
        assert_eq!(clip, 3);
        assert_eq!(rect.y, 0);
        assert_eq!(rect.height, 40 - 3);
    }
}
