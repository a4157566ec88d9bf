//! Input handling — maps key/mouse events to state mutations.
//!
//! Scroll input never runs the engine directly: it updates the offset and
//! marks the pacer dirty, and the main loop recomputes once per frame from
//! whatever the offset is by then.  A burst of wheel events therefore
//! costs one recompute, computed from the final position.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent, MouseEventKind};

use crate::ui::{layout::AppLayout, page, PX_PER_ROW};

use super::state::AppState;

/// Rows moved per PgUp/PgDn press.
const PAGE_KEY_ROWS: i32 = 5;

/// Process a key event.
pub fn handle_key(state: &mut AppState, key: KeyEvent) {
    // Ctrl+c always quits.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        state.should_quit = true;
        return;
    }

    let wheel = state.config.wheel_step_px;
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => state.should_quit = true,
        // j/k mirror the wheel over the deck, edge passthrough included.
        KeyCode::Down | KeyCode::Char('j') => scroll_deck(state, wheel),
        KeyCode::Up | KeyCode::Char('k') => scroll_deck(state, -wheel),
        KeyCode::PageDown => scroll_page(state, PAGE_KEY_ROWS),
        KeyCode::PageUp => scroll_page(state, -PAGE_KEY_ROWS),
        KeyCode::Home | KeyCode::Char('g') => {
            state.deck_scroll = 0.0;
            state.pacer.mark_dirty();
        }
        KeyCode::End | KeyCode::Char('G') => {
            state.deck_scroll = state.engine.max_scroll();
            state.pacer.mark_dirty();
        }
        _ => {}
    }
}

/// Process a mouse event.  Wheel input routes by position: over the deck
/// viewport it scrolls the deck (unless the deck is at an extreme, in
/// which case it falls through to the page); anywhere else it scrolls the
/// page.
pub fn handle_mouse(state: &mut AppState, mouse: MouseEvent) {
    let delta = match mouse.kind {
        MouseEventKind::ScrollDown => state.config.wheel_step_px,
        MouseEventKind::ScrollUp => -state.config.wheel_step_px,
        _ => return,
    };

    let layout = AppLayout::from_area(state.terminal_area);
    let over_deck = page::deck_rect(layout.page_area, state.page_scroll)
        .is_some_and(|(rect, _)| point_in_rect(rect, mouse.column, mouse.row));

    if over_deck {
        scroll_deck(state, delta);
    } else {
        scroll_page(state, px_to_rows(delta));
    }
}

/// Scroll the inner deck viewport by `delta_px`.
///
/// At the extremes the delta is forwarded to the enclosing page instead of
/// being consumed — nested scroll regions must compose with the outer
/// page, so reaching the deck's bottom and scrolling further moves the
/// page, exactly like a nested scroller in a browser.
pub fn scroll_deck(state: &mut AppState, delta_px: f64) {
    let max = state.engine.max_scroll();
    let at_top = state.deck_scroll <= 0.0;
    let at_bottom = state.deck_scroll >= max;

    if (delta_px < 0.0 && at_top) || (delta_px > 0.0 && at_bottom) {
        scroll_page(state, px_to_rows(delta_px));
        return;
    }

    state.deck_scroll = (state.deck_scroll + delta_px).clamp(0.0, max);
    state.pacer.mark_dirty();
}

/// Scroll the outer page by whole rows.
pub fn scroll_page(state: &mut AppState, delta_rows: i32) {
    let max = i32::from(page::max_page_scroll());
    let next = (i32::from(state.page_scroll) + delta_rows).clamp(0, max);
    state.page_scroll = next as u16;
}

fn px_to_rows(delta_px: f64) -> i32 {
    let rows = (delta_px.abs() / PX_PER_ROW).round().max(1.0) as i32;
    if delta_px < 0.0 {
        -rows
    } else {
        rows
    }
}

fn point_in_rect(rect: ratatui::layout::Rect, col: u16, row: u16) -> bool {
    col >= rect.x
        && col < rect.x + rect.width
        && row >= rect.y
        && row < rect.y + rect.height
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::core::deck::Deck;
    use crate::ui::deck_widget::measure_deck;
    use crossterm::event::{KeyEventKind, KeyEventState};
    use ratatui::layout::Rect;

    fn test_state() -> AppState {
        let mut state = AppState::new(Deck::demo(), AppConfig::default());
        state.terminal_area = Rect::new(0, 0, 80, 41);
        let layout = AppLayout::from_area(state.terminal_area);
        state.layout = measure_deck(
            state.deck.len(),
            layout.page_area.height,
            state.engine.config(),
        );
        state.engine.measure(state.layout.to_snapshot());
        state.needs_measure = false;
        state
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    #[test]
    fn quit_keys() {
        let mut state = test_state();
        handle_key(&mut state, key(KeyCode::Char('q')));
        assert!(state.should_quit);
    }

    #[test]
    fn deck_scroll_marks_pacer_dirty() {
        let mut state = test_state();
        assert!(!state.pacer.is_dirty());
        scroll_deck(&mut state, 48.0);
        assert_eq!(state.deck_scroll, 48.0);
        assert!(state.pacer.is_dirty());
        assert_eq!(state.page_scroll, 0);
    }

    #[test]
    fn wheel_up_at_deck_top_falls_through_to_page() {
        let mut state = test_state();
        state.page_scroll = 4;
        scroll_deck(&mut state, -48.0);
        // Deck stayed put, page moved up instead.
        assert_eq!(state.deck_scroll, 0.0);
        assert_eq!(state.page_scroll, 1);
        assert!(!state.pacer.is_dirty());
    }

    #[test]
    fn wheel_down_at_deck_bottom_falls_through_to_page() {
        let mut state = test_state();
        state.deck_scroll = state.engine.max_scroll();
        scroll_deck(&mut state, 48.0);
        assert_eq!(state.deck_scroll, state.engine.max_scroll());
        assert_eq!(state.page_scroll, 3);
    }

    #[test]
    fn deck_scroll_clamps_at_extremes() {
        let mut state = test_state();
        state.deck_scroll = state.engine.max_scroll() - 10.0;
        scroll_deck(&mut state, 1_000.0);
        assert_eq!(state.deck_scroll, state.engine.max_scroll());
    }

    #[test]
    fn page_scroll_clamps() {
        let mut state = test_state();
        scroll_page(&mut state, -5);
        assert_eq!(state.page_scroll, 0);
        scroll_page(&mut state, 1_000);
        assert_eq!(state.page_scroll, page::max_page_scroll());
    }

    #[test]
    fn end_key_jumps_to_release() {
        let mut state = test_state();
        handle_key(&mut state, key(KeyCode::End));
        assert_eq!(state.deck_scroll, state.engine.max_scroll());
        assert!(state.pacer.is_dirty());
    }
}
