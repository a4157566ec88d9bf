//! Central application state.
//!
//! All mutable state lives here so that the rest of the app can be pure
//! functions over `&AppState` (rendering) or `&mut AppState` (event
//! handling).

use std::time::Instant;

use ratatui::layout::Rect;

use crate::config::AppConfig;
use crate::core::deck::Deck;
use crate::stack::engine::StackEngine;
use crate::stack::pacer::FramePacer;
use crate::ui::deck_widget::DeckLayout;

/// How long the stack-complete flash stays in the status bar.
pub const FLASH_DURATION_MS: u64 = 2500;

/// Top-level application state.
pub struct AppState {
    /// The cards being presented.
    pub deck: Deck,
    /// Scroll-to-transform engine for the deck viewport.
    pub engine: StackEngine,
    /// Coalesces scroll bursts into one recompute per frame.
    pub pacer: FramePacer,
    /// Inner viewport scroll offset, virtual pixels.
    pub deck_scroll: f64,
    /// Outer page scroll offset, rows.
    pub page_scroll: u16,
    /// Last measured deck geometry.  Stale whenever `needs_measure` is set.
    pub layout: DeckLayout,
    /// Set on mount and on every resize; the main loop re-measures (and
    /// recomputes synchronously) before the next draw.
    pub needs_measure: bool,
    /// Terminal area from the last draw, for mouse hit-testing.
    pub terminal_area: Rect,
    /// Controls the main event loop.
    pub should_quit: bool,
    /// Status-bar flash raised when the stack completes.
    pub flash_until: Option<Instant>,
    /// How many times the stack has completed this session.
    pub completions: u32,
    /// User configuration (stack tuning, wheel step).
    pub config: AppConfig,
}

impl AppState {
    pub fn new(deck: Deck, config: AppConfig) -> Self {
        let engine = StackEngine::new(config.stack_config());
        Self {
            deck,
            engine,
            pacer: FramePacer::default(),
            deck_scroll: 0.0,
            page_scroll: 0,
            layout: DeckLayout::default(),
            needs_measure: true,
            terminal_area: Rect::default(),
            should_quit: false,
            flash_until: None,
            completions: 0,
            config,
        }
    }

    /// Record a completion and raise the status flash.
    pub fn note_completion(&mut self, now: Instant) {
        self.completions += 1;
        self.flash_until =
            Some(now + std::time::Duration::from_millis(FLASH_DURATION_MS));
        tracing::debug!("stack complete (#{}) ", self.completions);
    }

    /// Drop the flash once its window has passed.
    pub fn expire_flash(&mut self, now: Instant) {
        if matches!(self.flash_until, Some(until) if now >= until) {
            self.flash_until = None;
        }
    }

    /// Whether the completion flash is currently showing.
    pub fn flash_active(&self, now: Instant) -> bool {
        matches!(self.flash_until, Some(until) if now < until)
    }
}
