//! A TUI card-deck viewer with a scroll-driven stacking effect.
//!
//! Run the binary to page through the built-in demo deck, or pass a file
//! of `---`-separated cards.  Scrolling pins each card near the top of
//! the viewport and shrinks it as the next card slides over it.

mod app;
mod config;
mod core;
mod stack;
mod ui;

use std::io::{self, stdout};
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::Rect,
    widgets::Paragraph,
    Terminal,
};

use crate::app::{
    event::{spawn_event_reader, AppEvent},
    handler,
    state::AppState,
};
use crate::config::AppConfig;
use crate::core::deck::Deck;
use crate::stack::engine::PinPhase;
use crate::ui::{deck_widget, layout::AppLayout, page::PageView, theme::Theme};

// ───────────────────────────────────────── CLI ───────────────

#[derive(Parser, Debug)]
#[command(name = env!("CARGO_PKG_NAME"), about = "Scroll-driven card-stack viewer")]
struct Cli {
    /// Deck file: cards separated by `---` lines (defaults to a demo deck).
    deck: Option<PathBuf>,

    /// Vertical gap between cards, virtual pixels.
    #[arg(long)]
    gap: Option<f64>,

    /// Per-index scale delta (deeper cards shrink further).
    #[arg(long)]
    scale_step: Option<f64>,

    /// Per-index pin stagger, virtual pixels.
    #[arg(long)]
    stack_offset: Option<f64>,

    /// Pin-trigger distance, percent of viewport height.
    #[arg(long)]
    trigger_pct: Option<f64>,

    /// Minimum card scale.
    #[arg(long)]
    base_scale: Option<f64>,
}

/// Target frame interval — the event reader ticks at this rate when idle
/// and the pacer drains at most one recompute per loop pass.
const FRAME_INTERVAL: Duration = Duration::from_millis(16);

// ───────────────────────────────────────── helpers ───────────

/// Re-capture layout geometry and run the follow-up recompute synchronously
/// so the stack renders correctly on the very next draw.  Called on mount
/// and after every resize — offsets are never trusted across resizes.
fn remeasure(state: &mut AppState, area: Rect, now: Instant) {
    state.needs_measure = false;
    state.terminal_area = area;
    let layout = AppLayout::from_area(area);
    let stack_config = state.engine.config().clone();
    state.layout =
        deck_widget::measure_deck(state.deck.len(), layout.page_area.height, &stack_config);
    state.engine.measure(state.layout.to_snapshot());
    state.deck_scroll = state.deck_scroll.clamp(0.0, state.engine.max_scroll());

    let outcome = state.engine.recompute(state.deck_scroll);
    if outcome.stack_completed {
        state.note_completion(now);
    }
    state.pacer.note_run(now);
    tracing::debug!(
        "measured: {} cards, viewport {} rows",
        state.deck.len(),
        state.layout.viewport_rows
    );
}

fn handle_event(state: &mut AppState, event: AppEvent) {
    match event {
        AppEvent::Key(k) => handler::handle_key(state, k),
        AppEvent::Mouse(m) => handler::handle_mouse(state, m),
        AppEvent::Resize(_, _) => state.needs_measure = true,
        AppEvent::Tick => {}
    }
}

/// The card to highlight: the topmost one currently held in the pile.
fn active_card(state: &AppState) -> Option<usize> {
    (0..state.engine.card_count()).rev().find(|&i| {
        matches!(
            state.engine.phase(i, state.deck_scroll),
            PinPhase::Pinning | PinPhase::Pinned
        )
    })
}

// ───────────────────────────────────────── main ──────────────

#[tokio::main]
async fn main() -> Result<()> {
    // Initialise tracing (only in debug builds / when RUST_LOG is set).
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr) // never pollute the terminal UI
        .init();

    let cli = Cli::parse();

    // ── configuration: file, then CLI overrides ───────────────
    let mut user_config = AppConfig::load();
    if let Some(gap) = cli.gap {
        user_config.item_gap = gap;
    }
    if let Some(step) = cli.scale_step {
        user_config.item_scale_step = step;
    }
    if let Some(offset) = cli.stack_offset {
        user_config.item_stack_offset = offset;
    }
    if let Some(pct) = cli.trigger_pct {
        user_config.trigger_fraction = pct / 100.0;
    }
    if let Some(scale) = cli.base_scale {
        user_config.base_scale = scale;
    }

    // ── deck ──────────────────────────────────────────────────
    let deck = match cli.deck {
        Some(ref path) => Deck::load(path)?,
        None => Deck::demo(),
    };
    let mut state = AppState::new(deck, user_config);

    // ── terminal setup ────────────────────────────────────────
    enable_raw_mode()?;
    execute!(stdout(), EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout());
    let mut terminal = Terminal::new(backend)?;

    let mut events = spawn_event_reader(FRAME_INTERVAL);

    // ── event loop ────────────────────────────────────────────
    loop {
        let now = Instant::now();

        // Measurement (mount + resize) recomputes synchronously; otherwise
        // the pacer decides whether this frame owes a recompute, always
        // from the latest scroll offset.
        if state.needs_measure {
            let size = terminal.size()?;
            remeasure(&mut state, Rect::new(0, 0, size.width, size.height), now);
        } else if state.pacer.take_due(now) {
            let outcome = state.engine.recompute(state.deck_scroll);
            if outcome.stack_completed {
                state.note_completion(now);
            }
        }
        state.expire_flash(now);

        terminal.draw(|frame| {
            state.terminal_area = frame.area();
            let layout = AppLayout::from_area(frame.area());

            let view = PageView::new(
                &state.deck,
                &state.layout,
                state.engine.transforms(),
                state.deck_scroll,
                state.page_scroll,
            )
            .active_card(active_card(&state));
            frame.render_widget(view, layout.page_area);

            let (text, style) = if state.flash_active(now) {
                (
                    format!(" Stack complete ✓  (#{})", state.completions),
                    Theme::status_flash_style(),
                )
            } else {
                (
                    " wheel/j/k scroll deck • PgUp/PgDn page • g/G top/bottom • q quit"
                        .to_string(),
                    Theme::status_bar_style(),
                )
            };
            frame.render_widget(Paragraph::new(text).style(style), layout.status_area);
        })?;

        tokio::select! {
            Some(event) = events.recv() => {
                handle_event(&mut state, event);
                // Drain whatever else is queued before redrawing — a burst
                // of wheel events collapses into one dirty flag, so the
                // next pacer pass recomputes once from the final offset.
                while let Ok(ev) = events.try_recv() {
                    handle_event(&mut state, ev);
                }
            }
            else => break,
        }

        if state.should_quit {
            break;
        }
    }

    // ── teardown ──────────────────────────────────────────────
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    Ok(())
}
