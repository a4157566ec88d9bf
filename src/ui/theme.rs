//! Colour palette and text styles used across the UI.

use ratatui::style::{Color, Modifier, Style};

/// Central theme — change colours here and they propagate everywhere.
pub struct Theme;

impl Theme {
    // ── cards ──────────────────────────────────────────────────
    pub fn card_border_style() -> Style {
        Style::default().fg(Color::Gray)
    }

    /// Border of the card currently pinned at the top of the pile.
    pub fn card_border_active_style() -> Style {
        Style::default().fg(Color::Cyan)
    }

    pub fn card_title_style() -> Style {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    }

    pub fn card_body_style() -> Style {
        Style::default().fg(Color::White)
    }

    // ── page chrome ────────────────────────────────────────────
    pub fn page_heading_style() -> Style {
        Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD)
    }

    pub fn page_text_style() -> Style {
        Style::default().fg(Color::DarkGray)
    }

    pub fn status_bar_style() -> Style {
        Style::default().bg(Color::DarkGray).fg(Color::White)
    }

    /// Status bar while the stack-complete flash is showing.
    pub fn status_flash_style() -> Style {
        Style::default()
            .bg(Color::Green)
            .fg(Color::Black)
            .add_modifier(Modifier::BOLD)
    }
}
