//! UI / rendering layer — everything that touches Ratatui widgets.
//!
//! This layer takes the engine's computed transforms and turns them into
//! glyphs on the terminal.  No engine math happens here beyond mapping
//! virtual pixels to rows.

pub mod deck_widget;
pub mod layout;
pub mod page;
pub mod theme;

/// How many virtual pixels one terminal row is worth.  Chosen so the
/// engine's pixel-denominated defaults land on sensible row counts
/// (a 40-row viewport is 640 virtual pixels tall).
pub const PX_PER_ROW: f64 = 16.0;
