//! Core data structures — deck content and loading.
//!
//! No rendering and no engine math here; cards are passive containers
//! (identity + display content) that the stack layer positions.

pub mod deck;
