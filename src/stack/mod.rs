//! The scroll-stack engine — everything needed to turn a one-dimensional
//! scroll offset into a per-card transform with pin/release phases.
//!
//! This layer is pure and host-agnostic: it knows nothing about terminals,
//! events, or rendering.  The `app` layer feeds it measurements and scroll
//! offsets; the `ui` layer draws whatever transforms it computed.

pub mod config;
pub mod engine;
pub mod pacer;
