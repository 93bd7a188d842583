//! Platform abstraction layer
//!
//! Handles browser/native differences. Fullscreen is delegated entirely to
//! the host; the core only sees availability and current state.

pub mod fullscreen;

pub use fullscreen::FullscreenStatus;
