//! TUI Module
//!
//! - event_loop: terminal setup, key polling, redraw
//! - render: drawing functions
//! - state: cursor, notices and key handling

mod event_loop;
mod render;
mod state;

pub use event_loop::run;
