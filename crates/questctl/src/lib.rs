//! questctl library - exposes modules for the binary and integration tests

pub mod cli;
pub mod commands;
pub mod logging;
pub mod output;
pub mod session;
pub mod tui;
