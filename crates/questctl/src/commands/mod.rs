//! Command modules for questctl
//!
//! - status: the whole checklist with XP totals
//! - show: one level in detail
//! - toggle: toggle / complete / reset a level
//! - config: show or edit configuration

pub mod config;
pub mod show;
pub mod status;
pub mod toggle;
