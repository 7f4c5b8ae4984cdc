//! Display helpers shared by the CLI report and the TUI.
//!
//! Plain strings only; coloring is left to each front end.

use crate::config::EmojiMode;
use crate::progress::{LevelStatus, ProgressView};

pub const APP_TITLE: &str = "RLHF Learning Game";

/// Title line, with the game controller in emoji mode
pub fn app_title(emojis: bool) -> String {
    if emojis {
        format!("🎮 {}", APP_TITLE)
    } else {
        APP_TITLE.to_string()
    }
}

/// Check, fire or lock glyph; ASCII fallbacks keep the same width
pub fn status_glyph(status: LevelStatus, emojis: bool) -> &'static str {
    match (status, emojis) {
        (LevelStatus::Completed, true) => "✅",
        (LevelStatus::Available, true) => "🔥",
        (LevelStatus::Locked, true) => "🔒",
        (LevelStatus::Completed, false) => "[x]",
        (LevelStatus::Available, false) => "[>]",
        (LevelStatus::Locked, false) => "[ ]",
    }
}

pub fn status_label(status: LevelStatus) -> &'static str {
    match status {
        LevelStatus::Completed => "completed",
        LevelStatus::Available => "available",
        LevelStatus::Locked => "locked",
    }
}

/// Label of the toggle control
pub fn toggle_label(is_completed: bool) -> &'static str {
    if is_completed {
        "Reset"
    } else {
        "Complete"
    }
}

/// "XP: earned / total"
pub fn xp_summary(view: &ProgressView) -> String {
    format!("XP: {} / {}", view.earned_xp, view.total_xp)
}

/// Text progress bar, `width` cells between the brackets
pub fn progress_bar(earned: u32, total: u32, width: usize) -> String {
    let filled = if total == 0 {
        0
    } else {
        ((earned.min(total) as u64 * width as u64) / total as u64) as usize
    };
    let empty = width.saturating_sub(filled);
    format!("[{}{}]", "=".repeat(filled), "-".repeat(empty))
}

/// Decide whether to print emojis.
/// `Auto` trusts a UTF-8 locale on anything but a dumb terminal.
pub fn resolve_emojis(mode: EmojiMode) -> bool {
    match mode {
        EmojiMode::Enabled => true,
        EmojiMode::Disabled => false,
        EmojiMode::Auto => {
            let term_ok = std::env::var("TERM").map(|t| t != "dumb").unwrap_or(false);
            let utf8 = ["LC_ALL", "LC_CTYPE", "LANG"]
                .iter()
                .filter_map(|var| std::env::var(var).ok())
                .find(|v| !v.is_empty())
                .map(|v| {
                    let v = v.to_lowercase();
                    v.contains("utf-8") || v.contains("utf8")
                })
                .unwrap_or(false);
            term_ok && utf8
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curriculum::Curriculum;
    use crate::progress::{compute_view, UnlockPolicy};
    use std::collections::HashSet;

    #[test]
    fn test_glyphs() {
        assert_eq!(status_glyph(LevelStatus::Completed, true), "✅");
        assert_eq!(status_glyph(LevelStatus::Available, true), "🔥");
        assert_eq!(status_glyph(LevelStatus::Locked, true), "🔒");
        assert_eq!(status_glyph(LevelStatus::Locked, false), "[ ]");
        assert!(status_glyph(LevelStatus::Completed, false).is_ascii());
    }

    #[test]
    fn test_toggle_label() {
        assert_eq!(toggle_label(true), "Reset");
        assert_eq!(toggle_label(false), "Complete");
    }

    #[test]
    fn test_xp_summary() {
        let completed: HashSet<String> = ["lvl1".to_string()].into_iter().collect();
        let view = compute_view(&Curriculum::builtin(), &completed, UnlockPolicy::Strict);
        assert_eq!(xp_summary(&view), "XP: 100 / 1000");
    }

    #[test]
    fn test_progress_bar() {
        assert_eq!(progress_bar(0, 1000, 10), "[----------]");
        assert_eq!(progress_bar(250, 1000, 10), "[==--------]");
        assert_eq!(progress_bar(1000, 1000, 10), "[==========]");
        assert_eq!(progress_bar(0, 0, 4), "[----]");
    }

    #[test]
    fn test_explicit_emoji_modes() {
        assert!(resolve_emojis(EmojiMode::Enabled));
        assert!(!resolve_emojis(EmojiMode::Disabled));
        assert_eq!(app_title(false), "RLHF Learning Game");
        assert!(app_title(true).starts_with("🎮"));
    }
}
