//! Text rendering for the non-interactive commands
//!
//! Every function returns a `String` so callers decide where it goes and
//! tests can inspect it.

use owo_colors::OwoColorize;
use quest_common::config::{ColorMode, OutputConfig};
use quest_common::display::{
    app_title, progress_bar, resolve_emojis, status_glyph, status_label, toggle_label, xp_summary,
};
use quest_common::{LevelStatus, LevelView, ProgressView};

const THIN_SEP: &str = "------------------------------------------------------------";
const BAR_WIDTH: usize = 40;

/// Resolved output capabilities
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputStyle {
    pub emojis: bool,
    pub color: bool,
}

impl OutputStyle {
    pub fn from_config(output: &OutputConfig) -> Self {
        let color = match output.color {
            ColorMode::Auto => console::colors_enabled(),
            ColorMode::Basic => true,
            ColorMode::None => false,
        };
        Self {
            emojis: resolve_emojis(output.emojis),
            color,
        }
    }

    /// No emojis, no escape codes
    pub fn plain() -> Self {
        Self { emojis: false, color: false }
    }

    pub fn bold(&self, s: &str) -> String {
        if self.color { s.bold().to_string() } else { s.to_string() }
    }

    pub fn dim(&self, s: &str) -> String {
        if self.color { s.dimmed().to_string() } else { s.to_string() }
    }

    pub fn green(&self, s: &str) -> String {
        if self.color { s.green().to_string() } else { s.to_string() }
    }

    pub fn cyan(&self, s: &str) -> String {
        if self.color { s.cyan().to_string() } else { s.to_string() }
    }

    pub fn yellow(&self, s: &str) -> String {
        if self.color { s.yellow().to_string() } else { s.to_string() }
    }

    fn example_prefix(&self) -> &'static str {
        if self.emojis { "📌 Example:" } else { "Example:" }
    }

    fn link_bullet(&self) -> &'static str {
        if self.emojis { "🔗" } else { "-" }
    }
}

/// Title, XP line, progress bar
pub fn render_header(view: &ProgressView, style: &OutputStyle) -> String {
    let mut out = String::new();
    out.push_str(&format!("  {}\n", style.bold(&app_title(style.emojis))));
    out.push_str(THIN_SEP);
    out.push('\n');
    out.push_str(&format!("  {}\n", xp_summary(view)));
    out.push_str(&format!(
        "  {} {}%\n",
        style.green(&progress_bar(view.earned_xp, view.total_xp, BAR_WIDTH)),
        view.percent()
    ));
    out
}

/// One level block. `previous` is the key of the level before it, used to
/// explain why a level is locked.
pub fn render_level(level: &LevelView, previous: Option<&str>, style: &OutputStyle) -> String {
    let mut out = String::new();
    let glyph = status_glyph(level.status, style.emojis);
    let title = match level.status {
        LevelStatus::Completed => style.green(level.level.title),
        LevelStatus::Available => style.bold(level.level.title),
        LevelStatus::Locked => style.dim(level.level.title),
    };

    out.push_str(&format!(
        "{} {}  {}\n",
        glyph,
        title,
        style.dim(&format!("({}, {} XP, {})", level.key(), level.level.xp, status_label(level.status)))
    ));
    out.push_str(&format!("    {}\n", level.level.description));

    if !level.level.example.is_empty() {
        out.push_str(&format!("    {} {}\n", style.example_prefix(), level.level.example));
    }

    for res in level.level.resources {
        out.push_str(&format!(
            "    {} {}  {}\n",
            style.link_bullet(),
            res.label,
            style.cyan(res.url)
        ));
    }

    if level.is_unlocked {
        out.push_str(&format!(
            "    [{}]  questctl toggle {}\n",
            style.bold(toggle_label(level.is_completed)),
            level.key()
        ));
    } else {
        let hint = match previous {
            Some(prev) => format!("locked: complete {} first", prev),
            None => "locked".to_string(),
        };
        out.push_str(&format!("    {}\n", style.dim(&hint)));
    }

    out
}

/// Full checklist report
pub fn render_report(view: &ProgressView, style: &OutputStyle) -> String {
    let mut out = String::from("\n");
    out.push_str(&render_header(view, style));
    out.push('\n');

    for (i, level) in view.levels.iter().enumerate() {
        let previous = i.checked_sub(1).map(|p| view.levels[p].key());
        out.push_str(&render_level(level, previous, style));
        out.push('\n');
    }

    out.push_str(THIN_SEP);
    out.push('\n');
    match view.next_level() {
        Some(next) => out.push_str(&format!(
            "  Next up: {} ({})\n",
            next.level.title,
            next.key()
        )),
        None if view.is_finished() => out.push_str("  All levels completed.\n"),
        None => out.push_str("  No level is currently available.\n"),
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use quest_common::{Curriculum, MemoryStorage, ProgressController, UnlockPolicy, COMPLETED_KEY};

    fn view_with(raw: &str) -> ProgressView {
        let storage = MemoryStorage::with_entry(COMPLETED_KEY, raw);
        ProgressController::initialize(Curriculum::builtin(), storage, UnlockPolicy::Strict).view()
    }

    #[test]
    fn test_report_fresh() {
        let report = render_report(&view_with("[]"), &OutputStyle::plain());
        assert!(report.contains("RLHF Learning Game"));
        assert!(report.contains("XP: 0 / 1000"));
        assert!(report.contains("[>] Foundations of Reinforcement"));
        assert!(report.contains("[ ] Deep RL: DQNs"));
        assert!(report.contains("[Complete]  questctl toggle lvl1"));
        assert!(report.contains("locked: complete lvl1 first"));
        assert!(report.contains("Next up: Foundations of Reinforcement (lvl1)"));
        assert!(!report.contains('\u{1b}'));
    }

    #[test]
    fn test_report_completed_level_offers_reset() {
        let report = render_report(&view_with(r#"["lvl1"]"#), &OutputStyle::plain());
        assert!(report.contains("[x] Foundations of Reinforcement"));
        assert!(report.contains("[Reset]  questctl toggle lvl1"));
        assert!(report.contains("XP: 100 / 1000"));
        assert!(report.contains("Next up: Deep RL: DQNs (lvl2)"));
    }

    #[test]
    fn test_report_lists_resources() {
        let report = render_report(&view_with("[]"), &OutputStyle::plain());
        assert!(report.contains("- Hugging Face TRL Library  https://github.com/huggingface/trl"));
        assert!(report.contains("Example: Implement REINFORCE"));
    }

    #[test]
    fn test_report_finished() {
        let report = render_report(
            &view_with(r#"["lvl1","lvl2","lvl3","lvl4","lvl5"]"#),
            &OutputStyle::plain(),
        );
        assert!(report.contains("All levels completed."));
        assert!(report.contains("100%"));
    }

    #[test]
    fn test_color_helpers_respect_style() {
        let plain = OutputStyle::plain();
        let colored = OutputStyle { emojis: false, color: true };
        let helpers: [fn(&OutputStyle, &str) -> String; 5] = [
            OutputStyle::bold,
            OutputStyle::dim,
            OutputStyle::green,
            OutputStyle::cyan,
            OutputStyle::yellow,
        ];
        for paint in helpers {
            assert_eq!(paint(&plain, "lvl1"), "lvl1");
            let out = paint(&colored, "lvl1");
            assert!(out.contains("lvl1") && out.contains('\u{1b}'), "{:?}", out);
        }
    }

    #[test]
    fn test_emoji_glyphs() {
        let style = OutputStyle { emojis: true, color: false };
        let report = render_report(&view_with("[]"), &style);
        assert!(report.contains("🔥 Foundations of Reinforcement"));
        assert!(report.contains("🔒 Deep RL: DQNs"));
        assert!(report.contains("📌 Example:"));
    }
}
