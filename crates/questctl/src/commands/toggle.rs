//! Toggle Commands - toggle, complete and reset
//!
//! All three go through the controller's toggle; complete/reset only skip the
//! call when the level is already in the requested state.

use crate::output::OutputStyle;
use crate::session::Session;
use anyhow::{bail, Result};
use quest_common::display::{status_glyph, xp_summary};
use quest_common::{newly_unlocked, LevelStatus, ProgressView, ToggleOutcome};

/// Which command was invoked
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleAction {
    Toggle,
    Complete,
    Reset,
}

/// Run a toggle-family command
pub fn run(session: &mut Session, key: &str, action: ToggleAction) -> Result<()> {
    let before = session.controller.view();
    let outcome = match action {
        ToggleAction::Toggle => session.controller.toggle_level(key),
        ToggleAction::Complete => session.controller.complete(key),
        ToggleAction::Reset => session.controller.reset(key),
    };
    let after = session.controller.view();

    let message = describe_outcome(&before, &after, key, outcome, action, &session.style);

    if let Some(warning) = session.controller.persist_warning() {
        eprintln!("{} {}", session.style.yellow("warning:"), warning);
    }

    match message {
        Ok(text) => {
            print!("{}", text);
            Ok(())
        }
        Err(text) => bail!(text),
    }
}

/// User-facing text for a toggle result. `Err` holds the message for
/// outcomes that should exit non-zero.
pub fn describe_outcome(
    before: &ProgressView,
    after: &ProgressView,
    key: &str,
    outcome: ToggleOutcome,
    action: ToggleAction,
    style: &OutputStyle,
) -> std::result::Result<String, String> {
    let Some(level) = after.level(key) else {
        let known: Vec<&str> = after.levels.iter().map(|l| l.key()).collect();
        return Err(format!(
            "Unknown level '{}'. Known levels: {}",
            key,
            known.join(", ")
        ));
    };
    let title = level.level.title;

    let mut out = String::new();
    match outcome {
        ToggleOutcome::Completed => {
            out.push_str(&format!(
                "{} Completed: {} {}\n",
                status_glyph(LevelStatus::Completed, style.emojis),
                style.green(title),
                style.dim(&format!("(+{} XP)", level.level.xp))
            ));
            for unlocked in newly_unlocked(before, after) {
                out.push_str(&format!(
                    "{} Unlocked: {} ({})\n",
                    status_glyph(LevelStatus::Available, style.emojis),
                    style.bold(unlocked.level.title),
                    unlocked.key()
                ));
            }
            if after.is_finished() {
                out.push_str("All levels completed.\n");
            }
        }
        ToggleOutcome::Reset => {
            out.push_str(&format!(
                "Reset: {} {}\n",
                title,
                style.dim(&format!("(-{} XP)", level.level.xp))
            ));
        }
        ToggleOutcome::Unchanged => {
            let state = match action {
                ToggleAction::Reset => "is not completed",
                _ => "is already completed",
            };
            out.push_str(&format!("{} ({}) {}; nothing to do.\n", title, key, state));
        }
        ToggleOutcome::Locked => {
            let hint = level
                .index
                .checked_sub(1)
                .map(|p| format!(" Complete '{}' first.", after.levels[p].key()))
                .unwrap_or_default();
            return Err(format!("Level '{}' ({}) is locked.{}", key, title, hint));
        }
        ToggleOutcome::UnknownLevel => {
            return Err(format!("Unknown level '{}'", key));
        }
    }

    out.push_str(&format!("{}\n", xp_summary(after)));
    Ok(out)
}
