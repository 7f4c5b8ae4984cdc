//! Show Command - one level in detail

use crate::output::render_level;
use crate::session::Session;
use anyhow::{bail, Context, Result};
use quest_common::display::xp_summary;

/// Run the show command
pub fn run(session: &Session, key: &str, json: bool) -> Result<()> {
    let view = session.controller.view();
    let Some(level) = view.level(key) else {
        bail!("{}", unknown_level_message(session, key));
    };

    if json {
        let out = serde_json::to_string_pretty(level).context("Failed to serialize level")?;
        println!("{}", out);
        return Ok(());
    }

    let previous = level.index.checked_sub(1).map(|p| view.levels[p].key());
    println!();
    print!("{}", render_level(level, previous, &session.style));
    println!();
    println!("  {}", session.style.dim(&xp_summary(&view)));
    println!();
    Ok(())
}

/// Error text for a key that names no level
pub fn unknown_level_message(session: &Session, key: &str) -> String {
    let known: Vec<&str> = session
        .controller
        .curriculum()
        .levels()
        .iter()
        .map(|l| l.key)
        .collect();
    format!("Unknown level '{}'. Known levels: {}", key, known.join(", "))
}
