//! Status Command - the whole checklist

use crate::output::render_report;
use crate::session::Session;
use anyhow::{Context, Result};

/// Run the status command
pub fn run(session: &Session, json: bool) -> Result<()> {
    let view = session.controller.view();

    if json {
        let out = serde_json::to_string_pretty(&view).context("Failed to serialize progress")?;
        println!("{}", out);
        return Ok(());
    }

    print!("{}", render_report(&view, &session.style));
    println!();
    Ok(())
}
