//! CLI - Command-line argument parsing
//!
//! Keeps argument parsing separate from execution logic.

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

/// RLHF Quest CLI
#[derive(Parser, Debug)]
#[command(name = "questctl")]
#[command(about = "RLHF Quest - a level-by-level reinforcement learning checklist", long_about = None)]
#[command(version = env!("QUESTCTL_VERSION"))]
#[command(disable_help_subcommand = true)]
pub struct Cli {
    /// Directory holding saved progress (overrides config)
    #[arg(long, global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Config file (overrides $RLHF_QUEST_CONFIG and the default location)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Keep progress in memory only; nothing is read or written
    #[arg(long, global = true)]
    pub ephemeral: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Subcommand (if not provided, starts the interactive TUI)
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show every level, its status and the XP total
    Status {
        /// Output JSON only
        #[arg(long)]
        json: bool,
    },

    /// Show a single level in detail
    Show {
        /// Level key, e.g. lvl2
        key: String,

        /// Output JSON only
        #[arg(long)]
        json: bool,
    },

    /// Flip completion of a level (Complete <-> Reset)
    Toggle {
        key: String,
    },

    /// Mark a level completed
    Complete {
        key: String,
    },

    /// Clear a level's completion
    Reset {
        key: String,
    },

    /// Show or edit configuration
    Config {
        /// Set a configuration value (section.key=value)
        #[arg(long)]
        set: Option<String>,
    },

    /// Launch the interactive checklist
    Tui,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_no_subcommand_means_tui() {
        let cli = Cli::try_parse_from(["questctl"]).unwrap();
        assert!(cli.command.is_none());
        assert!(!cli.ephemeral);
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["questctl", "toggle", "lvl1", "--data-dir", "/tmp/q", "-vv"])
            .unwrap();
        assert_eq!(cli.data_dir, Some(PathBuf::from("/tmp/q")));
        assert_eq!(cli.verbose, 2);
        assert!(matches!(cli.command, Some(Commands::Toggle { ref key }) if key == "lvl1"));
    }

    #[test]
    fn test_toggle_requires_key() {
        assert!(Cli::try_parse_from(["questctl", "toggle"]).is_err());
    }
}
