//! Session setup: config, data directory, storage and the progress controller

use crate::cli::Cli;
use crate::output::OutputStyle;
use anyhow::{Context, Result};
use quest_common::{
    Curriculum, FileStorage, MemoryStorage, ProgressController, QuestConfig, Storage,
};
use std::path::{Path, PathBuf};
use tracing::debug;

pub type Controller = ProgressController<Box<dyn Storage>>;

/// Effective configuration and where it came from
pub struct LoadedConfig {
    pub config: QuestConfig,
    pub path: PathBuf,
}

/// Load config honoring `--config` and `$RLHF_QUEST_CONFIG`
pub fn load_config(explicit: Option<&Path>) -> Result<LoadedConfig> {
    let path = QuestConfig::resolve_path(explicit).context("Cannot locate config file")?;
    let config = QuestConfig::load_from(&path)?;
    Ok(LoadedConfig { config, path })
}

/// Data directory priority: flag, config, platform default
pub fn resolve_data_dir(flag: Option<&Path>, config: &QuestConfig) -> PathBuf {
    flag.map(Path::to_path_buf)
        .or_else(|| config.storage.data_dir.clone())
        .unwrap_or_else(FileStorage::default_dir)
}

/// Everything a command needs
pub struct Session {
    /// `None` for ephemeral sessions
    pub data_dir: Option<PathBuf>,
    pub style: OutputStyle,
    pub controller: Controller,
}

impl Session {
    pub fn open(cli: &Cli, config: &QuestConfig) -> Self {
        let data_dir = if cli.ephemeral {
            None
        } else {
            Some(resolve_data_dir(cli.data_dir.as_deref(), config))
        };

        let storage: Box<dyn Storage> = match &data_dir {
            Some(dir) => {
                debug!(dir = %dir.display(), "using file storage");
                Box::new(FileStorage::new(dir))
            }
            None => {
                debug!("using in-memory storage");
                Box::new(MemoryStorage::new())
            }
        };

        let controller = ProgressController::initialize(
            Curriculum::builtin(),
            storage,
            config.progress.unlock_policy,
        );

        Self {
            style: OutputStyle::from_config(&config.output),
            data_dir,
            controller,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use quest_common::UnlockPolicy;
    use tempfile::tempdir;

    #[test]
    fn test_data_dir_priority() {
        let mut config = QuestConfig::default();
        config.storage.data_dir = Some(PathBuf::from("/from/config"));

        assert_eq!(
            resolve_data_dir(Some(Path::new("/from/flag")), &config),
            PathBuf::from("/from/flag")
        );
        assert_eq!(resolve_data_dir(None, &config), PathBuf::from("/from/config"));
        assert_eq!(
            resolve_data_dir(None, &QuestConfig::default()),
            FileStorage::default_dir()
        );
    }

    #[test]
    fn test_open_uses_config_policy() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.toml");
        std::fs::write(&config_path, "[progress]\nunlock_policy = \"retain-completed\"\n").unwrap();

        let cli = Cli::parse_from([
            "questctl",
            "--config",
            config_path.to_str().unwrap(),
            "--data-dir",
            dir.path().to_str().unwrap(),
            "status",
        ]);
        let loaded = load_config(cli.config.as_deref()).unwrap();
        let session = Session::open(&cli, &loaded.config);

        assert_eq!(session.controller.policy(), UnlockPolicy::RetainCompleted);
        assert_eq!(session.data_dir.as_deref(), Some(dir.path()));
    }

    #[test]
    fn test_ephemeral_session_writes_nothing() {
        let dir = tempdir().unwrap();
        let cli = Cli::parse_from([
            "questctl",
            "--ephemeral",
            "--data-dir",
            dir.path().to_str().unwrap(),
            "toggle",
            "lvl1",
        ]);
        let mut session = Session::open(&cli, &QuestConfig::default());
        session.controller.toggle_level("lvl1");

        assert!(session.data_dir.is_none());
        assert_eq!(session.controller.completed_keys(), vec!["lvl1"]);
        assert!(!dir.path().join("rlhf-completed.json").exists());
    }
}
