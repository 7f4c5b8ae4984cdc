//! RLHF Quest configuration.
//!
//! User configuration for output preferences, unlock policy and storage.
//! Config file: `$RLHF_QUEST_CONFIG` or `~/.config/rlhf-quest/config.toml`.

use crate::error::{QuestError, Result};
use crate::progress::UnlockPolicy;
use crate::storage::APP_DIR_NAME;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable overriding the config file location
pub const CONFIG_ENV: &str = "RLHF_QUEST_CONFIG";

/// Emoji display mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmojiMode {
    /// Emojis when the terminal looks capable
    #[default]
    Auto,
    Enabled,
    /// ASCII glyphs only
    Disabled,
}

/// Color display mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    #[default]
    Auto,
    /// Force basic ANSI colors
    Basic,
    /// Plain text
    None,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub emojis: EmojiMode,

    #[serde(default)]
    pub color: ColorMode,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressConfig {
    #[serde(default)]
    pub unlock_policy: UnlockPolicy,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Where progress files live; platform data dir when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
}

/// Main configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestConfig {
    #[serde(default)]
    pub output: OutputConfig,

    #[serde(default)]
    pub progress: ProgressConfig,

    #[serde(default)]
    pub storage: StorageConfig,
}

impl QuestConfig {
    /// Default user config path: `<config dir>/rlhf-quest/config.toml`
    pub fn user_config_path() -> Result<PathBuf> {
        let base = dirs::config_dir()
            .ok_or_else(|| QuestError::Config("cannot determine config directory".to_string()))?;
        Ok(base.join(APP_DIR_NAME).join("config.toml"))
    }

    /// Resolve which file to use.
    ///
    /// Priority:
    /// 1. Explicit path (command line)
    /// 2. `$RLHF_QUEST_CONFIG`
    /// 3. User config dir
    pub fn resolve_path(explicit: Option<&Path>) -> Result<PathBuf> {
        if let Some(path) = explicit {
            return Ok(path.to_path_buf());
        }
        if let Ok(path) = std::env::var(CONFIG_ENV) {
            if !path.is_empty() {
                return Ok(PathBuf::from(path));
            }
        }
        Self::user_config_path()
    }

    /// Load from `path`, returning defaults when the file does not exist.
    /// A file that exists but does not parse is an error.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = fs::read_to_string(path).map_err(|e| {
            QuestError::Config(format!("failed to read {}: {}", path.display(), e))
        })?;
        toml::from_str(&contents)
            .map_err(|e| QuestError::Config(format!("failed to parse {}: {}", path.display(), e)))
    }

    /// Save to `path`, creating parent directories
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let toml_string = toml::to_string_pretty(self)?;
        fs::write(path, toml_string).map_err(|e| {
            QuestError::Config(format!("failed to write {}: {}", path.display(), e))
        })
    }

    pub fn set_emoji_mode(&mut self, mode: &str) -> Result<()> {
        self.output.emojis = match mode.to_lowercase().as_str() {
            "auto" => EmojiMode::Auto,
            "on" | "enabled" | "yes" | "true" => EmojiMode::Enabled,
            "off" | "disabled" | "no" | "false" => EmojiMode::Disabled,
            _ => {
                return Err(QuestError::Config(format!(
                    "invalid emoji mode '{}'. Valid values: auto, on, off",
                    mode
                )))
            }
        };
        Ok(())
    }

    pub fn set_color_mode(&mut self, mode: &str) -> Result<()> {
        self.output.color = match mode.to_lowercase().as_str() {
            "auto" => ColorMode::Auto,
            "basic" => ColorMode::Basic,
            "none" | "off" | "disabled" => ColorMode::None,
            _ => {
                return Err(QuestError::Config(format!(
                    "invalid color mode '{}'. Valid values: auto, basic, none",
                    mode
                )))
            }
        };
        Ok(())
    }

    pub fn set_unlock_policy(&mut self, policy: &str) -> Result<()> {
        self.progress.unlock_policy = UnlockPolicy::parse(policy).ok_or_else(|| {
            QuestError::Config(format!(
                "invalid unlock policy '{}'. Valid values: strict, retain-completed",
                policy
            ))
        })?;
        Ok(())
    }

    /// Apply a `section.key=value` assignment
    pub fn apply_assignment(&mut self, assignment: &str) -> Result<()> {
        let (key, value) = assignment.split_once('=').ok_or_else(|| {
            QuestError::Config(format!("expected key=value, got '{}'", assignment))
        })?;
        let value = value.trim();

        match key.trim() {
            "output.emojis" => self.set_emoji_mode(value),
            "output.color" => self.set_color_mode(value),
            "progress.unlock_policy" => self.set_unlock_policy(value),
            "storage.data_dir" => {
                self.storage.data_dir = if value.is_empty() {
                    None
                } else {
                    Some(PathBuf::from(value))
                };
                Ok(())
            }
            other => Err(QuestError::Config(format!(
                "unknown setting '{}'. Known: output.emojis, output.color, progress.unlock_policy, storage.data_dir",
                other
            ))),
        }
    }
}
