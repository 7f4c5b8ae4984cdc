//! Config Command - show or edit configuration

use crate::session::{resolve_data_dir, LoadedConfig};
use anyhow::{Context, Result};
use std::path::Path;

/// Run the config command
pub fn run(loaded: &mut LoadedConfig, data_dir_flag: Option<&Path>, set: Option<&str>) -> Result<()> {
    if let Some(assignment) = set {
        loaded.config.apply_assignment(assignment)?;
        loaded
            .config
            .save_to(&loaded.path)
            .with_context(|| format!("Failed to save {}", loaded.path.display()))?;
        println!("Updated {}", loaded.path.display());
        println!();
    }

    print!("{}", render_config(loaded, data_dir_flag)?);
    Ok(())
}

/// Effective configuration as TOML plus resolved locations
pub fn render_config(loaded: &LoadedConfig, data_dir_flag: Option<&Path>) -> Result<String> {
    let body = toml::to_string_pretty(&loaded.config).context("Failed to serialize configuration")?;
    let data_dir = resolve_data_dir(data_dir_flag, &loaded.config);

    let mut out = String::new();
    out.push_str(&format!("# config file: {}\n", loaded.path.display()));
    out.push_str(&format!("# data dir:    {}\n", data_dir.display()));
    out.push('\n');
    out.push_str(&body);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use quest_common::{QuestConfig, UnlockPolicy};
    use tempfile::tempdir;

    #[test]
    fn test_set_persists_to_file() {
        let dir = tempdir().unwrap();
        let mut loaded = LoadedConfig {
            config: QuestConfig::default(),
            path: dir.path().join("config.toml"),
        };

        run(&mut loaded, None, Some("progress.unlock_policy=retain-completed")).unwrap();

        let reread = QuestConfig::load_from(&loaded.path).unwrap();
        assert_eq!(reread.progress.unlock_policy, UnlockPolicy::RetainCompleted);
    }

    #[test]
    fn test_invalid_set_leaves_file_untouched() {
        let dir = tempdir().unwrap();
        let mut loaded = LoadedConfig {
            config: QuestConfig::default(),
            path: dir.path().join("config.toml"),
        };
        assert!(run(&mut loaded, None, Some("output.emojis=sometimes")).is_err());
        assert!(!loaded.path.exists());
    }

    #[test]
    fn test_render_shows_locations() {
        let loaded = LoadedConfig {
            config: QuestConfig::default(),
            path: "/etc/quest/config.toml".into(),
        };
        let text = render_config(&loaded, Some(Path::new("/srv/quest"))).unwrap();
        assert!(text.contains("# config file: /etc/quest/config.toml"));
        assert!(text.contains("# data dir:    /srv/quest"));
        assert!(text.contains("unlock_policy = \"strict\""));
        assert!(text.contains("emojis = \"auto\""));
    }
}
