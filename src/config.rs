use crate::backend::{default_shortcuts_path, project_dirs};
use crate::palette::DEFAULT_LITERAL;
use crate::{Error, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Deserialize, Debug, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub editor: EditorConfig,
    #[serde(default)]
    pub sources: SourceConfig,
}

#[derive(Deserialize, Debug, Clone)]
pub struct GeneralConfig {
    #[serde(default)]
    pub shortcuts_file: Option<PathBuf>,
    #[serde(default = "default_launch_cooldown_ms")]
    pub launch_cooldown_ms: u64,
    #[serde(default = "default_shell")]
    pub shell: String,
}

fn default_launch_cooldown_ms() -> u64 { 1500 }

fn default_shell() -> String {
    if cfg!(windows) { "cmd".to_string() } else { "sh".to_string() }
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            shortcuts_file: None,
            launch_cooldown_ms: default_launch_cooldown_ms(),
            shell: default_shell(),
        }
    }
}

impl GeneralConfig {
    pub fn shortcuts_path(&self) -> PathBuf {
        self.shortcuts_file.clone().unwrap_or_else(default_shortcuts_path)
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct EditorConfig {
    #[serde(default = "default_icons_per_page")]
    pub icons_per_page: usize,
    #[serde(default = "default_literal_color")]
    pub default_literal_color: String,
    #[serde(default = "default_max_custom_icon_size")]
    pub max_custom_icon_size: u32,
}

fn default_icons_per_page() -> usize { 48 }
fn default_literal_color() -> String { DEFAULT_LITERAL.to_string() }
fn default_max_custom_icon_size() -> u32 { 128 }

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            icons_per_page: default_icons_per_page(),
            default_literal_color: default_literal_color(),
            max_custom_icon_size: default_max_custom_icon_size(),
        }
    }
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct SourceConfig {
    #[serde(default)]
    pub application_dirs: Vec<PathBuf>,
}

pub fn config_path() -> PathBuf {
    match project_dirs() {
        Some(dirs) => dirs.config_dir().join("config.toml"),
        None => PathBuf::from("config.toml"),
    }
}

pub fn load_config() -> Result<Config> {
    load_config_from(&config_path())
}

pub fn load_config_from(path: &Path) -> Result<Config> {
    if !path.exists() {
        return Ok(Config::default());
    }

    let content = fs::read_to_string(path).map_err(|e| {
        Error::io(format!("Failed to read {}", path.display()), Some(path.to_path_buf()), e)
    })?;
    let config: Config = toml::from_str(&content)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let config = load_config_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config.general.launch_cooldown_ms, 1500);
        assert_eq!(config.editor.icons_per_page, 48);
        assert_eq!(config.editor.default_literal_color, "hsl(220, 100%, 50%)");
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "[general]\nshortcuts_file = \"/tmp/tiles.json\"\n\n[sources]\napplication_dirs = [\"/opt/apps\"]\n",
        )
        .unwrap();

        let config = load_config_from(&path).unwrap();
        assert_eq!(config.general.shortcuts_path(), PathBuf::from("/tmp/tiles.json"));
        assert_eq!(config.general.launch_cooldown_ms, 1500);
        assert_eq!(config.sources.application_dirs, vec![PathBuf::from("/opt/apps")]);
        assert_eq!(config.editor.max_custom_icon_size, 128);
    }

    #[test]
    fn malformed_file_is_reported() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[general\nshell = ").unwrap();
        assert!(matches!(load_config_from(&path), Err(Error::Settings(_))));
    }
}
