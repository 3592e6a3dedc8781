use crate::store::ConfigBackend;
use crate::{Error, Result};
use directories::ProjectDirs;
use log::{debug, info};
use std::fs;
use std::path::{Path, PathBuf};

pub const SHORTCUTS_FILE: &str = "shortcuts.json";

/// Tiles written on first run, before the user has configured anything.
pub const DEFAULT_SHORTCUTS: &str = r#"[
  { "id": 1, "name": "Text Editor", "icon": "Code", "color": "bg-blue-500", "iconColor": "text-gray-600", "command": "xed" },
  { "id": 2, "name": "File Manager", "icon": "Folder", "color": "bg-yellow-500", "iconColor": "text-gray-600", "command": "nautilus" },
  { "id": 99, "name": "Settings", "icon": "Settings", "color": "bg-gray-400/50", "iconColor": "text-gray-600", "command": "settings" }
]"#;

pub fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("org", "fidgetapps", "fidgetapps")
}

pub fn default_shortcuts_path() -> PathBuf {
    match project_dirs() {
        Some(dirs) => dirs.config_dir().join(SHORTCUTS_FILE),
        None => PathBuf::from(SHORTCUTS_FILE),
    }
}

/// Shortcut list kept as one JSON file.
pub struct FileBackend {
    path: PathBuf,
    seed_defaults: bool,
}

impl FileBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            seed_defaults: true,
        }
    }

    /// Report a missing file as an error instead of writing the default tiles.
    pub fn without_defaults(mut self) -> Self {
        self.seed_defaults = false;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write(&self, contents: &str) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| {
                Error::io(
                    format!("Failed to create directory {}", parent.display()),
                    Some(parent.to_path_buf()),
                    e,
                )
            })?;
        }

        let temp_path = self.path.with_extension(format!("json.{}.tmp", std::process::id()));
        fs::write(&temp_path, contents).map_err(|e| {
            Error::io(
                format!("Failed to write {}", temp_path.display()),
                Some(temp_path.clone()),
                e,
            )
        })?;
        fs::rename(&temp_path, &self.path).map_err(|e| {
            let _ = fs::remove_file(&temp_path);
            Error::io(
                format!("Failed to replace {}", self.path.display()),
                Some(self.path.clone()),
                e,
            )
        })?;
        debug!("FileBackend: wrote {}", self.path.display());
        Ok(())
    }
}

impl Default for FileBackend {
    fn default() -> Self {
        Self::new(default_shortcuts_path())
    }
}

impl ConfigBackend for FileBackend {
    fn load_config(&self) -> Result<String> {
        if !self.path.exists() && self.seed_defaults {
            info!("FileBackend: {} missing, writing default shortcuts", self.path.display());
            self.write(DEFAULT_SHORTCUTS)?;
            return Ok(DEFAULT_SHORTCUTS.to_string());
        }
        fs::read_to_string(&self.path).map_err(|e| {
            Error::io(
                format!("Failed to read {}", self.path.display()),
                Some(self.path.clone()),
                e,
            )
        })
    }

    fn save_config(&self, blob: &str) -> Result<()> {
        self.write(blob)
    }
}
