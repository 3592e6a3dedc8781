use crate::model::InstalledApp;
use crate::sources::AppSource;
use crate::Result;
use directories::BaseDirs;
use log::{debug, info};
use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;
use walkdir::WalkDir;

/// Applications described by freedesktop `.desktop` files.
#[derive(Debug, Clone, Default)]
pub struct DesktopSource {
    extra_dirs: Vec<PathBuf>,
    only_extra: bool,
}

impl DesktopSource {
    pub fn new(extra_dirs: Vec<PathBuf>) -> Self {
        Self { extra_dirs, only_extra: false }
    }

    /// Scan only the given directories, ignoring the XDG defaults.
    pub fn in_dirs(dirs: Vec<PathBuf>) -> Self {
        Self { extra_dirs: dirs, only_extra: true }
    }

    fn data_dirs(&self) -> Vec<PathBuf> {
        let mut data_dirs = Vec::new();
        if !self.only_extra {
            if let Some(base_dirs) = BaseDirs::new() {
                data_dirs.push(base_dirs.data_dir().join("applications"));
            }
            data_dirs.push(PathBuf::from("/usr/share/applications"));
            data_dirs.push(PathBuf::from("/usr/local/share/applications"));
        }
        data_dirs.extend(self.extra_dirs.iter().cloned());
        data_dirs
    }
}

impl AppSource for DesktopSource {
    fn scan(&self) -> Result<Vec<InstalledApp>> {
        let mut apps = Vec::new();
        let mut seen = HashSet::new();

        for dir in self.data_dirs() {
            if !dir.exists() {
                continue;
            }
            debug!("Scanning desktop files in {:?}", dir);
            for entry in WalkDir::new(&dir).follow_links(true).into_iter().flatten() {
                let path = entry.path();
                if path.extension().and_then(|s| s.to_str()) != Some("desktop") {
                    continue;
                }
                let Ok(content) = fs::read_to_string(path) else {
                    continue;
                };
                if let Some(app) = parse_desktop_file(&content) {
                    if seen.insert(app.name.clone()) {
                        apps.push(app);
                    }
                }
            }
        }

        apps.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
        info!("DesktopSource: found {} applications", apps.len());
        Ok(apps)
    }
}

fn parse_desktop_file(content: &str) -> Option<InstalledApp> {
    let mut name = None;
    let mut exec = None;
    let mut hidden = false;
    let mut is_application = true;
    let mut is_desktop_entry = false;

    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') { continue; }

        if line == "[Desktop Entry]" {
            is_desktop_entry = true;
            continue;
        }

        if line.starts_with('[') {
            is_desktop_entry = false;
            continue;
        }

        if !is_desktop_entry { continue; }

        let Some((key, value)) = line.split_once('=') else { continue };
        match key.trim() {
            "Name" => name = Some(value.trim().to_string()),
            "Exec" => {
                let clean_exec: String = value.split_whitespace()
                    .filter(|s| !(s.starts_with('%') && s.len() == 2))
                    .collect::<Vec<_>>()
                    .join(" ");
                exec = Some(clean_exec);
            }
            "NoDisplay" | "Hidden" => hidden |= value.trim() == "true",
            "Type" => is_application = value.trim() == "Application",
            _ => {}
        }
    }

    if hidden || !is_application { return None; }

    match (name, exec) {
        (Some(name), Some(exec)) if !name.is_empty() && !exec.is_empty() => {
            Some(InstalledApp { name, exec })
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const FIREFOX: &str = "[Desktop Entry]\nType=Application\nName=Firefox\nName[de]=Feuerfuchs\nExec=firefox %u\nIcon=firefox\n\n[Desktop Action new-window]\nName=New Window\nExec=firefox --new-window %u\n";

    #[test]
    fn parses_main_group_only() {
        let app = parse_desktop_file(FIREFOX).unwrap();
        assert_eq!(app, InstalledApp { name: "Firefox".to_string(), exec: "firefox".to_string() });
    }

    #[test]
    fn skips_hidden_and_non_applications() {
        assert!(parse_desktop_file("[Desktop Entry]\nName=X\nExec=x\nNoDisplay=true\n").is_none());
        assert!(parse_desktop_file("[Desktop Entry]\nName=X\nExec=x\nHidden=true\n").is_none());
        assert!(parse_desktop_file("[Desktop Entry]\nType=Link\nName=X\nExec=x\n").is_none());
        assert!(parse_desktop_file("[Desktop Entry]\nName=X\n").is_none());
    }

    #[test]
    fn scans_nested_dirs_sorted_and_deduplicated() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("kde4");
        fs::create_dir_all(&nested).unwrap();
        fs::write(dir.path().join("firefox.desktop"), FIREFOX).unwrap();
        fs::write(nested.join("firefox-copy.desktop"), FIREFOX).unwrap();
        fs::write(nested.join("gimp.desktop"), "[Desktop Entry]\nName=GIMP\nExec=gimp-2.10 %U\n").unwrap();
        fs::write(dir.path().join("readme.txt"), "not a desktop file").unwrap();

        let apps = DesktopSource::in_dirs(vec![dir.path().to_path_buf()]).scan().unwrap();
        let names: Vec<_> = apps.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["Firefox", "GIMP"]);
        assert_eq!(apps[1].exec, "gimp-2.10");
    }
}
