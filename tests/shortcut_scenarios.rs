use fidgetapps::backend::FileBackend;
use fidgetapps::config::EditorConfig;
use fidgetapps::editor::{Session, ShortcutEditor};
use fidgetapps::icons::IconCatalog;
use fidgetapps::model::{InstalledApp, ShortcutRecord};
use fidgetapps::sources::AppSource;
use fidgetapps::store::{ConfigBackend, ConfigStore, DeleteOutcome};
use fidgetapps::{Error, Result};
use std::fs;
use tempfile::TempDir;

struct NoApps;

impl AppSource for NoApps {
    fn scan(&self) -> Result<Vec<InstalledApp>> {
        Ok(Vec::new())
    }
}

const ONLY_SETTINGS: &str =
    r#"[{ "id": 1, "name": "Settings", "icon": "Settings", "color": "bg-gray-500", "iconColor": "text-white", "command": "settings" }]"#;

fn store_in(dir: &TempDir, blob: &str) -> ConfigStore<FileBackend> {
    let path = dir.path().join("shortcuts.json");
    fs::write(&path, blob).unwrap();
    let mut store = ConfigStore::new(FileBackend::new(path).without_defaults());
    store.load().unwrap();
    store
}

fn persisted(store: &ConfigStore<FileBackend>) -> Vec<ShortcutRecord> {
    serde_json::from_str(&store.backend().load_config().unwrap()).unwrap()
}

#[test]
fn add_files_then_blank_name_is_not_persisted() {
    let dir = TempDir::new().unwrap();
    let mut store = store_in(&dir, ONLY_SETTINGS);
    let catalog = IconCatalog::bundled();
    let mut editor = ShortcutEditor::new(catalog, NoApps, EditorConfig::default());

    editor.begin_create(&store);
    editor.set_name(&mut store, "Files").unwrap();
    editor.set_command(&mut store, "nautilus").unwrap();
    assert_eq!(editor.save(&mut store).unwrap(), 2);

    let list = persisted(&store);
    assert_eq!(list.len(), 2);
    assert_eq!(list[1].id, 2);
    assert_eq!(list[1].name, "Files");

    editor.begin_edit(&store, 2).unwrap();
    editor.set_name(&mut store, "").unwrap();
    assert!(matches!(editor.save(&mut store), Err(Error::Validation(_))));
    assert!(matches!(editor.session(), Session::Editing(_)));
    assert_eq!(persisted(&store)[1].name, "Files");
}

#[test]
fn settings_survives_delete_and_others_keep_order() {
    let dir = TempDir::new().unwrap();
    let mut store = store_in(&dir, ONLY_SETTINGS);
    let catalog = IconCatalog::bundled();
    let mut editor = ShortcutEditor::new(catalog, NoApps, EditorConfig::default());

    for (name, command) in [("Files", "nautilus"), ("Web", "firefox"), ("Music", "rhythmbox")] {
        editor.begin_create(&store);
        editor.set_name(&mut store, name).unwrap();
        editor.set_command(&mut store, command).unwrap();
        editor.save(&mut store).unwrap();
    }

    assert_eq!(editor.delete(&mut store, 1, |_| true).unwrap(), DeleteOutcome::Refused);
    assert_eq!(editor.delete(&mut store, 3, |_| true).unwrap(), DeleteOutcome::Deleted);

    let names: Vec<_> = persisted(&store).into_iter().map(|r| r.name).collect();
    assert_eq!(names, vec!["Settings", "Files", "Music"]);
}

#[test]
fn camera_search_over_bundled_library() {
    let catalog = IconCatalog::bundled();
    let mut editor = ShortcutEditor::new(catalog, NoApps, EditorConfig::default());
    editor.set_icon_search("camera");
    let page = editor.icon_page();
    assert_eq!(page.icons, vec!["Camera", "CameraOff", "SwitchCamera"]);
    assert_eq!(page.page_count, 1);
}

#[test]
fn malformed_blob_is_reported_without_fabricating_records() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("shortcuts.json");
    fs::write(&path, r#"[{ "id": 1, "name": "Broken" }]"#).unwrap();

    let mut store = ConfigStore::new(FileBackend::new(path));
    assert!(matches!(store.load(), Err(Error::Parse(_))));
    assert!(store.records().is_empty());
}
