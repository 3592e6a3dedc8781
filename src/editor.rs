use crate::catalog::{self, ALL_CATEGORIES, CommonApp};
use crate::config::EditorConfig;
use crate::icons::{CustomIcon, IconCatalog, IconPage, IconSearch};
use crate::model::{InstalledApp, ShortcutDraft, ShortcutId, ShortcutRecord};
use crate::palette::ColorValue;
use crate::sources::AppSource;
use crate::store::{ConfigBackend, ConfigStore, DeleteOutcome};
use crate::{Error, Result};
use log::{debug, info, warn};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Session {
    Closed,
    /// A new record that is not in the store until [`ShortcutEditor::save`].
    Creating(ShortcutRecord),
    /// A copy of a stored record; every field change is written straight back.
    Editing(ShortcutRecord),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialog {
    IconPicker,
    CommonApps,
    InstalledApps,
}

/// Edit session over one shortcut at a time, plus the pickers that feed it.
///
/// Lives as long as the settings screen is open. The installed-applications
/// list is fetched at most once per editor.
pub struct ShortcutEditor<'c, A> {
    session: Session,
    dialog: Option<Dialog>,
    catalog: &'c IconCatalog,
    icon_search: IconSearch,
    app_search: String,
    app_category: String,
    source: A,
    installed: Option<Vec<InstalledApp>>,
    installed_search: String,
    settings: EditorConfig,
}

impl<'c, A: AppSource> ShortcutEditor<'c, A> {
    pub fn new(catalog: &'c IconCatalog, source: A, settings: EditorConfig) -> Self {
        Self {
            session: Session::Closed,
            dialog: None,
            icon_search: IconSearch::new(catalog, settings.icons_per_page),
            catalog,
            app_search: String::new(),
            app_category: ALL_CATEGORIES.to_string(),
            source,
            installed: None,
            installed_search: String::new(),
            settings,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn working(&self) -> Option<&ShortcutRecord> {
        match &self.session {
            Session::Creating(r) | Session::Editing(r) => Some(r),
            Session::Closed => None,
        }
    }

    pub fn dialog(&self) -> Option<Dialog> {
        self.dialog
    }

    pub fn catalog(&self) -> &'c IconCatalog {
        self.catalog
    }

    /// Start a new shortcut with placeholder values. It is only held here
    /// until saved.
    pub fn begin_create<B: ConfigBackend>(&mut self, store: &ConfigStore<B>) -> ShortcutId {
        let record = store.add(ShortcutDraft::default());
        let id = record.id;
        debug!("Editor: creating shortcut {}", id);
        self.dialog = None;
        self.session = Session::Creating(record);
        id
    }

    /// Open a stored shortcut. Palette colors are swapped for the default
    /// literal so the continuous picker has something to work on; this is not
    /// written until another field changes.
    pub fn begin_edit<B: ConfigBackend>(
        &mut self,
        store: &ConfigStore<B>,
        id: ShortcutId,
    ) -> Option<&ShortcutRecord> {
        let mut record = store.get(id)?.clone();
        if !record.color.is_literal() {
            record.color = ColorValue::Literal(self.settings.default_literal_color.clone());
        }
        debug!("Editor: editing shortcut {}", id);
        self.dialog = None;
        self.session = Session::Editing(record);
        self.working()
    }

    pub fn set_name<B: ConfigBackend>(&mut self, store: &mut ConfigStore<B>, name: &str) -> Result<()> {
        self.edit(store, |r| r.name = name.to_string())
    }

    pub fn set_command<B: ConfigBackend>(&mut self, store: &mut ConfigStore<B>, command: &str) -> Result<()> {
        self.edit(store, |r| r.command = command.to_string())
    }

    pub fn set_color<B: ConfigBackend>(&mut self, store: &mut ConfigStore<B>, color: ColorValue) -> Result<()> {
        self.edit(store, |r| r.color = color)
    }

    pub fn set_icon_color<B: ConfigBackend>(&mut self, store: &mut ConfigStore<B>, tint: &str) -> Result<()> {
        self.edit(store, |r| r.icon_color = tint.to_string())
    }

    /// Write the session's record back. New records and blank required
    /// fields are left to [`Self::save`].
    fn edit<B: ConfigBackend>(
        &mut self,
        store: &mut ConfigStore<B>,
        change: impl FnOnce(&mut ShortcutRecord),
    ) -> Result<()> {
        let record = match &mut self.session {
            Session::Creating(r) => {
                change(r);
                return Ok(());
            }
            Session::Editing(r) => r,
            Session::Closed => return Err(Error::NoSession),
        };
        change(record);
        if let Err(e) = record.validate() {
            debug!("Editor: not writing shortcut {}: {}", record.id, e);
            return Ok(());
        }
        store.reconcile(record)?;
        Ok(())
    }

    /// Validate and store the session's record, then close the session.
    ///
    /// On a validation error nothing changes. If only the write fails the
    /// record is already in the store's list and the session stays open so
    /// the user can retry. An edited record that has left the list in the
    /// meantime is not brought back.
    pub fn save<B: ConfigBackend>(&mut self, store: &mut ConfigStore<B>) -> Result<ShortcutId> {
        let id = match &self.session {
            Session::Creating(record) => {
                record.validate()?;
                store.commit(record.clone())?;
                record.id
            }
            Session::Editing(record) => {
                record.validate()?;
                if !store.reconcile(record)? {
                    warn!("Editor: shortcut {} was removed while being edited", record.id);
                    let id = record.id;
                    self.close();
                    return Err(Error::UnknownShortcut(id));
                }
                record.id
            }
            Session::Closed => return Err(Error::NoSession),
        };
        info!("Editor: saved shortcut {}", id);
        self.close();
        Ok(id)
    }

    /// Drop the session. Edits already written to the store stay there.
    pub fn cancel(&mut self) {
        if let Some(r) = self.working() {
            debug!("Editor: cancelled session for shortcut {}", r.id);
        }
        self.close();
    }

    fn close(&mut self) {
        self.session = Session::Closed;
        self.dialog = None;
    }

    /// Delete a stored shortcut once `confirm` agrees. The settings shortcut
    /// is refused before asking.
    pub fn delete<B: ConfigBackend>(
        &mut self,
        store: &mut ConfigStore<B>,
        id: ShortcutId,
        confirm: impl FnOnce(&ShortcutRecord) -> bool,
    ) -> Result<DeleteOutcome> {
        let Some(record) = store.get(id) else {
            return Ok(DeleteOutcome::NotFound);
        };
        if record.is_settings_entry() {
            warn!("Editor: the settings shortcut cannot be deleted");
            return Ok(DeleteOutcome::Refused);
        }
        if !confirm(record) {
            return Ok(DeleteOutcome::Declined);
        }
        let outcome = store.delete(id)?;
        if self.working().is_some_and(|r| r.id == id) {
            self.close();
        }
        Ok(outcome)
    }

    pub fn open_dialog(&mut self, dialog: Dialog) {
        self.dialog = Some(dialog);
    }

    pub fn close_dialog(&mut self) {
        self.dialog = None;
    }

    pub fn icon_search(&self) -> &IconSearch {
        &self.icon_search
    }

    pub fn set_icon_search(&mut self, term: &str) {
        self.icon_search.set_term(self.catalog, term);
    }

    pub fn next_icon_page(&mut self) {
        self.icon_search.next_page();
    }

    pub fn prev_icon_page(&mut self) {
        self.icon_search.prev_page();
    }

    /// Jump straight to `page` (0-based), clamped to the last page.
    pub fn go_to_icon_page(&mut self, page: usize) {
        self.icon_search.go_to(page);
    }

    pub fn icon_page(&self) -> IconPage<'c> {
        self.icon_search.current(self.catalog)
    }

    pub fn select_library_icon<B: ConfigBackend>(
        &mut self,
        store: &mut ConfigStore<B>,
        name: &str,
    ) -> Result<()> {
        self.edit(store, |r| r.set_library_icon(name))?;
        self.close_dialog();
        Ok(())
    }

    pub fn apply_custom_icon<B: ConfigBackend>(
        &mut self,
        store: &mut ConfigStore<B>,
        icon: CustomIcon,
    ) -> Result<()> {
        self.edit(store, |r| r.set_custom_icon(icon.file_name, icon.data))?;
        self.close_dialog();
        Ok(())
    }

    /// Read an image file from disk and use it as the session's icon.
    pub fn upload_custom_icon<B: ConfigBackend>(
        &mut self,
        store: &mut ConfigStore<B>,
        path: &Path,
    ) -> Result<()> {
        if self.working().is_none() {
            return Err(Error::NoSession);
        }
        let icon = CustomIcon::from_path(path, self.settings.max_custom_icon_size)?;
        self.apply_custom_icon(store, icon)
    }

    pub fn set_app_search(&mut self, search: &str) {
        self.app_search = search.to_string();
    }

    pub fn set_app_category(&mut self, category: &str) {
        self.app_category = category.to_string();
    }

    pub fn common_apps(&self) -> Vec<&'static CommonApp> {
        catalog::filter_common_apps(&self.app_search, &self.app_category)
    }

    pub fn choose_common_app<B: ConfigBackend>(
        &mut self,
        store: &mut ConfigStore<B>,
        app: &CommonApp,
    ) -> Result<()> {
        self.choose_command(store, app.name, app.command)
    }

    /// Open the installed-applications chooser, scanning the host the first
    /// time only. A failed scan counts as an empty result and is not retried.
    pub fn open_installed_apps(&mut self) {
        if self.installed.is_none() {
            let apps = match self.source.scan() {
                Ok(apps) => apps,
                Err(e) => {
                    warn!("Editor: could not list installed applications: {}", e);
                    Vec::new()
                }
            };
            self.installed = Some(apps);
        }
        self.dialog = Some(Dialog::InstalledApps);
    }

    pub fn set_installed_search(&mut self, search: &str) {
        self.installed_search = search.to_string();
    }

    pub fn installed_apps(&self) -> Vec<&InstalledApp> {
        let needle = self.installed_search.to_lowercase();
        self.installed
            .iter()
            .flatten()
            .filter(|app| {
                app.name.to_lowercase().contains(&needle) || app.exec.to_lowercase().contains(&needle)
            })
            .collect()
    }

    pub fn choose_installed_app<B: ConfigBackend>(
        &mut self,
        store: &mut ConfigStore<B>,
        app: &InstalledApp,
    ) -> Result<()> {
        self.choose_command(store, &app.name, &app.exec)
    }

    fn choose_command<B: ConfigBackend>(
        &mut self,
        store: &mut ConfigStore<B>,
        name: &str,
        command: &str,
    ) -> Result<()> {
        self.edit(store, |r| {
            r.name = name.to_string();
            r.command = command.to_string();
        })?;
        self.close_dialog();
        Ok(())
    }
}
