use crate::model::{ShortcutDraft, ShortcutId, ShortcutRecord};
use crate::{Error, Result};
use log::{debug, info, warn};

/// Host storage for the serialized shortcut list.
pub trait ConfigBackend {
    fn load_config(&self) -> Result<String>;
    fn save_config(&self, blob: &str) -> Result<()>;
}

impl<B: ConfigBackend + ?Sized> ConfigBackend for Box<B> {
    fn load_config(&self) -> Result<String> {
        (**self).load_config()
    }

    fn save_config(&self, blob: &str) -> Result<()> {
        (**self).save_config(blob)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    /// The settings shortcut is never removed.
    Refused,
    /// The user did not confirm.
    Declined,
    NotFound,
}

type RefreshHook = Box<dyn FnMut(&[ShortcutRecord])>;

/// Owner of the canonical shortcut list.
///
/// Every mutation rewrites the whole list through [`ConfigBackend::save_config`].
/// When a write fails the in-memory list keeps the new state so nothing typed
/// by the user is lost; the error goes back to the caller.
pub struct ConfigStore<B> {
    backend: B,
    records: Vec<ShortcutRecord>,
    highest_id: ShortcutId,
    refresh: Vec<RefreshHook>,
}

impl<B: ConfigBackend> ConfigStore<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            records: Vec::new(),
            highest_id: 0,
            refresh: Vec::new(),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn records(&self) -> &[ShortcutRecord] {
        &self.records
    }

    pub fn get(&self, id: ShortcutId) -> Option<&ShortcutRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    pub fn contains(&self, id: ShortcutId) -> bool {
        self.get(id).is_some()
    }

    /// Register a callback run after every successful write, e.g. to reload the tile grid.
    pub fn on_refresh(&mut self, hook: impl FnMut(&[ShortcutRecord]) + 'static) {
        self.refresh.push(Box::new(hook));
    }

    /// Replace the in-memory list with the persisted one.
    ///
    /// On failure the current list is left exactly as it was.
    pub fn load(&mut self) -> Result<&[ShortcutRecord]> {
        let blob = self.backend.load_config()?;
        let records: Vec<ShortcutRecord> = serde_json::from_str(&blob)?;
        info!("ConfigStore: loaded {} shortcuts", records.len());

        let loaded_max = records.iter().map(|r| r.id).max().unwrap_or(0);
        self.highest_id = self.highest_id.max(loaded_max);
        self.records = records;
        Ok(&self.records)
    }

    /// Overwrite the persisted list with `records`.
    pub fn replace_all(&mut self, records: Vec<ShortcutRecord>) -> Result<()> {
        let max = records.iter().map(|r| r.id).max().unwrap_or(0);
        self.highest_id = self.highest_id.max(max);
        self.records = records;
        self.flush()
    }

    /// Give `draft` the next free id. Nothing is written.
    ///
    /// Only ids that reached the list count as taken, so a draft that is
    /// dropped before saving does not use one up. Ids of deleted records are
    /// not handed out again.
    pub fn add(&self, draft: ShortcutDraft) -> ShortcutRecord {
        let current_max = self.records.iter().map(|r| r.id).max().unwrap_or(0);
        let id = current_max.max(self.highest_id) + 1;
        debug!("ConfigStore: assigned id {}", id);
        ShortcutRecord::from_draft(id, draft)
    }

    /// Write a field-level edit of an existing record. Unknown ids are ignored.
    pub fn reconcile(&mut self, record: &ShortcutRecord) -> Result<bool> {
        let Some(slot) = self.records.iter_mut().find(|r| r.id == record.id) else {
            debug!("ConfigStore: reconcile for unknown id {}, skipped", record.id);
            return Ok(false);
        };
        *slot = record.clone();
        self.flush()?;
        Ok(true)
    }

    /// Insert or replace `record` after validating it, then write the list.
    pub fn commit(&mut self, record: ShortcutRecord) -> Result<()> {
        record.validate()?;
        self.highest_id = self.highest_id.max(record.id);
        match self.records.iter_mut().find(|r| r.id == record.id) {
            Some(slot) => *slot = record,
            None => self.records.push(record),
        }
        self.flush()
    }

    pub fn delete(&mut self, id: ShortcutId) -> Result<DeleteOutcome> {
        let Some(pos) = self.records.iter().position(|r| r.id == id) else {
            debug!("ConfigStore: delete for unknown id {}, skipped", id);
            return Ok(DeleteOutcome::NotFound);
        };
        if self.records[pos].is_settings_entry() {
            warn!("ConfigStore: refusing to delete the settings shortcut (id {})", id);
            return Ok(DeleteOutcome::Refused);
        }
        let removed = self.records.remove(pos);
        info!("ConfigStore: deleted '{}' (id {})", removed.name, id);
        self.flush()?;
        Ok(DeleteOutcome::Deleted)
    }

    /// Write the current in-memory list as-is.
    pub fn flush(&mut self) -> Result<()> {
        let blob = serde_json::to_string(&self.records).map_err(Error::Parse)?;
        if let Err(e) = self.backend.save_config(&blob) {
            warn!("ConfigStore: save failed, keeping {} shortcuts in memory: {}", self.records.len(), e);
            return Err(e);
        }
        debug!("ConfigStore: wrote {} shortcuts", self.records.len());
        for hook in self.refresh.iter_mut() {
            hook(&self.records);
        }
        Ok(())
    }
}
