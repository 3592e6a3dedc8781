use crate::executor::{LaunchGate, Launcher};
use crate::model::{ShortcutId, ShortcutRecord};
use crate::{Error, Result};
use log::debug;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activation {
    Launched,
    OpenSettings,
    CoolingDown,
    NotFound,
}

/// The tile grid's click handling.
pub struct Launchpad<L> {
    launcher: L,
    gate: LaunchGate,
}

impl<L: Launcher> Launchpad<L> {
    pub fn new(launcher: L, cooldown: Duration) -> Self {
        Self {
            launcher,
            gate: LaunchGate::new(cooldown),
        }
    }

    pub fn launcher(&self) -> &L {
        &self.launcher
    }

    /// Activate tile `id`. A launch error is returned to the caller, but the
    /// cool-down still applies since the open animation already started.
    /// A tile with a blank command is rejected before the cool-down starts.
    pub fn activate(&mut self, records: &[ShortcutRecord], id: ShortcutId) -> Result<Activation> {
        if self.gate.is_cooling() {
            debug!("Launchpad: tile {} ignored during cool-down", id);
            return Ok(Activation::CoolingDown);
        }
        let Some(record) = records.iter().find(|r| r.id == id) else {
            return Ok(Activation::NotFound);
        };
        if record.is_settings_entry() {
            return Ok(Activation::OpenSettings);
        }
        if record.command.trim().is_empty() {
            debug!("Launchpad: tile {} has no command", id);
            return Err(Error::Validation(format!("shortcut '{}' has no command", record.name)));
        }
        self.gate.try_enter();
        self.launcher.launch(&record.command)?;
        Ok(Activation::Launched)
    }
}
