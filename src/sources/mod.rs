use crate::model::InstalledApp;
use crate::Result;

/// Host facility enumerating installed applications.
pub trait AppSource {
    fn scan(&self) -> Result<Vec<InstalledApp>>;
}

pub mod desktop;
