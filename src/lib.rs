pub mod backend;
pub mod catalog;
pub mod config;
pub mod editor;
pub mod error;
pub mod executor;
pub mod icons;
pub mod launchpad;
pub mod matcher;
pub mod model;
pub mod palette;
pub mod sources;
pub mod store;

pub use error::{Error, Result};
