use crate::model::ShortcutId;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("validation failed: {0}")]
    Validation(String),

    #[error("shortcut list is not well-formed: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("{message}: {source}")]
    Io {
        message: String,
        path: Option<PathBuf>,
        #[source]
        source: std::io::Error,
    },

    #[error("{0} is not an image")]
    NotAnImage(String),

    #[error("invalid settings file: {0}")]
    Settings(#[from] toml::de::Error),

    #[error("no shortcut is being edited")]
    NoSession,

    #[error("shortcut {0} is no longer in the list")]
    UnknownShortcut(ShortcutId),
}

impl Error {
    pub fn io(message: impl Into<String>, path: Option<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            message: message.into(),
            path,
            source,
        }
    }
}
