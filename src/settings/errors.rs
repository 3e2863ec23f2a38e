use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while reading or writing the settings file
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("No configuration directory available on this platform")]
    NoConfigDir,
    #[error("Failed to access settings at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Malformed settings file {path}: {source}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
