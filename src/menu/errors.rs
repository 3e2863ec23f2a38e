use thiserror::Error;

use crate::settings::SettingsError;

/// Errors that end an interactive session
#[derive(Error, Debug)]
pub enum MenuError {
    #[error("Terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("Settings error: {0}")]
    Settings(#[from] SettingsError),
}
