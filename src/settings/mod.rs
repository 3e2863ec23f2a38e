//! User preferences persisted between sessions

mod errors;
mod store;

pub use errors::SettingsError;
pub use store::{APP_DIR, DEFAULT_WELCOME, SETTINGS_FILE, Settings, SettingsStore};
