mod loader;
mod settings;

pub use loader::{load_config, LoadedConfig, ProfileConfig, TesthttpConfig, CONFIG_FILE_NAME};
pub use settings::{RunSettings, SettingsBuilder};
