//! settingsbox Settings Crate
//!
//! A string-keyed settings store with binary persistence, nested stores,
//! default establishment and JSON/TOML export.

pub mod error;
pub mod export;
pub mod paths;
pub mod persistence;
pub mod store;
pub mod value;

pub use error::{SettingsError, SettingsResult};
pub use export::TextFormat;
pub use paths::{config_dir, default_settings_path, ensure_config_dir};
pub use store::Settings;
pub use value::{SettingValue, SettingsMap, StoredMap, StoredValue, ValueKind};
