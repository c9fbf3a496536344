//! Platform configuration locations
//!
//! Settings files live under the platform config directory
//! (`~/.config/<app>` on Linux, `~/Library/Application Support/<app>` on
//! macOS, `%APPDATA%\<app>` on Windows).

use crate::error::{SettingsError, SettingsResult};
use std::path::PathBuf;

/// File name used by [`default_settings_path`]
pub const SETTINGS_FILE_NAME: &str = "settings.bin";

/// Configuration directory for `app`
pub fn config_dir(app: &str) -> SettingsResult<PathBuf> {
    dirs::config_dir()
        .map(|dir| dir.join(app))
        .ok_or_else(|| {
            SettingsError::ConfigDirectory("no configuration directory on this platform".into())
        })
}

/// Default binary settings file for `app`
pub fn default_settings_path(app: &str) -> SettingsResult<PathBuf> {
    Ok(config_dir(app)?.join(SETTINGS_FILE_NAME))
}

/// Create the configuration directory for `app` if needed
pub fn ensure_config_dir(app: &str) -> SettingsResult<PathBuf> {
    let dir = config_dir(app)?;
    std::fs::create_dir_all(&dir)
        .map_err(|e| SettingsError::ConfigDirectory(format!("{}: {}", dir.display(), e)))?;
    Ok(dir)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_path_is_inside_app_dir() {
        // Headless CI machines may have no config dir at all.
        if let (Ok(dir), Ok(file)) = (
            config_dir("settingsbox"),
            default_settings_path("settingsbox"),
        ) {
            assert_eq!(file.parent(), Some(dir.as_path()));
            assert_eq!(file.file_name().unwrap(), SETTINGS_FILE_NAME);
            assert!(dir.ends_with("settingsbox"));
        }
    }
}
